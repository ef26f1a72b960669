use contracts::domain::a002_bi_report::{EmbedConfig, EmbedRequest};

use crate::shared::ports::{EmbedProvider, PortError, PortResult};

/// Данные для встраивания отчёта; без URL или токена считаем отчёт недоступным
pub async fn get_embed_config(
    provider: &dyn EmbedProvider,
    request: &EmbedRequest,
) -> PortResult<EmbedConfig> {
    let config = provider
        .get_embed_config(&request.workspace_id, &request.report_id)
        .await?;

    if !config.is_embeddable() {
        return Err(PortError::NotFound(format!(
            "report {} has no embed url or token",
            request.report_id
        )));
    }

    tracing::info!(
        "A002: embed config for report {} ({}), token expires {:?}",
        config.report_name,
        config.report_id,
        config.token_expiration
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FakeProvider {
        token: &'static str,
    }

    #[async_trait]
    impl EmbedProvider for FakeProvider {
        async fn get_embed_config(
            &self,
            _workspace_id: &str,
            report_id: &str,
        ) -> PortResult<EmbedConfig> {
            Ok(EmbedConfig {
                report_id: report_id.to_string(),
                report_name: "Sales".into(),
                embed_url: "https://app.powerbi.com/reportEmbed?reportId=r1".into(),
                embed_token: self.token.to_string(),
                token_expiration: None,
            })
        }
    }

    fn request() -> EmbedRequest {
        EmbedRequest {
            workspace_id: "ws".into(),
            report_id: "r1".into(),
        }
    }

    #[tokio::test]
    async fn test_embed_config_returned() {
        let config = get_embed_config(&FakeProvider { token: "tkn" }, &request())
            .await
            .unwrap();
        assert_eq!(config.report_id, "r1");
    }

    #[tokio::test]
    async fn test_missing_token_is_not_found() {
        let result = get_embed_config(&FakeProvider { token: "" }, &request()).await;
        assert!(matches!(result, Err(PortError::NotFound(_))));
    }
}
