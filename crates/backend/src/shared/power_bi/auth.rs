use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use super::dto::TokenResponse;
use crate::shared::config::PowerBiConfig;
use crate::shared::ports::{PortError, PortResult};

/// Запас до истечения токена, после которого берём новый
const REFRESH_MARGIN_SECS: i64 = 300;

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Access token service principal'а (AAD, client_credentials) с кэшем
pub struct AzureAdTokenProvider {
    client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: String,
    cached: Mutex<Option<CachedToken>>,
}

impl AzureAdTokenProvider {
    pub fn new(client: reqwest::Client, config: &PowerBiConfig) -> Self {
        Self {
            client,
            token_url: format!(
                "{}/{}/oauth2/v2.0/token",
                config.authority.trim_end_matches('/'),
                urlencoding::encode(&config.tenant_id)
            ),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: config.scope.clone(),
            cached: Mutex::new(None),
        }
    }

    /// Получить действующий токен (из кэша или запросить новый)
    pub async fn access_token(&self) -> PortResult<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(PortError::Auth(
                "power_bi.client_id / client_secret are not configured".to_string(),
            ));
        }

        tracing::info!("Power BI: requesting access token for client {}", self.client_id);

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", self.scope.as_str()),
        ];

        let response = self.client.post(&self.token_url).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PortError::Auth(format!("HTTP {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PortError::Decode(e.to_string()))?;

        let fresh = CachedToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        };
        let value = fresh.value.clone();
        *cached = Some(fresh);

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_freshness_margin() {
        let now = Utc::now();
        let token = CachedToken {
            value: "t".into(),
            expires_at: now + Duration::seconds(3600),
        };
        assert!(token.is_fresh(now));
        assert!(!token.is_fresh(now + Duration::seconds(3400)));
    }
}
