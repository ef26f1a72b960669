//! Встраивание отчёта через powerbi-client (глобальный `window.powerbi`)

use contracts::domain::a002_bi_report::EmbedConfig;
use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

/// models.TokenType.Embed
const TOKEN_TYPE_EMBED: u8 = 1;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct PaneState {
    #[serde(skip_serializing_if = "Option::is_none")]
    expanded: Option<bool>,
    visible: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Panes {
    filters: PaneState,
    page_navigation: PaneState,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
struct EmbedSettings {
    panes: Panes,
}

/// Конфигурация для `powerbi.embed(container, config)`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportEmbedOptions {
    #[serde(rename = "type")]
    kind: &'static str,
    id: String,
    embed_url: String,
    access_token: String,
    token_type: u8,
    page_view: &'static str,
    settings: EmbedSettings,
}

impl ReportEmbedOptions {
    /// Просмотр по ширине, без панели фильтров и навигации по страницам
    pub fn fit_to_width(config: &EmbedConfig) -> Self {
        Self {
            kind: "report",
            id: config.report_id.clone(),
            embed_url: config.embed_url.clone(),
            access_token: config.embed_token.clone(),
            token_type: TOKEN_TYPE_EMBED,
            page_view: "fitToWidth",
            settings: EmbedSettings {
                panes: Panes {
                    filters: PaneState {
                        expanded: Some(false),
                        visible: false,
                    },
                    page_navigation: PaneState {
                        expanded: None,
                        visible: false,
                    },
                },
            },
        }
    }
}

fn js_method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("{} is not a function", name)))
}

/// Встроить отчёт в контейнер, заменив предыдущий
pub fn embed_report(container: &web_sys::HtmlElement, config: &EmbedConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object"))?;
    let powerbi = Reflect::get(&window, &JsValue::from_str("powerbi"))?;
    if powerbi.is_undefined() || powerbi.is_null() {
        return Err(JsValue::from_str("powerbi client is not loaded"));
    }

    // Сбросить предыдущий отчёт в этом контейнере
    if let Ok(reset) = js_method(&powerbi, "reset") {
        let _ = reset.call1(&powerbi, container);
    }

    let options = ReportEmbedOptions::fit_to_width(config)
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    let embed = js_method(&powerbi, "embed")?;
    let report = embed.call2(&powerbi, container, &options)?;

    let on_page_changed = Closure::wrap(Box::new(move |event: JsValue| {
        let page = Reflect::get(&event, &JsValue::from_str("detail"))
            .and_then(|detail| Reflect::get(&detail, &JsValue::from_str("newPage")))
            .and_then(|page| Reflect::get(&page, &JsValue::from_str("displayName")))
            .ok()
            .and_then(|name| name.as_string())
            .unwrap_or_default();
        log::info!("Power BI: page changed to '{}'", page);
    }) as Box<dyn FnMut(JsValue)>);

    js_method(&report, "on")?.call2(
        &report,
        &JsValue::from_str("pageChanged"),
        on_page_changed.as_ref().unchecked_ref(),
    )?;
    on_page_changed.forget();

    log::info!("Power BI: embedded report {} ({})", config.report_name, config.report_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_options_shape() {
        let config = EmbedConfig {
            report_id: "r1".into(),
            report_name: "Sales".into(),
            embed_url: "https://app.powerbi.com/reportEmbed?reportId=r1".into(),
            embed_token: "tkn".into(),
            token_expiration: None,
        };

        let value = serde_json::to_value(ReportEmbedOptions::fit_to_width(&config)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "report",
                "id": "r1",
                "embedUrl": "https://app.powerbi.com/reportEmbed?reportId=r1",
                "accessToken": "tkn",
                "tokenType": 1,
                "pageView": "fitToWidth",
                "settings": {
                    "panes": {
                        "filters": {"expanded": false, "visible": false},
                        "pageNavigation": {"visible": false}
                    }
                }
            })
        );
    }
}
