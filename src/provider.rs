//! Theme provider contract
//!
//! The generation service is a black box behind an HTTP endpoint: prompt in,
//! theme payload out. Everything that can go wrong collapses into one error
//! taxonomy, and a payload either passes the full schema or is rejected -
//! there is no partial-theme recovery.

use std::fmt;

use crate::theme::{Theme, ThemeError};

/// Why a generation attempt produced no theme
#[derive(Debug)]
pub enum ProviderError {
    /// Endpoint missing, unreachable, or non-2xx
    Http(String),
    /// Body was not JSON matching the schema shape
    Payload(serde_json::Error),
    /// Parsed fine but violates the contract (empty lists, bad colors, ...)
    Schema(ThemeError),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Http(msg) => write!(f, "theme endpoint failed: {msg}"),
            ProviderError::Payload(e) => write!(f, "malformed theme payload: {e}"),
            ProviderError::Schema(e) => write!(f, "theme payload rejected: {e}"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Http(_) => None,
            ProviderError::Payload(e) => Some(e),
            ProviderError::Schema(e) => Some(e),
        }
    }
}

/// Parse and validate a raw generator payload
pub fn parse_theme(json: &str) -> Result<Theme, ProviderError> {
    let theme: Theme = serde_json::from_str(json).map_err(ProviderError::Payload)?;
    theme.validate().map_err(ProviderError::Schema)?;
    Ok(theme)
}

#[cfg(target_arch = "wasm32")]
pub use fetch::FetchThemeProvider;

#[cfg(target_arch = "wasm32")]
mod fetch {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::{ProviderError, parse_theme};
    use crate::theme::Theme;

    /// Client for the generation endpoint.
    ///
    /// The endpoint URL is deployment configuration, carried as a
    /// `data-theme-endpoint` attribute on the document body.
    pub struct FetchThemeProvider {
        endpoint: String,
    }

    impl FetchThemeProvider {
        pub fn new(endpoint: impl Into<String>) -> Self {
            Self {
                endpoint: endpoint.into(),
            }
        }

        pub fn from_document() -> Result<Self, ProviderError> {
            web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.body())
                .and_then(|b| b.get_attribute("data-theme-endpoint"))
                .map(Self::new)
                .ok_or_else(|| {
                    ProviderError::Http("no data-theme-endpoint configured".into())
                })
        }

        /// POST the prompt, parse and validate the reply
        pub async fn generate(&self, prompt: &str) -> Result<Theme, ProviderError> {
            let window = web_sys::window()
                .ok_or_else(|| ProviderError::Http("no window".into()))?;

            let body = serde_json::json!({ "prompt": prompt }).to_string();
            let opts = RequestInit::new();
            opts.set_method("POST");
            opts.set_body(&JsValue::from_str(&body));

            let request =
                Request::new_with_str_and_init(&self.endpoint, &opts).map_err(js_err)?;
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_err)?;

            let reply = JsFuture::from(window.fetch_with_request(&request))
                .await
                .map_err(js_err)?;
            let reply: Response = reply
                .dyn_into()
                .map_err(|_| ProviderError::Http("fetch returned a non-Response".into()))?;
            if !reply.ok() {
                return Err(ProviderError::Http(format!(
                    "endpoint returned {}",
                    reply.status()
                )));
            }

            let text = JsFuture::from(reply.text().map_err(js_err)?)
                .await
                .map_err(js_err)?;
            let json = text
                .as_string()
                .ok_or_else(|| ProviderError::Http("response body was not text".into()))?;

            parse_theme(&json)
        }
    }

    fn js_err(value: JsValue) -> ProviderError {
        ProviderError::Http(format!("{value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::AvoidKind;

    const GOLDEN: &str = r##"{
        "worldName": "Neon Depths",
        "description": "A flooded arcade city",
        "colors": {
            "primary": "#ff2d78",
            "secondary": "#1b1b3a",
            "background": "#0a0a1a",
            "accent": "#2dffd0"
        },
        "character": {
            "name": "Volt",
            "emoji": "🐙",
            "description": "An octopus with a neon visor"
        },
        "obstacles": [
            { "name": "Sunken Cabinet", "emoji": "🕹️", "behavior": "static", "type": "jump" },
            { "name": "Drifting Sign", "emoji": "🪧", "behavior": "moving", "type": "slide" },
            { "name": "Pressure Wall", "emoji": "🧱", "behavior": "static", "type": "dodge" }
        ],
        "collectibles": [
            { "name": "Token", "emoji": "🪙", "points": 10 },
            { "name": "Pearl", "emoji": "🫧", "points": 25 }
        ]
    }"##;

    #[test]
    fn golden_payload_parses_and_validates() {
        let theme = parse_theme(GOLDEN).unwrap();
        assert_eq!(theme.world_name, "Neon Depths");
        assert_eq!(theme.obstacles.len(), 3);
        assert_eq!(theme.obstacles[2].kind, AvoidKind::Dodge);
        assert_eq!(theme.collectibles[1].points, 25.0);
    }

    #[test]
    fn unparsable_body_is_a_payload_error() {
        assert!(matches!(
            parse_theme("not json at all"),
            Err(ProviderError::Payload(_))
        ));
    }

    #[test]
    fn unknown_avoidance_type_is_a_payload_error() {
        let json = GOLDEN.replace("\"jump\"", "\"teleport\"");
        assert!(matches!(parse_theme(&json), Err(ProviderError::Payload(_))));
    }

    #[test]
    fn missing_field_is_a_payload_error() {
        let json = GOLDEN.replace("\"worldName\": \"Neon Depths\",", "");
        assert!(matches!(parse_theme(&json), Err(ProviderError::Payload(_))));
    }

    #[test]
    fn empty_obstacle_list_is_a_schema_error() {
        let mut value: serde_json::Value = serde_json::from_str(GOLDEN).unwrap();
        value["obstacles"] = serde_json::json!([]);
        let json = value.to_string();
        assert!(matches!(parse_theme(&json), Err(ProviderError::Schema(_))));
    }

    #[test]
    fn errors_render_a_reason() {
        let err = parse_theme("{}").unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }
}
