//! Renderer configuration
//!
//! Passed from the page as JSON. Every field is optional; missing fields
//! take the landing page's defaults.

use serde::Deserialize;

/// Startup configuration for [`BackgroundRenderer`](crate::BackgroundRenderer)
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RendererConfig {
    /// Element id of the drawing surface
    pub canvas_id: String,
    /// Selector of the declarative fallback layer
    pub fallback_selector: String,
    /// Selector of the call-to-action elements that get the pointer highlight
    pub interactive_selector: String,
    /// Platform identifiers that classify a device as mobile (case-insensitive)
    pub mobile_identifiers: Vec<String>,
    /// Show the fallback layer when desktop setup fails
    pub fallback_on_setup_failure: bool,
    /// Document element holding vertex shader text, overriding the built-in stage
    pub vertex_shader_id: Option<String>,
    /// Document element holding fragment shader text, overriding the built-in stage
    pub fragment_shader_id: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            fallback_selector: ".mobile-background".to_string(),
            interactive_selector: ".glass-button".to_string(),
            mobile_identifiers: ["iPhone", "iPad", "iPod", "Android"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            fallback_on_setup_failure: true,
            vertex_shader_id: Some("vertexShader".to_string()),
            fragment_shader_id: Some("fragmentShader".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RendererConfig::default();
        assert_eq!(config.canvas_id, "canvas");
        assert_eq!(config.mobile_identifiers.len(), 4);
        assert!(config.fallback_on_setup_failure);
    }

    #[test]
    fn test_config_empty_json_uses_defaults() {
        let config: RendererConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RendererConfig::default());
    }

    #[test]
    fn test_config_partial_json() {
        let config: RendererConfig = serde_json::from_str(
            r#"{ "canvasId": "bg", "fallbackOnSetupFailure": false, "mobileIdentifiers": ["webOS"] }"#,
        )
        .unwrap();
        assert_eq!(config.canvas_id, "bg");
        assert!(!config.fallback_on_setup_failure);
        assert_eq!(config.mobile_identifiers, vec!["webOS".to_string()]);
        assert_eq!(config.interactive_selector, ".glass-button");
    }

    #[test]
    fn test_config_null_shader_ids() {
        let config: RendererConfig =
            serde_json::from_str(r#"{ "vertexShaderId": null, "fragmentShaderId": null }"#).unwrap();
        assert_eq!(config.vertex_shader_id, None);
        assert_eq!(config.fragment_shader_id, None);
    }
}
