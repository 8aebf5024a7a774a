//! Model definitions and presets
//!
//! The supported Anthropic models and their display metadata.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::SupaBrowserError;

/// A supported model identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "claude-3-opus-20240229")]
    Claude3Opus,
    #[serde(rename = "claude-3-sonnet-20240229")]
    Claude3Sonnet,
    #[serde(rename = "claude-3-haiku-20240307")]
    Claude3Haiku,
}

impl ModelId {
    /// All supported models, default first
    pub const ALL: [ModelId; 3] = [
        ModelId::Claude3Opus,
        ModelId::Claude3Sonnet,
        ModelId::Claude3Haiku,
    ];

    /// API identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::Claude3Opus => "claude-3-opus-20240229",
            ModelId::Claude3Sonnet => "claude-3-sonnet-20240229",
            ModelId::Claude3Haiku => "claude-3-haiku-20240307",
        }
    }

    /// Display metadata for this model
    pub fn preset(&self) -> ModelPreset {
        match self {
            ModelId::Claude3Opus => ModelPreset {
                model: *self,
                display_name: "Claude 3 Opus",
                description: "Most capable; best for multi-step browsing tasks",
            },
            ModelId::Claude3Sonnet => ModelPreset {
                model: *self,
                display_name: "Claude 3 Sonnet",
                description: "Balanced speed and planning quality",
            },
            ModelId::Claude3Haiku => ModelPreset {
                model: *self,
                display_name: "Claude 3 Haiku",
                description: "Fastest and cheapest; fine for short lookups",
            },
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = SupaBrowserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ModelId::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SupaBrowserError::UnsupportedModel(s.to_string()))
    }
}

/// Model preset with display metadata
#[derive(Debug, Clone, Serialize)]
pub struct ModelPreset {
    /// Model identifier
    pub model: ModelId,
    /// Human-readable display name
    pub display_name: &'static str,
    /// Description of the model
    pub description: &'static str,
}

/// Get predefined model presets
pub fn get_model_presets() -> Vec<ModelPreset> {
    ModelId::ALL.iter().map(ModelId::preset).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_models() {
        for model in ModelId::ALL {
            assert_eq!(model.as_str().parse::<ModelId>().unwrap(), model);
        }
        assert_eq!(ModelId::default(), ModelId::Claude3Opus);
    }

    #[test]
    fn test_parse_unknown_model() {
        let err = "gpt-4o".parse::<ModelId>().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Unsupported model 'gpt-4o'");
    }

    #[test]
    fn test_serde_uses_api_names() {
        let json = serde_json::to_string(&ModelId::Claude3Haiku).unwrap();
        assert_eq!(json, "\"claude-3-haiku-20240307\"");
    }

    #[test]
    fn test_presets_cover_all_models() {
        let presets = get_model_presets();
        assert_eq!(presets.len(), 3);
        assert_eq!(presets[0].display_name, "Claude 3 Opus");
    }
}
