//! LLM module - Language Model integrations
//!
//! Provides the provider abstraction and the Anthropic implementation.

pub mod anthropic;
pub mod models;
pub mod traits;

pub use anthropic::AnthropicClient;
pub use models::{get_model_presets, ModelId, ModelPreset};
pub use traits::{GenerateOptions, LLMProvider, LLMResponse, TokenUsage};
