// Configuration loading

pub mod ai;
pub mod settings;

pub use ai::{AiConfigStatus, KeySource, ResolvedAiConfig};
pub use settings::{AiSettings, Settings};
