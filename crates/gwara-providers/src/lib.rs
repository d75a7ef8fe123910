//! gwara-providers: Question service integrations.
//!
//! Implements the `QuestionProvider` trait over HTTP and as an in-process
//! mock, and loads the TOML configuration that selects the service.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{create_provider, load_config, load_config_from, GwaraConfig, ProviderConfig};
pub use http::HttpQuestionProvider;
pub use mock::MockProvider;
