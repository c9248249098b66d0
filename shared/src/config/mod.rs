//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and default log filter
//! - `server` - HTTP server, route prefix and response mode
//! - `store` - Token store file and token shape
//! - `sms` - SMS provider credentials and message settings
//! - `redirects` - Redirect targets for each endpoint outcome

pub mod environment;
pub mod redirects;
pub mod server;
pub mod sms;
pub mod store;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use environment::Environment;
pub use redirects::RedirectConfig;
pub use server::{ResponseMode, ServerConfig};
pub use sms::{SmsConfig, SmsProvider};
pub use store::StoreConfig;

/// Complete application configuration combining all sub-configurations
///
/// Loaded once at process start and never mutated afterwards.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token store configuration
    pub store: StoreConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// Redirect targets
    pub redirects: RedirectConfig,
}

impl AppConfig {
    /// Check the cross-field rules the individual sections cannot express
    pub fn validate(&self) -> Result<(), String> {
        self.store.validate()?;
        self.sms.validate()?;
        Ok(())
    }

    /// Log filter for the binary when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        self.environment.default_log_filter()
    }

    /// A production deployment that would never deliver a token
    pub fn uses_mock_in_production(&self) -> bool {
        self.environment.is_production() && self.sms.provider == SmsProvider::Mock
    }
}
