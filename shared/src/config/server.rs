//! Server configuration module

use serde::{Deserialize, Serialize};

/// How the OTP endpoints answer their callers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// 302 redirect to one of the configured pages
    #[default]
    Redirect,
    /// JSON body (`{"sent": bool}` / `{"valid": bool}`)
    Json,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Path segment the OTP routes are mounted under
    pub app_name: String,

    /// Worker threads (0 = number of CPU cores)
    pub workers: usize,

    /// Response style for the OTP endpoints
    pub response_mode: ResponseMode,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8082,
            app_name: String::from("otp-telnyx"),
            workers: 0, // Use all CPU cores
            response_mode: ResponseMode::default(),
        }
    }
}

impl ServerConfig {
    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Route prefix for the OTP endpoints, e.g. `/otp-telnyx`
    pub fn scope_path(&self) -> String {
        format!("/{}", self.app_name.trim_matches('/'))
    }
}
