//! Engine configuration.
//!
//! All configuration is driven by `NIMBUS_*` environment variables with
//! sensible defaults, so tests normally never touch it.

use tracing::warn;

use crate::types::{AccountId, AwsRegion};

/// Configuration for one engine instance.
///
/// The region and account ID only influence the shape of derived endpoint
/// addresses (queue URLs, topic ARNs); no real cloud account is involved.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NimbusConfig {
    /// Region embedded in derived endpoint addresses.
    pub default_region: AwsRegion,
    /// Account ID embedded in derived endpoint addresses.
    pub account_id: AccountId,
    /// Log level hint for embedding applications.
    pub log_level: String,
}

impl Default for NimbusConfig {
    fn default() -> Self {
        Self {
            default_region: AwsRegion::default(),
            account_id: AccountId::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl NimbusConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("NIMBUS_DEFAULT_REGION") {
            config.default_region = AwsRegion::new(v);
        }
        if let Ok(v) = std::env::var("NIMBUS_ACCOUNT_ID") {
            match AccountId::new(v) {
                Ok(id) => config.account_id = id,
                Err(e) => warn!("ignoring NIMBUS_ACCOUNT_ID: {e}"),
            }
        }
        if let Ok(v) = std::env::var("NIMBUS_LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}
