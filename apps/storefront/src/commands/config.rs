//! # Config Commands
//!
//! Store settings for the presentation layer.

use tracing::debug;

use crate::state::StorefrontConfig;

/// Gets the store configuration.
///
/// ## When Used
/// - App startup (store name, welcome screen default order type)
/// - Checkout (branch picker)
/// - Currency formatting
pub fn get_config(config: &StorefrontConfig) -> StorefrontConfig {
    debug!("get_config command");
    config.clone()
}
