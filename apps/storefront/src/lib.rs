//! # OD Storefront Library
//!
//! Application layer for the OD mobile storefront: loads settings and the
//! menu, owns the state handles, and exposes the commands the screens call.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs            ◄─── You are here (startup & walkthrough)
//! ├── state/
//! │   ├── mod.rs        ◄─── State type exports
//! │   ├── config.rs     ◄─── storefront.toml + OD_* overrides
//! │   ├── catalog.rs    ◄─── Built-in menu
//! │   ├── cart.rs       ◄─── Cart handle
//! │   ├── customization.rs ◄─ Open item sheet
//! │   └── auth.rs       ◄─── Session and auth events
//! ├── commands/
//! │   ├── mod.rs        ◄─── Command exports
//! │   ├── catalog.rs    ◄─── Menu and search
//! │   ├── customize.rs  ◄─── Item sheet
//! │   ├── cart.rs       ◄─── Cart screen
//! │   ├── checkout.rs   ◄─── Review and place order
//! │   ├── auth.rs       ◄─── Login / sign-up / OTP
//! │   └── config.rs     ◄─── Store settings
//! └── error.rs          ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use od_auth::{AuthConfig, SupabaseClient};
use od_core::{Branch, CheckoutForm, OptionGroupKind, PaymentMethod};
use tracing::{info, warn, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::customize;
use error::ApiError;
use state::{AuthState, CartState, CatalogState, CustomizationState, StorefrontConfig};

/// Every state handle the screens share.
#[derive(Debug)]
pub struct Storefront {
    pub config: StorefrontConfig,
    pub catalog: CatalogState,
    pub cart: CartState,
    pub customization: CustomizationState,
    /// `None` when no auth backend is configured; browsing and ordering
    /// still work.
    pub auth: Option<AuthState<SupabaseClient>>,
}

impl Storefront {
    /// Assembles the handles without an auth backend.
    pub fn new(config: StorefrontConfig, catalog: CatalogState) -> Self {
        let cart = CartState::with_tax_rate(config.tax_rate());
        Storefront {
            config,
            catalog,
            cart,
            customization: CustomizationState::new(),
            auth: None,
        }
    }

    /// Loads configuration and the built-in menu, and connects auth when
    /// it is configured.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. StorefrontConfig::load ──► defaults, storefront.toml, OD_* env     │
    /// │  2. CatalogState::builtin ───► 34 menu items                           │
    /// │  3. CartState ───────────────► empty, taxed at the configured rate     │
    /// │  4. AuthConfig::load ────────► ok: AuthState   err: warn, auth off     │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = StorefrontConfig::load(config_path)?;
        let catalog = CatalogState::builtin()?;
        info!(
            store = %config.store_name,
            items = catalog.catalog().len(),
            tax = %config.tax_rate().label(),
            "storefront loaded"
        );

        let mut storefront = Self::new(config, catalog);
        match AuthConfig::load(None).and_then(|c| SupabaseClient::new(&c)) {
            Ok(client) => {
                info!(?client, "auth backend configured");
                storefront.auth = Some(AuthState::new(client));
            }
            Err(e) => warn!(error = %e, "auth disabled"),
        }
        Ok(storefront)
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command
/// - `RUST_LOG=od_auth=trace` - Trace the auth client only
/// - Default: INFO, debug for the storefront itself
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    subscriber(filter).init();
}

const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

/// Formatting subscriber gated by `filter` alone.
fn subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt().with_env_filter(filter).finish()
}

/// Walks through one order the way a customer would: browse, customize a
/// deal, adjust the cart, check out. Signs in first when
/// `OD_DEMO_EMAIL` / `OD_DEMO_PASSWORD` are set and auth is configured.
pub async fn run() -> Result<(), ApiError> {
    init_tracing();
    info!("Starting OD storefront");

    let app = Storefront::load(None)?;

    if let (Some(auth), Ok(email), Ok(password)) = (
        app.auth.as_ref(),
        std::env::var("OD_DEMO_EMAIL"),
        std::env::var("OD_DEMO_PASSWORD"),
    ) {
        commands::auth::request_login(auth);
        if let Err(e) = commands::auth::sign_in(auth, &email, &password)?.await {
            warn!(error = %e, "sign-in task failed");
        }
        for event in commands::auth::poll_auth_events(auth) {
            info!(success = event.success, message = %event.message, "auth result");
        }
    }

    let menu = commands::catalog::get_menu(&app.catalog, &app.config);
    for section in &menu.sections {
        info!(category = %section.category, items = section.items.len(), "menu section");
    }

    // A sandwich deal needs a sandwich and a bread
    let (custom, cart) = (&app.customization, &app.cart);
    let deal = customize::start_customization(&app.catalog, custom, cart, 1)?;
    info!(item = %deal.item.name, missing = ?deal.missing, "customizing");
    customize::select_option(custom, cart, OptionGroupKind::Sandwich, "Pulled Beef")?;
    customize::select_option(custom, cart, OptionGroupKind::Bread, "Croissant")?;
    customize::toggle_add_on(custom, cart, "Cheese Slice")?;
    customize::add_customization_to_cart(custom, cart)?;

    // A plain deal straight from the menu card
    customize::start_customization(&app.catalog, custom, cart, 7)?;
    customize::increment_customization(custom, cart)?;
    let cart = customize::add_customization_to_cart(custom, cart)?;

    if let Some(line) = cart.entries.last() {
        commands::cart::decrement_cart_entry(&app.cart, line.entry_id.as_str())?;
    }
    let cart = commands::cart::get_cart(&app.cart);
    info!(
        lines = cart.entries.len(),
        subtotal = %app.config.format_currency(cart.totals.subtotal),
        tax = %app.config.format_currency(cart.totals.tax),
        total = %app.config.format_currency(cart.totals.grand_total),
        "cart ready"
    );

    let form = CheckoutForm {
        full_name: "Ayesha Khan".into(),
        phone: "0300 1234567".into(),
        email: "ayesha@example.com".into(),
        branch: app.config.branches.first().copied().or(Some(Branch::Pia)),
        payment_method: Some(PaymentMethod::CashOnDelivery),
        ..commands::checkout::new_checkout_form(&app.config)
    };
    let confirmation = commands::checkout::place_order(&app.cart, &app.config, &form)?;

    let rendered = serde_json::to_string_pretty(&confirmation)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    println!("{}", rendered);
    info!(order_ref = %confirmation.order_ref, "{}", confirmation.message);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storefront_uses_configured_tax() {
        let config = StorefrontConfig {
            tax_rate_bps: 1300,
            ..StorefrontConfig::default()
        };
        let app = Storefront::new(config, CatalogState::builtin().unwrap());

        assert!(app.auth.is_none());
        assert_eq!(app.cart.with_cart(|c| c.tax_rate().bps()), 1300);
    }

    #[test]
    fn test_default_log_filter_is_honoured() {
        use tracing::Level;

        let logs = subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));
        tracing::subscriber::with_default(logs, || {
            assert!(!tracing::enabled!(target: "od_auth", Level::TRACE));
            assert!(!tracing::enabled!(target: "od_auth", Level::DEBUG));
            assert!(tracing::enabled!(target: "od_auth", Level::INFO));
            assert!(tracing::enabled!(target: "storefront::commands", Level::DEBUG));
            assert!(!tracing::enabled!(target: "storefront::commands", Level::TRACE));
        });
    }
}
