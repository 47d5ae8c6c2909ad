//! # State Module
//!
//! Application state handles for the storefront.
//!
//! Each concern gets its own handle instead of one `AppState`, so every
//! command declares exactly what it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront                                 │   │
//! │  │  config, catalog, cart, customization, auth (optional)          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │      ┌──────────────┬────────┴─────┬────────────────┬──────────────┐   │
//! │      ▼              ▼              ▼                ▼              ▼    │
//! │  ┌─────────┐  ┌──────────┐  ┌────────────┐  ┌──────────────┐ ┌───────┐ │
//! │  │ Config  │  │ Catalog  │  │ CartState  │  │Customization │ │ Auth  │ │
//! │  │ (toml + │  │ (static  │  │ Rc<RefCell │  │ open sheet   │ │session│ │
//! │  │  env)   │  │  menu)   │  │ <Cart>>    │  │              │ │events │ │
//! │  └─────────┘  └──────────┘  └────────────┘  └──────────────┘ └───────┘ │
//! │                                                                         │
//! │  • Config and Catalog: read-only after startup                         │
//! │  • Cart and Customization: UI thread only, one borrow at a time        │
//! │  • Auth: results arrive from tokio tasks over a channel                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod cart;
mod catalog;
mod config;
mod customization;

pub use auth::AuthState;
pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{ConfigError, StorefrontConfig};
pub use customization::{CustomizationSession, CustomizationState};
