//! # od-core: Pure Storefront Logic for the OD App
//!
//! This crate holds the menu, customization rules, cart pricing and
//! checkout form rules as plain in-memory types with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        OD Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (React Native)                     │   │
//! │  │    Menu ──► Customize ──► Cart ──► Checkout ──► Confirmation   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / DTOs                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront (app)                             │   │
//! │  │    list_menu, add_to_cart, update_quantity, place_order, ...   │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────────────┐  ┌───▼───────────────┐   │
//! │  │        ★ od-core (THIS CRATE) ★          │  │     od-auth       │   │
//! │  │                                          │  │  hosted sign-in   │   │
//! │  │  ┌─────────┐ ┌──────────────┐ ┌──────┐  │  │  sign-up, OTP     │   │
//! │  │  │ catalog │ │customization │ │ cart │  │  └───────────────────┘   │
//! │  │  │  menu   │ │  Resolver    │ │Engine│  │                          │
//! │  │  └─────────┘ └──────────────┘ └──────┘  │                          │
//! │  │  ┌─────────┐ ┌──────────────┐ ┌──────┐  │                          │
//! │  │  │  money  │ │  validation  │ │check-│  │                          │
//! │  │  │  paisa  │ │  form rules  │ │ out  │  │                          │
//! │  │  └─────────┘ └──────────────┘ └──────┘  │                          │
//! │  │                                          │                          │
//! │  │  NO I/O • NO NETWORK • NO GLOBAL STATE   │                          │
//! │  └──────────────────────────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Menu items, categories, search
//! - [`customization`] - Option groups, selections, the `Resolver`
//! - [`cart`] - The `CartEngine` and its pricing
//! - [`checkout`] - Checkout form rules and order summaries
//! - [`money`] - Integer paisa money type
//! - [`types`] - Tax rate, category, entry id, order type
//! - [`validation`] - Field validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use od_core::{CartEngine, OptionGroupKind, Resolver, Selection, StaticCatalog};
//! use od_core::catalog::CatalogProvider;
//!
//! let catalog = StaticCatalog::builtin().unwrap();
//! let wich = catalog.find(33).unwrap();
//!
//! let selection = Selection::new()
//!     .with_choice(OptionGroupKind::Sandwich, "Pulled Beef")
//!     .with_choice(OptionGroupKind::Bread, "Ciabatta")
//!     .with_add_on("Cheese Slice");
//! assert!(Resolver::validate(wich, &selection));
//!
//! let mut cart = CartEngine::new();
//! cart.add_entry(wich, selection, 1).unwrap();
//! assert_eq!(cart.grand_total(), cart.subtotal() + cart.tax());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customization;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartEngine, CartEntry, CartTotals};
pub use catalog::{CatalogItem, CatalogProvider, CatalogSection, StaticCatalog};
pub use checkout::{Branch, CheckoutForm, OrderLine, OrderSummary, PaymentMethod, PickupTime};
pub use customization::{
    AddOnPricing, OptionChoice, OptionGroup, OptionGroupKind, Profile, Resolver, Selection,
    StaticAddOnPrices, MAX_ADD_ONS,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
