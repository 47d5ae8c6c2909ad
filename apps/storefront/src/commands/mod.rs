//! # Storefront Commands Module
//!
//! Every action the screens can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── catalog.rs    ◄─── Menu, search, item lookup
//! ├── customize.rs  ◄─── Item detail sheet (options, quantity)
//! ├── cart.rs       ◄─── Cart screen
//! ├── checkout.rs   ◄─── Review and place order
//! ├── auth.rs       ◄─── Login, registration, OTP
//! └── config.rs     ◄─── Store settings
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Screen                                                                 │
//! │  ──────                                                                 │
//! │  onPress={() => addCustomizationToCart()}                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  pub fn add_customization_to_cart(                                      │
//! │      custom: &CustomizationState,   ◄── only the state it needs        │
//! │      cart: &CartState,                                                  │
//! │  ) -> Result<CartResponse, ApiError>                                    │
//! │         │                                                               │
//! │         │ (serde JSON, types exported with ts-rs)                       │
//! │         ▼                                                               │
//! │  Screen receives: CartResponse or { code, message }                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod customize;
