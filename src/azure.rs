//! Azure control-plane integration.
//!
//! Split into credential resolution, the capability traits the rest of the
//! server programs against, the ARM REST client implementing them, and the
//! wire models.

pub mod api;
pub mod client;
pub mod credentials;
pub mod models;

pub use api::{ResourceApi, SqlApi};
pub use client::ArmClient;
pub use credentials::{resolve_credential, SharedCredential};
