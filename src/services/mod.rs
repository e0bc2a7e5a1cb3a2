// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod cache;
pub mod controller;
pub mod debounce;
pub mod geocoding;
pub mod google_client;
pub mod normalize;
pub mod provider;

pub use cache::*;
pub use controller::*;
pub use debounce::*;
pub use geocoding::*;
pub use google_client::*;
pub use normalize::*;
pub use provider::*;
