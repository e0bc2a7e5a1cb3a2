// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod geocode;
pub mod prediction;

pub use geocode::*;
pub use prediction::*;
