//! Realisation: lazy metadata in, immutable metadata out.
//!
//! # Modules
//!
//! - [`configuration`] - rule application for configurations and variants
//! - [`derive`] - variant derivation and rule-declared additional variants
//! - [`metadata`] - [`RealisedMetadata`], the `transform` entry point
//! - `types` - realised configurations, variants and [`RealiseError`]

pub mod configuration;
pub mod derive;
pub mod metadata;
mod types;

pub use metadata::RealisedMetadata;
pub use types::*;
