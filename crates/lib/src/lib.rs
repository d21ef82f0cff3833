//! modmeta-lib: realisation of published module metadata
//!
//! This crate turns the lazy description of a published module, as parsed
//! from a POM-style descriptor, into immutable realised metadata:
//! - `LazyModuleMetadata`: declared configurations, dependencies and variants,
//!   with customisation rules not yet applied
//! - `RealisedMetadata`: every configuration and variant with rules applied
//!   exactly once, safe to cache and share between threads
//!
//! It also implements scope-based dependency selection per configuration and
//! variant derivation for modules that declare no variants.

pub mod component;
pub mod consts;
pub mod manifest;
pub mod realise;
pub mod rules;
pub mod scope;
pub mod util;

pub use component::{ModuleIdentity, ModuleSource};
pub use manifest::{LazyModuleMetadata, ModuleDocument};
pub use realise::{RealiseError, RealisedMetadata};
