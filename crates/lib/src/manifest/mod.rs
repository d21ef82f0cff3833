//! The manifest model: lazy module metadata as parsed from a descriptor.
//!
//! # Modules
//!
//! - [`lazy`] - [`LazyModuleMetadata`] and its builder
//! - [`hierarchy`] - configuration hierarchy construction
//! - [`derivation`] - strategies that propose variants for variant-less modules
//! - [`document`] - JSON module documents
//! - `types` - configuration and variant definitions, the standard Maven table

pub mod derivation;
pub mod document;
pub mod hierarchy;
pub mod lazy;
mod types;

pub use derivation::{DerivationKind, DerivedCandidate, JavaEcosystem, NoDerivation, VariantDerivationStrategy};
pub use document::ModuleDocument;
pub use hierarchy::{ManifestError, construct_hierarchy};
pub use lazy::{LazyModuleMetadata, LazyModuleMetadataBuilder};
pub use types::*;
