//! Legacy scope-based dependency selection.
//!
//! # Modules
//!
//! - [`filter`] - inclusion predicate, dependency filtering and artifact synthesis
//! - `types` - scopes, raw descriptors and configuration-bound dependencies

pub mod filter;
mod types;

pub use filter::{artifacts_for_configuration, filter_dependencies, is_known_jar_packaging, is_pom_packaging};
pub use types::*;
