//! Serialized module documents.
//!
//! A module document is the JSON form of what a descriptor parser hands to
//! this crate:
//!
//! ```json
//! {
//!   "id": { "group": "org.example", "module": "lib", "version": "1.0" },
//!   "packaging": "jar",
//!   "dependencies": [
//!     { "group": "com.acme", "module": "core", "version": "2.1", "scope": "compile" },
//!     { "group": "junit", "module": "junit", "version": "4.13", "scope": "test" }
//!   ]
//! }
//! ```
//!
//! Omitted `configurations` means the standard Maven configurations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::derivation::DerivationKind;
use super::hierarchy::ManifestError;
use super::lazy::LazyModuleMetadata;
use super::types::{ConfigurationDefinition, VariantDefinition};
use crate::component::{Attributes, ModuleIdentity, ModuleSource};
use crate::consts::{DEFAULT_PACKAGING, DEFAULT_STATUS};
use crate::rules::VariantMetadataRules;
use crate::scope::DependencyDescriptor;

fn default_packaging() -> String {
  DEFAULT_PACKAGING.to_string()
}

fn default_status() -> String {
  DEFAULT_STATUS.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDocument {
  pub id: ModuleIdentity,
  #[serde(default)]
  pub source: ModuleSource,
  #[serde(default = "default_packaging")]
  pub packaging: String,
  #[serde(default = "default_status")]
  pub status: String,
  #[serde(default)]
  pub relocated: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub snapshot_timestamp: Option<String>,
  #[serde(default)]
  pub attributes: Attributes,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub configurations: Option<Vec<ConfigurationDefinition>>,
  #[serde(default)]
  pub dependencies: Vec<DependencyDescriptor>,
  #[serde(default)]
  pub variants: Vec<VariantDefinition>,
  #[serde(default)]
  pub derivation: DerivationKind,
}

impl ModuleDocument {
  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }

  /// Build the lazy metadata this document describes, customised by `rules`.
  ///
  /// # Errors
  ///
  /// Fails if the document declares a configuration name twice.
  pub fn into_lazy(self, rules: Arc<dyn VariantMetadataRules>) -> Result<LazyModuleMetadata, ManifestError> {
    let mut builder = LazyModuleMetadata::builder(self.id)
      .source(self.source)
      .packaging(self.packaging)
      .status(self.status)
      .relocated(self.relocated)
      .attributes(self.attributes)
      .dependencies(self.dependencies)
      .rules(rules)
      .derivation(self.derivation.strategy());

    if let Some(timestamp) = self.snapshot_timestamp {
      builder = builder.snapshot_timestamp(timestamp);
    }
    if let Some(configurations) = self.configurations {
      builder = builder.configurations(configurations);
    }
    for variant in self.variants {
      builder = builder.variant(variant);
    }
    builder.build()
  }
}
