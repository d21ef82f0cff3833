use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::component::{Artifact, Attributes, Capabilities, ModuleIdentity};
use crate::manifest::ManifestError;
use crate::rules::RuleError;
use crate::scope::BoundDependency;

/// Errors that abort a realisation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RealiseError {
  /// An additional variant is based on a variant that was not derived.
  #[error("variant '{base}' not defined in module {module}")]
  UnknownBaseVariant { base: String, module: ModuleIdentity },

  #[error(transparent)]
  Rule(#[from] RuleError),

  #[error(transparent)]
  Manifest(#[from] ManifestError),
}

/// A configuration with rules applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RealisedConfiguration {
  pub component: ModuleIdentity,
  pub name: String,
  pub transitive: bool,
  pub visible: bool,
  /// Own name plus every configuration this one extends.
  pub hierarchy: BTreeSet<String>,
  pub artifacts: Vec<Artifact>,
  pub dependencies: Vec<BoundDependency>,
  pub attributes: Attributes,
  pub capabilities: Capabilities,
}

/// A variant explicitly published with the module, with rules applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentVariant {
  pub name: String,
  pub attributes: Attributes,
  pub capabilities: Capabilities,
  pub dependencies: Vec<BoundDependency>,
  pub artifacts: Vec<Artifact>,
}
