//! Variant metadata rules.
//!
//! Rules customise what a configuration or variant exposes: its attributes,
//! its capabilities and its files. They may also declare additional variants.
//!
//! Rules are keyed by name only. Each hook receives a [`NameOnlyVariant`]
//! rather than the object under construction, so a rule can never observe
//! (and come to depend on) the data it is about to change.
//!
//! # Modules
//!
//! - [`declarative`] - data-driven rules loadable from JSON

pub mod declarative;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::component::{Artifact, Attributes, Capabilities, ModuleIdentity};

pub use declarative::{DeclarativeRules, FileRule, VariantRule};

/// The identity a rule is allowed to see: a configuration or variant name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameOnlyVariant {
  name: String,
}

impl NameOnlyVariant {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }

  pub fn name(&self) -> &str {
    &self.name
  }
}

/// An additional variant declared by rules.
///
/// With a `base`, the new variant starts as a copy of that derived variant;
/// without one it starts from the module attributes and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalVariant {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub base: Option<String>,
}

impl AdditionalVariant {
  pub fn bare(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      base: None,
    }
  }

  pub fn based_on(name: impl Into<String>, base: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      base: Some(base.into()),
    }
  }
}

/// Errors raised while applying rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
  #[error("rule for '{variant}' adds file '{file}' which is already present")]
  DuplicateFile { variant: String, file: String },

  #[error("rule for '{variant}' declares an invalid capability: {reason}")]
  InvalidCapability { variant: String, reason: String },

  #[error("rule for '{variant}' failed: {message}")]
  Failed { variant: String, message: String },
}

/// The rule engine contract.
///
/// Implementations are shared between concurrent resolutions and may be
/// invoked many times per module, so they must be `Send + Sync` and free of
/// observable side effects.
pub trait VariantMetadataRules: Send + Sync {
  fn apply_attribute_rules(&self, variant: &NameOnlyVariant, attributes: Attributes) -> Result<Attributes, RuleError>;

  fn apply_capability_rules(
    &self,
    variant: &NameOnlyVariant,
    capabilities: Capabilities,
  ) -> Result<Capabilities, RuleError>;

  fn apply_file_rules(
    &self,
    variant: &NameOnlyVariant,
    artifacts: Vec<Artifact>,
    component: &ModuleIdentity,
  ) -> Result<Vec<Artifact>, RuleError>;

  /// Additional variants, in declaration order.
  fn additional_variants(&self) -> &[AdditionalVariant] {
    &[]
  }
}

/// Rules that change nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRules;

impl VariantMetadataRules for NoRules {
  fn apply_attribute_rules(&self, _variant: &NameOnlyVariant, attributes: Attributes) -> Result<Attributes, RuleError> {
    Ok(attributes)
  }

  fn apply_capability_rules(
    &self,
    _variant: &NameOnlyVariant,
    capabilities: Capabilities,
  ) -> Result<Capabilities, RuleError> {
    Ok(capabilities)
  }

  fn apply_file_rules(
    &self,
    _variant: &NameOnlyVariant,
    artifacts: Vec<Artifact>,
    _component: &ModuleIdentity,
  ) -> Result<Vec<Artifact>, RuleError> {
    Ok(artifacts)
  }
}
