//! Data-driven variant metadata rules.
//!
//! A rules document is a list of per-variant rules plus additional variant
//! declarations:
//!
//! ```json
//! {
//!   "variants": [
//!     { "variant": "runtime", "attributes": { "jvm": 17 } },
//!     { "variant": "*", "add_capabilities": [{ "group": "org.example", "name": "logging" }] },
//!     { "variant": "fat", "remove_all_files": true,
//!       "add_files": [{ "name": "lib", "extension": "jar", "classifier": "all" }] }
//!   ],
//!   "additional_variants": [{ "name": "fat", "base": "runtime" }]
//! }
//! ```
//!
//! Rules apply in document order. A rule whose `variant` is `"*"` applies to
//! every configuration and variant.

use serde::{Deserialize, Deserializer, Serialize};

use super::{AdditionalVariant, NameOnlyVariant, RuleError, VariantMetadataRules};
use crate::component::{Artifact, ArtifactName, Attributes, Capabilities, Capability, ModuleIdentity};

const ALL_VARIANTS: &str = "*";

/// A file added to a variant by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRule {
  pub name: String,
  pub extension: String,
  /// Artifact type; defaults to the extension.
  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub classifier: Option<String>,
}

impl FileRule {
  fn artifact_name(&self) -> ArtifactName {
    let kind = self.kind.clone().unwrap_or_else(|| self.extension.clone());
    let name = ArtifactName::new(self.name.clone(), kind, self.extension.clone());
    match &self.classifier {
      Some(classifier) => name.with_classifier(classifier.clone()),
      None => name,
    }
  }
}

/// Coordinates of a capability to remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityRef {
  pub group: String,
  pub name: String,
}

/// Customisations for one variant name (or `"*"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRule {
  pub variant: String,
  #[serde(default, skip_serializing_if = "Attributes::is_empty")]
  pub attributes: Attributes,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub add_capabilities: Vec<Capability>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub remove_capabilities: Vec<CapabilityRef>,
  #[serde(default)]
  pub remove_all_files: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub add_files: Vec<FileRule>,
}

impl VariantRule {
  pub fn for_variant(variant: impl Into<String>) -> Self {
    Self {
      variant: variant.into(),
      attributes: Attributes::empty(),
      add_capabilities: Vec::new(),
      remove_capabilities: Vec::new(),
      remove_all_files: false,
      add_files: Vec::new(),
    }
  }

  pub fn with_attributes(mut self, attributes: Attributes) -> Self {
    self.attributes = attributes;
    self
  }

  pub fn add_capability(mut self, capability: Capability) -> Self {
    self.add_capabilities.push(capability);
    self
  }

  pub fn remove_capability(mut self, group: impl Into<String>, name: impl Into<String>) -> Self {
    self.remove_capabilities.push(CapabilityRef {
      group: group.into(),
      name: name.into(),
    });
    self
  }

  pub fn remove_all_files(mut self) -> Self {
    self.remove_all_files = true;
    self
  }

  pub fn add_file(mut self, file: FileRule) -> Self {
    self.add_files.push(file);
    self
  }

  fn applies_to(&self, variant: &NameOnlyVariant) -> bool {
    self.variant == ALL_VARIANTS || self.variant == variant.name()
  }
}

/// Rules loaded from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarativeRules {
  #[serde(default)]
  pub variants: Vec<VariantRule>,
  /// Unique by name.
  #[serde(default, deserialize_with = "unique_additional_variants")]
  pub additional_variants: Vec<AdditionalVariant>,
}

fn unique_additional_variants<'de, D>(deserializer: D) -> Result<Vec<AdditionalVariant>, D::Error>
where
  D: Deserializer<'de>,
{
  let variants = Vec::<AdditionalVariant>::deserialize(deserializer)?;
  for (index, variant) in variants.iter().enumerate() {
    if variants[..index].iter().any(|earlier| earlier.name == variant.name) {
      return Err(serde::de::Error::custom(format!(
        "additional variant '{}' is declared more than once",
        variant.name
      )));
    }
  }
  Ok(variants)
}

impl DeclarativeRules {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }

  pub fn with_rule(mut self, rule: VariantRule) -> Self {
    self.variants.push(rule);
    self
  }

  /// Add `variant`, replacing any earlier one of the same name in place.
  pub fn with_additional_variant(mut self, variant: AdditionalVariant) -> Self {
    match self.additional_variants.iter_mut().find(|v| v.name == variant.name) {
      Some(existing) => *existing = variant,
      None => self.additional_variants.push(variant),
    }
    self
  }

  fn matching<'a>(&'a self, variant: &'a NameOnlyVariant) -> impl Iterator<Item = &'a VariantRule> {
    self.variants.iter().filter(move |rule| rule.applies_to(variant))
  }
}

impl VariantMetadataRules for DeclarativeRules {
  fn apply_attribute_rules(&self, variant: &NameOnlyVariant, attributes: Attributes) -> Result<Attributes, RuleError> {
    Ok(
      self
        .matching(variant)
        .fold(attributes, |acc, rule| acc.merged(&rule.attributes)),
    )
  }

  fn apply_capability_rules(
    &self,
    variant: &NameOnlyVariant,
    capabilities: Capabilities,
  ) -> Result<Capabilities, RuleError> {
    let mut result = capabilities;
    for rule in self.matching(variant) {
      for removed in &rule.remove_capabilities {
        result = result.without(&removed.group, &removed.name);
      }
      for added in &rule.add_capabilities {
        if added.group.is_empty() || added.name.is_empty() {
          return Err(RuleError::InvalidCapability {
            variant: variant.name().to_string(),
            reason: format!("capability '{}' needs both a group and a name", added),
          });
        }
        result = result.with(added.clone());
      }
    }
    Ok(result)
  }

  fn apply_file_rules(
    &self,
    variant: &NameOnlyVariant,
    artifacts: Vec<Artifact>,
    component: &ModuleIdentity,
  ) -> Result<Vec<Artifact>, RuleError> {
    let mut result = artifacts;
    for rule in self.matching(variant) {
      if rule.remove_all_files {
        result.clear();
      }
      for file in &rule.add_files {
        let artifact = Artifact::new(component.clone(), file.artifact_name());
        if result.contains(&artifact) {
          return Err(RuleError::DuplicateFile {
            variant: variant.name().to_string(),
            file: artifact.file_name(),
          });
        }
        result.push(artifact);
      }
    }
    Ok(result)
  }

  fn additional_variants(&self) -> &[AdditionalVariant] {
    &self.additional_variants
  }
}
