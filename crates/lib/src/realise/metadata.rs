//! Realised module metadata.
//!
//! [`RealisedMetadata`] is the terminal, immutable form of a module's
//! metadata: every configuration and variant has had its rules applied
//! exactly once, and nothing holds a reference back to the rule engine.
//!
//! The realised content lives behind an [`Arc`], so clones and
//! [`RealisedMetadata::with_source`] are cheap and never recompute anything.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::configuration::{realise_configuration, realise_variant};
use super::derive::derive_variants;
use super::types::{ComponentVariant, RealiseError, RealisedConfiguration};
use crate::component::{Attributes, ModuleIdentity, ModuleSource};
use crate::manifest::LazyModuleMetadata;
use crate::scope::{DependencyDescriptor, is_known_jar_packaging, is_pom_packaging};
use crate::util::hash::Hashable;

#[derive(Debug, Serialize)]
struct RealisedContent {
  id: ModuleIdentity,
  attributes: Attributes,
  status: String,
  variants: Vec<ComponentVariant>,
  derived_variants: Vec<RealisedConfiguration>,
  /// In declaration order.
  configurations: Vec<RealisedConfiguration>,
  dependencies: Vec<DependencyDescriptor>,
  packaging: String,
  relocated: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  snapshot_timestamp: Option<String>,
}

/// Module metadata with every rule applied.
#[derive(Debug, Clone, Serialize)]
pub struct RealisedMetadata {
  source: ModuleSource,
  #[serde(flatten)]
  content: Arc<RealisedContent>,
}

impl RealisedMetadata {
  /// Realise `metadata`.
  ///
  /// Explicit variants and every declared configuration are realised; if the
  /// module declares no variants, variants are derived as well.
  ///
  /// # Errors
  ///
  /// Fails on the first rule error, unknown base variant or hierarchy error.
  /// No partial result is produced.
  pub fn transform(metadata: &LazyModuleMetadata) -> Result<Self, RealiseError> {
    let variants = metadata
      .variants()
      .iter()
      .map(|variant| realise_variant(metadata, variant))
      .collect::<Result<Vec<_>, _>>()?;

    let derived_variants = if variants.is_empty() {
      derive_variants(metadata)?
    } else {
      Vec::new()
    };

    let configurations = metadata
      .declared_configurations()
      .map(|definition| realise_configuration(metadata, definition))
      .collect::<Result<Vec<_>, _>>()?;

    debug!(
      module = %metadata.id(),
      variants = variants.len(),
      derived_variants = derived_variants.len(),
      configurations = configurations.len(),
      "realised module metadata"
    );

    Ok(Self {
      source: metadata.source().clone(),
      content: Arc::new(RealisedContent {
        id: metadata.id().clone(),
        attributes: metadata.attributes().clone(),
        status: metadata.status().to_string(),
        variants,
        derived_variants,
        configurations,
        dependencies: metadata.dependencies().to_vec(),
        packaging: metadata.packaging().to_string(),
        relocated: metadata.is_relocated(),
        snapshot_timestamp: metadata.snapshot_timestamp().map(str::to_string),
      }),
    })
  }

  /// The same realised metadata, attributed to `source`.
  pub fn with_source(&self, source: ModuleSource) -> Self {
    Self {
      source,
      content: Arc::clone(&self.content),
    }
  }

  pub fn id(&self) -> &ModuleIdentity {
    &self.content.id
  }

  pub fn source(&self) -> &ModuleSource {
    &self.source
  }

  pub fn attributes(&self) -> &Attributes {
    &self.content.attributes
  }

  pub fn status(&self) -> &str {
    &self.content.status
  }

  /// Explicitly published variants.
  pub fn variants(&self) -> &[ComponentVariant] {
    &self.content.variants
  }

  /// Variants derived from configurations; empty if explicit variants exist.
  pub fn derived_variants(&self) -> &[RealisedConfiguration] {
    &self.content.derived_variants
  }

  /// The stored derived variants. Unlike the lazy form this never recomputes.
  pub fn maybe_derive_variants(&self) -> Option<&[RealisedConfiguration]> {
    Some(self.derived_variants())
  }

  pub fn configuration(&self, name: &str) -> Option<&RealisedConfiguration> {
    self.content.configurations.iter().find(|c| c.name == name)
  }

  /// Realised configurations in declaration order.
  pub fn configurations(&self) -> &[RealisedConfiguration] {
    &self.content.configurations
  }

  pub fn configuration_names(&self) -> impl Iterator<Item = &str> {
    self.content.configurations.iter().map(|c| c.name.as_str())
  }

  /// Dependencies as declared, before any configuration filtering.
  pub fn dependencies(&self) -> &[DependencyDescriptor] {
    &self.content.dependencies
  }

  pub fn packaging(&self) -> &str {
    &self.content.packaging
  }

  pub fn is_relocated(&self) -> bool {
    self.content.relocated
  }

  pub fn snapshot_timestamp(&self) -> Option<&str> {
    self.content.snapshot_timestamp.as_deref()
  }

  pub fn is_pom_packaging(&self) -> bool {
    is_pom_packaging(&self.content.packaging)
  }

  pub fn is_known_jar_packaging(&self) -> bool {
    is_known_jar_packaging(&self.content.packaging)
  }

  /// Whether `self` and `other` share the same realised content.
  pub fn shares_content_with(&self, other: &RealisedMetadata) -> bool {
    Arc::ptr_eq(&self.content, &other.content)
  }

  fn base_eq(&self, other: &Self) -> bool {
    let (a, b) = (&self.content, &other.content);
    self.source == other.source
      && a.id == b.id
      && a.attributes == b.attributes
      && a.status == b.status
      && a.variants == b.variants
      && a.configurations == b.configurations
  }
}

impl Hashable for RealisedMetadata {}

impl PartialEq for RealisedMetadata {
  fn eq(&self, other: &Self) -> bool {
    if !self.base_eq(other) {
      return false;
    }
    let (a, b) = (&self.content, &other.content);
    a.relocated == b.relocated
      && a.dependencies == b.dependencies
      && a.packaging == b.packaging
      && a.snapshot_timestamp == b.snapshot_timestamp
  }
}

impl Eq for RealisedMetadata {}

impl Hash for RealisedMetadata {
  fn hash<H: Hasher>(&self, state: &mut H) {
    let content = &self.content;
    self.source.hash(state);
    content.id.hash(state);
    content.attributes.hash(state);
    content.status.hash(state);
    content.variants.hash(state);
    content.configurations.hash(state);
    content.dependencies.hash(state);
    content.packaging.hash(state);
    content.relocated.hash(state);
    content.snapshot_timestamp.hash(state);
  }
}
