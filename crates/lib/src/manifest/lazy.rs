//! Lazy module metadata.
//!
//! [`LazyModuleMetadata`] is what the manifest parser produces: declared
//! configurations, dependencies and variants with the rules that customise
//! them, but with no rule applied yet. Every query that needs rule output
//! recomputes it, so two calls to [`LazyModuleMetadata::configuration`]
//! return equal but independently built values.
//!
//! The only way forward is [`RealisedMetadata::transform`], which applies all
//! rules once and produces an immutable value. There is no way back.
//!
//! [`RealisedMetadata::transform`]: crate::realise::RealisedMetadata::transform

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::derivation::{JavaEcosystem, VariantDerivationStrategy};
use super::hierarchy::ManifestError;
use super::types::{ConfigurationDefinition, VariantDefinition, standard_maven_configurations};
use crate::component::{Attributes, ModuleIdentity, ModuleSource};
use crate::consts::{DEFAULT_PACKAGING, DEFAULT_STATUS};
use crate::realise::{RealiseError, RealisedConfiguration, configuration};
use crate::rules::{NoRules, VariantMetadataRules};
use crate::scope::{DependencyDescriptor, is_known_jar_packaging, is_pom_packaging};

/// Module metadata with rules not yet applied.
#[derive(Clone)]
pub struct LazyModuleMetadata {
  id: ModuleIdentity,
  source: ModuleSource,
  attributes: Attributes,
  status: String,
  packaging: String,
  relocated: bool,
  snapshot_timestamp: Option<String>,
  dependencies: Vec<DependencyDescriptor>,
  /// Lookup by name.
  configurations: BTreeMap<String, ConfigurationDefinition>,
  /// Configuration names in declaration order.
  configuration_order: Vec<String>,
  variants: Vec<VariantDefinition>,
  rules: Arc<dyn VariantMetadataRules>,
  derivation: Arc<dyn VariantDerivationStrategy>,
}

impl fmt::Debug for LazyModuleMetadata {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LazyModuleMetadata")
      .field("id", &self.id)
      .field("source", &self.source)
      .field("packaging", &self.packaging)
      .field("configurations", &self.configuration_order)
      .field("dependencies", &self.dependencies.len())
      .field("variants", &self.variants.len())
      .finish_non_exhaustive()
  }
}

impl LazyModuleMetadata {
  pub fn builder(id: ModuleIdentity) -> LazyModuleMetadataBuilder {
    LazyModuleMetadataBuilder::new(id)
  }

  pub fn id(&self) -> &ModuleIdentity {
    &self.id
  }

  pub fn source(&self) -> &ModuleSource {
    &self.source
  }

  pub fn attributes(&self) -> &Attributes {
    &self.attributes
  }

  pub fn status(&self) -> &str {
    &self.status
  }

  pub fn packaging(&self) -> &str {
    &self.packaging
  }

  pub fn is_relocated(&self) -> bool {
    self.relocated
  }

  pub fn snapshot_timestamp(&self) -> Option<&str> {
    self.snapshot_timestamp.as_deref()
  }

  pub fn dependencies(&self) -> &[DependencyDescriptor] {
    &self.dependencies
  }

  pub fn variants(&self) -> &[VariantDefinition] {
    &self.variants
  }

  pub fn rules(&self) -> &dyn VariantMetadataRules {
    self.rules.as_ref()
  }

  pub fn is_pom_packaging(&self) -> bool {
    is_pom_packaging(&self.packaging)
  }

  pub fn is_known_jar_packaging(&self) -> bool {
    is_known_jar_packaging(&self.packaging)
  }

  /// Configuration names in declaration order.
  pub fn configuration_names(&self) -> impl Iterator<Item = &str> {
    self.configuration_order.iter().map(String::as_str)
  }

  /// Configuration definitions in declaration order.
  pub fn declared_configurations(&self) -> impl Iterator<Item = &ConfigurationDefinition> {
    self.configuration_order.iter().filter_map(|name| self.configurations.get(name))
  }

  /// Configuration definitions keyed by name.
  pub fn configuration_definitions(&self) -> &BTreeMap<String, ConfigurationDefinition> {
    &self.configurations
  }

  pub fn configuration_definition(&self, name: &str) -> Option<&ConfigurationDefinition> {
    self.configurations.get(name)
  }

  /// Realise configuration `name` on demand.
  ///
  /// Rules are applied on every call.
  pub fn configuration(&self, name: &str) -> Result<Option<RealisedConfiguration>, RealiseError> {
    match self.configurations.get(name) {
      Some(definition) => configuration::realise_configuration(self, definition).map(Some),
      None => Ok(None),
    }
  }

  /// Variants proposed by the derivation strategy, with rules applied.
  ///
  /// Returns `None` when the strategy never derives variants.
  pub fn maybe_derive_variants(&self) -> Result<Option<Vec<RealisedConfiguration>>, RealiseError> {
    if !self.derivation.derives_variants() {
      return Ok(None);
    }
    let derived = self
      .derivation
      .derive(self)
      .iter()
      .map(|candidate| configuration::realise_candidate(self, candidate))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(derived))
  }
}

/// Builder for [`LazyModuleMetadata`].
///
/// Unless [`configurations`](Self::configurations) is called, the module gets
/// the standard Maven configurations.
pub struct LazyModuleMetadataBuilder {
  id: ModuleIdentity,
  source: ModuleSource,
  attributes: Attributes,
  status: String,
  packaging: String,
  relocated: bool,
  snapshot_timestamp: Option<String>,
  dependencies: Vec<DependencyDescriptor>,
  configurations: Option<Vec<ConfigurationDefinition>>,
  variants: Vec<VariantDefinition>,
  rules: Arc<dyn VariantMetadataRules>,
  derivation: Arc<dyn VariantDerivationStrategy>,
}

impl LazyModuleMetadataBuilder {
  pub fn new(id: ModuleIdentity) -> Self {
    Self {
      id,
      source: ModuleSource::default(),
      attributes: Attributes::empty(),
      status: DEFAULT_STATUS.to_string(),
      packaging: DEFAULT_PACKAGING.to_string(),
      relocated: false,
      snapshot_timestamp: None,
      dependencies: Vec::new(),
      configurations: None,
      variants: Vec::new(),
      rules: Arc::new(NoRules),
      derivation: Arc::new(JavaEcosystem),
    }
  }

  pub fn source(mut self, source: ModuleSource) -> Self {
    self.source = source;
    self
  }

  pub fn attributes(mut self, attributes: Attributes) -> Self {
    self.attributes = attributes;
    self
  }

  pub fn status(mut self, status: impl Into<String>) -> Self {
    self.status = status.into();
    self
  }

  pub fn packaging(mut self, packaging: impl Into<String>) -> Self {
    self.packaging = packaging.into();
    self
  }

  pub fn relocated(mut self, relocated: bool) -> Self {
    self.relocated = relocated;
    self
  }

  pub fn snapshot_timestamp(mut self, timestamp: impl Into<String>) -> Self {
    self.snapshot_timestamp = Some(timestamp.into());
    self
  }

  pub fn dependency(mut self, dependency: DependencyDescriptor) -> Self {
    self.dependencies.push(dependency);
    self
  }

  pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = DependencyDescriptor>) -> Self {
    self.dependencies.extend(dependencies);
    self
  }

  /// Replace the standard Maven configurations with `configurations`.
  pub fn configurations(mut self, configurations: impl IntoIterator<Item = ConfigurationDefinition>) -> Self {
    self.configurations = Some(configurations.into_iter().collect());
    self
  }

  pub fn variant(mut self, variant: VariantDefinition) -> Self {
    self.variants.push(variant);
    self
  }

  pub fn rules(mut self, rules: Arc<dyn VariantMetadataRules>) -> Self {
    self.rules = rules;
    self
  }

  pub fn derivation(mut self, derivation: Arc<dyn VariantDerivationStrategy>) -> Self {
    self.derivation = derivation;
    self
  }

  /// Finish the metadata.
  ///
  /// # Errors
  ///
  /// Returns [`ManifestError::DuplicateConfiguration`] if two configuration
  /// definitions share a name.
  pub fn build(self) -> Result<LazyModuleMetadata, ManifestError> {
    let definitions = self.configurations.unwrap_or_else(standard_maven_configurations);
    let mut configurations = BTreeMap::new();
    let mut configuration_order = Vec::with_capacity(definitions.len());
    for definition in definitions {
      if configurations.contains_key(&definition.name) {
        return Err(ManifestError::DuplicateConfiguration {
          configuration: definition.name,
        });
      }
      configuration_order.push(definition.name.clone());
      configurations.insert(definition.name.clone(), definition);
    }

    Ok(LazyModuleMetadata {
      id: self.id,
      source: self.source,
      attributes: self.attributes,
      status: self.status,
      packaging: self.packaging,
      relocated: self.relocated,
      snapshot_timestamp: self.snapshot_timestamp,
      dependencies: self.dependencies,
      configurations,
      configuration_order,
      variants: self.variants,
      rules: self.rules,
      derivation: self.derivation,
    })
  }
}
