//! Rule application for configurations and variants.
//!
//! Every configuration and variant, whether declared, derived or added by
//! rules, goes through [`apply_rules`]: the attribute, capability and file
//! hooks are each invoked once, keyed by name only.

use std::collections::BTreeSet;

use tracing::trace;

use super::types::{ComponentVariant, RealiseError, RealisedConfiguration};
use crate::component::{Artifact, Attributes, Capabilities, ModuleIdentity};
use crate::consts::ARTIFACT_CONFIGURATIONS;
use crate::manifest::{
  ConfigurationDefinition, DerivedCandidate, LazyModuleMetadata, ManifestError, VariantDefinition, construct_hierarchy,
};
use crate::rules::{NameOnlyVariant, RuleError, VariantMetadataRules};
use crate::scope::{BoundDependency, artifacts_for_configuration, filter_dependencies};

/// The inputs of a configuration before rules run.
#[derive(Debug, Clone)]
pub struct RawConfiguration {
  pub name: String,
  pub transitive: bool,
  pub visible: bool,
  pub hierarchy: BTreeSet<String>,
  pub attributes: Attributes,
  pub capabilities: Capabilities,
  /// Already filtered and bound.
  pub dependencies: Vec<BoundDependency>,
  pub artifacts: Vec<Artifact>,
}

/// Run the three rule hooks for `raw.name` and assemble the result.
pub fn apply_rules(
  component: &ModuleIdentity,
  rules: &dyn VariantMetadataRules,
  raw: RawConfiguration,
) -> Result<RealisedConfiguration, RuleError> {
  let variant = NameOnlyVariant::new(raw.name.clone());
  let attributes = rules.apply_attribute_rules(&variant, raw.attributes)?;
  let capabilities = rules.apply_capability_rules(&variant, raw.capabilities)?;
  let artifacts = rules.apply_file_rules(&variant, raw.artifacts, component)?;

  trace!(name = %raw.name, artifacts = artifacts.len(), "applied rules");

  Ok(RealisedConfiguration {
    component: component.clone(),
    name: raw.name,
    transitive: raw.transitive,
    visible: raw.visible,
    hierarchy: raw.hierarchy,
    artifacts,
    dependencies: raw.dependencies,
    attributes,
    capabilities,
  })
}

/// Artifacts a declared configuration starts with, before file rules.
fn configuration_artifacts(metadata: &LazyModuleMetadata, definition: &ConfigurationDefinition) -> Vec<Artifact> {
  if ARTIFACT_CONFIGURATIONS.contains(&definition.name.as_str()) {
    return artifacts_for_configuration(metadata.id(), &definition.name, metadata.packaging());
  }
  definition
    .artifacts
    .iter()
    .map(|name| Artifact::new(metadata.id().clone(), name.clone()))
    .collect()
}

/// Realise one declared configuration of `metadata`.
pub fn realise_configuration(
  metadata: &LazyModuleMetadata,
  definition: &ConfigurationDefinition,
) -> Result<RealisedConfiguration, RealiseError> {
  let id = metadata.id();
  let hierarchy = construct_hierarchy(definition, metadata.configuration_definitions())?;
  let dependencies = filter_dependencies(id, &definition.name, &hierarchy, metadata.dependencies());
  let artifacts = configuration_artifacts(metadata, definition);

  let raw = RawConfiguration {
    name: definition.name.clone(),
    transitive: definition.transitive,
    visible: definition.visible,
    hierarchy,
    attributes: metadata.attributes().clone(),
    capabilities: Capabilities::empty(),
    dependencies,
    artifacts,
  };
  Ok(apply_rules(id, metadata.rules(), raw)?)
}

/// Realise a variant proposed by the derivation strategy.
///
/// The candidate takes dependencies, hierarchy and flags from its source
/// configuration; rules are keyed by the candidate's own name.
pub fn realise_candidate(
  metadata: &LazyModuleMetadata,
  candidate: &DerivedCandidate,
) -> Result<RealisedConfiguration, RealiseError> {
  let id = metadata.id();
  let definition =
    metadata
      .configuration_definition(&candidate.configuration)
      .ok_or_else(|| ManifestError::UnknownConfiguration {
        variant: candidate.name.clone(),
        configuration: candidate.configuration.clone(),
      })?;

  let hierarchy = construct_hierarchy(definition, metadata.configuration_definitions())?;
  let mut dependencies = filter_dependencies(id, &definition.name, &hierarchy, metadata.dependencies());
  if candidate.forced_constraints {
    dependencies = dependencies.iter().map(BoundDependency::as_forced_constraint).collect();
  } else if candidate.dependencies_as_constraints {
    dependencies = dependencies.iter().map(BoundDependency::as_constraint).collect();
  }
  let artifacts = if candidate.with_artifacts {
    configuration_artifacts(metadata, definition)
  } else {
    Vec::new()
  };

  let raw = RawConfiguration {
    name: candidate.name.clone(),
    transitive: definition.transitive,
    visible: definition.visible,
    hierarchy,
    attributes: metadata.attributes().clone().merged(&candidate.attributes),
    capabilities: candidate.capabilities.clone(),
    dependencies,
    artifacts,
  };
  Ok(apply_rules(id, metadata.rules(), raw)?)
}

/// Realise a variant explicitly published with the module.
pub fn realise_variant(
  metadata: &LazyModuleMetadata,
  definition: &VariantDefinition,
) -> Result<ComponentVariant, RealiseError> {
  let id = metadata.id();
  let rules = metadata.rules();
  let variant = NameOnlyVariant::new(definition.name.clone());

  let attributes = rules.apply_attribute_rules(&variant, metadata.attributes().clone().merged(&definition.attributes))?;
  let capabilities = rules.apply_capability_rules(&variant, definition.capabilities.clone())?;
  let declared_artifacts = definition
    .artifacts
    .iter()
    .map(|name| Artifact::new(id.clone(), name.clone()))
    .collect();
  let artifacts = rules.apply_file_rules(&variant, declared_artifacts, id)?;
  let dependencies = definition
    .dependencies
    .iter()
    .map(|d| BoundDependency::declared(&definition.name, id, d.selector.clone(), d.exclusions.clone()))
    .collect();

  Ok(ComponentVariant {
    name: definition.name.clone(),
    attributes,
    capabilities,
    dependencies,
    artifacts,
  })
}
