//! Scope-based dependency inclusion and main-artifact synthesis.
//!
//! # Inclusion rule
//!
//! For a dependency `D` and a configuration `C`:
//! - optional `D`: included only in the `optional` configuration, and only if
//!   its scope is neither `test` nor `system`. Hierarchy membership is ignored.
//! - non-optional `D`: included iff `C`'s hierarchy contains the lower-case
//!   name of `D`'s scope.

use std::collections::BTreeSet;

use tracing::trace;

use super::types::{BoundDependency, DependencyDescriptor, MavenScope};
use crate::component::{Artifact, ArtifactName, ModuleIdentity};
use crate::consts::{ARTIFACT_CONFIGURATIONS, JAR_PACKAGINGS, OPTIONAL_CONFIGURATION, POM_PACKAGING};

/// Whether `dependency` belongs in the dedicated `optional` configuration.
pub fn include_in_optional_configuration(dependency: &DependencyDescriptor) -> bool {
  dependency.optional && dependency.scope != MavenScope::Test && dependency.scope != MavenScope::System
}

/// Whether a configuration with the given hierarchy pulls in `dependency`
/// through its scope.
pub fn include(dependency: &DependencyDescriptor, hierarchy: &BTreeSet<String>) -> bool {
  if dependency.optional {
    return false;
  }
  hierarchy.contains(dependency.scope.lower_name())
}

/// Whether `dependency` is part of configuration `name`.
pub fn is_included(dependency: &DependencyDescriptor, name: &str, hierarchy: &BTreeSet<String>) -> bool {
  if name == OPTIONAL_CONFIGURATION && include_in_optional_configuration(dependency) {
    return true;
  }
  include(dependency, hierarchy)
}

/// Select the dependencies configuration `name` pulls in, bound to it.
///
/// Declaration order is preserved.
pub fn filter_dependencies(
  component: &ModuleIdentity,
  name: &str,
  hierarchy: &BTreeSet<String>,
  dependencies: &[DependencyDescriptor],
) -> Vec<BoundDependency> {
  let is_optional_configuration = name == OPTIONAL_CONFIGURATION;

  let filtered: Vec<BoundDependency> = dependencies
    .iter()
    .filter_map(|dependency| {
      if is_optional_configuration && include_in_optional_configuration(dependency) {
        Some(BoundDependency::optional(name, component, dependency))
      } else if include(dependency, hierarchy) {
        Some(BoundDependency::contextualize(name, component, dependency))
      } else {
        None
      }
    })
    .collect();

  trace!(
    configuration = name,
    declared = dependencies.len(),
    included = filtered.len(),
    "filtered dependencies"
  );
  filtered
}

pub fn is_known_jar_packaging(packaging: &str) -> bool {
  JAR_PACKAGINGS.contains(&packaging)
}

pub fn is_pom_packaging(packaging: &str) -> bool {
  packaging == POM_PACKAGING
}

/// The artifacts configuration `name` exposes for a module with `packaging`.
///
/// Only the main configurations expose the module's single artifact; every
/// other configuration exposes nothing.
pub fn artifacts_for_configuration(component: &ModuleIdentity, name: &str, packaging: &str) -> Vec<Artifact> {
  if !ARTIFACT_CONFIGURATIONS.contains(&name) {
    return Vec::new();
  }
  let kind = if is_known_jar_packaging(packaging) { "jar" } else { packaging };
  vec![Artifact::new(
    component.clone(),
    ArtifactName::new(component.module.clone(), kind, kind),
  )]
}
