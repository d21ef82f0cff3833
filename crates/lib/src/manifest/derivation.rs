//! Variant derivation strategies.
//!
//! Modules published before variant-aware resolution only describe
//! configurations. A derivation strategy proposes which configurations to
//! expose as variants, and with which attributes and capabilities.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::lazy::LazyModuleMetadata;
use crate::component::{Attributes, Capabilities, Capability};
use crate::scope::is_known_jar_packaging;

pub const USAGE_ATTRIBUTE: &str = "usage";
pub const CATEGORY_ATTRIBUTE: &str = "category";
pub const LIBRARY_ELEMENTS_ATTRIBUTE: &str = "library-elements";

pub const JAVA_API: &str = "java-api";
pub const JAVA_RUNTIME: &str = "java-runtime";
pub const LIBRARY: &str = "library";
pub const PLATFORM: &str = "platform";
pub const ENFORCED_PLATFORM: &str = "enforced-platform";

/// A configuration-shaped variant proposed by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedCandidate {
  /// Name of the variant; rules are keyed by it.
  pub name: String,
  /// Configuration whose dependencies, hierarchy and flags the variant takes.
  pub configuration: String,
  /// Attributes layered over the module attributes.
  pub attributes: Attributes,
  pub capabilities: Capabilities,
  /// Whether the variant exposes the configuration's artifacts.
  pub with_artifacts: bool,
  /// Whether dependencies become version constraints.
  pub dependencies_as_constraints: bool,
  /// Whether those constraints are forced over competing versions.
  pub forced_constraints: bool,
}

/// Proposes variants for modules that declare none.
pub trait VariantDerivationStrategy: Send + Sync {
  /// `false` if this strategy never proposes anything.
  fn derives_variants(&self) -> bool;

  fn derive(&self, metadata: &LazyModuleMetadata) -> Vec<DerivedCandidate>;
}

/// Never derives variants; configurations stay the only view of the module.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDerivation;

impl VariantDerivationStrategy for NoDerivation {
  fn derives_variants(&self) -> bool {
    false
  }

  fn derive(&self, _metadata: &LazyModuleMetadata) -> Vec<DerivedCandidate> {
    Vec::new()
  }
}

/// Derives Java library and platform variants from `compile` and `runtime`.
///
/// A Maven module may be a library, a platform (BOM), or both, and the
/// descriptor does not say which. Both views are derived: the library
/// variants carry the artifact, the platform variants carry only version
/// constraints and a capability that keeps them apart from the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaEcosystem;

impl JavaEcosystem {
  fn library(name: &str, usage: &str, elements: &str) -> DerivedCandidate {
    DerivedCandidate {
      name: name.to_string(),
      configuration: name.to_string(),
      attributes: Attributes::empty()
        .with(CATEGORY_ATTRIBUTE, LIBRARY)
        .with(USAGE_ATTRIBUTE, usage)
        .with(LIBRARY_ELEMENTS_ATTRIBUTE, elements),
      capabilities: Capabilities::empty(),
      with_artifacts: true,
      dependencies_as_constraints: false,
      forced_constraints: false,
    }
  }

  fn platform(configuration: &str, usage: &str, category: &str, capability: &Capability) -> DerivedCandidate {
    DerivedCandidate {
      name: format!("{}-{}", category, configuration),
      configuration: configuration.to_string(),
      attributes: Attributes::empty()
        .with(CATEGORY_ATTRIBUTE, category)
        .with(USAGE_ATTRIBUTE, usage),
      capabilities: Capabilities::of([capability.clone()]),
      with_artifacts: false,
      dependencies_as_constraints: true,
      forced_constraints: category == ENFORCED_PLATFORM,
    }
  }
}

impl VariantDerivationStrategy for JavaEcosystem {
  fn derives_variants(&self) -> bool {
    true
  }

  fn derive(&self, metadata: &LazyModuleMetadata) -> Vec<DerivedCandidate> {
    let id = metadata.id();
    let elements = if is_known_jar_packaging(metadata.packaging()) {
      "jar"
    } else {
      metadata.packaging()
    };
    let platform = Capability::new(
      id.group.clone(),
      format!("{}-derived-platform", id.module),
      Some(id.version.clone()),
    );
    let enforced = Capability::new(
      id.group.clone(),
      format!("{}-derived-enforced-platform", id.module),
      Some(id.version.clone()),
    );

    let candidates = vec![
      Self::library("compile", JAVA_API, elements),
      Self::library("runtime", JAVA_RUNTIME, elements),
      Self::platform("compile", JAVA_API, PLATFORM, &platform),
      Self::platform("runtime", JAVA_RUNTIME, PLATFORM, &platform),
      Self::platform("compile", JAVA_API, ENFORCED_PLATFORM, &enforced),
      Self::platform("runtime", JAVA_RUNTIME, ENFORCED_PLATFORM, &enforced),
    ];

    candidates
      .into_iter()
      .filter(|c| metadata.configuration_definition(&c.configuration).is_some())
      .collect()
  }
}

/// Strategy selector used by module documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivationKind {
  #[default]
  Java,
  None,
}

impl DerivationKind {
  pub fn strategy(self) -> Arc<dyn VariantDerivationStrategy> {
    match self {
      DerivationKind::Java => Arc::new(JavaEcosystem),
      DerivationKind::None => Arc::new(NoDerivation),
    }
  }
}
