use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::{Exclusion, ModuleIdentity, ModuleSelector};

/// A Maven dependency scope.
///
/// Optionality is not a scope: it is carried separately on
/// [`DependencyDescriptor::optional`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MavenScope {
  #[default]
  Compile,
  Runtime,
  Test,
  Provided,
  System,
}

impl MavenScope {
  pub const ALL: [MavenScope; 5] = [
    MavenScope::Compile,
    MavenScope::Runtime,
    MavenScope::Test,
    MavenScope::Provided,
    MavenScope::System,
  ];

  /// The lower-case name, which is also the name of the configuration that
  /// owns dependencies of this scope.
  pub fn lower_name(self) -> &'static str {
    match self {
      MavenScope::Compile => "compile",
      MavenScope::Runtime => "runtime",
      MavenScope::Test => "test",
      MavenScope::Provided => "provided",
      MavenScope::System => "system",
    }
  }
}

impl fmt::Display for MavenScope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.lower_name())
  }
}

/// A dependency as declared in the module descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyDescriptor {
  #[serde(flatten)]
  pub selector: ModuleSelector,
  #[serde(default)]
  pub scope: MavenScope,
  #[serde(default)]
  pub optional: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclusions: Vec<Exclusion>,
}

impl DependencyDescriptor {
  pub fn new(selector: ModuleSelector, scope: MavenScope) -> Self {
    Self {
      selector,
      scope,
      optional: false,
      exclusions: Vec::new(),
    }
  }

  pub fn optional(mut self) -> Self {
    self.optional = true;
    self
  }

  pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
    self.exclusions.push(exclusion);
    self
  }
}

/// A dependency bound to the configuration or variant that pulls it in.
///
/// Bound dependencies always take part in attribute matching, whether they
/// came from a scope-based configuration or were declared on a variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundDependency {
  /// Name of the owning configuration or variant.
  pub owner: String,
  /// The module that declares the dependency.
  pub component: ModuleIdentity,
  pub selector: ModuleSelector,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclusions: Vec<Exclusion>,
  /// Declared scope; `None` for dependencies declared directly on a variant.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub scope: Option<MavenScope>,
  /// Pulled in through the `optional` configuration.
  #[serde(default)]
  pub via_optional: bool,
  /// Only constrains the version if something else brings the module in.
  #[serde(default)]
  pub constraint: bool,
  /// A constraint that overrides any other version of the module in the
  /// graph, as published by enforced platforms.
  #[serde(default)]
  pub forced: bool,
  pub attribute_matching: bool,
}

impl BoundDependency {
  /// Bind a scoped descriptor to the configuration `owner` of `component`.
  pub fn contextualize(owner: &str, component: &ModuleIdentity, descriptor: &DependencyDescriptor) -> Self {
    Self {
      owner: owner.to_string(),
      component: component.clone(),
      selector: descriptor.selector.clone(),
      exclusions: descriptor.exclusions.clone(),
      scope: Some(descriptor.scope),
      via_optional: false,
      constraint: false,
      forced: false,
      attribute_matching: true,
    }
  }

  /// Bind an optional descriptor to the `optional` configuration.
  pub fn optional(owner: &str, component: &ModuleIdentity, descriptor: &DependencyDescriptor) -> Self {
    Self {
      via_optional: true,
      ..Self::contextualize(owner, component, descriptor)
    }
  }

  /// Bind a dependency declared directly on a variant.
  pub fn declared(owner: &str, component: &ModuleIdentity, selector: ModuleSelector, exclusions: Vec<Exclusion>) -> Self {
    Self {
      owner: owner.to_string(),
      component: component.clone(),
      selector,
      exclusions,
      scope: None,
      via_optional: false,
      constraint: false,
      forced: false,
      attribute_matching: true,
    }
  }

  /// The same dependency, demoted to a version constraint.
  pub fn as_constraint(&self) -> Self {
    Self {
      constraint: true,
      ..self.clone()
    }
  }

  /// The same dependency, demoted to a constraint whose version wins over
  /// every other candidate.
  pub fn as_forced_constraint(&self) -> Self {
    Self {
      constraint: true,
      forced: true,
      ..self.clone()
    }
  }
}

impl fmt::Display for BoundDependency {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.selector)?;
    if let Some(scope) = self.scope {
      write!(f, " ({})", scope)?;
    }
    if self.via_optional {
      write!(f, " [optional]")?;
    }
    if self.constraint {
      write!(f, " [constraint]")?;
    }
    if self.forced {
      write!(f, " [forced]")?;
    }
    Ok(())
  }
}
