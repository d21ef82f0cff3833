use serde::{Deserialize, Serialize};

use crate::component::{ArtifactName, Attributes, Capabilities, Exclusion, ModuleSelector};

fn default_true() -> bool {
  true
}

/// A configuration as declared by the manifest model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationDefinition {
  pub name: String,
  #[serde(default = "default_true")]
  pub transitive: bool,
  #[serde(default = "default_true")]
  pub visible: bool,
  /// Names of the configurations this one extends.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub extends: Vec<String>,
  /// Artifacts published for this configuration. Ignored for the main
  /// configurations, whose artifact is synthesised from the packaging.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub artifacts: Vec<ArtifactName>,
}

impl ConfigurationDefinition {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      transitive: true,
      visible: true,
      extends: Vec::new(),
      artifacts: Vec::new(),
    }
  }

  pub fn extending<I, S>(mut self, parents: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.extends.extend(parents.into_iter().map(Into::into));
    self
  }

  pub fn with_artifact(mut self, artifact: ArtifactName) -> Self {
    self.artifacts.push(artifact);
    self
  }

  pub fn hidden(mut self) -> Self {
    self.visible = false;
    self
  }

  pub fn non_transitive(mut self) -> Self {
    self.transitive = false;
    self
  }
}

/// The configurations every Maven module exposes.
///
/// `default` extends `runtime` and `master`, `runtime` extends `compile`,
/// and `test` extends `runtime` but is not visible to consumers. `provided`,
/// `system` and the remaining configurations stand alone.
pub fn standard_maven_configurations() -> Vec<ConfigurationDefinition> {
  vec![
    ConfigurationDefinition::new("default").extending(["runtime", "master"]),
    ConfigurationDefinition::new("master"),
    ConfigurationDefinition::new("compile"),
    ConfigurationDefinition::new("provided"),
    ConfigurationDefinition::new("runtime").extending(["compile"]),
    ConfigurationDefinition::new("test").extending(["runtime"]).hidden(),
    ConfigurationDefinition::new("system"),
    ConfigurationDefinition::new("sources"),
    ConfigurationDefinition::new("javadoc"),
    ConfigurationDefinition::new("optional"),
  ]
}

/// A dependency declared directly on a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDependency {
  #[serde(flatten)]
  pub selector: ModuleSelector,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclusions: Vec<Exclusion>,
}

/// A variant explicitly published with the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDefinition {
  pub name: String,
  #[serde(default)]
  pub attributes: Attributes,
  #[serde(default)]
  pub capabilities: Capabilities,
  #[serde(default)]
  pub dependencies: Vec<VariantDependency>,
  #[serde(default)]
  pub artifacts: Vec<ArtifactName>,
}

impl VariantDefinition {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      attributes: Attributes::empty(),
      capabilities: Capabilities::empty(),
      dependencies: Vec::new(),
      artifacts: Vec::new(),
    }
  }

  pub fn with_attributes(mut self, attributes: Attributes) -> Self {
    self.attributes = attributes;
    self
  }

  pub fn with_dependency(mut self, selector: ModuleSelector) -> Self {
    self.dependencies.push(VariantDependency {
      selector,
      exclusions: Vec::new(),
    });
    self
  }

  pub fn with_artifact(mut self, artifact: ArtifactName) -> Self {
    self.artifacts.push(artifact);
    self
  }
}
