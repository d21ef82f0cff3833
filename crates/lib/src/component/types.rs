//! Value types describing a published module and what it exposes.
//!
//! Everything here is plain data: cheap to clone, compared by value, and
//! ordered deterministically so that realised metadata hashes the same way on
//! every run.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a published module (group, module name, version).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleIdentity {
  pub group: String,
  pub module: String,
  pub version: String,
}

impl ModuleIdentity {
  pub fn new(group: impl Into<String>, module: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      group: group.into(),
      module: module.into(),
      version: version.into(),
    }
  }
}

impl fmt::Display for ModuleIdentity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.group, self.module, self.version)
  }
}

/// Provenance of a piece of metadata: which repository it came from and,
/// when known, the checksum of the descriptor it was parsed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleSource {
  pub repository: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub descriptor_sha256: Option<String>,
}

impl ModuleSource {
  pub fn new(repository: impl Into<String>) -> Self {
    Self {
      repository: repository.into(),
      descriptor_sha256: None,
    }
  }

  pub fn with_descriptor_sha256(mut self, sha256: impl Into<String>) -> Self {
    self.descriptor_sha256 = Some(sha256.into());
    self
  }
}

/// The target of a dependency: coordinates plus a version requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleSelector {
  pub group: String,
  pub module: String,
  #[serde(default)]
  pub version: String,
}

impl ModuleSelector {
  pub fn new(group: impl Into<String>, module: impl Into<String>, version: impl Into<String>) -> Self {
    Self {
      group: group.into(),
      module: module.into(),
      version: version.into(),
    }
  }
}

impl fmt::Display for ModuleSelector {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.version.is_empty() {
      write!(f, "{}:{}", self.group, self.module)
    } else {
      write!(f, "{}:{}:{}", self.group, self.module, self.version)
    }
  }
}

/// An exclusion declared on a dependency.
///
/// A missing group or module matches anything, so `{ group: "org.slf4j" }`
/// excludes every module of that group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exclusion {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub group: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub module: Option<String>,
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
  Bool(bool),
  Int(i64),
  String(String),
}

impl fmt::Display for AttributeValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AttributeValue::Bool(b) => write!(f, "{}", b),
      AttributeValue::Int(n) => write!(f, "{}", n),
      AttributeValue::String(s) => write!(f, "{}", s),
    }
  }
}

impl From<&str> for AttributeValue {
  fn from(value: &str) -> Self {
    AttributeValue::String(value.to_string())
  }
}

impl From<String> for AttributeValue {
  fn from(value: String) -> Self {
    AttributeValue::String(value)
  }
}

impl From<bool> for AttributeValue {
  fn from(value: bool) -> Self {
    AttributeValue::Bool(value)
  }
}

impl From<i64> for AttributeValue {
  fn from(value: i64) -> Self {
    AttributeValue::Int(value)
  }
}

/// An immutable set of named attributes.
///
/// Uses [`BTreeMap`] so iteration, serialization and hashing are ordered by
/// attribute name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn get(&self, name: &str) -> Option<&AttributeValue> {
    self.0.get(name)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
    self.0.iter()
  }

  /// Return a copy with `name` set to `value`, replacing any previous value.
  pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
    self.0.insert(name.into(), value.into());
    self
  }

  /// Return a copy where every entry of `other` overrides the entries here.
  pub fn merged(mut self, other: &Attributes) -> Self {
    for (name, value) in &other.0 {
      self.0.insert(name.clone(), value.clone());
    }
    self
  }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

/// A named, optionally versioned feature a variant declares it provides.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Capability {
  pub group: String,
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
}

impl Capability {
  pub fn new(group: impl Into<String>, name: impl Into<String>, version: Option<String>) -> Self {
    Self {
      group: group.into(),
      name: name.into(),
      version,
    }
  }

  fn same_feature(&self, other: &Capability) -> bool {
    self.group == other.group && self.name == other.name
  }
}

impl fmt::Display for Capability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.version {
      Some(version) => write!(f, "{}:{}:{}", self.group, self.name, version),
      None => write!(f, "{}:{}", self.group, self.name),
    }
  }
}

/// An ordered list of capabilities without duplicate `group:name` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(Vec<Capability>);

impl Capabilities {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn of(capabilities: impl IntoIterator<Item = Capability>) -> Self {
    capabilities.into_iter().fold(Self::empty(), Capabilities::with)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Capability> {
    self.0.iter()
  }

  /// Add a capability, replacing an existing one for the same feature.
  pub fn with(mut self, capability: Capability) -> Self {
    match self.0.iter_mut().find(|c| c.same_feature(&capability)) {
      Some(existing) => *existing = capability,
      None => self.0.push(capability),
    }
    self
  }

  pub fn without(mut self, group: &str, name: &str) -> Self {
    self.0.retain(|c| !(c.group == group && c.name == name));
    self
  }
}

/// Name of an artifact within a module, in the `name-classifier.extension`
/// sense of a Maven repository layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactName {
  pub name: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub extension: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub classifier: Option<String>,
}

impl ArtifactName {
  pub fn new(name: impl Into<String>, kind: impl Into<String>, extension: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: kind.into(),
      extension: extension.into(),
      classifier: None,
    }
  }

  pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
    self.classifier = Some(classifier.into());
    self
  }

  /// The file name the artifact is published under for `version`.
  pub fn file_name(&self, version: &str) -> String {
    match &self.classifier {
      Some(classifier) => format!("{}-{}-{}.{}", self.name, version, classifier, self.extension),
      None => format!("{}-{}.{}", self.name, version, self.extension),
    }
  }
}

/// An artifact owned by a specific module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Artifact {
  pub component: ModuleIdentity,
  pub name: ArtifactName,
}

impl Artifact {
  pub fn new(component: ModuleIdentity, name: ArtifactName) -> Self {
    Self { component, name }
  }

  pub fn file_name(&self) -> String {
    self.name.file_name(&self.component.version)
  }
}

impl fmt::Display for Artifact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} ({})", self.file_name(), self.name.kind)
  }
}
