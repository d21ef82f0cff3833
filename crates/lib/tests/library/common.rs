use std::sync::{Arc, Mutex};

use modmeta_lib::component::{Artifact, Attributes, Capabilities, ModuleIdentity, ModuleSelector};
use modmeta_lib::rules::{AdditionalVariant, DeclarativeRules, NameOnlyVariant, RuleError, VariantMetadataRules};
use modmeta_lib::scope::{DependencyDescriptor, MavenScope};
use modmeta_lib::{LazyModuleMetadata, ModuleSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
  Attributes,
  Capabilities,
  Files,
}

/// Delegates to declarative rules and records every hook invocation.
#[derive(Debug, Default)]
pub struct RecordingRules {
  inner: DeclarativeRules,
  calls: Mutex<Vec<(Hook, String)>>,
}

impl RecordingRules {
  pub fn new(inner: DeclarativeRules) -> Arc<Self> {
    Arc::new(Self {
      inner,
      calls: Mutex::new(Vec::new()),
    })
  }

  pub fn calls(&self) -> Vec<(Hook, String)> {
    self.calls.lock().unwrap().clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.lock().unwrap().len()
  }

  pub fn calls_for(&self, name: &str) -> Vec<Hook> {
    self
      .calls()
      .into_iter()
      .filter(|(_, n)| n == name)
      .map(|(hook, _)| hook)
      .collect()
  }

  fn record(&self, hook: Hook, variant: &NameOnlyVariant) {
    self.calls.lock().unwrap().push((hook, variant.name().to_string()));
  }
}

impl VariantMetadataRules for RecordingRules {
  fn apply_attribute_rules(&self, variant: &NameOnlyVariant, attributes: Attributes) -> Result<Attributes, RuleError> {
    self.record(Hook::Attributes, variant);
    self.inner.apply_attribute_rules(variant, attributes)
  }

  fn apply_capability_rules(
    &self,
    variant: &NameOnlyVariant,
    capabilities: Capabilities,
  ) -> Result<Capabilities, RuleError> {
    self.record(Hook::Capabilities, variant);
    self.inner.apply_capability_rules(variant, capabilities)
  }

  fn apply_file_rules(
    &self,
    variant: &NameOnlyVariant,
    artifacts: Vec<Artifact>,
    component: &ModuleIdentity,
  ) -> Result<Vec<Artifact>, RuleError> {
    self.record(Hook::Files, variant);
    self.inner.apply_file_rules(variant, artifacts, component)
  }

  fn additional_variants(&self) -> &[AdditionalVariant] {
    self.inner.additional_variants()
  }
}

pub fn module_id() -> ModuleIdentity {
  ModuleIdentity::new("org.example", "m", "1.0")
}

pub fn a() -> DependencyDescriptor {
  DependencyDescriptor::new(ModuleSelector::new("org.example", "a", "1.0"), MavenScope::Compile)
}

pub fn b() -> DependencyDescriptor {
  DependencyDescriptor::new(ModuleSelector::new("org.example", "b", "1.0"), MavenScope::Test)
}

pub fn c() -> DependencyDescriptor {
  DependencyDescriptor::new(ModuleSelector::new("org.example", "c", "1.0"), MavenScope::Compile).optional()
}

/// Module `m` with A (compile), B (test) and C (optional compile).
pub fn scenario(rules: Arc<dyn VariantMetadataRules>) -> LazyModuleMetadata {
  LazyModuleMetadata::builder(module_id())
    .source(ModuleSource::new("central"))
    .packaging("jar")
    .dependencies([a(), b(), c()])
    .rules(rules)
    .build()
    .unwrap()
}

/// Module names of the dependencies a realised configuration carries.
pub fn modules_of(dependencies: &[modmeta_lib::scope::BoundDependency]) -> Vec<&str> {
  dependencies.iter().map(|d| d.selector.module.as_str()).collect()
}
