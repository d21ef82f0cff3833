use std::sync::Arc;

use modmeta_lib::component::{AttributeValue, Capability};
use modmeta_lib::manifest::{DerivationKind, JavaEcosystem, VariantDerivationStrategy};
use modmeta_lib::rules::NoRules;
use modmeta_lib::{LazyModuleMetadata, RealisedMetadata};

use super::common::{module_id, modules_of, scenario};

#[test]
fn library_variants_carry_artifacts_and_dependencies() {
  let realised = RealisedMetadata::transform(&scenario(Arc::new(NoRules))).unwrap();
  let compile = &realised.derived_variants()[0];
  let runtime = &realised.derived_variants()[1];

  assert_eq!(compile.name, "compile");
  assert_eq!(compile.attributes.get("usage"), Some(&AttributeValue::from("java-api")));
  assert_eq!(runtime.attributes.get("usage"), Some(&AttributeValue::from("java-runtime")));
  assert_eq!(modules_of(&compile.dependencies), vec!["a"]);
  assert_eq!(compile.artifacts[0].file_name(), "m-1.0.jar");
  assert!(compile.capabilities.is_empty());
}

#[test]
fn platform_variants_only_constrain() {
  let realised = RealisedMetadata::transform(&scenario(Arc::new(NoRules))).unwrap();

  for variant in &realised.derived_variants()[2..] {
    assert!(variant.artifacts.is_empty(), "{}", variant.name);
    assert!(variant.dependencies.iter().all(|d| d.constraint), "{}", variant.name);
  }

  for variant in &realised.derived_variants()[2..4] {
    assert!(variant.dependencies.iter().all(|d| !d.forced), "{}", variant.name);
  }
  for variant in &realised.derived_variants()[4..] {
    assert!(!variant.dependencies.is_empty(), "{}", variant.name);
    assert!(variant.dependencies.iter().all(|d| d.forced), "{}", variant.name);
  }
  assert!(realised.configurations().iter().flat_map(|c| &c.dependencies).all(|d| !d.forced));

  let platform = &realised.derived_variants()[2];
  assert_eq!(platform.attributes.get("category"), Some(&AttributeValue::from("platform")));
  assert!(
    platform
      .capabilities
      .iter()
      .any(|c| c == &Capability::new("org.example", "m-derived-platform", Some("1.0".to_string())))
  );

  let enforced = &realised.derived_variants()[4];
  assert_eq!(enforced.name, "enforced-platform-compile");
  assert_eq!(
    enforced.capabilities.iter().next().map(|c| c.name.as_str()),
    Some("m-derived-enforced-platform")
  );
}

#[test]
fn no_derivation_leaves_configurations_only() {
  let lazy = LazyModuleMetadata::builder(module_id())
    .derivation(DerivationKind::None.strategy())
    .build()
    .unwrap();

  assert_eq!(lazy.maybe_derive_variants().unwrap(), None);
  let realised = RealisedMetadata::transform(&lazy).unwrap();
  assert!(realised.derived_variants().is_empty());
  assert!(realised.configuration("compile").is_some());
}

#[test]
fn java_ecosystem_always_derives() {
  let lazy = scenario(Arc::new(NoRules));
  assert!(JavaEcosystem.derives_variants());
  assert_eq!(JavaEcosystem.derive(&lazy).len(), 6);
}
