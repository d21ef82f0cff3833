use std::sync::Arc;

use modmeta_lib::component::{ArtifactName, Attributes, AttributeValue, Exclusion, ModuleSelector};
use modmeta_lib::manifest::{ConfigurationDefinition, DerivationKind, ModuleDocument, VariantDefinition};
use modmeta_lib::realise::RealiseError;
use modmeta_lib::rules::{AdditionalVariant, DeclarativeRules, NoRules, RuleError, VariantRule};
use modmeta_lib::scope::{DependencyDescriptor, MavenScope};
use modmeta_lib::{LazyModuleMetadata, RealisedMetadata};

use super::common::{Hook, RecordingRules, module_id, modules_of, scenario};

#[test]
fn end_to_end_configurations() {
  let realised = RealisedMetadata::transform(&scenario(Arc::new(NoRules))).unwrap();

  let dependencies_of = |name: &str| modules_of(&realised.configuration(name).unwrap().dependencies);
  assert_eq!(dependencies_of("compile"), vec!["a"]);
  assert_eq!(dependencies_of("runtime"), vec!["a"]);
  assert_eq!(dependencies_of("test"), vec!["a", "b"]);
  assert_eq!(dependencies_of("optional"), vec!["c"]);

  for name in ["compile", "test"] {
    let artifacts = &realised.configuration(name).unwrap().artifacts;
    assert_eq!(artifacts.len(), 1, "{name}");
    assert_eq!(artifacts[0].file_name(), "m-1.0.jar");
    assert_eq!(artifacts[0].component, module_id());
  }
}

#[test]
fn optional_dependency_stays_in_optional_configuration() {
  let realised = RealisedMetadata::transform(&scenario(Arc::new(NoRules))).unwrap();

  for configuration in realised.configurations() {
    let carries_c = modules_of(&configuration.dependencies).contains(&"c");
    assert_eq!(carries_c, configuration.name == "optional", "{}", configuration.name);
  }
  let optional = realised.configuration("optional").unwrap();
  assert!(optional.dependencies[0].via_optional);
}

#[test]
fn exclusions_reach_every_configuration_and_variant() {
  let slf4j = Exclusion {
    group: Some("org.slf4j".to_string()),
    module: None,
  };
  let logging = DependencyDescriptor::new(ModuleSelector::new("org.example", "logging", "1.0"), MavenScope::Runtime)
    .with_exclusion(slf4j.clone());
  let lazy = LazyModuleMetadata::builder(module_id())
    .dependency(logging)
    .build()
    .unwrap();

  let realised = RealisedMetadata::transform(&lazy).unwrap();
  for name in ["runtime", "default", "test"] {
    let dependencies = &realised.configuration(name).unwrap().dependencies;
    assert_eq!(dependencies.len(), 1, "{name}");
    assert_eq!(dependencies[0].exclusions, vec![slf4j.clone()], "{name}");
  }
  assert!(realised.configuration("compile").unwrap().dependencies.is_empty());

  let enforced = realised
    .derived_variants()
    .iter()
    .find(|v| v.name == "enforced-platform-runtime")
    .unwrap();
  assert_eq!(enforced.dependencies[0].exclusions, vec![slf4j]);
}

#[test]
fn transitive_and_visible_flags_survive_transform() {
  let lazy = LazyModuleMetadata::builder(module_id())
    .configurations([
      ConfigurationDefinition::new("compile").non_transitive(),
      ConfigurationDefinition::new("runtime").extending(["compile"]).hidden(),
    ])
    .build()
    .unwrap();

  let realised = RealisedMetadata::transform(&lazy).unwrap();
  let compile = realised.configuration("compile").unwrap();
  assert!(!compile.transitive);
  assert!(compile.visible);
  let runtime = realised.configuration("runtime").unwrap();
  assert!(runtime.transitive);
  assert!(!runtime.visible);

  let derived_compile = &realised.derived_variants()[0];
  assert_eq!(derived_compile.name, "compile");
  assert!(!derived_compile.transitive);
  let derived_runtime = &realised.derived_variants()[1];
  assert!(!derived_runtime.visible);
}

#[test]
fn every_configuration_is_realised_once_per_hook() {
  let rules = RecordingRules::new(DeclarativeRules::new());
  let lazy = LazyModuleMetadata::builder(module_id())
    .derivation(DerivationKind::None.strategy())
    .rules(rules.clone())
    .build()
    .unwrap();

  let realised = RealisedMetadata::transform(&lazy).unwrap();

  for name in realised.configuration_names() {
    assert_eq!(
      rules.calls_for(name),
      vec![Hook::Attributes, Hook::Capabilities, Hook::Files],
      "{name}"
    );
  }
  assert_eq!(rules.call_count(), 3 * realised.configurations().len());
}

#[test]
fn lazy_configuration_reapplies_rules_each_call() {
  let rules = RecordingRules::new(DeclarativeRules::new());
  let lazy = scenario(rules.clone());

  lazy.configuration("compile").unwrap();
  lazy.configuration("compile").unwrap();
  assert_eq!(rules.calls_for("compile").len(), 6);
  assert_eq!(lazy.configuration("missing").unwrap(), None);
}

#[test]
fn artifact_synthesis_per_configuration_and_packaging() {
  let lazy = LazyModuleMetadata::builder(module_id())
    .configurations([ConfigurationDefinition::new("other")])
    .build()
    .unwrap();
  let realised = RealisedMetadata::transform(&lazy).unwrap();
  assert!(realised.configuration("other").unwrap().artifacts.is_empty());

  let pom = LazyModuleMetadata::builder(module_id()).packaging("pom").build().unwrap();
  let realised = RealisedMetadata::transform(&pom).unwrap();
  let artifacts = &realised.configuration("test").unwrap().artifacts;
  assert_eq!(artifacts.len(), 1);
  assert_eq!(artifacts[0].name.kind, "pom");
  assert_eq!(artifacts[0].file_name(), "m-1.0.pom");
  assert!(realised.is_pom_packaging());
  assert!(!realised.is_known_jar_packaging());
}

#[test]
fn known_jar_packagings_publish_a_jar() {
  for packaging in ["jar", "ejb", "bundle", "maven-plugin", "eclipse-plugin"] {
    let lazy = LazyModuleMetadata::builder(module_id()).packaging(packaging).build().unwrap();
    let realised = RealisedMetadata::transform(&lazy).unwrap();
    let artifacts = &realised.configuration("compile").unwrap().artifacts;
    assert_eq!(artifacts[0].file_name(), "m-1.0.jar", "{packaging}");
  }
}

#[test]
fn unknown_base_variant_aborts_transform() {
  let rules = DeclarativeRules::new().with_additional_variant(AdditionalVariant::based_on("extra", "ghost"));
  let err = RealisedMetadata::transform(&scenario(Arc::new(rules))).unwrap_err();

  assert_eq!(
    err,
    RealiseError::UnknownBaseVariant {
      base: "ghost".to_string(),
      module: module_id(),
    }
  );
  let message = err.to_string();
  assert!(message.contains("ghost"));
  assert!(message.contains("org.example:m:1.0"));
}

#[test]
fn rule_errors_abort_transform() {
  let rules = DeclarativeRules::new().with_rule(
    VariantRule::for_variant("*").add_capability(modmeta_lib::component::Capability::new("", "broken", None)),
  );
  let err = RealisedMetadata::transform(&scenario(Arc::new(rules))).unwrap_err();
  assert!(matches!(err, RealiseError::Rule(RuleError::InvalidCapability { .. })));
}

#[test]
fn additional_variants_follow_derived_variants() {
  let rules = DeclarativeRules::new()
    .with_additional_variant(AdditionalVariant::based_on("fat", "runtime"))
    .with_additional_variant(AdditionalVariant::bare("docs"))
    .with_rule(VariantRule::for_variant("fat").with_attributes(Attributes::empty().with("bundling", "shadowed")));

  let realised = RealisedMetadata::transform(&scenario(Arc::new(rules))).unwrap();
  let names: Vec<_> = realised.derived_variants().iter().map(|v| v.name.as_str()).collect();
  assert_eq!(
    names,
    vec![
      "compile",
      "runtime",
      "platform-compile",
      "platform-runtime",
      "enforced-platform-compile",
      "enforced-platform-runtime",
      "fat",
      "docs",
    ]
  );

  let runtime = &realised.derived_variants()[1];
  let fat = &realised.derived_variants()[6];
  assert_eq!(fat.dependencies, runtime.dependencies);
  assert_eq!(fat.artifacts, runtime.artifacts);
  assert_eq!(fat.attributes.get("bundling"), Some(&AttributeValue::from("shadowed")));

  let docs = &realised.derived_variants()[7];
  assert!(docs.dependencies.is_empty());
  assert!(docs.artifacts.is_empty());
}

#[test]
fn explicit_variants_are_kept_in_order() {
  let lazy = LazyModuleMetadata::builder(module_id())
    .variant(
      VariantDefinition::new("runtimeElements")
        .with_dependency(ModuleSelector::new("org.example", "a", "1.0"))
        .with_artifact(ArtifactName::new("m", "jar", "jar")),
    )
    .variant(VariantDefinition::new("apiElements"))
    .rules(Arc::new(
      DeclarativeRules::new().with_additional_variant(AdditionalVariant::bare("ignored")),
    ))
    .build()
    .unwrap();

  let realised = RealisedMetadata::transform(&lazy).unwrap();
  let names: Vec<_> = realised.variants().iter().map(|v| v.name.as_str()).collect();
  assert_eq!(names, vec!["runtimeElements", "apiElements"]);
  assert!(realised.derived_variants().is_empty());
  assert_eq!(realised.variants()[0].artifacts[0].file_name(), "m-1.0.jar");
}

#[test]
fn document_round_trip_through_lazy() {
  let json = r#"{
    "id": { "group": "org.example", "module": "m", "version": "1.0" },
    "source": { "repository": "central" },
    "status": "integration",
    "snapshot_timestamp": "20240101.120000-3",
    "dependencies": [
      { "group": "org.example", "module": "a", "version": "1.0" },
      { "group": "org.example", "module": "b", "version": "1.0", "scope": "test" },
      { "group": "org.example", "module": "c", "version": "1.0", "optional": true }
    ],
    "derivation": "none"
  }"#;

  let lazy = ModuleDocument::from_json(json).unwrap().into_lazy(Arc::new(NoRules)).unwrap();
  let realised = RealisedMetadata::transform(&lazy).unwrap();

  assert_eq!(realised.status(), "integration");
  assert_eq!(realised.snapshot_timestamp(), Some("20240101.120000-3"));
  assert!(realised.derived_variants().is_empty());
  assert_eq!(modules_of(&realised.configuration("test").unwrap().dependencies), vec!["a", "b"]);
  assert_eq!(modules_of(&realised.configuration("optional").unwrap().dependencies), vec!["c"]);

  let from_builder = RealisedMetadata::transform(
    &LazyModuleMetadata::builder(module_id())
      .source(modmeta_lib::ModuleSource::new("central"))
      .status("integration")
      .snapshot_timestamp("20240101.120000-3")
      .dependencies([super::common::a(), super::common::b(), super::common::c()])
      .derivation(DerivationKind::None.strategy())
      .build()
      .unwrap(),
  )
  .unwrap();
  assert_eq!(realised, from_builder);
}
