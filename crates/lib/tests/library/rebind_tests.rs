use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use modmeta_lib::rules::{AdditionalVariant, DeclarativeRules, NoRules};
use modmeta_lib::util::hash::Hashable;
use modmeta_lib::{ModuleSource, RealisedMetadata};

use super::common::{RecordingRules, scenario};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn realised_metadata_is_send_and_sync() {
  assert_send_sync::<RealisedMetadata>();
}

#[test]
fn rebind_invokes_no_rule_hook() {
  let rules = RecordingRules::new(
    DeclarativeRules::new().with_additional_variant(AdditionalVariant::based_on("fat", "runtime")),
  );
  let realised = RealisedMetadata::transform(&scenario(rules.clone())).unwrap();
  let calls_after_transform = rules.call_count();
  assert!(calls_after_transform > 0);

  let rebound = realised.with_source(ModuleSource::new("mirror").with_descriptor_sha256("abc"));
  let _ = rebound.derived_variants();
  let _ = rebound.configuration("compile");
  let _ = rebound.maybe_derive_variants();

  assert_eq!(rules.call_count(), calls_after_transform);
  assert_eq!(rebound.source().repository, "mirror");
  assert_eq!(rebound.variants(), realised.variants());
  assert_eq!(rebound.derived_variants(), realised.derived_variants());
  assert_eq!(rebound.configurations(), realised.configurations());
  assert!(rebound.shares_content_with(&realised));
}

#[test]
fn rules_run_once_per_derived_variant() {
  let rules = RecordingRules::new(DeclarativeRules::new());
  RealisedMetadata::transform(&scenario(rules.clone())).unwrap();

  // `compile` is both a configuration and a derived variant.
  assert_eq!(rules.calls_for("compile").len(), 6);
  assert_eq!(rules.calls_for("platform-runtime").len(), 3);
}

#[test]
fn rebind_changes_identity_only_through_source() {
  let realised = RealisedMetadata::transform(&scenario(Arc::new(NoRules))).unwrap();
  let rebound = realised.with_source(ModuleSource::new("mirror"));

  assert_ne!(realised, rebound);
  assert_ne!(realised.compute_hash().unwrap(), rebound.compute_hash().unwrap());

  let back = rebound.with_source(realised.source().clone());
  assert_eq!(back, realised);
  assert_eq!(back.compute_hash().unwrap(), realised.compute_hash().unwrap());
}

#[test]
fn transform_is_deterministic() {
  let lazy = scenario(Arc::new(NoRules));
  let first = RealisedMetadata::transform(&lazy).unwrap();
  let second = RealisedMetadata::transform(&lazy).unwrap();

  assert_eq!(first, second);
  assert!(!first.shares_content_with(&second));

  let set: HashSet<_> = [first, second].into_iter().collect();
  assert_eq!(set.len(), 1);
}

#[test]
fn concurrent_transforms_share_rules() {
  let rules = RecordingRules::new(DeclarativeRules::new());
  let expected = RealisedMetadata::transform(&scenario(rules.clone())).unwrap();
  let per_transform = rules.call_count();

  let handles: Vec<_> = (0..4)
    .map(|_| {
      let lazy = scenario(rules.clone());
      thread::spawn(move || RealisedMetadata::transform(&lazy).unwrap())
    })
    .collect();

  for handle in handles {
    assert_eq!(handle.join().unwrap(), expected);
  }
  assert_eq!(rules.call_count(), per_transform * 5);
}

#[test]
fn realised_metadata_crosses_threads() {
  let realised = RealisedMetadata::transform(&scenario(Arc::new(NoRules))).unwrap();

  let handles: Vec<_> = ["a", "b", "c"]
    .into_iter()
    .map(|repository| {
      let realised = realised.clone();
      thread::spawn(move || realised.with_source(ModuleSource::new(repository)))
    })
    .collect();

  for handle in handles {
    let rebound = handle.join().unwrap();
    assert!(rebound.shares_content_with(&realised));
  }
}
