use std::collections::BTreeSet;

use proptest::prelude::*;

use modmeta_lib::component::ModuleSelector;
use modmeta_lib::consts::OPTIONAL_CONFIGURATION;
use modmeta_lib::scope::filter::is_included;
use modmeta_lib::scope::{DependencyDescriptor, MavenScope};

const CONFIGURATIONS: [&str; 10] = [
  "default", "master", "compile", "provided", "runtime", "test", "system", "sources", "javadoc", "optional",
];

fn scope() -> impl Strategy<Value = MavenScope> {
  prop::sample::select(MavenScope::ALL.to_vec())
}

fn hierarchy() -> impl Strategy<Value = BTreeSet<String>> {
  prop::collection::btree_set(prop::sample::select(CONFIGURATIONS.to_vec()), 0..6)
    .prop_map(|names| names.into_iter().map(str::to_string).collect())
}

fn descriptor(scope: MavenScope, optional: bool) -> DependencyDescriptor {
  let descriptor = DependencyDescriptor::new(ModuleSelector::new("g", "d", "1"), scope);
  if optional { descriptor.optional() } else { descriptor }
}

proptest! {
  #[test]
  fn non_optional_follows_hierarchy(
    scope in scope(),
    name in prop::sample::select(CONFIGURATIONS.to_vec()),
    hierarchy in hierarchy(),
  ) {
    let dependency = descriptor(scope, false);
    prop_assert_eq!(
      is_included(&dependency, name, &hierarchy),
      hierarchy.contains(scope.lower_name())
    );
  }

  #[test]
  fn optional_only_in_optional_configuration(
    scope in scope(),
    name in prop::sample::select(CONFIGURATIONS.to_vec()),
    hierarchy in hierarchy(),
  ) {
    let dependency = descriptor(scope, true);
    let expected = name == OPTIONAL_CONFIGURATION
      && scope != MavenScope::Test
      && scope != MavenScope::System;
    prop_assert_eq!(is_included(&dependency, name, &hierarchy), expected);
  }
}
