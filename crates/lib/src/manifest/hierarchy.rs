//! Configuration hierarchy construction.
//!
//! A configuration's hierarchy is its own name plus the names of every
//! configuration it extends, directly or transitively.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::types::ConfigurationDefinition;

/// Errors in the manifest model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
  #[error("configuration '{configuration}' extends unknown configuration '{parent}'")]
  UnknownParent { configuration: String, parent: String },

  #[error("configuration '{configuration}' is declared more than once")]
  DuplicateConfiguration { configuration: String },

  #[error("variant '{variant}' is derived from unknown configuration '{configuration}'")]
  UnknownConfiguration { variant: String, configuration: String },
}

/// Compute the hierarchy of `configuration` within `definitions`.
///
/// Cycles in `extends` are tolerated: every name is visited once.
///
/// # Errors
///
/// Returns [`ManifestError::UnknownParent`] if any configuration reached from
/// `configuration` extends a name not present in `definitions`.
pub fn construct_hierarchy(
  configuration: &ConfigurationDefinition,
  definitions: &BTreeMap<String, ConfigurationDefinition>,
) -> Result<BTreeSet<String>, ManifestError> {
  let mut hierarchy = BTreeSet::new();
  hierarchy.insert(configuration.name.clone());

  let mut stack: Vec<&ConfigurationDefinition> = vec![configuration];
  while let Some(current) = stack.pop() {
    for parent in &current.extends {
      if hierarchy.contains(parent) {
        continue;
      }
      let definition = definitions.get(parent).ok_or_else(|| ManifestError::UnknownParent {
        configuration: current.name.clone(),
        parent: parent.clone(),
      })?;
      hierarchy.insert(parent.clone());
      stack.push(definition);
    }
  }

  Ok(hierarchy)
}
