//! Variant derivation for modules that declare no variants.
//!
//! # Algorithm
//!
//! 1. Ask the lazy metadata for its derived variants. These already went
//!    through the rule hooks when they were realised, so they are taken as-is.
//! 2. For each additional variant declared by the rules, in declaration
//!    order, start either from the module attributes alone (no base) or from
//!    a copy of the named derived variant.
//! 3. Put every additional variant through the rule hooks under its own name.
//!
//! The result lists derived variants first, then additional variants. Nothing
//! is reordered or deduplicated.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use super::configuration::{RawConfiguration, apply_rules};
use super::types::{RealiseError, RealisedConfiguration};
use crate::component::{Attributes, Capabilities, ModuleIdentity};
use crate::manifest::LazyModuleMetadata;
use crate::rules::VariantMetadataRules;

/// Derive the variants of a module that declares none.
///
/// Returns an empty list when the derivation strategy proposes nothing; in
/// that case additional variants are not applied either.
pub fn derive_variants(metadata: &LazyModuleMetadata) -> Result<Vec<RealisedConfiguration>, RealiseError> {
  let Some(derived) = metadata.maybe_derive_variants()? else {
    debug!(module = %metadata.id(), "no variant derivation");
    return Ok(Vec::new());
  };
  add_variants_from_rules(metadata.id(), metadata.attributes(), derived, metadata.rules())
}

/// Append the additional variants declared by `rules` to `derived`.
///
/// # Errors
///
/// Returns [`RealiseError::UnknownBaseVariant`] if an additional variant is
/// based on a name not present in `derived`, and propagates rule errors.
pub fn add_variants_from_rules(
  component: &ModuleIdentity,
  module_attributes: &Attributes,
  derived: Vec<RealisedConfiguration>,
  rules: &dyn VariantMetadataRules,
) -> Result<Vec<RealisedConfiguration>, RealiseError> {
  let additional = rules.additional_variants();
  if additional.is_empty() {
    return Ok(derived);
  }

  let mut result = Vec::with_capacity(derived.len() + additional.len());
  {
    let by_name: HashMap<&str, &RealisedConfiguration> = derived.iter().map(|v| (v.name.as_str(), v)).collect();

    for declaration in additional {
      let raw = match &declaration.base {
        None => RawConfiguration {
          name: declaration.name.clone(),
          transitive: true,
          visible: true,
          hierarchy: BTreeSet::new(),
          attributes: module_attributes.clone(),
          capabilities: Capabilities::empty(),
          dependencies: Vec::new(),
          artifacts: Vec::new(),
        },
        Some(base_name) => {
          let base = by_name
            .get(base_name.as_str())
            .ok_or_else(|| RealiseError::UnknownBaseVariant {
              base: base_name.clone(),
              module: component.clone(),
            })?;
          RawConfiguration {
            name: declaration.name.clone(),
            transitive: true,
            visible: true,
            hierarchy: BTreeSet::new(),
            attributes: base.attributes.clone(),
            capabilities: base.capabilities.clone(),
            dependencies: base.dependencies.clone(),
            artifacts: base.artifacts.clone(),
          }
        }
      };

      debug!(
        module = %component,
        variant = %declaration.name,
        base = ?declaration.base,
        "adding variant from rules"
      );
      result.push(apply_rules(component, rules, raw)?);
    }
  }

  let mut variants = derived;
  variants.extend(result);
  Ok(variants)
}
