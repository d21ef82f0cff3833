//! Implementation of the `modmeta explain` command.
//!
//! For every declared dependency, lists the configurations that end up
//! carrying it after scope filtering.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use modmeta_lib::RealisedMetadata;
use modmeta_lib::scope::DependencyDescriptor;

use super::load::realise_module;
use crate::output::{OutputFormat, join_or_dash, print_info, print_json, print_stat, print_success};

#[derive(Debug, Serialize)]
struct Explanation<'a> {
  dependency: String,
  scope: &'a str,
  optional: bool,
  configurations: Vec<&'a str>,
}

fn explain<'a>(realised: &'a RealisedMetadata, dependency: &'a DependencyDescriptor) -> Explanation<'a> {
  let configurations = realised
    .configurations()
    .iter()
    .filter(|configuration| {
      configuration
        .dependencies
        .iter()
        .any(|bound| {
          bound.selector == dependency.selector
            && bound.scope == Some(dependency.scope)
            && bound.via_optional == dependency.optional
            && bound.exclusions == dependency.exclusions
        })
    })
    .map(|configuration| configuration.name.as_str())
    .collect();

  Explanation {
    dependency: dependency.selector.to_string(),
    scope: dependency.scope.lower_name(),
    optional: dependency.optional,
    configurations,
  }
}

pub fn cmd_explain(module: &Path, rules: Option<&Path>, format: OutputFormat) -> Result<()> {
  let realised = realise_module(module, rules)?;
  let explanations: Vec<_> = realised.dependencies().iter().map(|d| explain(&realised, d)).collect();

  if format.is_json() {
    return print_json(&explanations);
  }

  if explanations.is_empty() {
    print_info(&format!("{} declares no dependencies", realised.id()));
    return Ok(());
  }

  print_success(&format!("{} declares {} dependencies", realised.id(), explanations.len()));
  for explanation in &explanations {
    println!();
    if explanation.optional {
      println!("{} ({}, optional)", explanation.dependency, explanation.scope);
    } else {
      println!("{} ({})", explanation.dependency, explanation.scope);
    }
    print_stat("Configurations", &join_or_dash(explanation.configurations.iter().copied()));
  }

  Ok(())
}
