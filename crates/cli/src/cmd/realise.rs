//! Implementation of the `modmeta realise` command.
//!
//! Loads a module document, applies the rules document if one is given and
//! prints every realised configuration and variant.

use std::path::Path;

use anyhow::{Context, Result};

use modmeta_lib::component::{Artifact, Attributes, Capabilities};
use modmeta_lib::realise::RealisedConfiguration;
use modmeta_lib::scope::BoundDependency;
use modmeta_lib::util::hash::Hashable;

use super::load::realise_module;
use crate::output::{
  OutputFormat, join_or_dash, print_heading, print_info, print_json, print_stat, print_success, symbols, truncate_hash,
};

pub fn cmd_realise(module: &Path, rules: Option<&Path>, format: OutputFormat, verbose: bool) -> Result<()> {
  let realised = realise_module(module, rules)?;

  if format.is_json() {
    return print_json(&realised);
  }

  let hash = realised.compute_hash().context("Failed to compute metadata hash")?;

  print_success(&format!("Realised {} ({})", realised.id(), realised.packaging()));
  print_stat("Source", &realised.source().repository);
  print_stat("Status", realised.status());
  print_stat("Hash", truncate_hash(&hash.0));
  if realised.is_relocated() {
    print_stat("Relocated", "yes");
  }
  if let Some(timestamp) = realised.snapshot_timestamp() {
    print_stat("Snapshot", timestamp);
  }

  print_heading("Configurations:");
  for configuration in realised.configurations() {
    print_configuration(configuration, verbose);
  }

  if !realised.variants().is_empty() {
    print_heading("Variants:");
    for variant in realised.variants() {
      println!("  {} {}", symbols::INFO, variant.name);
      print_contents(&variant.dependencies, &variant.artifacts);
      if verbose {
        print_details(&variant.attributes, &variant.capabilities);
      }
    }
  } else if realised.derived_variants().is_empty() {
    println!();
    print_info("No variants");
  } else {
    print_heading("Derived variants:");
    for variant in realised.derived_variants() {
      print_configuration(variant, verbose);
    }
  }

  Ok(())
}

fn print_configuration(configuration: &RealisedConfiguration, verbose: bool) {
  let mut flags = Vec::new();
  if !configuration.transitive {
    flags.push("non-transitive");
  }
  if !configuration.visible {
    flags.push("hidden");
  }
  let extends = configuration
    .hierarchy
    .iter()
    .map(String::as_str)
    .filter(|name| *name != configuration.name);

  print!(
    "  {} {} {} [{}]",
    symbols::INFO,
    configuration.name,
    symbols::ARROW,
    join_or_dash(extends)
  );
  if !flags.is_empty() {
    print!(" ({})", flags.join(", "));
  }
  println!();

  print_contents(&configuration.dependencies, &configuration.artifacts);
  if verbose {
    print_details(&configuration.attributes, &configuration.capabilities);
  }
}

fn print_contents(dependencies: &[BoundDependency], artifacts: &[Artifact]) {
  for dependency in dependencies {
    println!("      {} {}", symbols::PLUS, dependency);
  }
  for artifact in artifacts {
    println!("      {} {}", symbols::TILDE, artifact);
  }
}

fn print_details(attributes: &Attributes, capabilities: &Capabilities) {
  for (name, value) in attributes.iter() {
    println!("      {}={}", name, value);
  }
  for capability in capabilities.iter() {
    println!("      capability {}", capability);
  }
}
