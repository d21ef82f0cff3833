use std::path::Path;

use anyhow::{Context, Result};

use modmeta_lib::util::hash::Hashable;

use super::load::realise_module;
use crate::output::{OutputFormat, print_json};

pub fn cmd_hash(module: &Path, rules: Option<&Path>, format: OutputFormat) -> Result<()> {
  let realised = realise_module(module, rules)?;
  let hash = realised.compute_hash().context("Failed to compute metadata hash")?;

  if format.is_json() {
    print_json(&serde_json::json!({ "module": realised.id().to_string(), "hash": hash.0 }))?;
  } else {
    println!("{}", hash);
  }
  Ok(())
}
