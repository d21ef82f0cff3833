//! Loading module and rules documents from disk.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use modmeta_lib::rules::{DeclarativeRules, NoRules, VariantMetadataRules};
use modmeta_lib::util::hash::hash_bytes;
use modmeta_lib::{LazyModuleMetadata, ModuleDocument, ModuleSource, RealisedMetadata};

/// Repository recorded for documents that do not name one.
const LOCAL_REPOSITORY: &str = "local";

fn load_rules(path: Option<&Path>) -> Result<Arc<dyn VariantMetadataRules>> {
  let Some(path) = path else {
    return Ok(Arc::new(NoRules));
  };
  let json =
    fs::read_to_string(path).with_context(|| format!("Failed to read rules document: {}", path.display()))?;
  let rules = DeclarativeRules::from_json(&json)
    .with_context(|| format!("Failed to parse rules document: {}", path.display()))?;
  Ok(Arc::new(rules))
}

/// Read the module document at `module`, customised by the rules at `rules`.
///
/// The descriptor checksum recorded in the module source is the SHA-256 of
/// the file as read.
pub fn load_module(module: &Path, rules: Option<&Path>) -> Result<LazyModuleMetadata> {
  let bytes = fs::read(module).with_context(|| format!("Failed to read module document: {}", module.display()))?;
  let json = std::str::from_utf8(&bytes)
    .with_context(|| format!("Module document is not valid UTF-8: {}", module.display()))?;
  let mut document =
    ModuleDocument::from_json(json).with_context(|| format!("Failed to parse module document: {}", module.display()))?;

  let repository = if document.source.repository.is_empty() {
    LOCAL_REPOSITORY.to_string()
  } else {
    document.source.repository.clone()
  };
  document.source = ModuleSource::new(repository).with_descriptor_sha256(hash_bytes(&bytes).0);
  debug!(module = %document.id, path = %module.display(), "loaded module document");

  document
    .into_lazy(load_rules(rules)?)
    .with_context(|| format!("Invalid module document: {}", module.display()))
}

/// Load and realise in one step.
pub fn realise_module(module: &Path, rules: Option<&Path>) -> Result<RealisedMetadata> {
  let lazy = load_module(module, rules)?;
  RealisedMetadata::transform(&lazy).with_context(|| format!("Failed to realise {}", lazy.id()))
}
