use std::path::Path;

use anyhow::Context;
use tagscope::{host::FactsDocument, AnalyzerConfig, AttributeRegistry};

/// Read a text file, naming it in the error.
pub fn read_text(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what}: {}", path.display()))
}

/// Load the analyzer configuration, falling back to the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("failed to load configuration: {}", path.display())),
        None => Ok(AnalyzerConfig::default()),
    }
}

/// Load a facts document.
pub fn load_facts(path: &Path) -> anyhow::Result<FactsDocument> {
    let raw = read_text(path, "facts document")?;
    FactsDocument::parse(&raw)
        .with_context(|| format!("failed to parse facts document: {}", path.display()))
}

/// Load a metadata document strictly: a document that does not yield a registry is an error.
pub fn load_registry(path: &Path) -> anyhow::Result<AttributeRegistry> {
    let raw = read_text(path, "metadata document")?;
    AttributeRegistry::build(&raw).with_context(|| {
        format!(
            "metadata document is malformed or has no attribute list: {}",
            path.display()
        )
    })
}
