use std::path::Path;

use serde::Serialize;

use crate::{
    app::GlobalOptions,
    commands::common::load_registry,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct RegistryOutput {
    version: String,
    total: usize,
    attributes: Vec<AttributeEntry>,
}

#[derive(Debug, Serialize)]
struct AttributeEntry {
    name: String,
    alias: String,
    #[serde(rename = "type")]
    type_name: String,
    stability: String,
    deprecated: Option<String>,
}

pub fn run(metadata: &Path, filter: Option<&str>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let registry = load_registry(metadata)?;

    let attributes: Vec<AttributeEntry> = registry
        .definitions()
        .into_iter()
        .filter(|definition| {
            filter.map_or(true, |text| {
                definition.name.contains(text) || definition.constant_alias.contains(text)
            })
        })
        .map(|definition| AttributeEntry {
            name: definition.name.clone(),
            alias: definition.constant_alias.clone(),
            type_name: definition.declared_type.to_string(),
            stability: definition.stability.to_string(),
            deprecated: definition.deprecation_note.clone(),
        })
        .collect();

    let output = RegistryOutput {
        version: registry.version().to_string(),
        total: registry.len(),
        attributes,
    };

    print_output(&output, opts, |out| {
        println!("Registry version {}: {} attributes", out.version, out.total);
        if out.attributes.is_empty() {
            return;
        }
        println!();

        let mut tw = TabWriter::new(vec![
            ("Name", Align::Left),
            ("Type", Align::Left),
            ("Stability", Align::Left),
            ("Alias", Align::Left),
            ("Deprecated", Align::Left),
        ]);
        for attribute in &out.attributes {
            tw.row(vec![
                attribute.name.clone(),
                attribute.type_name.clone(),
                attribute.stability.clone(),
                attribute.alias.clone(),
                attribute.deprecated.clone().unwrap_or_default(),
            ]);
        }
        tw.print();
    })
}
