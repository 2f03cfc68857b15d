use std::path::Path;

use serde::Serialize;
use strum::IntoEnumIterator;
use tagscope::diagnostics::RuleId;

use crate::{
    app::GlobalOptions,
    commands::common::load_config,
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct RuleEntry {
    rule: String,
    default_severity: String,
    level: String,
    title: String,
}

pub fn run(config: Option<&Path>, opts: &GlobalOptions) -> anyhow::Result<()> {
    let config = load_config(config)?;

    let rules: Vec<RuleEntry> = RuleId::iter()
        .map(|rule| RuleEntry {
            rule: rule.to_string(),
            default_severity: rule.default_severity().to_string(),
            level: config.level(rule).to_string(),
            title: rule.title().to_string(),
        })
        .collect();

    print_output(&rules, opts, |rules| {
        let mut tw = TabWriter::new(vec![
            ("Rule", Align::Left),
            ("Default", Align::Left),
            ("Level", Align::Left),
            ("Title", Align::Left),
        ]);
        for entry in rules {
            tw.row(vec![
                entry.rule.clone(),
                entry.default_severity.clone(),
                entry.level.clone(),
                entry.title.clone(),
            ]);
        }
        tw.print();
    })
}
