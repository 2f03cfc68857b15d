use std::{collections::BTreeMap, path::Path, process::ExitCode};

use serde::Serialize;
use tagscope::{
    diagnostics::{Diagnostic, DiagnosticSeverity},
    AnalysisSession,
};

use crate::{
    app::GlobalOptions,
    commands::common::{load_config, load_facts, read_text},
    output::{print_output, Align, TabWriter},
};

#[derive(Debug, Serialize)]
struct CheckOutput {
    skipped: bool,
    files: usize,
    call_sites: usize,
    diagnostics: Vec<DiagnosticEntry>,
    by_rule: BTreeMap<String, usize>,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct DiagnosticEntry {
    file: String,
    line: u32,
    column: u32,
    severity: DiagnosticSeverity,
    rule: String,
    message: String,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    errors: usize,
    warnings: usize,
    infos: usize,
}

impl From<&Diagnostic> for DiagnosticEntry {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            file: diagnostic.file.clone().unwrap_or_default(),
            line: diagnostic.span.line,
            column: diagnostic.span.column,
            severity: diagnostic.severity,
            rule: diagnostic.rule.to_string(),
            message: diagnostic.message(),
        }
    }
}

pub fn run(
    metadata: Option<&Path>,
    facts: &Path,
    config: Option<&Path>,
    opts: &GlobalOptions,
) -> anyhow::Result<ExitCode> {
    let config = load_config(config)?;
    let facts = load_facts(facts)?;

    let document = metadata
        .map(|path| read_text(path, "metadata document"))
        .transpose()?;
    let session = AnalysisSession::new(document.as_deref(), config);

    let mut diagnostics = session.analyze_all(&facts.files);
    diagnostics.sort_by(|a, b| {
        (&a.file, a.span.line, a.span.column, a.rule)
            .cmp(&(&b.file, b.span.line, b.span.column, b.rule))
    });

    let mut summary = Summary::default();
    let mut by_rule = BTreeMap::new();
    for diagnostic in &diagnostics {
        *by_rule.entry(diagnostic.rule.to_string()).or_insert(0) += 1;
        match diagnostic.severity {
            DiagnosticSeverity::Error => summary.errors += 1,
            DiagnosticSeverity::Warning => summary.warnings += 1,
            DiagnosticSeverity::Info => summary.infos += 1,
        }
    }

    let output = CheckOutput {
        skipped: !session.is_enabled(),
        files: facts.files.len(),
        call_sites: facts.call_site_count(),
        diagnostics: diagnostics.iter().map(DiagnosticEntry::from).collect(),
        by_rule,
        summary,
    };

    print_output(&output, opts, |out| {
        if out.skipped {
            println!("Attribute validation skipped: no usable metadata document");
            return;
        }

        for entry in &out.diagnostics {
            println!(
                "{}:{}:{}: [{}] {}: {}",
                entry.file, entry.line, entry.column, entry.severity, entry.rule, entry.message
            );
        }
        if !out.by_rule.is_empty() {
            println!();
            let mut tw = TabWriter::new(vec![("Rule", Align::Left), ("Count", Align::Right)]);
            for (rule, count) in &out.by_rule {
                tw.row(vec![rule.clone(), count.to_string()]);
            }
            tw.print();
            println!();
        }
        println!(
            "Checked {} call sites in {} files: {} errors, {} warnings, {} infos",
            out.call_sites,
            out.files,
            out.summary.errors,
            out.summary.warnings,
            out.summary.infos
        );
    })?;

    if output.summary.errors > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
