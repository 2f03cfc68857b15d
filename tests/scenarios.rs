//! End-to-end validation scenarios.
//!
//! Each test builds a session from a metadata document, feeds it synthetic call sites the way a
//! host front end would, and checks the reported diagnostics.

use std::path::PathBuf;

use tagscope::prelude::*;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

const MYAPP_COUNT: &str = r#"{"attributes": [{"attribute_name": "myapp.count", "type": "int"}]}"#;

fn set_tag(name: Expression, value: ValueType) -> CallSite {
    CallSite::new("System.Diagnostics.Activity", "SetTag")
        .with_argument(Argument::new(SourceSpan::new(40, 53).at(3, 25), name))
        .with_argument(
            Argument::new(SourceSpan::new(55, 60).at(3, 40), Expression::Other).with_type(value),
        )
}

fn boxed(concrete: ConcreteType) -> ValueType {
    ValueType::converted(concrete.into())
}

fn unit(call_sites: Vec<CallSite>) -> SourceUnit {
    SourceUnit::new("src/Worker.cs", call_sites)
}

fn session(document: &str) -> AnalysisSession {
    AnalysisSession::new(Some(document), AnalyzerConfig::default())
}

#[test]
fn scenario_a_matching_integer_is_clean() {
    let session = session(MYAPP_COUNT);
    let call = set_tag(
        Expression::string_literal("myapp.count"),
        boxed(ConcreteType::I8),
    );

    assert!(session.analyze(&unit(vec![call])).is_empty());
}

#[test]
fn scenario_b_string_for_int_is_type_mismatch() {
    let session = session(MYAPP_COUNT);
    let call = set_tag(
        Expression::string_literal("myapp.count"),
        boxed(ConcreteType::String),
    );

    let diagnostics = session.analyze(&unit(vec![call.clone()]));
    assert_eq!(diagnostics.len(), 1);

    let mismatch = &diagnostics[0];
    assert_eq!(mismatch.rule, RuleId::TypeMismatch);
    assert_eq!(mismatch.severity, DiagnosticSeverity::Error);
    assert_eq!(mismatch.arguments, vec!["myapp.count", "int", "string"]);
    assert_eq!(mismatch.span, call.arguments[1].span);
    assert_eq!(mismatch.file.as_deref(), Some("src/Worker.cs"));
}

#[test]
fn scenario_c_unknown_name_suppresses_type_check() {
    let session = session(MYAPP_COUNT);
    let call = set_tag(
        Expression::string_literal("bogus.name"),
        boxed(ConcreteType::Named("System.Guid".to_string())),
    );

    let diagnostics = session.analyze(&unit(vec![call.clone()]));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, RuleId::InvalidAttribute);
    assert_eq!(diagnostics[0].arguments, vec!["bogus.name"]);
    assert_eq!(diagnostics[0].span, call.arguments[0].span);
}

#[test]
fn scenario_d_experimental_and_deprecated() {
    let session = session(
        r#"{"attributes": [{
            "attribute_name": "myapp.legacy_flag",
            "type": "boolean",
            "stability": "experimental",
            "deprecated": "use X instead"
        }]}"#,
    );
    let call = set_tag(
        Expression::string_literal("myapp.legacy_flag"),
        boxed(ConcreteType::Boolean),
    );

    let diagnostics = session.analyze(&unit(vec![call.clone()]));
    let rules: Vec<_> = diagnostics.iter().map(|d| d.rule).collect();
    assert_eq!(
        rules,
        vec![RuleId::ExperimentalAttribute, RuleId::DeprecatedAttribute]
    );
    for diagnostic in &diagnostics {
        assert_eq!(diagnostic.span, call.arguments[0].span);
    }
    assert_eq!(
        diagnostics[1].message(),
        "Attribute 'myapp.legacy_flag' is deprecated: use X instead"
    );
}

#[test]
fn scenario_e_local_name_is_never_checked() {
    let session = session(MYAPP_COUNT);
    let empty = AnalysisSession::new(Some(r#"{"attributes": []}"#), AnalyzerConfig::default());

    for value in [
        boxed(ConcreteType::I8),
        boxed(ConcreteType::String),
        ValueType::Direct(ConcreteType::Object),
    ] {
        let call = set_tag(
            Expression::LocalReference {
                name: "attributeName".to_string(),
            },
            value,
        );
        assert!(session.analyze(&unit(vec![call.clone()])).is_empty());
        assert!(empty.analyze(&unit(vec![call])).is_empty());
    }
}

#[test]
fn scenario_f_no_document_disables_session() {
    let session = AnalysisSession::new(None, AnalyzerConfig::default());
    let calls = vec![
        set_tag(
            Expression::string_literal("bogus.name"),
            boxed(ConcreteType::String),
        ),
        set_tag(
            Expression::string_literal("myapp.count"),
            boxed(ConcreteType::String),
        ),
    ];

    assert!(!session.is_enabled());
    assert!(session.analyze(&unit(calls.clone())).is_empty());
    assert!(session.analyze_all(&[unit(calls)]).is_empty());
}

#[test]
fn malformed_document_disables_session() {
    for document in ["", "{", "[1, 2]", r#"{"attributes": "all"}"#, r#"{"version": "1"}"#] {
        let session = session(document);
        assert!(!session.is_enabled(), "{document}");

        let call = set_tag(
            Expression::string_literal("bogus.name"),
            boxed(ConcreteType::String),
        );
        assert!(session.analyze(&unit(vec![call])).is_empty());
    }
}

#[test]
fn project_facts_with_default_configuration() {
    let session = session(&fixture("semconv.json"));
    let facts = FactsDocument::parse(&fixture("checkout_facts.json")).unwrap();
    assert_eq!(facts.call_site_count(), 8);

    let diagnostics = session.analyze_all(&facts.files);
    let mut found: Vec<_> = diagnostics
        .iter()
        .map(|d| {
            (
                d.file.clone().unwrap_or_default(),
                d.span.line,
                d.rule,
                d.severity,
            )
        })
        .collect();
    found.sort();

    assert_eq!(
        found,
        vec![
            (
                "src/Checkout.cs".to_string(),
                13,
                RuleId::InvalidAttribute,
                DiagnosticSeverity::Error
            ),
            (
                "src/Checkout.cs".to_string(),
                14,
                RuleId::TypeMismatch,
                DiagnosticSeverity::Error
            ),
            (
                "src/Checkout.cs".to_string(),
                15,
                RuleId::DeprecatedAttribute,
                DiagnosticSeverity::Warning
            ),
            (
                "src/Inference.cs".to_string(),
                7,
                RuleId::ExperimentalAttribute,
                DiagnosticSeverity::Info
            ),
            (
                "src/Inference.cs".to_string(),
                8,
                RuleId::TypeMismatch,
                DiagnosticSeverity::Error
            ),
        ]
    );

    let list_mismatch = diagnostics
        .iter()
        .find(|d| d.rule == RuleId::TypeMismatch && d.span.line == 8)
        .unwrap();
    assert_eq!(
        list_mismatch.message(),
        "Attribute 'myapp.tags' expects a value of type 'string[]' but got 'System.Collections.Generic.List<string>'"
    );

    let field_mismatch = diagnostics
        .iter()
        .find(|d| d.rule == RuleId::TypeMismatch && d.span.line == 14)
        .unwrap();
    assert_eq!(field_mismatch.span.start, 329);
    assert_eq!(field_mismatch.attribute(), Some("http.response.status_code"));
}

#[test]
fn project_facts_with_strict_configuration() {
    let config = AnalyzerConfig::from_toml_str(&fixture("strict.toml")).unwrap();
    let session = AnalysisSession::new(Some(&fixture("semconv.json")), config);
    let facts = FactsDocument::parse(&fixture("checkout_facts.json")).unwrap();

    let diagnostics = session.analyze_all(&facts.files);
    assert_eq!(diagnostics.len(), 4);
    assert!(diagnostics
        .iter()
        .all(|d| d.severity == DiagnosticSeverity::Error));
    assert!(diagnostics
        .iter()
        .all(|d| d.rule != RuleId::ExperimentalAttribute));
}

#[test]
fn custom_tag_setter_from_configuration() {
    let config = AnalyzerConfig::from_toml_str(&fixture("strict.toml")).unwrap();
    let session = AnalysisSession::new(Some(MYAPP_COUNT), config);

    let mut call = set_tag(
        Expression::string_literal("myapp.cuont"),
        boxed(ConcreteType::I4),
    );
    call.callee_type = "MyCompany.Tracing.SpanWriter".to_string();
    call.callee_method = "Tag".to_string();

    let diagnostics = session.analyze(&unit(vec![call]));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].rule, RuleId::InvalidAttribute);
}

#[test]
fn alias_lookup_exposes_generated_names() {
    let registry = AttributeRegistry::build(&fixture("semconv.json")).unwrap();

    assert_eq!(registry.version(), "1.26.0");
    assert_eq!(registry.len(), 8);
    assert_eq!(
        registry.get_by_alias("HttpResponseStatusCode").map(|d| d.name.as_str()),
        Some("http.response.status_code")
    );
    assert_eq!(
        registry.get("db.query.parameter").map(|d| d.declared_type),
        Some(TypeTag::Unknown)
    );
}

#[test]
fn free_validate_uses_default_configuration() {
    let registry = AttributeRegistry::build(MYAPP_COUNT).unwrap();
    let calls = vec![
        set_tag(
            Expression::string_literal("myapp.count"),
            boxed(ConcreteType::U2),
        ),
        set_tag(
            Expression::string_literal("myapp.count"),
            boxed(ConcreteType::R8),
        ),
    ];

    let diagnostics = validate(&calls, &registry);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].arguments, vec!["myapp.count", "int", "double"]);
    assert_eq!(diagnostics[0].file, None);
}
