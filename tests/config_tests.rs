// tests/config_tests.rs

use esfilter::cli::{self, CheckOptions, CheckResult, CliError};
use esfilter::config::FieldType;
use esfilter::{ConfigError, Error, ErrorKind, Operator, RegistryConfig, compile};
use serde_json::json;

const REGISTRY: &str = r#"{
    "fields": {
        "ip": { "type": "range", "target": "nest.ip", "nested": "nest" },
        "title": { "type": "match" },
        "body": { "type": "match_phrase" },
        "organization": { "type": "term", "target": "org" },
        "port": { "type": "range", "operators": [">", ">="] }
    }
}"#;

fn config() -> RegistryConfig {
    RegistryConfig::from_json(REGISTRY).unwrap()
}

// ============================================================================
// Registry Descriptions
// ============================================================================

#[test]
fn test_parse_description() {
    let config = config();
    assert_eq!(config.fields.len(), 5);
    assert_eq!(config.fields["ip"].field_type, FieldType::Range);
    assert_eq!(config.fields["ip"].nested.as_deref(), Some("nest"));
    assert_eq!(config.fields["body"].field_type, FieldType::MatchPhrase);
    assert_eq!(config.fields["title"].target, None);
}

#[test]
fn test_into_registry() {
    let registry = config().into_registry().unwrap();

    assert!(registry.generator("ip", Operator::Lt).is_some());
    assert!(registry.generator("ip", Operator::Eq).unwrap().is_nested());
    assert!(registry.generator("title", Operator::Eq).is_some());
    assert!(registry.generator("title", Operator::Gt).is_none());
    assert_eq!(
        registry.generator("organization", Operator::Eq).unwrap().target("organization"),
        "org"
    );
}

#[test]
fn test_operator_filter() {
    let registry = config().into_registry().unwrap();
    assert!(registry.generator("port", Operator::Gt).is_some());
    assert!(registry.generator("port", Operator::Gte).is_some());
    assert!(registry.generator("port", Operator::Eq).is_none());

    let err = compile("port < 10", &registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FieldResolution);
}

#[test]
fn test_match_phrase_json() {
    let registry = config().into_registry().unwrap();
    let (query, _) = compile(r#"body == "quick fox""#, &registry).unwrap();
    assert_eq!(
        query.to_json()["bool"]["should"][0],
        json!({ "match_phrase": { "body": { "query": "quick fox" } } })
    );
}

#[test]
fn test_unknown_field_type() {
    let result = RegistryConfig::from_json(r#"{ "fields": { "a": { "type": "fuzzy" } } }"#);
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn test_unknown_key_rejected() {
    let result =
        RegistryConfig::from_json(r#"{ "fields": { "a": { "type": "term", "boost": 2 } } }"#);
    assert!(matches!(result, Err(ConfigError::Json(_))));
}

#[test]
fn test_unknown_operator_symbol() {
    let config = RegistryConfig::from_json(
        r#"{ "fields": { "a": { "type": "range", "operators": ["=~"] } } }"#,
    )
    .unwrap();
    let err = config.into_registry().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownOperator { ref field, ref symbol } if field == "a" && symbol == "=~"
    ));
    assert_eq!(err.to_string(), "unknown comparator `=~` for field `a`");
}

#[test]
fn test_missing_file() {
    let result = RegistryConfig::from_path(std::path::Path::new("/nonexistent/registry.json"));
    let err = Error::from(result.unwrap_err());
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

// ============================================================================
// CLI Check
// ============================================================================

#[test]
fn test_check_success() {
    let options = CheckOptions {
        expression: r#"organization == "baidu" && port > 80"#.to_string(),
        registry: Some(config()),
        syntax_only: false,
    };

    match cli::execute_check(&options).unwrap() {
        CheckResult::Success(output) => {
            assert_eq!(output["fields"], json!(["organization", "port"]));
            assert!(output["query"]["bool"]["must"].is_array());
        }
        other => panic!("expected a compiled query, got {:?}", other),
    }
}

#[test]
fn test_check_syntax_only() {
    let options = CheckOptions {
        expression: "unknown_field == 1".to_string(),
        registry: None,
        syntax_only: true,
    };
    assert!(matches!(
        cli::execute_check(&options).unwrap(),
        CheckResult::SyntaxValid
    ));
}

#[test]
fn test_check_syntax_only_reports_errors() {
    let options = CheckOptions {
        expression: "(a == 1".to_string(),
        syntax_only: true,
        ..Default::default()
    };
    let err = cli::execute_check(&options).unwrap_err();
    assert!(matches!(err, CliError::Compile(ref e) if e.kind() == ErrorKind::Grouping));
}

#[test]
fn test_check_requires_registry() {
    let options = CheckOptions {
        expression: "a == 1".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        cli::execute_check(&options),
        Err(CliError::NoRegistry)
    ));
}

#[test]
fn test_check_empty_expression() {
    let options = CheckOptions {
        expression: "  \n".to_string(),
        registry: Some(config()),
        syntax_only: false,
    };
    assert!(matches!(cli::execute_check(&options), Err(CliError::NoInput)));
}

#[test]
fn test_check_compile_error_message() {
    let options = CheckOptions {
        expression: r#"ip == "1.1.1.1" && missing == 1"#.to_string(),
        registry: Some(config()),
        syntax_only: false,
    };
    let err = cli::execute_check(&options).unwrap_err();
    assert_eq!(err.to_string(), "build error: field `missing` not supported");
}

// ============================================================================
// CLI Explain
// ============================================================================

#[test]
fn test_explain() {
    let explanation = cli::explain("!(a == 1) || b > -2").unwrap();
    let postfix: Vec<String> = explanation.postfix.iter().map(|t| t.to_string()).collect();
    assert_eq!(postfix, ["a", "1", "==", "!", "b", "2", "-", ">", "||"]);
    assert_eq!(explanation.tokens.len(), 11);

    let text = explanation.to_string();
    assert!(text.starts_with("tokens:\n"));
    assert!(text.contains("postfix:\n  a 1 == ! b 2 - > ||\n"));
}

#[test]
fn test_explain_rejects_invalid_input() {
    let err = cli::explain("foo(1)").unwrap_err();
    assert_eq!(err.to_string(), "syntax error: undefined function `foo`");
}
