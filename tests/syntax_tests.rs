// tests/syntax_tests.rs

use esfilter::lexer::Lexer;
use esfilter::syntax::{SyntaxError, check_syntax};

fn check(input: &str) -> Result<(), SyntaxError> {
    let tokens = Lexer::new(input).tokenize().unwrap();
    check_syntax(&tokens)
}

// ============================================================================
// Accepted Sequences
// ============================================================================

#[test]
fn test_valid_expressions() {
    let test_cases = vec![
        "a == 1",
        "a != 'x' && b > 2",
        r#"ip != "1.1.1.1" || ("2.2.2.2" > ip && "x" == title)"#,
        "(a == 1)",
        "((a == 1)) || b == true",
        "a == -1",
        "!(a == 1)",
        "a >= ~3",
        r#"ts < "2024-03-01""#,
        "a",
        "()",
    ];

    for input in test_cases {
        assert_eq!(check(input), Ok(()), "Failed for input: {}", input);
    }
}

#[test]
fn test_chained_comparison_passes_validation() {
    assert_eq!(check("a == b == c"), Ok(()));
}

// ============================================================================
// Rejected Sequences
// ============================================================================

#[test]
fn test_undefined_function() {
    let err = check("foo(1)").unwrap_err();
    assert_eq!(err, SyntaxError::UndefinedFunction("foo".to_string()));
    assert_eq!(err.to_string(), "undefined function `foo`");
}

#[test]
fn test_undefined_function_mid_expression() {
    assert_eq!(
        check("a == 1 && len(b) > 2"),
        Err(SyntaxError::UndefinedFunction("len".to_string()))
    );
}

#[test]
fn test_leading_operator() {
    assert_eq!(
        check("== 1"),
        Err(SyntaxError::InvalidTransition {
            from: "unknown []".to_string(),
            to: "comparator [==]".to_string(),
        })
    );
    assert_eq!(
        check("&& a"),
        Err(SyntaxError::InvalidTransition {
            from: "unknown []".to_string(),
            to: "logical [&&]".to_string(),
        })
    );
}

#[test]
fn test_adjacent_values() {
    assert_eq!(
        check("a == 1 1"),
        Err(SyntaxError::InvalidTransition {
            from: "numeric [1]".to_string(),
            to: "numeric [1]".to_string(),
        })
    );
    assert_eq!(
        check("a b"),
        Err(SyntaxError::InvalidTransition {
            from: "variable [a]".to_string(),
            to: "variable [b]".to_string(),
        })
    );
}

#[test]
fn test_adjacent_operators() {
    assert_eq!(
        check("a == && b"),
        Err(SyntaxError::InvalidTransition {
            from: "comparator [==]".to_string(),
            to: "logical [&&]".to_string(),
        })
    );
}

#[test]
fn test_prefix_targets() {
    assert_eq!(
        check("a == --1"),
        Err(SyntaxError::InvalidTransition {
            from: "prefix [-]".to_string(),
            to: "prefix [-]".to_string(),
        })
    );
    assert_eq!(
        check(r#"a == -"x""#),
        Err(SyntaxError::InvalidTransition {
            from: "prefix [-]".to_string(),
            to: r#"string ["x"]"#.to_string(),
        })
    );
}

#[test]
fn test_transition_message() {
    let err = check("a == 1 1").unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot transition from numeric [1] to numeric [1]"
    );
}

// ============================================================================
// End of Input
// ============================================================================

#[test]
fn test_unexpected_end() {
    let test_cases = vec!["", "a ==", "a == 1 &&", "(", "a == -", "!"];

    for input in test_cases {
        assert_eq!(
            check(input),
            Err(SyntaxError::UnexpectedEnd),
            "Failed for input: {}",
            input
        );
    }
}
