// tests/property_tests.rs

use std::collections::BTreeSet;

use esfilter::es::{self, Query};
use esfilter::{QueryRegistry, compile, to_postfix};
use esfilter::lexer::Lexer;
use proptest::prelude::*;

/// A generated expression and the fields it mentions.
#[derive(Debug, Clone)]
struct Expr {
    text: String,
    fields: BTreeSet<String>,
}

fn registry() -> QueryRegistry<Query> {
    ["a", "b", "c"]
        .into_iter()
        .fold(QueryRegistry::new(), |registry, field| {
            registry.with_field(field, es::range_generators())
        })
}

fn comparison() -> impl Strategy<Value = Expr> {
    (
        prop::sample::select(vec!["a", "b", "c"]),
        prop::sample::select(vec!["==", "!=", ">", ">=", "<", "<="]),
        -1000i64..1000,
        any::<bool>(),
    )
        .prop_map(|(field, op, value, reversed)| {
            let literal = if value < 0 {
                format!("-{}", value.unsigned_abs())
            } else {
                value.to_string()
            };
            let text = if reversed {
                format!("{literal} {op} {field}")
            } else {
                format!("{field} {op} {literal}")
            };
            Expr {
                text,
                fields: BTreeSet::from([field.to_string()]),
            }
        })
}

fn expression() -> impl Strategy<Value = Expr> {
    comparison().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["&&", "||"]), inner.clone()).prop_map(
                |(left, op, right)| Expr {
                    text: format!("{} {op} {}", left.text, right.text),
                    fields: left.fields.union(&right.fields).cloned().collect(),
                }
            ),
            inner.clone().prop_map(|e| Expr {
                text: format!("({})", e.text),
                fields: e.fields,
            }),
            inner.prop_map(|e| Expr {
                text: format!("!({})", e.text),
                fields: e.fields,
            }),
        ]
    })
}

proptest! {
    #[test]
    fn valid_expressions_compile(expr in expression()) {
        let (_, fields) = compile(&expr.text, &registry())
            .map_err(|e| TestCaseError::fail(format!("{}: {}", expr.text, e)))?;
        prop_assert_eq!(fields, expr.fields);
    }

    #[test]
    fn redundant_parentheses_do_not_change_the_query(expr in expression()) {
        let registry = registry();
        let (plain, _) = compile(&expr.text, &registry).unwrap();
        let (wrapped, _) = compile(&format!("(({}))", expr.text), &registry).unwrap();
        prop_assert_eq!(plain, wrapped);
    }

    #[test]
    fn postfix_has_no_parentheses(expr in expression()) {
        let tokens = Lexer::new(&expr.text).tokenize().unwrap();
        let postfix = to_postfix(tokens).unwrap();
        prop_assert!(postfix.iter().all(|t| !t.to_string().starts_with(['(', ')'])));
    }

    #[test]
    fn arbitrary_input_never_panics(input in "[ab=!<>&|()\"0-9 -]{0,24}") {
        let _ = compile(&input, &registry());
    }
}
