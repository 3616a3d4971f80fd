use std::{collections::HashMap, fmt, sync::LazyLock};

/// Operators understood by the filter language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Placeholder for atomic values; binds tightest.
    Value,

    // Comparison
    /// Equal (`==`)
    Eq,
    /// Not equal (`!=`)
    Neq,
    /// Greater than (`>`)
    Gt,
    /// Less than (`<`)
    Lt,
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than or equal (`<=`)
    Lte,

    // Logical
    /// Logical AND (`&&`)
    And,
    /// Logical OR (`||`)
    Or,

    // Prefix
    /// Numeric negation (`-`)
    Negate,
    /// Boolean inversion (`!`)
    Invert,
    /// Bitwise complement (`~`)
    BitwiseNot,
}

/// Binding strength of an operator, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    LogicalOr,
    LogicalAnd,
    Comparator,
    Prefix,
    Value,
}

impl Operator {
    pub fn precedence(self) -> Precedence {
        match self {
            Operator::Value => Precedence::Value,
            Operator::Eq
            | Operator::Neq
            | Operator::Gt
            | Operator::Lt
            | Operator::Gte
            | Operator::Lte => Precedence::Comparator,
            Operator::And => Precedence::LogicalAnd,
            Operator::Or => Precedence::LogicalOr,
            Operator::Negate | Operator::Invert | Operator::BitwiseNot => Precedence::Prefix,
        }
    }

    pub fn is_comparator(self) -> bool {
        self.precedence() == Precedence::Comparator
    }

    /// Mirrors an ordering comparator for when the field sits on the right
    /// (`5 < x` means `x > 5`). Every other operator is returned unchanged.
    pub fn flip(self) -> Operator {
        match self {
            Operator::Lt => Operator::Gt,
            Operator::Gt => Operator::Lt,
            Operator::Lte => Operator::Gte,
            Operator::Gte => Operator::Lte,
            other => other,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Value => "value",
            Operator::Eq => "=",
            Operator::Neq => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Negate => "-",
            Operator::Invert => "!",
            Operator::BitwiseNot => "~",
        };
        f.write_str(symbol)
    }
}

/// Surface symbols of every comparator.
pub static COMPARATOR_SYMBOLS: LazyLock<HashMap<&'static str, Operator>> = LazyLock::new(|| {
    HashMap::from([
        ("==", Operator::Eq),
        ("!=", Operator::Neq),
        (">", Operator::Gt),
        (">=", Operator::Gte),
        ("<", Operator::Lt),
        ("<=", Operator::Lte),
    ])
});

pub static LOGICAL_SYMBOLS: LazyLock<HashMap<&'static str, Operator>> =
    LazyLock::new(|| HashMap::from([("&&", Operator::And), ("||", Operator::Or)]));

/// Every binary operator symbol: comparators and logical operators.
pub static OPERATOR_SYMBOLS: LazyLock<HashMap<&'static str, Operator>> = LazyLock::new(|| {
    COMPARATOR_SYMBOLS
        .iter()
        .chain(LOGICAL_SYMBOLS.iter())
        .map(|(symbol, op)| (*symbol, *op))
        .collect()
});

pub static PREFIX_SYMBOLS: LazyLock<HashMap<&'static str, Operator>> = LazyLock::new(|| {
    HashMap::from([
        ("-", Operator::Negate),
        ("!", Operator::Invert),
        ("~", Operator::BitwiseNot),
    ])
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(Operator::Or.precedence() < Operator::And.precedence());
        assert!(Operator::And.precedence() < Operator::Eq.precedence());
        assert!(Operator::Lte.precedence() < Operator::Negate.precedence());
        assert!(Operator::Invert.precedence() < Operator::Value.precedence());
    }

    #[test]
    fn test_comparators_share_precedence() {
        for op in COMPARATOR_SYMBOLS.values() {
            assert_eq!(op.precedence(), Precedence::Comparator, "{op}");
        }
    }

    #[test]
    fn test_flip() {
        assert_eq!(Operator::Lt.flip(), Operator::Gt);
        assert_eq!(Operator::Gte.flip(), Operator::Lte);
        assert_eq!(Operator::Eq.flip(), Operator::Eq);
        assert_eq!(Operator::Neq.flip(), Operator::Neq);
    }

    #[test]
    fn test_canonical_display() {
        assert_eq!(Operator::Eq.to_string(), "=");
        assert_eq!(Operator::Or.to_string(), "||");
        assert_eq!(Operator::BitwiseNot.to_string(), "~");
    }

    #[test]
    fn test_operator_symbols_cover_binary_operators() {
        assert_eq!(OPERATOR_SYMBOLS.len(), 8);
        assert_eq!(OPERATOR_SYMBOLS.get("&&"), Some(&Operator::And));
        assert_eq!(OPERATOR_SYMBOLS.get("<="), Some(&Operator::Lte));
        assert!(OPERATOR_SYMBOLS.get("-").is_none());
    }
}
