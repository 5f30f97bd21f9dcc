//! The fixed vocabulary of a condition: comparison tokens and logical operators.

/// Token of the `contains` pseudo-function. Matched case-insensitively.
pub const CONTAINS_TOKEN: &str = ".contains";

/// Comparison tokens in match priority order.
///
/// Two-character tokens come before their one-character prefixes so that
/// `30>=30` is never split on `>` first.
pub const CATALOG: [OperatorEntry; 9] = [
    OperatorEntry::new("==", ComparisonKind::Equals),
    OperatorEntry::new("!=", ComparisonKind::NotEquals),
    OperatorEntry::new(">=", ComparisonKind::GreaterEquals),
    OperatorEntry::new("<=", ComparisonKind::LessEquals),
    OperatorEntry::new(">", ComparisonKind::GreaterThan),
    OperatorEntry::new("<", ComparisonKind::LessThan),
    OperatorEntry::new(CONTAINS_TOKEN, ComparisonKind::Contains),
    OperatorEntry::new("true", ComparisonKind::True),
    OperatorEntry::new("false", ComparisonKind::False),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OperatorEntry {
    pub token: &'static str,
    pub kind: ComparisonKind,
}

impl OperatorEntry {
    const fn new(token: &'static str, kind: ComparisonKind) -> Self {
        Self { token, kind }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonKind {
    Equals,
    NotEquals,
    GreaterEquals,
    LessEquals,
    GreaterThan,
    LessThan,
    Contains,
    True,
    False,
}

impl ComparisonKind {
    /// Whether the kind is a boolean literal whose result ignores its operands.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(self, Self::True | Self::False)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn token(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }

    /// The value a fold over this operator starts from.
    #[inline]
    pub fn identity(self) -> bool {
        match self {
            Self::And => true,
            Self::Or => false,
        }
    }

    #[inline]
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a && b,
            Self::Or => a || b,
        }
    }
}
