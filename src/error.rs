use thiserror::Error;

/// Structural problems found while parsing a condition.
///
/// Positions are byte offsets into the condition text.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ConditionError {
    #[error("unbalanced condition parentheses: {opening} opening, {closing} closing")]
    UnbalancedParentheses { opening: usize, closing: usize },
    #[error("parenthesis opened at {position} is never closed")]
    UnclosedGroup { position: usize },
    #[error("closing parenthesis at {position} has no matching opening parenthesis")]
    StrayParenthesis { position: usize },
    #[error("missing `&&` or `||` before position {position}")]
    MissingOperator { position: usize },
    #[error("missing operand at position {position}")]
    MissingOperand { position: usize },
    #[error("parentheses nested {depth} levels deep, more than the {limit} allowed")]
    NestingTooDeep { depth: usize, limit: usize },
    #[error("unrecognized input at position {position}")]
    Lexer { position: usize },
}
