use crate::operators::LogicalOperator;
use logos::{Logos, SpannedIter};

pub type Spanned<Tok, Loc, Error> = Result<(Loc, Tok, Loc), Error>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexicalError {
    pub position: usize,
}

/// Tokens of the text found between parenthesised groups.
///
/// Everything that is not a logical operator is leaf text. A `.contains(...)`
/// call is a single token so that operators inside its argument list never
/// split the leaf.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    #[regex(r"\.contains\s*\([^)]*\)", ignore(ascii_case))]
    ContainsCall,
    #[regex(r"[^&|.]+")]
    Text,
    #[token("&")]
    #[token("|")]
    #[token(".")]
    Symbol,
}

impl Token {
    /// The logical operator this token stands for, `None` for leaf text.
    #[inline]
    pub fn operator(self) -> Option<LogicalOperator> {
        match self {
            Self::And => Some(LogicalOperator::And),
            Self::Or => Some(LogicalOperator::Or),
            Self::ContainsCall | Self::Text | Self::Symbol => None,
        }
    }
}

pub struct Lexer<'input> {
    token_stream: SpannedIter<'input, Token>,
    offset: usize,
}

impl<'input> Lexer<'input> {
    /// Lexes `input` as a slice that starts at `offset` in a larger source.
    pub fn with_offset(input: &'input str, offset: usize) -> Self {
        Self {
            token_stream: Token::lexer(input).spanned(),
            offset,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Spanned<Token, usize, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.token_stream.next().map(|(token, span)| {
            let start = span.start + self.offset;
            let end = span.end + self.offset;
            token
                .map(|token| (start, token, end))
                .map_err(|_| LexicalError { position: start })
        })
    }
}
