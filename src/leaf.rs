//! Evaluation of a single comparison such as `30 >= 30` or `Minecraft.Contains(Mine)`.
use crate::{
    operators::{ComparisonKind, CATALOG},
    scanner,
};
use tracing::trace;

/// Evaluates a leaf that holds no grouping parentheses and no `&&`/`||`.
///
/// A blank leaf is vacuously `true`. A leaf that matches no comparison token,
/// or an ordering comparison whose operands are not integers, is `false`.
pub fn evaluate_leaf(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return true;
    }

    let comparison = Comparison::parse(text);
    let result = comparison.as_ref().is_some_and(Comparison::evaluate);
    trace!(
        leaf = text,
        kind = ?comparison.map(|comparison| comparison.kind),
        result,
        "evaluated leaf"
    );
    result
}

/// A leaf split on the first catalog token that matches it.
///
/// Operands are trimmed and lower-cased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    pub kind: ComparisonKind,
    pub left: String,
    pub right: String,
}

impl Comparison {
    pub fn parse(text: &str) -> Option<Self> {
        let lowered = text.trim().to_lowercase();
        CATALOG.iter().find_map(|entry| {
            let segments: Vec<&str> = lowered
                .split(entry.token)
                .map(str::trim)
                .filter(|segment| !segment.is_empty())
                .collect();
            match segments.as_slice() {
                [left, right] => Some(Self {
                    kind: entry.kind,
                    left: left.to_string(),
                    right: right.to_string(),
                }),
                _ if entry.kind.is_literal() && lowered == entry.token => Some(Self {
                    kind: entry.kind,
                    left: String::new(),
                    right: String::new(),
                }),
                _ => None,
            }
        })
    }

    pub fn evaluate(&self) -> bool {
        match self.kind {
            ComparisonKind::Equals => self.left == self.right,
            ComparisonKind::NotEquals => self.left != self.right,
            ComparisonKind::GreaterEquals => self.compare_integers(|a, b| a >= b),
            ComparisonKind::LessEquals => self.compare_integers(|a, b| a <= b),
            ComparisonKind::GreaterThan => self.compare_integers(|a, b| a > b),
            ComparisonKind::LessThan => self.compare_integers(|a, b| a < b),
            ComparisonKind::Contains => {
                needle(&self.right).is_some_and(|needle| self.left.contains(needle))
            }
            ComparisonKind::True => true,
            ComparisonKind::False => false,
        }
    }

    fn compare_integers<F>(&self, f: F) -> bool
    where
        F: FnOnce(i32, i32) -> bool,
    {
        match (self.left.parse::<i32>(), self.right.parse::<i32>()) {
            (Ok(a), Ok(b)) => f(a, b),
            _ => false,
        }
    }
}

/// The content of the outermost parenthesised group of a `contains` argument.
fn needle(argument: &str) -> Option<&str> {
    scanner::scan(argument)
        .into_groups()
        .into_iter()
        .rev()
        .find(|group| !group.is_whole_input())
        .map(|group| group.content)
}
