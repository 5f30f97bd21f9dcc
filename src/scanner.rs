//! Extraction of parenthesised groups, innermost first.
//!
//! The argument list of a `.contains(...)` call is opaque: its parentheses
//! never open or close a group.
use crate::operators::CONTAINS_TOKEN;

/// Byte offsets of a matched `(` and `)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub open: usize,
    pub close: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group<'a> {
    /// `None` for the trailing group that stands for the whole input.
    pub span: Option<Span>,
    pub content: &'a str,
}

impl Group<'_> {
    #[inline]
    pub fn is_whole_input(&self) -> bool {
        self.span.is_none()
    }
}

#[derive(Debug)]
pub struct Scan<'a> {
    groups: Vec<Group<'a>>,
    unclosed: Vec<usize>,
    depth: usize,
}

impl<'a> Scan<'a> {
    /// Groups in the order their closing parenthesis appears, followed by
    /// the whole input.
    pub fn groups(&self) -> &[Group<'a>] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<Group<'a>> {
        self.groups
    }

    /// Positions of opening parentheses that were never closed, outermost first.
    pub fn unclosed(&self) -> &[usize] {
        &self.unclosed
    }

    /// Deepest nesting of grouping parentheses seen.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

pub fn scan(text: &str) -> Scan<'_> {
    let mut pending = Vec::new();
    let mut groups = Vec::new();
    let mut contains_open = false;
    let mut depth = 0;

    for (i, c) in text.char_indices() {
        // Checked before dispatch: `c` may be the `(` of the call itself.
        if follows_contains(text, i) {
            contains_open = true;
        }

        match c {
            '(' if !contains_open => {
                pending.push(i);
                depth = depth.max(pending.len());
            }
            ')' if contains_open => contains_open = false,
            ')' => {
                // An unmatched `)` is skipped.
                if let Some(open) = pending.pop() {
                    groups.push(Group {
                        span: Some(Span { open, close: i }),
                        content: &text[open + 1..i],
                    });
                }
            }
            _ => {}
        }
    }

    groups.push(Group {
        span: None,
        content: text,
    });

    Scan {
        groups,
        unclosed: pending,
        depth,
    }
}

fn follows_contains(text: &str, i: usize) -> bool {
    i >= CONTAINS_TOKEN.len()
        && text
            .get(i - CONTAINS_TOKEN.len()..i)
            .is_some_and(|preceding| preceding.eq_ignore_ascii_case(CONTAINS_TOKEN))
}
