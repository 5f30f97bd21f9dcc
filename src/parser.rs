use crate::{
    ast::{Group, Node},
    error::ConditionError,
    lexer::Lexer,
    operators::LogicalOperator,
    scanner::{self, Span},
};
use std::ops::Range;

/// How deeply grouping parentheses may nest in one condition.
pub const MAX_DEPTH: usize = 256;

/// Parses a condition into a tree rooted at the group that wraps the whole input.
///
/// The condition is wrapped in one extra pair of parentheses and scanned
/// innermost first; each group is built once all of its sub-groups are.
pub fn parse(input: &str) -> Result<Node, ConditionError> {
    check_balance(input)?;

    let wrapped = format!("({input})");
    let scan = scanner::scan(&wrapped);
    if let Some(&open) = scan.unclosed().last() {
        return Err(ConditionError::UnclosedGroup {
            position: input_position(open),
        });
    }
    // The wrapping parenthesis is one level of its own.
    let depth = scan.depth().saturating_sub(1);
    if depth > MAX_DEPTH {
        return Err(ConditionError::NestingTooDeep {
            depth,
            limit: MAX_DEPTH,
        });
    }

    let mut builder = TreeBuilder::new(&wrapped);
    for span in scan.groups().iter().filter_map(|group| group.span) {
        builder.close(span)?;
    }
    builder.finish()
}

/// Fails when the number of `(` differs from the number of `)`.
pub fn check_balance(input: &str) -> Result<(), ConditionError> {
    let (opening, closing) = input.chars().fold((0, 0), |(opening, closing), c| match c {
        '(' => (opening + 1, closing),
        ')' => (opening, closing + 1),
        _ => (opening, closing),
    });

    if opening == closing {
        Ok(())
    } else {
        Err(ConditionError::UnbalancedParentheses { opening, closing })
    }
}

// Offsets in the wrapped text are one past the same offset in the input.
#[inline]
fn input_position(position: usize) -> usize {
    position.saturating_sub(1)
}

fn push_text(pieces: &mut Vec<Piece>, range: Range<usize>) {
    if let Some(Piece::Text(text)) = pieces.last_mut() {
        if text.end == range.start {
            text.end = range.end;
            return;
        }
    }
    pieces.push(Piece::Text(range));
}

enum Piece {
    Text(Range<usize>),
    Operator(LogicalOperator, usize),
    Group(Span, Node),
}

struct TreeBuilder<'a> {
    source: &'a str,
    completed: Vec<(Span, Node)>,
    last_operator: LogicalOperator,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            completed: vec![],
            last_operator: LogicalOperator::And,
        }
    }

    fn close(&mut self, span: Span) -> Result<(), ConditionError> {
        if span.open == 0 && span.close != self.source.len() - 1 {
            return Err(ConditionError::StrayParenthesis {
                position: input_position(span.close),
            });
        }

        // Groups arrive in closing order, so the sub-groups of `span` are the
        // completed groups that opened after it.
        let start = self
            .completed
            .iter()
            .rposition(|(child, _)| child.open < span.open)
            .map_or(0, |i| i + 1);
        let children = self.completed.split_off(start);

        let pieces = self.pieces(span, children)?;
        let group = self.assemble(span, pieces)?;
        self.completed.push((span, Node::Group(group)));
        Ok(())
    }

    fn pieces(
        &self,
        span: Span,
        children: Vec<(Span, Node)>,
    ) -> Result<Vec<Piece>, ConditionError> {
        let mut pieces = vec![];
        let mut cursor = span.open + 1;
        for (child, node) in children {
            self.lex(cursor..child.open, &mut pieces)?;
            pieces.push(Piece::Group(child, node));
            cursor = child.close + 1;
        }
        self.lex(cursor..span.close, &mut pieces)?;

        Ok(pieces)
    }

    fn lex(&self, range: Range<usize>, pieces: &mut Vec<Piece>) -> Result<(), ConditionError> {
        for token in Lexer::with_offset(&self.source[range.clone()], range.start) {
            let (start, token, end) = token.map_err(|error| ConditionError::Lexer {
                position: input_position(error.position),
            })?;
            match token.operator() {
                Some(operator) => pieces.push(Piece::Operator(operator, start)),
                None => push_text(pieces, start..end),
            }
        }
        Ok(())
    }

    fn assemble(&mut self, span: Span, pieces: Vec<Piece>) -> Result<Group, ConditionError> {
        let mut members = vec![];
        let mut links = vec![];
        // The operator still waiting for its right operand.
        let mut dangling = None;

        for piece in pieces {
            let expecting_member = members.len() == links.len();
            match piece {
                Piece::Operator(operator, position) => {
                    if expecting_member {
                        return Err(ConditionError::MissingOperand {
                            position: input_position(position),
                        });
                    }
                    links.push(operator);
                    dangling = Some(position);
                }
                Piece::Text(range) if self.is_blank(&range) => {}
                Piece::Text(range) => {
                    if !expecting_member {
                        return Err(ConditionError::MissingOperator {
                            position: input_position(range.start),
                        });
                    }
                    members.push(Node::leaf(self.source[range].trim()));
                    dangling = None;
                }
                Piece::Group(child, node) => {
                    if !expecting_member {
                        return Err(ConditionError::MissingOperator {
                            position: input_position(child.open),
                        });
                    }
                    members.push(node);
                    dangling = None;
                }
            }
        }

        if let Some(position) = dangling {
            return Err(ConditionError::MissingOperand {
                position: input_position(position),
            });
        }
        if members.is_empty() {
            // Only a blank condition leaves the wrapping group empty.
            if span.open != 0 {
                return Err(ConditionError::MissingOperand {
                    position: input_position(span.open),
                });
            }
            members.push(Node::leaf(""));
        }

        let operator = links.first().copied().unwrap_or(self.last_operator);
        self.last_operator = operator;
        Ok(Group {
            operator,
            members,
            links,
        })
    }

    fn is_blank(&self, range: &Range<usize>) -> bool {
        self.source[range.clone()].trim().is_empty()
    }

    fn finish(mut self) -> Result<Node, ConditionError> {
        match self.completed.pop() {
            Some((span, node)) if span.open == 0 && self.completed.is_empty() => Ok(node),
            Some((span, _)) => Err(ConditionError::StrayParenthesis {
                position: input_position(span.open),
            }),
            None => Err(ConditionError::UnclosedGroup { position: 0 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LogicalOperator::{And, Or};

    fn group(operator: LogicalOperator, members: Vec<Node>, links: Vec<LogicalOperator>) -> Node {
        Node::Group(Group {
            operator,
            members,
            links,
        })
    }

    fn root(parsed: Node) -> Group {
        match parsed {
            Node::Group(group) => group,
            Node::Leaf(leaf) => panic!("expected a group, got leaf {leaf:?}"),
        }
    }

    #[test]
    fn can_parse_a_single_leaf() {
        let parsed = parse("30 >= 30");

        assert_eq!(
            Ok(group(And, vec![Node::leaf("30 >= 30")], vec![])),
            parsed
        );
    }

    #[test]
    fn can_parse_empty_input_as_a_blank_leaf() {
        assert_eq!(Ok(group(And, vec![Node::leaf("")], vec![])), parse(""));
    }

    #[test]
    fn can_parse_a_flat_chain() {
        let parsed = parse("a == b && c != d || e.contains(f)");

        assert_eq!(
            Ok(group(
                And,
                vec![
                    Node::leaf("a == b"),
                    Node::leaf("c != d"),
                    Node::leaf("e.contains(f)"),
                ],
                vec![And, Or],
            )),
            parsed
        );
    }

    #[test]
    fn can_parse_nested_groups() {
        let parsed = parse("(30 > 30 && 1 == 1) || (2 == 2)");

        assert_eq!(
            Ok(group(
                Or,
                vec![
                    group(
                        And,
                        vec![Node::leaf("30 > 30"), Node::leaf("1 == 1")],
                        vec![And],
                    ),
                    group(And, vec![Node::leaf("2 == 2")], vec![]),
                ],
                vec![Or],
            )),
            parsed
        );
    }

    #[test]
    fn can_parse_contains_calls_as_leaves() {
        let parsed = parse("(Minecraft.Contains(Mine) || x == y)");

        assert_eq!(
            Ok(group(
                Or,
                vec![group(
                    Or,
                    vec![Node::leaf("Minecraft.Contains(Mine)"), Node::leaf("x == y")],
                    vec![Or],
                )],
                vec![],
            )),
            parsed
        );
    }

    #[test]
    fn operators_inside_contains_arguments_do_not_split_the_leaf() {
        let parsed = root(parse("title.contains(a && b)").unwrap());

        assert_eq!(vec![Node::leaf("title.contains(a && b)")], parsed.members);
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn can_parse_blank_input_as_a_blank_leaf() {
        assert_eq!(Ok(group(And, vec![Node::leaf("")], vec![])), parse("   "));
    }

    #[test]
    fn return_an_error_on_an_empty_group() {
        assert_eq!(
            Err(ConditionError::MissingOperand { position: 0 }),
            parse("()")
        );
        assert_eq!(
            Err(ConditionError::MissingOperand { position: 9 }),
            parse("false || ( )")
        );
    }

    #[test]
    fn return_an_error_on_an_operator_without_a_left_operand() {
        assert_eq!(
            Err(ConditionError::MissingOperand { position: 0 }),
            parse("&&")
        );
        assert_eq!(
            Err(ConditionError::MissingOperand { position: 0 }),
            parse("|| 1 == 2")
        );
        assert_eq!(
            Err(ConditionError::MissingOperand { position: 6 }),
            parse("a && (|| b)")
        );
    }

    #[test]
    fn return_an_error_on_an_operator_without_a_right_operand() {
        assert_eq!(
            Err(ConditionError::MissingOperand { position: 6 }),
            parse("false ||")
        );
        assert_eq!(
            Err(ConditionError::MissingOperand { position: 5 }),
            parse("true &&  ")
        );
        assert_eq!(
            Err(ConditionError::MissingOperand { position: 5 }),
            parse("a && && b")
        );
    }

    #[test]
    fn can_parse_the_deepest_allowed_nesting() {
        let condition = format!("{}true{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));

        assert!(parse(&condition).is_ok_and(|tree| tree.evaluate()));
    }

    #[test]
    fn return_an_error_on_too_deep_nesting() {
        let condition = format!("{}true{}", "(".repeat(10_000), ")".repeat(10_000));

        assert_eq!(
            Err(ConditionError::NestingTooDeep {
                depth: 10_000,
                limit: MAX_DEPTH
            }),
            parse(&condition)
        );
    }

    // A group without `&&`/`||` is tagged with the operator of the group
    // built just before it, in innermost-first order. The tag never changes
    // the result of a group with a single member.
    #[test]
    fn a_group_without_operators_inherits_the_last_seen_operator() {
        let parsed = root(parse("(a == a || b == c) && (d == d)").unwrap());

        assert_eq!(And, parsed.operator);
        assert_eq!(
            group(Or, vec![Node::leaf("d == d")], vec![]),
            parsed.members[1]
        );
    }

    #[test]
    fn the_first_group_without_operators_defaults_to_and() {
        let parsed = root(parse("(d == d) || (a == a)").unwrap());

        assert_eq!(
            group(And, vec![Node::leaf("d == d")], vec![]),
            parsed.members[0]
        );
    }

    #[test]
    fn can_parse_mixed_operators_in_one_group() {
        let parsed = root(parse("true || false && false").unwrap());

        assert_eq!(Or, parsed.operator);
        assert_eq!(vec![Or, And], parsed.links);
    }

    #[test]
    fn return_an_error_on_unbalanced_parentheses() {
        assert_eq!(
            Err(ConditionError::UnbalancedParentheses {
                opening: 1,
                closing: 0
            }),
            parse("(")
        );
        assert_eq!(
            Err(ConditionError::UnbalancedParentheses {
                opening: 0,
                closing: 1
            }),
            parse(")")
        );
    }

    #[test]
    fn return_an_error_on_a_stray_closing_parenthesis() {
        assert_eq!(
            Err(ConditionError::StrayParenthesis { position: 0 }),
            parse(")a(")
        );
    }

    #[test]
    fn return_an_error_when_contains_swallows_a_closing_parenthesis() {
        assert!(matches!(
            parse("(title.contains x) && y"),
            Err(ConditionError::UnclosedGroup { .. })
        ));
    }

    #[test]
    fn return_an_error_when_a_group_follows_text_without_an_operator() {
        assert_eq!(
            Err(ConditionError::MissingOperator { position: 2 }),
            parse("a (b == b)")
        );
    }

    #[test]
    fn return_an_error_when_text_follows_a_group_without_an_operator() {
        assert_eq!(
            Err(ConditionError::MissingOperator { position: 8 }),
            parse("(b == b) a")
        );
    }

    #[test]
    fn return_an_error_on_adjacent_groups() {
        assert_eq!(
            Err(ConditionError::MissingOperator { position: 4 }),
            parse("(a) (b)")
        );
    }

    #[test]
    fn can_check_balance() {
        assert!(check_balance("((a) && (b))").is_ok());
        assert!(check_balance(")(").is_ok());
        assert!(check_balance("(()").is_err());
    }
}
