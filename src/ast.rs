use crate::{leaf, operators::LogicalOperator, reducer};

/// A parsed condition. Leaves keep their raw comparison text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf(String),
    Group(Group),
}

/// The members of one pair of parentheses and the operators between them.
///
/// `links[i]` joins `members[i]` and `members[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    /// First operator found in the group. A group without `&&`/`||` takes
    /// the operator of the group built just before it.
    pub operator: LogicalOperator,
    pub members: Vec<Node>,
    pub links: Vec<LogicalOperator>,
}

impl Node {
    pub fn leaf(text: &str) -> Self {
        Self::Leaf(text.to_string())
    }

    pub fn evaluate(&self) -> bool {
        match self {
            Self::Leaf(text) => leaf::evaluate_leaf(text),
            Self::Group(group) => group.evaluate(),
        }
    }
}

impl Group {
    pub fn evaluate(&self) -> bool {
        match self.members.split_first() {
            Some((first, rest)) => reducer::combine_chain(
                first.evaluate(),
                self.links
                    .iter()
                    .copied()
                    .zip(rest.iter().map(Node::evaluate)),
            ),
            None => reducer::combine([], self.operator),
        }
    }
}
