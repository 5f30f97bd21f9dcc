use crate::{ast::Node, error::ConditionError, parser};
use std::{convert::Infallible, fmt, str::FromStr};
use tracing::{debug, error, warn};

/// Evaluates a notification condition whose placeholders are already substituted.
///
/// An absent or empty condition is `true`. Every structural error is `false`:
/// unbalanced parentheses are logged at error level, any other malformed
/// structure at warn level.
pub fn evaluate<'a>(condition: impl Into<Option<&'a str>>) -> bool {
    let Some(condition) = condition.into().filter(|condition| !condition.is_empty()) else {
        return true;
    };

    let result = match parser::parse(condition) {
        Ok(tree) => tree.evaluate(),
        Err(ConditionError::UnbalancedParentheses { opening, closing }) => {
            error!(condition, opening, closing, "unbalanced condition parentheses");
            false
        }
        Err(err) => {
            warn!(condition, error = %err, "malformed condition");
            false
        }
    };
    debug!(condition, result, "evaluated condition");
    result
}

/// The condition attached to a notification rule.
///
/// The default condition is empty and always passes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Condition(String);

impl Condition {
    pub fn new(condition: impl Into<String>) -> Self {
        Self(condition.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn evaluate(&self) -> bool {
        evaluate(self.as_str())
    }

    /// Parses the condition without evaluating it, e.g. to reject a broken
    /// condition when the configuration is loaded. `None` when empty.
    pub fn parse(&self) -> Result<Option<Node>, ConditionError> {
        if self.is_empty() {
            return Ok(None);
        }
        parser::parse(&self.0).map(Some)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Condition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Condition {
    fn from(condition: &str) -> Self {
        Self::new(condition)
    }
}

impl From<String> for Condition {
    fn from(condition: String) -> Self {
        Self(condition)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

// `null` reads as the empty condition.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let condition = <Option<String> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self(condition.unwrap_or_default()))
    }
}
