use crate::operators::LogicalOperator;
use itertools::Itertools;

/// Folds `parts` with `operator`: `And` starts from `true`, `Or` from `false`.
pub fn combine<I>(parts: I, operator: LogicalOperator) -> bool
where
    I: IntoIterator<Item = bool>,
{
    parts
        .into_iter()
        .fold(operator.identity(), |acc, part| operator.apply(acc, part))
}

/// Combines `first` with each linked value strictly left to right, without
/// operator precedence: `a && b || c` is `(a && b) || c`.
///
/// Runs of links sharing one operator are folded with [`combine`].
pub fn combine_chain<I>(first: bool, links: I) -> bool
where
    I: IntoIterator<Item = (LogicalOperator, bool)>,
{
    let runs = links.into_iter().chunk_by(|(operator, _)| *operator);
    runs.into_iter().fold(first, |acc, (operator, run)| {
        combine(
            std::iter::once(acc).chain(run.map(|(_, part)| part)),
            operator,
        )
    })
}
