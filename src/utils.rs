//! UCT arithmetic shared by the selection policy and the driver
//!
//! Visit counts are real numbers because a drawn rollout adds half a visit.

/// Calculates the exploitation term of UCT
///
/// This is the win ratio `Q/N`, or 0 for an unvisited node.
pub fn exploitation_term(wins: f64, visits: f64) -> f64 {
    if visits <= 0.0 {
        return 0.0;
    }
    wins / visits
}

/// Calculates the unscaled exploration term `sqrt(ln(parent_visits) / visits)`
///
/// Defined as 0 when either count is 0. Parent counts below one visit
/// (a single drawn rollout) also give 0 instead of the square root of a
/// negative logarithm, so the result is always finite.
pub fn exploration_term(parent_visits: f64, visits: f64) -> f64 {
    if visits <= 0.0 || parent_visits <= 0.0 {
        return 0.0;
    }
    (parent_visits.ln().max(0.0) / visits).sqrt()
}

/// Calculates the UCT score of a child
///
/// ```text
/// UCT = Q/N + c * sqrt(ln(parent N) / N)
/// ```
///
/// # Example
///
/// ```
/// use uct_mcts::utils::uct_value;
///
/// // Unvisited children score exactly 0
/// assert_eq!(uct_value(0.0, 0.0, 10.0, 1.141), 0.0);
/// assert!(uct_value(3.0, 4.0, 10.0, 1.141) > 0.75);
/// ```
pub fn uct_value(wins: f64, visits: f64, parent_visits: f64, exploration_constant: f64) -> f64 {
    exploitation_term(wins, visits)
        + exploration_constant * exploration_term(parent_visits, visits)
}

/// Returns the index of the first maximum in `values`
///
/// Ties go to the earliest index. Returns `None` for an empty iterator.
pub fn argmax_first<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, value) in values.into_iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}
