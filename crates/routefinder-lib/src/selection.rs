use crate::node::SearchNode;

/// Pick the best and second-best solutions of a run.
///
/// Solutions are ranked by `(cost, hops, path length)` whichever strategy
/// produced them. The sort is stable, so discovery order settles exact ties.
pub fn select_two_best(mut solutions: Vec<SearchNode>) -> (Option<SearchNode>, Option<SearchNode>) {
    solutions.sort_by(|a, b| {
        a.cost
            .total_cmp(&b.cost)
            .then_with(|| a.hops.cmp(&b.hops))
            .then_with(|| a.path.len().cmp(&b.path.len()))
    });

    let mut ranked = solutions.into_iter();
    let best = ranked.next();
    let second = ranked.next();
    (best, second)
}
