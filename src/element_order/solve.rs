//! Shortest visiting path through the elements of a panel
//!
//! The path starts at the element nearest the panel's top-right corner,
//! visits every other element once and ends at the panel's bottom-left
//! corner, a virtual anchor that is not an element. This is an open-path
//! travelling salesman problem with fixed endpoints.
//!
//! Exhaustive search is O(n!) and is only used for small panels. Held-Karp
//! gives the same optimal length in O(n^2 * 2^n); above that the caller
//! picks between the nearest-neighbour heuristic and an error.

use tracing::{debug, warn};

use super::types::{ElementOrder, ElementOrderOptions, Result, Strategy};
use crate::geometry::{BBox, Point};

/// Points of the path problem.
///
/// Point 0 is the start element, points `1..=k` are the other elements in
/// input order and point `k + 1` is the end anchor. `stops[p]` is the input
/// index of the element at point `p`, so identity never depends on
/// coordinates.
struct PathProblem {
    stops: Vec<usize>,
    dist: Vec<Vec<f64>>,
}

impl PathProblem {
    fn new(panel: &BBox, elements: &[BBox], start: usize) -> Self {
        let mut stops = Vec::with_capacity(elements.len());
        stops.push(start);
        stops.extend((0..elements.len()).filter(|&i| i != start));

        let mut points: Vec<Point> = stops.iter().map(|&i| elements[i].center()).collect();
        points.push(panel.bottom_left());

        let dist = points
            .iter()
            .map(|a| points.iter().map(|b| a.distance_to(b)).collect())
            .collect();

        Self { stops, dist }
    }

    /// Number of interior points (elements other than the start)
    fn interior(&self) -> usize {
        self.stops.len() - 1
    }

    fn end(&self) -> usize {
        self.stops.len()
    }

    /// Length of start -> `interior` -> end
    fn length(&self, interior: &[usize]) -> f64 {
        let mut total = 0.0;
        let mut prev = 0;
        for &p in interior {
            total += self.dist[prev][p];
            prev = p;
        }
        total + self.dist[prev][self.end()]
    }
}

/// Index of the element whose center is nearest the panel's top-right corner.
/// The first element wins ties.
pub fn start_element(panel: &BBox, elements: &[BBox]) -> Option<usize> {
    let corner = panel.top_right();
    let mut best: Option<(usize, f64)> = None;

    for (i, element) in elements.iter().enumerate() {
        let d = element.center().distance_to(&corner);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }

    best.map(|(i, _)| i)
}

/// Order `elements` inside `panel` with the given options
pub fn solve(panel: &BBox, elements: &[BBox], options: &ElementOrderOptions) -> Result<ElementOrder> {
    let strategy = options.select_strategy(elements.len())?;
    Ok(solve_with(panel, elements, strategy))
}

/// Order `elements` inside `panel` with a fixed strategy.
///
/// An exact strategy asked to handle more elements than its ceiling
/// ([`Strategy::max_elements`]) is replaced by nearest neighbour; the
/// result's `strategy` reports what actually ran.
pub fn solve_with(panel: &BBox, elements: &[BBox], strategy: Strategy) -> ElementOrder {
    let strategy = if strategy.supports(elements.len()) {
        strategy
    } else {
        warn!(
            panel = panel.id(),
            elements = elements.len(),
            ?strategy,
            "Too many elements for exact ordering, using nearest neighbour"
        );
        Strategy::NearestNeighbor
    };

    let Some(start) = start_element(panel, elements) else {
        return ElementOrder::empty(strategy);
    };

    let problem = PathProblem::new(panel, elements, start);
    debug!(
        panel = panel.id(),
        elements = elements.len(),
        ?strategy,
        "Ordering panel elements"
    );

    let interior = match strategy {
        Strategy::Exhaustive => exhaustive(&problem),
        Strategy::HeldKarp => held_karp(&problem),
        Strategy::NearestNeighbor => nearest_neighbor(&problem),
    };

    let length = problem.length(&interior);
    let indices: Vec<usize> = std::iter::once(0)
        .chain(interior)
        .map(|p| problem.stops[p])
        .collect();
    let ordered = indices.iter().map(|&i| elements[i].clone()).collect();

    ElementOrder {
        elements: ordered,
        indices,
        strategy,
        length,
    }
}

/// Every permutation of the interior points in lexicographic order.
/// The first permutation reaching the minimum wins.
fn exhaustive(problem: &PathProblem) -> Vec<usize> {
    let mut perm: Vec<usize> = (1..=problem.interior()).collect();
    let mut best = perm.clone();
    let mut best_len = problem.length(&perm);

    while next_permutation(&mut perm) {
        let len = problem.length(&perm);
        if len < best_len {
            best_len = len;
            best.clone_from(&perm);
        }
    }

    best
}

/// Rearrange into the next lexicographic permutation.
/// Returns false once `items` is the last (descending) permutation.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Held-Karp over subsets of interior points.
///
/// `cost[mask][j]` is the shortest path from the start through the points in
/// `mask`, ending at interior point `j`. Ties keep the lowest predecessor.
fn held_karp(problem: &PathProblem) -> Vec<usize> {
    let k = problem.interior();
    if k == 0 {
        return Vec::new();
    }

    let full = (1usize << k) - 1;
    let mut cost = vec![vec![f64::INFINITY; k]; full + 1];
    let mut parent = vec![vec![usize::MAX; k]; full + 1];

    for j in 0..k {
        cost[1 << j][j] = problem.dist[0][j + 1];
    }

    for mask in 1..=full {
        for j in 0..k {
            if mask & (1 << j) == 0 || !cost[mask][j].is_finite() {
                continue;
            }
            let base = cost[mask][j];
            for next in 0..k {
                if mask & (1 << next) != 0 {
                    continue;
                }
                let extended = mask | (1 << next);
                let candidate = base + problem.dist[j + 1][next + 1];
                if candidate < cost[extended][next] {
                    cost[extended][next] = candidate;
                    parent[extended][next] = j;
                }
            }
        }
    }

    let end = problem.end();
    let mut last = 0;
    let mut best_len = f64::INFINITY;
    for j in 0..k {
        let len = cost[full][j] + problem.dist[j + 1][end];
        if len < best_len {
            best_len = len;
            last = j;
        }
    }

    let mut path = Vec::with_capacity(k);
    let mut mask = full;
    let mut current = last;
    loop {
        path.push(current + 1);
        let prev = parent[mask][current];
        mask &= !(1 << current);
        if prev == usize::MAX {
            break;
        }
        current = prev;
    }
    path.reverse();
    path
}

/// Greedy path: always step to the nearest unvisited point
fn nearest_neighbor(problem: &PathProblem) -> Vec<usize> {
    let k = problem.interior();
    let mut visited = vec![false; k + 1];
    let mut path = Vec::with_capacity(k);
    let mut current = 0;

    for _ in 0..k {
        let mut next: Option<(usize, f64)> = None;
        for p in 1..=k {
            if visited[p] {
                continue;
            }
            let d = problem.dist[current][p];
            if next.is_none_or(|(_, best)| d < best) {
                next = Some((p, d));
            }
        }
        let Some((p, _)) = next else { break };
        visited[p] = true;
        path.push(p);
        current = p;
    }

    path
}

/// Total length of `ordered` centers followed by the panel's bottom-left corner
pub fn path_length(panel: &BBox, ordered: &[BBox]) -> f64 {
    let mut points: Vec<Point> = ordered.iter().map(BBox::center).collect();
    if points.is_empty() {
        return 0.0;
    }
    points.push(panel.bottom_left());
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxKind;

    fn panel(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> BBox {
        BBox::new(xmin, ymin, xmax, ymax, BoxKind::Panel, "p").unwrap()
    }

    fn text(id: &str, xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> BBox {
        BBox::new(xmin, ymin, xmax, ymax, BoxKind::Text, id).unwrap()
    }

    fn diagonal() -> Vec<BBox> {
        vec![
            text("0", 1, 1, 3, 3),
            text("1", 2, 2, 4, 4),
            text("2", 3, 3, 5, 5),
            text("3", 4, 4, 6, 6),
            text("4", 5, 5, 7, 7),
        ]
    }

    /// Deterministic scatter of boxes for strategy comparisons
    fn scatter(count: usize, seed: u64) -> Vec<BBox> {
        let mut s = seed;
        (0..count)
            .map(|i| {
                s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let x = ((s >> 33) % 900) as i64;
                s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let y = ((s >> 33) % 900) as i64;
                text(&i.to_string(), x, y, x + 40, y + 60)
            })
            .collect()
    }

    #[test]
    fn test_next_permutation_lexicographic() {
        let mut items = vec![1, 2, 3];
        let mut seen = vec![items.clone()];
        while next_permutation(&mut items) {
            seen.push(items.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![1, 2, 3],
                vec![1, 3, 2],
                vec![2, 1, 3],
                vec![2, 3, 1],
                vec![3, 1, 2],
                vec![3, 2, 1],
            ]
        );
        assert!(!next_permutation(&mut []));
        assert!(!next_permutation(&mut [7]));
    }

    #[test]
    fn test_start_element_nearest_top_right() {
        let elements = diagonal();
        // Center (5,5) is nearest to (10,0)
        assert_eq!(start_element(&panel(0, 0, 10, 10), &elements), Some(3));
        assert_eq!(start_element(&panel(0, 0, 10, 10), &[]), None);
    }

    #[test]
    fn test_start_element_tie_keeps_first() {
        // Both centers are 5 away from (10,0)
        let elements = vec![text("a", 4, -1, 6, 1), text("b", 9, 4, 11, 6)];
        assert_eq!(start_element(&panel(0, 0, 10, 10), &elements), Some(0));
    }

    #[test]
    fn test_diagonal_panel_order() {
        let order = solve_with(&panel(0, 0, 10, 10), &diagonal(), Strategy::Exhaustive);
        assert_eq!(order.indices, vec![3, 4, 2, 1, 0]);
        let ids: Vec<&str> = order.elements.iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec!["3", "4", "2", "1", "0"]);
        assert!((order.length - 15.317_279).abs() < 1e-5);
    }

    #[test]
    fn test_empty_elements() {
        let order = solve_with(&panel(0, 0, 10, 10), &[], Strategy::Exhaustive);
        assert!(order.is_empty());
        assert_eq!(order.length, 0.0);
    }

    #[test]
    fn test_single_element() {
        let only = text("only", 2, 2, 4, 4);
        for strategy in [Strategy::Exhaustive, Strategy::HeldKarp, Strategy::NearestNeighbor] {
            let order = solve_with(&panel(0, 0, 10, 10), &[only.clone()], strategy);
            assert_eq!(order.indices, vec![0]);
        }
    }

    #[test]
    fn test_three_point_optimality() {
        let p = panel(0, 0, 100, 100);
        let elements = vec![
            text("a", 10, 70, 20, 80),
            text("b", 80, 5, 90, 15),
            text("c", 40, 40, 50, 50),
        ];
        let order = solve_with(&p, &elements, Strategy::Exhaustive);
        assert_eq!(order.indices[0], 1);

        // Independent brute force over the two interior orders
        let start = elements[1].center();
        let end = p.bottom_left();
        let candidates = [[0usize, 2usize], [2, 0]];
        let best = candidates
            .iter()
            .map(|perm| {
                let first = elements[perm[0]].center();
                let second = elements[perm[1]].center();
                start.distance_to(&first) + first.distance_to(&second) + second.distance_to(&end)
            })
            .fold(f64::INFINITY, f64::min);

        assert!((order.length - best).abs() < 1e-9);
        assert!((path_length(&p, &order.elements) - best).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_centers_kept() {
        let elements = vec![
            text("a", 10, 10, 20, 20),
            text("b", 10, 10, 20, 20),
            text("c", 80, 10, 90, 20),
        ];
        let order = solve_with(&panel(0, 0, 100, 100), &elements, Strategy::Exhaustive);
        let mut sorted = order.indices.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
        assert_eq!(order.indices, vec![2, 0, 1]);
    }

    #[test]
    fn test_permutation_and_determinism() {
        let p = panel(0, 0, 1000, 1000);
        for seed in 1..6 {
            let elements = scatter(7, seed);
            let first = solve_with(&p, &elements, Strategy::Exhaustive);
            let second = solve_with(&p, &elements, Strategy::Exhaustive);
            assert_eq!(first.indices, second.indices);

            let mut sorted = first.indices.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..7).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_held_karp_matches_exhaustive_length() {
        let p = panel(0, 0, 1000, 1000);
        for seed in 1..8 {
            let elements = scatter(7, seed);
            let exact = solve_with(&p, &elements, Strategy::Exhaustive);
            let dp = solve_with(&p, &elements, Strategy::HeldKarp);
            assert!((exact.length - dp.length).abs() < 1e-6, "seed {seed}");
            assert_eq!(dp.indices[0], exact.indices[0]);
        }
    }

    #[test]
    fn test_nearest_neighbor_is_permutation_and_not_shorter() {
        let p = panel(0, 0, 1000, 1000);
        for seed in 1..8 {
            let elements = scatter(9, seed);
            let greedy = solve_with(&p, &elements, Strategy::NearestNeighbor);
            let exact = solve_with(&p, &elements, Strategy::HeldKarp);

            let mut sorted = greedy.indices.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..9).collect::<Vec<_>>());
            assert!(greedy.length + 1e-9 >= exact.length);
        }
    }

    #[test]
    fn test_solve_selects_strategy() {
        let p = panel(0, 0, 1000, 1000);
        let opts = ElementOrderOptions::default();

        let small = solve(&p, &scatter(4, 3), &opts).unwrap();
        assert_eq!(small.strategy, Strategy::Exhaustive);

        let medium = solve(&p, &scatter(10, 3), &opts).unwrap();
        assert_eq!(medium.strategy, Strategy::HeldKarp);

        let large = solve(&p, &scatter(20, 3), &opts).unwrap();
        assert_eq!(large.strategy, Strategy::NearestNeighbor);
        assert_eq!(large.elements.len(), 20);

        assert!(solve(&p, &scatter(20, 3), &ElementOrderOptions::strict()).is_err());
    }

    #[test]
    fn test_exact_strategies_fall_back_past_ceiling() {
        let p = panel(0, 0, 1000, 1000);
        let elements = scatter(70, 11);
        for strategy in [Strategy::Exhaustive, Strategy::HeldKarp] {
            let order = solve_with(&p, &elements, strategy);
            assert_eq!(order.strategy, Strategy::NearestNeighbor);

            let mut sorted = order.indices.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..70).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_forced_strategy_with_many_elements() {
        let p = panel(0, 0, 1000, 1000);
        let elements = scatter(70, 5);
        for forced in [Strategy::Exhaustive, Strategy::HeldKarp] {
            let opts = ElementOrderOptions::builder().strategy(forced).build();
            let order = solve(&p, &elements, &opts).unwrap();
            assert_eq!(order.strategy, Strategy::NearestNeighbor);
            assert_eq!(order.elements.len(), 70);
        }
    }

    #[test]
    fn test_path_length_empty() {
        assert_eq!(path_length(&panel(0, 0, 10, 10), &[]), 0.0);
    }
}
