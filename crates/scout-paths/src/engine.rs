//! The [`SearchEngine`]: configuration, dispatch and shared search state.

use std::collections::HashSet;
use std::fmt;

use scout_core::{Grid, Point};

use crate::cost::{self, DEFAULT_TURN_PENALTY};
use crate::result::SearchResult;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Selects which traversal strategy [`SearchEngine::search`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Dfs,
    Bfs,
    Ucs,
    AStar,
}

impl Algorithm {
    /// Every variant, in documentation order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dfs,
        Algorithm::Bfs,
        Algorithm::Ucs,
        Algorithm::AStar,
    ];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dfs => "DFS",
            Self::Bfs => "BFS",
            Self::Ucs => "UCS",
            Self::AStar => "A*",
        })
    }
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Errors reported before any traversal starts.
///
/// "No path found" is not an error — it is a normal outcome represented by
/// an unsuccessful [`SearchResult`]. These variants mark invalid input,
/// which the engine refuses rather than conflating with exhaustion.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The turn penalty passed at construction was negative or non-finite.
    InvalidTurnPenalty(f64),
    /// `start` or `goal` lies outside the grid.
    OutOfBounds(Point),
    /// `start` or `goal` sits on an obstacle cell.
    Obstructed(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTurnPenalty(p) => {
                write!(f, "turn penalty must be finite and non-negative, got {p}")
            }
            Self::OutOfBounds(p) => write!(f, "{p} is outside the grid"),
            Self::Obstructed(p) => write!(f, "{p} is an obstacle cell"),
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// SearchEngine
// ---------------------------------------------------------------------------

/// Runs grid searches under a fixed cost configuration.
///
/// The engine holds configuration only. Every call allocates its own
/// frontier, node table and trace, and the grid is never mutated, so one
/// engine may serve any number of sequential or cross-thread searches.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    turn_penalty: f64,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Engine with the default turn penalty ([`DEFAULT_TURN_PENALTY`]).
    pub fn new() -> Self {
        Self {
            turn_penalty: DEFAULT_TURN_PENALTY,
        }
    }

    /// Engine with a custom turn penalty.
    ///
    /// The penalty must be finite and non-negative; anything else is
    /// rejected here rather than surfacing as nonsense costs mid-search.
    pub fn with_turn_penalty(turn_penalty: f64) -> Result<Self, SearchError> {
        if !turn_penalty.is_finite() || turn_penalty < 0.0 {
            return Err(SearchError::InvalidTurnPenalty(turn_penalty));
        }
        Ok(Self { turn_penalty })
    }

    /// The configured turn penalty.
    #[inline]
    pub fn turn_penalty(&self) -> f64 {
        self.turn_penalty
    }

    /// Run `algorithm` from `start` to `goal` on `grid`.
    pub fn search(
        &self,
        algorithm: Algorithm,
        start: Point,
        goal: Point,
        grid: &Grid,
    ) -> Result<SearchResult, SearchError> {
        log::debug!(
            "{algorithm} search {start} -> {goal} on {}x{} grid",
            grid.width(),
            grid.height()
        );
        let result = match algorithm {
            Algorithm::Dfs => self.dfs(start, goal, grid),
            Algorithm::Bfs => self.bfs(start, goal, grid),
            Algorithm::Ucs => self.ucs(start, goal, grid),
            Algorithm::AStar => self.astar(start, goal, grid),
        }?;
        log::debug!(
            "{algorithm} done: visited {}, path length {}",
            result.visited_order.len(),
            result.path.len()
        );
        Ok(result)
    }

    /// Total cost of `path` under the engine's cost model.
    pub fn path_cost(&self, path: &[Point]) -> f64 {
        let mut total = 0.0;
        let mut incoming = None;
        for pair in path.windows(2) {
            total += cost::step_cost(self.turn_penalty, incoming, pair[0], pair[1]);
            incoming = Some(pair[1] - pair[0]);
        }
        total
    }

    /// Reject endpoints the traversal contract does not cover.
    pub(crate) fn validate(grid: &Grid, start: Point, goal: Point) -> Result<(), SearchError> {
        for p in [start, goal] {
            if !grid.contains(p) {
                return Err(SearchError::OutOfBounds(p));
            }
            if !grid.is_free(p) {
                return Err(SearchError::Obstructed(p));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Per-call search state
// ---------------------------------------------------------------------------

/// Per-node bookkeeping, indexed `y * width + x`.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: f64,
    pub(crate) parent: usize,
    pub(crate) seen: bool,
    pub(crate) visited: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: f64::INFINITY,
            parent: usize::MAX,
            seen: false,
            visited: false,
        }
    }
}

/// Entry in the priority frontier, ordered so `BinaryHeap` (a max-heap)
/// pops the smallest `f` first. Cost ties pop in insertion (arrival) order
/// via `seq` — the engine's tie-break for UCS and A*.
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) f: f64,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// State accumulated over one search invocation.
///
/// Allocated fresh per call; the engine keeps no cross-call caches, so
/// repeated searches are independent by construction.
pub(crate) struct Scratch {
    width: usize,
    pub(crate) nodes: Vec<Node>,
    visited_order: Vec<Point>,
    frontier_history: Vec<HashSet<Point>>,
}

impl Scratch {
    pub(crate) fn new(grid: &Grid) -> Self {
        Self {
            width: grid.width() as usize,
            nodes: vec![Node::default(); grid.bounds().len()],
            visited_order: Vec::new(),
            frontier_history: Vec::new(),
        }
    }

    /// Flat index of an in-bounds point.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    /// Point for a flat index.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// Direction of the move that reached `idx`, taken from its *current*
    /// predecessor in the search tree. `None` for the start node.
    pub(crate) fn incoming_dir(&self, idx: usize) -> Option<Point> {
        let parent = self.nodes[idx].parent;
        (parent != usize::MAX).then(|| self.point(idx) - self.point(parent))
    }

    #[inline]
    pub(crate) fn is_visited(&self, idx: usize) -> bool {
        self.nodes[idx].visited
    }

    /// Mark `idx` finalized and record it in the visitation order.
    pub(crate) fn finalize(&mut self, idx: usize) {
        self.nodes[idx].visited = true;
        let p = self.point(idx);
        self.visited_order.push(p);
    }

    /// Record one frontier snapshot from the scheduled node indices.
    pub(crate) fn record_frontier(&mut self, frontier: impl IntoIterator<Item = usize>) {
        let snapshot: HashSet<Point> = frontier.into_iter().map(|i| self.point(i)).collect();
        self.frontier_history.push(snapshot);
    }

    /// Successful result: walk the predecessor chain back from `goal_idx`
    /// and reverse it into start → goal order.
    pub(crate) fn into_success(self, goal_idx: usize) -> SearchResult {
        let mut path = Vec::new();
        let mut idx = goal_idx;
        while idx != usize::MAX {
            path.push(self.point(idx));
            idx = self.nodes[idx].parent;
        }
        path.reverse();
        SearchResult {
            path,
            visited_order: self.visited_order,
            frontier_history: self.frontier_history,
        }
    }

    /// Failure result: empty path, accumulated trace.
    pub(crate) fn into_failure(self) -> SearchResult {
        SearchResult {
            path: Vec::new(),
            visited_order: self.visited_order,
            frontier_history: self.frontier_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    /// 5×5 grid with a wall at column 2, open only at row 4.
    fn wall_with_gap() -> Grid {
        let mut g = Grid::new(5, 5);
        for y in 0..4 {
            g.place_obstacle(p(2, y));
        }
        g
    }

    /// 5×5 grid with column 2 fully walled off.
    fn solid_wall() -> Grid {
        let mut g = Grid::new(5, 5);
        for y in 0..5 {
            g.place_obstacle(p(2, y));
        }
        g
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    #[test]
    fn default_turn_penalty() {
        assert_eq!(SearchEngine::new().turn_penalty(), 0.5);
        assert_eq!(SearchEngine::default().turn_penalty(), 0.5);
    }

    #[test]
    fn custom_turn_penalty_accepted() {
        assert_eq!(
            SearchEngine::with_turn_penalty(0.0).unwrap().turn_penalty(),
            0.0
        );
        assert_eq!(
            SearchEngine::with_turn_penalty(2.5).unwrap().turn_penalty(),
            2.5
        );
    }

    #[test]
    fn invalid_turn_penalty_rejected() {
        for bad in [-0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = SearchEngine::with_turn_penalty(bad).unwrap_err();
            assert!(matches!(err, SearchError::InvalidTurnPenalty(_)), "{bad}");
        }
    }

    // -----------------------------------------------------------------------
    // Endpoint validation
    // -----------------------------------------------------------------------

    #[test]
    fn out_of_bounds_endpoints_are_errors() {
        let g = Grid::new(3, 3);
        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let err = engine.search(algorithm, p(-1, 0), p(2, 2), &g).unwrap_err();
            assert_eq!(err, SearchError::OutOfBounds(p(-1, 0)));
            let err = engine.search(algorithm, p(0, 0), p(3, 0), &g).unwrap_err();
            assert_eq!(err, SearchError::OutOfBounds(p(3, 0)));
        }
    }

    #[test]
    fn obstructed_endpoints_are_errors() {
        let mut g = Grid::new(3, 3);
        g.place_obstacle(p(1, 1));
        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let err = engine.search(algorithm, p(1, 1), p(2, 2), &g).unwrap_err();
            assert_eq!(err, SearchError::Obstructed(p(1, 1)));
            let err = engine.search(algorithm, p(0, 0), p(1, 1), &g).unwrap_err();
            assert_eq!(err, SearchError::Obstructed(p(1, 1)));
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            SearchError::OutOfBounds(p(5, 5)).to_string(),
            "(5, 5) is outside the grid"
        );
        assert_eq!(
            SearchError::Obstructed(p(1, 0)).to_string(),
            "(1, 0) is an obstacle cell"
        );
        assert_eq!(
            SearchError::InvalidTurnPenalty(-1.0).to_string(),
            "turn penalty must be finite and non-negative, got -1"
        );
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    #[test]
    fn search_dispatches_to_each_algorithm() {
        let g = wall_with_gap();
        let engine = SearchEngine::new();
        let start = p(0, 0);
        let goal = p(4, 0);
        assert_eq!(
            engine.search(Algorithm::Dfs, start, goal, &g).unwrap(),
            engine.dfs(start, goal, &g).unwrap()
        );
        assert_eq!(
            engine.search(Algorithm::Bfs, start, goal, &g).unwrap(),
            engine.bfs(start, goal, &g).unwrap()
        );
        assert_eq!(
            engine.search(Algorithm::Ucs, start, goal, &g).unwrap(),
            engine.ucs(start, goal, &g).unwrap()
        );
        assert_eq!(
            engine.search(Algorithm::AStar, start, goal, &g).unwrap(),
            engine.astar(start, goal, &g).unwrap()
        );
    }

    #[test]
    fn algorithm_display() {
        let names: Vec<String> = Algorithm::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["DFS", "BFS", "UCS", "A*"]);
    }

    // -----------------------------------------------------------------------
    // path_cost
    // -----------------------------------------------------------------------

    #[test]
    fn path_cost_counts_steps_and_turns() {
        let engine = SearchEngine::new();
        // Right, right, down: two straight steps then one turn.
        let path = [p(0, 0), p(1, 0), p(2, 0), p(2, 1)];
        assert_eq!(engine.path_cost(&path), 3.5);
        // Degenerate paths cost nothing.
        assert_eq!(engine.path_cost(&[]), 0.0);
        assert_eq!(engine.path_cost(&[p(0, 0)]), 0.0);
    }

    // -----------------------------------------------------------------------
    // Properties shared by all four algorithms
    // -----------------------------------------------------------------------

    #[test]
    fn all_algorithms_succeed_on_open_grid() {
        let g = Grid::new(4, 4);
        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let r = engine.search(algorithm, p(0, 0), p(3, 3), &g).unwrap();
            assert!(r.succeeded(), "{algorithm}");
            assert_eq!(r.path.first(), Some(&p(0, 0)), "{algorithm}");
            assert_eq!(r.path.last(), Some(&p(3, 3)), "{algorithm}");
            // Consecutive path cells are orthogonally adjacent.
            for pair in r.path.windows(2) {
                let d = pair[1] - pair[0];
                assert_eq!(d.x.abs() + d.y.abs(), 1, "{algorithm}");
            }
        }
    }

    #[test]
    fn visited_order_has_no_duplicates() {
        let g = wall_with_gap();
        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let r = engine.search(algorithm, p(0, 0), p(4, 0), &g).unwrap();
            let unique: HashSet<Point> = r.visited_order.iter().copied().collect();
            assert_eq!(unique.len(), r.visited_order.len(), "{algorithm}");
            assert_eq!(r.visited_order.first(), Some(&p(0, 0)), "{algorithm}");
            assert_eq!(r.visited_order.last(), Some(&p(4, 0)), "{algorithm}");
        }
    }

    #[test]
    fn path_cells_come_from_recorded_frontiers() {
        let g = wall_with_gap();
        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let r = engine.search(algorithm, p(0, 0), p(4, 4), &g).unwrap();
            assert!(!r.frontier_history.is_empty(), "{algorithm}");
            for &cell in &r.path {
                let seen = cell == p(0, 0)
                    || r.frontier_history.iter().any(|snap| snap.contains(&cell));
                assert!(seen, "{algorithm}: {cell} never entered a frontier");
            }
        }
    }

    #[test]
    fn start_equals_goal_is_well_defined() {
        let g = Grid::new(3, 3);
        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let r = engine.search(algorithm, p(1, 1), p(1, 1), &g).unwrap();
            assert_eq!(r.path, vec![p(1, 1)], "{algorithm}");
            assert_eq!(r.visited_order, vec![p(1, 1)], "{algorithm}");
            assert_eq!(
                r.frontier_history,
                vec![HashSet::from([p(1, 1)])],
                "{algorithm}"
            );
        }
    }

    #[test]
    fn enclosed_goal_exhausts_reachable_cells() {
        // Goal in the corner, sealed off by its two neighbours.
        let mut g = Grid::new(4, 4);
        g.place_obstacle(p(3, 2));
        g.place_obstacle(p(2, 3));
        let reachable: HashSet<Point> = g
            .bounds()
            .iter()
            .filter(|&c| g.is_free(c) && c != p(3, 3))
            .collect();

        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let r = engine.search(algorithm, p(0, 0), p(3, 3), &g).unwrap();
            assert!(!r.succeeded(), "{algorithm}");
            assert!(r.path.is_empty(), "{algorithm}");
            assert!(!r.frontier_history.is_empty(), "{algorithm}");
            let visited: HashSet<Point> = r.visited_order.iter().copied().collect();
            assert_eq!(visited, reachable, "{algorithm}");
        }
    }

    #[test]
    fn all_algorithms_route_through_the_gap() {
        let g = wall_with_gap();
        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let r = engine.search(algorithm, p(0, 0), p(4, 0), &g).unwrap();
            assert!(r.succeeded(), "{algorithm}");
            assert!(r.path.contains(&p(2, 4)), "{algorithm}");
        }
    }

    #[test]
    fn solid_wall_fails_for_all_algorithms() {
        let g = solid_wall();
        let engine = SearchEngine::new();
        for algorithm in Algorithm::ALL {
            let r = engine.search(algorithm, p(0, 0), p(4, 0), &g).unwrap();
            assert!(!r.succeeded(), "{algorithm}");
            assert!(!r.visited_order.is_empty(), "{algorithm}");
        }
    }

    #[test]
    fn bfs_path_has_fewest_edges() {
        let g = wall_with_gap();
        let engine = SearchEngine::new();
        let bfs_edges = engine
            .search(Algorithm::Bfs, p(0, 0), p(4, 0), &g)
            .unwrap()
            .path
            .len()
            - 1;
        for algorithm in Algorithm::ALL {
            let r = engine.search(algorithm, p(0, 0), p(4, 0), &g).unwrap();
            assert!(bfs_edges <= r.path.len() - 1, "{algorithm}");
        }
    }

    #[test]
    fn ucs_and_astar_agree_on_cost() {
        let engine = SearchEngine::new();
        for g in [Grid::new(5, 5), wall_with_gap()] {
            let ucs = engine.search(Algorithm::Ucs, p(0, 0), p(4, 4), &g).unwrap();
            let astar = engine
                .search(Algorithm::AStar, p(0, 0), p(4, 4), &g)
                .unwrap();
            assert_eq!(
                engine.path_cost(&ucs.path),
                engine.path_cost(&astar.path)
            );
        }
    }

    #[test]
    fn astar_visits_no_more_than_ucs_on_open_grid() {
        let engine = SearchEngine::new();
        let g = Grid::new(5, 5);
        let ucs = engine.search(Algorithm::Ucs, p(0, 0), p(4, 4), &g).unwrap();
        let astar = engine
            .search(Algorithm::AStar, p(0, 0), p(4, 4), &g)
            .unwrap();
        assert!(astar.visited_order.len() <= ucs.visited_order.len());
    }

    #[test]
    fn three_by_three_scenario() {
        let g = Grid::new(3, 3);
        let engine = SearchEngine::new();

        let bfs = engine.search(Algorithm::Bfs, p(0, 0), p(2, 2), &g).unwrap();
        assert_eq!(bfs.path.len() - 1, 4);

        // Four unit steps plus exactly one direction change.
        for algorithm in [Algorithm::Ucs, Algorithm::AStar] {
            let r = engine.search(algorithm, p(0, 0), p(2, 2), &g).unwrap();
            assert_eq!(engine.path_cost(&r.path), 4.5, "{algorithm}");
        }
    }
}
