use scout_core::{Grid, Point};

use crate::engine::{Scratch, SearchEngine, SearchError};
use crate::result::SearchResult;

impl SearchEngine {
    /// Depth-first search from `start` to `goal`.
    ///
    /// Uses an explicit LIFO stack (no recursion, so large grids cannot
    /// overflow the call stack). Neighbors are pushed in *reverse* canonical
    /// order so they pop — and get visited — in canonical order, keeping the
    /// replayed exploration front intuitive. Finds a path if one exists,
    /// with no shortest-path guarantee.
    pub fn dfs(
        &self,
        start: Point,
        goal: Point,
        grid: &Grid,
    ) -> Result<SearchResult, SearchError> {
        Self::validate(grid, start, goal)?;
        let mut sc = Scratch::new(grid);
        let start_idx = sc.idx(start);
        let goal_idx = sc.idx(goal);

        let mut stack: Vec<usize> = vec![start_idx];
        sc.nodes[start_idx].seen = true;
        sc.record_frontier(stack.iter().copied());

        let mut nbuf: Vec<Point> = Vec::with_capacity(4);

        while let Some(ci) = stack.pop() {
            if sc.is_visited(ci) {
                // Stale pop: nothing expands, but the snapshot cadence holds.
                sc.record_frontier(stack.iter().copied());
                continue;
            }
            sc.finalize(ci);
            if ci == goal_idx {
                return Ok(sc.into_success(goal_idx));
            }

            nbuf.clear();
            grid.neighbors(sc.point(ci), &mut nbuf);
            for &np in nbuf.iter().rev() {
                let ni = sc.idx(np);
                if sc.nodes[ni].seen {
                    continue;
                }
                sc.nodes[ni].seen = true;
                sc.nodes[ni].parent = ci;
                stack.push(ni);
            }
            sc.record_frontier(stack.iter().copied());
        }

        Ok(sc.into_failure())
    }
}
