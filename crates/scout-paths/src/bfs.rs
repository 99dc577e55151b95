use std::collections::VecDeque;

use scout_core::{Grid, Point};

use crate::engine::{Scratch, SearchEngine, SearchError};
use crate::result::SearchResult;

impl SearchEngine {
    /// Breadth-first search from `start` to `goal`.
    ///
    /// Uses a FIFO queue, expanding in canonical neighbor order, so cells
    /// are visited ring by ring. Guarantees a path with the fewest edges —
    /// not necessarily the cheapest once the turn penalty is considered.
    pub fn bfs(
        &self,
        start: Point,
        goal: Point,
        grid: &Grid,
    ) -> Result<SearchResult, SearchError> {
        Self::validate(grid, start, goal)?;
        let mut sc = Scratch::new(grid);
        let start_idx = sc.idx(start);
        let goal_idx = sc.idx(goal);

        let mut queue: VecDeque<usize> = VecDeque::from([start_idx]);
        sc.nodes[start_idx].seen = true;
        sc.record_frontier(queue.iter().copied());

        let mut nbuf: Vec<Point> = Vec::with_capacity(4);

        while let Some(ci) = queue.pop_front() {
            if sc.is_visited(ci) {
                sc.record_frontier(queue.iter().copied());
                continue;
            }
            sc.finalize(ci);
            if ci == goal_idx {
                return Ok(sc.into_success(goal_idx));
            }

            nbuf.clear();
            grid.neighbors(sc.point(ci), &mut nbuf);
            for &np in nbuf.iter() {
                let ni = sc.idx(np);
                if sc.nodes[ni].seen {
                    continue;
                }
                sc.nodes[ni].seen = true;
                sc.nodes[ni].parent = ci;
                queue.push_back(ni);
            }
            sc.record_frontier(queue.iter().copied());
        }

        Ok(sc.into_failure())
    }
}
