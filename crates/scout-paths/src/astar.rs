use std::collections::BinaryHeap;

use scout_core::{Grid, Point};

use crate::cost::step_cost;
use crate::distance::manhattan;
use crate::engine::{OpenEntry, Scratch, SearchEngine, SearchError};
use crate::result::SearchResult;

impl SearchEngine {
    /// A* search from `start` to `goal`.
    ///
    /// Identical relaxation rule to [`ucs`](SearchEngine::ucs), with the
    /// frontier ordered by accumulated cost plus the Manhattan distance to
    /// the goal. The heuristic deliberately ignores the turn penalty, so
    /// the returned path is the cheapest A* computes under the engine's own
    /// cost model rather than a provably shortest geometric route; with a
    /// zero penalty the heuristic is exact in the classical sense and the
    /// usual optimality guarantee applies. Typically visits far fewer
    /// cells than UCS.
    pub fn astar(
        &self,
        start: Point,
        goal: Point,
        grid: &Grid,
    ) -> Result<SearchResult, SearchError> {
        Self::validate(grid, start, goal)?;
        let mut sc = Scratch::new(grid);
        let start_idx = sc.idx(start);
        let goal_idx = sc.idx(goal);

        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;
        sc.nodes[start_idx].seen = true;
        sc.nodes[start_idx].g = 0.0;
        open.push(OpenEntry {
            f: f64::from(manhattan(start, goal)),
            seq,
            idx: start_idx,
        });
        seq += 1;
        sc.record_frontier(open.iter().map(|e| e.idx));

        let mut nbuf: Vec<Point> = Vec::with_capacity(4);

        while let Some(entry) = open.pop() {
            let ci = entry.idx;
            if sc.is_visited(ci) {
                sc.record_frontier(open.iter().map(|e| e.idx));
                continue;
            }
            sc.finalize(ci);
            if ci == goal_idx {
                return Ok(sc.into_success(goal_idx));
            }

            let cp = sc.point(ci);
            let incoming = sc.incoming_dir(ci);
            let current_g = sc.nodes[ci].g;

            nbuf.clear();
            grid.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let ni = sc.idx(np);
                let tentative = current_g + step_cost(self.turn_penalty(), incoming, cp, np);
                let n = &mut sc.nodes[ni];
                if tentative < n.g {
                    n.g = tentative;
                    n.parent = ci;
                    n.seen = true;
                    open.push(OpenEntry {
                        f: tentative + f64::from(manhattan(np, goal)),
                        seq,
                        idx: ni,
                    });
                    seq += 1;
                }
            }
            sc.record_frontier(open.iter().map(|e| e.idx));
        }

        Ok(sc.into_failure())
    }
}
