use std::collections::BinaryHeap;

use scout_core::{Grid, Point};

use crate::cost::step_cost;
use crate::engine::{OpenEntry, Scratch, SearchEngine, SearchError};
use crate::result::SearchResult;

impl SearchEngine {
    /// Uniform-cost search from `start` to `goal`.
    ///
    /// The frontier is a min-priority queue over accumulated cost (base
    /// step cost plus the turn penalty); equal costs pop in arrival order.
    /// When a neighbor is reached strictly cheaper than before, its cost
    /// and predecessor are updated and it is re-inserted — stale entries
    /// are discarded on pop via the visited check (lazy deletion). Turn
    /// cost is always computed from the node's currently relaxed
    /// predecessor. Guarantees the cheapest path under the engine's cost
    /// model.
    pub fn ucs(
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
            f: 0.0,
            seq,
            idx: start_idx,
        });
        seq += 1;
        sc.record_frontier(open.iter().map(|e| e.idx));

        let mut nbuf: Vec<Point> = Vec::with_capacity(4);

        while let Some(entry) = open.pop() {
            let ci = entry.idx;
            if sc.is_visited(ci) {
                // Stale entry superseded by a cheaper relaxation.
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
                        f: tentative,
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
