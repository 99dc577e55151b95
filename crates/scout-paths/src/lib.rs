//! Pathfinding over occupancy grids, instrumented for replay.
//!
//! This crate provides four traversal strategies over a 2D occupancy grid.
//! Each runs to completion synchronously and returns a [`SearchResult`]
//! carrying the final path *and* the full temporal trace of the search —
//! visitation order and frontier snapshots — so a presentation layer can
//! replay the exploration step by step.
//!
//! | Algorithm | Frontier | Guarantee |
//! |---|---|---|
//! | [`SearchEngine::dfs`] | LIFO stack | finds a path if one exists |
//! | [`SearchEngine::bfs`] | FIFO queue | fewest edges |
//! | [`SearchEngine::ucs`] | min-priority, by cost | cheapest under the cost model |
//! | [`SearchEngine::astar`] | min-priority, by cost + heuristic | cheapest under the cost model |
//!
//! Moves cost [`STEP_COST`] each, plus a configurable penalty for changing
//! direction between consecutive moves. A*'s Manhattan heuristic ignores
//! that penalty, so its optimality is relative to the engine's own cost
//! function (see [`SearchEngine::astar`]).

mod astar;
mod bfs;
mod cost;
mod dfs;
mod distance;
mod engine;
mod result;
mod ucs;

pub use cost::{DEFAULT_TURN_PENALTY, STEP_COST, step_cost};
pub use distance::manhattan;
pub use engine::{Algorithm, SearchEngine, SearchError};
pub use result::SearchResult;
