//! The engine's cost model: unit step cost plus a turn penalty.

use scout_core::Point;

/// Base cost of moving between adjacent cells.
pub const STEP_COST: f64 = 1.0;

/// Default extra cost charged when a move changes direction.
pub const DEFAULT_TURN_PENALTY: f64 = 0.5;

/// Cost of stepping from `current` to `neighbor`.
///
/// `incoming` is the direction of the move that reached `current` in the
/// search tree being built — the vector `current − parent` for the node's
/// *current* predecessor, or `None` at the start node. A step whose
/// direction differs from `incoming` pays `turn_penalty` on top of
/// [`STEP_COST`]; the first move out of the start never pays it.
#[inline]
pub fn step_cost(turn_penalty: f64, incoming: Option<Point>, current: Point, neighbor: Point) -> f64 {
    match incoming {
        Some(dir) if neighbor - current != dir => STEP_COST + turn_penalty,
        _ => STEP_COST,
    }
}
