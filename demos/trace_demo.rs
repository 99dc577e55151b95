//! Runs every search algorithm over a randomly obstructed grid and prints
//! a compact text summary of each search, with the final path overlaid.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use scout_core::{Grid, Point};
use scout_paths::{Algorithm, SearchEngine};

const WIDTH: i32 = 12;
const HEIGHT: i32 = 8;

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let start = Point::new(0, 0);
    let goal = Point::new(WIDTH - 1, HEIGHT - 1);

    let mut grid = Grid::new(WIDTH, HEIGHT);
    for p in grid.bounds() {
        if p != start && p != goal && rng.random_bool(0.22) {
            grid.place_obstacle(p);
        }
    }

    println!("grid {}x{}, start {start}, goal {goal}", WIDTH, HEIGHT);
    println!();

    let engine = SearchEngine::new();
    for algorithm in Algorithm::ALL {
        match engine.search(algorithm, start, goal, &grid) {
            Ok(result) => {
                println!(
                    "{algorithm}: visited {} cells over {} frontier snapshots",
                    result.visited_order.len(),
                    result.frontier_history.len(),
                );
                if result.succeeded() {
                    println!(
                        "  path: {} steps, cost {:.1}",
                        result.path.len() - 1,
                        engine.path_cost(&result.path),
                    );
                    print_overlay(&grid, &result.path, start, goal);
                } else {
                    println!("  no path");
                }
            }
            Err(err) => println!("{algorithm}: {err}"),
        }
        println!();
    }
}

/// Render the grid with the final path overlaid.
fn print_overlay(grid: &Grid, path: &[Point], start: Point, goal: Point) {
    let on_path: HashSet<Point> = path.iter().copied().collect();
    for y in 0..grid.height() {
        let mut line = String::from("  ");
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            line.push(if p == start {
                'S'
            } else if p == goal {
                'G'
            } else if on_path.contains(&p) {
                '*'
            } else if grid.is_free(p) {
                '.'
            } else {
                '#'
            });
        }
        println!("{line}");
    }
}
