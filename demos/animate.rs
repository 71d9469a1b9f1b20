use grid_util::point::Point;
use pathfinding_visualizer::walls::random_walls;
use pathfinding_visualizer::{
    Algorithm, Cancellable, GridConfig, NoopSink, QuitSignal, SearchError, SearchGrid,
};
use rand::{rngs::StdRng, SeedableRng};
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

const FRAME_DELAY: Duration = Duration::from_millis(15);
/// Frames shown before the demo quits on its own.
const FRAME_BUDGET: usize = 400;

/// Plays a breadth-first search in the terminal, redrawing the board on every frame. Pass an
/// algorithm index (0 to 3) to pick a different one.
fn main() {
    let algorithm = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .and_then(|ix| Algorithm::ALL.get(ix).copied())
        .unwrap_or(Algorithm::BreadthFirst);

    let config = GridConfig::default();
    let mut grid = SearchGrid::from_config(&config);
    let last = config.rows as i32 - 1;
    grid.set_start(Point::new(0, 0)).unwrap();
    grid.set_end(Point::new(last, last)).unwrap();
    random_walls(&mut grid, &mut StdRng::seed_from_u64(7), &mut NoopSink).unwrap();

    let quit = QuitSignal::new();
    let budget = quit.clone();
    let mut shown = 0;
    let draw = |grid: &SearchGrid| {
        shown += 1;
        // Clear the terminal and move the cursor home
        print!("\x1B[2J\x1B[H{algorithm}, frame {shown}\n{grid}");
        thread::sleep(FRAME_DELAY);
        if shown >= FRAME_BUDGET {
            budget.request();
        }
        ControlFlow::Continue(())
    };
    let mut sink = Cancellable::new(draw, quit);
    match algorithm.run(&mut grid, &mut sink) {
        Ok(true) => println!("Path found"),
        Ok(false) => println!("No path"),
        Err(SearchError::Cancelled) => println!("Stopped after {FRAME_BUDGET} frames"),
        Err(e) => println!("{e}"),
    }
}
