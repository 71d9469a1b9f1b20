use grid_util::point::Point;
use pathfinding_visualizer::walls::iterative_maze;
use pathfinding_visualizer::{Algorithm, CellState, FrameCounter, GridConfig, NoopSink, SearchGrid};
use rand::{rngs::StdRng, SeedableRng};

/// Runs every algorithm on the same seeded maze and prints how much of the board each one
/// explored and how long a route it painted.
fn main() {
    let config = GridConfig::new(20, 600);
    let mut board = SearchGrid::from_config(&config);
    let last = config.rows as i32 - 1;
    board.set_start(Point::new(0, 0)).unwrap();
    board.set_end(Point::new(last, last)).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    iterative_maze(&mut board, &mut rng, &mut NoopSink).unwrap();
    board.update();
    println!("{}", board);

    for algorithm in Algorithm::ALL {
        let mut grid = board.clone();
        let mut counter = FrameCounter::new();
        match algorithm.run(&mut grid, &mut counter) {
            Ok(found) => {
                let explored = grid.count(CellState::Closed) + grid.count(CellState::Path);
                println!(
                    "{algorithm}: found {found}, {} frames, {explored} cells explored, {} path cells",
                    counter.frames,
                    grid.count(CellState::Path)
                );
                println!("{}", grid);
            }
            Err(e) => println!("{algorithm}: {e}"),
        }
    }
}
