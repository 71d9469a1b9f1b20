use grid_util::point::Point;
use pathfinding_visualizer::{run_astar, CellState, FrameCounter, SearchGrid};

// In this example a path is found on a 3x3 grid with shape
// S..
// .#.
// ..E
// where
// - # marks a barrier
// - S marks the start
// - E marks the end
//
// Painted path cells show up as *.
fn main() {
    let mut grid: SearchGrid = "S..\n.#.\n..E".parse().unwrap();
    println!("{}", grid);
    let mut counter = FrameCounter::new();
    let found = run_astar(&mut grid, Point::new(0, 0), Point::new(2, 2), &mut counter).unwrap();
    println!("Found: {found} after {} frames", counter.frames);
    println!("{}", grid);
    println!("Path cells: {:?}", grid.positions(CellState::Path));
}
