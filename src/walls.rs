//! Procedural barrier layouts. Generators leave the start and end cells alone and present a frame
//! through the [FrameSink] as they build, so a quit request can stop them half way.
use crate::cell::CellState;
use crate::error::SearchError;
use crate::frame::FrameSink;
use crate::search_grid::SearchGrid;
use grid_util::grid::Grid;
use grid_util::point::Point;
use log::info;
use rand::Rng;
use std::ops::Range;

/// Chance of any single cell becoming a barrier in [random_walls].
pub const WALL_PROBABILITY: f64 = 0.28;

/// Places a barrier unless `point` is outside the grid or an endpoint. Returns whether the cell
/// is a barrier now.
fn raise(grid: &mut SearchGrid, point: Point) -> bool {
    match grid.state(point) {
        Some(state) if !state.is_endpoint() => {
            grid.set(point.x as usize, point.y as usize, CellState::Barrier);
            true
        }
        _ => false,
    }
}

/// Clears a barrier, again skipping endpoints and points outside the grid.
fn knock(grid: &mut SearchGrid, point: Point) {
    if grid.state(point) == Some(CellState::Barrier) {
        grid.set(point.x as usize, point.y as usize, CellState::Unvisited);
    }
}

/// Uniform pick from `range`, or 0 when it is empty.
fn pick<R: Rng + ?Sized>(rng: &mut R, range: Range<usize>) -> usize {
    if range.is_empty() {
        0
    } else {
        rng.gen_range(range)
    }
}

/// Turns each cell into a barrier with probability [WALL_PROBABILITY]. One frame per row.
pub fn random_walls<R, S>(
    grid: &mut SearchGrid,
    rng: &mut R,
    sink: &mut S,
) -> Result<(), SearchError>
where
    R: Rng + ?Sized,
    S: FrameSink + ?Sized,
{
    info!(
        "Scattering random walls over {}x{} grid",
        grid.rows(),
        grid.cols()
    );
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if rng.gen_bool(WALL_PROBABILITY) {
                raise(grid, Point::new(row as i32, col as i32));
            }
        }
        sink.checkpoint(grid)?;
    }
    Ok(())
}

/// Draws both diagonals, skipping the outermost ring. A pair is left out entirely when either of
/// its cells is an endpoint. One frame per pair.
pub fn x_pattern<S>(grid: &mut SearchGrid, sink: &mut S) -> Result<(), SearchError>
where
    S: FrameSink + ?Sized,
{
    let rows = grid.rows();
    info!("Drawing diagonal walls over {}x{} grid", rows, grid.cols());
    for i in 1..rows.saturating_sub(1) {
        let pair = [
            Point::new(i as i32, i as i32),
            Point::new(i as i32, (rows - 1 - i) as i32),
        ];
        if pair
            .iter()
            .any(|&p| grid.state(p).map_or(true, CellState::is_endpoint))
        {
            continue;
        }
        for point in pair {
            raise(grid, point);
        }
        sink.checkpoint(grid)?;
    }
    Ok(())
}

/// Maze-like layout built in three passes: random runs anchored on the left edge of every second
/// row, random runs anchored on the right edge of every row, and downward sweeps along every
/// second column. A sweep that runs into a barrier knocks it out together with the cells above
/// and below it and its mirror across the diagonal. One frame per barrier laid.
pub fn iterative_maze<R, S>(
    grid: &mut SearchGrid,
    rng: &mut R,
    sink: &mut S,
) -> Result<(), SearchError>
where
    R: Rng + ?Sized,
    S: FrameSink + ?Sized,
{
    let (rows, cols) = (grid.rows(), grid.cols());
    info!("Carving iterative maze over {}x{} grid", rows, cols);

    for row in (0..rows).step_by(2) {
        let run = pick(rng, 0..cols - cols / 2);
        for col in 0..run {
            if raise(grid, Point::new(row as i32, col as i32)) {
                sink.checkpoint(grid)?;
            }
        }
    }

    for row in 0..rows {
        let run = pick(rng, 0..cols / 2);
        for offset in 0..run {
            let col = cols - offset - 1;
            if raise(grid, Point::new(row as i32, col as i32)) {
                sink.checkpoint(grid)?;
            }
        }
    }

    for col in (0..cols).step_by(2) {
        let depth = pick(rng, cols - cols / 2..cols.saturating_sub(1));
        for row in 0..depth {
            let (r, c) = (row as i32, col as i32);
            if grid.state(Point::new(r, c)) == Some(CellState::Barrier) {
                for point in [
                    Point::new(r - 1, c),
                    Point::new(r, c),
                    Point::new(r + 1, c),
                    Point::new(c, r + 1),
                ] {
                    knock(grid, point);
                }
            } else if raise(grid, Point::new(r, c)) {
                sink.checkpoint(grid)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameCounter, NoopSink};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(rows: usize) -> SearchGrid {
        let mut grid = SearchGrid::new(rows, rows, CellState::Unvisited);
        grid.set_start(Point::new(0, 0)).unwrap();
        let last = rows as i32 - 1;
        grid.set_end(Point::new(last, last)).unwrap();
        grid
    }

    #[test]
    fn random_walls_spare_endpoints() {
        let mut grid = board(30);
        let mut rng = StdRng::seed_from_u64(0);
        let mut counter = FrameCounter::new();
        random_walls(&mut grid, &mut rng, &mut counter).unwrap();
        assert_eq!(counter.frames, 30);
        assert_eq!(grid.state(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(grid.state(Point::new(29, 29)), Some(CellState::End));
        // 252 barriers expected out of 900 cells
        let barriers = grid.count(CellState::Barrier);
        assert!((150..350).contains(&barriers), "{barriers} barriers");
    }

    #[test]
    fn random_walls_stop_on_cancel() {
        let mut grid = board(10);
        let mut rng = StdRng::seed_from_u64(1);
        let mut counter = FrameCounter::with_limit(1);
        assert_eq!(
            random_walls(&mut grid, &mut rng, &mut counter),
            Err(SearchError::Cancelled)
        );
        // Only the first row was walled
        let barriers = grid.positions(CellState::Barrier);
        assert!(barriers.iter().all(|p| p.x == 0));
    }

    #[test]
    fn x_pattern_draws_diagonals() {
        let mut grid = SearchGrid::new(5, 5, CellState::Unvisited);
        let mut counter = FrameCounter::new();
        x_pattern(&mut grid, &mut counter).unwrap();
        assert_eq!(counter.frames, 3);
        assert_eq!(grid.to_string(), ".....\n.#.#.\n..#..\n.#.#.\n.....\n");
    }

    #[test]
    fn x_pattern_skips_pairs_touching_endpoints() {
        let mut grid = SearchGrid::new(5, 5, CellState::Unvisited);
        grid.set_start(Point::new(1, 3)).unwrap();
        let mut counter = FrameCounter::new();
        x_pattern(&mut grid, &mut counter).unwrap();
        assert_eq!(counter.frames, 2);
        assert_eq!(grid.to_string(), ".....\n...S.\n..#..\n.#.#.\n.....\n");
    }

    #[test]
    fn maze_is_seed_deterministic() {
        let mut first = board(30);
        let mut second = board(30);
        let mut counter = FrameCounter::new();
        iterative_maze(&mut first, &mut StdRng::seed_from_u64(7), &mut counter).unwrap();
        iterative_maze(&mut second, &mut StdRng::seed_from_u64(7), &mut NoopSink).unwrap();
        assert_eq!(first.to_string(), second.to_string());
        assert!(counter.frames > 0);
        assert_eq!(first.state(Point::new(0, 0)), Some(CellState::Start));
        assert_eq!(first.state(Point::new(29, 29)), Some(CellState::End));
    }

    #[test]
    fn maze_handles_tiny_grids() {
        for rows in 0..4 {
            let mut grid = SearchGrid::new(rows, rows, CellState::Unvisited);
            let mut rng = StdRng::seed_from_u64(rows as u64);
            assert_eq!(
                iterative_maze(&mut grid, &mut rng, &mut NoopSink),
                Ok(())
            );
        }
    }
}
