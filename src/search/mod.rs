use crate::cell::CellState;
use crate::error::SearchError;
use crate::frame::FrameSink;
use crate::search_grid::SearchGrid;
use fxhash::FxHashMap;
use grid_util::point::Point;
use log::{debug, info, warn};

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod greedy;

/// Cell → the cell it was first reached from.
pub(crate) type Predecessors = FxHashMap<Point, Point>;

/// [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two cells.
/// Admissible and consistent for unit steps on a 4-connected grid.
pub fn heuristic(p1: &Point, p2: &Point) -> i32 {
    (p1.x - p2.x).abs() + (p1.y - p2.y).abs()
}

pub trait GridSearch {
    fn name(&self) -> &'static str;

    /// The traversal itself. Assumes `start != end`, both walkable, and adjacency that matches the
    /// current barriers; [run_between](Self::run_between) takes care of all three.
    fn search<S>(
        &self,
        grid: &mut SearchGrid,
        start: Point,
        end: Point,
        sink: &mut S,
    ) -> Result<bool, SearchError>
    where
        S: FrameSink + ?Sized;

    /// Searches from `start` to `end`, colouring the grid as it goes. Returns whether a path was
    /// found; an exhausted frontier is `Ok(false)`.
    fn run_between<S>(
        &self,
        grid: &mut SearchGrid,
        start: Point,
        end: Point,
        sink: &mut S,
    ) -> Result<bool, SearchError>
    where
        S: FrameSink + ?Sized,
    {
        for point in [start, end] {
            if !grid.can_move_to(point) {
                warn!("{} cannot start or end a search", point);
                return Err(SearchError::InvalidEndpoint(point));
            }
        }
        grid.update_neighbours();
        if start == end {
            debug!("Start and end coincide at {}", start);
            return Ok(true);
        }
        info!("Running {} from {} to {}", self.name(), start, end);
        let found = self.search(grid, start, end, sink)?;
        if found {
            debug!(
                "{} reached {} with {} path cells",
                self.name(),
                end,
                grid.count(CellState::Path)
            );
        } else {
            grid.update();
            if grid.reachable(&start, &end) {
                warn!(
                    "{} gave up although {} is reachable from {}",
                    self.name(),
                    end,
                    start
                );
            } else {
                debug!("{} is not reachable from {}", end, start);
            }
        }
        Ok(found)
    }

    /// Searches between the start and end designated on the grid.
    fn run<S>(&self, grid: &mut SearchGrid, sink: &mut S) -> Result<bool, SearchError>
    where
        S: FrameSink + ?Sized,
    {
        match grid.endpoints() {
            Some((start, end)) => self.run_between(grid, start, end, sink),
            None => {
                warn!("{} needs both a start and an end", self.name());
                Err(SearchError::MissingEndpoints)
            }
        }
    }
}

/// Walks the predecessors back from `end`, painting every cell strictly between the endpoints
/// and presenting a frame per painted cell.
pub(crate) fn reconstruct_path<S>(
    grid: &mut SearchGrid,
    came_from: &Predecessors,
    start: Point,
    end: Point,
    sink: &mut S,
) -> Result<(), SearchError>
where
    S: FrameSink + ?Sized,
{
    let trail = std::iter::successors(came_from.get(&end).copied(), |p| {
        came_from.get(p).copied()
    })
    .take_while(|p| *p != start)
    .collect::<Vec<Point>>();
    for point in trail {
        grid.mark(point, CellState::Path);
        sink.checkpoint(grid)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    pub fn grid(layout: &str) -> SearchGrid {
        layout.parse().unwrap()
    }

    /// Edges on the painted path, assuming the endpoints are not adjacent to each other through
    /// unpainted cells.
    pub fn path_len(grid: &SearchGrid) -> usize {
        grid.count(CellState::Path) + 1
    }

    /// Every grid layout in these tests designates its endpoints.
    pub fn run<A: GridSearch>(algorithm: &A, grid: &mut SearchGrid) -> (bool, usize) {
        let mut counter = crate::frame::FrameCounter::new();
        let found = algorithm.run(grid, &mut counter).unwrap();
        (found, counter.frames)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::frame::{FrameCounter, NoopSink};
    use crate::search::{
        astar::AstarSearch, bfs::BreadthFirstSearch, dfs::DepthFirstSearch,
        greedy::GreedyBestFirstSearch,
    };
    use grid_util::grid::Grid;

    fn for_each_algorithm<F: FnMut(&str, &dyn Fn(&mut SearchGrid) -> (bool, usize))>(mut f: F) {
        f("astar", &|g: &mut SearchGrid| run(&AstarSearch, g));
        f("bfs", &|g: &mut SearchGrid| run(&BreadthFirstSearch, g));
        f("dfs", &|g: &mut SearchGrid| run(&DepthFirstSearch, g));
        f("greedy", &|g: &mut SearchGrid| run(&GreedyBestFirstSearch, g));
    }

    #[test]
    fn manhattan_heuristic() {
        assert_eq!(heuristic(&Point::new(0, 0), &Point::new(2, 2)), 4);
        assert_eq!(heuristic(&Point::new(3, 1), &Point::new(1, 4)), 5);
        assert_eq!(heuristic(&Point::new(1, 1), &Point::new(1, 1)), 0);
    }

    #[test]
    fn wall_blocks_every_algorithm() {
        let layout = "
            S.#..
            ..#..
            ..#.E
            ..#..
            ..#..
        ";
        for_each_algorithm(|name, run| {
            let mut grid = grid(layout);
            let (found, _) = run(&mut grid);
            assert!(!found, "{name} crossed the wall");
            assert_eq!(grid.count(CellState::Path), 0, "{name} painted a path");
            // Everything on the start's side ends up closed
            assert_eq!(grid.count(CellState::Closed), 9, "{name}");
            assert_eq!(grid.count(CellState::Open), 0, "{name}");
        });
    }

    #[test]
    fn corridor_has_one_answer() {
        let layout = "
            #######
            S.....E
            #######
        ";
        for_each_algorithm(|name, run| {
            let mut grid = grid(layout);
            let (found, _) = run(&mut grid);
            assert!(found, "{name}");
            assert_eq!(path_len(&grid), 6, "{name}");
        });
    }

    #[test]
    fn start_equal_to_end_is_trivially_found() {
        let mut grid = SearchGrid::new(3, 3, CellState::Unvisited);
        let p = Point::new(1, 1);
        let mut counter = FrameCounter::new();
        for found in [
            AstarSearch.run_between(&mut grid, p, p, &mut counter),
            BreadthFirstSearch.run_between(&mut grid, p, p, &mut counter),
            DepthFirstSearch.run_between(&mut grid, p, p, &mut counter),
            GreedyBestFirstSearch.run_between(&mut grid, p, p, &mut counter),
        ] {
            assert_eq!(found, Ok(true));
        }
        assert_eq!(counter.frames, 0);
        assert_eq!(grid.count(CellState::Unvisited), 9);
    }

    #[test]
    fn missing_endpoints_are_rejected() {
        let mut grid = grid(
            "
            S..
            ...
            ",
        );
        let mut counter = FrameCounter::new();
        assert_eq!(
            AstarSearch.run(&mut grid, &mut counter),
            Err(SearchError::MissingEndpoints)
        );
        assert_eq!(counter.frames, 0);
        assert_eq!(grid.to_string(), "S..\n...\n");
    }

    #[test]
    fn blocked_or_outside_endpoints_are_rejected() {
        let mut grid = grid(".#.");
        let inside = Point::new(0, 0);
        assert_eq!(
            BreadthFirstSearch.run_between(&mut grid, inside, Point::new(0, 1), &mut NoopSink),
            Err(SearchError::InvalidEndpoint(Point::new(0, 1)))
        );
        assert_eq!(
            BreadthFirstSearch.run_between(&mut grid, Point::new(-1, 0), inside, &mut NoopSink),
            Err(SearchError::InvalidEndpoint(Point::new(-1, 0)))
        );
    }

    /// Barriers placed after the adjacency was last computed still block the next run.
    #[test]
    fn runs_see_fresh_barriers() {
        for_each_algorithm(|name, run| {
            let mut grid = grid("S.E");
            grid.set_barrier(Point::new(0, 1)).unwrap();
            assert!(grid.neighbours_dirty());
            let (found, _) = run(&mut grid);
            assert!(!found, "{name} walked through a new barrier");
        });
    }

    /// Endpoints passed explicitly are left uncoloured just like the designated ones.
    #[test]
    fn explicit_endpoints_keep_their_state() {
        for algorithm in crate::Algorithm::ALL {
            let mut open = grid(
                "
                ....
                ....
                ",
            );
            let (start, end) = (Point::new(0, 0), Point::new(1, 3));
            let found = algorithm.run_between(&mut open, start, end, &mut NoopSink);
            assert_eq!(found, Ok(true), "{algorithm}");
            assert_eq!(open.state(start), Some(CellState::Unvisited), "{algorithm}");
            assert_eq!(open.state(end), Some(CellState::Unvisited), "{algorithm}");
            assert!(open.count(CellState::Path) > 0, "{algorithm}");

            let mut designated = grid(
                "
                S..#
                ...E
                ",
            );
            let (start, end) = (Point::new(0, 1), Point::new(1, 2));
            let found = algorithm.run_between(&mut designated, start, end, &mut NoopSink);
            assert_eq!(found, Ok(true), "{algorithm}");
            assert_eq!(designated.state(start), Some(CellState::Unvisited), "{algorithm}");
            assert_eq!(designated.state(end), Some(CellState::Unvisited), "{algorithm}");
        }
    }

    #[test]
    fn explicit_start_survives_exhaustion() {
        for algorithm in crate::Algorithm::ALL {
            let mut grid = grid(
                "
                ..#.
                ..#.
                ",
            );
            let (start, end) = (Point::new(0, 0), Point::new(1, 3));
            let found = algorithm.run_between(&mut grid, start, end, &mut NoopSink);
            assert_eq!(found, Ok(false), "{algorithm}");
            assert_eq!(grid.state(start), Some(CellState::Unvisited), "{algorithm}");
            assert_eq!(grid.count(CellState::Closed), 3, "{algorithm}");
        }
    }

    #[test]
    fn adjacent_endpoints_need_no_path() {
        for_each_algorithm(|name, run| {
            let mut grid = grid("SE.");
            let (found, frames) = run(&mut grid);
            assert!(found, "{name}");
            assert_eq!(grid.count(CellState::Path), 0, "{name}");
            assert!(frames <= 1, "{name}");
        });
    }

    #[test]
    fn cancellation_keeps_partial_colouring() {
        let mut grid = grid(
            "
            S....
            .....
            .....
            ....E
            ",
        );
        let mut counter = FrameCounter::with_limit(3);
        assert_eq!(
            AstarSearch.run(&mut grid, &mut counter),
            Err(SearchError::Cancelled)
        );
        assert_eq!(counter.frames, 3);
        assert_eq!(grid.count(CellState::Path), 0);
        // The third node was cancelled before it could be closed
        assert_eq!(grid.count(CellState::Closed), 1);
        assert!(grid.count(CellState::Open) > 0);
    }
}
