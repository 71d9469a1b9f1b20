//! # pathfinding_visualizer
//!
//! Search core of a step-by-step pathfinding visualizer on a square, 4-connected grid. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm),
//! [breadth-first](https://en.wikipedia.org/wiki/Breadth-first_search),
//! [depth-first](https://en.wikipedia.org/wiki/Depth-first_search) and
//! [greedy best-first](https://en.wikipedia.org/wiki/Best-first_search) search. Every algorithm
//! colours the [SearchGrid] as it explores and hands it to a [FrameSink] after each step, which is
//! where a front end draws and where a run can be cancelled. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) so it can tell
//! whether a failed search had any path to find.
//!
//! Drawing, input handling and the window itself are left to the driver.
pub mod cell;
pub mod config;
pub mod error;
pub mod frame;
pub mod search;
pub mod search_grid;
pub mod walls;

pub use crate::cell::{Cell, CellState, Rgb};
pub use crate::config::GridConfig;
pub use crate::error::{GridError, SearchError};
pub use crate::frame::{Cancellable, FrameCounter, FrameSink, NoopSink, QuitSignal, Recorder};
pub use crate::search::astar::AstarSearch;
pub use crate::search::bfs::BreadthFirstSearch;
pub use crate::search::dfs::DepthFirstSearch;
pub use crate::search::greedy::GreedyBestFirstSearch;
pub use crate::search::{heuristic, GridSearch};
pub use crate::search_grid::SearchGrid;

use core::fmt;
use grid_util::point::Point;

/// The algorithms a driver can choose between.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    AStar,
    BreadthFirst,
    DepthFirst,
    GreedyBestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::AStar,
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::GreedyBestFirst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::AStar => AstarSearch.name(),
            Algorithm::BreadthFirst => BreadthFirstSearch.name(),
            Algorithm::DepthFirst => DepthFirstSearch.name(),
            Algorithm::GreedyBestFirst => GreedyBestFirstSearch.name(),
        }
    }

    /// See [GridSearch::run_between].
    pub fn run_between<S>(
        self,
        grid: &mut SearchGrid,
        start: Point,
        end: Point,
        sink: &mut S,
    ) -> Result<bool, SearchError>
    where
        S: FrameSink + ?Sized,
    {
        match self {
            Algorithm::AStar => AstarSearch.run_between(grid, start, end, sink),
            Algorithm::BreadthFirst => BreadthFirstSearch.run_between(grid, start, end, sink),
            Algorithm::DepthFirst => DepthFirstSearch.run_between(grid, start, end, sink),
            Algorithm::GreedyBestFirst => {
                GreedyBestFirstSearch.run_between(grid, start, end, sink)
            }
        }
    }

    /// Runs between the start and end placed on the grid. Fails with
    /// [SearchError::MissingEndpoints] if either is missing.
    pub fn run<S>(self, grid: &mut SearchGrid, sink: &mut S) -> Result<bool, SearchError>
    where
        S: FrameSink + ?Sized,
    {
        match grid.endpoints() {
            Some((start, end)) => self.run_between(grid, start, end, sink),
            None => Err(SearchError::MissingEndpoints),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A* from `start` to `end`. Returns whether a path was found.
pub fn run_astar<S>(
    grid: &mut SearchGrid,
    start: Point,
    end: Point,
    sink: &mut S,
) -> Result<bool, SearchError>
where
    S: FrameSink + ?Sized,
{
    AstarSearch.run_between(grid, start, end, sink)
}

/// Breadth-first search from `start` to `end`.
pub fn run_bfs<S>(
    grid: &mut SearchGrid,
    start: Point,
    end: Point,
    sink: &mut S,
) -> Result<bool, SearchError>
where
    S: FrameSink + ?Sized,
{
    BreadthFirstSearch.run_between(grid, start, end, sink)
}

/// Depth-first search from `start` to `end`. On success the whole visited trail is painted.
pub fn run_dfs<S>(
    grid: &mut SearchGrid,
    start: Point,
    end: Point,
    sink: &mut S,
) -> Result<bool, SearchError>
where
    S: FrameSink + ?Sized,
{
    DepthFirstSearch.run_between(grid, start, end, sink)
}

/// Greedy best-first search from `start` to `end`. The route found is not necessarily shortest.
pub fn run_greedy<S>(
    grid: &mut SearchGrid,
    start: Point,
    end: Point,
    sink: &mut S,
) -> Result<bool, SearchError>
where
    S: FrameSink + ?Sized,
{
    GreedyBestFirstSearch.run_between(grid, start, end, sink)
}
