use crate::cell::CellState;
use crate::error::SearchError;
use crate::frame::FrameSink;
use crate::search::{heuristic, reconstruct_path, GridSearch, Predecessors};
use crate::search_grid::SearchGrid;
use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexMap;
use itertools::Itertools;
use std::collections::VecDeque;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Greedy best-first search on the Manhattan [heuristic] alone.
///
/// Discovered cells are scored and kept aside; after each expansion only the single best scored
/// cell (the earliest discovered on ties) moves on to the open queue. Leftover scores carry over
/// to later iterations, so the search only gives up once the start's component is exhausted, but
/// the route it reports follows whichever cell discovered each step first and is generally not
/// the shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyBestFirstSearch;

impl GridSearch for GreedyBestFirstSearch {
    fn name(&self) -> &'static str {
        "Greedy-Best-First Search"
    }

    fn search<S>(
        &self,
        grid: &mut SearchGrid,
        start: Point,
        end: Point,
        sink: &mut S,
    ) -> Result<bool, SearchError>
    where
        S: FrameSink + ?Sized,
    {
        let mut open = VecDeque::from([start]);
        let mut came_from = Predecessors::default();
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut scores: FxIndexMap<Point, i32> = FxIndexMap::default();

        while let Some(vertex) = open.pop_front() {
            if vertex == end {
                reconstruct_path(grid, &came_from, start, end, sink)?;
                return Ok(true);
            }
            for neighbour in grid.neighbours(vertex) {
                if visited.insert(neighbour) {
                    came_from.insert(neighbour, vertex);
                    if neighbour == end {
                        reconstruct_path(grid, &came_from, start, end, sink)?;
                        return Ok(true);
                    }
                    scores.insert(neighbour, heuristic(&neighbour, &end));
                    grid.mark(neighbour, CellState::Open);
                }
            }
            let best = scores.values().position_min();
            match best.and_then(|ix| scores.shift_remove_index(ix)) {
                Some((next, _)) => open.push_back(next),
                None => {
                    if vertex != start {
                        grid.mark(vertex, CellState::Closed);
                    }
                    return Ok(false);
                }
            }
            sink.checkpoint(grid)?;
            if vertex != start {
                grid.mark(vertex, CellState::Closed);
            }
        }
        Ok(false)
    }
}
