use crate::cell::CellState;
use crate::error::SearchError;
use crate::frame::FrameSink;
use crate::search::{reconstruct_path, GridSearch, Predecessors};
use crate::search_grid::SearchGrid;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use std::collections::VecDeque;

/// Breadth-first search. Every step costs the same, so the first path found is a shortest one.
/// The end is recognised as soon as it is discovered, not only when it is dequeued.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSearch;

impl GridSearch for BreadthFirstSearch {
    fn name(&self) -> &'static str {
        "Breadth-First Search"
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
        let mut came_from = Predecessors::default();
        let mut visited = BoolGrid::new(grid.rows(), grid.cols(), false);
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited.set(start.x as usize, start.y as usize, true);

        while let Some(vertex) = queue.pop_front() {
            if vertex == end {
                reconstruct_path(grid, &came_from, start, end, sink)?;
                return Ok(true);
            }
            for neighbour in grid.neighbours(vertex) {
                let (x, y) = (neighbour.x as usize, neighbour.y as usize);
                if !visited.get(x, y) {
                    came_from.insert(neighbour, vertex);
                    if neighbour == end {
                        reconstruct_path(grid, &came_from, start, end, sink)?;
                        return Ok(true);
                    }
                    queue.push_back(neighbour);
                    visited.set(x, y, true);
                    grid.mark(neighbour, CellState::Open);
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
