use crate::cell::CellState;
use crate::error::SearchError;
use crate::frame::FrameSink;
use crate::search::GridSearch;
use crate::search_grid::SearchGrid;
use fxhash::FxHashSet;
use grid_util::point::Point;
use itertools::Itertools;

/// Stack based depth-first search. Paths are not shortest.
///
/// Cells are recorded in the order they are popped and that record doubles as the "seen" test
/// and as the trail shown on success: every recorded cell is painted as path, dead ends
/// included, so the result shows where the search went rather than a minimal route.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirstSearch;

impl GridSearch for DepthFirstSearch {
    fn name(&self) -> &'static str {
        "Depth-First Search"
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
        let mut stack = vec![start];
        let mut visited: Vec<Point> = Vec::new();
        // Cells can sit on the stack several times, later copies are skipped once closed
        let mut closed = FxHashSet::default();

        while let Some(node) = stack.pop() {
            visited.push(node);
            if closed.contains(&node) {
                continue;
            }
            if node == end {
                paint_trail(grid, &visited, start, end, sink)?;
                return Ok(true);
            }
            for neighbour in grid.neighbours(node) {
                if !visited.contains(&neighbour) {
                    if neighbour == end {
                        paint_trail(grid, &visited, start, end, sink)?;
                        return Ok(true);
                    }
                    stack.push(neighbour);
                    grid.mark(neighbour, CellState::Open);
                }
            }
            sink.checkpoint(grid)?;
            closed.insert(node);
            if node != start {
                grid.mark(node, CellState::Closed);
            }
        }
        Ok(false)
    }
}

/// Paints each visited cell once, in visiting order, with a frame per painted cell.
fn paint_trail<S>(
    grid: &mut SearchGrid,
    visited: &[Point],
    start: Point,
    end: Point,
    sink: &mut S,
) -> Result<(), SearchError>
where
    S: FrameSink + ?Sized,
{
    for &point in visited
        .iter()
        .unique()
        .filter(|&&p| p != start && p != end)
    {
        grid.mark(point, CellState::Path);
        sink.checkpoint(grid)?;
    }
    Ok(())
}
