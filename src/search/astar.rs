use crate::cell::CellState;
use crate::error::SearchError;
use crate::frame::FrameSink;
use crate::search::{heuristic, reconstruct_path, GridSearch, Predecessors};
use crate::search_grid::SearchGrid;
use fxhash::FxHashSet;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Frontier entry. [BinaryHeap] is a max-heap, so the ordering is reversed: the smallest
/// `f_score` comes out first and among equal scores the earliest insertion.
struct SmallestCostHolder {
    f_score: i32,
    count: usize,
    point: Point,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score && self.count == other.count
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        match other.f_score.cmp(&self.f_score) {
            Ordering::Equal => other.count.cmp(&self.count),
            s => s,
        }
    }
}

/// A* with the Manhattan [heuristic] and unit step cost. Optimal on this grid.
#[derive(Clone, Copy, Debug, Default)]
pub struct AstarSearch;

impl GridSearch for AstarSearch {
    fn name(&self) -> &'static str {
        "A*"
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
        let mut count = 0;
        let mut open_set = BinaryHeap::new();
        open_set.push(SmallestCostHolder {
            f_score: heuristic(&start, &end),
            count,
            point: start,
        });
        let mut open_set_hash = FxHashSet::default();
        open_set_hash.insert(start);
        let mut came_from = Predecessors::default();
        // i32::MAX stands in for "not reached yet"
        let mut g_score: SimpleGrid<i32> = SimpleGrid::new(grid.rows(), grid.cols(), i32::MAX);
        g_score.set(start.x as usize, start.y as usize, 0);

        while let Some(SmallestCostHolder { point: current, .. }) = open_set.pop() {
            open_set_hash.remove(&current);
            if current == end {
                reconstruct_path(grid, &came_from, start, end, sink)?;
                return Ok(true);
            }
            let tentative_g_score = g_score.get(current.x as usize, current.y as usize) + 1;
            for neighbour in grid.neighbours(current) {
                let (x, y) = (neighbour.x as usize, neighbour.y as usize);
                if tentative_g_score < g_score.get(x, y) {
                    came_from.insert(neighbour, current);
                    g_score.set(x, y, tentative_g_score);
                    // Already queued entries keep their priority
                    if open_set_hash.insert(neighbour) {
                        count += 1;
                        open_set.push(SmallestCostHolder {
                            f_score: tentative_g_score + heuristic(&neighbour, &end),
                            count,
                            point: neighbour,
                        });
                        if neighbour != end {
                            grid.mark(neighbour, CellState::Open);
                        }
                    }
                }
            }
            sink.checkpoint(grid)?;
            if current != start {
                grid.mark(current, CellState::Closed);
            }
        }
        Ok(false)
    }
}
