use crate::cell::{neighbour_at, Cell, CellState, NEIGHBOUR_OFFSETS};
use crate::config::{GridConfig, DEFAULT_WIDTH};
use crate::error::GridError;
use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use itertools::iproduct;
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use std::str::FromStr;

/// [SearchGrid] owns the cells of the board. Next to the raw [CellState] of each cell it caches
/// walkable neighbours as a [u8] mask per cell and maintains connected components in a
/// [UnionFind], so reachability questions can be answered without searching.
///
/// Points address cells with `x` as the row and `y` as the column. Implements [Grid] over
/// [CellState]; setting a state through the trait keeps the start/end bookkeeping and the
/// dirty flags consistent.
#[derive(Clone, Debug)]
pub struct SearchGrid {
    cells: SimpleGrid<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    neighbours_dirty: bool,
    start: Option<Point>,
    end: Option<Point>,
    config: GridConfig,
}

impl Default for SearchGrid {
    fn default() -> SearchGrid {
        SearchGrid::from_config(&GridConfig::default())
    }
}

impl SearchGrid {
    /// Creates an empty square board as described by `config`.
    pub fn from_config(config: &GridConfig) -> SearchGrid {
        SearchGrid::blank(config.rows, config.rows, *config)
    }

    fn blank(rows: usize, cols: usize, config: GridConfig) -> SearchGrid {
        let mut cells = SimpleGrid::new(rows, cols, Cell::default());
        for (row, col) in iproduct!(0..rows, 0..cols) {
            cells.set(row, col, Cell::new(row, col));
        }
        let mut grid = SearchGrid {
            cells,
            components: UnionFind::new(rows * cols),
            components_dirty: false,
            neighbours_dirty: false,
            start: None,
            end: None,
            config,
        };
        grid.generate_components();
        grid.update_neighbours();
        grid
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }
    pub fn rows(&self) -> usize {
        self.cells.width()
    }
    pub fn cols(&self) -> usize {
        self.cells.height()
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.rows()
            && (point.y as usize) < self.cols()
    }

    /// Flat index of an in-bounds point, used for the component structure.
    fn index(&self, point: Point) -> usize {
        point.x as usize * self.cols() + point.y as usize
    }

    pub fn cell(&self, point: Point) -> Option<Cell> {
        if self.in_bounds(point) {
            Some(self.cells.get(point.x as usize, point.y as usize))
        } else {
            None
        }
    }

    pub fn state(&self, point: Point) -> Option<CellState> {
        self.cell(point).map(|cell| cell.state())
    }

    /// Whether a search may step onto `point`.
    pub fn can_move_to(&self, point: Point) -> bool {
        self.cell(point).is_some_and(|cell| !cell.is_barrier())
    }

    fn update_cell<F>(&mut self, point: Point, f: F)
    where
        F: FnOnce(&mut Cell),
    {
        let (x, y) = (point.x as usize, point.y as usize);
        let mut cell = self.cells.get(x, y);
        f(&mut cell);
        self.cells.set(x, y, cell);
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }
    pub fn end(&self) -> Option<Point> {
        self.end
    }
    /// Start and end, if both have been placed.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.start.zip(self.end)
    }

    fn check_bounds(&self, point: Point) -> Result<(), GridError> {
        if self.in_bounds(point) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds(point))
        }
    }

    /// Designates the start cell, moving it if one was already placed.
    pub fn set_start(&mut self, point: Point) -> Result<(), GridError> {
        self.check_bounds(point)?;
        if self.end == Some(point) {
            return Err(GridError::Occupied(point));
        }
        self.set(point.x as usize, point.y as usize, CellState::Start);
        Ok(())
    }

    /// Designates the end cell, moving it if one was already placed.
    pub fn set_end(&mut self, point: Point) -> Result<(), GridError> {
        self.check_bounds(point)?;
        if self.start == Some(point) {
            return Err(GridError::Occupied(point));
        }
        self.set(point.x as usize, point.y as usize, CellState::End);
        Ok(())
    }

    /// Blocks a cell. Refuses to bury the start or the end under a barrier.
    pub fn set_barrier(&mut self, point: Point) -> Result<(), GridError> {
        self.check_bounds(point)?;
        if self.start == Some(point) || self.end == Some(point) {
            warn!("Refusing to place a barrier on endpoint {}", point);
            return Err(GridError::Occupied(point));
        }
        self.set(point.x as usize, point.y as usize, CellState::Barrier);
        Ok(())
    }

    /// Returns a cell to [CellState::Unvisited], forgetting it as start or end.
    pub fn reset_cell(&mut self, point: Point) -> Result<(), GridError> {
        self.check_bounds(point)?;
        self.set(point.x as usize, point.y as usize, CellState::Unvisited);
        Ok(())
    }

    /// Primary-button painting: the first paint places the start, the next one the end, and
    /// every later paint raises a barrier. Painting onto an endpoint does nothing.
    pub fn paint(&mut self, point: Point) -> Result<(), GridError> {
        self.check_bounds(point)?;
        let on_start = self.start == Some(point);
        let on_end = self.end == Some(point);
        if self.start.is_none() && !on_end {
            self.set_start(point)
        } else if self.end.is_none() && !on_start {
            self.set_end(point)
        } else if !on_start && !on_end {
            self.set_barrier(point)
        } else {
            Ok(())
        }
    }

    /// Secondary-button erasing.
    pub fn erase(&mut self, point: Point) -> Result<(), GridError> {
        self.reset_cell(point)
    }

    /// Colours a cell during a search. The start and end cells keep their state and points
    /// outside the grid are ignored.
    pub fn mark(&mut self, point: Point, state: CellState) {
        debug_assert!(matches!(
            state,
            CellState::Open | CellState::Closed | CellState::Path
        ));
        if self.state(point).is_some_and(|s| !s.is_endpoint()) {
            self.update_cell(point, |cell| cell.make(state));
        }
    }

    /// Wipes the Open/Closed/Path colouring left behind by a previous run.
    pub fn clear_search_marks(&mut self) {
        for (row, col) in iproduct!(0..self.rows(), 0..self.cols()) {
            let mut cell = self.cells.get(row, col);
            if matches!(
                cell.state(),
                CellState::Open | CellState::Closed | CellState::Path
            ) {
                cell.reset();
                self.cells.set(row, col, cell);
            }
        }
    }

    /// Replaces the board with an empty one of the same dimensions.
    pub fn clear(&mut self) {
        info!("Clearing {}x{} grid", self.rows(), self.cols());
        *self = SearchGrid::blank(self.rows(), self.cols(), self.config);
    }

    /// Walkable neighbours of `point` in down, up, right, left order, read from the cached
    /// adjacency. Only reflects the current barriers after [update_neighbours](Self::update_neighbours).
    pub fn neighbours(&self, point: Point) -> Vec<Point> {
        self.cell(point)
            .map(|cell| cell.neighbours().collect())
            .unwrap_or_default()
    }

    pub fn neighbours_dirty(&self) -> bool {
        self.neighbours_dirty
    }

    /// Recomputes the neighbour mask of every cell from the current barrier layout.
    pub fn update_neighbours(&mut self) {
        for (row, col) in iproduct!(0..self.rows(), 0..self.cols()) {
            let point = Point::new(row as i32, col as i32);
            let mask = (0..NEIGHBOUR_OFFSETS.len())
                .filter(|&ix| self.can_move_to(neighbour_at(point, ix)))
                .fold(0u8, |mask, ix| mask | 1 << ix);
            self.update_cell(point, |cell| cell.set_neighbour_mask(mask));
        }
        self.neighbours_dirty = false;
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self
                .components
                .equiv(self.index(*start), self.index(*goal))
        } else {
            true
        }
    }

    /// Retrieves the component id a given [Point] belongs to, or [None] outside the grid.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        if self.in_bounds(*point) {
            Some(self.components.find(self.index(*point)))
        } else {
            None
        }
    }

    /// Regenerates whatever barrier changes have made stale.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
        if self.neighbours_dirty {
            self.update_neighbours();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same components.
    pub fn generate_components(&mut self) {
        let (rows, cols) = (self.rows(), self.cols());
        self.components = UnionFind::new(rows * cols);
        self.components_dirty = false;
        for (row, col) in iproduct!(0..rows, 0..cols) {
            let point = Point::new(row as i32, col as i32);
            if !self.can_move_to(point) {
                continue;
            }
            let parent_ix = self.index(point);
            // Linking down and right covers every edge once
            for next in [Point::new(point.x + 1, point.y), Point::new(point.x, point.y + 1)] {
                if self.can_move_to(next) {
                    let ix = self.index(next);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }

    /// All cell states in row-major order.
    pub fn states(&self) -> impl Iterator<Item = CellState> + '_ {
        iproduct!(0..self.rows(), 0..self.cols())
            .map(move |(row, col)| self.cells.get(row, col).state())
    }

    /// Positions holding `state`, in row-major order.
    pub fn positions(&self, state: CellState) -> Vec<Point> {
        iproduct!(0..self.rows(), 0..self.cols())
            .filter(|&(row, col)| self.cells.get(row, col).state() == state)
            .map(|(row, col)| Point::new(row as i32, col as i32))
            .collect()
    }

    pub fn count(&self, state: CellState) -> usize {
        self.states().filter(|s| *s == state).count()
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows() {
            let line = (0..self.cols())
                .map(|col| self.cells.get(row, col).state().glyph())
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Parses the glyph layout produced by [Display](fmt::Display), one line per row. Blank lines and
/// surrounding whitespace are ignored.
impl FromStr for SearchGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<SearchGrid, GridError> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut grid = SearchGrid::blank(rows, cols, GridConfig::new(rows, DEFAULT_WIDTH));
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(GridError::Ragged {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let state = CellState::from_glyph(glyph).ok_or(GridError::UnknownGlyph(glyph))?;
                let duplicate = match state {
                    CellState::Start => grid.start.is_some(),
                    CellState::End => grid.end.is_some(),
                    _ => false,
                };
                if duplicate {
                    return Err(GridError::DuplicateEndpoint(glyph));
                }
                grid.set(row, col, state);
            }
        }
        grid.generate_components();
        grid.update_neighbours();
        Ok(grid)
    }
}

impl Grid<CellState> for SearchGrid {
    fn new(width: usize, height: usize, default_value: CellState) -> Self {
        let mut grid = SearchGrid::blank(width, height, GridConfig::new(width, DEFAULT_WIDTH));
        match default_value {
            CellState::Unvisited => {}
            CellState::Start | CellState::End => {
                warn!("A grid cannot be filled with {:?}, leaving it empty", default_value);
            }
            state => {
                for (row, col) in iproduct!(0..width, 0..height) {
                    grid.set(row, col, state);
                }
                grid.update();
            }
        }
        grid
    }
    fn get(&self, x: usize, y: usize) -> CellState {
        self.cells.get(x, y).state()
    }
    /// Updates a cell. Keeps at most one start and one end, joins newly connected components and
    /// flags the components as dirty if they are (potentially) broken apart. Any change to the
    /// barrier layout invalidates the cached adjacency.
    fn set(&mut self, x: usize, y: usize, state: CellState) {
        let p = Point::new(x as i32, y as i32);
        let previous = self.cells.get(x, y).state();
        if previous == state {
            return;
        }
        match previous {
            CellState::Start => self.start = None,
            CellState::End => self.end = None,
            _ => {}
        }
        let replaced = match state {
            CellState::Start => self.start.replace(p),
            CellState::End => self.end.replace(p),
            _ => None,
        };
        if let Some(old) = replaced {
            self.update_cell(old, Cell::reset);
        }
        self.update_cell(p, |cell| cell.make(state));

        let blocked = state == CellState::Barrier;
        if (previous == CellState::Barrier) != blocked {
            self.neighbours_dirty = true;
            if blocked {
                self.components_dirty = true;
            } else {
                let p_ix = self.index(p);
                for n in (0..NEIGHBOUR_OFFSETS.len()).map(|ix| neighbour_at(p, ix)) {
                    if self.can_move_to(n) {
                        let n_ix = self.index(n);
                        self.components.union(p_ix, n_ix);
                    }
                }
            }
        }
    }
    fn width(&self) -> usize {
        self.cells.width()
    }
    fn height(&self) -> usize {
        self.cells.height()
    }
}
