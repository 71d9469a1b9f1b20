use grid_util::point::Point;

/// An RGB triple as used by the drawing side of the visualizer.
pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (255, 255, 255);
pub const BLACK: Rgb = (0, 0, 0);
pub const RED: Rgb = (255, 0, 0);
pub const GREEN: Rgb = (0, 255, 0);
pub const PURPLE: Rgb = (128, 0, 128);
pub const ORANGE: Rgb = (255, 165, 0);
pub const GREY: Rgb = (128, 128, 128);
pub const TURQUOISE: Rgb = (64, 224, 208);

/// Colour of the lines separating cells.
pub const GRID_LINE: Rgb = GREY;

/// Traversal state of a single cell. Search logic only ever looks at this; colours are derived
/// from it through [CellState::color].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Unvisited,
    Open,
    Closed,
    Barrier,
    Start,
    End,
    Path,
}

impl CellState {
    pub fn color(self) -> Rgb {
        match self {
            CellState::Unvisited => WHITE,
            CellState::Open => GREEN,
            CellState::Closed => RED,
            CellState::Barrier => BLACK,
            CellState::Start => ORANGE,
            CellState::End => TURQUOISE,
            CellState::Path => PURPLE,
        }
    }

    /// Character used by the text rendering of a grid.
    pub fn glyph(self) -> char {
        match self {
            CellState::Unvisited => '.',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Barrier => '#',
            CellState::Start => 'S',
            CellState::End => 'E',
            CellState::Path => '*',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<CellState> {
        match glyph {
            '.' => Some(CellState::Unvisited),
            'o' => Some(CellState::Open),
            'x' => Some(CellState::Closed),
            '#' => Some(CellState::Barrier),
            'S' => Some(CellState::Start),
            'E' => Some(CellState::End),
            '*' => Some(CellState::Path),
            _ => None,
        }
    }

    /// Start and end cells, which search colouring leaves alone.
    pub fn is_endpoint(self) -> bool {
        matches!(self, CellState::Start | CellState::End)
    }
}

/// Offsets of the 4-neighbourhood in enumeration order: down, up, right, left. Bit `i` of a
/// neighbour mask refers to entry `i`.
pub(crate) const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) fn neighbour_at(point: Point, index: usize) -> Point {
    let (d_row, d_col) = NEIGHBOUR_OFFSETS[index];
    Point::new(point.x + d_row, point.y + d_col)
}

/// A single square of the board. Besides its state it caches which of its four neighbours are
/// walkable as a bit mask, filled in by
/// [SearchGrid::update_neighbours](crate::SearchGrid::update_neighbours).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    state: CellState,
    neighbours: u8,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Cell {
        Cell {
            row,
            col,
            state: CellState::Unvisited,
            neighbours: 0,
        }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.row as i32, self.col as i32)
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub(crate) fn set_neighbour_mask(&mut self, mask: u8) {
        self.neighbours = mask;
    }

    /// Walkable neighbours in down, up, right, left order, as cached by the last adjacency update.
    pub fn neighbours(&self) -> impl Iterator<Item = Point> + '_ {
        let pos = self.pos();
        (0..NEIGHBOUR_OFFSETS.len())
            .filter(move |&ix| (self.neighbours & 1 << ix) != 0)
            .map(move |ix| neighbour_at(pos, ix))
    }

    pub fn is_open(&self) -> bool {
        self.state == CellState::Open
    }
    pub fn is_closed(&self) -> bool {
        self.state == CellState::Closed
    }
    pub fn is_barrier(&self) -> bool {
        self.state == CellState::Barrier
    }
    pub fn is_start(&self) -> bool {
        self.state == CellState::Start
    }
    pub fn is_end(&self) -> bool {
        self.state == CellState::End
    }
    pub fn is_path(&self) -> bool {
        self.state == CellState::Path
    }

    pub fn reset(&mut self) {
        self.state = CellState::Unvisited;
    }
    pub fn make_start(&mut self) {
        self.state = CellState::Start;
    }
    pub fn make_end(&mut self) {
        self.state = CellState::End;
    }
    pub fn make_barrier(&mut self) {
        self.state = CellState::Barrier;
    }
    pub fn make_open(&mut self) {
        self.state = CellState::Open;
    }
    pub fn make_closed(&mut self) {
        self.state = CellState::Closed;
    }
    pub fn make_path(&mut self) {
        self.state = CellState::Path;
    }

    pub(crate) fn make(&mut self, state: CellState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_overwrite_unconditionally() {
        let mut cell = Cell::new(2, 3);
        assert_eq!(cell.state(), CellState::Unvisited);
        cell.make_barrier();
        assert!(cell.is_barrier());
        cell.make_open();
        assert!(cell.is_open());
        cell.make_closed();
        cell.make_path();
        assert!(cell.is_path());
        cell.make_start();
        cell.make_end();
        assert!(cell.is_end());
        cell.reset();
        assert_eq!(cell.state(), CellState::Unvisited);
        assert_eq!(cell.pos(), Point::new(2, 3));
    }

    #[test]
    fn glyphs_round_trip() {
        for state in [
            CellState::Unvisited,
            CellState::Open,
            CellState::Closed,
            CellState::Barrier,
            CellState::Start,
            CellState::End,
            CellState::Path,
        ] {
            assert_eq!(CellState::from_glyph(state.glyph()), Some(state));
        }
        assert_eq!(CellState::from_glyph('?'), None);
    }

    #[test]
    fn palette_matches_states() {
        assert_eq!(CellState::Closed.color(), RED);
        assert_eq!(CellState::Open.color(), GREEN);
        assert_eq!(CellState::Path.color(), PURPLE);
        assert_eq!(CellState::Barrier.color(), BLACK);
    }

    /// Mask bits map to down, up, right, left.
    #[test]
    fn neighbour_mask_order() {
        let mut cell = Cell::new(1, 1);
        cell.set_neighbour_mask(0b1011);
        let neighbours = cell.neighbours().collect::<Vec<_>>();
        assert_eq!(
            neighbours,
            vec![Point::new(2, 1), Point::new(0, 1), Point::new(1, 0)]
        );
    }
}
