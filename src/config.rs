/// Number of rows (and columns) on a freshly reset board.
pub const DEFAULT_ROWS: usize = 30;
/// Side length in pixels of the square window the board is drawn into.
pub const DEFAULT_WIDTH: u32 = 900;

/// Board dimensions handed to [SearchGrid::from_config](crate::SearchGrid::from_config).
/// Only read at construction; changing the dimension means building a new grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub rows: usize,
    pub width: u32,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            rows: DEFAULT_ROWS,
            width: DEFAULT_WIDTH,
        }
    }
}

impl GridConfig {
    pub fn new(rows: usize, width: u32) -> GridConfig {
        GridConfig { rows, width }
    }

    /// Pixel size of one cell. The remainder of `width / rows` is left undrawn.
    pub fn cell_size(&self) -> u32 {
        if self.rows == 0 {
            0
        } else {
            self.width / self.rows as u32
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_uses_thirty_pixel_cells() {
        let config = GridConfig::default();
        assert_eq!(config.rows, 30);
        assert_eq!(config.cell_size(), 30);
        assert_eq!(config.cell_count(), 900);
    }

    #[test]
    fn cell_size_rounds_down() {
        assert_eq!(GridConfig::new(7, 100).cell_size(), 14);
        assert_eq!(GridConfig::new(0, 100).cell_size(), 0);
    }
}
