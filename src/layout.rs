use crate::math::Offset;

/// Near-square grid used to seed icon positions.
///
/// `columns = ceil(sqrt(total))`, `rows = ceil(total / columns)`. Each icon sits a
/// quarter cell in from the top-left corner of its own cell, which spreads the
/// icons out without any collision checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
}

impl GridLayout {
    pub fn for_count(total: usize) -> Self {
        let total = total.max(1);
        let columns = (total as f64).sqrt().ceil() as usize;
        let rows = total.div_ceil(columns);
        GridLayout { columns, rows }
    }

    /// (row, col) of the cell owned by `index`.
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Cell width and height in percent.
    pub fn cell_extent(&self) -> (f64, f64) {
        (100.0 / self.columns as f64, 100.0 / self.rows as f64)
    }

    pub fn seed_position(&self, index: usize) -> Offset {
        let (row, col) = self.cell(index);
        let (cell_w, cell_h) = self.cell_extent();
        Offset::new(
            row as f64 * cell_h + cell_h / 4.0,
            col as f64 * cell_w + cell_w / 4.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn eleven_icons_use_a_four_by_three_grid() {
        let grid = GridLayout::for_count(11);
        assert_eq!(grid, GridLayout { columns: 4, rows: 3 });

        let pos = grid.seed_position(0);
        assert!((pos.left - 6.25).abs() < 1e-9);
        assert!((pos.top - 100.0 / 3.0 / 4.0).abs() < 1e-9);

        // last icon lands in row 2, col 2
        let last = grid.seed_position(10);
        assert!((last.left - 56.25).abs() < 1e-9);
        assert!((last.top - (200.0 / 3.0 + 100.0 / 12.0)).abs() < 1e-9);
    }

    #[test]
    fn perfect_squares_fill_the_grid() {
        assert_eq!(GridLayout::for_count(9), GridLayout { columns: 3, rows: 3 });
        assert_eq!(GridLayout::for_count(16), GridLayout { columns: 4, rows: 4 });
        assert_eq!(GridLayout::for_count(1), GridLayout { columns: 1, rows: 1 });
    }

    #[test]
    fn cells_are_unique_and_never_overflow() {
        for total in 1..=64 {
            let grid = GridLayout::for_count(total);
            assert!(grid.rows * grid.columns >= total);
            // never a fully empty trailing row
            assert!((grid.rows - 1) * grid.columns < total);

            let mut seen = HashSet::new();
            for index in 0..total {
                let (row, col) = grid.cell(index);
                assert!(row < grid.rows && col < grid.columns, "total={total} index={index}");
                assert!(seen.insert((row, col)), "duplicate cell for index {index}");
            }
        }
    }

    #[test]
    fn zero_icons_degrade_to_single_cell() {
        assert_eq!(GridLayout::for_count(0), GridLayout { columns: 1, rows: 1 });
    }
}
