//! Generic row-major grid with validated shape.

use super::error::GridError;

/// A height x width grid stored row-major in a single buffer.
///
/// Construction validates the shape, so every `Grid` has at least one row,
/// at least one column, and exactly `width * height` cells. Grids are
/// immutable once built; stages hand them to each other by value or by
/// shared reference.
///
/// # Example
///
/// ```
/// use vq_core::SampleGrid;
///
/// let grid = SampleGrid::from_rows(vec![vec![10, 10], vec![200, 200]]).unwrap();
///
/// assert_eq!(grid.width(), 2);
/// assert_eq!(grid.height(), 2);
/// assert_eq!(grid.get(1, 1), 200);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    cells: Vec<T>,
    width: usize,
    height: usize,
}

/// Grayscale intensities, one `u8` per pixel.
pub type SampleGrid = Grid<u8>;

/// Codebook indices, one `u32` per pixel.
pub type IndexGrid = Grid<u32>;

impl<T: Copy> Grid<T> {
    /// Wrap a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// - [`GridError::ZeroDimension`] if `width` or `height` is zero
    /// - [`GridError::LengthMismatch`] if `cells.len() != width * height`
    pub fn new(width: usize, height: usize, cells: Vec<T>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(GridError::LengthMismatch {
                len: cells.len(),
                width,
                height,
            });
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// - [`GridError::ZeroDimension`] if there are no rows or the rows are empty
    /// - [`GridError::RaggedRow`] if any row differs in length from the first
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            cells,
            width,
            height,
        })
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: empty grids are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells flattened in row-major order.
    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Consume the grid and return the flat row-major buffer.
    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    /// Row `y` as a slice. Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks_exact(self.width)
    }

    /// Cell at column `x`, row `y`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(x < self.width, "column {x} out of bounds (width {})", self.width);
        self.cells[y * self.width + x]
    }

    /// Apply `f` to every cell, keeping the shape.
    pub fn map<U: Copy>(&self, f: impl FnMut(T) -> U) -> Grid<U> {
        Grid {
            cells: self.cells.iter().copied().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Copy the grid out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl SampleGrid {
    /// Flattened intensities in row-major order.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.cells
    }
}

impl IndexGrid {
    /// Flattened codebook indices in row-major order.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.cells
    }
}
