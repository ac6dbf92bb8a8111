//! Row-major grids laid out over flat slices.

mod sealed {
    pub trait Sealed {}
    impl<T> Sealed for [T] {}
}

use arrayvec::ArrayVec;

use self::sealed::Sealed;

pub trait GridExt<T>: Sealed {
    /// Convert type into grid with a stride of `0`.
    ///
    /// See [GridExt::as_grid_with_stride].
    #[inline]
    fn as_grid(&self, columns: usize) -> Grid<'_, T> {
        self.as_grid_with_stride(columns, 0)
    }

    /// Convert type into a grid with the given topology.
    ///
    /// The `columns` is the width of a row while `stride` is the number of
    /// elements between each row, like the newline terminating each line of
    /// a text input.
    ///
    /// Only complete rows are part of the grid, but the separator after the
    /// last row is optional.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let data = b"12\n34\n56";
    /// let grid = data.as_grid_with_stride(2, 1);
    ///
    /// assert_eq!(grid.rows_len(), 3);
    /// assert_eq!(grid.row_offset(2), 6);
    /// assert_eq!(grid.try_get(2, 1), Some(&b'6'));
    /// ```
    fn as_grid_with_stride(&self, columns: usize, stride: usize) -> Grid<'_, T>;
}

impl<T> GridExt<T> for [T] {
    #[inline]
    fn as_grid_with_stride(&self, columns: usize, stride: usize) -> Grid<'_, T> {
        Grid::new(self, columns, stride)
    }
}

/// An immutable grid over a slice.
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a, T> {
    data: &'a [T],
    rows: usize,
    columns: usize,
    stride: usize,
}

impl<'a, T> Grid<'a, T> {
    fn new(data: &'a [T], columns: usize, stride: usize) -> Self {
        let step = columns + stride;

        let rows = match step {
            0 => 0,
            step => (data.len() + stride) / step,
        };

        Self {
            data,
            rows,
            columns,
            stride,
        }
    }

    /// Get number of rows in the grid.
    #[inline]
    pub fn rows_len(&self) -> usize {
        self.rows
    }

    /// Get number of columns in the grid.
    #[inline]
    pub fn columns_len(&self) -> usize {
        self.columns
    }

    /// Index in the underlying slice where the given row starts.
    #[inline]
    pub fn row_offset(&self, row: usize) -> usize {
        row * (self.columns + self.stride)
    }

    /// Access the specified row in the grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    /// let grid = data.as_grid(4);
    ///
    /// assert_eq!(grid.row(1), Some(&[5, 6, 7, 8][..]));
    /// assert_eq!(grid.row(3), None);
    /// ```
    #[inline]
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row >= self.rows {
            return None;
        }

        let start = self.row_offset(row);
        self.data.get(start..start + self.columns)
    }

    /// Get the element at the given row and column.
    ///
    /// Columns at or past [Grid::columns_len] are out of bounds, even if the
    /// underlying slice has a separator or a following row there.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let data = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
    /// let grid = data.as_grid(4);
    ///
    /// assert_eq!(grid.try_get(0, 1), Some(&2));
    /// assert_eq!(grid.try_get(2, 0), Some(&9));
    /// assert_eq!(grid.try_get(0, 4), None);
    /// assert_eq!(grid.try_get(3, 0), None);
    /// ```
    #[inline]
    pub fn try_get(&self, row: usize, column: usize) -> Option<&'a T> {
        self.row(row)?.get(column)
    }

    /// Collect an iterator of columns and rows into an array.
    ///
    /// This collects up until the array is full, an incorrect index is
    /// encountered, or the iterator completes.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib::prelude::*;
    ///
    /// let data = b"1 \n23\n 4";
    /// let grid = data.as_grid_with_stride(2, 1);
    ///
    /// let column = grid.collect::<3>((0..3).map(|row| (1, row)));
    /// assert_eq!(&column[..], b" 34");
    /// ```
    #[inline]
    pub fn collect<const N: usize>(
        &self,
        it: impl IntoIterator<Item = (usize, usize)>,
    ) -> ArrayVec<T, N>
    where
        T: Copy,
    {
        let mut values = ArrayVec::new();

        for (column, row) in it {
            let Some(value) = self.try_get(row, column) else {
                break;
            };

            if values.try_push(*value).is_err() {
                break;
            }
        }

        values
    }
}
