use core::ops::{Add, Mul};

use anyhow::{Context, Result};
use lib::cli::{self, Answers, OutputEq};
use lib::grid::Grid;
use lib::input::IStrError;
use lib::prelude::{ByteSlice, GridExt, IStr};
use num::traits::{One, Zero};
use num::BigUint;
use thiserror::Error;

/// Number of rows in a worksheet, including the operator row.
const ROWS: usize = 5;

/// The row holding operators, every row above it holds digits.
const OPERATORS: usize = ROWS - 1;

#[derive(Debug, Error)]
enum Error {
    #[error("bad worksheet")]
    Input(#[from] IStrError),
    #[error("expected {expected} rows of width {width}, but got {actual}")]
    Rows {
        expected: usize,
        width: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Mul,
}

impl Op {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Op::Add),
            b'*' => Some(Op::Mul),
            _ => None,
        }
    }

    fn identity<T>(self) -> T
    where
        T: Zero + One,
    {
        match self {
            Op::Add => T::zero(),
            Op::Mul => T::one(),
        }
    }

    fn combine<T>(self, acc: T, n: T) -> T
    where
        T: Add<Output = T> + Mul<Output = T>,
    {
        match self {
            Op::Add => acc + n,
            Op::Mul => acc * n,
        }
    }
}

/// Both answers for a worksheet.
#[derive(Debug, PartialEq, Eq)]
struct Totals {
    /// Numbers read column by column.
    tot: BigUint,
    /// Numbers read row by row.
    rows: BigUint,
}

impl Answers for Totals {
    fn answers(&self) -> Vec<(&'static str, String)> {
        vec![("tot", self.tot.to_string()), ("rows", self.rows.to_string())]
    }
}

impl OutputEq for Totals {
    #[inline]
    fn output_eq(&self, other: &Self) -> bool {
        self == other
    }
}

fn main() -> Result<()> {
    let opts = cli::Opts::parse()?;
    let (input, path) = lib::input!("d06.txt");
    cli::run(&opts, None::<Totals>, || solve(input).with_context(|| path))?;
    Ok(())
}

/// Solve a worksheet of four digit rows followed by an operator row, all of
/// the same width and separated by newlines.
fn solve(input: IStr) -> Result<Totals, Error> {
    let grid = worksheet(input)?;

    Ok(Totals {
        tot: scan(&grid),
        rows: by_rows(&grid),
    })
}

/// Lay out the input as a grid, making sure all rows are present.
fn worksheet(input: IStr) -> Result<Grid<'static, u8>, Error> {
    let width = input.line_len()?;
    let grid = input.as_data().as_grid_with_stride(width, 1);

    if grid.rows_len() < ROWS {
        return Err(Error::Rows {
            expected: ROWS,
            width,
            actual: grid.rows_len(),
        });
    }

    log::info!(
        "worksheet: {ROWS} rows of width {width}, operators: {:?}",
        grid.row(OPERATORS).unwrap_or_default().as_bstr()
    );

    Ok(grid)
}

/// Sum up the result of every operator column.
fn scan(grid: &Grid<'_, u8>) -> BigUint {
    let mut total = BigUint::zero();

    // NB: the last column is never considered to be an operator.
    for column in 0..grid.columns_len().saturating_sub(1) {
        let Some(op) = grid
            .try_get(OPERATORS, column)
            .and_then(|&b| Op::from_byte(b))
        else {
            continue;
        };

        let value = walk(grid, op, column);
        log::debug!("column {column}: {op:?} => {value}");
        total += value;
    }

    total
}

/// Combine the numbers found in successive columns starting at `column`,
/// up until the first column which reads as zero.
///
/// A column holding nothing but a `0` digit therefore also ends the walk.
fn walk(grid: &Grid<'_, u8>, op: Op, column: usize) -> BigUint {
    let mut acc = op.identity::<BigUint>();
    let mut offset = 0;

    loop {
        let n = number(grid, column + offset);

        if n == 0 {
            return acc;
        }

        log::debug!("column {column}+{offset}: {n}");
        acc = op.combine(acc, BigUint::from(n));
        offset += 1;
    }
}

/// Read the digits in the given column top to bottom as a single number.
///
/// Bytes which are not digits are skipped, and reading outside of the grid
/// yields no digits.
fn number(grid: &Grid<'_, u8>, column: usize) -> u64 {
    let digits = grid.collect::<OPERATORS>((0..OPERATORS).map(|row| (column, row)));

    digits
        .iter()
        .filter(|d| d.is_ascii_digit())
        .fold(0, |n, d| n * 10 + u64::from(d - b'0'))
}

/// Treat every digit row as whitespace-separated numbers, and combine the
/// `n`th number of each row using the `n`th operator.
///
/// Words which are not numbers are ignored, as are rows too short to have an
/// `n`th number.
fn by_rows(grid: &Grid<'_, u8>) -> BigUint {
    let rows = (0..OPERATORS)
        .filter_map(|row| grid.row(row))
        .map(|row| {
            row.fields()
                .filter_map(|word| word.to_str().ok()?.parse::<u64>().ok())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let ops = grid
        .row(OPERATORS)
        .unwrap_or_default()
        .iter()
        .filter_map(|&b| Op::from_byte(b));

    let mut total = BigUint::zero();

    for (n, op) in ops.enumerate() {
        let value = rows
            .iter()
            .filter_map(|row| row.get(n))
            .fold(op.identity::<BigUint>(), |acc, &v| {
                op.combine(acc, BigUint::from(v))
            });

        log::debug!("problem {n}: {op:?} => {value}");
        total += value;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = include_bytes!("../../inputs/d06.txt");

    fn input_of(rows: &[&str]) -> IStr {
        let mut data = rows.join("\n");
        data.push('\n');
        IStr::new(Vec::leak(data.into_bytes()), 0)
    }

    fn tot(rows: &[&str]) -> BigUint {
        solve(input_of(rows)).unwrap().tot
    }

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_sum() {
        assert_eq!(tot(&["123 ", "    ", "    ", "    ", "+   "]), big(6));
    }

    #[test]
    fn test_product() {
        assert_eq!(tot(&["234 ", "    ", "    ", "    ", "*   "]), big(24));
    }

    #[test]
    fn test_empty_first_column() {
        let blank = "    ";
        assert_eq!(tot(&[blank, blank, blank, blank, "+   "]), big(0));
        assert_eq!(tot(&[blank, blank, blank, blank, "*   "]), big(1));
        assert_eq!(tot(&[blank, blank, blank, blank, "+ * "]), big(1));
    }

    #[test]
    fn test_last_column_is_ignored() {
        let blank = "    ";
        assert_eq!(tot(&["   7", blank, blank, blank, "   +"]), big(0));
        assert_eq!(tot(&["   7", blank, blank, blank, "   *"]), big(0));
    }

    #[test]
    fn test_non_operators() {
        assert_eq!(tot(&["12 ", "34 ", "   ", "   ", "x- "]), big(0));
    }

    #[test]
    fn test_digits_concatenate_top_to_bottom() {
        assert_eq!(tot(&["1 ", "2 ", "  ", "  ", "+ "]), big(12));
        assert_eq!(tot(&["  ", "4 ", "  ", "5 ", "+ "]), big(45));
    }

    #[test]
    fn test_zero_ends_walk() {
        assert_eq!(tot(&["507 ", "    ", "    ", "    ", "+   "]), big(5));
    }

    #[test]
    fn test_large_products() {
        let nines = "99999 ";
        let expected = "99950009999000049999".parse::<BigUint>().unwrap();
        assert_eq!(tot(&[nines, nines, nines, nines, "*     "]), expected);

        let rows = [
            "006 141  48",
            "228 70 9 96",
            " 216  4727 ",
            " 01 37 381 ",
            "*   *+ x+**",
        ];

        let expected = "206441243000730684481166".parse::<BigUint>().unwrap();
        assert_eq!(tot(&rows), expected);
    }

    #[test]
    fn test_sample() {
        let input = IStr::new(SAMPLE, 0);
        let totals = solve(input).unwrap();
        assert_eq!(totals.tot, big(33038782));
        assert_eq!(totals.rows, big(17007928));
        assert!(totals.output_eq(&solve(input).unwrap()));

        let trimmed = IStr::new(SAMPLE.strip_suffix(b"\n").unwrap(), 0);
        assert_eq!(solve(trimmed).unwrap(), totals);

        let answers = totals.answers();
        assert_eq!(
            answers,
            [("tot", "33038782".to_owned()), ("rows", "17007928".to_owned())]
        );
    }

    #[test]
    fn test_sample_columns() {
        let width = IStr::new(SAMPLE, 0).line_len().unwrap();
        assert_eq!(width, 15);

        let grid = SAMPLE.as_grid_with_stride(width, 1);

        for row in 0..ROWS {
            assert_eq!(grid.row_offset(row), row * (width + 1));
        }

        assert_eq!(grid.try_get(OPERATORS, 0), Some(&b'*'));
        assert_eq!(number(&grid, 2), 3561);
        assert_eq!(number(&grid, 14), 4);
        assert_eq!(number(&grid, 15), 0);

        assert_eq!(walk(&grid, Op::Mul, 0), big(85464));
        assert_eq!(walk(&grid, Op::Add, 4), big(3948));
        assert_eq!(walk(&grid, Op::Mul, 8), big(32942700));
        assert_eq!(walk(&grid, Op::Add, 12), big(6670));
    }

    #[test]
    fn test_by_rows() {
        let rows = ["1 2 x", "3 4 5", "     ", "10   ", "* +  "];
        let grid = worksheet(input_of(&rows)).unwrap();
        // 1 * 3 * 10 + (2 + 4)
        assert_eq!(by_rows(&grid), big(36));

        let rows = ["123 328  51 64 ", " 45 64  387 23 ", "  6 98  215 314"];
        let mut rows = rows.to_vec();
        rows.extend(["               ", "*   +   *   +  "]);
        assert_eq!(solve(input_of(&rows)).unwrap().rows, big(4277556));
    }

    #[test]
    fn test_errors() {
        let error = solve(IStr::new(b"123 +", 0)).unwrap_err();
        assert!(matches!(error, Error::Input(..)));

        let error = solve(input_of(&["1 ", "+ "])).unwrap_err();
        assert!(matches!(
            error,
            Error::Rows {
                width: 2,
                actual: 2,
                ..
            }
        ));
    }
}
