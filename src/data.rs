//! Inline numeric data.
//!
//! Sequences handed to a plot call are sent to gnuplot as a named data block
//! (`$name << EOD` ... `EOD`) on its input stream. The block stays defined in
//! the gnuplot session, so replotting keeps working and no temporary file is
//! ever written.

use crate::error::{GnupipeError, Result};
use ndarray::{Array1, ArrayView1};

/// Line that terminates a data block.
pub const BLOCK_END: &str = "EOD";

/// Numbers that can be plotted.
///
/// Integers wider than 53 bits lose precision in the conversion.
pub trait Numeric: Copy {
    /// The value as `f64`.
    fn to_f64(self) -> f64;
}

macro_rules! impl_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_numeric!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// One numeric sequence, stored as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column(Vec<f64>);

impl Column {
    /// Create a column from `f64` values.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The values.
    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

impl<T: Numeric> FromIterator<T> for Column {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Numeric::to_f64).collect())
    }
}

impl<T: Numeric> From<&[T]> for Column {
    fn from(values: &[T]) -> Self {
        values.iter().copied().collect()
    }
}

impl<T: Numeric> From<Vec<T>> for Column {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Numeric> From<&Vec<T>> for Column {
    fn from(values: &Vec<T>) -> Self {
        Self::from(values.as_slice())
    }
}

impl<T: Numeric, const N: usize> From<[T; N]> for Column {
    fn from(values: [T; N]) -> Self {
        Self::from(&values[..])
    }
}

impl<T: Numeric, const N: usize> From<&[T; N]> for Column {
    fn from(values: &[T; N]) -> Self {
        Self::from(&values[..])
    }
}

impl<T: Numeric> From<ArrayView1<'_, T>> for Column {
    fn from(values: ArrayView1<'_, T>) -> Self {
        values.iter().copied().collect()
    }
}

impl<T: Numeric> From<&Array1<T>> for Column {
    fn from(values: &Array1<T>) -> Self {
        Self::from(values.view())
    }
}

impl<T: Numeric> From<Array1<T>> for Column {
    fn from(values: Array1<T>) -> Self {
        Self::from(values.view())
    }
}

/// A named block of equally long columns, ready to be written to gnuplot.
#[derive(Debug, Clone, PartialEq)]
pub struct DataBlock {
    name: String,
    columns: Vec<Column>,
}

impl DataBlock {
    /// Create a data block, checking that all columns have the same length.
    ///
    /// `name` is used without the leading `$`.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let first = columns.first().ok_or(GnupipeError::MissingData {
            kind: "data block",
            needed: "at least 1",
            given: 0,
        })?;

        let expected = first.len();
        if let Some((column, found)) = columns
            .iter()
            .map(Column::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(GnupipeError::length_mismatch(expected, found, column));
        }

        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    /// Reference to the block inside a gnuplot command, e.g. `$gnupipe_data_1`.
    pub fn reference(&self) -> String {
        format!("${}", self.name)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// All lines of the block: header, one line per row, terminator.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.rows() + 2);
        lines.push(format!("{} << {}", self.reference(), BLOCK_END));

        for row in 0..self.rows() {
            let fields: Vec<String> = self
                .columns
                .iter()
                .map(|column| format_value(column.values()[row]))
                .collect();
            lines.push(fields.join(" "));
        }

        lines.push(BLOCK_END.to_string());
        lines
    }
}

/// Format one value with full `f64` precision.
pub fn format_value(value: f64) -> String {
    format!("{:.16e}", value)
}
