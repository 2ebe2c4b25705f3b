use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("table has no breakpoints")]
    Empty,
    #[error("table has {breakpoints} breakpoints but {values} values")]
    LengthMismatch { breakpoints: usize, values: usize },
    #[error("breakpoints must be strictly increasing, breakpoint {index} is not")]
    NotMonotonic { index: usize },
}

fn validate_breakpoints(breakpoints: &[f64]) -> Result<(), TableError> {
    if breakpoints.is_empty() {
        return Err(TableError::Empty);
    }

    match breakpoints
        .windows(2)
        .position(|pair| !(pair[0] < pair[1]))
    {
        Some(index) => Err(TableError::NotMonotonic { index: index + 1 }),
        None => Ok(()),
    }
}

/// Finds the segment `[index, index + 1]` of the breakpoints containing `x` together with the
/// interpolation fraction within it. Values outside the breakpoints are clamped to the edges.
fn locate(breakpoints: &[f64], x: f64) -> (usize, f64) {
    let last = breakpoints.len() - 1;
    if last == 0 || x <= breakpoints[0] || x.is_nan() {
        return (0, 0.);
    }
    if x >= breakpoints[last] {
        return (last - 1, 1.);
    }

    // Index of the first breakpoint greater than x, which is at least 1 here.
    let upper = breakpoints.partition_point(|&breakpoint| breakpoint <= x);
    let lower = upper - 1;
    let fraction = (x - breakpoints[lower]) / (breakpoints[upper] - breakpoints[lower]);

    (lower, fraction)
}

fn lerp(from: f64, to: f64, fraction: f64) -> f64 {
    if fraction == 0. {
        from
    } else if fraction == 1. {
        to
    } else {
        from + (to - from) * fraction
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable1D")]
pub struct Table1D {
    breakpoints: Vec<f64>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTable1D {
    breakpoints: Vec<f64>,
    values: Vec<f64>,
}

impl TryFrom<RawTable1D> for Table1D {
    type Error = TableError;

    fn try_from(raw: RawTable1D) -> Result<Self, Self::Error> {
        Table1D::new(raw.breakpoints, raw.values)
    }
}

impl Table1D {
    pub fn new(breakpoints: Vec<f64>, values: Vec<f64>) -> Result<Self, TableError> {
        validate_breakpoints(&breakpoints)?;
        if breakpoints.len() != values.len() {
            return Err(TableError::LengthMismatch {
                breakpoints: breakpoints.len(),
                values: values.len(),
            });
        }

        Ok(Self {
            breakpoints,
            values,
        })
    }

    /// A table which reads the same value everywhere.
    pub fn flat(value: f64) -> Self {
        Self {
            breakpoints: vec![0.],
            values: vec![value],
        }
    }

    pub fn lookup(&self, x: f64) -> f64 {
        let (index, fraction) = locate(&self.breakpoints, x);
        if self.values.len() == 1 {
            return self.values[0];
        }

        lerp(self.values[index], self.values[index + 1], fraction)
    }
}

/// A table of values over two axes, stored row by row: `values[x_index][y_index]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable2D")]
pub struct Table2D {
    x_breakpoints: Vec<f64>,
    y_breakpoints: Vec<f64>,
    values: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct RawTable2D {
    x_breakpoints: Vec<f64>,
    y_breakpoints: Vec<f64>,
    values: Vec<Vec<f64>>,
}

impl TryFrom<RawTable2D> for Table2D {
    type Error = TableError;

    fn try_from(raw: RawTable2D) -> Result<Self, Self::Error> {
        Table2D::new(raw.x_breakpoints, raw.y_breakpoints, raw.values)
    }
}

impl Table2D {
    pub fn new(
        x_breakpoints: Vec<f64>,
        y_breakpoints: Vec<f64>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, TableError> {
        validate_breakpoints(&x_breakpoints)?;
        validate_breakpoints(&y_breakpoints)?;
        if values.len() != x_breakpoints.len() {
            return Err(TableError::LengthMismatch {
                breakpoints: x_breakpoints.len(),
                values: values.len(),
            });
        }
        if let Some(row) = values.iter().find(|row| row.len() != y_breakpoints.len()) {
            return Err(TableError::LengthMismatch {
                breakpoints: y_breakpoints.len(),
                values: row.len(),
            });
        }

        Ok(Self {
            x_breakpoints,
            y_breakpoints,
            values,
        })
    }

    pub fn lookup(&self, x: f64, y: f64) -> f64 {
        let row = |x_index: usize| {
            let values = &self.values[x_index];
            if values.len() == 1 {
                return values[0];
            }
            let (y_index, y_fraction) = locate(&self.y_breakpoints, y);
            lerp(values[y_index], values[y_index + 1], y_fraction)
        };

        if self.values.len() == 1 {
            return row(0);
        }
        let (x_index, x_fraction) = locate(&self.x_breakpoints, x);

        lerp(row(x_index), row(x_index + 1), x_fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table() -> Table1D {
        Table1D::new(vec![0., 10., 20., 50.], vec![1., 3., -1., 5.]).unwrap()
    }

    #[rstest]
    #[case(0., 1.)]
    #[case(10., 3.)]
    #[case(20., -1.)]
    #[case(50., 5.)]
    fn lookup_is_exact_at_breakpoints(#[case] x: f64, #[case] expected: f64) {
        assert_eq!(table().lookup(x), expected);
    }

    #[rstest]
    #[case(5., 2.)]
    #[case(15., 1.)]
    #[case(35., 2.)]
    fn lookup_interpolates_between_breakpoints(#[case] x: f64, #[case] expected: f64) {
        assert!((table().lookup(x) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(-100., 1.)]
    #[case(1e9, 5.)]
    fn lookup_clamps_outside_breakpoints(#[case] x: f64, #[case] expected: f64) {
        assert_eq!(table().lookup(x), expected);
    }

    #[test]
    fn single_breakpoint_table_is_constant() {
        let table = Table1D::new(vec![3.], vec![7.]).unwrap();

        assert_eq!(table.lookup(-5.), 7.);
        assert_eq!(table.lookup(3.), 7.);
        assert_eq!(table.lookup(5.), 7.);
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(Table1D::new(vec![], vec![]), Err(TableError::Empty));
    }

    #[test]
    fn rejects_length_mismatch() {
        assert_eq!(
            Table1D::new(vec![0., 1.], vec![0.]),
            Err(TableError::LengthMismatch {
                breakpoints: 2,
                values: 1
            })
        );
    }

    #[test]
    fn rejects_non_monotonic_breakpoints() {
        assert_eq!(
            Table1D::new(vec![0., 2., 2.], vec![0., 1., 2.]),
            Err(TableError::NotMonotonic { index: 2 })
        );
    }

    #[test]
    fn deserialization_validates_table() {
        let result: Result<Table1D, _> =
            serde_json::from_str(r#"{ "breakpoints": [1.0, 0.0], "values": [0.0, 1.0] }"#);

        assert!(result.is_err());
    }

    #[test]
    fn deserializes_valid_table() {
        let table: Table1D =
            serde_json::from_str(r#"{ "breakpoints": [0.0, 2.0], "values": [0.0, 1.0] }"#)
                .unwrap();

        assert_eq!(table.lookup(1.), 0.5);
    }

    #[cfg(test)]
    mod table_2d_tests {
        use super::*;

        fn table() -> Table2D {
            Table2D::new(
                vec![0., 10.],
                vec![0., 1., 2.],
                vec![vec![0., 1., 2.], vec![10., 11., 12.]],
            )
            .unwrap()
        }

        #[rstest]
        #[case(0., 0., 0.)]
        #[case(10., 2., 12.)]
        #[case(0., 1., 1.)]
        fn lookup_is_exact_at_breakpoints(#[case] x: f64, #[case] y: f64, #[case] expected: f64) {
            assert_eq!(table().lookup(x, y), expected);
        }

        #[test]
        fn lookup_interpolates_bilinearly() {
            assert!((table().lookup(5., 0.5) - 5.5).abs() < 1e-12);
        }

        #[test]
        fn lookup_clamps_both_axes() {
            assert_eq!(table().lookup(-1., 100.), 2.);
            assert_eq!(table().lookup(100., -1.), 10.);
        }

        #[test]
        fn rejects_ragged_rows() {
            assert_eq!(
                Table2D::new(vec![0., 1.], vec![0., 1.], vec![vec![0., 1.], vec![0.]]),
                Err(TableError::LengthMismatch {
                    breakpoints: 2,
                    values: 1
                })
            );
        }
    }
}
