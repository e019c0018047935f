//! The text matrix format used for pretrained weights and bundled data sets.
//!
//! A file carries a header declaring its dimensions, then one line per row:
//!
//! ```text
//! # rows: 2
//! # columns: 3
//!  1 2.5 3
//!  4 5 6.25
//! ```
//!
//! Both header lines must appear (in either order) before any data. Each
//! data line holds `columns + 1` space-separated tokens; the first token is
//! a placeholder (files written by Octave start every row with a space) and
//! is ignored. Loading fails fast on a missing header, a row with the wrong
//! token count, or a row count that disagrees with the header; no partial
//! matrix is ever returned.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::math::Matrix;

pub fn load<R: BufRead>(reader: R) -> Result<Matrix> {
    let mut rows: Option<usize> = None;
    let mut cols: Option<usize> = None;
    let mut data: Vec<Vec<f64>> = Vec::new();

    for line in reader.lines() {
        let line = line?;

        if let Some(rest) = line.strip_prefix('#') {
            let rest = rest.trim_start();
            if let Some(value) = rest.strip_prefix("rows: ") {
                rows = Some(parse_dimension(value, "rows")?);
            } else if let Some(value) = rest.strip_prefix("columns: ") {
                cols = Some(parse_dimension(value, "columns")?);
            }
            // Other comment lines (e.g. "# name: Theta1") carry no structure.
            continue;
        }

        if line.is_empty() {
            continue;
        }

        let (rows, cols) = match (rows, cols) {
            (Some(r), Some(c)) => (r, c),
            _ => {
                return Err(Error::MalformedMatrixFile(
                    "data encountered before both '# rows:' and '# columns:' headers".to_owned(),
                ));
            }
        };

        if data.len() == rows {
            return Err(Error::MalformedMatrixFile(format!(
                "more data rows than the declared {rows}"
            )));
        }

        let tokens: Vec<&str> = line.split(' ').collect();
        if tokens.len() != cols + 1 {
            return Err(Error::MalformedMatrixFile(format!(
                "row {} has the wrong number of cells (expected {} but saw {})",
                data.len(),
                cols,
                tokens.len() - 1
            )));
        }

        // The first token is an ignored placeholder.
        let mut row = Vec::with_capacity(cols);
        for token in &tokens[1..] {
            let value: f64 = token.parse().map_err(|_| {
                Error::MalformedMatrixFile(format!(
                    "row {} holds an unparsable value {token:?}",
                    data.len()
                ))
            })?;
            row.push(value);
        }
        data.push(row);
    }

    let (rows, cols) = match (rows, cols) {
        (Some(r), Some(c)) => (r, c),
        _ => {
            return Err(Error::MalformedMatrixFile(
                "file is missing its '# rows:'/'# columns:' header".to_owned(),
            ));
        }
    };

    if data.len() != rows {
        return Err(Error::MalformedMatrixFile(format!(
            "header declares {rows} rows but the file holds {}",
            data.len()
        )));
    }

    Ok(Matrix { rows, cols, data })
}

pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    load(BufReader::new(File::open(path)?))
}

/// Writes a matrix in the same text format `load` reads.
pub fn save<W: Write>(mut writer: W, matrix: &Matrix) -> Result<()> {
    writeln!(writer, "# rows: {}", matrix.rows)?;
    writeln!(writer, "# columns: {}", matrix.cols)?;

    for row in &matrix.data {
        for value in row {
            write!(writer, " {value}")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

pub fn save_path<P: AsRef<Path>>(path: P, matrix: &Matrix) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    save(&mut writer, matrix)?;
    writer.flush()?;
    Ok(())
}

fn parse_dimension(value: &str, name: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        Error::MalformedMatrixFile(format!("header declares an unparsable {name} count {value:?}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_well_formed_file() {
        let text = "# name: Theta1\n# type: matrix\n# rows: 2\n# columns: 3\n 1 2.5 3\n 4 5 6.25\n";
        let m = load(text.as_bytes()).unwrap();

        assert_eq!((m.rows, m.cols), (2, 3));
        assert_eq!(m.data, vec![vec![1.0, 2.5, 3.0], vec![4.0, 5.0, 6.25]]);
    }

    #[test]
    fn header_order_does_not_matter() {
        let text = "# columns: 1\n# rows: 2\n 7\n 8\n";
        let m = load(text.as_bytes()).unwrap();
        assert_eq!(m.data, vec![vec![7.0], vec![8.0]]);
    }

    #[test]
    fn data_before_header_fails() {
        let text = " 1 2\n# rows: 1\n# columns: 2\n";
        let err = load(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedMatrixFile(_)));
    }

    #[test]
    fn wrong_cell_count_fails() {
        let text = "# rows: 1\n# columns: 3\n 1 2\n";
        let err = load(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedMatrixFile(_)));
    }

    #[test]
    fn missing_rows_fail() {
        let text = "# rows: 3\n# columns: 1\n 1\n 2\n";
        let err = load(text.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedMatrixFile(_)));
    }

    #[test]
    fn save_and_load_round_trip() {
        let m = Matrix::from_data(vec![vec![0.5, -1.25], vec![3.0, 1e-7]]);

        let mut bytes = Vec::new();
        save(&mut bytes, &m).unwrap();

        let back = load(bytes.as_slice()).unwrap();
        assert_eq!(back, m);
    }
}
