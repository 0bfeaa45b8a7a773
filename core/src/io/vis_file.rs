//! Text visibility files.
//!
//! One sample per line: `u v re(V) im(V) sigma`, separated by whitespace.
//! On ingestion `v` is negated to fix the orientation of the gridded image
//! and `sigma` becomes the inverse-variance weight `1 / sigma^2`. The writer
//! undoes both so a written file reads back to the same set.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::debug;
use num_complex::Complex64;

use crate::interface::VisibilitySet;
use crate::prelude::{PrepError, PrepResult};

const FIELD_NAMES: [&str; 5] = ["u", "v", "real", "imag", "sigma"];

pub fn read_visibility<P: AsRef<Path>>(path: P) -> PrepResult<VisibilitySet> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut u = Vec::new();
    let mut v = Vec::new();
    let mut vis = Vec::new();
    let mut weights = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let [row_u, row_v, real, imag, sigma] = parse_row(&line, line_no)?;

        let weight = 1.0 / (sigma * sigma);
        if !weight.is_finite() {
            return Err(PrepError::Parse {
                line: line_no,
                message: format!("sigma {} gives a non-finite weight", sigma),
            });
        }

        u.push(row_u);
        v.push(-row_v);
        vis.push(Complex64::new(real, imag));
        weights.push(weight);
    }

    debug!("read {} visibilities from {}", u.len(), path.display());
    VisibilitySet::new(u, v, vis, weights)
}

fn parse_row(line: &str, line_no: usize) -> PrepResult<[f64; 5]> {
    let mut fields = [0.0; 5];
    let mut tokens = line.split_whitespace();
    for (slot, name) in fields.iter_mut().zip(FIELD_NAMES) {
        let token = tokens.next().ok_or_else(|| PrepError::Parse {
            line: line_no,
            message: format!("missing {} field", name),
        })?;
        *slot = token.parse::<f64>().map_err(|err| PrepError::Parse {
            line: line_no,
            message: format!("invalid {} value '{}': {}", name, token, err),
        })?;
    }
    Ok(fields)
}

pub fn write_visibility<P: AsRef<Path>>(path: P, vis: &VisibilitySet) -> PrepResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    for i in 0..vis.len() {
        let value = vis.vis()[i];
        let sigma = 1.0 / vis.weights()[i].sqrt();
        writeln!(
            writer,
            "{} {} {} {} {}",
            vis.u()[i],
            -vis.v()[i],
            value.re,
            value.im,
            sigma
        )?;
    }
    writer.flush()?;

    debug!("wrote {} visibilities to {}", vis.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(contents.as_bytes()).unwrap();
        temp
    }

    #[test]
    fn read_negates_v_and_inverts_variance() {
        let temp = file_with("100 50 1 2 0.5\n-100 -50 3 -1 1\n");
        let vis = read_visibility(temp.path()).unwrap();
        assert_eq!(vis.len(), 2);
        assert_eq!(vis.u(), &[100.0, -100.0]);
        assert_eq!(vis.v(), &[-50.0, 50.0]);
        assert_eq!(vis.vis()[0], Complex64::new(1.0, 2.0));
        assert_eq!(vis.vis()[1], Complex64::new(3.0, -1.0));
        assert_eq!(vis.weights(), &[4.0, 1.0]);
    }

    #[test]
    fn read_accepts_mixed_whitespace_and_blank_lines() {
        let temp = file_with("1\t2  3 4 2 extra\n\n   \n5 6 7 8 1\n");
        let vis = read_visibility(temp.path()).unwrap();
        assert_eq!(vis.len(), 2);
        assert_eq!(vis.weights(), &[0.25, 1.0]);
        assert_eq!(vis.u()[1], 5.0);
    }

    #[test]
    fn malformed_number_names_the_line() {
        let temp = file_with("1 2 3 4 1\n\n1 2 abc 4 1\n");
        match read_visibility(temp.path()) {
            Err(PrepError::Parse { line, message }) => {
                assert_eq!(line, 3);
                assert!(message.contains("real"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn short_row_is_a_parse_error() {
        let temp = file_with("1 2 3 4\n");
        assert!(matches!(
            read_visibility(temp.path()),
            Err(PrepError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn zero_sigma_is_rejected() {
        let temp = file_with("1 2 3 4 0\n");
        assert!(matches!(
            read_visibility(temp.path()),
            Err(PrepError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_visibility(dir.path().join("absent.vis")),
            Err(PrepError::Io(_))
        ));
    }

    #[test]
    fn written_file_reads_back_to_same_set() {
        let vis = VisibilitySet::new(
            vec![12.5, -3.0, 0.0],
            vec![-7.25, 4.0, 1.0],
            vec![
                Complex64::new(1.0, -2.0),
                Complex64::new(0.125, 3.5),
                Complex64::new(-9.0, 0.0),
            ],
            vec![4.0, 0.25, 0.0],
        )
        .unwrap();
        let temp = NamedTempFile::new().unwrap();
        write_visibility(temp.path(), &vis).unwrap();
        assert_eq!(read_visibility(temp.path()).unwrap(), vis);
    }

    #[test]
    fn every_constructible_weight_survives_the_writer() {
        assert!(matches!(
            VisibilitySet::new(
                vec![1.0],
                vec![2.0],
                vec![Complex64::new(1.0, 0.0)],
                vec![-4.0],
            ),
            Err(PrepError::Domain(_))
        ));

        let vis = VisibilitySet::new(
            vec![1.0, -6.5, 2.0],
            vec![2.0, 0.5, -3.0],
            vec![
                Complex64::new(1.0, 0.0),
                Complex64::new(-2.0, 1.0),
                Complex64::new(0.0, 0.25),
            ],
            vec![0.0, 16.0, 1.0],
        )
        .unwrap();
        let temp = NamedTempFile::new().unwrap();
        write_visibility(temp.path(), &vis).unwrap();
        let contents = std::fs::read_to_string(temp.path()).unwrap();
        assert!(!contents.contains("NaN"));
        assert_eq!(read_visibility(temp.path()).unwrap(), vis);
    }
}
