//! 2-D FITS images for the imaging stack.
//!
//! Images are stored column-major in a single primary HDU of 32-bit floats:
//! `NAXIS1` is the row count and storage offset `k` holds the pixel at
//! `row = k % rows`, `col = k / rows`. Both directions go through
//! [`linear_index`]/[`to_row_col`] with swapped axes so they cannot drift
//! apart.

use std::fs;
use std::io;
use std::path::Path;

use fitsio::images::{ImageDescription, ImageType};
use fitsio::FitsFile;
use log::debug;
use ndarray::{s, Array2};
use num_complex::Complex64;

use crate::math::index::{linear_index, to_row_col};
use crate::prelude::{PrepError, PrepResult};

/// Options for [`write_fits2d`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitsWriteOptions {
    /// Remove an existing file at the path before writing.
    pub overwrite: bool,
    /// Reverse every row (mirror the column order) before writing.
    pub flip: bool,
}

pub fn write_fits2d<P: AsRef<Path>>(
    image: &Array2<f64>,
    path: P,
    options: FitsWriteOptions,
) -> PrepResult<()> {
    let path = path.as_ref();
    let (rows, cols) = image.dim();
    if rows == 0 || cols == 0 {
        return Err(PrepError::Domain(format!(
            "cannot write an empty {}x{} image",
            rows, cols
        )));
    }

    if options.overwrite {
        remove_existing(path)?;
    }

    let oriented = if options.flip {
        image.slice(s![.., ..;-1])
    } else {
        image.view()
    };

    let mut pixels = vec![0.0f32; rows * cols];
    for ((row, col), &value) in oriented.indexed_iter() {
        pixels[linear_index(col, row, cols, rows)] = value as f32;
    }

    // fitsio lists dimensions slowest axis first: [NAXIS2, NAXIS1]
    let description = ImageDescription {
        data_type: ImageType::Float,
        dimensions: &[cols, rows],
    };
    let mut fptr = FitsFile::create(path)
        .with_custom_primary(&description)
        .open()?;
    let hdu = fptr.primary_hdu()?;
    hdu.write_image(&mut fptr, &pixels)?;

    debug!("wrote {}x{} image to {}", rows, cols, path.display());
    Ok(())
}

pub fn read_fits2d<P: AsRef<Path>>(path: P) -> PrepResult<Array2<Complex64>> {
    let path = path.as_ref();
    let mut fptr = FitsFile::open(path)?;
    let hdu = fptr.primary_hdu()?;

    let naxis: i64 = hdu.read_key(&mut fptr, "NAXIS")?;
    if naxis != 2 {
        return Err(PrepError::Domain(format!(
            "{} has {} axes, expected 2",
            path.display(),
            naxis
        )));
    }
    let axis1 = read_axis(&hdu, &mut fptr, "NAXIS1")?;
    let axis2 = read_axis(&hdu, &mut fptr, "NAXIS2")?;

    let contents: Vec<f64> = hdu.read_image(&mut fptr)?;
    if contents.len() != axis1 * axis2 {
        return Err(PrepError::Domain(format!(
            "{} holds {} pixels, header declares {}x{}",
            path.display(),
            contents.len(),
            axis1,
            axis2
        )));
    }

    let mut image = Array2::<Complex64>::zeros((axis1, axis2));
    for (index, &value) in contents.iter().enumerate() {
        let (j, i) = to_row_col(index, axis1, axis2);
        image[(i, j)] = Complex64::new(value, 0.0);
    }

    debug!("read {}x{} image from {}", axis1, axis2, path.display());
    Ok(image)
}

fn read_axis(hdu: &fitsio::hdu::FitsHdu, fptr: &mut FitsFile, key: &str) -> PrepResult<usize> {
    let value: i64 = hdu.read_key(fptr, key)?;
    usize::try_from(value)
        .map_err(|_| PrepError::Domain(format!("{} must be non-negative, got {}", key, value)))
}

fn remove_existing(path: &Path) -> PrepResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
