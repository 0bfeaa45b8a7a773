use num_complex::Complex64;
use std::f64::consts::PI;

/// Arcseconds per radian.
const ARCSEC_PER_RADIAN: f64 = 180.0 * 3600.0 / PI;

/// Visibility of a point source offset `(l, m)` arcseconds from the phase
/// centre, sampled at `(u, v)` wavelengths.
pub fn point_source(u: f64, v: f64, l_arcsec: f64, m_arcsec: f64, flux: f64) -> Complex64 {
    let l = l_arcsec / ARCSEC_PER_RADIAN;
    let m = m_arcsec / ARCSEC_PER_RADIAN;
    let phase = -2.0 * PI * (u * l + v * m);
    Complex64::from_polar(flux, phase)
}
