//! Level conversions shared by the amplitude effects

/// Keeps silence finite in the dB domain.
const DB_FLOOR: f64 = 1e-4;

/// Linear amplitude to dB. The sign is discarded.
#[inline]
pub fn lin_to_db(volume: f64) -> f64 {
    20.0 * (volume.abs() + DB_FLOOR).log10()
}

#[inline]
pub fn db_to_lin(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// `1.0` for zero and positive values, `-1.0` otherwise.
#[inline]
pub fn sign(value: f64) -> f64 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}
