/// The mass of a proton
pub const PROTON: f64 = 1.007276;
/// The mass of water (H2O)
pub const WATER: f64 = 18.010565;
/// The mass of ammonia (NH3)
pub const AMMONIA: f64 = 17.026549;
/// The mass difference between two adjacent carbon isotopologues (13C - 12C)
pub const ISOTOPE_SPACING: f64 = 1.003355;
/// The mass of a TMT (6/10/11-plex) reporter tag
pub const TMT: f64 = 229.162932;

/// Get the m/z for a neutral mass at the given charge, `(M + z·proton) / z`.
#[allow(clippy::suboptimal_flops)] // Literal form of the formula, not fused
pub fn mz(neutral_mass: f64, charge: u8) -> f64 {
    let charge = f64::from(charge);
    (neutral_mass + charge * PROTON) / charge
}

/// Get the neutral mass for the given m/z at the given charge, the inverse of [`mz`].
pub fn neutral_mass(mz: f64, charge: u8) -> f64 {
    let charge = f64::from(charge);
    mz.mul_add(charge, -charge * PROTON)
}

#[cfg(test)]
#[expect(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn mz_formula() {
        assert!((mz(1000.0, 1) - 1001.007276).abs() < 1e-9);
        assert!((mz(1000.0, 2) - 501.007276).abs() < 1e-9);
        assert!((neutral_mass(mz(927.4, 3), 3) - 927.4).abs() < 1e-9);
    }
}
