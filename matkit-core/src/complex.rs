//! Complex number value type for sign-preserving log-determinants
//!
//! A determinant can be negative while its magnitude is far too large to
//! hold outside log space, so `log_determinant` reports `log|det|` in the
//! real part and encodes the sign in the imaginary part (`PI` for a
//! negative determinant, `0.0` otherwise).

/// A complex value `real + imaginary * i`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComplexNumber {
    /// The real component
    pub real: f64,
    /// The imaginary component
    pub imaginary: f64,
}

impl ComplexNumber {
    /// Create a complex number from its components
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Compare against another complex number with an absolute tolerance
    ///
    /// Both components must be within `tolerance` of the other value's.
    /// The tolerance is absolute, matching the `effective_zero` convention
    /// used throughout the kernel.
    pub fn equals_with_tolerance(&self, other: &ComplexNumber, tolerance: f64) -> bool {
        (self.real - other.real).abs() <= tolerance
            && (self.imaginary - other.imaginary).abs() <= tolerance
    }

    /// Squared magnitude of this value
    pub fn magnitude_squared(&self) -> f64 {
        self.real * self.real + self.imaginary * self.imaginary
    }
}

impl core::fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} + {}i", self.real, self.imaginary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_with_tolerance() {
        let a = ComplexNumber::new(1.0, 0.0);
        let b = ComplexNumber::new(1.0 + 1e-12, 0.0);
        assert!(a.equals_with_tolerance(&b, 1e-10));
        assert!(!a.equals_with_tolerance(&b, 1e-14));
    }

    #[test]
    fn test_magnitude_squared() {
        let c = ComplexNumber::new(3.0, 4.0);
        assert_eq!(c.magnitude_squared(), 25.0);
    }
}
