// Linear colour scale: maps the density domain onto the [0, 1] ramp
// parameter of a sequential palette.

#[derive(Debug, Clone)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    /// Scale over the finite values of a column. A degenerate domain (all
    /// values equal, or no finite values) is padded so normalisation stays
    /// defined.
    pub fn from_values(values: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values {
            if v.is_finite() {
                if v < min {
                    min = v;
                }
                if v > max {
                    max = v;
                }
            }
        }

        if min > max {
            return Self { min: 0.0, max: 1.0 };
        }
        if min == max {
            return Self {
                min: min - 1.0,
                max: max + 1.0,
            };
        }
        Self { min, max }
    }

    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Position of `v` in [0, 1], clamped at the domain edges.
    pub fn normalize(&self, v: f64) -> f64 {
        ((v - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let scale = ColorScale::from_values(&[10.0, 20.0, 30.0]);
        assert_eq!(scale.domain(), (10.0, 30.0));
        assert_eq!(scale.normalize(10.0), 0.0);
        assert_eq!(scale.normalize(20.0), 0.5);
        assert_eq!(scale.normalize(30.0), 1.0);
    }

    #[test]
    fn test_clamps_outside_domain() {
        let scale = ColorScale::from_values(&[0.0, 100.0]);
        assert_eq!(scale.normalize(-5.0), 0.0);
        assert_eq!(scale.normalize(500.0), 1.0);
    }

    #[test]
    fn test_degenerate_domain() {
        let scale = ColorScale::from_values(&[7.0, 7.0]);
        assert_eq!(scale.domain(), (6.0, 8.0));
        assert_eq!(scale.normalize(7.0), 0.5);
    }

    #[test]
    fn test_empty_values() {
        let scale = ColorScale::from_values(&[]);
        assert_eq!(scale.domain(), (0.0, 1.0));
    }

    #[test]
    fn test_ignores_non_finite() {
        let scale = ColorScale::from_values(&[f64::NAN, 1.0, 3.0]);
        assert_eq!(scale.domain(), (1.0, 3.0));
    }
}
