use std::ops::AddAssign;

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Dot product against a dense row of the same logical length.
    /// Only the stored elements of `self` are visited.
    #[inline]
    pub fn dot_dense<R>(&self, dense: &[R]) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            dense.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        for (ind, val) in self.raw_iter() {
            result += (*val).into() * dense[ind];
        }
        result
    }

    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for val in self.values() {
            let val: R = (*val).into();
            result += val * val;
        }
        result
    }
}

impl ZeroSpVec<f64> {
    /// Euclidean norm, see [`l2_norm`]
    #[inline]
    pub fn norm(&self) -> f64 {
        l2_norm(self.values())
    }

    /// Scale to unit L2 norm.
    /// An all-zero vector stays all-zero.
    #[inline]
    pub fn l2_normalize(&mut self) {
        let scale = max_abs(&self.vals);
        if scale == 0.0 || !scale.is_finite() {
            return;
        }
        // divide by the largest magnitude first so the squares neither
        // underflow to 0 nor overflow to inf
        for val in self.vals.iter_mut() {
            *val /= scale;
        }
        let norm = self.norm_sq::<f64>().sqrt();
        for val in self.vals.iter_mut() {
            *val /= norm;
        }
    }
}

/// Euclidean norm of `values`, scaled by the largest magnitude so tiny
/// or huge entries do not underflow or overflow in the squares.
/// The result is `inf` only when the true norm exceeds `f64::MAX`.
pub fn l2_norm(values: &[f64]) -> f64 {
    let scale = max_abs(values);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let sum: f64 = values.iter().map(|v| (v / scale) * (v / scale)).sum();
    scale * sum.sqrt()
}

#[inline]
fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_dense_visits_stored_entries() {
        let a = ZeroSpVec::from(vec![1.0, 0.0, 2.0, 0.0, 3.0]);
        assert_eq!(a.dot_dense(&[0.0, 4.0, 5.0, 0.0, 6.0]), 28.0);
        assert_eq!(a.dot_dense(&[0.0, 9.0, 0.0, 9.0, 0.0]), 0.0);
    }

    #[test]
    fn l2_normalize_unit_norm() {
        let mut v = ZeroSpVec::from(vec![3.0, 0.0, 4.0]);
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert_eq!(v.to_dense(), vec![0.6, 0.0, 0.8]);
    }

    #[test]
    fn l2_normalize_leaves_zero_vector() {
        let mut v: ZeroSpVec<f64> = ZeroSpVec::zeros(3);
        v.l2_normalize();
        assert_eq!(v.to_dense(), vec![0.0; 3]);
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn l2_normalize_survives_tiny_values() {
        let mut single = ZeroSpVec::from(vec![1e-200]);
        single.l2_normalize();
        assert_eq!(single.to_dense(), vec![1.0]);

        let mut v = ZeroSpVec::from(vec![3e-200, 0.0, 4e-200]);
        assert!(v.norm() > 0.0);
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        let dense = v.to_dense();
        assert!((dense[0] - 0.6).abs() < 1e-12);
        assert!((dense[2] - 0.8).abs() < 1e-12);
    }

    #[test]
    fn l2_normalize_survives_huge_values() {
        let mut v = ZeroSpVec::from(vec![1.5e308, 1.5e308]);
        v.l2_normalize();
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn l2_norm_scales_instead_of_overflowing() {
        assert_eq!(l2_norm(&[]), 0.0);
        assert_eq!(l2_norm(&[0.0, -5.0, 0.0]), 5.0);
        assert!((l2_norm(&[3e-200, 4e-200]) - 5e-200).abs() < 1e-212);
        assert!((l2_norm(&[3e300, 4e300]) - 5e300).abs() < 1e288);
        assert_eq!(l2_norm(&[1.7e308, 1.7e308]), f64::INFINITY);
    }
}
