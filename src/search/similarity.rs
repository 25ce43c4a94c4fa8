

use thiserror::Error;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}


/// Cosine of the angle between `a` and `b`, accumulated in `f64`.
///
/// A zero-norm operand yields `0.0` instead of NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let (dot, norm_a, norm_b) = a.iter().zip(b.iter()).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}


/// Cosine distance (`0.0` identical .. `2.0` opposite) to similarity.
#[inline]
pub fn distance_to_similarity(distance: f64) -> f64 {
    1.0 - distance
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_cosine_similarity_identical() {
        let v = vec![0.3, -1.2, 4.5, 0.0];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
        assert!(sim.abs() < EPS);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((sim + 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = vec![0.1, 0.7, -0.4, 2.0];
        let b = vec![1.5, -0.2, 0.9, 0.3];
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let zero = vec![0.0; 3];
        assert_eq!(cosine_similarity(&zero, &[1.0, 2.0, 3.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0, 3.0], &zero).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_scale_invariant() {
        let a = vec![0.2, 0.5, -0.1];
        let b = vec![0.9, -0.3, 0.4];
        let scaled: Vec<f32> = a.iter().map(|x| x * 7.5).collect();
        let base = cosine_similarity(&a, &b).unwrap();
        let other = cosine_similarity(&scaled, &b).unwrap();
        assert!((base - other).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_within_bounds() {
        let a = vec![3.0, -7.0, 1.0, 0.5];
        let b = vec![-2.0, 4.0, 9.0, -1.0];
        let sim = cosine_similarity(&a, &b).unwrap();
        assert!((-1.0..=1.0).contains(&sim));
    }

    #[test]
    fn test_cosine_similarity_dimension_mismatch() {
        let err = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err, SimilarityError::DimensionMismatch { left: 2, right: 3 });
        assert!(err.to_string().contains("2 vs 3"));
    }

    #[test]
    fn test_distance_to_similarity() {
        assert!((distance_to_similarity(0.2) - 0.8).abs() < EPS);
        assert_eq!(distance_to_similarity(0.0), 1.0);
        assert_eq!(distance_to_similarity(2.0), -1.0);
    }
}
