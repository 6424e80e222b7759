//! Lagrange reconstruction of a polynomial from point samples
//!
//! Given a target degree d, the first d+1 supplied points are consumed and
//! the unique polynomial of degree at most d through them is returned.
//! Later points are ignored, so a collector controls which shares are used
//! by ordering them.
//!
//! With P(x) = Π (x - x_j) over the consumed points:
//!
//! f(x) = Σ_i y_i · N_i(x) / N_i(x_i),   N_i(x) = P(x) / (x - x_i)
//!
//! Cost is O(d²) field operations; no fast interpolation is attempted.

use num_bigint::BigUint;

use crate::error::{Error, Result};
use crate::field::PrimeField;
use crate::poly::FieldPolynomial;

/// Interpolate the polynomial of degree ≤ `degree` through the first
/// `degree + 1` of `points`.
///
/// Fails with [`Error::InsufficientPoints`] when fewer points are given and
/// with [`Error::DuplicatePoint`] when two consumed points share an
/// x-coordinate modulo p.
pub fn interpolate(
    field: &PrimeField,
    degree: usize,
    points: &[(BigUint, BigUint)],
) -> Result<FieldPolynomial> {
    let need = match degree.checked_add(1) {
        Some(need) => need,
        None => {
            return Err(Error::InsufficientPoints {
                got: points.len(),
                need: usize::MAX,
            })
        }
    };
    if points.len() < need {
        return Err(Error::InsufficientPoints {
            got: points.len(),
            need,
        });
    }
    let points = &points[..need];

    tracing::debug!(degree, "lagrange interpolation");

    // P(x) = Π (x - x_i)
    let mut product = FieldPolynomial::from_u64s(field, &[1]);
    for (x, _) in points {
        product.mul_assign(&FieldPolynomial::linear(field, x))?;
    }

    let mut result = FieldPolynomial::zero(field, degree);
    for (x, y) in points {
        let (numerator, _) = product.div_rem(&FieldPolynomial::linear(field, x))?;

        let denominator = numerator.evaluate(x);
        let denominator_inv = field.inverse(&denominator).ok_or_else(|| Error::DuplicatePoint {
            xs: points.iter().map(|(x, _)| x.clone()).collect(),
        })?;

        result.add_scaled(&numerator, &field.mul(y, &denominator_inv))?;
    }

    Ok(FieldPolynomial::from_coefficients(
        field,
        result.coefficients().to_vec(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn field() -> PrimeField {
        PrimeField::new(BigUint::from(2_147_483_647u64)).unwrap()
    }

    fn pt(x: u64, y: u64) -> (BigUint, BigUint) {
        (BigUint::from(x), BigUint::from(y))
    }

    #[test]
    fn test_quadratic_through_three_points() {
        // 3 + 5x + 2x^2
        let f = field();
        let points = [pt(0, 3), pt(1, 10), pt(2, 21)];
        let poly = interpolate(&f, 2, &points).unwrap();
        assert_eq!(poly, FieldPolynomial::from_u64s(&f, &[3, 5, 2]));
        assert_eq!(poly.degree(), 2);
    }

    #[test]
    fn test_only_first_points_consumed() {
        let f = field();
        // last point is off the curve but must be ignored
        let points = [pt(0, 3), pt(1, 10), pt(2, 21), pt(3, 1)];
        let poly = interpolate(&f, 2, &points).unwrap();
        assert_eq!(poly, FieldPolynomial::from_u64s(&f, &[3, 5, 2]));
    }

    #[test]
    fn test_constant_polynomial() {
        let f = field();
        let poly = interpolate(&f, 0, &[pt(42, 7)]).unwrap();
        assert_eq!(poly, FieldPolynomial::from_u64s(&f, &[7]));
    }

    #[test]
    fn test_insufficient_points() {
        let f = field();
        let result = interpolate(&f, 3, &[pt(1, 1), pt(2, 2)]);
        assert_eq!(
            result.map(|_| ()),
            Err(Error::InsufficientPoints { got: 2, need: 4 })
        );
    }

    #[test]
    fn test_max_degree_is_insufficient() {
        let f = field();
        let result = interpolate(&f, usize::MAX, &[pt(1, 1), pt(2, 2)]);
        assert_eq!(
            result.map(|_| ()),
            Err(Error::InsufficientPoints { got: 2, need: usize::MAX })
        );
    }

    #[test]
    fn test_duplicate_x_rejected() {
        let f = field();
        let result = interpolate(&f, 2, &[pt(1, 10), pt(2, 21), pt(1, 10)]);
        let xs = [1u8, 2, 1].iter().map(|&x| BigUint::from(x)).collect();
        assert_eq!(result.map(|_| ()), Err(Error::DuplicatePoint { xs }));
    }

    #[test]
    fn test_duplicate_modulo_p_rejected() {
        let f = field();
        let result = interpolate(&f, 1, &[pt(5, 1), pt(2_147_483_652, 1)]);
        assert!(matches!(result, Err(Error::DuplicatePoint { .. })));
    }

    #[test]
    fn test_large_degree_round_trip() {
        let f = field();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let original = FieldPolynomial::random(&f, 64, &mut rng);
        let xs: Vec<BigUint> = (0..65u64).map(|i| BigUint::from(1000 + 7 * i)).collect();
        let ys = original.evaluate_many(&xs);
        let points: Vec<_> = xs.into_iter().zip(ys).collect();
        assert_eq!(interpolate(&f, 64, &points).unwrap(), original);
    }

    proptest! {
        #[test]
        fn prop_round_trip_random_points(seed in any::<u64>(), degree in 0usize..10) {
            let f = field();
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let original = FieldPolynomial::random(&f, degree, &mut rng);

            let mut xs: Vec<BigUint> = Vec::new();
            while xs.len() < degree + 1 {
                let x = f.random(&mut rng);
                if !xs.contains(&x) {
                    xs.push(x);
                }
            }
            let points: Vec<_> = xs.iter().cloned().zip(original.evaluate_many(&xs)).collect();

            prop_assert_eq!(interpolate(&f, degree, &points).unwrap(), original);
        }
    }
}
