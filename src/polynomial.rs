use core::fmt;
use std::ops::{Add, Mul};

use rand::{CryptoRng, RngCore};

use crate::error::{Result, ShardError};
use crate::field::{Field, FieldElement};

/// Represents a polynomial over a prime field.
///
/// Coefficients are stored constant term first, so the coefficient at index
/// `d` belongs to `x^d`. Trailing zero coefficients are allowed and are not
/// trimmed by arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<'f> {
    field: &'f Field,
    /// The coefficients of the polynomial, lowest degree first.
    pub coefficients: Vec<FieldElement<'f>>,
}

impl<'f> Polynomial<'f> {
    /// Constructs a polynomial from explicit coefficients, lowest degree first.
    pub fn new(field: &'f Field, coefficients: Vec<FieldElement<'f>>) -> Self {
        Polynomial {
            field,
            coefficients,
        }
    }

    /// The zero polynomial.
    pub fn zero(field: &'f Field) -> Self {
        Polynomial::constant(field.zero())
    }

    /// A degree-0 polynomial.
    pub fn constant(x0: FieldElement<'f>) -> Self {
        Polynomial::new(x0.field(), vec![x0])
    }

    /// The linear polynomial `x1 * x + x0`.
    pub fn linear(x0: FieldElement<'f>, x1: FieldElement<'f>) -> Self {
        Polynomial::new(x0.field(), vec![x0, x1])
    }

    /// Constructs a new polynomial of a given degree with random coefficients,
    /// where the constant term is the provided secret.
    ///
    /// # Arguments
    ///
    /// * `degree` - The degree of the polynomial.
    /// * `secret` - The secret (constant term) of the polynomial.
    /// * `rng` - A cryptographically secure source for the other coefficients.
    pub fn random<R: RngCore + CryptoRng>(
        degree: usize,
        secret: FieldElement<'f>,
        rng: &mut R,
    ) -> Self {
        let field = secret.field();
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(secret);
        coefficients.extend((0..degree).map(|_| field.random(rng)));

        Polynomial::new(field, coefficients)
    }

    pub fn field(&self) -> &'f Field {
        self.field
    }

    /// Nominal degree, `len(coefficients) - 1`, counting trailing zeros.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at a given point.
    ///
    /// # Arguments
    ///
    /// * `x` - The point at which to evaluate the polynomial.
    ///
    /// # Returns
    ///
    /// The value of the polynomial at point `x`.
    pub fn evaluate(&self, x: FieldElement<'f>) -> FieldElement<'f> {
        let mut result = self.field.zero();
        let mut term = self.field.one();

        for &coeff in &self.coefficients {
            result = result + coeff * term;
            term = term * x;
        }

        result
    }

    /// Long division.
    ///
    /// # Returns
    ///
    /// The quotient and remainder, with `self = quotient * divisor + remainder`
    /// and the remainder of lower degree than the divisor.
    ///
    /// # Errors
    ///
    /// Returns `DivisionByZero` if every coefficient of `divisor` is zero.
    pub fn div_rem(&self, divisor: &Polynomial<'f>) -> Result<(Self, Self)> {
        let significant = divisor
            .coefficients
            .iter()
            .rposition(|c| !c.is_zero())
            .ok_or(ShardError::DivisionByZero)?;
        let divisor = &divisor.coefficients[..=significant];
        let lead_inverse = divisor[significant].inverse()?;

        let mut remainder = self.coefficients.clone();
        if remainder.len() < divisor.len() {
            return Ok((Polynomial::zero(self.field), self.clone()));
        }

        let quotient_len = remainder.len() - divisor.len() + 1;
        let mut quotient = vec![self.field.zero(); quotient_len];
        for i in (0..quotient_len).rev() {
            let factor = remainder[i + significant] * lead_inverse;
            quotient[i] = factor;
            for (j, &d) in divisor.iter().enumerate() {
                remainder[i + j] = remainder[i + j] - factor * d;
            }
        }

        remainder.truncate(significant.max(1));
        Ok((
            Polynomial::new(self.field, quotient),
            Polynomial::new(self.field, remainder),
        ))
    }

    /// Quotient of [`div_rem`](Self::div_rem), discarding the remainder.
    ///
    /// For a constant divisor this is multiplication by the inverse of that
    /// constant.
    pub fn floor_div(&self, divisor: &Polynomial<'f>) -> Result<Self> {
        self.div_rem(divisor).map(|(quotient, _)| quotient)
    }

    /// Builds the Lagrange basis for a set of evaluation points.
    ///
    /// The `i`-th polynomial is `1` at `points[i]` and `0` at every other
    /// point:
    ///
    /// ```text
    /// L_i(x) = Π_{j≠i} (x - x_j) / (x_i - x_j)
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePoint` if two points coincide, since no polynomial
    /// can then be solved for.
    pub fn lagrange_basis(points: &[FieldElement<'f>]) -> Result<Vec<Self>> {
        let mut basis = Vec::with_capacity(points.len());

        for (i, &x_i) in points.iter().enumerate() {
            let field = x_i.field();
            let mut l = Polynomial::constant(field.one());

            for (j, &x_j) in points.iter().enumerate() {
                if i != j {
                    let gap = x_i - x_j;
                    if gap.is_zero() {
                        return Err(ShardError::DuplicatePoint(x_i.value()));
                    }
                    l = &l * &Polynomial::linear(-x_j, field.one());
                    l = l.floor_div(&Polynomial::constant(gap))?;
                }
            }

            basis.push(l);
        }

        Ok(basis)
    }
}

impl<'f> Add for &Polynomial<'f> {
    type Output = Polynomial<'f>;

    fn add(self, rhs: Self) -> Polynomial<'f> {
        let zero = self.field.zero();
        let len = self.coefficients.len().max(rhs.coefficients.len());
        let coefficients = (0..len)
            .map(|d| {
                let a = self.coefficients.get(d).copied().unwrap_or(zero);
                let b = rhs.coefficients.get(d).copied().unwrap_or(zero);
                a + b
            })
            .collect();

        Polynomial::new(self.field, coefficients)
    }
}

impl<'f> Add for Polynomial<'f> {
    type Output = Polynomial<'f>;

    fn add(self, rhs: Self) -> Polynomial<'f> {
        &self + &rhs
    }
}

impl<'f> Mul for &Polynomial<'f> {
    type Output = Polynomial<'f>;

    fn mul(self, rhs: Self) -> Polynomial<'f> {
        if self.coefficients.is_empty() || rhs.coefficients.is_empty() {
            return Polynomial::zero(self.field);
        }

        let mut coefficients =
            vec![self.field.zero(); self.coefficients.len() + rhs.coefficients.len() - 1];
        for (i, &a) in self.coefficients.iter().enumerate() {
            for (j, &b) in rhs.coefficients.iter().enumerate() {
                coefficients[i + j] = coefficients[i + j] + a * b;
            }
        }

        Polynomial::new(self.field, coefficients)
    }
}

impl<'f> Mul for Polynomial<'f> {
    type Output = Polynomial<'f>;

    fn mul(self, rhs: Self) -> Polynomial<'f> {
        &self * &rhs
    }
}

/// Renders the polynomial highest degree first, e.g. `3x^2 + x + 1`.
impl fmt::Display for Polynomial<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .coefficients
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, c)| !c.is_zero())
            .map(|(d, c)| match (d, c.value()) {
                (0, v) => v.to_string(),
                (1, 1) => "x".to_string(),
                (1, v) => format!("{v}x"),
                (d, 1) => format!("x^{d}"),
                (d, v) => format!("{v}x^{d}"),
            })
            .collect();

        if terms.is_empty() {
            f.write_str("0")
        } else {
            f.write_str(&terms.join(" + "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn poly<'f>(field: &'f Field, values: &[u64]) -> Polynomial<'f> {
        Polynomial::new(
            field,
            values.iter().map(|&v| field.element(v).unwrap()).collect(),
        )
    }

    fn values(p: &Polynomial) -> Vec<u8> {
        p.coefficients.iter().map(|c| c.value()).collect()
    }

    #[test]
    fn test_evaluate() {
        let field = Field::new(59).unwrap();
        // 2x^2 + 3x + 5
        let p = poly(&field, &[5, 3, 2]);

        assert_eq!(p.evaluate(field.zero()).value(), 5);
        assert_eq!(p.evaluate(field.one()).value(), 10);
        assert_eq!(p.evaluate(field.element(10).unwrap()).value(), (200 + 30 + 5) % 59);
        assert_eq!(Polynomial::new(&field, vec![]).evaluate(field.one()), field.zero());
    }

    #[test]
    fn test_add_pads_shorter_operand() {
        let field = Field::new(59).unwrap();
        let a = poly(&field, &[1, 2, 3]);
        let b = poly(&field, &[58, 57]);

        assert_eq!(values(&(&a + &b)), vec![0, 0, 3]);
        assert_eq!(values(&(b + a)), vec![0, 0, 3]);
    }

    #[test]
    fn test_mul_convolves() {
        let field = Field::new(59).unwrap();
        // (x + 1)(x - 1) = x^2 - 1
        let a = poly(&field, &[1, 1]);
        let b = poly(&field, &[58, 1]);

        assert_eq!(values(&(&a * &b)), vec![58, 0, 1]);
        assert_eq!(values(&(a * poly(&field, &[3]))), vec![3, 3]);
    }

    #[test]
    fn test_floor_div_by_constant() {
        let field = Field::new(59).unwrap();
        let p = poly(&field, &[4, 8, 12]);
        let q = p.floor_div(&poly(&field, &[4])).unwrap();

        assert_eq!(values(&q), vec![1, 2, 3]);
        // trailing zeros in the divisor do not raise its degree
        assert_eq!(p.floor_div(&poly(&field, &[4, 0])).unwrap(), q);
    }

    #[test]
    fn test_division_by_zero() {
        let field = Field::new(59).unwrap();
        let p = poly(&field, &[4, 8, 12]);

        let err = p.floor_div(&Polynomial::zero(&field)).unwrap_err();
        assert_eq!(err, ShardError::DivisionByZero);
        assert_eq!(err.kind(), ErrorKind::Arithmetic);
        assert!(p.floor_div(&Polynomial::new(&field, vec![])).is_err());
    }

    #[test]
    fn test_div_rem() {
        let field = Field::new(59).unwrap();
        // (x^2 + 3x + 2) = (x + 1)(x + 2)
        let p = poly(&field, &[2, 3, 1]);
        let (q, r) = p.div_rem(&poly(&field, &[1, 1])).unwrap();
        assert_eq!(values(&q), vec![2, 1]);
        assert_eq!(values(&r), vec![0]);

        // x^3 + 5 divided by x^2 + 1 leaves -x + 5
        let p = poly(&field, &[5, 0, 0, 1]);
        let d = poly(&field, &[1, 0, 1]);
        let (q, r) = p.div_rem(&d).unwrap();
        assert_eq!(values(&q), vec![0, 1]);
        assert_eq!(values(&r), vec![5, 58]);
        assert_eq!(&(&q * &d) + &r, p);

        let (q, r) = d.div_rem(&p).unwrap();
        assert_eq!(q, Polynomial::zero(&field));
        assert_eq!(r, d);
    }

    #[test]
    fn test_lagrange_basis() {
        let field = Field::new(59).unwrap();
        let points: Vec<_> = [1, 4, 9, 30]
            .iter()
            .map(|&x| field.element(x).unwrap())
            .collect();
        let basis = Polynomial::lagrange_basis(&points).unwrap();

        for (i, l) in basis.iter().enumerate() {
            assert_eq!(l.degree(), points.len() - 1);
            for (j, &x) in points.iter().enumerate() {
                let expected = if i == j { field.one() } else { field.zero() };
                assert_eq!(l.evaluate(x), expected);
            }
        }
    }

    #[test]
    fn test_lagrange_basis_recovers_constant_term() {
        let field = Field::new(59).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let secret = field.element(42).unwrap();
        let p = Polynomial::random(3, secret, &mut rng);

        let points: Vec<_> = (1..=4).map(|x| field.element(x).unwrap()).collect();
        let basis = Polynomial::lagrange_basis(&points).unwrap();
        let recovered = points
            .iter()
            .zip(&basis)
            .fold(field.zero(), |acc, (&x, l)| acc + p.evaluate(x) * l.evaluate(field.zero()));

        assert_eq!(recovered, secret);
    }

    #[test]
    fn test_lagrange_basis_duplicate_point() {
        let field = Field::new(59).unwrap();
        let points = [
            field.element(3).unwrap(),
            field.element(5).unwrap(),
            field.element(3).unwrap(),
        ];

        let err = Polynomial::lagrange_basis(&points).unwrap_err();
        assert_eq!(err, ShardError::DuplicatePoint(3));
        assert_eq!(err.kind(), ErrorKind::Integrity);
    }

    #[test]
    fn test_random_keeps_secret_constant() {
        let field = Field::new(59).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let secret = field.element(17).unwrap();
        let p = Polynomial::random(4, secret, &mut rng);

        assert_eq!(p.degree(), 4);
        assert_eq!(p.coefficients[0], secret);
        assert_eq!(p.evaluate(field.zero()), secret);
    }

    #[test]
    fn test_display() {
        let field = Field::new(59).unwrap();
        assert_eq!(poly(&field, &[1, 1, 3]).to_string(), "3x^2 + x + 1");
        assert_eq!(poly(&field, &[0, 2, 0, 1]).to_string(), "x^3 + 2x");
        assert_eq!(Polynomial::zero(&field).to_string(), "0");
    }
}
