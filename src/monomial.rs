//! Monomial
//!
//! An exponent vector over a fixed arity together with a default ordering
//! tag, generalized with an explicit order tag and a REVLEX variant so all
//! four of {LEX, REVLEX, GRLEX, GREVLEX} can be compared interchangeably.

use crate::error::{PolyjamError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The four supported monomial orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonomialOrder {
    Lex,
    Revlex,
    Grlex,
    Grevlex,
}

/// An exponent vector of fixed arity, tagged with the order it is compared
/// under by default.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Monomial {
    pub exponents: Vec<u32>,
    pub order: MonomialOrder,
}

impl Monomial {
    /// The identity monomial (all exponents zero).
    pub fn identity(arity: usize, order: MonomialOrder) -> Self {
        Monomial {
            exponents: vec![0; arity],
            order,
        }
    }

    pub fn from_exponents(exponents: Vec<u32>, order: MonomialOrder) -> Self {
        Monomial { exponents, order }
    }

    /// A single-variable monomial `x_index^1`. `index == 0` yields the
    /// identity.
    pub fn from_index(arity: usize, index: usize, order: MonomialOrder) -> Self {
        let mut exponents = vec![0; arity];
        if index > 0 {
            exponents[index - 1] = 1;
        }
        Monomial { exponents, order }
    }

    pub fn arity(&self) -> usize {
        self.exponents.len()
    }

    pub fn degree(&self) -> u32 {
        self.exponents.iter().sum()
    }

    pub fn is_identity(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    fn check_arity(&self, other: &Monomial, operation: &'static str) -> Result<()> {
        if self.arity() != other.arity() {
            return Err(PolyjamError::TypeMismatch { operation });
        }
        Ok(())
    }

    pub fn multiply(&self, other: &Monomial) -> Result<Monomial> {
        self.check_arity(other, "Monomial::multiply")?;
        Ok(Monomial {
            exponents: self
                .exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| a + b)
                .collect(),
            order: self.order,
        })
    }

    pub fn divide(&self, other: &Monomial) -> Result<Monomial> {
        self.check_arity(other, "Monomial::divide")?;
        let mut result = Vec::with_capacity(self.arity());
        for (a, b) in self.exponents.iter().zip(&other.exponents) {
            if a < b {
                return Err(PolyjamError::ArithmeticDomain {
                    operation: "Monomial::divide",
                });
            }
            result.push(a - b);
        }
        Ok(Monomial {
            exponents: result,
            order: self.order,
        })
    }

    pub fn is_divisible_by(&self, other: &Monomial) -> Result<bool> {
        self.check_arity(other, "Monomial::is_divisible_by")?;
        Ok(self
            .exponents
            .iter()
            .zip(&other.exponents)
            .all(|(a, b)| a >= b))
    }

    pub fn is_relatively_prime(&self, other: &Monomial) -> Result<bool> {
        self.check_arity(other, "Monomial::is_relatively_prime")?;
        Ok(self
            .exponents
            .iter()
            .zip(&other.exponents)
            .all(|(a, b)| *a == 0 || *b == 0))
    }

    pub fn lcm(&self, other: &Monomial) -> Result<Monomial> {
        self.check_arity(other, "Monomial::lcm")?;
        Ok(Monomial {
            exponents: self
                .exponents
                .iter()
                .zip(&other.exponents)
                .map(|(a, b)| (*a).max(*b))
                .collect(),
            order: self.order,
        })
    }

    /// Rewrites the order tag in place without altering exponents; used to
    /// transport a term between orderings.
    pub fn set_order(&mut self, order: MonomialOrder) {
        self.order = order;
    }

    /// Deterministic total order under the supplied order (not necessarily
    /// `self.order`).
    pub fn compare(&self, other: &Monomial, order: MonomialOrder) -> Ordering {
        match order {
            MonomialOrder::Lex => Self::compare_lex(&self.exponents, &other.exponents),
            MonomialOrder::Revlex => Self::compare_revlex(&self.exponents, &other.exponents),
            MonomialOrder::Grlex => {
                let d1: u32 = self.degree();
                let d2: u32 = other.degree();
                d1.cmp(&d2)
                    .then_with(|| Self::compare_lex(&self.exponents, &other.exponents))
            }
            MonomialOrder::Grevlex => {
                let d1: u32 = self.degree();
                let d2: u32 = other.degree();
                d1.cmp(&d2)
                    .then_with(|| Self::compare_revlex_tiebreak(&self.exponents, &other.exponents))
            }
        }
    }

    fn compare_lex(a: &[u32], b: &[u32]) -> Ordering {
        for (x, y) in a.iter().zip(b) {
            match x.cmp(y) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    /// REVLEX: compare right-to-left, then reverse the sign of the result.
    fn compare_revlex(a: &[u32], b: &[u32]) -> Ordering {
        for (x, y) in a.iter().zip(b).rev() {
            match x.cmp(y) {
                Ordering::Equal => continue,
                other => return other.reverse(),
            }
        }
        Ordering::Equal
    }

    /// GREVLEX's tie-break after equal total degree: reverse-lex on the
    /// reversed exponents (larger trailing exponent in `b` wins).
    fn compare_revlex_tiebreak(a: &[u32], b: &[u32]) -> Ordering {
        for (x, y) in a.iter().zip(b).rev() {
            match y.cmp(x) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }

    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.exponents
            .iter()
            .zip(values)
            .map(|(&e, &v)| v.powi(e as i32))
            .product()
    }
}

impl PartialEq for Monomial {
    /// Order-independent: compares exponent vectors directly.
    fn eq(&self, other: &Self) -> bool {
        self.exponents == other.exponents
    }
}

impl std::hash::Hash for Monomial {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.exponents.hash(state);
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Monomial {
    /// Uses the monomial's own ordering tag.
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other, self.order)
    }
}

impl std::fmt::Display for Monomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_identity() {
            return write!(f, "1");
        }
        let mut first = true;
        for (i, &e) in self.exponents.iter().enumerate() {
            if e == 0 {
                continue;
            }
            if !first {
                write!(f, "*")?;
            }
            first = false;
            if e == 1 {
                write!(f, "x_{}", i + 1)?;
            } else {
                write!(f, "x_{}^{}", i + 1, e)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grevlex_degree_two_ordering_for_three_unknowns() {
        // x1^2 > x1*x2 > x2^2 > x1*x3 > x2*x3 > x3^2
        let order = MonomialOrder::Grevlex;
        let m = |e: [u32; 3]| Monomial::from_exponents(e.to_vec(), order);

        let mut monomials = vec![
            m([2, 0, 0]),
            m([1, 1, 0]),
            m([0, 2, 0]),
            m([1, 0, 1]),
            m([0, 1, 1]),
            m([0, 0, 2]),
        ];
        let expected = monomials.clone();
        monomials.sort_by(|a, b| b.cmp(a));
        assert_eq!(monomials, expected);
    }

    #[test]
    fn division_fails_on_negative_exponent() {
        let a = Monomial::from_exponents(vec![1, 0], MonomialOrder::Lex);
        let b = Monomial::from_exponents(vec![2, 0], MonomialOrder::Lex);
        assert!(matches!(
            a.divide(&b),
            Err(PolyjamError::ArithmeticDomain { .. })
        ));
    }

    #[test]
    fn equality_is_order_independent() {
        let a = Monomial::from_exponents(vec![1, 2], MonomialOrder::Lex);
        let b = Monomial::from_exponents(vec![1, 2], MonomialOrder::Grevlex);
        assert_eq!(a, b);
    }

    #[test]
    fn from_index_zero_is_identity() {
        let m = Monomial::from_index(3, 0, MonomialOrder::Lex);
        assert!(m.is_identity());
    }

    #[test]
    fn order_totality_holds_for_every_pair() {
        let order = MonomialOrder::Grevlex;
        let monomials: Vec<Monomial> = (0..3)
            .flat_map(|a| (0..3).map(move |b| (a, b)))
            .map(|(a, b)| Monomial::from_exponents(vec![a, b], order))
            .collect();
        for m1 in &monomials {
            for m2 in &monomials {
                let exactly_one = [
                    m1.compare(m2, order) == Ordering::Less,
                    m1.compare(m2, order) == Ordering::Equal,
                    m1.compare(m2, order) == Ordering::Greater,
                ]
                .iter()
                .filter(|&&x| x)
                .count();
                assert_eq!(exactly_one, 1);
            }
        }
    }
}
