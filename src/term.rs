//! Term
//!
//! An ordered pair of a monomial and a small vector of coefficients — one
//! carrier for an ordinary term, two for the dual-carrier term this crate
//! supports for a numeric `Zp` probe value kept in lock-step with its `Sym`
//! pre-image (position 0 = Zp, position 1 = Sym). A *dominant* index selects
//! which carrier single-value accessors expose; arithmetic is applied
//! pointwise across all carriers.
//!
//! The generation pipeline (`template::build` / `emit`) does not actually
//! build dual-carrier terms: `CoeffMatrix` rows carry single-carrier `Zp`
//! coefficients, and the emitter replays the reduced template against a
//! separately supplied `Sym` polynomial set via `CoeffMatrix::get_polynomial`
//! and its symbolic counterpart (see `DESIGN.md`). Multi-carrier `Term`s are
//! exercised by this module's own tests but are otherwise unused machinery.

use crate::coefficient::Coefficient;
use crate::error::{PolyjamError, Result};
use crate::field::FieldKind;
use crate::monomial::Monomial;

/// A term: a monomial paired with one or more coefficient carriers.
#[derive(Debug, Clone)]
pub struct Term {
    pub monomial: Monomial,
    carriers: Vec<Coefficient>,
    dominant: usize,
}

impl Term {
    pub fn new(monomial: Monomial, carriers: Vec<Coefficient>) -> Self {
        debug_assert!(!carriers.is_empty());
        Term {
            monomial,
            carriers,
            dominant: 0,
        }
    }

    pub fn single(monomial: Monomial, coefficient: Coefficient) -> Self {
        Term::new(monomial, vec![coefficient])
    }

    pub fn carrier_count(&self) -> usize {
        self.carriers.len()
    }

    pub fn carrier(&self, index: usize) -> Option<&Coefficient> {
        self.carriers.get(index)
    }

    pub fn carrier_kinds(&self) -> Vec<FieldKind> {
        self.carriers.iter().map(|c| c.kind()).collect()
    }

    pub fn dominant_index(&self) -> usize {
        self.dominant
    }

    pub fn dominant(&self) -> &Coefficient {
        &self.carriers[self.dominant]
    }

    pub fn set_dominant(&mut self, index: usize) -> Result<()> {
        if index >= self.carriers.len() {
            return Err(PolyjamError::Bounds {
                operation: "Term::set_dominant",
                index,
                len: self.carriers.len(),
            });
        }
        self.dominant = index;
        Ok(())
    }

    /// True when arity, ordering, carrier count, and per-carrier kinds all
    /// match — the precondition for any binary operation between two terms.
    pub fn is_similar(&self, other: &Term) -> bool {
        self.monomial.arity() == other.monomial.arity()
            && self.monomial.order == other.monomial.order
            && self.carrier_kinds() == other.carrier_kinds()
    }

    pub fn is_zero(&self) -> bool {
        self.dominant().is_zero()
    }

    pub fn is_one(&self) -> bool {
        !self.dominant().is_zero()
            && self
                .dominant()
                .eq_value(&self.dominant().one_like())
                .unwrap_or(false)
            && self.monomial.is_identity()
    }

    /// A term with the same type (arity/order/carrier kinds) as `self`,
    /// holding zero in every carrier. `full = false` keeps only the dominant
    /// carrier (used by the emitter once it discards the Zp carrier after
    /// elimination).
    pub fn zero(&self, full: bool) -> Term {
        let monomial = Monomial::identity(self.monomial.arity(), self.monomial.order);
        if full {
            Term::new(
                monomial,
                self.carriers.iter().map(|c| c.zero_like()).collect(),
            )
        } else {
            Term::single(monomial, self.dominant().zero_like())
        }
    }

    pub fn one(&self, full: bool) -> Term {
        let monomial = Monomial::identity(self.monomial.arity(), self.monomial.order);
        if full {
            Term::new(
                monomial,
                self.carriers.iter().map(|c| c.one_like()).collect(),
            )
        } else {
            Term::single(monomial, self.dominant().one_like())
        }
    }

    fn pointwise(&self, other: &Term, op: impl Fn(&mut Coefficient, &Coefficient) -> Result<()>) -> Result<Vec<Coefficient>> {
        self.carriers
            .iter()
            .zip(&other.carriers)
            .map(|(a, b)| {
                let mut a = a.clone();
                op(&mut a, b)?;
                Ok(a)
            })
            .collect()
    }

    /// Term-level addition. Only valid between terms sharing the same
    /// monomial (polynomial insertion is the only caller).
    pub fn add(&self, other: &Term) -> Result<Term> {
        if !self.is_similar(other) {
            return Err(PolyjamError::TypeMismatch { operation: "Term::add" });
        }
        if self.monomial != other.monomial {
            return Err(PolyjamError::TypeMismatch { operation: "Term::add(monomial)" });
        }
        Ok(Term {
            monomial: self.monomial.clone(),
            carriers: self.pointwise(other, Coefficient::add_assign)?,
            dominant: self.dominant,
        })
    }

    pub fn negate(&self) -> Term {
        let mut carriers = self.carriers.clone();
        for c in &mut carriers {
            c.negate();
        }
        Term {
            monomial: self.monomial.clone(),
            carriers,
            dominant: self.dominant,
        }
    }

    pub fn mul(&self, other: &Term) -> Result<Term> {
        if !self.is_similar(other) {
            return Err(PolyjamError::TypeMismatch { operation: "Term::mul" });
        }
        Ok(Term {
            monomial: self.monomial.multiply(&other.monomial)?,
            carriers: self.pointwise(other, Coefficient::mul_assign)?,
            dominant: self.dominant,
        })
    }

    /// Equality uses the dominant coefficient only: same monomial and same
    /// dominant coefficient.
    pub fn eq_dominant(&self, other: &Term) -> Result<bool> {
        Ok(self.monomial == other.monomial && self.dominant().eq_value(other.dominant())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monomial::MonomialOrder;

    fn q_term(exp: u32, value: i64) -> Term {
        Term::single(
            Monomial::from_exponents(vec![exp], MonomialOrder::Lex),
            Coefficient::from_int(value, FieldKind::Q).unwrap(),
        )
    }

    #[test]
    fn similar_terms_combine_pointwise() {
        let a = q_term(2, 3);
        let b = q_term(2, 4);
        let sum = a.add(&b).unwrap();
        assert!(sum.dominant().eq_value(&Coefficient::from_int(7, FieldKind::Q).unwrap()).unwrap());
    }

    #[test]
    fn dissimilar_terms_reject_addition() {
        let a = q_term(1, 1);
        let zp = Term::single(
            Monomial::from_exponents(vec![1], MonomialOrder::Lex),
            Coefficient::from_int(1, FieldKind::Zp).unwrap(),
        );
        assert!(matches!(a.add(&zp), Err(PolyjamError::TypeMismatch { .. })));
    }

    #[test]
    fn set_dominant_out_of_range_is_bounds_error() {
        let mut a = q_term(0, 1);
        assert!(matches!(
            a.set_dominant(5),
            Err(PolyjamError::Bounds { .. })
        ));
    }

    #[test]
    fn dual_carrier_stays_in_lock_step() {
        let monomial = Monomial::from_exponents(vec![1], MonomialOrder::Lex);
        let a = Term::new(
            monomial.clone(),
            vec![
                Coefficient::from_int(3, FieldKind::Zp).unwrap(),
                Coefficient::symbol("a"),
            ],
        );
        let b = Term::new(
            monomial,
            vec![
                Coefficient::from_int(4, FieldKind::Zp).unwrap(),
                Coefficient::symbol("b"),
            ],
        );
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.carrier_count(), 2);
        assert!(sum
            .carrier(0)
            .unwrap()
            .eq_value(&Coefficient::from_int(7, FieldKind::Zp).unwrap())
            .unwrap());
    }
}
