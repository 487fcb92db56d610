//! Polynomial
//!
//! An ordered set of non-zero terms keyed by descending monomial order,
//! backed by a `BTreeMap` rather than a hash map so that "leading term" is
//! well-defined and iteration is always strictly descending.

use crate::coefficient::Coefficient;
use crate::error::{PolyjamError, Result};
use crate::field::FieldKind;
use crate::monomial::{Monomial, MonomialOrder};
use crate::term::Term;
use std::collections::BTreeMap;

/// The "type" of a polynomial: everything that must match for two
/// polynomials to be similar (combinable by arithmetic).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyType {
    pub arity: usize,
    pub order: MonomialOrder,
    pub carrier_kinds: Vec<FieldKind>,
}

/// A sparse, order-keyed polynomial.
#[derive(Debug, Clone)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, Term>,
    ty: PolyType,
    pub sugar: u32,
}

impl Polynomial {
    pub fn zero(ty: PolyType) -> Self {
        Polynomial {
            terms: BTreeMap::new(),
            ty,
            sugar: 0,
        }
    }

    pub fn from_terms(ty: PolyType, terms: Vec<Term>) -> Result<Self> {
        let mut poly = Polynomial::zero(ty);
        for term in terms {
            poly.insert(term)?;
        }
        Ok(poly)
    }

    pub fn ty(&self) -> &PolyType {
        &self.ty
    }

    pub fn arity(&self) -> usize {
        self.ty.arity
    }

    pub fn order(&self) -> MonomialOrder {
        self.ty.order
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Terms in strictly descending monomial order.
    pub fn terms_descending(&self) -> impl Iterator<Item = &Term> {
        self.terms.values().rev()
    }

    fn placeholder_zero(&self) -> Term {
        Term::new(
            Monomial::identity(self.ty.arity, self.ty.order),
            self.ty
                .carrier_kinds
                .iter()
                .map(|k| Coefficient::zero(*k))
                .collect(),
        )
    }

    /// The greatest term under this polynomial's order, or a placeholder
    /// zero term (still carrying valid field-kind metadata) when empty.
    pub fn leading_term(&self) -> Term {
        self.terms
            .iter()
            .next_back()
            .map(|(_, t)| t.clone())
            .unwrap_or_else(|| self.placeholder_zero())
    }

    pub fn leading_monomial(&self) -> Monomial {
        self.leading_term().monomial
    }

    pub fn leading_coefficient(&self) -> Coefficient {
        self.leading_term().dominant().clone()
    }

    pub fn is_similar(&self, other: &Polynomial) -> bool {
        self.ty == other.ty
    }

    /// Insert or merge a term. If the merge produces a zero coefficient the
    /// term is removed; if the last non-zero term is removed, the
    /// polynomial reverts to the placeholder zero.
    pub fn insert(&mut self, term: Term) -> Result<()> {
        if term.carrier_kinds() != self.ty.carrier_kinds || term.monomial.arity() != self.ty.arity {
            return Err(PolyjamError::TypeMismatch {
                operation: "Polynomial::insert",
            });
        }
        let mut monomial = term.monomial.clone();
        monomial.set_order(self.ty.order);
        match self.terms.remove(&monomial) {
            Some(existing) => {
                let merged = existing.add(&term)?;
                if !merged.is_zero() {
                    self.terms.insert(monomial, merged);
                }
            }
            None => {
                if !term.is_zero() {
                    self.terms.insert(monomial, term);
                }
            }
        }
        Ok(())
    }

    fn check_similar(&self, other: &Polynomial, operation: &'static str) -> Result<()> {
        if !self.is_similar(other) {
            return Err(PolyjamError::TypeMismatch { operation });
        }
        Ok(())
    }

    pub fn add(&self, other: &Polynomial) -> Result<Polynomial> {
        self.check_similar(other, "Polynomial::add")?;
        let mut result = self.clone();
        for term in other.terms.values() {
            result.insert(term.clone())?;
        }
        Ok(result)
    }

    pub fn add_assign(&mut self, other: &Polynomial) -> Result<()> {
        self.check_similar(other, "Polynomial::add_assign")?;
        for term in other.terms.values().cloned().collect::<Vec<_>>() {
            self.insert(term)?;
        }
        Ok(())
    }

    pub fn negate(&self) -> Polynomial {
        Polynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, t)| (m.clone(), t.negate()))
                .collect(),
            ty: self.ty.clone(),
            sugar: self.sugar,
        }
    }

    pub fn sub(&self, other: &Polynomial) -> Result<Polynomial> {
        self.check_similar(other, "Polynomial::sub")?;
        self.add(&other.negate())
    }

    /// Distributive multiplication; a zero-times-anything shortcut
    /// preserves the polynomial's type without touching every term.
    pub fn mul(&self, other: &Polynomial) -> Result<Polynomial> {
        self.check_similar(other, "Polynomial::mul")?;
        if self.is_zero() || other.is_zero() {
            return Ok(Polynomial::zero(self.ty.clone()));
        }
        let mut result = Polynomial::zero(self.ty.clone());
        for a in self.terms.values() {
            for b in other.terms.values() {
                result.insert(a.mul(b)?)?;
            }
        }
        Ok(result)
    }

    pub fn mul_monomial(&self, monomial: &Monomial) -> Result<Polynomial> {
        let mut result = Polynomial::zero(self.ty.clone());
        for term in self.terms.values() {
            let new_monomial = term.monomial.multiply(monomial)?;
            let mut new_term = term.clone();
            new_term.monomial = new_monomial;
            result.insert(new_term)?;
        }
        Ok(result)
    }

    /// `p <- q`, permitted only when `p.is_similar(q)`. On success `p`
    /// shares `q`'s term storage and `p`'s sugar is replaced by `q`'s.
    pub fn assign(&mut self, other: &Polynomial) -> Result<()> {
        if !self.is_similar(other) {
            return Err(PolyjamError::TypeMismatch {
                operation: "Polynomial::assign",
            });
        }
        self.terms = other.terms.clone();
        self.sugar = other.sugar;
        Ok(())
    }

    /// Constructs a fresh polynomial over `new_order`, re-inserting every
    /// term in its new position.
    pub fn different_order_version(&self, new_order: MonomialOrder) -> Result<Polynomial> {
        let new_ty = PolyType {
            order: new_order,
            ..self.ty.clone()
        };
        let mut result = Polynomial::zero(new_ty);
        for term in self.terms.values() {
            let mut new_term = term.clone();
            new_term.monomial.set_order(new_order);
            result.insert(new_term)?;
        }
        result.sugar = self.sugar;
        Ok(result)
    }

    /// Drops every term whose monomial degree exceeds `cap`; reverts to
    /// placeholder zero if all terms are dropped.
    pub fn truncate_degree(&mut self, cap: u32) {
        self.terms.retain(|m, _| m.degree() <= cap);
    }

    /// Substitutes numeric values for each unknown (R carrier only).
    pub fn eval(&self, values: &[f64]) -> Result<f64> {
        let mut total = 0.0;
        for term in self.terms.values() {
            let coeff = term.dominant();
            let crate::field::Field::R(v) = coeff.field() else {
                return Err(PolyjamError::TypeMismatch {
                    operation: "Polynomial::eval(expects R)",
                });
            };
            total += v * term.monomial.evaluate(values);
        }
        Ok(total)
    }

    /// Generic pow-loop evaluation, valid for any field kind.
    pub fn eval_generic(&self, values: &[Coefficient]) -> Result<Coefficient> {
        if values.len() != self.ty.arity {
            return Err(PolyjamError::TypeMismatch {
                operation: "Polynomial::eval_generic(arity)",
            });
        }
        let kind = *self
            .ty
            .carrier_kinds
            .first()
            .ok_or(PolyjamError::TypeMismatch {
                operation: "Polynomial::eval_generic(no carriers)",
            })?;
        // Seed the accumulator from a real term's coefficient (`zero_like`)
        // rather than a fresh `Coefficient::zero(kind)`, so a `Zp`
        // polynomial's actual characteristic survives evaluation instead of
        // defaulting.
        let mut total = self
            .terms
            .values()
            .next()
            .map(|t| t.dominant().zero_like())
            .unwrap_or_else(|| Coefficient::zero(kind));
        for term in self.terms.values() {
            let mut contribution = term.dominant().clone();
            for (exponent, value) in term.monomial.exponents.iter().zip(values) {
                for _ in 0..*exponent {
                    contribution.mul_assign(value)?;
                }
            }
            total.add_assign(&contribution)?;
        }
        Ok(total)
    }
}
