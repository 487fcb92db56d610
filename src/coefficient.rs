//! Coefficient
//!
//! A type-erased field element with reference-counted, structurally-shared
//! storage: `clone()` (via `Clone`) shares the payload so polynomial
//! assignment can stay lazy; `deep_clone()` performs an explicit deep copy
//! for when a caller actually needs an independent value.

use crate::error::Result;
use crate::field::{Field, FieldKind};
use std::rc::Rc;

/// A shared handle to a [`Field`] value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coefficient(Rc<Field>);

impl Coefficient {
    pub fn new(field: Field) -> Self {
        Coefficient(Rc::new(field))
    }

    pub fn zero(kind: FieldKind) -> Self {
        Coefficient::new(Field::zero(kind))
    }

    pub fn one(kind: FieldKind) -> Self {
        Coefficient::new(Field::one(kind))
    }

    /// A zero of the same kind as `self`, preserving a `Zp` characteristic
    /// instead of defaulting it — unlike `Coefficient::zero`, which always
    /// assumes the default characteristic for `Zp`.
    pub fn zero_like(&self) -> Self {
        Coefficient::new(self.0.zero_like())
    }

    /// A one of the same kind as `self`, preserving a `Zp` characteristic.
    pub fn one_like(&self) -> Self {
        Coefficient::new(self.0.one_like())
    }

    pub fn from_f64(value: f64) -> Self {
        Coefficient::new(Field::R(value))
    }

    pub fn from_ratio(numerator: i64, denominator: u64) -> Result<Self> {
        Ok(Coefficient::new(Field::q_from_ratio(numerator, denominator)?))
    }

    pub fn from_int(value: i64, kind: FieldKind) -> Result<Self> {
        match kind {
            FieldKind::R => Ok(Coefficient::new(Field::R(value as f64))),
            FieldKind::Q => Coefficient::from_ratio(value, 1),
            FieldKind::Zp => Ok(Coefficient::new(Field::Zp(crate::field::ZpValue::new(
                value,
                crate::config::GeneratorConfig::default().characteristic,
            )))),
            FieldKind::Sym => Ok(Coefficient::new(Field::Sym(
                crate::field::SymValue::constant(value),
            ))),
        }
    }

    pub fn symbol(name: &str) -> Self {
        Coefficient::new(Field::Sym(crate::field::SymValue::symbol(name)))
    }

    /// Structurally independent copy: never shares storage with `self`.
    pub fn deep_clone(&self) -> Self {
        Coefficient::new((*self.0).clone())
    }

    pub fn field(&self) -> &Field {
        &self.0
    }

    pub fn kind(&self) -> FieldKind {
        self.0.kind()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn characteristic(&self) -> Result<u64> {
        self.0.characteristic()
    }

    fn make_mut(&mut self) -> &mut Field {
        Rc::make_mut(&mut self.0)
    }

    pub fn negate(&mut self) {
        self.make_mut().negate();
    }

    pub fn try_invert(&mut self) -> Result<()> {
        self.make_mut().try_invert()
    }

    pub fn add_assign(&mut self, other: &Coefficient) -> Result<()> {
        self.make_mut().add_assign(&other.0)
    }

    pub fn sub_assign(&mut self, other: &Coefficient) -> Result<()> {
        self.make_mut().sub_assign(&other.0)
    }

    pub fn mul_assign(&mut self, other: &Coefficient) -> Result<()> {
        self.make_mut().mul_assign(&other.0)
    }

    pub fn div_assign(&mut self, other: &Coefficient) -> Result<()> {
        self.make_mut().div_assign(&other.0)
    }

    pub fn eq_value(&self, other: &Coefficient) -> Result<bool> {
        self.0.eq_value(&other.0)
    }

    pub fn add(&self, other: &Coefficient) -> Result<Coefficient> {
        let mut result = self.clone();
        result.add_assign(other)?;
        Ok(result)
    }

    pub fn sub(&self, other: &Coefficient) -> Result<Coefficient> {
        let mut result = self.clone();
        result.sub_assign(other)?;
        Ok(result)
    }

    pub fn mul(&self, other: &Coefficient) -> Result<Coefficient> {
        let mut result = self.clone();
        result.mul_assign(other)?;
        Ok(result)
    }

    pub fn div(&self, other: &Coefficient) -> Result<Coefficient> {
        let mut result = self.clone();
        result.div_assign(other)?;
        Ok(result)
    }
}

impl std::fmt::Display for Coefficient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_deep_clone_copies() {
        let a = Coefficient::from_int(5, FieldKind::Q).unwrap();
        let shared = a.clone();
        let mut deep = a.deep_clone();

        deep.add_assign(&Coefficient::from_int(1, FieldKind::Q).unwrap())
            .unwrap();

        // `shared` still points at the original Rc payload.
        assert!(shared.eq_value(&a).unwrap());
        assert!(!deep.eq_value(&a).unwrap());
    }

    #[test]
    fn zero_and_one_factories() {
        assert!(Coefficient::zero(FieldKind::Q).is_zero());
        assert!(!Coefficient::one(FieldKind::Q).is_zero());
    }
}
