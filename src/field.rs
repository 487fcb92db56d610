//! Field Elements
//!
//! Exact values over the rationals (Q), a prime field (Zp), a free symbolic
//! algebra (Sym), plus a floating R used only for evaluation and emitted
//! code. Modelled as a tagged-variant sum type rather than virtual dispatch
//! (REDESIGN FLAGS): kind mismatch on a binary operation is a pattern-match
//! failure reported as `PolyjamError::TypeMismatch`.

use crate::error::{PolyjamError, Result};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::collections::BTreeMap;
use std::fmt;

/// The tag identifying which field a [`Field`] value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub enum FieldKind {
    R,
    Q,
    Zp,
    Sym,
}

/// A single named-symbol factor raised to a positive exponent within a
/// [`SymProduct`]. Symbols are unique within a product (repeats merge their
/// exponents on insertion).
pub type SymProduct = BTreeMap<String, u32>;

/// A symbolic value: a sum of signed products of named symbols. The empty
/// sum (zero) is represented by an empty map; factors are never zero
/// (zero-factor entries are deleted on insertion).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SymValue(pub BTreeMap<SymProduct, i64>);

impl SymValue {
    pub fn zero() -> Self {
        SymValue(BTreeMap::new())
    }

    pub fn one() -> Self {
        let mut m = BTreeMap::new();
        m.insert(SymProduct::new(), 1);
        SymValue(m)
    }

    pub fn constant(value: i64) -> Self {
        if value == 0 {
            return SymValue::zero();
        }
        let mut m = BTreeMap::new();
        m.insert(SymProduct::new(), value);
        SymValue(m)
    }

    pub fn symbol(name: &str) -> Self {
        let mut product = SymProduct::new();
        product.insert(name.to_string(), 1);
        let mut m = BTreeMap::new();
        m.insert(product, 1);
        SymValue(m)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    fn insert_or_merge(map: &mut BTreeMap<SymProduct, i64>, product: SymProduct, factor: i64) {
        if factor == 0 {
            return;
        }
        match map.get_mut(&product) {
            Some(existing) => {
                *existing += factor;
                if *existing == 0 {
                    map.remove(&product);
                }
            }
            None => {
                map.insert(product, factor);
            }
        }
    }

    pub fn add(&self, other: &SymValue) -> SymValue {
        let mut result = self.0.clone();
        for (product, factor) in &other.0 {
            Self::insert_or_merge(&mut result, product.clone(), *factor);
        }
        SymValue(result)
    }

    pub fn negate(&self) -> SymValue {
        SymValue(self.0.iter().map(|(p, f)| (p.clone(), -f)).collect())
    }

    pub fn sub(&self, other: &SymValue) -> SymValue {
        self.add(&other.negate())
    }

    fn merge_product(a: &SymProduct, b: &SymProduct) -> SymProduct {
        let mut result = a.clone();
        for (symbol, exponent) in b {
            *result.entry(symbol.clone()).or_insert(0) += exponent;
        }
        result
    }

    pub fn mul(&self, other: &SymValue) -> SymValue {
        let mut result: BTreeMap<SymProduct, i64> = BTreeMap::new();
        for (p1, f1) in &self.0 {
            for (p2, f2) in &other.0 {
                let product = Self::merge_product(p1, p2);
                let factor = f1 * f2;
                Self::insert_or_merge(&mut result, product, factor);
            }
        }
        SymValue(result)
    }
}

impl fmt::Display for SymValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "0");
        }
        let mut first = true;
        for (product, factor) in &self.0 {
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            write!(f, "{factor}")?;
            for (symbol, exponent) in product {
                if *exponent == 1 {
                    write!(f, "*{symbol}")?;
                } else {
                    write!(f, "*{symbol}^{exponent}")?;
                }
            }
        }
        Ok(())
    }
}

/// A member of the prime field Z/pZ, stored as the positive representative
/// in `[0, characteristic)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ZpValue {
    pub value: u64,
    pub characteristic: u64,
}

impl ZpValue {
    pub fn new(value: i64, characteristic: u64) -> Self {
        ZpValue {
            value: Self::modulo(value, characteristic),
            characteristic,
        }
    }

    fn modulo(value: i64, characteristic: u64) -> u64 {
        let m = characteristic as i64;
        (((value % m) + m) % m) as u64
    }

    /// Extended-Euclidean multiplicative inverse of `value` mod
    /// `characteristic`, or `None` if `value` is zero.
    pub fn try_invert(&self) -> Option<u64> {
        if self.value == 0 {
            return None;
        }
        let (mut old_r, mut r) = (self.value as i64, self.characteristic as i64);
        let (mut old_s, mut s) = (1i64, 0i64);
        while r != 0 {
            let quotient = old_r / r;
            let (new_r, new_s) = (old_r - quotient * r, old_s - quotient * s);
            old_r = r;
            r = new_r;
            old_s = s;
            s = new_s;
        }
        Some(Self::modulo(old_s, self.characteristic))
    }
}

/// A tagged-variant field member: R (float), Q (exact rational), Zp (prime
/// field), or Sym (free symbolic algebra).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Field {
    R(f64),
    Q(BigRational),
    Zp(ZpValue),
    Sym(SymValue),
}

impl Field {
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::R(_) => FieldKind::R,
            Field::Q(_) => FieldKind::Q,
            Field::Zp(_) => FieldKind::Zp,
            Field::Sym(_) => FieldKind::Sym,
        }
    }

    pub fn zero(kind: FieldKind) -> Self {
        match kind {
            FieldKind::R => Field::R(0.0),
            FieldKind::Q => Field::Q(BigRational::zero()),
            FieldKind::Zp => Field::Zp(ZpValue::new(0, crate::config::GeneratorConfig::default().characteristic)),
            FieldKind::Sym => Field::Sym(SymValue::zero()),
        }
    }

    pub fn zero_like(&self) -> Self {
        match self {
            Field::Zp(z) => Field::Zp(ZpValue::new(0, z.characteristic)),
            other => Field::zero(other.kind()),
        }
    }

    pub fn one(kind: FieldKind) -> Self {
        match kind {
            FieldKind::R => Field::R(1.0),
            FieldKind::Q => Field::Q(BigRational::from_integer(1.into())),
            FieldKind::Zp => Field::Zp(ZpValue::new(1, crate::config::GeneratorConfig::default().characteristic)),
            FieldKind::Sym => Field::Sym(SymValue::one()),
        }
    }

    pub fn one_like(&self) -> Self {
        match self {
            Field::Zp(z) => Field::Zp(ZpValue::new(1, z.characteristic)),
            other => Field::one(other.kind()),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Field::R(v) => *v == 0.0,
            Field::Q(v) => v.is_zero(),
            Field::Zp(v) => v.value == 0,
            Field::Sym(v) => v.is_zero(),
        }
    }

    fn check_kind(&self, other: &Field, operation: &'static str) -> Result<()> {
        if self.kind() != other.kind() {
            return Err(PolyjamError::TypeMismatch { operation });
        }
        if let (Field::Zp(a), Field::Zp(b)) = (self, other) {
            if a.characteristic != b.characteristic {
                return Err(PolyjamError::TypeMismatch { operation });
            }
        }
        Ok(())
    }

    pub fn negate(&mut self) {
        match self {
            Field::R(v) => *v = -*v,
            Field::Q(v) => *v = -v.clone(),
            Field::Zp(v) => v.value = ZpValue::modulo(-(v.value as i64), v.characteristic),
            Field::Sym(v) => *v = v.negate(),
        }
    }

    pub fn try_invert(&mut self) -> Result<()> {
        match self {
            Field::R(v) => {
                if *v == 0.0 {
                    return Err(PolyjamError::ArithmeticDomain { operation: "R::invert" });
                }
                *v = 1.0 / *v;
                Ok(())
            }
            Field::Q(v) => {
                if v.is_zero() {
                    return Err(PolyjamError::ArithmeticDomain { operation: "Q::invert" });
                }
                *v = v.recip();
                Ok(())
            }
            Field::Zp(v) => match v.try_invert() {
                Some(inv) => {
                    v.value = inv;
                    Ok(())
                }
                None => Err(PolyjamError::ArithmeticDomain { operation: "Zp::invert" }),
            },
            Field::Sym(_) => Err(PolyjamError::Unsupported { operation: "Sym::invert" }),
        }
    }

    pub fn add_assign(&mut self, other: &Field) -> Result<()> {
        self.check_kind(other, "Field::add")?;
        match (self, other) {
            (Field::R(a), Field::R(b)) => {
                *a += b;
                Ok(())
            }
            (Field::Q(a), Field::Q(b)) => {
                *a += b;
                Ok(())
            }
            (Field::Zp(a), Field::Zp(b)) => {
                a.value = ZpValue::modulo(a.value as i64 + b.value as i64, a.characteristic);
                Ok(())
            }
            (Field::Sym(a), Field::Sym(b)) => {
                *a = a.add(b);
                Ok(())
            }
            _ => unreachable!("kind checked above"),
        }
    }

    pub fn sub_assign(&mut self, other: &Field) -> Result<()> {
        self.check_kind(other, "Field::sub")?;
        match (self, other) {
            (Field::R(a), Field::R(b)) => {
                *a -= b;
                Ok(())
            }
            (Field::Q(a), Field::Q(b)) => {
                *a -= b;
                Ok(())
            }
            (Field::Zp(a), Field::Zp(b)) => {
                a.value = ZpValue::modulo(a.value as i64 - b.value as i64, a.characteristic);
                Ok(())
            }
            (Field::Sym(a), Field::Sym(b)) => {
                *a = a.sub(b);
                Ok(())
            }
            _ => unreachable!("kind checked above"),
        }
    }

    pub fn mul_assign(&mut self, other: &Field) -> Result<()> {
        self.check_kind(other, "Field::mul")?;
        match (self, other) {
            (Field::R(a), Field::R(b)) => {
                *a *= b;
                Ok(())
            }
            (Field::Q(a), Field::Q(b)) => {
                *a *= b;
                Ok(())
            }
            (Field::Zp(a), Field::Zp(b)) => {
                let product = (a.value as u128 * b.value as u128) % a.characteristic as u128;
                a.value = product as u64;
                Ok(())
            }
            (Field::Sym(a), Field::Sym(b)) => {
                *a = a.mul(b);
                Ok(())
            }
            _ => unreachable!("kind checked above"),
        }
    }

    pub fn div_assign(&mut self, other: &Field) -> Result<()> {
        self.check_kind(other, "Field::div")?;
        match other {
            Field::Sym(_) => return Err(PolyjamError::Unsupported { operation: "Sym::div" }),
            _ => {}
        }
        let mut inv = other.clone();
        inv.try_invert()?;
        self.mul_assign(&inv)
    }

    pub fn eq_value(&self, other: &Field) -> Result<bool> {
        self.check_kind(other, "Field::eq")?;
        Ok(match (self, other) {
            (Field::R(a), Field::R(b)) => a == b,
            (Field::Q(a), Field::Q(b)) => a == b,
            (Field::Zp(a), Field::Zp(b)) => a.value == b.value,
            (Field::Sym(a), Field::Sym(b)) => a == b,
            _ => unreachable!("kind checked above"),
        })
    }

    /// Strict comparison; only meaningful for R and Q (spec: Zp/Sym
    /// comparison is `Unsupported`).
    pub fn compare(&self, other: &Field) -> Result<std::cmp::Ordering> {
        self.check_kind(other, "Field::compare")?;
        match (self, other) {
            (Field::R(a), Field::R(b)) => a
                .partial_cmp(b)
                .ok_or(PolyjamError::Unsupported { operation: "R::compare(NaN)" }),
            (Field::Q(a), Field::Q(b)) => Ok(a.cmp(b)),
            _ => Err(PolyjamError::Unsupported { operation: "Field::compare" }),
        }
    }

    pub fn characteristic(&self) -> Result<u64> {
        match self {
            Field::Zp(v) => Ok(v.characteristic),
            _ => Err(PolyjamError::Unsupported { operation: "Field::characteristic" }),
        }
    }

    /// Reduce a `Q` value to lowest terms with the sign living on the
    /// numerator. `BigRational` maintains this invariant internally on every
    /// arithmetic operation already; exposed here so callers constructing a
    /// `Field::Q` from raw numerator/denominator get the same guarantee.
    pub fn q_from_ratio(numerator: i64, denominator: u64) -> Result<Field> {
        if denominator == 0 {
            return Err(PolyjamError::ArithmeticDomain { operation: "Q::from_ratio" });
        }
        let gcd = (numerator.unsigned_abs()).gcd(&denominator);
        let gcd = gcd.max(1);
        Ok(Field::Q(BigRational::new(
            (numerator / gcd as i64).into(),
            (denominator / gcd).into(),
        )))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::R(v) => write!(f, "{v}"),
            Field::Q(v) => write!(f, "{v}"),
            Field::Zp(v) => write!(f, "{}", v.value),
            Field::Sym(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn q_arithmetic_matches_spec_examples() {
        let mut a = Field::q_from_ratio(1, 2).unwrap();
        let b = Field::q_from_ratio(1, 3).unwrap();
        a.add_assign(&b).unwrap();
        assert_eq!(a, Field::q_from_ratio(5, 6).unwrap());

        let mut c = Field::q_from_ratio(2, 4).unwrap();
        let d = Field::q_from_ratio(1, 2).unwrap();
        c.sub_assign(&d).unwrap();
        assert!(c.is_zero());

        let mut e = Field::q_from_ratio(3, 4).unwrap();
        let g = Field::q_from_ratio(4, 9).unwrap();
        e.mul_assign(&g).unwrap();
        assert_eq!(e, Field::q_from_ratio(1, 3).unwrap());
    }

    #[test]
    fn q_reduces_to_lowest_terms() {
        let v = Field::q_from_ratio(2, 4).unwrap();
        if let Field::Q(r) = v {
            assert_eq!(*r.numer(), num_bigint::BigInt::from(1));
            assert_eq!(*r.denom(), num_bigint::BigInt::from(2));
        } else {
            panic!("expected Q");
        }
    }

    #[test]
    fn zp_arithmetic_with_p7() {
        let mut a = Field::Zp(ZpValue::new(3, 7));
        let b = Field::Zp(ZpValue::new(5, 7));
        a.add_assign(&b).unwrap();
        assert_eq!(a, Field::Zp(ZpValue::new(1, 7)));

        let three = ZpValue::new(3, 7);
        assert_eq!(three.try_invert(), Some(5));

        let mut six = Field::Zp(ZpValue::new(6, 7));
        let six2 = Field::Zp(ZpValue::new(6, 7));
        six.mul_assign(&six2).unwrap();
        assert_eq!(six, Field::Zp(ZpValue::new(1, 7)));
    }

    #[test]
    fn zp_inversion_of_zero_is_arithmetic_domain_error() {
        let mut zero = Field::Zp(ZpValue::new(0, 7));
        assert!(matches!(
            zero.try_invert(),
            Err(PolyjamError::ArithmeticDomain { .. })
        ));
    }

    #[test]
    fn sym_expansion_matches_spec_examples() {
        let a = SymValue::symbol("a");
        let b = SymValue::symbol("b");

        // (a + b) * (a - b) = a^2 - b^2
        let sum = a.add(&b);
        let diff = a.sub(&b);
        let product = sum.mul(&diff);

        let mut expected = BTreeMap::new();
        let mut a2 = SymProduct::new();
        a2.insert("a".to_string(), 2);
        expected.insert(a2, 1);
        let mut b2 = SymProduct::new();
        b2.insert("b".to_string(), 2);
        expected.insert(b2, -1);
        assert_eq!(product, SymValue(expected));

        // (a + b)^2 = a^2 + 2ab + b^2
        let squared = sum.mul(&sum);
        let mut exp2 = BTreeMap::new();
        let mut a2b = SymProduct::new();
        a2b.insert("a".to_string(), 2);
        exp2.insert(a2b, 1);
        let mut ab = SymProduct::new();
        ab.insert("a".to_string(), 1);
        ab.insert("b".to_string(), 1);
        exp2.insert(ab, 2);
        let mut b2b = SymProduct::new();
        b2b.insert("b".to_string(), 2);
        exp2.insert(b2b, 1);
        assert_eq!(squared, SymValue(exp2));
    }

    #[test]
    fn sym_normalisation_drops_zero_factors() {
        let a = SymValue::symbol("a");
        let neg_a = a.negate();
        let result = a.add(&neg_a);
        assert!(result.is_zero());
    }

    #[test]
    fn type_mismatch_is_reported() {
        let q = Field::q_from_ratio(1, 2).unwrap();
        let zp = Field::Zp(ZpValue::new(1, 7));
        let mut q2 = q.clone();
        assert!(matches!(
            q2.add_assign(&zp),
            Err(PolyjamError::TypeMismatch { .. })
        ));
    }
}
