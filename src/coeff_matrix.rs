//! Coefficient Matrix
//!
//! A list of rows, each a list of coefficients, keyed by a shared list of
//! column monomials. Columns are fixed at construction; rows may be added,
//! permuted, or deleted.

use crate::coefficient::Coefficient;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::field::FieldKind;
use crate::gauss_jordan;
use crate::monomial::Monomial;
use crate::polynomial::{PolyType, Polynomial};
use crate::term::Term;
use std::collections::BTreeSet;
use std::rc::Rc;

/// A dense coefficient matrix sharing a column-monomial index.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CoeffMatrix {
    rows: Vec<Vec<Coefficient>>,
    columns: Rc<[Monomial]>,
    kind: FieldKind,
}

impl CoeffMatrix {
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Monomial] {
        &self.columns
    }

    /// Builds the column set as the descending-sorted union of monomials
    /// appearing across `polys`, then fills each row by a monotonic sweep
    /// with a binary-searched column iterator (O(t log n) per polynomial).
    pub fn from_polynomials(polys: &[Polynomial]) -> Result<Self> {
        let order = polys
            .first()
            .map(|p| p.order())
            .unwrap_or(crate::monomial::MonomialOrder::Grevlex);
        let mut union: BTreeSet<Monomial> = BTreeSet::new();
        for poly in polys {
            for term in poly.terms_descending() {
                union.insert(term.monomial.clone());
            }
        }
        let mut columns: Vec<Monomial> = union.into_iter().collect();
        columns.sort_by(|a, b| b.compare(a, order));
        Self::from_polynomials_with_columns(polys, columns)
    }

    /// Fills only the provided columns; monomials outside the list are
    /// silently ignored.
    pub fn from_polynomials_with_columns(polys: &[Polynomial], columns: Vec<Monomial>) -> Result<Self> {
        let kind = polys
            .first()
            .map(|p| p.ty().carrier_kinds[0])
            .unwrap_or(FieldKind::Q);
        let columns: Rc<[Monomial]> = Rc::from(columns.into_boxed_slice());

        let mut rows = Vec::with_capacity(polys.len());
        for poly in polys {
            rows.push(Self::fill_row(poly, &columns)?);
        }
        Ok(CoeffMatrix { rows, columns, kind })
    }

    /// One row per `(polynomial_index, expander)` pair; each row equals
    /// `polynomial × expander`.
    pub fn from_expansion_schedule(
        polys: &[Polynomial],
        schedule: &[(usize, Monomial)],
    ) -> Result<Self> {
        let expanded: Vec<Polynomial> = schedule
            .iter()
            .map(|(idx, expander)| polys[*idx].mul_monomial(expander))
            .collect::<Result<_>>()?;
        Self::from_polynomials(&expanded)
    }

    /// Fills a row against `columns`, leaving untouched cells as `None`, then
    /// backfills them with a zero derived from a real coefficient already
    /// placed in this row (`Coefficient::zero_like`) rather than a fresh
    /// `Coefficient::zero(kind)` — for `Zp` the latter always assumes the
    /// default characteristic, which would desynchronise from the row's
    /// actual characteristic under a non-default `GeneratorConfig` and make
    /// Gauss-Jordan's in-row `mul_assign`/`sub_assign` fail with
    /// `TypeMismatch`. A row with no terms at all (an identically-zero
    /// polynomial) falls back to the kind-only zero, since there is no
    /// characteristic to recover in that case.
    fn fill_row(poly: &Polynomial, columns: &[Monomial]) -> Result<Vec<Coefficient>> {
        let kind = poly.ty().carrier_kinds[0];
        let mut row: Vec<Option<Coefficient>> = vec![None; columns.len()];
        for term in poly.terms_descending() {
            if let Ok(idx) = columns.binary_search_by(|probe| probe.compare(&term.monomial, columns[0].order).reverse()) {
                row[idx] = Some(term.dominant().clone());
            }
        }
        let filler = row
            .iter()
            .flatten()
            .next()
            .map(|c| c.zero_like())
            .unwrap_or_else(|| Coefficient::zero(kind));
        Ok(row.into_iter().map(|cell| cell.unwrap_or_else(|| filler.clone())).collect())
    }

    pub fn reduce(&mut self, cfg: &GeneratorConfig) -> Result<()> {
        gauss_jordan::reduce(&mut self.rows, cfg)
    }

    /// Deep-copies the named rows into a new matrix sharing the column set.
    pub fn sub_matrix(&self, row_indices: &[usize]) -> CoeffMatrix {
        CoeffMatrix {
            rows: row_indices.iter().map(|&i| self.rows[i].clone()).collect(),
            columns: Rc::clone(&self.columns),
            kind: self.kind,
        }
    }

    pub fn row(&self, index: usize) -> &[Coefficient] {
        &self.rows[index]
    }

    /// Permutes both rows (`row_order[k]` = original row index landing at
    /// position `k`) and columns (`column_order[k]` likewise) in one pass.
    pub fn permute(&self, row_order: &[usize], column_order: &[usize]) -> CoeffMatrix {
        let columns: Rc<[Monomial]> = Rc::from(
            column_order
                .iter()
                .map(|&c| self.columns[c].clone())
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        );
        let rows = row_order
            .iter()
            .map(|&r| column_order.iter().map(|&c| self.rows[r][c].clone()).collect())
            .collect();
        CoeffMatrix {
            rows,
            columns,
            kind: self.kind,
        }
    }

    /// Re-assembles a polynomial from a row.
    pub fn get_polynomial(&self, row: usize, order: crate::monomial::MonomialOrder) -> Result<Polynomial> {
        let arity = self.columns.first().map(|m| m.arity()).unwrap_or(0);
        let ty = PolyType {
            arity,
            order,
            carrier_kinds: vec![self.kind],
        };
        let mut poly = Polynomial::zero(ty);
        for (coeff, monomial) in self.rows[row].iter().zip(self.columns.iter()) {
            if !coeff.is_zero() {
                let mut m = monomial.clone();
                m.set_order(order);
                poly.insert(Term::single(m, coeff.clone()))?;
            }
        }
        Ok(poly)
    }

    /// Symbolic variant: places a fresh named `Sym` placeholder into each
    /// non-zero entry, so downstream Sym propagation proceeds without
    /// needing the numeric value.
    pub fn get_polynomial_symbolic(
        &self,
        row: usize,
        order: crate::monomial::MonomialOrder,
        mut name_fn: impl FnMut(usize, usize) -> String,
    ) -> Result<Polynomial> {
        let arity = self.columns.first().map(|m| m.arity()).unwrap_or(0);
        let ty = PolyType {
            arity,
            order,
            carrier_kinds: vec![FieldKind::Sym],
        };
        let mut poly = Polynomial::zero(ty);
        for (col, (coeff, monomial)) in self.rows[row].iter().zip(self.columns.iter()).enumerate() {
            if !coeff.is_zero() {
                let mut m = monomial.clone();
                m.set_order(order);
                let symbol = Coefficient::symbol(&name_fn(row, col));
                poly.insert(Term::single(m, symbol))?;
            }
        }
        Ok(poly)
    }

    pub fn contains_all(&self, needles: &[Polynomial]) -> Result<bool> {
        for needle in needles {
            let mut found = false;
            for row in 0..self.rows() {
                let candidate = self.get_polynomial(row, needle.order())?;
                if candidate.leading_monomial() == needle.leading_monomial() {
                    found = true;
                    break;
                }
            }
            if !found {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monomial::MonomialOrder;

    fn ty(arity: usize) -> PolyType {
        PolyType {
            arity,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![FieldKind::Q],
        }
    }

    fn term(exp: Vec<u32>, value: i64, order: MonomialOrder) -> Term {
        Term::single(
            Monomial::from_exponents(exp, order),
            Coefficient::from_int(value, FieldKind::Q).unwrap(),
        )
    }

    #[test]
    fn column_union_covers_every_term() {
        let t = ty(2);
        let mut p1 = Polynomial::zero(t.clone());
        p1.insert(term(vec![2, 0], 1, t.order)).unwrap();
        p1.insert(term(vec![0, 0], -1, t.order)).unwrap();

        let mut p2 = Polynomial::zero(t.clone());
        p2.insert(term(vec![1, 1], 1, t.order)).unwrap();

        let matrix = CoeffMatrix::from_polynomials(&[p1, p2]).unwrap();
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.cols(), 3);
    }

    #[test]
    fn sub_matrix_shares_columns() {
        let t = ty(1);
        let mut p = Polynomial::zero(t.clone());
        p.insert(term(vec![1], 1, t.order)).unwrap();
        let matrix = CoeffMatrix::from_polynomials(&[p.clone(), p]).unwrap();
        let sub = matrix.sub_matrix(&[0]);
        assert_eq!(sub.rows(), 1);
        assert_eq!(sub.cols(), matrix.cols());
    }

    #[test]
    fn fill_row_zero_filler_matches_a_non_default_characteristic() {
        let characteristic = 101;
        let zp_ty = PolyType {
            arity: 2,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![FieldKind::Zp],
        };
        let zp = |exp: Vec<u32>, value: i64| {
            Term::single(
                Monomial::from_exponents(exp, zp_ty.order),
                Coefficient::new(crate::field::Field::Zp(crate::field::ZpValue::new(
                    value,
                    characteristic,
                ))),
            )
        };

        let mut p1 = Polynomial::zero(zp_ty.clone());
        p1.insert(zp(vec![1, 0], 5)).unwrap();
        let mut p2 = Polynomial::zero(zp_ty.clone());
        p2.insert(zp(vec![0, 1], 7)).unwrap();

        let mut matrix = CoeffMatrix::from_polynomials(&[p1, p2]).unwrap();
        // Row 0's filler zero in column `x_2` must share row 0's actual
        // characteristic with row 1's real `x_2` entry, or reduction fails
        // with `TypeMismatch` the moment the pivot row gets normalised.
        matrix.reduce(&GeneratorConfig::default()).unwrap();
    }
}
