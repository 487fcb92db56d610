//! Polynomial matrix
//!
//! A dense, row-major matrix of polynomials of uniform type, with an
//! optional degree cap: when set, every arithmetic result is immediately
//! truncated by dropping terms whose total degree exceeds the cap, and the
//! cap propagates as the minimum across operands. Covers the handful of
//! geometric-vision operators (dot, cross, skew-symmetric, quaternion
//! product/conjugate) the driver that builds example problems needs, on top
//! of the standard linear-algebra operations.

use crate::error::{PolyjamError, Result};
use crate::polynomial::Polynomial;

/// A dense matrix of polynomials, stored row-major.
#[derive(Debug, Clone)]
pub struct PolyMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Polynomial>,
    degree_cap: Option<u32>,
}

impl PolyMatrix {
    /// Builds a matrix from row-major data, all cells sharing one type.
    pub fn new(rows: usize, cols: usize, data: Vec<Polynomial>) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        PolyMatrix {
            rows,
            cols,
            data,
            degree_cap: None,
        }
    }

    pub fn filled(rows: usize, cols: usize, zero: &Polynomial) -> Self {
        PolyMatrix::new(rows, cols, vec![zero.clone(); rows * cols])
    }

    pub fn with_degree_cap(mut self, cap: u32) -> Self {
        self.degree_cap = Some(cap);
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn degree_cap(&self) -> Option<u32> {
        self.degree_cap
    }

    fn linear(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&Polynomial> {
        if row >= self.rows || col >= self.cols {
            return Err(PolyjamError::Bounds {
                operation: "PolyMatrix::get",
                index: row * self.cols + col,
                len: self.rows * self.cols,
            });
        }
        Ok(&self.data[self.linear(row, col)])
    }

    pub fn get_linear(&self, index: usize) -> Result<&Polynomial> {
        if index >= self.data.len() {
            return Err(PolyjamError::Bounds {
                operation: "PolyMatrix::get_linear",
                index,
                len: self.data.len(),
            });
        }
        Ok(&self.data[index])
    }

    fn check_shape(&self, other: &PolyMatrix, operation: &'static str) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(PolyjamError::ShapeMismatch {
                operation,
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }
        Ok(())
    }

    fn tighter_cap(&self, other: &PolyMatrix) -> Option<u32> {
        match (self.degree_cap, other.degree_cap) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    fn truncated(mut poly: Polynomial, cap: Option<u32>) -> Polynomial {
        if let Some(cap) = cap {
            poly.truncate_degree(cap);
        }
        poly
    }

    pub fn negate(&self) -> PolyMatrix {
        PolyMatrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|p| p.negate()).collect(),
            degree_cap: self.degree_cap,
        }
    }

    pub fn transpose(&self) -> PolyMatrix {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.data[self.linear(row, col)].clone());
            }
        }
        PolyMatrix {
            rows: self.cols,
            cols: self.rows,
            data,
            degree_cap: self.degree_cap,
        }
    }

    pub fn add(&self, other: &PolyMatrix) -> Result<PolyMatrix> {
        self.check_shape(other, "PolyMatrix::add")?;
        let cap = self.tighter_cap(other);
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| Ok(Self::truncated(a.add(b)?, cap)))
            .collect::<Result<_>>()?;
        Ok(PolyMatrix {
            rows: self.rows,
            cols: self.cols,
            data,
            degree_cap: cap,
        })
    }

    pub fn sub(&self, other: &PolyMatrix) -> Result<PolyMatrix> {
        self.check_shape(other, "PolyMatrix::sub")?;
        let cap = self.tighter_cap(other);
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| Ok(Self::truncated(a.sub(b)?, cap)))
            .collect::<Result<_>>()?;
        Ok(PolyMatrix {
            rows: self.rows,
            cols: self.cols,
            data,
            degree_cap: cap,
        })
    }

    pub fn mul(&self, other: &PolyMatrix) -> Result<PolyMatrix> {
        if self.cols != other.rows {
            return Err(PolyjamError::ShapeMismatch {
                operation: "PolyMatrix::mul",
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }
        let cap = self.tighter_cap(other);
        let zero_ty = self.data[0].ty().clone();
        let mut data = Vec::with_capacity(self.rows * other.cols);
        for row in 0..self.rows {
            for col in 0..other.cols {
                let mut acc = Polynomial::zero(zero_ty.clone());
                for k in 0..self.cols {
                    let term = self.data[self.linear(row, k)].mul(&other.data[other.linear(k, col)])?;
                    acc = Self::truncated(acc.add(&term)?, cap);
                }
                data.push(acc);
            }
        }
        Ok(PolyMatrix {
            rows: self.rows,
            cols: other.cols,
            data,
            degree_cap: cap,
        })
    }

    pub fn mul_scalar(&self, scalar: &Polynomial) -> Result<PolyMatrix> {
        let data = self
            .data
            .iter()
            .map(|p| Ok(Self::truncated(p.mul(scalar)?, self.degree_cap)))
            .collect::<Result<_>>()?;
        Ok(PolyMatrix {
            rows: self.rows,
            cols: self.cols,
            data,
            degree_cap: self.degree_cap,
        })
    }

    fn require_column_vector(&self, operation: &'static str) -> Result<()> {
        if self.cols != 1 {
            return Err(PolyjamError::ShapeMismatch {
                operation,
                lhs: (self.rows, self.cols),
                rhs: (self.rows, 1),
            });
        }
        Ok(())
    }

    /// Dot product of two column vectors of equal height.
    pub fn dot(&self, other: &PolyMatrix) -> Result<Polynomial> {
        self.require_column_vector("PolyMatrix::dot")?;
        other.require_column_vector("PolyMatrix::dot")?;
        if self.rows != other.rows {
            return Err(PolyjamError::ShapeMismatch {
                operation: "PolyMatrix::dot",
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }
        let cap = self.tighter_cap(other);
        let mut acc = Polynomial::zero(self.data[0].ty().clone());
        for row in 0..self.rows {
            let term = self.data[row].mul(&other.data[row])?;
            acc = acc.add(&term)?;
        }
        Ok(Self::truncated(acc, cap))
    }

    /// Cross product of two height-3 column vectors.
    pub fn cross(&self, other: &PolyMatrix) -> Result<PolyMatrix> {
        if self.cols != 1 || other.cols != 1 || self.rows != 3 || other.rows != 3 {
            return Err(PolyjamError::ShapeMismatch {
                operation: "PolyMatrix::cross",
                lhs: (self.rows, self.cols),
                rhs: (other.rows, other.cols),
            });
        }
        let cap = self.tighter_cap(other);
        let a = |i: usize| &self.data[i];
        let b = |i: usize| &other.data[i];
        let r0 = a(1).mul(b(2))?.sub(&a(2).mul(b(1))?)?;
        let r1 = a(2).mul(b(0))?.sub(&a(0).mul(b(2))?)?;
        let r2 = a(0).mul(b(1))?.sub(&a(1).mul(b(0))?)?;
        Ok(PolyMatrix {
            rows: 3,
            cols: 1,
            data: vec![
                Self::truncated(r0, cap),
                Self::truncated(r1, cap),
                Self::truncated(r2, cap),
            ],
            degree_cap: cap,
        })
    }

    fn require_square(&self, operation: &'static str) -> Result<()> {
        if self.rows != self.cols {
            return Err(PolyjamError::ShapeMismatch {
                operation,
                lhs: (self.rows, self.cols),
                rhs: (self.cols, self.cols),
            });
        }
        Ok(())
    }

    fn at(&self, row: usize, col: usize) -> &Polynomial {
        &self.data[self.linear(row, col)]
    }

    /// Determinant: closed forms for 1x1/2x2/3x3, cofactor expansion along
    /// the first column otherwise.
    pub fn determinant(&self) -> Result<Polynomial> {
        self.require_square("PolyMatrix::determinant")?;
        let cap = self.degree_cap;
        match self.rows {
            1 => Ok(self.at(0, 0).clone()),
            2 => {
                let t1 = self.at(0, 0).mul(self.at(1, 1))?;
                let b1 = self.at(1, 0).mul(self.at(0, 1))?;
                Ok(Self::truncated(t1.sub(&b1)?, cap))
            }
            3 => {
                let t1 = Self::truncated(self.at(0, 0).mul(self.at(1, 1))?, cap).mul(self.at(2, 2))?;
                let t2 = Self::truncated(self.at(0, 1).mul(self.at(1, 2))?, cap).mul(self.at(2, 0))?;
                let t3 = Self::truncated(self.at(0, 2).mul(self.at(1, 0))?, cap).mul(self.at(2, 1))?;
                let b1 = Self::truncated(self.at(2, 0).mul(self.at(1, 1))?, cap).mul(self.at(0, 2))?;
                let b2 = Self::truncated(self.at(2, 1).mul(self.at(1, 2))?, cap).mul(self.at(0, 0))?;
                let b3 = Self::truncated(self.at(2, 2).mul(self.at(1, 0))?, cap).mul(self.at(0, 1))?;

                let mut result = Self::truncated(t1, cap);
                result = Self::truncated(result.add(&Self::truncated(t2, cap))?, cap);
                result = Self::truncated(result.add(&Self::truncated(t3, cap))?, cap);
                result = Self::truncated(result.sub(&Self::truncated(b1, cap))?, cap);
                result = Self::truncated(result.sub(&Self::truncated(b2, cap))?, cap);
                result = Self::truncated(result.sub(&Self::truncated(b3, cap))?, cap);
                Ok(result)
            }
            _ => self.determinant_cofactor(),
        }
    }

    /// Expands along the first column, alternating sign per row.
    fn determinant_cofactor(&self) -> Result<Polynomial> {
        let cap = self.degree_cap;
        let mut sub_rows: Vec<usize> = (1..self.rows).collect();
        let sub_cols: Vec<usize> = (1..self.cols).collect();
        let mut positive = true;
        let mut terms = Vec::with_capacity(self.rows);

        for i in 0..self.rows {
            let mut sub_data = Vec::with_capacity(sub_rows.len() * sub_cols.len());
            for &r in &sub_rows {
                for &c in &sub_cols {
                    sub_data.push(self.at(r, c).clone());
                }
            }
            let mut sub = PolyMatrix::new(sub_rows.len(), sub_cols.len(), sub_data);
            sub.degree_cap = cap;
            let mut minor = sub.determinant()?;
            if !positive {
                minor = minor.negate();
            }
            let term = Self::truncated(self.at(i, 0).mul(&minor)?, cap);
            terms.push(term);

            if i != self.rows - 1 {
                sub_rows[i] -= 1;
                positive = !positive;
            }
        }

        let mut result = terms[0].clone();
        for term in &terms[1..] {
            result = Self::truncated(result.add(term)?, cap);
        }
        Ok(result)
    }

    pub fn trace(&self) -> Result<Polynomial> {
        self.require_square("PolyMatrix::trace")?;
        let mut result = self.at(0, 0).clone();
        for i in 1..self.rows {
            result = result.add(self.at(i, i))?;
        }
        Ok(Self::truncated(result, self.degree_cap))
    }

    /// The 3x3 skew-symmetric "cross-product matrix" of a height-3 column
    /// vector `v`, such that `skew(v) * w == cross(v, w)`.
    pub fn skew_symmetric(&self) -> Result<PolyMatrix> {
        self.require_column_vector("PolyMatrix::skew_symmetric")?;
        if self.rows != 3 {
            return Err(PolyjamError::ShapeMismatch {
                operation: "PolyMatrix::skew_symmetric",
                lhs: (self.rows, self.cols),
                rhs: (3, 1),
            });
        }
        let zero = Polynomial::zero(self.data[0].ty().clone());
        let v0 = &self.data[0];
        let v1 = &self.data[1];
        let v2 = &self.data[2];
        let data = vec![
            zero.clone(),
            v2.negate(),
            v1.clone(),
            v2.clone(),
            zero.clone(),
            v0.negate(),
            v1.negate(),
            v0.clone(),
            zero,
        ];
        Ok(PolyMatrix {
            rows: 3,
            cols: 3,
            data,
            degree_cap: self.degree_cap,
        })
    }

    fn require_quaternion(&self, operation: &'static str) -> Result<()> {
        if self.cols != 1 || self.rows != 4 {
            return Err(PolyjamError::ShapeMismatch {
                operation,
                lhs: (self.rows, self.cols),
                rhs: (4, 1),
            });
        }
        Ok(())
    }

    /// Hamilton product of two quaternions stored as 4x1 column vectors
    /// `[w, x, y, z]`.
    pub fn quaternion_mul(&self, other: &PolyMatrix) -> Result<PolyMatrix> {
        self.require_quaternion("PolyMatrix::quaternion_mul")?;
        other.require_quaternion("PolyMatrix::quaternion_mul")?;
        let cap = self.tighter_cap(other);
        let a = |i: usize| &self.data[i];
        let b = |i: usize| &other.data[i];

        let w = a(0).mul(b(0))?.sub(&a(1).mul(b(1))?)?.sub(&a(2).mul(b(2))?)?.sub(&a(3).mul(b(3))?)?;
        let x = a(1).mul(b(0))?.add(&a(0).mul(b(1))?)?.add(&a(2).mul(b(3))?)?.sub(&a(3).mul(b(2))?)?;
        let y = a(2).mul(b(0))?.add(&a(0).mul(b(2))?)?.sub(&a(1).mul(b(3))?)?.add(&a(3).mul(b(1))?)?;
        let z = a(3).mul(b(0))?.add(&a(0).mul(b(3))?)?.add(&a(1).mul(b(2))?)?.sub(&a(2).mul(b(1))?)?;

        Ok(PolyMatrix {
            rows: 4,
            cols: 1,
            data: vec![
                Self::truncated(w, cap),
                Self::truncated(x, cap),
                Self::truncated(y, cap),
                Self::truncated(z, cap),
            ],
            degree_cap: cap,
        })
    }

    /// Conjugate of a quaternion `[w, x, y, z]`: `[w, -x, -y, -z]`.
    pub fn quaternion_conjugate(&self) -> Result<PolyMatrix> {
        self.require_quaternion("PolyMatrix::quaternion_conjugate")?;
        let data = vec![
            self.data[0].clone(),
            self.data[1].negate(),
            self.data[2].negate(),
            self.data[3].negate(),
        ];
        Ok(PolyMatrix {
            rows: 4,
            cols: 1,
            data,
            degree_cap: self.degree_cap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficient::Coefficient;
    use crate::field::FieldKind;
    use crate::monomial::{Monomial, MonomialOrder};
    use crate::polynomial::PolyType;
    use crate::term::Term;

    fn ty() -> PolyType {
        PolyType {
            arity: 1,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![FieldKind::Q],
        }
    }

    fn constant(value: i64) -> Polynomial {
        let t = ty();
        let mut p = Polynomial::zero(t.clone());
        p.insert(Term::single(
            Monomial::identity(1, t.order),
            Coefficient::from_int(value, FieldKind::Q).unwrap(),
        ))
        .unwrap();
        p
    }

    fn col(values: [i64; 3]) -> PolyMatrix {
        PolyMatrix::new(3, 1, values.iter().map(|&v| constant(v)).collect())
    }

    fn as_scalar(p: &Polynomial) -> i64 {
        let coeff = p.leading_coefficient();
        if let crate::field::Field::Q(r) = coeff.field() {
            r.to_integer().try_into().unwrap()
        } else {
            panic!("expected Q")
        }
    }

    #[test]
    fn determinant_2x2_matches_closed_form() {
        let data = vec![constant(1), constant(2), constant(3), constant(4)];
        let m = PolyMatrix::new(2, 2, data);
        assert_eq!(as_scalar(&m.determinant().unwrap()), 1 * 4 - 2 * 3);
    }

    #[test]
    fn determinant_3x3_matches_cofactor_expansion() {
        // identity matrix -> det 1
        let zero = constant(0);
        let one = constant(1);
        let data = vec![
            one.clone(), zero.clone(), zero.clone(),
            zero.clone(), one.clone(), zero.clone(),
            zero.clone(), zero.clone(), one.clone(),
        ];
        let m = PolyMatrix::new(3, 3, data);
        assert_eq!(as_scalar(&m.determinant().unwrap()), 1);
    }

    #[test]
    fn cross_product_of_standard_basis_vectors() {
        let e1 = col([1, 0, 0]);
        let e2 = col([0, 1, 0]);
        let result = e1.cross(&e2).unwrap();
        assert_eq!(as_scalar(result.get(0, 0).unwrap()), 0);
        assert_eq!(as_scalar(result.get(1, 0).unwrap()), 0);
        assert_eq!(as_scalar(result.get(2, 0).unwrap()), 1);
    }

    #[test]
    fn skew_symmetric_times_vector_matches_cross_product() {
        let v = col([1, 2, 3]);
        let w = col([4, 5, 6]);
        let skew = v.skew_symmetric().unwrap();
        let via_skew = skew.mul(&w).unwrap();
        let direct = v.cross(&w).unwrap();
        for i in 0..3 {
            assert_eq!(
                as_scalar(via_skew.get(i, 0).unwrap()),
                as_scalar(direct.get(i, 0).unwrap())
            );
        }
    }

    #[test]
    fn quaternion_identity_is_neutral_under_multiplication() {
        let identity = PolyMatrix::new(
            4,
            1,
            vec![constant(1), constant(0), constant(0), constant(0)],
        );
        let q = PolyMatrix::new(
            4,
            1,
            vec![constant(2), constant(3), constant(5), constant(7)],
        );
        let product = identity.quaternion_mul(&q).unwrap();
        for i in 0..4 {
            assert_eq!(
                as_scalar(product.get_linear(i).unwrap()),
                as_scalar(q.get_linear(i).unwrap())
            );
        }
    }

    #[test]
    fn quaternion_conjugate_negates_vector_part_only() {
        let q = PolyMatrix::new(
            4,
            1,
            vec![constant(1), constant(2), constant(3), constant(4)],
        );
        let conj = q.quaternion_conjugate().unwrap();
        assert_eq!(as_scalar(conj.get_linear(0).unwrap()), 1);
        assert_eq!(as_scalar(conj.get_linear(1).unwrap()), -2);
        assert_eq!(as_scalar(conj.get_linear(2).unwrap()), -3);
        assert_eq!(as_scalar(conj.get_linear(3).unwrap()), -4);
    }

    #[test]
    fn transpose_swaps_dimensions() {
        let data = vec![constant(1), constant(2), constant(3), constant(4), constant(5), constant(6)];
        let m = PolyMatrix::new(2, 3, data);
        let t = m.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(as_scalar(t.get(2, 1).unwrap()), as_scalar(m.get(1, 2).unwrap()));
    }

    #[test]
    fn shape_mismatch_on_incompatible_multiply() {
        let a = PolyMatrix::new(2, 3, vec![constant(0); 6]);
        let b = PolyMatrix::new(2, 2, vec![constant(0); 4]);
        assert!(matches!(a.mul(&b), Err(PolyjamError::ShapeMismatch { .. })));
    }

    #[test]
    fn degree_cap_propagates_as_tighter_of_the_two_operands() {
        let a = PolyMatrix::new(1, 1, vec![constant(1)]).with_degree_cap(2);
        let b = PolyMatrix::new(1, 1, vec![constant(1)]).with_degree_cap(5);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.degree_cap(), Some(2));
    }
}
