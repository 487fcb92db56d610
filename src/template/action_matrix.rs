//! Action-matrix assembly (stage 5 of template generation).
//!
//! One row per quotient-basis element `B[i]`: if `B[i] * multiplier` is
//! itself some `B[j]`, the row is the unit vector `e_j`; otherwise it is the
//! negation of the |B| trailing (basis-column) entries of the matrix row
//! whose leading monomial equals `B[i] * multiplier`. Eigen-decomposition of
//! this matrix (performed by the emitted code, not here) yields the roots.

use crate::coeff_matrix::CoeffMatrix;
use crate::coefficient::Coefficient;
use crate::error::{PolyjamError, Result};
use crate::field::FieldKind;
use crate::monomial::Monomial;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ActionMatrix {
    pub rows: Vec<Vec<Coefficient>>,
    pub size: usize,
}

fn leading_index(row: &[Coefficient]) -> Option<usize> {
    row.iter().position(|c| !c.is_zero())
}

pub fn build_action_matrix(
    basis: &[Monomial],
    multiplier: &Monomial,
    matrix: &CoeffMatrix,
) -> Result<ActionMatrix> {
    let size = basis.len();
    let sample = matrix.row(0).first().cloned();
    let kind = sample.as_ref().map(|c| c.kind()).unwrap_or(FieldKind::Q);
    // Derive the unit row's 0/1 entries from a real matrix cell
    // (`zero_like`/`one_like`) rather than `Coefficient::zero/one(kind)`, so
    // a `Zp` action matrix keeps the template's actual characteristic
    // instead of silently reverting to the default one.
    let zero_entry = || {
        sample
            .as_ref()
            .map(|c| c.zero_like())
            .unwrap_or_else(|| Coefficient::zero(kind))
    };
    let one_entry = || {
        sample
            .as_ref()
            .map(|c| c.one_like())
            .unwrap_or_else(|| Coefficient::one(kind))
    };

    let mut rows = Vec::with_capacity(size);
    for b in basis {
        let product = b.multiply(multiplier)?;

        if let Some(j) = basis.iter().position(|x| x == &product) {
            let mut unit = vec![zero_entry(); size];
            unit[j] = one_entry();
            rows.push(unit);
            continue;
        }

        let row_idx = (0..matrix.rows())
            .find(|&r| {
                leading_index(matrix.row(r))
                    .map(|lead| matrix.columns()[lead] == product)
                    .unwrap_or(false)
            })
            .ok_or_else(|| PolyjamError::MalformedInput {
                reason: format!(
                    "no template row realises required leading monomial {product}"
                ),
            })?;

        let mut out = Vec::with_capacity(size);
        for basis_elem in basis {
            let col_idx = matrix
                .columns()
                .iter()
                .position(|m| m == basis_elem)
                .ok_or_else(|| PolyjamError::MalformedInput {
                    reason: format!("quotient basis element {basis_elem} missing from template columns"),
                })?;
            let mut entry = matrix.row(row_idx)[col_idx].clone();
            entry.negate();
            out.push(entry);
        }
        rows.push(out);
    }

    Ok(ActionMatrix { rows, size })
}
