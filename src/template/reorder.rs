//! Column reordering (stage 4 of template generation).
//!
//! Orders the remaining columns so the minimised matrix reads as close to
//! row-echelon form as possible: scanning columns left to right, each column
//! is assigned to the leftmost not-yet-assigned row whose pivot falls there.
//! The same scan fixes a parallel row order, so that after both permutations
//! are applied, row `r`'s pivot sits at column `r` whenever a pivot exists —
//! the alignment the code emitter relies on to read a row index directly out
//! of the reordered monomial list. Non-pivot rows/columns keep their
//! original relative order, appended at the end.

use crate::coeff_matrix::CoeffMatrix;
use crate::coefficient::Coefficient;

fn leading_index(row: &[Coefficient]) -> Option<usize> {
    row.iter().position(|c| !c.is_zero())
}

/// A paired row/column permutation: `rows[k]`/`columns[k]` are the original
/// row/column indices that should occupy position `k`.
pub struct Reordering {
    pub rows: Vec<usize>,
    pub columns: Vec<usize>,
}

pub fn reorder(matrix: &CoeffMatrix) -> Reordering {
    let mut assigned_rows = vec![false; matrix.rows()];
    let mut rows = Vec::with_capacity(matrix.rows());
    let mut columns = Vec::with_capacity(matrix.cols());

    for col in 0..matrix.cols() {
        if let Some(row) = (0..matrix.rows())
            .find(|&r| !assigned_rows[r] && leading_index(matrix.row(r)) == Some(col))
        {
            assigned_rows[row] = true;
            rows.push(row);
            columns.push(col);
        }
    }
    for r in 0..matrix.rows() {
        if !assigned_rows[r] {
            rows.push(r);
        }
    }
    for col in 0..matrix.cols() {
        if !columns.contains(&col) {
            columns.push(col);
        }
    }
    Reordering { rows, columns }
}
