//! Gauss-Jordan Engine
//!
//! A row-reduction routine generic over the `Coefficient` abstraction (which
//! already dispatches add/sub/mul/div/equality-to-zero per field kind). Rows
//! that go all-zero during forward elimination are removed immediately so
//! they cannot pollute back substitution.

use crate::coefficient::Coefficient;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::field::FieldKind;

fn is_effectively_zero(value: &Coefficient, cfg: &GeneratorConfig) -> bool {
    match value.kind() {
        FieldKind::R => {
            if let crate::field::Field::R(v) = value.field() {
                v.abs() < cfg.epsilon
            } else {
                unreachable!()
            }
        }
        _ => value.is_zero(),
    }
}

/// Selects the pivot row within `rows[front_row..]` at `column`: the first
/// non-zero entry for exact kinds, the row with the largest absolute value
/// for floating R (for numerical stability).
fn select_pivot(
    rows: &[Vec<Coefficient>],
    front_row: usize,
    column: usize,
    cfg: &GeneratorConfig,
) -> Option<usize> {
    if rows.is_empty() {
        return None;
    }
    match rows[0][column].kind() {
        FieldKind::R => {
            let mut best: Option<(usize, f64)> = None;
            for (offset, row) in rows[front_row..].iter().enumerate() {
                if let crate::field::Field::R(v) = row[column].field() {
                    let abs = v.abs();
                    if abs >= cfg.epsilon && best.map(|(_, b)| abs > b).unwrap_or(true) {
                        best = Some((front_row + offset, abs));
                    }
                }
            }
            best.map(|(idx, _)| idx)
        }
        _ => (front_row..rows.len()).find(|&r| !is_effectively_zero(&rows[r][column], cfg)),
    }
}

/// Reduces `rows` to reduced row-echelon form with unit pivots, in place.
/// Idempotent: reducing an already-reduced matrix is a no-op.
pub fn reduce(rows: &mut Vec<Vec<Coefficient>>, cfg: &GeneratorConfig) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let num_cols = rows[0].len();

    // Forward elimination.
    let mut front_row = 0;
    let mut current_column = 0;
    let mut pivot_columns = Vec::new();

    while front_row < rows.len() && current_column < num_cols {
        match select_pivot(rows, front_row, current_column, cfg) {
            None => {
                current_column += 1;
                continue;
            }
            Some(pivot_row) => {
                rows.swap(front_row, pivot_row);

                let pivot = rows[front_row][current_column].clone();
                let mut pivot_inv = pivot;
                pivot_inv.try_invert()?;
                for cell in rows[front_row].iter_mut() {
                    cell.mul_assign(&pivot_inv)?;
                }

                for r in (front_row + 1)..rows.len() {
                    if is_effectively_zero(&rows[r][current_column], cfg) {
                        continue;
                    }
                    let factor = rows[r][current_column].clone();
                    let scaled: Vec<Coefficient> = rows[front_row]
                        .iter()
                        .map(|c| {
                            let mut c = c.clone();
                            c.mul_assign(&factor)?;
                            Ok(c)
                        })
                        .collect::<Result<_>>()?;
                    for (cell, sub) in rows[r].iter_mut().zip(scaled) {
                        cell.sub_assign(&sub)?;
                    }
                }

                pivot_columns.push((front_row, current_column));
                front_row += 1;
                current_column += 1;
            }
        }

        // Drop rows that went all-zero so they cannot pollute back
        // substitution.
        rows.retain(|row| row.iter().any(|c| !is_effectively_zero(c, cfg)));
    }

    // Back substitution: from the last pivot row upward.
    for &(row, col) in pivot_columns.iter().rev() {
        if row >= rows.len() {
            continue;
        }
        for r in 0..row {
            if is_effectively_zero(&rows[r][col], cfg) {
                continue;
            }
            let factor = rows[r][col].clone();
            let scaled: Vec<Coefficient> = rows[row]
                .iter()
                .map(|c| {
                    let mut c = c.clone();
                    c.mul_assign(&factor)?;
                    Ok(c)
                })
                .collect::<Result<_>>()?;
            for (cell, sub) in rows[r].iter_mut().zip(scaled) {
                cell.sub_assign(&sub)?;
            }
        }
    }

    Ok(())
}
