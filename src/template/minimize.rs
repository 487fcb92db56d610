//! Row minimisation (stage 3 of template generation).
//!
//! An exponential probe/backoff row-dropping search: try to drop `k`
//! consecutive rows, doubling `k` on success, halving down to 1 on failure
//! before advancing past the current position. A round repeats while the
//! previous round removed at least one row.

use crate::coeff_matrix::CoeffMatrix;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::monomial::Monomial;

/// Returns the subset of row indices (into `big_matrix`) that survive
/// minimisation: the smallest set found by the probe/backoff search whose
/// reduced sub-matrix still satisfies `good_row_predicate`.
pub fn minimize_rows(
    big_matrix: &CoeffMatrix,
    schedule: &[(usize, Monomial)],
    good_row_predicate: impl Fn(&CoeffMatrix) -> bool,
    cfg: &GeneratorConfig,
) -> Result<Vec<usize>> {
    debug_assert_eq!(schedule.len(), big_matrix.rows());

    let mut active: Vec<usize> = (0..big_matrix.rows()).collect();

    loop {
        let mut removed_this_round = false;
        let mut pos = 0usize;
        let mut k = 1usize;

        while pos < active.len() {
            let end = (pos + k).min(active.len());
            let mut candidate = active.clone();
            candidate.drain(pos..end);

            let mut sub = big_matrix.sub_matrix(&candidate);
            sub.reduce(cfg)?;

            if good_row_predicate(&sub) {
                active = candidate;
                removed_this_round = true;
                k *= 2;
            } else if k > 1 {
                k = (k / 2).max(1);
            } else {
                pos += 1;
            }
        }

        if !removed_this_round {
            break;
        }
    }

    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficient::Coefficient;
    use crate::field::FieldKind;
    use crate::monomial::MonomialOrder;
    use crate::polynomial::{PolyType, Polynomial};
    use crate::term::Term;

    fn ty() -> PolyType {
        PolyType {
            arity: 1,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![FieldKind::Q],
        }
    }

    fn poly(exp: u32, value: i64) -> Polynomial {
        let t = ty();
        let mut p = Polynomial::zero(t.clone());
        p.insert(Term::single(
            Monomial::from_exponents(vec![exp], t.order),
            Coefficient::from_int(value, FieldKind::Q).unwrap(),
        ))
        .unwrap();
        p
    }

    #[test]
    fn duplicate_rows_are_dropped_down_to_one() {
        let polys = vec![poly(1, 1), poly(1, 1), poly(1, 1)];
        let matrix = CoeffMatrix::from_polynomials(&polys).unwrap();
        let schedule: Vec<(usize, Monomial)> = (0..3)
            .map(|i| (i, Monomial::identity(1, MonomialOrder::Grevlex)))
            .collect();
        let cfg = GeneratorConfig::default();

        let kept = minimize_rows(&matrix, &schedule, |m| m.rows() >= 1, &cfg).unwrap();
        assert_eq!(kept.len(), 1);
    }
}
