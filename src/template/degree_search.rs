//! Automatic degree search (stage 2 of template generation).
//!
//! Grows the expander degree until every required leading monomial is
//! realised by some row of the reduced, expanded template with all of its
//! trailing monomials inside the quotient basis.

use super::expanders::superlinear_expanders;
use crate::coeff_matrix::CoeffMatrix;
use crate::coefficient::Coefficient;
use crate::config::GeneratorConfig;
use crate::error::{PolyjamError, Result};
use crate::monomial::Monomial;
use crate::polynomial::Polynomial;

/// `{ b * multiplier : b in basis, b * multiplier not in basis }`.
pub(crate) fn required_leading_monomials(basis: &[Monomial], multiplier: &Monomial) -> Result<Vec<Monomial>> {
    let mut required = Vec::new();
    for b in basis {
        let product = b.multiply(multiplier)?;
        if !basis.contains(&product) {
            required.push(product);
        }
    }
    Ok(required)
}

fn leading_index(row: &[Coefficient]) -> Option<usize> {
    row.iter().position(|c| !c.is_zero())
}

/// True when every required leading monomial has a row in `matrix` whose
/// leading monomial matches and whose other non-zero columns lie in `basis`.
pub(crate) fn realises_every_required_monomial(
    matrix: &CoeffMatrix,
    required: &[Monomial],
    basis: &[Monomial],
) -> bool {
    for req in required {
        let mut found = false;
        for r in 0..matrix.rows() {
            let row = matrix.row(r);
            let Some(lead) = leading_index(row) else { continue };
            if matrix.columns()[lead] != *req {
                continue;
            }
            let trailing_ok = row
                .iter()
                .enumerate()
                .skip(lead + 1)
                .all(|(j, c)| c.is_zero() || basis.contains(&matrix.columns()[j]));
            if trailing_ok {
                found = true;
                break;
            }
        }
        if !found {
            return false;
        }
    }
    true
}

fn build_schedule(poly_count: usize, expanders: &[Monomial]) -> Vec<(usize, Monomial)> {
    let mut schedule = Vec::with_capacity(poly_count * expanders.len());
    for poly_idx in 0..poly_count {
        for expander in expanders {
            schedule.push((poly_idx, expander.clone()));
        }
    }
    schedule
}

/// Finds the smallest expansion degree (at most `cfg.max_degree`) for which
/// the expanded-and-reduced template realises every required leading
/// monomial. Returns [`PolyjamError::NotConverged`] past the cap.
pub fn find_expansion_degree(
    polys: &[Polynomial],
    base_expanders: &[Monomial],
    quotient_basis: &[Monomial],
    multiplier: &Monomial,
    cfg: &GeneratorConfig,
) -> Result<u32> {
    let required = required_leading_monomials(quotient_basis, multiplier)?;
    let identity = Monomial::identity(multiplier.arity(), multiplier.order);

    let step = if cfg.even_degrees_only { 2 } else { 1 };
    let mut degree = 2;
    while degree <= cfg.max_degree {
        let synthesized = superlinear_expanders(base_expanders, degree);
        let mut all_expanders = vec![identity.clone()];
        all_expanders.extend(base_expanders.iter().cloned());
        all_expanders.extend(synthesized);

        let schedule = build_schedule(polys.len(), &all_expanders);
        let mut matrix = CoeffMatrix::from_expansion_schedule(polys, &schedule)?;
        matrix.reduce(cfg)?;

        if realises_every_required_monomial(&matrix, &required, quotient_basis) {
            return Ok(degree);
        }
        degree += step;
    }
    Err(PolyjamError::NotConverged {
        max_degree: cfg.max_degree,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use crate::monomial::MonomialOrder;
    use crate::polynomial::PolyType;
    use crate::term::Term;

    fn q_poly(ty: &PolyType, terms: Vec<(Vec<u32>, i64)>) -> Polynomial {
        let mut p = Polynomial::zero(ty.clone());
        for (exp, v) in terms {
            let monomial = Monomial::from_exponents(exp, ty.order);
            let coeff = Coefficient::from_int(v, FieldKind::Q).unwrap();
            p.insert(Term::single(monomial, coeff)).unwrap();
        }
        p
    }

    #[test]
    fn degree_search_converges_on_a_trivial_univariate_system() {
        // f = x^2 - 1, basis B = {1, x}, multiplier = x.
        // Required leading monomial: x*x = x^2, realised by -1*1 + 1*x^2 at
        // degree 2 (f itself), with trailing monomial 1 in B.
        let ty = PolyType {
            arity: 1,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![FieldKind::Q],
        };
        let f = q_poly(&ty, vec![(vec![2], 1), (vec![0], -1)]);
        let base = super::super::expanders::base_expanders(1, ty.order);
        let basis = vec![
            Monomial::identity(1, ty.order),
            Monomial::from_index(1, 1, ty.order),
        ];
        let multiplier = Monomial::from_index(1, 1, ty.order);
        let cfg = GeneratorConfig::default();

        let degree = find_expansion_degree(&[f], &base, &basis, &multiplier, &cfg).unwrap();
        assert_eq!(degree, 2);
    }
}
