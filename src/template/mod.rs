//! Template generator
//!
//! Bundles five stages into a driver producing a [`Template`]: the reduced,
//! minimised [`CoeffMatrix`], its [`ActionMatrix`], and the retained
//! `(polynomial, expander)` schedule the code emitter replays against the
//! dual-carrier symbolic representation.

pub mod action_matrix;
pub mod degree_search;
pub mod expanders;
pub mod minimize;
pub mod reorder;

use crate::coeff_matrix::CoeffMatrix;
use crate::config::GeneratorConfig;
use crate::diagnostics::Reporter;
use crate::error::Result;
use crate::monomial::Monomial;
use crate::polynomial::Polynomial;
use action_matrix::ActionMatrix;

/// The fully reduced, minimised, and reordered expansion template, together
/// with the bookkeeping the emitter needs to replay it against the original
/// (pre-elimination) matrix and the dual-carrier symbolic representation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Template {
    pub matrix: CoeffMatrix,
    pub action_matrix: ActionMatrix,
    /// The `(polynomial_index, expander)` pairs that survived minimisation,
    /// in row order of `matrix`.
    pub schedule: Vec<(usize, Monomial)>,
    pub quotient_basis: Vec<Monomial>,
    pub degree: u32,
}

/// Runs all five stages and returns the resulting [`Template`].
///
/// `polys` are the input polynomials (ordinary, single-carrier). `basis` is
/// the quotient-ring basis *B* returned by the external oracle. `multiplier`
/// is the action-matrix multiplier monomial (conventionally the last
/// variable).
pub fn build(
    polys: &[Polynomial],
    basis: &[Monomial],
    multiplier: &Monomial,
    cfg: &GeneratorConfig,
    reporter: &dyn Reporter,
) -> Result<Template> {
    let arity = multiplier.arity();
    let order = polys
        .first()
        .map(|p| p.order())
        .unwrap_or(crate::monomial::MonomialOrder::Grevlex);

    reporter.status("synthesising base expanders");
    let base = expanders::base_expanders(arity, order);

    reporter.status("searching for the minimal expansion degree");
    let degree = degree_search::find_expansion_degree(polys, &base, basis, multiplier, cfg)?;

    let identity = Monomial::identity(arity, order);
    let synthesized = if cfg.even_degrees_only {
        expanders::even_degree_expanders(&base, degree)
    } else {
        expanders::superlinear_expanders(&base, degree)
    };
    let mut all_expanders = vec![identity];
    all_expanders.extend(base.iter().cloned());
    all_expanders.extend(synthesized);

    let mut schedule = Vec::with_capacity(polys.len() * all_expanders.len());
    for poly_idx in 0..polys.len() {
        for expander in &all_expanders {
            schedule.push((poly_idx, expander.clone()));
        }
    }

    reporter.status("building the pre-elimination matrix");
    let big_matrix = CoeffMatrix::from_expansion_schedule(polys, &schedule)?;

    let required = degree_search::required_leading_monomials(basis, multiplier)?;
    reporter.status("minimising rows");
    let kept = minimize::minimize_rows(
        &big_matrix,
        &schedule,
        |candidate| degree_search::realises_every_required_monomial(candidate, &required, basis),
        cfg,
    )?;

    let kept_schedule: Vec<(usize, Monomial)> = kept.iter().map(|&r| schedule[r].clone()).collect();
    let mut matrix = big_matrix.sub_matrix(&kept);
    matrix.reduce(cfg)?;

    reporter.status("reordering toward echelon form");
    let reordering = reorder::reorder(&matrix);
    let matrix = matrix.permute(&reordering.rows, &reordering.columns);
    let kept_schedule: Vec<(usize, Monomial)> = reordering
        .rows
        .iter()
        .map(|&r| kept_schedule[r].clone())
        .collect();

    reporter.status("assembling the action matrix");
    let action_matrix = action_matrix::build_action_matrix(basis, multiplier, &matrix)?;

    Ok(Template {
        matrix,
        action_matrix,
        schedule: kept_schedule,
        quotient_basis: basis.to_vec(),
        degree,
    })
}

