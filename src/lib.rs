//! polyjam — a polynomial solver generator
//!
//! Given a zero-dimensional system of polynomial equations (with both a
//! numeric probe representation over a prime field and a symbolic
//! representation carrying the original coefficient names), this crate
//! builds an elimination template against a quotient-ring basis supplied by
//! an external Gröbner-basis oracle, assembles the corresponding action
//! matrix, and emits straight-line C++/Eigen source for a numeric solver
//! that recovers the system's roots from that matrix's eigenvectors.

pub mod coeff_matrix;
pub mod coefficient;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod field;
pub mod gauss_jordan;
pub mod monomial;
pub mod oracle;
pub mod poly_matrix;
pub mod polynomial;
pub mod template;
pub mod term;

pub mod prelude {
    pub use crate::coefficient::Coefficient;
    pub use crate::config::GeneratorConfig;
    pub use crate::diagnostics::{NullReporter, Reporter, StderrReporter};
    pub use crate::error::{PolyjamError, Result};
    pub use crate::field::{Field, FieldKind};
    pub use crate::monomial::{Monomial, MonomialOrder};
    pub use crate::oracle::{BasisOracle, MacaulayOracle, ProcessTransport, Transport};
    pub use crate::poly_matrix::PolyMatrix;
    pub use crate::polynomial::{PolyType, Polynomial};
    pub use crate::template::Template;
}

use diagnostics::{NullReporter, Reporter, StderrReporter};
use error::{PolyjamError, Result};
use monomial::Monomial;
use oracle::{MacaulayOracle, Transport};
use polynomial::Polynomial;
use template::Template;

/// Runs the full pipeline for one solver: computes the quotient-ring basis
/// for `eqs` via `oracle`/`transport`, builds the elimination template, and
/// emits the header/body source pair for `solver_name`.
///
/// `eqs` are the numeric (prime-field probe) input polynomials; `eqs_sym`
/// are their symbolic companions, index-aligned with `eqs`, carrying the
/// original coefficient names that appear in the emitted code. `parameters`
/// is the raw C++ parameter list for the generated `solve(...)` function.
/// The action-matrix multiplier is conventionally the system's last
/// variable. When `visualize` is set, stage progress is narrated to
/// stderr; otherwise the pipeline runs silently.
pub fn generate(
    eqs: &[Polynomial],
    eqs_sym: &[Polynomial],
    solver_name: &str,
    parameters: &str,
    visualize: bool,
    cfg: &config::GeneratorConfig,
    oracle: &MacaulayOracle,
    transport: &dyn Transport,
) -> Result<(Template, String, String)> {
    if eqs.len() != eqs_sym.len() {
        return Err(PolyjamError::MalformedInput {
            reason: format!(
                "{} numeric equations but {} symbolic companions",
                eqs.len(),
                eqs_sym.len()
            ),
        });
    }
    let arity = eqs
        .first()
        .map(|p| p.arity())
        .ok_or_else(|| PolyjamError::MalformedInput {
            reason: "generate() needs at least one equation".into(),
        })?;
    let order = eqs[0].order();
    let multiplier = Monomial::from_index(arity, arity, order);

    let reporter: Box<dyn Reporter> = if visualize {
        Box::new(StderrReporter)
    } else {
        Box::new(NullReporter)
    };
    reporter.status(&format!("computing quotient-ring basis for '{solver_name}'"));
    let basis = oracle.run(eqs, cfg.characteristic, arity, transport)?;

    let built = template::build(eqs, &basis, &multiplier, cfg, &*reporter)?;

    reporter.status(&format!("emitting solver source for '{solver_name}'"));
    let signature = emit::SolverSignature {
        solver_name,
        parameters,
    };
    let (header, body) = emit::generate_solver_files(&built, eqs_sym, &multiplier, &signature)?;

    Ok((built, header, body))
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use crate::coeff_matrix::CoeffMatrix;

    #[test]
    fn crate_wires_up_a_tiny_univariate_reduction() {
        let ty = PolyType {
            arity: 1,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![FieldKind::Q],
        };
        let mut f = Polynomial::zero(ty.clone());
        f.insert(crate::term::Term::single(
            Monomial::from_exponents(vec![2], ty.order),
            Coefficient::from_int(1, FieldKind::Q).unwrap(),
        ))
        .unwrap();
        f.insert(crate::term::Term::single(
            Monomial::from_exponents(vec![0], ty.order),
            Coefficient::from_int(-1, FieldKind::Q).unwrap(),
        ))
        .unwrap();

        let matrix = CoeffMatrix::from_polynomials(&[f]).unwrap();
        assert_eq!(matrix.rows(), 1);
        assert!(matrix.columns().len() >= 2);
    }
}
