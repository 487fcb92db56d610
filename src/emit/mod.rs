//! Code emission
//!
//! Replays a built [`crate::template::Template`] against the Sym-carrier
//! companions of the original input polynomials to produce the two
//! C++/Eigen source files (header + body) that make up a generated numeric
//! solver.

pub mod body;
pub mod header;

use crate::error::Result;
use crate::monomial::Monomial;
use crate::polynomial::Polynomial;
use crate::template::Template;

/// The license and attribution block every generated file carries verbatim.
pub const GENERATED_LICENSE: &str = "\
/*************************************************************************
 *                                                                       *
 * polyjam, a polynomial solver generator for C++                        *
 * Copyright (C) 2015 Laurent Kneip, The Australian National University  *
 *                                                                       *
 * This program is free software: you can redistribute it and/or modify  *
 * it under the terms of the GNU General Public License as published by  *
 * the Free Software Foundation, either version 3 of the License, or     *
 * (at your option) any later version.                                   *
 *                                                                       *
 * This program is distributed in the hope that it will be useful,       *
 * but WITHOUT ANY WARRANTY; without even the implied warranty of        *
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the         *
 * GNU General Public License for more details.                          *
 *                                                                       *
 * You should have received a copy of the GNU General Public License     *
 * along with this program.  If not, see <http://www.gnu.org/licenses/>. *
 *                                                                       *
 *************************************************************************/";

/// Parameters describing the solver's public C++ signature; everything the
/// emitter cannot infer from the [`Template`] itself.
pub struct SolverSignature<'a> {
    pub solver_name: &'a str,
    /// Raw C++ parameter list for `solve(...)`, e.g.
    /// `"const Eigen::MatrixXd & points"`.
    pub parameters: &'a str,
}

/// Renders both the header and body source text for a generated solver.
///
/// `sym_polys` are the Sym-carrier companions of the numeric polynomials
/// that were passed to [`crate::template::build`] to produce `template`,
/// index-aligned with them.
pub fn generate_solver_files(
    template: &Template,
    sym_polys: &[Polynomial],
    multiplier: &Monomial,
    signature: &SolverSignature,
) -> Result<(String, String)> {
    let solution_type = format!(
        "std::vector< Eigen::Matrix<double,{unknowns},1>, Eigen::aligned_allocator<Eigen::Matrix<double,{unknowns},1> > >",
        unknowns = multiplier.arity()
    );

    let header_params = header::HeaderParams {
        solver_name: signature.solver_name,
        parameters: signature.parameters,
        m1_type: "Eigen::MatrixXd",
        m2_type: "Eigen::MatrixXd",
        solution_type: &solution_type,
    };
    let header_text = header::render(&header_params);

    let body_params = body::BodyParams {
        solver_name: signature.solver_name,
        parameters: signature.parameters,
        template,
        sym_polys,
        multiplier,
    };
    let body_text = body::render(&body_params)?;

    Ok((header_text, body_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coefficient::Coefficient;
    use crate::config::GeneratorConfig;
    use crate::diagnostics::NullReporter;
    use crate::field::FieldKind;
    use crate::monomial::MonomialOrder;
    use crate::polynomial::PolyType;
    use crate::term::Term;

    #[test]
    fn emits_a_header_and_body_that_agree_on_the_solver_name() {
        let zp_ty = PolyType {
            arity: 1,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![FieldKind::Zp],
        };
        let mut f_zp = Polynomial::zero(zp_ty.clone());
        f_zp
            .insert(Term::single(
                Monomial::from_exponents(vec![2], zp_ty.order),
                Coefficient::from_int(1, FieldKind::Zp).unwrap(),
            ))
            .unwrap();
        f_zp
            .insert(Term::single(
                Monomial::from_exponents(vec![0], zp_ty.order),
                Coefficient::from_int(-1, FieldKind::Zp).unwrap(),
            ))
            .unwrap();

        let sym_ty = PolyType {
            carrier_kinds: vec![FieldKind::Sym],
            ..zp_ty.clone()
        };
        let mut f_sym = Polynomial::zero(sym_ty.clone());
        f_sym
            .insert(Term::single(
                Monomial::from_exponents(vec![2], sym_ty.order),
                Coefficient::symbol("a"),
            ))
            .unwrap();
        f_sym
            .insert(Term::single(
                Monomial::from_exponents(vec![0], sym_ty.order),
                Coefficient::symbol("b"),
            ))
            .unwrap();

        let basis = vec![
            Monomial::identity(1, zp_ty.order),
            Monomial::from_index(1, 1, zp_ty.order),
        ];
        let multiplier = Monomial::from_index(1, 1, zp_ty.order);
        let cfg = GeneratorConfig::default();
        let reporter = NullReporter;
        let template =
            crate::template::build(&[f_zp], &basis, &multiplier, &cfg, &reporter).unwrap();

        let signature = SolverSignature {
            solver_name: "toy",
            parameters: "double unused",
        };
        let (header_text, body_text) =
            generate_solver_files(&template, &[f_sym], &multiplier, &signature).unwrap();

        assert!(header_text.contains("namespace toy"));
        assert!(body_text.contains("polyjam::toy::solve("));
        assert!(header_text.contains("GNU General Public License"));
        assert!(body_text.contains("GNU General Public License"));
    }
}
