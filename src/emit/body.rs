//! Emits the solver's body file: `M1` fill, `initRow` replay into `M2`, the
//! LU elimination, the action-matrix assembly, and the eigen-decomposition
//! boilerplate.
//!
//! The `ind_1`/`ind_2` index arrays that drive each `initRow` call are
//! derived directly from monomial lookups against the template's column
//! list, rather than from any textual encoding of the row's coefficients.

use crate::coeff_matrix::CoeffMatrix;
use crate::error::{PolyjamError, Result};
use crate::monomial::Monomial;
use crate::polynomial::Polynomial;
use crate::template::Template;
use std::fmt::Write as _;

pub struct BodyParams<'a> {
    pub solver_name: &'a str,
    pub parameters: &'a str,
    pub template: &'a Template,
    /// Sym-carrier companions of the original (unexpanded) input
    /// polynomials, index-aligned with what `template::build` was given.
    pub sym_polys: &'a [Polynomial],
    pub multiplier: &'a Monomial,
}

fn leading_index(row: &[crate::coefficient::Coefficient]) -> Option<usize> {
    row.iter().position(|c| !c.is_zero())
}

pub fn render(params: &BodyParams) -> Result<String> {
    let BodyParams {
        solver_name,
        parameters,
        template,
        sym_polys,
        multiplier,
    } = *params;

    let basis = &template.quotient_basis;
    let sol_count = basis.len();
    let unknown_count = multiplier.arity();
    let m1 = CoeffMatrix::from_polynomials(sym_polys)?;

    let mut code = String::new();
    writeln!(code, "Eigen::MatrixXd M1({},{});", m1.rows(), m1.cols()).unwrap();
    writeln!(code, "M1.fill(0.0);").unwrap();
    for r in 0..m1.rows() {
        for (c, value) in m1.row(r).iter().enumerate() {
            if !value.is_zero() {
                write!(code, "M1({r},{c}) = {value}; ").unwrap();
            }
        }
        writeln!(code).unwrap();
    }
    writeln!(code).unwrap();

    let m2_rows = template.matrix.rows();
    let m2_cols = template.matrix.cols();
    let m3_cols = m2_cols - m2_rows;

    writeln!(code, "Eigen::MatrixXd M2({m2_rows},{m2_cols});").unwrap();
    writeln!(code, "M2.fill(0.0);").unwrap();

    for (r, (poly_idx, expander)) in template.schedule.iter().enumerate() {
        let mut cols1 = Vec::new();
        let mut cols2 = Vec::new();
        for (c, value) in m1.row(*poly_idx).iter().enumerate() {
            if value.is_zero() {
                continue;
            }
            let shifted = m1.columns()[c].multiply(expander)?;
            let target = template
                .matrix
                .columns()
                .iter()
                .position(|m| *m == shifted)
                .ok_or_else(|| PolyjamError::MalformedInput {
                    reason: format!(
                        "template row {r} expects monomial {shifted} among the final columns"
                    ),
                })?;
            cols1.push(c);
            cols2.push(target);
        }

        write!(code, "static const int ind_2_{r} [] = {{").unwrap();
        write!(code, "{}", join_commas(&cols2)).unwrap();
        writeln!(code, "}};").unwrap();
        write!(code, "static const int ind_1_{r} [] = {{").unwrap();
        write!(code, "{}", join_commas(&cols1)).unwrap();
        writeln!(code, "}};").unwrap();
        writeln!(
            code,
            "initRow( M2, M1, {r}, {poly_idx}, ind_2_{r}, ind_1_{r}, {} );",
            cols1.len()
        )
        .unwrap();
    }
    writeln!(code).unwrap();

    writeln!(
        code,
        "Eigen::PartialPivLU<Eigen::MatrixXd> lu(M2.block(0,0,{m2_rows},{m2_rows}));"
    )
    .unwrap();
    writeln!(
        code,
        "Eigen::MatrixXd M3 = lu.solve(M2.block(0,{m2_rows},{m2_rows},{m3_cols}));"
    )
    .unwrap();
    writeln!(code).unwrap();

    writeln!(
        code,
        "Eigen::Matrix<double,{sol_count},{sol_count}> Action = Eigen::Matrix<double,{sol_count},{sol_count}>::Zero();"
    )
    .unwrap();

    for (i, b) in basis.iter().enumerate() {
        let product = b.multiply(multiplier)?;
        if let Some(j) = basis.iter().position(|x| x == &product) {
            writeln!(code, "Action({i},{j}) = 1.0;").unwrap();
            continue;
        }
        let row_idx = (0..template.matrix.rows())
            .find(|&r| {
                leading_index(template.matrix.row(r))
                    .map(|lead| template.matrix.columns()[lead] == product)
                    .unwrap_or(false)
            })
            .ok_or_else(|| PolyjamError::MalformedInput {
                reason: format!("no template row realises required leading monomial {product}"),
            })?;
        writeln!(
            code,
            "Action.row({i}) -= M3.block({row_idx},{},1,{sol_count});",
            m3_cols - sol_count
        )
        .unwrap();
    }

    writeln!(code, "//columns of Action mean:").unwrap();
    write!(code, "//").unwrap();
    for b in basis {
        write!(code, " {b}").unwrap();
    }
    writeln!(code).unwrap();

    let mut body = String::new();
    writeln!(body, "{}", super::GENERATED_LICENSE).unwrap();
    writeln!(body, "\n//This code is automatically generated by polyjam for solving {solver_name}.").unwrap();
    writeln!(body, "//It is licensed under the GNU GPL terms.").unwrap();
    writeln!(body, "//Please contact the author of polyjam for proprietary use.").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "#include \"{solver_name}.hpp\"").unwrap();
    writeln!(body, "#include \"GaussJordan.hpp\"").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "void").unwrap();
    writeln!(body, "polyjam::{solver_name}::initRow(").unwrap();
    writeln!(body, "    Eigen::MatrixXd & M2,").unwrap();
    writeln!(body, "    const Eigen::MatrixXd & M1,").unwrap();
    writeln!(body, "    int row2,").unwrap();
    writeln!(body, "    int row1,").unwrap();
    writeln!(body, "    const int * cols2,").unwrap();
    writeln!(body, "    const int * cols1,").unwrap();
    writeln!(body, "    size_t numberCols )").unwrap();
    writeln!(body, "{{").unwrap();
    writeln!(body, "  for( size_t i = 0; i < numberCols; i++ )").unwrap();
    writeln!(body, "    M2(row2,cols2[i]) = M1(row1,cols1[i]);").unwrap();
    writeln!(body, "}}").unwrap();
    writeln!(body).unwrap();
    writeln!(
        body,
        "void\npolyjam::{solver_name}::solve( {parameters}, std::vector< Eigen::Matrix<double,{unknown_count},1>, Eigen::aligned_allocator<Eigen::Matrix<double,{unknown_count},1> > > & solutions )"
    )
    .unwrap();
    writeln!(body, "{{").unwrap();
    body.push_str(&code);
    writeln!(body).unwrap();
    writeln!(
        body,
        "  Eigen::EigenSolver< Eigen::Matrix<double,{sol_count},{sol_count}> > Eig(Action,true);"
    )
    .unwrap();
    writeln!(
        body,
        "  Eigen::Matrix<std::complex<double>,{sol_count},1> D = Eig.eigenvalues();"
    )
    .unwrap();
    writeln!(
        body,
        "  Eigen::Matrix<std::complex<double>,{sol_count},{sol_count}> V = Eig.eigenvectors();"
    )
    .unwrap();
    writeln!(body).unwrap();
    writeln!(body, "  for( int c = 0; c < {sol_count}; c++ )").unwrap();
    writeln!(body, "  {{").unwrap();
    writeln!(body, "    std::complex<double> eigValue = D[c];").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "    if( fabs(eigValue.imag()) < 0.0001 )").unwrap();
    writeln!(body, "    {{").unwrap();
    writeln!(body, "      Eigen::Matrix<double,{unknown_count},1> sol;").unwrap();
    writeln!(body).unwrap();
    writeln!(body, "      std::complex<double> temp;").unwrap();

    for d in 0..unknown_count {
        let order = basis.first().map(|m| m.order).unwrap_or(crate::monomial::MonomialOrder::Grevlex);
        let unknown = Monomial::from_index(unknown_count, d + 1, order);
        let b = basis
            .iter()
            .position(|m| *m == unknown)
            .ok_or_else(|| PolyjamError::MalformedInput {
                reason: format!("unknown x_{} is not a quotient-basis element", d + 1),
            })?;
        writeln!(body, "      temp = V({b},c) / V({},c);", sol_count - 1).unwrap();
        writeln!(body, "      sol({d},0) = temp.real();").unwrap();
    }

    writeln!(body, "      solutions.push_back(sol);").unwrap();
    writeln!(body, "    }}").unwrap();
    writeln!(body, "  }}").unwrap();
    writeln!(body, "}}").unwrap();

    Ok(body)
}

fn join_commas(values: &[usize]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
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

    fn ty(kind: FieldKind) -> PolyType {
        PolyType {
            arity: 1,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![kind],
        }
    }

    #[test]
    fn renders_expected_sections_for_a_univariate_solver() {
        // f = x^2 - 1, basis = {1, x}, multiplier = x.
        let zp_ty = ty(FieldKind::Zp);
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

        let sym_ty = ty(FieldKind::Sym);
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

        let params = BodyParams {
            solver_name: "toy",
            parameters: "double unused",
            template: &template,
            sym_polys: &[f_sym],
            multiplier: &multiplier,
        };
        let body = render(&params).unwrap();
        assert!(body.contains("polyjam::toy::solve("));
        assert!(body.contains("Eigen::EigenSolver"));
        assert!(body.contains("initRow( M2, M1,"));
    }
}
