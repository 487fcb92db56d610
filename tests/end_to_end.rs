//! End-to-end pipeline test: a univariate system with a known three-root
//! solution set, checked by verifying the action matrix agrees with the
//! companion-matrix structure those roots imply.
//!
//! `f = x^3 - x` has roots `{-1, 0, 1}`. Over the quotient basis
//! `{1, x, x^2}`, multiplication by `x` sends `1 -> x`, `x -> x^2`, and
//! (using `x^3 = x`) `x^2 -> x`. The resulting action matrix's
//! characteristic polynomial is `-(t^3 - t)`, whose roots are exactly the
//! system's roots — this is what the emitted code's eigen-decomposition
//! step would recover at runtime.

use polyjam::config::GeneratorConfig;
use polyjam::diagnostics::NullReporter;
use polyjam::field::FieldKind;
use polyjam::monomial::{Monomial, MonomialOrder};
use polyjam::polynomial::{PolyType, Polynomial};
use polyjam::{coefficient::Coefficient, template, term::Term};

fn ty() -> PolyType {
    PolyType {
        arity: 1,
        order: MonomialOrder::Grevlex,
        carrier_kinds: vec![FieldKind::Zp],
    }
}

fn term(exponent: u32, value: i64, order: MonomialOrder) -> Term {
    Term::single(
        Monomial::from_exponents(vec![exponent], order),
        Coefficient::from_int(value, FieldKind::Zp).unwrap(),
    )
}

#[test]
fn cubic_with_three_known_roots_produces_the_expected_action_matrix() {
    let t = ty();
    let order = t.order;

    let mut f = Polynomial::zero(t.clone());
    f.insert(term(3, 1, order)).unwrap();
    f.insert(term(1, -1, order)).unwrap();

    let basis = vec![
        Monomial::identity(1, order),
        Monomial::from_index(1, 1, order),
        Monomial::from_exponents(vec![2], order),
    ];
    let multiplier = Monomial::from_index(1, 1, order);
    let cfg = GeneratorConfig::default();
    let reporter = NullReporter;

    let built = template::build(&[f], &basis, &multiplier, &cfg, &reporter).unwrap();

    assert_eq!(built.action_matrix.size, 3);
    let one = Coefficient::one(FieldKind::Zp);
    let zero = Coefficient::zero(FieldKind::Zp);

    // 1 -> x
    assert!(built.action_matrix.rows[0][0].eq_value(&zero).unwrap());
    assert!(built.action_matrix.rows[0][1].eq_value(&one).unwrap());
    assert!(built.action_matrix.rows[0][2].eq_value(&zero).unwrap());

    // x -> x^2
    assert!(built.action_matrix.rows[1][0].eq_value(&zero).unwrap());
    assert!(built.action_matrix.rows[1][1].eq_value(&zero).unwrap());
    assert!(built.action_matrix.rows[1][2].eq_value(&one).unwrap());

    // x^2 -> x (since x^3 = x on this quotient ring)
    assert!(built.action_matrix.rows[2][0].eq_value(&zero).unwrap());
    assert!(built.action_matrix.rows[2][1].eq_value(&one).unwrap());
    assert!(built.action_matrix.rows[2][2].eq_value(&zero).unwrap());
}

#[test]
fn univariate_quadratic_converges_at_the_minimal_degree() {
    let t = ty();
    let order = t.order;

    let mut f = Polynomial::zero(t.clone());
    f.insert(term(2, 1, order)).unwrap();
    f.insert(term(0, -1, order)).unwrap();

    let basis = vec![Monomial::identity(1, order), Monomial::from_index(1, 1, order)];
    let multiplier = Monomial::from_index(1, 1, order);
    let cfg = GeneratorConfig::default();
    let reporter = NullReporter;

    let built = template::build(&[f], &basis, &multiplier, &cfg, &reporter).unwrap();
    assert_eq!(built.degree, 2);
    assert_eq!(built.quotient_basis.len(), 2);
}
