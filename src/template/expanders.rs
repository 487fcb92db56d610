//! Expander synthesis (stage 1 of template generation).
//!
//! Degree-`d` expanders are built from sorted multi-indices over the
//! degree-1 base expanders, so each degree-`d` monomial is enumerated
//! exactly once.

use crate::monomial::{Monomial, MonomialOrder};

/// The degree-1 monomials `x_1, ..., x_arity`.
pub fn base_expanders(arity: usize, order: MonomialOrder) -> Vec<Monomial> {
    (1..=arity)
        .map(|i| Monomial::from_index(arity, i, order))
        .collect()
}

/// Synthesises every expander of degree `2..=max_degree` by walking sorted
/// multi-indices `(i_1 <= ... <= i_d)` over `base` and multiplying the
/// corresponding base expanders together.
pub fn superlinear_expanders(base: &[Monomial], max_degree: u32) -> Vec<Monomial> {
    let mut result = Vec::new();
    for degree in 2..=max_degree {
        append_degree(base, degree as usize, &mut result);
    }
    result
}

/// As [`superlinear_expanders`], but only even degrees — for problems with
/// known degree parity.
pub fn even_degree_expanders(base: &[Monomial], max_degree: u32) -> Vec<Monomial> {
    let mut result = Vec::new();
    let mut degree = 2;
    while degree <= max_degree {
        append_degree(base, degree as usize, &mut result);
        degree += 2;
    }
    result
}

fn append_degree(base: &[Monomial], degree: usize, out: &mut Vec<Monomial>) {
    if base.is_empty() || degree == 0 {
        return;
    }
    let mut indices = vec![0usize; degree];
    loop {
        let mut monomial = base[indices[0]].clone();
        for &idx in &indices[1..] {
            monomial = monomial.multiply(&base[idx]).expect("base expanders share arity");
        }
        out.push(monomial);

        // Advance the sorted multi-index (i_1 <= ... <= i_d) to the next
        // combination with repetition, most-significant position first.
        let mut pos = degree - 1;
        loop {
            indices[pos] += 1;
            if indices[pos] < base.len() {
                for later in (pos + 1)..degree {
                    indices[later] = indices[pos];
                }
                break;
            }
            if pos == 0 {
                return;
            }
            pos -= 1;
        }
    }
}
