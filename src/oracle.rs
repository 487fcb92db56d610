//! Basis-oracle adapter
//!
//! Isolates the external Gröbner-basis computation behind a trait with a
//! pluggable transport, so format/parse and process spawning can be tested
//! independently by injecting a mock transport. The concrete [`MacaulayOracle`]
//! speaks a small Macaulay2 script grammar: `KK = ZZ/<p>` / `R = KK[...]` /
//! `f<i>=...` / `f = (f1 || ...);`, and parses back a dimension-then-monomial-list
//! reply, bar-wrapped across multiple lines.

use crate::error::{PolyjamError, Result};
use crate::monomial::{Monomial, MonomialOrder};
use crate::polynomial::Polynomial;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Command;

static VARIABLE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"x_(\d+)(?:\^(\d+))?").expect("static regex is valid"));

/// Matches the `oN = ` matrix label Macaulay2 prefixes to the first line of
/// a `print`ed value, e.g. `o1 = `.
static MATRIX_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*o\d+\s*=\s*").expect("static regex is valid"));

/// Formats an ideal for an external basis-computation program and parses its
/// reply back into a quotient-ring basis.
pub trait BasisOracle {
    fn format_ideal(&self, polys: &[Polynomial], characteristic: u64) -> String;
    fn parse_reply(&self, reply: &str, arity: usize) -> Result<Vec<Monomial>>;
}

/// Spawns a local process against a script file and returns its stdout.
/// Isolates the single blocking I/O call-out in the generator pipeline.
pub trait Transport {
    fn run(&self, script_path: &Path) -> Result<String>;
}

/// Spawns the configured oracle binary with `--silent <script>`, in a fresh
/// temporary workspace.
pub struct ProcessTransport {
    pub command: String,
}

impl ProcessTransport {
    pub fn new(command: impl Into<String>) -> Self {
        ProcessTransport { command: command.into() }
    }
}

impl Transport for ProcessTransport {
    fn run(&self, script_path: &Path) -> Result<String> {
        let output = Command::new(&self.command)
            .arg("--silent")
            .arg(script_path)
            .output()?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// A basis oracle matching the Macaulay2 script grammar the original
/// generator emits and parses.
pub struct MacaulayOracle;

impl MacaulayOracle {
    /// Runs a full round-trip: write the script to a temp workspace, invoke
    /// `transport`, and parse the reply.
    pub fn run(
        &self,
        polys: &[Polynomial],
        characteristic: u64,
        arity: usize,
        transport: &dyn Transport,
    ) -> Result<Vec<Monomial>> {
        let script = self.format_ideal(polys, characteristic);
        let workspace = tempfile::tempdir()?;
        let script_path = workspace.path().join("ideal.m2");
        std::fs::write(&script_path, script)?;
        let reply = transport.run(&script_path)?;
        self.parse_reply(&reply, arity)
    }
}

impl BasisOracle for MacaulayOracle {
    fn format_ideal(&self, polys: &[Polynomial], characteristic: u64) -> String {
        let arity = polys.first().map(|p| p.arity()).unwrap_or(0);
        let mut equations = String::new();
        let mut names = Vec::with_capacity(polys.len());

        for (i, poly) in polys.iter().enumerate() {
            let name = format!("f{}", i + 1);
            equations.push_str(&format!("{name}={}\n", format_zp_polynomial(poly)));
            names.push(name);
        }

        format!(
            "-- Macaulay2 code template for gbsolver generator\n\
             \n\
             KK = ZZ/{characteristic}\n\
             R = KK[x_1..x_{arity}, MonomialOrder=>GRevLex]\n\
             \n\
             -- equations\n\
             \n\
             {equations}\
             f = ({});\n\
             \n\
             -- computation of the basis\n\
             \n\
             gbTrace = 0;\n\
             I1 = ideal(f);\n\
             dm = dim I1;\n\
             dg = degree I1;\n\
             \n\
             A = R/I1;\n\
             Ab = basis A;\n\
             \n\
             print dm;\n\
             print Ab;\n\
             \n\
             exit 0\n",
            names.join(" || "),
        )
    }

    fn parse_reply(&self, reply: &str, arity: usize) -> Result<Vec<Monomial>> {
        let mut lines = reply.lines();
        let dim_line = lines.next().ok_or_else(|| PolyjamError::MalformedInput {
            reason: "oracle reply is empty".into(),
        })?;
        let dim: i64 = dim_line.trim().parse().map_err(|_| PolyjamError::MalformedInput {
            reason: format!("oracle reply's first line is not an integer dimension: {dim_line:?}"),
        })?;
        if dim != 0 {
            return Err(PolyjamError::MalformedInput {
                reason: format!(
                    "ideal has dimension {dim}; the problem is {} (expected dimension 0)",
                    if dim > 0 { "underconstrained" } else { "overconstrained" }
                ),
            });
        }

        let body: Vec<&str> = lines
            .filter(|line| !line.starts_with("----"))
            .collect();
        if body.is_empty() {
            return Ok(Vec::new());
        }

        // Strip the `oN = ` matrix label from the first line, then drop every
        // `|` wrapping delimiter (interior continuation lines carry bars with
        // no label) before tokenizing each line on whitespace.
        let mut monomials = Vec::new();
        for (i, line) in body.iter().enumerate() {
            let unlabeled = if i == 0 {
                MATRIX_LABEL.replace(line, "")
            } else {
                std::borrow::Cow::Borrowed(*line)
            };
            let unbarred = unlabeled.replace('|', " ");
            for token in unbarred.split_whitespace() {
                monomials.push(token_to_monomial(token, arity)?);
            }
        }
        Ok(monomials)
    }
}

/// Parses a single `x_i` or `x_i^k` token (or a product of several joined by
/// `*`) into a [`Monomial`].
fn token_to_monomial(token: &str, arity: usize) -> Result<Monomial> {
    let mut exponents = vec![0u32; arity];
    let mut matched_any = false;

    for factor in token.split('*') {
        let factor = factor.trim();
        if factor.is_empty() || factor == "1" {
            continue;
        }
        let caps = VARIABLE_TOKEN.captures(factor).ok_or_else(|| PolyjamError::MalformedInput {
            reason: format!("cannot parse monomial token {token:?}"),
        })?;
        let index: usize = caps[1].parse().map_err(|_| PolyjamError::MalformedInput {
            reason: format!("cannot parse variable index in token {token:?}"),
        })?;
        let exponent: u32 = caps
            .get(2)
            .map(|m| m.as_str().parse().unwrap_or(1))
            .unwrap_or(1);
        if index == 0 || index > arity {
            return Err(PolyjamError::MalformedInput {
                reason: format!("variable index {index} out of range 1..={arity}"),
            });
        }
        exponents[index - 1] = exponent;
        matched_any = true;
    }

    if !matched_any && token != "1" {
        return Err(PolyjamError::MalformedInput {
            reason: format!("token {token:?} names no variable and is not the identity"),
        });
    }
    Ok(Monomial::from_exponents(exponents, MonomialOrder::Grevlex))
}

fn format_zp_polynomial(poly: &Polynomial) -> String {
    if poly.is_zero() {
        return "0".to_string();
    }
    let mut out = String::new();
    for (i, term) in poly.terms_descending().enumerate() {
        if i > 0 {
            out.push('+');
        }
        out.push_str(&term.dominant().to_string());
        if !term.monomial.is_identity() {
            out.push('*');
            out.push_str(&term.monomial.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_zero_parses_basis_monomials() {
        let oracle = MacaulayOracle;
        let reply = "0\no1 = | 1 x_1 x_1^2 |\n";
        let basis = oracle.parse_reply(reply, 1).unwrap();
        assert_eq!(basis.len(), 3);
        assert!(basis[0].is_identity());
        assert_eq!(basis[1].exponents, vec![1]);
        assert_eq!(basis[2].exponents, vec![2]);
    }

    #[test]
    fn dimension_zero_parses_wrapped_multiline_basis() {
        let oracle = MacaulayOracle;
        let reply = "0\no1 = | 1 x_1 x_2\n      x_1^2 x_1*x_2 |\n";
        let basis = oracle.parse_reply(reply, 2).unwrap();
        assert_eq!(basis.len(), 5);
        assert!(basis[0].is_identity());
        assert_eq!(basis[3].exponents, vec![2, 0]);
        assert_eq!(basis[4].exponents, vec![1, 1]);
    }

    #[test]
    fn nonzero_dimension_is_malformed_input() {
        let oracle = MacaulayOracle;
        assert!(matches!(
            oracle.parse_reply("1\n", 1),
            Err(PolyjamError::MalformedInput { .. })
        ));
    }

    #[test]
    fn format_ideal_emits_expected_grammar() {
        let oracle = MacaulayOracle;
        let ty = crate::polynomial::PolyType {
            arity: 1,
            order: MonomialOrder::Grevlex,
            carrier_kinds: vec![crate::field::FieldKind::Zp],
        };
        let mut poly = Polynomial::zero(ty.clone());
        poly.insert(crate::term::Term::single(
            Monomial::from_exponents(vec![1], ty.order),
            crate::coefficient::Coefficient::from_int(1, crate::field::FieldKind::Zp).unwrap(),
        ))
        .unwrap();
        let script = oracle.format_ideal(&[poly], 30097);
        assert!(script.contains("KK = ZZ/30097"));
        assert!(script.contains("R = KK[x_1..x_1, MonomialOrder=>GRevLex]"));
        assert!(script.contains("f1="));
    }
}
