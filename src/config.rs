//! Generator Configuration
//!
//! Centralises the thresholds a generator run needs: the default
//! prime-field characteristic, the degree-search cap, and the Gauss-Jordan
//! zero tolerance for floating-point pivoting. Callers that need different
//! values build their own `GeneratorConfig` instead of patching constants.

/// Tunable thresholds for a single generator run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Characteristic of the Zp carrier used for dual-carrier probing.
    pub characteristic: u64,

    /// Practical cap on automatic degree search; exceeding it without
    /// converging is reported as `NotConverged`.
    pub max_degree: u32,

    /// Zero tolerance used only when pivoting over `Field::R` in
    /// Gauss-Jordan. Exact field kinds (Q, Zp, Sym) always compare exactly
    /// to zero regardless of this value.
    pub epsilon: f64,

    /// Restrict expander synthesis to even degrees only (used for problems
    /// with known degree parity).
    pub even_degrees_only: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            characteristic: 30097,
            max_degree: 12,
            epsilon: 1e-10,
            even_degrees_only: false,
        }
    }
}
