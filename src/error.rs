//! Error Taxonomy
//!
//! Every operation that can fail across the pipeline (field arithmetic,
//! monomial/polynomial algebra, template generation, oracle I/O, code
//! emission) surfaces one of these variants. There is no internal recovery:
//! errors propagate to the caller at stage boundaries.

use std::fmt;

/// Errors produced anywhere in the generator pipeline.
#[derive(Debug)]
pub enum PolyjamError {
    /// Combining elements with different field kinds, carrier counts,
    /// orderings, or arities.
    TypeMismatch { operation: &'static str },

    /// Polynomial-matrix operands with incompatible dimensions.
    ShapeMismatch {
        operation: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// Division or inversion of zero; monomial under-division.
    ArithmeticDomain { operation: &'static str },

    /// Inversion or division of Sym; comparison of Zp or Sym.
    Unsupported { operation: &'static str },

    /// Dominant-index out of range; matrix index out of range.
    Bounds {
        operation: &'static str,
        index: usize,
        len: usize,
    },

    /// Oracle reports non-zero ideal dimension, or its reply is unparsable.
    MalformedInput { reason: String },

    /// Automatic degree search exceeded the configured degree cap.
    NotConverged { max_degree: u32 },

    /// Wraps I/O failures from the oracle transport or file output.
    Io(std::io::Error),

    /// Wraps (de)serialization failures for cached templates.
    Serde(serde_json::Error),
}

impl fmt::Display for PolyjamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolyjamError::TypeMismatch { operation } => {
                write!(f, "type mismatch in {operation}")
            }
            PolyjamError::ShapeMismatch { operation, lhs, rhs } => {
                write!(
                    f,
                    "shape mismatch in {operation}: {}x{} vs {}x{}",
                    lhs.0, lhs.1, rhs.0, rhs.1
                )
            }
            PolyjamError::ArithmeticDomain { operation } => {
                write!(f, "arithmetic domain error in {operation}")
            }
            PolyjamError::Unsupported { operation } => {
                write!(f, "unsupported operation: {operation}")
            }
            PolyjamError::Bounds {
                operation,
                index,
                len,
            } => {
                write!(
                    f,
                    "index {index} out of bounds (len {len}) in {operation}"
                )
            }
            PolyjamError::MalformedInput { reason } => {
                write!(f, "malformed input: {reason}")
            }
            PolyjamError::NotConverged { max_degree } => {
                write!(
                    f,
                    "degree search did not converge within the cap of {max_degree}"
                )
            }
            PolyjamError::Io(e) => write!(f, "I/O error: {e}"),
            PolyjamError::Serde(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl std::error::Error for PolyjamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PolyjamError::Io(e) => Some(e),
            PolyjamError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PolyjamError {
    fn from(e: std::io::Error) -> Self {
        PolyjamError::Io(e)
    }
}

impl From<serde_json::Error> for PolyjamError {
    fn from(e: serde_json::Error) -> Self {
        PolyjamError::Serde(e)
    }
}

pub type Result<T> = std::result::Result<T, PolyjamError>;
