//! Progress Reporting
//!
//! Template generation can probe many candidate degrees and many candidate
//! row subsets before converging. Progress narration is routed through a
//! small trait so the library stays silent by default and a CLI (or test
//! harness) can opt into seeing it.

/// Receives progress narration from the template-generation pipeline.
pub trait Reporter {
    /// A single-line status update (stage transitions, probe outcomes).
    fn status(&self, _message: &str) {}
}

/// Default reporter: discards everything. Library calls use this unless the
/// caller supplies their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Writes each status line to stderr, prefixed for readability. Intended for
/// CLI use, not for library-internal defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrReporter;

impl Reporter for StderrReporter {
    fn status(&self, message: &str) {
        eprintln!("polyjam: {message}");
    }
}
