// src/lesskey/error.rs
use std::{fmt, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LesskeyError {
    #[error("illegal escape sequence \\k{0}")]
    IllegalEscapeSequence(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("missing action")]
    MissingAction,
    #[error("missing = in: {0}")]
    MissingEquals(String),
    /// The source could not be opened. Never counted as a line error.
    #[error("cannot open lesskey file {}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A line error, located in its source.
#[derive(Debug)]
pub struct Diagnostic {
    pub source_name: String,
    pub line: usize,
    pub error: LesskeyError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: line {}: {}", self.source_name, self.line, self.error)
    }
}

/// Receives each line error as it is found. Translation continues whatever
/// the sink does.
pub trait DiagnosticSink {
    fn report(&mut self, diag: Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diag: Diagnostic) {
        log::error!("{diag}");
    }
}

/// Keeps diagnostics in memory for the caller to inspect.
#[derive(Debug, Default)]
pub struct CollectSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectSink {
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.to_string()).collect()
    }
}

impl DiagnosticSink for CollectSink {
    fn report(&mut self, diag: Diagnostic) {
        self.diagnostics.push(diag);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diag: Diagnostic) {
        (**self).report(diag);
    }
}
