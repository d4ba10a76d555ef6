// src/lesskey/mod.rs
pub mod compile;
pub mod config;
pub mod error;
pub mod escape;
pub mod line;
pub mod session;
pub mod tables;

// Re-exports for the common entry points.
pub use config::{ParseOptions, PartialEntry, default_source_path, default_source_path_with};
pub use error::{CollectSink, Diagnostic, DiagnosticSink, LesskeyError, LogSink};
pub use session::{ParseSession, parse_lesskey, parse_lesskey_reader, translate_all};
pub use tables::{LesskeyTables, TableKind};

/// Translate an in-memory source. Diagnostics go to the returned sink.
pub fn parse_lesskey_str(
    name: &str,
    src: &str,
    options: &ParseOptions,
) -> (LesskeyTables, CollectSink) {
    parse_lesskey_reader(name, src.as_bytes(), options, CollectSink::default())
}
