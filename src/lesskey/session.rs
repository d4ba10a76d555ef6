// src/lesskey/session.rs
// One translation of one lesskey source: counters, tables, active table.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use rayon::prelude::*;

use super::{
    config::{ParseOptions, default_source_path},
    error::{CollectSink, Diagnostic, DiagnosticSink, LesskeyError},
    line::{Directive, clean_line, directive},
    tables::{A_END_LIST, LesskeyTables, Table, TableKind, XBuf},
};

pub struct ParseSession<S: DiagnosticSink> {
    source_name: String,
    linenum: usize,
    errors: usize,
    cmd: Table,
    edit: Table,
    var: Table,
    current: TableKind,
    options: ParseOptions,
    sink: S,
}

impl<S: DiagnosticSink> ParseSession<S> {
    /// Empty tables, command table active.
    pub fn new(source_name: impl Into<String>, options: ParseOptions, sink: S) -> Self {
        Self {
            source_name: source_name.into(),
            linenum: 0,
            errors: 0,
            cmd: Table::new(TableKind::Command),
            edit: Table::new(TableKind::EditKey),
            var: Table::new(TableKind::Variable),
            current: TableKind::Command,
            options,
            sink,
        }
    }

    pub fn current(&self) -> TableKind {
        self.current
    }

    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn linenum(&self) -> usize {
        self.linenum
    }

    pub(crate) fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub(crate) fn switch_to(&mut self, kind: TableKind) {
        log::debug!(
            "{}: line {}: switching to {:?} table",
            self.source_name,
            self.linenum,
            kind
        );
        self.current = kind;
    }

    fn current_table(&self) -> &Table {
        match self.current {
            TableKind::Command => &self.cmd,
            TableKind::EditKey => &self.edit,
            TableKind::Variable => &self.var,
        }
    }

    pub(crate) fn current_buf(&mut self) -> &mut XBuf {
        let table = match self.current {
            TableKind::Command => &mut self.cmd,
            TableKind::EditKey => &mut self.edit,
            TableKind::Variable => &mut self.var,
        };
        &mut table.buf
    }

    /// Count a line error and hand it to the sink.
    pub(crate) fn error(&mut self, error: LesskeyError) {
        self.errors += 1;
        self.sink.report(Diagnostic {
            source_name: self.source_name.clone(),
            line: self.linenum,
            error,
        });
    }

    fn control_line(&mut self, raw: &[u8]) -> bool {
        match directive(raw) {
            Some(Directive::Switch(kind)) => self.switch_to(kind),
            Some(Directive::Stop) => {
                let buf = self.current_buf();
                buf.add(0);
                buf.add(A_END_LIST);
            }
            None => return false,
        }
        true
    }

    /// Process one raw source line (terminator included, if any).
    pub fn parse_line(&mut self, raw: &[u8]) {
        self.linenum += 1;
        if self.control_line(raw) {
            return;
        }
        let line = clean_line(raw);
        if line.is_empty() {
            return;
        }
        match self.current_table().kind.names() {
            Some(names) => self.parse_cmdline(line, names),
            None => self.parse_varline(line),
        }
    }

    /// Feed every line of `reader`, honoring the line buffer bound.
    pub fn parse_reader<R: BufRead>(&mut self, mut reader: R) {
        let cap = self.options.line_cap();
        let mut line = Vec::with_capacity(cap);
        loop {
            match next_line(&mut reader, &mut line, cap) {
                Ok(false) => break,
                Ok(true) => {
                    if line.len() == cap && line.last() != Some(&b'\n') {
                        log::warn!(
                            "{}: line {}: longer than {} bytes, remainder read as a new line",
                            self.source_name,
                            self.linenum + 1,
                            cap
                        );
                    }
                    self.parse_line(&line);
                }
                Err(e) => {
                    // A failed read ends input, as end-of-file would.
                    log::warn!("{}: read error after line {}: {e}", self.source_name, self.linenum);
                    break;
                }
            }
        }
    }

    /// Finished tables plus the sink, for callers that collect diagnostics.
    pub fn finish(self) -> (LesskeyTables, S) {
        log::debug!(
            "{}: {} lines, {} errors, tables cmd={}B edit={}B var={}B",
            self.source_name,
            self.linenum,
            self.errors,
            self.cmd.buf.len(),
            self.edit.buf.len(),
            self.var.buf.len()
        );
        let tables = LesskeyTables {
            cmd: self.cmd.buf.into_bytes(),
            edit: self.edit.buf.into_bytes(),
            var: self.var.buf.into_bytes(),
            errors: self.errors,
        };
        (tables, self.sink)
    }
}

/// Read up to `cap` bytes, stopping after a newline. Returns `false` at EOF.
fn next_line<R: BufRead>(r: &mut R, line: &mut Vec<u8>, cap: usize) -> io::Result<bool> {
    line.clear();
    while line.len() < cap {
        let (used, done) = {
            let avail = match r.fill_buf() {
                Ok(b) => b,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if avail.is_empty() {
                break;
            }
            let window = &avail[..avail.len().min(cap - line.len())];
            match window.iter().position(|&b| b == b'\n') {
                Some(i) => {
                    line.extend_from_slice(&window[..=i]);
                    (i + 1, true)
                }
                None => {
                    line.extend_from_slice(window);
                    (window.len(), false)
                }
            }
        };
        r.consume(used);
        if done {
            break;
        }
    }
    Ok(!line.is_empty())
}

/// Translate `name`'s contents from an already-open reader.
pub fn parse_lesskey_reader<R: BufRead, S: DiagnosticSink>(
    name: &str,
    reader: R,
    options: &ParseOptions,
    sink: S,
) -> (LesskeyTables, S) {
    let mut session = ParseSession::new(name, options.clone(), sink);
    session.parse_reader(reader);
    session.finish()
}

/// Translate a lesskey source file. `None` means the default source;
/// `"-"` means standard input.
///
/// Failing to open the source returns `SourceUnreadable` without
/// reporting anything to `sink`: whether a missing file matters is the
/// caller's decision.
pub fn parse_lesskey<S: DiagnosticSink>(
    infile: Option<&Path>,
    options: &ParseOptions,
    sink: S,
) -> Result<LesskeyTables, LesskeyError> {
    let path = infile.map_or_else(default_source_path, Path::to_path_buf);
    let name = path.display().to_string();

    if path.as_os_str() == "-" {
        log::debug!("reading lesskey source from stdin");
        let stdin = io::stdin();
        let (tables, _) = parse_lesskey_reader(&name, stdin.lock(), options, sink);
        return Ok(tables);
    }

    let f = File::open(&path).map_err(|source| LesskeyError::SourceUnreadable {
        path: path.clone(),
        source,
    })?;
    log::debug!("reading lesskey source {name}");
    let (tables, _) = parse_lesskey_reader(&name, BufReader::new(f), options, sink);
    Ok(tables)
}

/// Outcome of translating one file in a batch.
pub type FileResult = Result<(LesskeyTables, Vec<Diagnostic>), LesskeyError>;

/// Translate independent sources in parallel, each in its own session.
/// Results come back in input order.
pub fn translate_all(paths: &[PathBuf], options: &ParseOptions) -> Vec<(PathBuf, FileResult)> {
    paths
        .par_iter()
        .map(|p| {
            let mut sink = CollectSink::default();
            let res = parse_lesskey(Some(p.as_path()), options, &mut sink)
                .map(|tables| (tables, std::mem::take(&mut sink.diagnostics)));
            (p.clone(), res)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn lines(src: &[u8], cap: usize) -> Vec<Vec<u8>> {
        let mut r = Cursor::new(src);
        let mut out = Vec::new();
        let mut line = Vec::new();
        while next_line(&mut r, &mut line, cap).expect("cursor read") {
            out.push(line.clone());
        }
        out
    }

    #[test]
    fn next_line_keeps_terminators() {
        assert_eq!(
            lines(b"a\nbb\r\n\nc", 100),
            vec![b"a\n".to_vec(), b"bb\r\n".to_vec(), b"\n".to_vec(), b"c".to_vec()]
        );
    }

    #[test]
    fn next_line_splits_long_lines() {
        assert_eq!(
            lines(b"abcdefg\nh\n", 3),
            vec![b"abc".to_vec(), b"def".to_vec(), b"g\n".to_vec(), b"h\n".to_vec()]
        );
    }

    #[test]
    fn active_table_follows_directives() {
        let mut s = ParseSession::new("t", ParseOptions::default(), CollectSink::default());
        assert_eq!(s.current_table().kind, TableKind::Command);
        s.parse_line(b"#line-edit\n");
        assert_eq!(s.current_table().kind, TableKind::EditKey);
        s.parse_line(b"\\kl left\n");
        s.parse_line(b"#env\n");
        assert_eq!(s.current_table().kind, TableKind::Variable);
        s.parse_line(b"left = 1\n");
        assert_eq!(s.errors(), 0);
        let (t, _) = s.finish();
        assert!(t.cmd.is_empty());
        assert!(!t.edit.is_empty());
        assert_eq!(t.var, b"left\0\x811\0".to_vec());
    }

    #[test]
    fn stop_goes_to_active_table_only() {
        let mut s = ParseSession::new("t", ParseOptions::default(), CollectSink::default());
        s.parse_line(b"#env\n");
        s.parse_line(b"#stop\n");
        assert_eq!(s.current(), TableKind::Variable);
        let (t, _) = s.finish();
        assert!(t.cmd.is_empty() && t.edit.is_empty());
        assert_eq!(t.var, vec![0, A_END_LIST]);
    }
}
