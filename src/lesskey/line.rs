// src/lesskey/line.rs
// Raw-line handling: control directives, whitespace, comments.

use super::tables::TableKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Make the given table active.
    Switch(TableKind),
    /// Close out the active table.
    Stop,
}

const DIRECTIVES: &[(&[u8], Directive)] = &[
    (b"#line-edit", Directive::Switch(TableKind::EditKey)),
    (b"#command", Directive::Switch(TableKind::Command)),
    (b"#env", Directive::Switch(TableKind::Variable)),
    (b"#stop", Directive::Stop),
];

/// Plain prefix match against the uncleaned line; anything after the
/// directive word is ignored.
pub fn directive(raw: &[u8]) -> Option<Directive> {
    DIRECTIVES
        .iter()
        .find(|(prefix, _)| raw.starts_with(prefix))
        .map(|&(_, d)| d)
}

#[inline]
pub fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Index of the first non-blank byte at or after `pos`.
#[inline]
pub fn skip_space(s: &[u8], mut pos: usize) -> usize {
    while pos < s.len() && is_space(s[pos]) {
        pos += 1;
    }
    pos
}

/// Index of the first blank byte at or after `pos`.
#[inline]
pub fn skip_nonspace(s: &[u8], mut pos: usize) -> usize {
    while pos < s.len() && !is_space(s[pos]) {
        pos += 1;
    }
    pos
}

/// Strip leading blanks, then cut at the line terminator or at a `#` not
/// directly preceded by a backslash. A NUL byte also ends the line.
pub fn clean_line(raw: &[u8]) -> &[u8] {
    let s = &raw[skip_space(raw, 0)..];
    let mut end = 0;
    while end < s.len() {
        match s[end] {
            0 | b'\n' | b'\r' => break,
            b'#' if end == 0 || s[end - 1] != b'\\' => break,
            _ => end += 1,
        }
    }
    &s[..end]
}
