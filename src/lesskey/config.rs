// src/lesskey/config.rs
use std::{ffi::OsString, path::PathBuf};

/// Default name of the per-user lesskey source.
pub const DEF_LESSKEYINFILE: &str = ".lesskey";

/// Line buffer size of the original reader; longer lines are split.
pub const DEFAULT_LINE_MAX: usize = 1024;

/// What to do with the bytes of an entry whose line failed halfway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialEntry {
    /// Leave the key/name bytes already written (matches the pager's
    /// historical tables byte for byte).
    #[default]
    Keep,
    /// Truncate the table back to where the entry started.
    Rollback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reader buffer size, terminator included: at most `line_max - 1`
    /// bytes are handed to the parser per line.
    pub line_max: usize,
    pub partial: PartialEntry,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            line_max: DEFAULT_LINE_MAX,
            partial: PartialEntry::Keep,
        }
    }
}

fn env_usize(get: &impl Fn(&str) -> Option<OsString>, name: &str, default: usize) -> usize {
    get(name)
        .and_then(|s| s.into_string().ok())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

impl ParseOptions {
    /// Defaults, overridden by `LESSKEY_LINE_MAX` and
    /// `LESSKEY_PARTIAL=keep|rollback`.
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var_os(name))
    }

    /// `from_env` over an arbitrary variable lookup.
    pub fn from_env_with(get: impl Fn(&str) -> Option<OsString>) -> Self {
        let partial_var = get("LESSKEY_PARTIAL");
        let partial = match partial_var.as_ref().and_then(|v| v.to_str()) {
            Some("rollback") => PartialEntry::Rollback,
            Some("keep") => PartialEntry::Keep,
            None if partial_var.is_none() => PartialEntry::Keep,
            other => {
                log::warn!("LESSKEY_PARTIAL={other:?} not understood; using keep");
                PartialEntry::Keep
            }
        };
        Self {
            line_max: env_usize(&get, "LESSKEY_LINE_MAX", DEFAULT_LINE_MAX).max(2),
            partial,
        }
    }

    /// Longest chunk handed to the parser as one line.
    #[inline]
    pub(crate) fn line_cap(&self) -> usize {
        self.line_max.saturating_sub(1).max(1)
    }
}

/// Where to look when no source is named: `$LESSKEYIN`, else
/// `$HOME/.lesskey`, else `.lesskey` in the current directory.
pub fn default_source_path() -> PathBuf {
    default_source_path_with(|name| std::env::var_os(name))
}

/// `default_source_path` over an arbitrary variable lookup. Empty
/// variables count as unset.
pub fn default_source_path_with(get: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    let get = |name: &str| get(name).filter(|v| !v.is_empty());
    if let Some(p) = get("LESSKEYIN") {
        return PathBuf::from(p);
    }
    match get("HOME") {
        Some(home) => PathBuf::from(home).join(DEF_LESSKEYINFILE),
        None => PathBuf::from(DEF_LESSKEYINFILE),
    }
}
