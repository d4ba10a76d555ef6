// src/lesskey/tables/disasm.rs
// Reader for compiled tables: walks the byte layout back into entries and
// prints them in source syntax.

use std::{fmt::Write as _, sync::LazyLock};

use hashbrown::HashMap;

use super::{
    A_END_LIST, A_EXTRA, ActionName, CMD_NAMES, EDIT_NAMES, EV_OK, LesskeyTables, TableKind,
};
use crate::lesskey::escape::{ESC, SK_SPECIAL_KEY, SPECIAL_KEY_RECORD_LEN, SpecialKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<u8>,
    /// Action code with `A_EXTRA` masked off.
    pub action: u8,
    pub extra: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Binding(Binding),
    Var(EnvVar),
    /// `#stop` marker.
    EndList,
}

#[inline]
fn take_cstr<'a>(buf: &mut &'a [u8], what: &str, base: usize) -> Result<&'a [u8], String> {
    let Some(i) = buf.iter().position(|&b| b == 0) else {
        return Err(format!(
            "unterminated {what} at offset {}",
            base - buf.len()
        ));
    };
    let s = &buf[..i];
    *buf = &buf[i + 1..];
    Ok(s)
}

#[inline]
fn take_u8(buf: &mut &[u8], what: &str, base: usize) -> Result<u8, String> {
    let Some((&b, rest)) = buf.split_first() else {
        return Err(format!("missing {what} at offset {base}"));
    };
    *buf = rest;
    Ok(b)
}

/// Split one table into its entries.
pub fn read_table(kind: TableKind, mut data: &[u8]) -> Result<Vec<Entry>, String> {
    let total = data.len();
    let mut out = Vec::new();
    while !data.is_empty() {
        let head = take_cstr(&mut data, "key sequence", total)?;
        let code = take_u8(&mut data, "action byte", total)?;
        if head.is_empty() && code == A_END_LIST {
            out.push(Entry::EndList);
            continue;
        }
        if kind.is_var() {
            if code != EV_OK | A_EXTRA {
                return Err(format!(
                    "bad variable marker 0x{code:02X} at offset {}",
                    total - data.len() - 1
                ));
            }
            let value = take_cstr(&mut data, "variable value", total)?;
            out.push(Entry::Var(EnvVar {
                name: head.to_vec(),
                value: value.to_vec(),
            }));
        } else {
            let extra = if code & A_EXTRA != 0 {
                Some(take_cstr(&mut data, "extra sequence", total)?.to_vec())
            } else {
                None
            };
            out.push(Entry::Binding(Binding {
                keys: head.to_vec(),
                action: code & !A_EXTRA,
                extra,
            }));
        }
    }
    Ok(out)
}

fn reverse(names: &'static [ActionName]) -> HashMap<u8, &'static str> {
    let mut map = HashMap::with_capacity(names.len());
    for n in names {
        map.entry(n.code).or_insert(n.name);
    }
    map
}

static CMD_BY_CODE: LazyLock<HashMap<u8, &'static str>> = LazyLock::new(|| reverse(CMD_NAMES));
static EDIT_BY_CODE: LazyLock<HashMap<u8, &'static str>> = LazyLock::new(|| reverse(EDIT_NAMES));

/// Canonical (first listed) name of `code` in `kind`'s action list.
pub fn action_name(kind: TableKind, code: u8) -> Option<&'static str> {
    match kind {
        TableKind::Command => CMD_BY_CODE.get(&code).copied(),
        TableKind::EditKey => EDIT_BY_CODE.get(&code).copied(),
        TableKind::Variable => None,
    }
}

/// Source spelling of a byte sequence. With `translate`, special-key
/// records are recognized and printed as `\kX`.
pub fn render_bytes(bytes: &[u8], translate: bool) -> String {
    let mut s = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if translate && b == SK_SPECIAL_KEY {
            let rec = &bytes[i..bytes.len().min(i + SPECIAL_KEY_RECORD_LEN - 1)];
            if let [_, id, 6, 1, 1, 1] = rec
                && let Some(key) = SpecialKey::from_id(*id)
            {
                s.push_str(key.escape());
                i += rec.len();
                continue;
            }
        }
        match b {
            0x08 => s.push_str("\\b"),
            ESC => s.push_str("\\e"),
            b'\n' => s.push_str("\\n"),
            b'\r' => s.push_str("\\r"),
            b'\t' => s.push_str("\\t"),
            b'\\' | b'^' | b'#' | b' ' | b'=' => {
                s.push('\\');
                s.push(b as char);
            }
            0x01..=0x1F => {
                s.push('^');
                s.push((b | 0x40) as char);
            }
            0x21..=0x7E => s.push(b as char),
            _ => {
                let _ = write!(s, "\\{b:03o}");
            }
        }
        i += 1;
    }
    s
}

/// Like `render_bytes`, but a field that holds nothing is spelled `\0`
/// so it still occupies its column when read back.
fn render_field(bytes: &[u8], translate: bool) -> String {
    if bytes.is_empty() {
        "\\0".to_owned()
    } else {
        render_bytes(bytes, translate)
    }
}

fn render_entries(out: &mut String, kind: TableKind, entries: &[Entry]) {
    for e in entries {
        match e {
            Entry::EndList => out.push_str("#stop\n"),
            Entry::Var(v) => {
                let _ = writeln!(
                    out,
                    "{} = {}",
                    render_field(&v.name, false),
                    render_bytes(&v.value, false)
                );
            }
            Entry::Binding(b) => {
                let name = action_name(kind, b.action)
                    .map(str::to_owned)
                    .unwrap_or_else(|| format!("<{}>", b.action));
                let _ = write!(out, "{}\t{}", render_field(&b.keys, true), name);
                if let Some(extra) = &b.extra {
                    let _ = write!(out, " {}", render_field(extra, false));
                }
                out.push('\n');
            }
        }
    }
}

/// Print all three tables as lesskey source.
pub fn listing(tables: &LesskeyTables) -> Result<String, String> {
    let mut out = String::new();
    for (kind, directive) in [
        (TableKind::Command, "#command"),
        (TableKind::EditKey, "#line-edit"),
        (TableKind::Variable, "#env"),
    ] {
        let bytes = tables.get(kind);
        if bytes.is_empty() {
            continue;
        }
        let entries = read_table(kind, bytes).map_err(|e| format!("{directive} table: {e}"))?;
        out.push_str(directive);
        out.push('\n');
        render_entries(&mut out, kind, &entries);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesskey::tables::actions::{A_QUIT, EC_END};

    #[test]
    fn reads_bindings_extras_and_stop() {
        let data = [b'q', 0, A_QUIT, b'x', 0, A_QUIT | A_EXTRA, b'y', 0, 0, A_END_LIST];
        let entries = read_table(TableKind::Command, &data).expect("well-formed");
        assert_eq!(
            entries,
            vec![
                Entry::Binding(Binding {
                    keys: b"q".to_vec(),
                    action: A_QUIT,
                    extra: None
                }),
                Entry::Binding(Binding {
                    keys: b"x".to_vec(),
                    action: A_QUIT,
                    extra: Some(b"y".to_vec())
                }),
                Entry::EndList,
            ]
        );
    }

    #[test]
    fn truncated_tables_are_rejected() {
        assert!(read_table(TableKind::Command, b"q").is_err());
        assert!(read_table(TableKind::Command, b"q\0").is_err());
        assert!(read_table(TableKind::Variable, b"A\0\x05v\0").is_err());
    }

    #[test]
    fn reverse_lookup_prefers_first_synonym() {
        assert_eq!(action_name(TableKind::Command, A_QUIT), Some("quit"));
        assert_eq!(action_name(TableKind::Command, 7), Some("display-flag"));
        assert_eq!(action_name(TableKind::EditKey, EC_END), Some("end"));
        assert_eq!(action_name(TableKind::Variable, 1), None);
    }

    #[test]
    fn renders_escapes() {
        let up = [SK_SPECIAL_KEY, 3, 6, 1, 1, 1];
        assert_eq!(render_bytes(&up, true), "\\ku");
        assert_eq!(render_bytes(&up, false), "^K^C^F^A^A^A");
        assert_eq!(render_bytes(b"a b#\x1b\xe9", false), "a\\ b\\#\\e\\351");
        assert_eq!(render_field(b"", true), "\\0");
        assert_eq!(render_field(b"q", true), "q");
    }
}
