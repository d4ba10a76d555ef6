// src/dev/generator.rs
// Random-but-valid lesskey sources for fuzzing and determinism tests.
// Every generated source translates with zero errors.

use rand::{Rng, seq::IndexedRandom};

use crate::lesskey::tables::{CMD_NAMES, TableKind};

const KEY_ATOMS: &[&str] = &[
    "\\ku", "\\kd", "\\kr", "\\kl", "\\kU", "\\kD", "\\kh", "\\ke", "\\kx", "^K", "\\013", "\\e",
    "\\t", "\\b", "\\101", "\\#", "\\ ", "\\\\", "^X", "^[", "^A",
];

const EXTRA_ATOMS: &[&str] = &["\\ku", "^K", "\\e", "\\n", "\\r", "\\177", "\\ "];

const COMMENTS: &[&str] = &["", " # note", "\t# trailing comment"];

fn plain_char<R: Rng + ?Sized>(rng: &mut R) -> char {
    // Printable ASCII minus blank, '#', '\\', '^' and '='.
    loop {
        let c = rng.random_range(0x21u8..0x7F) as char;
        if !matches!(c, '#' | '\\' | '^' | '=') {
            return c;
        }
    }
}

fn push_seq<R: Rng + ?Sized>(rng: &mut R, out: &mut String, atoms: &[&str], max: usize) {
    let n = rng.random_range(1..=max);
    for _ in 0..n {
        if rng.random_bool(0.3) {
            out.push_str(atoms.choose(rng).copied().unwrap_or("x"));
        } else {
            out.push(plain_char(rng));
        }
    }
}

fn push_binding<R: Rng + ?Sized>(rng: &mut R, out: &mut String, kind: TableKind) {
    let names = kind.names().unwrap_or(CMD_NAMES);
    if rng.random_bool(0.2) {
        out.push_str("  ");
    }
    push_seq(rng, out, KEY_ATOMS, 4);
    out.push(if rng.random_bool(0.5) { ' ' } else { '\t' });
    out.push_str(names.choose(rng).map(|n| n.name).unwrap_or("noaction"));
    if rng.random_bool(0.25) {
        out.push(' ');
        push_seq(rng, out, EXTRA_ATOMS, 3);
    }
    out.push_str(COMMENTS.choose(rng).copied().unwrap_or(""));
}

fn push_var<R: Rng + ?Sized>(rng: &mut R, out: &mut String) {
    let len = rng.random_range(1..8);
    for _ in 0..len {
        out.push(rng.random_range(b'A'..=b'Z') as char);
    }
    out.push_str(if rng.random_bool(0.5) { " = " } else { "=" });
    if rng.random_bool(0.8) {
        push_seq(rng, out, EXTRA_ATOMS, 6);
    }
}

/// Generate at least `target_len` bytes of valid source.
pub fn gen_valid_source<R: Rng + ?Sized>(rng: &mut R, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len + 64);
    let mut kind = TableKind::Command;
    while out.len() < target_len {
        match rng.random_range(0..20) {
            0 => {
                kind = *[TableKind::Command, TableKind::EditKey, TableKind::Variable]
                    .choose(rng)
                    .unwrap_or(&TableKind::Command);
                out.push_str(match kind {
                    TableKind::Command => "#command",
                    TableKind::EditKey => "#line-edit",
                    TableKind::Variable => "#env",
                });
            }
            1 => out.push_str("#stop"),
            2 => out.push_str("# a comment line"),
            3 => {}
            _ if kind == TableKind::Variable => push_var(rng, &mut out),
            _ => push_binding(rng, &mut out, kind),
        }
        out.push_str(if rng.random_bool(0.1) { "\r\n" } else { "\n" });
    }
    out
}
