// src/bin/lesskey_dump.rs
// Translate a lesskey source and print what the pager would load.
// Usage:
//   cargo run --bin lesskey_dump                       # default source ($LESSKEYIN or ~/.lesskey)
//   cargo run --bin lesskey_dump -- path/to/lesskey    # `-` reads stdin
//   cargo run --bin lesskey_dump -- in.lesskey out.json
//
// Tunables: LESSKEY_LINE_MAX, LESSKEY_PARTIAL=keep|rollback.

use std::{env, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, anyhow};
use lesskeyc::lesskey::{
    LogSink, ParseOptions, default_source_path, parse_lesskey,
    tables::{disasm::listing, save_tables_json},
};

fn run() -> Result<ExitCode> {
    let input = env::args().nth(1).map(PathBuf::from);
    let json_out = env::args().nth(2).map(PathBuf::from);
    let options = ParseOptions::from_env();

    let shown = input.clone().unwrap_or_else(default_source_path);
    let tables = parse_lesskey(input.as_deref(), &options, LogSink)
        .with_context(|| format!("translating {}", shown.display()))?;

    println!(
        "[lesskey_dump] {}: command={}B line-edit={}B env={}B errors={}",
        shown.display(),
        tables.cmd.len(),
        tables.edit.len(),
        tables.var.len(),
        tables.errors
    );

    match listing(&tables) {
        Ok(text) => print!("{text}"),
        // Partial entries left by line errors can make a table unreadable.
        Err(e) if !tables.is_clean() => eprintln!("[lesskey_dump] cannot list tables: {e}"),
        Err(e) => return Err(anyhow!(e)),
    }

    if let Some(out) = json_out {
        save_tables_json(&out, &tables)
            .with_context(|| format!("writing {}", out.display()))?;
        println!("[lesskey_dump] wrote {}", out.display());
    }

    Ok(if tables.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
