// src/lesskey/tables/io.rs
// JSON dump of translated tables, for inspection and golden files.
use std::io::{BufWriter, Write};

use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};

use super::LesskeyTables;

#[serde_as]
#[derive(Serialize, Deserialize)]
struct TablesDisk {
    #[serde_as(as = "Hex")]
    command: Vec<u8>,
    #[serde_as(as = "Hex")]
    line_edit: Vec<u8>,
    #[serde_as(as = "Hex")]
    env: Vec<u8>,
    errors: usize,
}

impl From<&LesskeyTables> for TablesDisk {
    fn from(t: &LesskeyTables) -> Self {
        Self {
            command: t.cmd.clone(),
            line_edit: t.edit.clone(),
            env: t.var.clone(),
            errors: t.errors,
        }
    }
}

impl TablesDisk {
    fn into_tables(self) -> LesskeyTables {
        LesskeyTables {
            cmd: self.command,
            edit: self.line_edit,
            var: self.env,
            errors: self.errors,
        }
    }
}

pub fn save_tables_json(path: &std::path::Path, t: &LesskeyTables) -> std::io::Result<()> {
    let f = std::fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &TablesDisk::from(t))?;
    w.write_all(b"\n")?;
    w.flush()?;
    log::debug!("saved tables to {}", path.display());
    Ok(())
}

pub fn tables_json_string(t: &LesskeyTables) -> Result<String, String> {
    serde_json::to_string_pretty(&TablesDisk::from(t))
        .map_err(|e| format!("Failed to serialize tables JSON: {e}"))
}

pub fn load_tables_json_bytes(data: &[u8]) -> Result<LesskeyTables, String> {
    serde_json::from_slice::<TablesDisk>(data)
        .map(|d| d.into_tables())
        .map_err(|e| format!("Failed to parse tables JSON: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_hex_strings() {
        let t = LesskeyTables {
            cmd: vec![b'q', 0, 24],
            edit: vec![],
            var: vec![0xFF],
            errors: 2,
        };
        let s = tables_json_string(&t).expect("serialize");
        assert!(s.contains("\"command\": \"710018\""), "{s}");
        assert!(s.contains("\"env\": \"ff\""), "{s}");
        assert_eq!(load_tables_json_bytes(s.as_bytes()).expect("parse"), t);
        assert!(load_tables_json_bytes(b"{\"command\": \"zz\"}").is_err());
    }
}
