// src/lesskey/tables/mod.rs
pub mod actions;
pub mod disasm;
pub mod io;
pub mod sink;

pub use actions::{A_END_LIST, A_EXTRA, A_INVALID, ActionName, CMD_NAMES, EDIT_NAMES, EV_OK};
pub use io::{load_tables_json_bytes, save_tables_json};
pub use sink::XBuf;

/// Which of the three output tables a line compiles into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Command,
    EditKey,
    Variable,
}

impl TableKind {
    /// Action names bound in this table; `None` for the variable table.
    pub fn names(self) -> Option<&'static [ActionName]> {
        match self {
            TableKind::Command => Some(CMD_NAMES),
            TableKind::EditKey => Some(EDIT_NAMES),
            TableKind::Variable => None,
        }
    }

    #[inline]
    pub fn is_var(self) -> bool {
        self.names().is_none()
    }
}

/// One table under construction.
#[derive(Debug, Clone)]
pub struct Table {
    pub kind: TableKind,
    pub buf: XBuf,
}

impl Table {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            buf: XBuf::new(),
        }
    }
}

/// The three finished byte streams of one translated source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LesskeyTables {
    pub cmd: Vec<u8>,
    pub edit: Vec<u8>,
    pub var: Vec<u8>,
    /// Number of line errors seen; nonzero means the tables are unreliable.
    pub errors: usize,
}

impl LesskeyTables {
    pub fn get(&self, kind: TableKind) -> &[u8] {
        match kind {
            TableKind::Command => &self.cmd,
            TableKind::EditKey => &self.edit,
            TableKind::Variable => &self.var,
        }
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}
