// src/lesskey/compile.rs
// Per-line compilers for the three tables.

use super::{
    config::PartialEntry,
    error::{DiagnosticSink, LesskeyError},
    escape::decode,
    line::{is_space, skip_nonspace, skip_space},
    session::ParseSession,
    tables::{
        A_EXTRA, A_INVALID, EV_OK,
        actions::{ActionName, find_action},
    },
};

impl<S: DiagnosticSink> ParseSession<S> {
    /// Decode one token at `pos` into the active table; returns the new cursor.
    fn add_token(&mut self, line: &[u8], pos: usize, translate: bool) -> usize {
        let d = decode(line, pos, translate);
        if let Some(e) = d.error {
            self.error(e);
        }
        self.current_buf().add_str(d.token.as_bytes());
        d.next
    }

    fn abandon_entry(&mut self, start: usize) {
        if self.options().partial == PartialEntry::Rollback {
            self.current_buf().truncate(start);
        }
    }

    /// Resolve an action name in `names`, or report it and use `A_INVALID`.
    pub(crate) fn find_action(&mut self, names: &[ActionName], actname: &[u8]) -> u8 {
        match find_action(names, actname) {
            Some(code) => code,
            None => {
                self.error(LesskeyError::UnknownAction(
                    String::from_utf8_lossy(actname).into_owned(),
                ));
                A_INVALID
            }
        }
    }

    /// `KEY ACTION [EXTRA]`. `line` is cleaned and non-empty.
    pub(crate) fn parse_cmdline(&mut self, line: &[u8], names: &[ActionName]) {
        let start = self.current_buf().len();

        let mut p = 0;
        loop {
            p = self.add_token(line, p, true);
            if p >= line.len() || is_space(line[p]) {
                break;
            }
        }
        self.current_buf().add(0);

        p = skip_space(line, p);
        if p >= line.len() {
            self.error(LesskeyError::MissingAction);
            self.abandon_entry(start);
            return;
        }
        let name_end = skip_nonspace(line, p);
        let action = self.find_action(names, &line[p..name_end]);

        p = skip_space(line, name_end);
        if p >= line.len() {
            self.current_buf().add(action);
            return;
        }

        // Extra sequence: injected verbatim, no special-key translation.
        self.current_buf().add(action | A_EXTRA);
        while p < line.len() {
            p = self.add_token(line, p, false);
        }
        self.current_buf().add(0);
    }

    /// `NAME = VALUE`. `line` is cleaned and non-empty.
    pub(crate) fn parse_varline(&mut self, line: &[u8]) {
        let start = self.current_buf().len();

        let mut p = 0;
        loop {
            p = self.add_token(line, p, false);
            if p >= line.len() || is_space(line[p]) || line[p] == b'=' {
                break;
            }
        }
        self.current_buf().add(0);

        p = skip_space(line, p);
        if line.get(p) != Some(&b'=') {
            self.error(LesskeyError::MissingEquals(
                String::from_utf8_lossy(line).into_owned(),
            ));
            self.abandon_entry(start);
            return;
        }
        self.current_buf().add(EV_OK | A_EXTRA);

        p = skip_space(line, p + 1);
        while p < line.len() {
            p = self.add_token(line, p, false);
        }
        self.current_buf().add(0);
    }
}

#[cfg(test)]
mod tests {
    use crate::lesskey::{
        config::{ParseOptions, PartialEntry},
        error::CollectSink,
        session::ParseSession,
        tables::{TableKind, actions::*},
    };

    fn session(partial: PartialEntry) -> ParseSession<CollectSink> {
        let options = ParseOptions {
            partial,
            ..ParseOptions::default()
        };
        ParseSession::new("test", options, CollectSink::default())
    }

    #[test]
    fn extra_sequence_is_flagged_and_untranslated() {
        let mut s = session(PartialEntry::Keep);
        s.parse_cmdline(b"\\ku forw-line ^K\\ku", CMD_NAMES);
        let (t, _) = s.finish();
        assert_eq!(
            t.cmd,
            vec![
                0x0B, 3, 6, 1, 1, 1, 0,
                A_F_LINE | A_EXTRA,
                0x0B, b'k', b'u', 0
            ]
        );
        assert!(t.is_clean());
    }

    #[test]
    fn escaped_space_stays_in_key() {
        let mut s = session(PartialEntry::Keep);
        s.parse_cmdline(b"a\\ b quit", CMD_NAMES);
        let (t, _) = s.finish();
        assert_eq!(t.cmd, vec![b'a', b' ', b'b', 0, A_QUIT]);
    }

    #[test]
    fn missing_action_rollback_leaves_no_trace() {
        let mut s = session(PartialEntry::Rollback);
        s.parse_cmdline(b"q quit", CMD_NAMES);
        s.parse_cmdline(b"zz", CMD_NAMES);
        let (t, sink) = s.finish();
        assert_eq!(t.cmd, vec![b'q', 0, A_QUIT]);
        assert_eq!(t.errors, 1);
        assert_eq!(sink.messages(), vec!["test: line 0: missing action"]);
    }

    #[test]
    fn variable_without_spaces_around_equals() {
        let mut s = session(PartialEntry::Keep);
        s.switch_to(TableKind::Variable);
        s.parse_varline(b"LESS=-R\\tx");
        let (t, _) = s.finish();
        assert_eq!(t.var, b"LESS\0\x81-R\tx\0".to_vec());
    }

    #[test]
    fn variable_value_may_be_empty() {
        let mut s = session(PartialEntry::Keep);
        s.switch_to(TableKind::Variable);
        s.parse_varline(b"EMPTY =");
        let (t, _) = s.finish();
        assert_eq!(t.var, b"EMPTY\0\x81\0".to_vec());
        assert!(t.is_clean());
    }

    #[test]
    fn missing_equals_rollback() {
        let mut s = session(PartialEntry::Rollback);
        s.switch_to(TableKind::Variable);
        s.parse_varline(b"NAME value");
        let (t, sink) = s.finish();
        assert!(t.var.is_empty());
        assert_eq!(sink.messages(), vec!["test: line 0: missing = in: NAME value"]);
    }
}
