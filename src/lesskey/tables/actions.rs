// src/lesskey/tables/actions.rs

/// Set on an action byte when an extra key sequence follows it.
pub const A_EXTRA: u8 = 0o200;

// Reserved command codes shared with the pager runtime.
pub const A_INVALID: u8 = 100;
pub const A_NOACTION: u8 = 101;
pub const A_UINVALID: u8 = 102;
pub const A_END_LIST: u8 = 103;

// Command codes.
pub const A_B_LINE: u8 = 2;
pub const A_B_SCREEN: u8 = 3;
pub const A_B_SCROLL: u8 = 4;
pub const A_B_SEARCH: u8 = 5;
pub const A_DIGIT: u8 = 6;
pub const A_DISP_OPTION: u8 = 7;
pub const A_DEBUG: u8 = 8;
pub const A_EXAMINE: u8 = 9;
pub const A_FIRSTCMD: u8 = 10;
pub const A_FREPAINT: u8 = 11;
pub const A_F_LINE: u8 = 12;
pub const A_F_SCREEN: u8 = 13;
pub const A_F_SCROLL: u8 = 14;
pub const A_F_SEARCH: u8 = 15;
pub const A_GOEND: u8 = 16;
pub const A_GOLINE: u8 = 17;
pub const A_GOMARK: u8 = 18;
pub const A_HELP: u8 = 19;
pub const A_NEXT_FILE: u8 = 20;
pub const A_PERCENT: u8 = 21;
pub const A_PREV_FILE: u8 = 23;
pub const A_QUIT: u8 = 24;
pub const A_REPAINT: u8 = 25;
pub const A_SETMARK: u8 = 26;
pub const A_SHELL: u8 = 27;
pub const A_STAT: u8 = 28;
pub const A_FF_LINE: u8 = 29;
pub const A_BF_LINE: u8 = 30;
pub const A_VERSION: u8 = 31;
pub const A_VISUAL: u8 = 32;
pub const A_F_WINDOW: u8 = 33;
pub const A_B_WINDOW: u8 = 34;
pub const A_F_BRACKET: u8 = 35;
pub const A_B_BRACKET: u8 = 36;
pub const A_PIPE: u8 = 37;
pub const A_INDEX_FILE: u8 = 38;
pub const A_UNDO_SEARCH: u8 = 39;
pub const A_FF_SCREEN: u8 = 40;
pub const A_LSHIFT: u8 = 41;
pub const A_RSHIFT: u8 = 42;
pub const A_AGAIN_SEARCH: u8 = 43;
pub const A_T_AGAIN_SEARCH: u8 = 44;
pub const A_REVERSE_SEARCH: u8 = 45;
pub const A_T_REVERSE_SEARCH: u8 = 46;
pub const A_OPT_TOGGLE: u8 = 47;
pub const A_F_FOREVER: u8 = 50;
pub const A_REMOVE_FILE: u8 = 52;
pub const A_NEXT_TAG: u8 = 53;
pub const A_PREV_TAG: u8 = 54;
pub const A_FILTER: u8 = 55;
pub const A_F_UNTIL_HILITE: u8 = 56;
pub const A_GOEND_BUF: u8 = 57;
pub const A_LLSHIFT: u8 = 58;
pub const A_RRSHIFT: u8 = 59;
pub const A_CLRMARK: u8 = 62;
pub const A_SETMARKBOT: u8 = 63;
pub const A_CLR_SEARCH: u8 = 70;

// Line-edit codes.
pub const EC_BACKSPACE: u8 = 1;
pub const EC_LINEKILL: u8 = 2;
pub const EC_RIGHT: u8 = 3;
pub const EC_LEFT: u8 = 4;
pub const EC_W_LEFT: u8 = 5;
pub const EC_W_RIGHT: u8 = 6;
pub const EC_INSERT: u8 = 7;
pub const EC_DELETE: u8 = 8;
pub const EC_HOME: u8 = 9;
pub const EC_END: u8 = 10;
pub const EC_W_BACKSPACE: u8 = 11;
pub const EC_W_DELETE: u8 = 12;
pub const EC_UP: u8 = 13;
pub const EC_DOWN: u8 = 14;
pub const EC_EXPAND: u8 = 15;
pub const EC_F_COMPLETE: u8 = 17;
pub const EC_B_COMPLETE: u8 = 18;
pub const EC_LITERAL: u8 = 19;
pub const EC_ABORT: u8 = 20;
pub const EC_UINVALID: u8 = 102;

/// Variable-table marker: "value follows".
pub const EV_OK: u8 = 1;

/// One bindable action name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionName {
    pub name: &'static str,
    pub code: u8,
}

const fn a(name: &'static str, code: u8) -> ActionName {
    ActionName { name, code }
}

/// Pager command names. Order matters only for reverse lookup: the first
/// name listed for a code is its canonical spelling.
pub static CMD_NAMES: &[ActionName] = &[
    a("back-bracket", A_B_BRACKET),
    a("back-line", A_B_LINE),
    a("back-line-force", A_BF_LINE),
    a("back-screen", A_B_SCREEN),
    a("back-scroll", A_B_SCROLL),
    a("back-search", A_B_SEARCH),
    a("back-window", A_B_WINDOW),
    a("clear-mark", A_CLRMARK),
    a("debug", A_DEBUG),
    a("digit", A_DIGIT),
    a("display-flag", A_DISP_OPTION),
    a("display-option", A_DISP_OPTION),
    a("end", A_GOEND),
    a("end-scroll", A_RRSHIFT),
    a("examine", A_EXAMINE),
    a("filter", A_FILTER),
    a("first-cmd", A_FIRSTCMD),
    a("firstcmd", A_FIRSTCMD),
    a("flush-repaint", A_FREPAINT),
    a("forw-bracket", A_F_BRACKET),
    a("forw-forever", A_F_FOREVER),
    a("forw-until-hilite", A_F_UNTIL_HILITE),
    a("forw-line", A_F_LINE),
    a("forw-line-force", A_FF_LINE),
    a("forw-screen", A_F_SCREEN),
    a("forw-screen-force", A_FF_SCREEN),
    a("forw-scroll", A_F_SCROLL),
    a("forw-search", A_F_SEARCH),
    a("forw-window", A_F_WINDOW),
    a("goto-end", A_GOEND),
    a("goto-end-buffered", A_GOEND_BUF),
    a("goto-line", A_GOLINE),
    a("goto-mark", A_GOMARK),
    a("help", A_HELP),
    a("index-file", A_INDEX_FILE),
    a("invalid", A_UINVALID),
    a("left-scroll", A_LSHIFT),
    a("next-file", A_NEXT_FILE),
    a("next-tag", A_NEXT_TAG),
    a("noaction", A_NOACTION),
    a("no-scroll", A_LLSHIFT),
    a("percent", A_PERCENT),
    a("pipe", A_PIPE),
    a("prev-file", A_PREV_FILE),
    a("prev-tag", A_PREV_TAG),
    a("quit", A_QUIT),
    a("remove-file", A_REMOVE_FILE),
    a("repaint", A_REPAINT),
    a("repaint-flush", A_FREPAINT),
    a("repeat-search", A_AGAIN_SEARCH),
    a("repeat-search-all", A_T_AGAIN_SEARCH),
    a("reverse-search", A_REVERSE_SEARCH),
    a("reverse-search-all", A_T_REVERSE_SEARCH),
    a("right-scroll", A_RSHIFT),
    a("set-mark", A_SETMARK),
    a("set-mark-bottom", A_SETMARKBOT),
    a("shell", A_SHELL),
    a("status", A_STAT),
    a("toggle-flag", A_OPT_TOGGLE),
    a("toggle-option", A_OPT_TOGGLE),
    a("undo-hilite", A_UNDO_SEARCH),
    a("clear-search", A_CLR_SEARCH),
    a("version", A_VERSION),
    a("visual", A_VISUAL),
];

/// Line-edit action names.
pub static EDIT_NAMES: &[ActionName] = &[
    a("back-complete", EC_B_COMPLETE),
    a("backspace", EC_BACKSPACE),
    a("delete", EC_DELETE),
    a("down", EC_DOWN),
    a("end", EC_END),
    a("expand", EC_EXPAND),
    a("forw-complete", EC_F_COMPLETE),
    a("home", EC_HOME),
    a("insert", EC_INSERT),
    a("invalid", EC_UINVALID),
    a("kill-line", EC_LINEKILL),
    a("abort", EC_ABORT),
    a("left", EC_LEFT),
    a("literal", EC_LITERAL),
    a("right", EC_RIGHT),
    a("up", EC_UP),
    a("word-backspace", EC_W_BACKSPACE),
    a("word-delete", EC_W_DELETE),
    a("word-left", EC_W_LEFT),
    a("word-right", EC_W_RIGHT),
];

/// Linear, exact, case-sensitive scan; first match wins.
pub fn find_action(names: &[ActionName], wanted: &[u8]) -> Option<u8> {
    names
        .iter()
        .find(|n| n.name.as_bytes() == wanted)
        .map(|n| n.code)
}
