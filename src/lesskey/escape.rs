// src/lesskey/escape.rs
// Decoder for one character of a key sequence, variable name or value.
//
// Grammar at the cursor, first match wins:
//   \ooo      up to three octal digits
//   \b \e \n \r \t
//   \kX       special key (translate mode only)
//   \X        X literally
//   ^X        CONTROL(X)
//   X         X

use super::error::LesskeyError;

#[inline]
pub const fn control(c: u8) -> u8 {
    c & 0o37
}

pub const ESC: u8 = control(b'[');

/// Marker byte introducing a special-key record. Numerically equal to ^K.
pub const SK_SPECIAL_KEY: u8 = control(b'K');

/// Key ids carried in the second byte of a special-key record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SpecialKey {
    RightArrow = 1,
    LeftArrow = 2,
    UpArrow = 3,
    DownArrow = 4,
    PageUp = 5,
    PageDown = 6,
    Home = 7,
    End = 8,
    Delete = 9,
    ControlK = 40,
}

impl SpecialKey {
    /// Letter following `\k`.
    pub fn from_letter(c: u8) -> Option<Self> {
        use SpecialKey::*;
        Some(match c {
            b'u' => UpArrow,
            b'd' => DownArrow,
            b'r' => RightArrow,
            b'l' => LeftArrow,
            b'U' => PageUp,
            b'D' => PageDown,
            b'h' => Home,
            b'e' => End,
            b'x' => Delete,
            _ => return None,
        })
    }

    pub fn from_id(id: u8) -> Option<Self> {
        use SpecialKey::*;
        [
            RightArrow, LeftArrow, UpArrow, DownArrow, PageUp, PageDown, Home, End, Delete,
            ControlK,
        ]
        .into_iter()
        .find(|k| *k as u8 == id)
    }

    /// Source spelling of this key, as accepted by the decoder.
    pub fn escape(self) -> &'static str {
        use SpecialKey::*;
        match self {
            UpArrow => "\\ku",
            DownArrow => "\\kd",
            RightArrow => "\\kr",
            LeftArrow => "\\kl",
            PageUp => "\\kU",
            PageDown => "\\kD",
            Home => "\\kh",
            End => "\\ke",
            Delete => "\\kx",
            ControlK => "^K",
        }
    }
}

pub const SPECIAL_KEY_RECORD_LEN: usize = 7;

/// One decoded character: a literal byte, a special-key record, or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    buf: [u8; SPECIAL_KEY_RECORD_LEN],
    len: u8,
}

impl Token {
    pub const EMPTY: Token = Token {
        buf: [0; SPECIAL_KEY_RECORD_LEN],
        len: 0,
    };

    pub const fn byte(b: u8) -> Self {
        let mut buf = [0; SPECIAL_KEY_RECORD_LEN];
        buf[0] = b;
        Token { buf, len: 1 }
    }

    /// `[marker, key, 6, 1, 1, 1, NUL]`
    pub const fn special(key: SpecialKey) -> Self {
        Token {
            buf: [SK_SPECIAL_KEY, key as u8, 6, 1, 1, 1, 0],
            len: SPECIAL_KEY_RECORD_LEN as u8,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Literal byte, re-encoded as the ^K record when it would collide with
/// the special-key marker.
#[inline]
fn literal(b: u8, translate: bool) -> Token {
    if translate && b == SK_SPECIAL_KEY {
        Token::special(SpecialKey::ControlK)
    } else {
        Token::byte(b)
    }
}

#[inline]
fn is_octal(b: u8) -> bool {
    (b'0'..=b'7').contains(&b)
}

/// Result of decoding one character.
#[derive(Debug)]
pub struct Decoded {
    pub token: Token,
    /// Cursor just past the consumed source bytes.
    pub next: usize,
    pub error: Option<LesskeyError>,
}

impl Decoded {
    #[inline]
    fn ok(token: Token, next: usize) -> Self {
        Self {
            token,
            next,
            error: None,
        }
    }
}

/// Decode the token starting at `line[pos]`. `pos` must be in bounds.
/// `translate` is set only for the key part of a command line.
pub fn decode(line: &[u8], pos: usize, translate: bool) -> Decoded {
    debug_assert!(pos < line.len());
    let at = |i: usize| line.get(i).copied();

    match line[pos] {
        b'\\' => {
            let p = pos + 1;
            let Some(c) = at(p) else {
                // Trailing backslash escapes nothing.
                return Decoded::ok(Token::EMPTY, p);
            };
            match c {
                b'0'..=b'7' => {
                    let mut v: u8 = 0;
                    let mut q = p;
                    while q < p + 3 && at(q).is_some_and(is_octal) {
                        v = v.wrapping_mul(8).wrapping_add(line[q] - b'0');
                        q += 1;
                    }
                    Decoded::ok(literal(v, translate), q)
                }
                b'b' => Decoded::ok(Token::byte(0x08), p + 1),
                b'e' => Decoded::ok(Token::byte(ESC), p + 1),
                b'n' => Decoded::ok(Token::byte(b'\n'), p + 1),
                b'r' => Decoded::ok(Token::byte(b'\r'), p + 1),
                b't' => Decoded::ok(Token::byte(b'\t'), p + 1),
                b'k' if translate => {
                    let letter = at(p + 1);
                    match letter.and_then(SpecialKey::from_letter) {
                        Some(key) => Decoded::ok(Token::special(key), p + 2),
                        None => Decoded {
                            token: Token::EMPTY,
                            // Step past the letter, or stop at end of line.
                            next: (p + 2).min(line.len()),
                            error: Some(LesskeyError::IllegalEscapeSequence(
                                letter.map(|b| char::from(b).to_string()).unwrap_or_default(),
                            )),
                        },
                    }
                }
                other => Decoded::ok(literal(other, translate), p + 1),
            }
        }
        b'^' => match at(pos + 1) {
            Some(c) => Decoded::ok(literal(control(c), translate), pos + 2),
            None => Decoded::ok(Token::byte(b'^'), pos + 1),
        },
        c => Decoded::ok(literal(c, translate), pos + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(src: &str, translate: bool) -> (Vec<u8>, usize) {
        let d = decode(src.as_bytes(), 0, translate);
        assert!(d.error.is_none(), "unexpected error for {src:?}");
        (d.token.as_bytes().to_vec(), d.next)
    }

    #[test]
    fn letter_escapes_ignore_translate() {
        for t in [false, true] {
            assert_eq!(one("\\t", t), (vec![0x09], 2));
            assert_eq!(one("\\b", t), (vec![0x08], 2));
            assert_eq!(one("\\e", t), (vec![0x1B], 2));
            assert_eq!(one("\\n", t), (vec![b'\n'], 2));
            assert_eq!(one("\\r", t), (vec![b'\r'], 2));
        }
    }

    #[test]
    fn octal_takes_at_most_three_digits() {
        assert_eq!(one("\\101", false), (vec![0x41], 4));
        assert_eq!(one("\\1014", false), (vec![0x41], 4));
        assert_eq!(one("\\7x", false), (vec![7], 2));
        assert_eq!(one("\\18", false), (vec![1], 2));
        // 0o777 wraps to a byte.
        assert_eq!(one("\\777", false), (vec![0xFF], 4));
    }

    #[test]
    fn control_k_collision_only_in_translate_mode() {
        let rec = Token::special(SpecialKey::ControlK).as_bytes().to_vec();
        assert_eq!(rec, vec![SK_SPECIAL_KEY, 40, 6, 1, 1, 1, 0]);
        for src in ["^K", "^k", "\\013", "\x0b", "\\\x0b"] {
            assert_eq!(one(src, true).0, rec, "{src:?}");
            assert_eq!(one(src, false).0, vec![0x0B], "{src:?}");
        }
    }

    #[test]
    fn special_keys_in_translate_mode() {
        assert_eq!(one("\\ku", true), (vec![SK_SPECIAL_KEY, 3, 6, 1, 1, 1, 0], 3));
        assert_eq!(one("\\kD", true).0[1], SpecialKey::PageDown as u8);
        assert_eq!(one("\\kx", true).0[1], SpecialKey::Delete as u8);
    }

    #[test]
    fn backslash_k_is_literal_without_translate() {
        // Only the `k` is consumed; `u` is decoded on its own later.
        assert_eq!(one("\\ku", false), (vec![b'k'], 2));
    }

    #[test]
    fn bad_special_key_letter_reports_and_advances() {
        let d = decode(b"\\kz rest", 0, true);
        assert!(d.token.is_empty());
        assert_eq!(d.next, 3);
        assert_eq!(
            d.error.map(|e| e.to_string()).as_deref(),
            Some("illegal escape sequence \\kz")
        );
    }

    #[test]
    fn caret_and_plain() {
        assert_eq!(one("^A", false), (vec![1], 2));
        assert_eq!(one("^[", true), (vec![ESC], 2));
        assert_eq!(one("q", true), (vec![b'q'], 1));
        assert_eq!(one("\\#", true), (vec![b'#'], 2));
    }

    #[test]
    fn dangling_escape_chars_at_end_of_line() {
        assert_eq!(one("\\", true), (vec![], 1));
        assert_eq!(one("^", true), (vec![b'^'], 1));
        let d = decode(b"\\k", 0, true);
        assert!(d.error.is_some());
        assert_eq!(d.next, 2);
    }

    #[test]
    fn decodes_from_cursor() {
        let d = decode(b"ab\\tc", 2, false);
        assert_eq!(d.token.as_bytes(), &[0x09]);
        assert_eq!(d.next, 4);
    }
}
