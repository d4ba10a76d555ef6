// src/lesskey/tables/sink.rs

/// Append-only growable byte buffer backing one output table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XBuf {
    data: Vec<u8>,
}

impl XBuf {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, b: u8) {
        self.data.push(b);
    }

    /// Append `s` up to (not including) its first NUL.
    #[inline]
    pub fn add_str(&mut self, s: &[u8]) {
        let end = s.iter().position(|&b| b == 0).unwrap_or(s.len());
        self.data.extend_from_slice(&s[..end]);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drop everything written after `len`.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::XBuf;

    #[test]
    fn add_str_stops_at_nul() {
        let mut b = XBuf::new();
        b.add_str(&[0x0B, 3, 6, 1, 1, 1, 0]);
        b.add_str(b"");
        b.add_str(&[0, b'x']);
        assert_eq!(b.as_bytes(), &[0x0B, 3, 6, 1, 1, 1]);
        b.add(0);
        assert_eq!(b.len(), 7);
    }
}
