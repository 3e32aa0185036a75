use bytes::{Buf, Bytes};

/// Checked read operation in [`Bytes`].
///
/// Postgres message body can be truncated by a misbehaving peer, these
/// returns [`None`] instead of panic.
pub trait BytesExt {
    /// Read big endian `i16`.
    fn checked_i16(&mut self) -> Option<i16>;
    /// Read big endian `i32`.
    fn checked_i32(&mut self) -> Option<i32>;
    /// Read big endian `u32`.
    fn checked_u32(&mut self) -> Option<u32>;
    /// Split off `len` bytes.
    fn checked_split(&mut self, len: usize) -> Option<Bytes>;
    /// Read nul terminated string, the nul is consumed but not returned.
    fn checked_nul_bytes(&mut self) -> Option<Bytes>;
}

/// Helper trait to [`Display`][std::fmt::Display] bytes.
pub trait FmtExt {
    /// Lossy [`Display`][std::fmt::Display] bytes.
    fn lossy(&self) -> LossyFmt<'_>;
}

/// Lossy [`Display`][std::fmt::Display] implementation for bytes.
pub struct LossyFmt<'a>(pub &'a [u8]);

impl BytesExt for Bytes {
    fn checked_i16(&mut self) -> Option<i16> {
        (self.remaining() >= size_of::<i16>()).then(|| self.get_i16())
    }

    fn checked_i32(&mut self) -> Option<i32> {
        (self.remaining() >= size_of::<i32>()).then(|| self.get_i32())
    }

    fn checked_u32(&mut self) -> Option<u32> {
        (self.remaining() >= size_of::<u32>()).then(|| self.get_u32())
    }

    fn checked_split(&mut self, len: usize) -> Option<Bytes> {
        (self.remaining() >= len).then(|| self.split_to(len))
    }

    fn checked_nul_bytes(&mut self) -> Option<Bytes> {
        let end = self.iter().position(|e| matches!(e, b'\0'))?;
        let me = self.split_to(end);
        Buf::advance(self, 1); // nul
        Some(me)
    }
}

impl FmtExt for [u8] {
    fn lossy(&self) -> LossyFmt<'_> {
        LossyFmt(self)
    }
}

impl std::fmt::Display for LossyFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{b:02x}")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for LossyFmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "b\"{self}\"")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn checked_reads() {
        let mut b = Bytes::from_static(b"\x00\x02\x00\x00\x00\x03foo\0bar");
        assert_eq!(b.checked_i16(), Some(2));
        assert_eq!(b.checked_i32(), Some(3));
        assert_eq!(b.checked_nul_bytes().as_deref(), Some(&b"foo"[..]));
        assert_eq!(b.checked_split(4), None);
        assert_eq!(b.checked_nul_bytes(), None);
        assert_eq!(b.checked_split(3).as_deref(), Some(&b"bar"[..]));
        assert_eq!(b.checked_u32(), None);
    }

    #[test]
    fn lossy_display() {
        assert_eq!(b"a b\n\x01"[..].lossy().to_string(), "a b\\x0a\\x01");
    }
}
