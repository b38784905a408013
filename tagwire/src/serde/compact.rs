use crate::serde::WireType;

/// Longest compact integer: tag, mask byte, eight payload bytes.
pub const MAX_COMPACT_LEN: usize = 10;

/// Bytes before the payload: the tag, plus the mask byte for 8-byte widths.
pub fn header_len(width: usize) -> usize {
    if width <= 4 {
        1
    } else {
        2
    }
}

/// Bit `i` set iff byte `i` of the low `width` bytes of `v` is non-zero.
pub fn presence_mask(v: u64, width: usize) -> u8 {
    let mut mask = 0u8;
    for i in 0..width {
        if (v >> (i * 8)) & 0xff != 0 {
            mask |= 1 << i;
        }
    }
    mask
}

/// A fully laid out compact integer, ready to be written in one call.
pub struct CompactInt {
    buf: [u8; MAX_COMPACT_LEN],
    len: usize,
}

impl CompactInt {
    /// `v` must already be zero- or sign-extended from a `width`-byte integer;
    /// only its low `width` bytes are looked at.
    pub fn new(wire: WireType, v: u64, width: usize) -> Self {
        let mask = presence_mask(v, width);
        let mut buf = [0u8; MAX_COMPACT_LEN];
        let mut len = 0;

        if width <= 4 {
            buf[0] = wire.tag(mask);
            len += 1;
        } else {
            buf[0] = wire.tag(0);
            buf[1] = mask;
            len += 2;
        }

        for i in 0..width {
            let byte = (v >> (i * 8)) as u8;
            if byte != 0 {
                buf[len] = byte;
                len += 1;
            }
        }

        Self { buf, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// ORs each payload byte into the position named by the next set mask bit.
pub fn assemble(mask: u8, payload: &[u8]) -> u64 {
    let mut v = 0u64;
    let mut bytes = payload.iter();
    for i in 0..8 {
        if mask & (1 << i) != 0 {
            match bytes.next() {
                Some(byte) => v |= (*byte as u64) << (i * 8),
                None => break,
            }
        }
    }
    v
}
