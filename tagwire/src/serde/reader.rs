use crate::error::{Error, Result};
use crate::serde::compact::{assemble, header_len, MAX_COMPACT_LEN};
use crate::serde::{WireType, NULL_TAG};
use crate::serialization::Decode;
use crate::stream::{ReadStream, SliceReader};
use std::mem;
use tracing::debug;

/// Decoding limits. Nested readers inherit their parent's.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Containers nested deeper than this are refused.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Decodes items from a [`ReadStream`].
///
/// A failed `load_*` may have consumed part of the item; the stream is then
/// positioned wherever decoding stopped. Compact integers and floats are
/// the exception: they are read in one call, so a short read consumes nothing.
pub struct Reader<R: ReadStream> {
    r: R,
    config: Config,
    depth: usize,
}

impl<R: ReadStream> Reader<R> {
    pub fn new(r: R) -> Self {
        Self::with_config(r, Config::default())
    }

    pub fn with_config(r: R, config: Config) -> Self {
        Self { r, config, depth: 0 }
    }

    pub fn into_inner(self) -> R {
        self.r
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of unread bytes in the underlying stream.
    pub fn remaining(&self) -> usize {
        self.r.remaining()
    }

    pub fn peek_wire_type(&mut self) -> Result<WireType> {
        let tag = self.r.peek_u8()?;
        Ok(WireType::from_tag(tag))
    }

    pub fn peek_null(&mut self) -> Result<bool> {
        Ok(self.r.peek_u8()? == NULL_TAG)
    }

    /// Consumes the next item iff it is null.
    pub fn take_null(&mut self) -> Result<bool> {
        let is_null = self.peek_null()?;
        if is_null {
            self.r.discard(1)?;
        }
        Ok(is_null)
    }

    /// Decodes anything [`Decode`].
    pub fn load<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Decodes into `dst`. On failure `dst` is left as it was.
    pub fn load_into<T: Decode>(&mut self, dst: &mut T) -> Result<()> {
        *dst = self.load()?;
        Ok(())
    }

    /// Any low nibble other than zero or the null marker reads as `true`.
    pub fn load_bool(&mut self) -> Result<bool> {
        let tag = self.expect_tag(WireType::Bool, None)?;
        self.r.discard(1)?;
        Ok(tag & 0x0f != 0)
    }

    /* Compact integers. The assembled value is truncated to the target width. */

    pub fn load_i8(&mut self) -> Result<i8> {
        let v = self.load_compact(WireType::Int8, None, mem::size_of::<i8>())?;
        Ok(v as i8)
    }
    pub fn load_u8(&mut self) -> Result<u8> {
        let v = self.load_compact(WireType::Uint8, None, mem::size_of::<u8>())?;
        Ok(v as u8)
    }
    pub fn load_i16(&mut self) -> Result<i16> {
        let v = self.load_compact(WireType::Int16, None, mem::size_of::<i16>())?;
        Ok(v as i16)
    }
    pub fn load_u16(&mut self) -> Result<u16> {
        let v = self.load_compact(WireType::Uint16, None, mem::size_of::<u16>())?;
        Ok(v as u16)
    }
    pub fn load_i32(&mut self) -> Result<i32> {
        let v = self.load_compact(WireType::Int32, None, mem::size_of::<i32>())?;
        Ok(v as i32)
    }
    pub fn load_u32(&mut self) -> Result<u32> {
        let v = self.load_compact(WireType::Uint32, None, mem::size_of::<u32>())?;
        Ok(v as u32)
    }
    pub fn load_i64(&mut self) -> Result<i64> {
        let v = self.load_compact(WireType::Int64, None, mem::size_of::<i64>())?;
        Ok(v as i64)
    }
    /// Accepts both the uint64 tag and its pointer alias.
    pub fn load_u64(&mut self) -> Result<u64> {
        self.load_compact(
            WireType::Uint64,
            Some(WireType::Pointer),
            mem::size_of::<u64>(),
        )
    }

    fn load_compact(
        &mut self,
        expected: WireType,
        alias: Option<WireType>,
        width: usize,
    ) -> Result<u64> {
        self.expect_tag(expected, alias)?;
        self.read_compact(width)
    }

    /// Peeks the header, then reads header and payload in one call.
    fn read_compact(&mut self, width: usize) -> Result<u64> {
        let mut buf = [0u8; MAX_COMPACT_LEN];
        let hdr_len = header_len(width);
        self.r.peek(&mut buf[..hdr_len])?;

        let mask = if hdr_len == 1 { buf[0] & 0x0f } else { buf[1] };
        let total = hdr_len + mask.count_ones() as usize;
        self.r.read(&mut buf[..total])?;

        Ok(assemble(mask, &buf[hdr_len..total]))
    }

    /* Floats */

    pub fn load_f32(&mut self) -> Result<f32> {
        let body = self.load_fixed::<4>(WireType::Float)?;
        Ok(f32::from_ne_bytes(body))
    }
    pub fn load_f64(&mut self) -> Result<f64> {
        let body = self.load_fixed::<8>(WireType::Double)?;
        Ok(f64::from_ne_bytes(body))
    }

    fn load_fixed<const LEN: usize>(&mut self, wire: WireType) -> Result<[u8; LEN]> {
        self.expect_tag(wire, None)?;

        let mut buf = [0u8; 1 + mem::size_of::<f64>()];
        self.r.read(&mut buf[..1 + LEN])?;

        let mut body = [0u8; LEN];
        body.copy_from_slice(&buf[1..1 + LEN]);
        Ok(body)
    }

    /* Strings and binary */

    /// Accepts string or binary tags; the payload must be UTF-8.
    pub fn load_string(&mut self) -> Result<String> {
        let body = self.load_dynalen(WireType::String, Some(WireType::Binary))?;
        String::from_utf8(body).map_err(|_| {
            debug!("string payload is not UTF-8");
            Error::InvalidUtf8
        })
    }

    /// Accepts binary or string tags.
    pub fn load_binary(&mut self) -> Result<Vec<u8>> {
        self.load_dynalen(WireType::Binary, Some(WireType::String))
    }

    fn load_dynalen(&mut self, expected: WireType, alias: Option<WireType>) -> Result<Vec<u8>> {
        let len = self.load_compact(expected, alias, mem::size_of::<u32>())? as usize;
        self.check_available(len)?;

        let mut body = vec![0u8; len];
        self.r.read(&mut body)?;
        Ok(body)
    }

    /* Containers */

    /// Reads one list or map block and hands `f` a reader confined to it,
    /// along with the declared member count (entries, for a map).
    /// `f` must consume the block exactly.
    pub fn load_block<T, F>(&mut self, wire: WireType, f: F) -> Result<T>
    where
        F: for<'b> FnOnce(&mut Reader<SliceReader<'b>>, usize) -> Result<T>,
    {
        self.expect_tag(wire, None)?;
        if self.depth >= self.config.max_depth {
            debug!(max = self.config.max_depth, "container nesting too deep");
            return Err(Error::DepthExceeded {
                max: self.config.max_depth,
            });
        }
        self.r.discard(1)?;

        let len = self.load_u32()? as usize;
        let count = self.load_u32()? as usize;
        self.check_available(len)?;

        let mut block = vec![0u8; len];
        self.r.read(&mut block)?;

        let mut nested = Reader {
            r: SliceReader::new(&block),
            config: self.config,
            depth: self.depth + 1,
        };
        let out = f(&mut nested, count)?;

        let leftover = nested.remaining();
        if leftover != 0 {
            debug!(len, leftover, "container block not fully consumed");
            return Err(Error::LengthMismatch {
                declared: len,
                consumed: len - leftover,
            });
        }
        Ok(out)
    }

    /// Skips one complete item of any kind without decoding its content.
    pub fn skip(&mut self) -> Result<()> {
        let tag = self.r.peek_u8()?;
        match WireType::from_tag(tag) {
            WireType::Bool => self.r.discard(1),
            WireType::Int8 | WireType::Uint8 => self.read_compact(1).map(|_| ()),
            WireType::Int16 | WireType::Uint16 => self.read_compact(2).map(|_| ()),
            WireType::Int32 | WireType::Uint32 => self.read_compact(4).map(|_| ()),
            WireType::Int64 | WireType::Uint64 | WireType::Pointer => {
                self.read_compact(8).map(|_| ())
            }
            WireType::Float => self.r.discard(1 + mem::size_of::<f32>()),
            WireType::Double => self.r.discard(1 + mem::size_of::<f64>()),
            WireType::String | WireType::Binary => {
                let len = self.read_compact(4)? as usize;
                self.r.discard(len)
            }
            WireType::List | WireType::Map => {
                self.r.discard(1)?;
                let len = self.load_u32()? as usize;
                let _count = self.load_u32()?;
                self.r.discard(len)
            }
        }
    }

    /// Checks the next tag without consuming it.
    fn expect_tag(&mut self, expected: WireType, alias: Option<WireType>) -> Result<u8> {
        let tag = self.r.peek_u8()?;
        if tag == NULL_TAG {
            debug!(%expected, "null where a value was expected");
            return Err(Error::UnexpectedNull { expected });
        }

        let found = WireType::from_tag(tag);
        if found != expected && Some(found) != alias {
            debug!(%expected, %found, "wire type mismatch");
            return Err(Error::TypeMismatch { expected, found });
        }
        Ok(tag)
    }

    fn check_available(&self, needed: usize) -> Result<()> {
        let available = self.r.remaining();
        if available < needed {
            return Err(Error::ShortRead { needed, available });
        }
        Ok(())
    }
}
