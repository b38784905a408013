use crate::error::{Error, Result};
use crate::serde::compact::CompactInt;
use crate::serde::{WireType, BOOL_TRUE, NULL_TAG};
use crate::serialization::Encode;
use crate::stream::{MemStream, ReadStream, WriteStream};
use derive_more::{Deref, DerefMut, From};
use std::mem;

/// Encodes items onto a [`WriteStream`].
///
/// Every `save_*` either writes one complete item or fails; a failure midway
/// through a composite item leaves whatever was already written in place.
#[derive(From, Deref, DerefMut)]
pub struct Writer<W: WriteStream> {
    w: W,
}

impl<W: WriteStream> Writer<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }

    pub fn into_inner(self) -> W {
        self.w
    }

    /// Encodes anything [`Encode`].
    pub fn save<T: Encode + ?Sized>(&mut self, v: &T) -> Result<()> {
        v.encode(self)
    }

    pub fn save_null(&mut self) -> Result<()> {
        self.w.write_u8(NULL_TAG)
    }

    pub fn save_bool(&mut self, v: bool) -> Result<()> {
        let low = if v { BOOL_TRUE } else { 0 };
        self.w.write_u8(WireType::Bool.tag(low))
    }

    /* Compact integers. Signed values are sign-extended to u64; only their
     * low `size_of` bytes are written. */

    pub fn save_i8(&mut self, v: i8) -> Result<()> {
        self.save_compact(WireType::Int8, v as u64, mem::size_of::<i8>())
    }
    pub fn save_u8(&mut self, v: u8) -> Result<()> {
        self.save_compact(WireType::Uint8, v as u64, mem::size_of::<u8>())
    }
    pub fn save_i16(&mut self, v: i16) -> Result<()> {
        self.save_compact(WireType::Int16, v as u64, mem::size_of::<i16>())
    }
    pub fn save_u16(&mut self, v: u16) -> Result<()> {
        self.save_compact(WireType::Uint16, v as u64, mem::size_of::<u16>())
    }
    pub fn save_i32(&mut self, v: i32) -> Result<()> {
        self.save_compact(WireType::Int32, v as u64, mem::size_of::<i32>())
    }
    pub fn save_u32(&mut self, v: u32) -> Result<()> {
        self.save_compact(WireType::Uint32, v as u64, mem::size_of::<u32>())
    }
    pub fn save_i64(&mut self, v: i64) -> Result<()> {
        self.save_compact(WireType::Int64, v as u64, mem::size_of::<i64>())
    }
    pub fn save_u64(&mut self, v: u64) -> Result<()> {
        self.save_compact(WireType::Uint64, v, mem::size_of::<u64>())
    }
    /// A `u64` under the pointer alias tag.
    pub fn save_pointer(&mut self, v: u64) -> Result<()> {
        self.save_compact(WireType::Pointer, v, mem::size_of::<u64>())
    }

    fn save_compact(&mut self, wire: WireType, v: u64, width: usize) -> Result<()> {
        let compact = CompactInt::new(wire, v, width);
        self.w.write(compact.as_bytes())
    }

    /* Floats are never compacted. */

    pub fn save_f32(&mut self, v: f32) -> Result<()> {
        self.save_fixed(WireType::Float, v.to_ne_bytes())
    }
    pub fn save_f64(&mut self, v: f64) -> Result<()> {
        self.save_fixed(WireType::Double, v.to_ne_bytes())
    }

    fn save_fixed<const LEN: usize>(&mut self, wire: WireType, body: [u8; LEN]) -> Result<()> {
        self.w.write_u8(wire.tag(0))?;
        self.w.write(&body)
    }

    /* Strings and binary: compact u32 length sharing the tag, then the bytes. */

    pub fn save_str(&mut self, v: &str) -> Result<()> {
        self.save_dynalen(WireType::String, v.as_bytes())
    }
    pub fn save_binary(&mut self, v: &[u8]) -> Result<()> {
        self.save_dynalen(WireType::Binary, v)
    }

    fn save_dynalen(&mut self, wire: WireType, body: &[u8]) -> Result<()> {
        let len = u32::try_from(body.len()).map_err(|_| Error::OutOfRange {
            what: "string length",
        })?;
        self.save_compact(wire, len as u64, mem::size_of::<u32>())?;
        self.w.write(body)
    }

    /* Containers */

    pub fn save_seq<'a, T, I>(&mut self, items: I) -> Result<()>
    where
        T: Encode + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut scratch = Writer::new(MemStream::new());
        let mut count = 0usize;
        for item in items {
            scratch.save(item)?;
            count += 1;
        }
        self.save_block(WireType::List, scratch.into_inner(), count)
    }

    pub fn save_map<'a, K, V, I>(&mut self, entries: I) -> Result<()>
    where
        K: Encode + ?Sized + 'a,
        V: Encode + ?Sized + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        let mut scratch = Writer::new(MemStream::new());
        let mut count = 0usize;
        for (k, v) in entries {
            scratch.save(k)?;
            scratch.save(v)?;
            count += 1;
        }
        self.save_block(WireType::Map, scratch.into_inner(), count)
    }

    fn save_block(&mut self, wire: WireType, body: MemStream, count: usize) -> Result<()> {
        let body_len = u32::try_from(body.remaining()).map_err(|_| Error::OutOfRange {
            what: "container body length",
        })?;
        let count = u32::try_from(count).map_err(|_| Error::OutOfRange {
            what: "container member count",
        })?;

        self.w.write_u8(wire.tag(0))?;
        self.save_u32(body_len)?;
        self.save_u32(count)?;
        self.w.write(body.unread())
    }
}
