//! Type-directed encoding and decoding.
//!
//! A type becomes serializable by implementing [`Encode`] and [`Decode`],
//! usually through [`serializable!`](crate::serializable), which derives
//! both from one field list.

use crate::error::{Error, Result};
use crate::serde::{Reader, WireType, Writer};
use crate::stream::{ReadStream, SliceReader, WriteStream};
use crate::value::{Map, Value};
use derive_more::{Deref, DerefMut, From, Into};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

pub trait Encode {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()>;

    /// Encodes `self` alone into a fresh buffer.
    fn ser_solo(&self) -> Result<Vec<u8>> {
        let mut w = Writer::new(Vec::new());
        self.encode(&mut w)?;
        Ok(w.into_inner())
    }
}

pub trait Decode: Sized {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self>;

    /// Decodes exactly one item spanning all of `buf`.
    fn deser_solo(buf: &[u8]) -> Result<Self> {
        let mut r = Reader::new(SliceReader::new(buf));
        let moi = Self::decode(&mut r)?;
        let leftover = r.remaining();
        if leftover != 0 {
            return Err(Error::LengthMismatch {
                declared: buf.len(),
                consumed: buf.len() - leftover,
            });
        }
        Ok(moi)
    }
}

/// Generates [`Encode`] and [`Decode`] for a struct from a single field list.
/// Fields are written back to back, in the listed order, with no framing.
///
/// ```
/// use tagwire::{serializable, Decode, Encode};
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
///     label: String,
/// }
/// serializable!(Point { x, y, label });
///
/// let p = Point { x: 1, y: -2, label: "origin-ish".into() };
/// let buf = p.ser_solo().unwrap();
/// assert_eq!(Point::deser_solo(&buf).unwrap(), p);
/// ```
#[macro_export]
macro_rules! serializable {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::serialization::Encode for $ty {
            fn encode<W: $crate::stream::WriteStream>(
                &self,
                w: &mut $crate::serde::Writer<W>,
            ) -> $crate::error::Result<()> {
                $( w.save(&self.$field)?; )*
                Ok(())
            }
        }

        impl $crate::serialization::Decode for $ty {
            fn decode<R: $crate::stream::ReadStream>(
                r: &mut $crate::serde::Reader<R>,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    $( $field: r.load()?, )*
                })
            }
        }
    };
}

/* Scalars */

macro_rules! impl_scalar {
    ($($t:ty => $save:ident, $load:ident);* $(;)?) => {
        $(
            impl Encode for $t {
                fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
                    w.$save(*self)
                }
            }
            impl Decode for $t {
                fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
                    r.$load()
                }
            }
        )*
    };
}

impl_scalar!(
    bool => save_bool, load_bool;
    i8 => save_i8, load_i8;
    u8 => save_u8, load_u8;
    i16 => save_i16, load_i16;
    u16 => save_u16, load_u16;
    i32 => save_i32, load_i32;
    u32 => save_u32, load_u32;
    i64 => save_i64, load_i64;
    u64 => save_u64, load_u64;
    f32 => save_f32, load_f32;
    f64 => save_f64, load_f64;
);

impl Encode for usize {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        let v = u64::try_from(*self).map_err(|_| Error::OutOfRange { what: "usize" })?;
        w.save_pointer(v)
    }
}
impl Decode for usize {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        let v = r.load_u64()?;
        usize::try_from(v).map_err(|_| Error::OutOfRange { what: "usize" })
    }
}

/* Strings and binary */

impl Encode for str {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_str(self)
    }
}
impl Encode for String {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_str(self)
    }
}
impl Decode for String {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        r.load_string()
    }
}

/// Raw bytes, encoded under the binary tag rather than as a list of `u8`.
#[derive(
    Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, From, Into, Deref, DerefMut,
)]
pub struct Binary(pub Vec<u8>);

impl Encode for Binary {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_binary(&self.0)
    }
}
impl Decode for Binary {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        r.load_binary().map(Binary)
    }
}

/* Wrappers */

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        (**self).encode(w)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        (**self).encode(w)
    }
}
impl<T: Decode> Decode for Box<T> {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        r.load().map(Box::new)
    }
}

/// `None` is written as null.
impl<T: Encode> Encode for Option<T> {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        match self {
            None => w.save_null(),
            Some(t) => t.encode(w),
        }
    }
}
impl<T: Decode> Decode for Option<T> {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        if r.take_null()? {
            return Ok(None);
        }
        r.load().map(Some)
    }
}

/* Sequences */

fn decode_seq<R, T, C>(r: &mut Reader<R>) -> Result<C>
where
    R: ReadStream,
    T: Decode,
    C: FromIterator<T>,
{
    r.load_block(WireType::List, |r, count| {
        (0..count).map(|_| r.load::<T>()).collect()
    })
}

impl<T: Encode> Encode for [T] {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_seq(self.iter())
    }
}
impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_seq(self.iter())
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_seq(self.iter())
    }
}
impl<T: Decode> Decode for Vec<T> {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        decode_seq(r)
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_seq(self.iter())
    }
}
impl<T: Decode> Decode for VecDeque<T> {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        decode_seq(r)
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_seq(self.iter())
    }
}
impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        decode_seq(r)
    }
}

impl<T: Encode, S> Encode for HashSet<T, S> {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_seq(self.iter())
    }
}
impl<T: Decode + Hash + Eq, S: BuildHasher + Default> Decode for HashSet<T, S> {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        decode_seq(r)
    }
}

/* Maps. On duplicate keys the first entry wins. */

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_map(self.iter())
    }
}
impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        r.load_block(WireType::Map, |r, count| {
            let mut map = BTreeMap::new();
            for _ in 0..count {
                let k = r.load::<K>()?;
                let v = r.load::<V>()?;
                map.entry(k).or_insert(v);
            }
            Ok(map)
        })
    }
}

impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        w.save_map(self.iter())
    }
}
impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Hash + Eq,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        r.load_block(WireType::Map, |r, count| {
            let cap = count.min(r.remaining());
            let mut map = HashMap::with_capacity_and_hasher(cap, S::default());
            for _ in 0..count {
                let k = r.load::<K>()?;
                let v = r.load::<V>()?;
                map.entry(k).or_insert(v);
            }
            Ok(map)
        })
    }
}

/* Value */

impl Encode for Value {
    fn encode<W: WriteStream>(&self, w: &mut Writer<W>) -> Result<()> {
        match self {
            Value::Null => w.save_null(),
            Value::Bool(v) => w.save_bool(*v),
            Value::I8(v) => w.save_i8(*v),
            Value::U8(v) => w.save_u8(*v),
            Value::I16(v) => w.save_i16(*v),
            Value::U16(v) => w.save_u16(*v),
            Value::I32(v) => w.save_i32(*v),
            Value::U32(v) => w.save_u32(*v),
            Value::I64(v) => w.save_i64(*v),
            Value::U64(v) => w.save_u64(*v),
            Value::F32(v) => w.save_f32(*v),
            Value::F64(v) => w.save_f64(*v),
            Value::Str(s) => w.save_str(s),
            Value::Seq(seq) => w.save_seq(seq.iter()),
            Value::Map(map) => w.save_map(map.iter()),
        }
    }
}

/// Binary payloads decode as strings; pointers as `u64`.
impl Decode for Value {
    fn decode<R: ReadStream>(r: &mut Reader<R>) -> Result<Self> {
        if r.take_null()? {
            return Ok(Value::Null);
        }
        let val = match r.peek_wire_type()? {
            WireType::Bool => Value::Bool(r.load_bool()?),
            WireType::Int8 => Value::I8(r.load_i8()?),
            WireType::Uint8 => Value::U8(r.load_u8()?),
            WireType::Int16 => Value::I16(r.load_i16()?),
            WireType::Uint16 => Value::U16(r.load_u16()?),
            WireType::Int32 => Value::I32(r.load_i32()?),
            WireType::Uint32 => Value::U32(r.load_u32()?),
            WireType::Int64 => Value::I64(r.load_i64()?),
            WireType::Uint64 | WireType::Pointer => Value::U64(r.load_u64()?),
            WireType::Float => Value::F32(r.load_f32()?),
            WireType::Double => Value::F64(r.load_f64()?),
            WireType::String | WireType::Binary => Value::Str(r.load_string()?),
            WireType::List => Value::Seq(r.load()?),
            WireType::Map => Value::Map(r.load::<Map>()?),
        };
        Ok(val)
    }
}
