//! Dynamic, self-describing values.
//!
//! A [`Value`] holds exactly one of fifteen kinds. Strings, sequences and maps
//! own their payload; cloning deep-copies it and [`Value::take`] moves it out,
//! leaving `Null` behind.
//!
//! Values are totally ordered (see `cmp.rs`), so a map's keys may be any
//! value, including other maps.

mod cmp;
mod conv;
mod kind;

pub use conv::*;
pub use kind::*;

use crate::error::{Error, Result};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;
use std::mem;

pub type Seq = Vec<Value>;
pub type Map = BTreeMap<Value, Value>;

#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Seq(Seq),
    Map(Map),
}

impl Value {
    pub fn kind(&self) -> Kind {
        Kind::from(self)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
    pub fn is_integral(&self) -> bool {
        self.kind().is_integral()
    }
    pub fn is_float(&self) -> bool {
        self.kind().is_float()
    }

    /// Moves the content out, leaving `Null`.
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }

    pub fn set<T: Into<Value>>(&mut self, v: T) {
        *self = v.into();
    }

    /// Checked conversion; the kind must match `T` exactly.
    pub fn get<T: FromValue>(&self) -> Result<T> {
        T::from_value(self)
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::Str(s) => Ok(s.as_str()),
            _ => Err(self.mismatch(Kind::Str)),
        }
    }
    pub fn as_seq(&self) -> Result<&Seq> {
        match self {
            Value::Seq(seq) => Ok(seq),
            _ => Err(self.mismatch(Kind::Seq)),
        }
    }
    pub fn as_seq_mut(&mut self) -> Result<&mut Seq> {
        match self {
            Value::Seq(seq) => Ok(seq),
            _ => Err(self.mismatch(Kind::Seq)),
        }
    }
    pub fn as_map(&self) -> Result<&Map> {
        match self {
            Value::Map(map) => Ok(map),
            _ => Err(self.mismatch(Kind::Map)),
        }
    }
    pub fn as_map_mut(&mut self) -> Result<&mut Map> {
        match self {
            Value::Map(map) => Ok(map),
            _ => Err(self.mismatch(Kind::Map)),
        }
    }

    /// Sign-extended integral projection. `u64` wraps; floats truncate
    /// toward zero; non-numeric kinds yield 0.
    pub fn as_i64_lossy(&self) -> i64 {
        match *self {
            Value::Bool(b) => b as i64,
            Value::I8(i) => i as i64,
            Value::U8(i) => i as i64,
            Value::I16(i) => i as i64,
            Value::U16(i) => i as i64,
            Value::I32(i) => i as i64,
            Value::U32(i) => i as i64,
            Value::I64(i) => i,
            Value::U64(i) => i as i64,
            Value::F32(f) => f as i64,
            Value::F64(f) => f as i64,
            Value::Null | Value::Str(_) | Value::Seq(_) | Value::Map(_) => 0,
        }
    }

    /// Floating projection; non-numeric kinds yield 0.0.
    pub fn as_f64_lossy(&self) -> f64 {
        match *self {
            Value::Bool(b) => b as u8 as f64,
            Value::I8(i) => i as f64,
            Value::U8(i) => i as f64,
            Value::I16(i) => i as f64,
            Value::U16(i) => i as f64,
            Value::I32(i) => i as f64,
            Value::U32(i) => i as f64,
            Value::I64(i) => i as f64,
            Value::U64(i) => i as f64,
            Value::F32(f) => f as f64,
            Value::F64(f) => f,
            Value::Null | Value::Str(_) | Value::Seq(_) | Value::Map(_) => 0.0,
        }
    }

    pub(crate) fn mismatch(&self, expected: Kind) -> Error {
        Error::KindMismatch {
            expected,
            found: self.kind(),
        }
    }
}

/// `variant(<kind>, <payload>)`. Strings show only their size.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "variant({}, ", self.kind())?;
        match self {
            Value::Null => write!(f, "null")?,
            Value::Bool(b) => write!(f, "{}", b)?,
            Value::I8(i) => write!(f, "{}", i)?,
            Value::U8(i) => write!(f, "{}", i)?,
            Value::I16(i) => write!(f, "{}", i)?,
            Value::U16(i) => write!(f, "{}", i)?,
            Value::I32(i) => write!(f, "{}", i)?,
            Value::U32(i) => write!(f, "{}", i)?,
            Value::I64(i) => write!(f, "{}", i)?,
            Value::U64(i) => write!(f, "{}", i)?,
            Value::F32(x) => write!(f, "{}", x)?,
            Value::F64(x) => write!(f, "{}", x)?,
            Value::Str(s) => write!(f, "size:{}", s.len())?,
            Value::Seq(seq) => write!(f, "{{{}}}", seq.iter().format(", "))?,
            Value::Map(map) => write!(
                f,
                "{{{}}}",
                map.iter()
                    .format_with(", ", |(k, v), g| g(&format_args!("{}: {}", k, v)))
            )?,
        }
        write!(f, ")")
    }
}
