use crate::error::Result;
use crate::value::{Kind, Map, Seq, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

/* Into Value */

macro_rules! impl_from_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar!(
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => Value::Null,
            Some(t) => t.into(),
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Value>> From<VecDeque<T>> for Value {
    fn from(v: VecDeque<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(v: BTreeSet<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}
impl<T: Into<Value>> From<HashSet<T>> for Value {
    fn from(v: HashSet<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
impl<K: Into<Value>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(v: HashMap<K, V>) -> Self {
        Value::Map(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/* Out of Value */

/// Strict conversion out of a [`Value`]: the kind must match exactly,
/// there is no numeric promotion.
pub trait FromValue: Sized {
    fn from_value(val: &Value) -> Result<Self>;
}

macro_rules! impl_from_value_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $t {
                fn from_value(val: &Value) -> Result<Self> {
                    match val {
                        Value::$variant(v) => Ok(v.clone()),
                        _ => Err(val.mismatch(Kind::$variant)),
                    }
                }
            }
        )*
    };
}

impl_from_value_scalar!(
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => Str,
);

impl FromValue for Value {
    fn from_value(val: &Value) -> Result<Self> {
        Ok(val.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(val: &Value) -> Result<Self> {
        match val {
            Value::Null => Ok(None),
            _ => T::from_value(val).map(Some),
        }
    }
}

fn seq_of<T: FromValue, C: FromIterator<T>>(val: &Value) -> Result<C> {
    let seq: &Seq = val.as_seq()?;
    seq.iter().map(T::from_value).collect()
}

fn map_of<K: FromValue, V: FromValue, C: FromIterator<(K, V)>>(val: &Value) -> Result<C> {
    let map: &Map = val.as_map()?;
    map.iter()
        .map(|(k, v)| Ok((K::from_value(k)?, V::from_value(v)?)))
        .collect()
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(val: &Value) -> Result<Self> {
        seq_of(val)
    }
}
impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(val: &Value) -> Result<Self> {
        seq_of(val)
    }
}
impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn from_value(val: &Value) -> Result<Self> {
        seq_of(val)
    }
}
impl<T: FromValue + Hash + Eq> FromValue for HashSet<T> {
    fn from_value(val: &Value) -> Result<Self> {
        seq_of(val)
    }
}
impl<K: FromValue + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(val: &Value) -> Result<Self> {
        map_of(val)
    }
}
impl<K: FromValue + Hash + Eq, V: FromValue> FromValue for HashMap<K, V> {
    fn from_value(val: &Value) -> Result<Self> {
        map_of(val)
    }
}
