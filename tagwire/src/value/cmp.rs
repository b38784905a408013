use crate::value::{Kind, Value};
use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd};

/* Total order over values.
 *
 * - Same kind: the payload's natural order. Sequences and maps compare
 *   element-wise through this same order.
 * - Numeric vs numeric (bool, integers, floats): exact mathematical order.
 *   Integers go through i128, so u64 above i64::MAX never meets a negative;
 *   integer vs float never rounds the integer.
 * - Anything else: kind discriminant. The numeric kinds are contiguous, so
 *   this agrees with the numeric rule.
 *
 * Floats use IEEE order, with `total_cmp` breaking the NaN ties. A NaN sits
 * above every integer, or below if its sign bit is set.
 * Equality is `cmp() == Equal`, so Eq and Ord always agree. */

/// 2^64 and -2^63, both exact in f64.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;
const NEG_TWO_POW_63: f64 = -9_223_372_036_854_775_808.0;

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

fn cmp_int_f64(i: i128, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    /* Every integer lies in [-2^63, 2^64). */
    if f >= TWO_POW_64 {
        return Ordering::Less;
    }
    if f < NEG_TWO_POW_63 {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i128)) {
        Ordering::Equal if f > whole => Ordering::Less,
        Ordering::Equal if f < whole => Ordering::Greater,
        ord => ord,
    }
}

enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn of(val: &Value) -> Option<Self> {
        let num = match *val {
            Value::Bool(b) => Numeric::Int(b as i128),
            Value::I8(i) => Numeric::Int(i as i128),
            Value::U8(i) => Numeric::Int(i as i128),
            Value::I16(i) => Numeric::Int(i as i128),
            Value::U16(i) => Numeric::Int(i as i128),
            Value::I32(i) => Numeric::Int(i as i128),
            Value::U32(i) => Numeric::Int(i as i128),
            Value::I64(i) => Numeric::Int(i as i128),
            Value::U64(i) => Numeric::Int(i as i128),
            Value::F32(f) => Numeric::Float(f as f64),
            Value::F64(f) => Numeric::Float(f),
            Value::Null | Value::Str(_) | Value::Seq(_) | Value::Map(_) => return None,
        };
        Some(num)
    }

    fn cmp(&self, other: &Numeric) -> Ordering {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a.cmp(b),
            (Numeric::Float(a), Numeric::Float(b)) => cmp_f64(*a, *b),
            (Numeric::Int(a), Numeric::Float(b)) => cmp_int_f64(*a, *b),
            (Numeric::Float(a), Numeric::Int(b)) => cmp_int_f64(*b, *a).reverse(),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(slf), Self::Bool(oth)) => slf.cmp(oth),
            (Self::I8(slf), Self::I8(oth)) => slf.cmp(oth),
            (Self::U8(slf), Self::U8(oth)) => slf.cmp(oth),
            (Self::I16(slf), Self::I16(oth)) => slf.cmp(oth),
            (Self::U16(slf), Self::U16(oth)) => slf.cmp(oth),
            (Self::I32(slf), Self::I32(oth)) => slf.cmp(oth),
            (Self::U32(slf), Self::U32(oth)) => slf.cmp(oth),
            (Self::I64(slf), Self::I64(oth)) => slf.cmp(oth),
            (Self::U64(slf), Self::U64(oth)) => slf.cmp(oth),
            (Self::F32(slf), Self::F32(oth)) => cmp_f32(*slf, *oth),
            (Self::F64(slf), Self::F64(oth)) => cmp_f64(*slf, *oth),
            (Self::Str(slf), Self::Str(oth)) => slf.cmp(oth),
            (Self::Seq(slf), Self::Seq(oth)) => slf.cmp(oth),
            (Self::Map(slf), Self::Map(oth)) => slf.cmp(oth),
            _ => match (Numeric::of(self), Numeric::of(other)) {
                (Some(slf), Some(oth)) => slf.cmp(&oth),
                _ => Kind::from(self).cmp(&Kind::from(other)),
            },
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

/* Comparisons against plain Rust values. */

macro_rules! impl_eq_with {
    ($($t:ty),* $(,)?) => {
        $(
            impl PartialEq<$t> for Value {
                fn eq(&self, other: &$t) -> bool {
                    *self == Value::from(other.clone())
                }
            }
        )*
    };
}

impl_eq_with!(bool, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, String, &str);
