use crate::error::Error;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

/// Bottom-nibble bit carrying a boolean's truth value.
pub const BOOL_TRUE: u8 = 0x1;

/// Bottom-nibble marker turning a bool tag into null.
pub const NULL_MARK: u8 = 0x2;

/// The whole null tag byte.
pub const NULL_TAG: u8 = 0x02;

/// Kind code stored in the top nibble of a tag byte.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, Debug)]
pub enum WireType {
    Bool = 0,
    Int8 = 1,
    Uint8 = 2,
    Int16 = 3,
    Uint16 = 4,
    Int32 = 5,
    Uint32 = 6,
    Float = 7,
    Double = 8,
    Int64 = 9,
    String = 10,
    Binary = 11,
    Map = 12,
    List = 13,
    /// Alias of `Uint64`.
    Pointer = 14,
    Uint64 = 15,
}

impl WireType {
    pub fn from_tag(tag: u8) -> Self {
        match Self::from_u8(tag >> 4) {
            Some(wire) => wire,
            None => unreachable!("every 4-bit code names a wire type"),
        }
    }

    /// Composes a tag byte; `low` is truncated to 4 bits.
    pub fn tag(self, low: u8) -> u8 {
        ((self as u8) << 4) | (low & 0x0f)
    }

    pub fn name(self) -> &'static str {
        match self {
            WireType::Bool => "bool",
            WireType::Int8 => "int8",
            WireType::Uint8 => "uint8",
            WireType::Int16 => "int16",
            WireType::Uint16 => "uint16",
            WireType::Int32 => "int32",
            WireType::Uint32 => "uint32",
            WireType::Float => "float",
            WireType::Double => "double",
            WireType::Int64 => "int64",
            WireType::String => "string",
            WireType::Binary => "binary",
            WireType::Map => "map",
            WireType::List => "list",
            WireType::Pointer => "pointer",
            WireType::Uint64 => "uint64",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for WireType {
    type Error = Error;
    fn try_from(code: u8) -> Result<Self, Error> {
        WireType::from_u8(code).ok_or(Error::OutOfRange { what: "wire type" })
    }
}
