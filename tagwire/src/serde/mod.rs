//! # Serialization format
//!
//! Every item starts with a tag byte. Its top nibble is the [`WireType`];
//! its bottom nibble carries either the boolean, the null marker, or the
//! presence mask of a narrow integer.
//!
//! Integers are compact: only their non-zero bytes are written, in ascending
//! byte-index order (byte `i` holds bits `8*i .. 8*i+8`). A presence mask,
//! bit `i` set iff byte `i` is non-zero, tells the reader where each byte goes.
//! Integers of width <= 4 keep the mask in the tag's bottom nibble;
//! 8-byte integers put it in a byte of its own right after the tag.
//!
//! Floats are written in full, in native byte order.
//!
//! Containers are length-prefixed, so a reader can skip one without decoding
//! it. Elements are first encoded into a scratch buffer to learn that length.
//!
//! ```text
//! struct Bool {
//!     tag:            u8,     // 0x00 | truth
//! }
//!
//! struct Null {
//!     tag:            u8,     // 0x02
//! }
//!
//! struct Int8, UInt8, Int16, UInt16, Int32, UInt32 {
//!     tag:            u8,     // kind << 4 | mask
//!     body:           [u8; popcount(mask)],
//! }
//!
//! struct Int64, UInt64, Pointer {
//!     tag:            u8,     // kind << 4
//!     mask:           u8,
//!     body:           [u8; popcount(mask)],
//! }
//!
//! struct Float, Double {
//!     tag:            u8,
//!     body:           [u8; 4 or 8],
//! }
//!
//! struct String or Binary {
//!     tag:            u8,     // kind << 4 | mask
//!     len:            [u8; popcount(mask)],   // compact u32, shares the tag
//!     body:           [u8; len],
//! }
//!
//! struct List or Map {
//!     tag:            u8,
//!     body_len:       UInt32,
//!     members_count:  UInt32,
//!     body:           {
//!         member_0:       *,      // for a Map: key_0, value_0, key_1, ...
//!         member_1:       *,
//!         ...
//!     }
//! }
//! ```
//!
//! There is no version field; a format change needs a new tag or an
//! out-of-band marker.

mod compact;
mod reader;
mod wire_type;
mod writer;


pub use reader::*;
pub use wire_type::*;
pub use writer::*;
