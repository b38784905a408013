pub mod error;
pub mod serde;
pub mod serialization;
pub mod stream;
pub mod value;

pub use error::{Error, Result};
pub use serde::{Config, Reader, WireType, Writer};
pub use serialization::{Binary, Decode, Encode};
pub use stream::{BufStream, MemStream, ReadStream, SliceReader, SliceWriter, WriteStream};
pub use value::{FromValue, Kind, Map, Seq, Value};
