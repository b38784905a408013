//! Byte streams the serializer reads from and writes to.
//!
//! Every stream keeps `read_cursor <= write_cursor <= capacity`.
//! Reads never go past the write cursor; fixed-capacity views refuse writes
//! past their capacity, while [`MemStream`] grows.

mod buf;
mod mem;

pub use buf::*;
pub use mem::*;

use crate::error::{Error, Result};

pub trait ReadStream {
    /// Number of unread bytes.
    fn remaining(&self) -> usize;

    /// Copies `dst.len()` bytes without consuming them.
    fn peek(&mut self, dst: &mut [u8]) -> Result<()>;

    /// Advances the read cursor by `n` bytes without copying.
    fn discard(&mut self, n: usize) -> Result<()>;

    /// Copies `dst.len()` bytes and consumes them.
    fn read(&mut self, dst: &mut [u8]) -> Result<()>;

    fn peek_array<const LEN: usize>(&mut self) -> Result<[u8; LEN]> {
        let mut buf = [0u8; LEN];
        self.peek(&mut buf)?;
        Ok(buf)
    }
    fn read_array<const LEN: usize>(&mut self) -> Result<[u8; LEN]> {
        let mut buf = [0u8; LEN];
        self.read(&mut buf)?;
        Ok(buf)
    }
    fn peek_u8(&mut self) -> Result<u8> {
        let [b] = self.peek_array::<1>()?;
        Ok(b)
    }
    fn read_u8(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }
}

pub trait WriteStream {
    /// Appends all of `src`, or nothing.
    fn write(&mut self, src: &[u8]) -> Result<()>;

    fn write_u8(&mut self, b: u8) -> Result<()> {
        self.write(&[b])
    }
}

impl<S: ReadStream + ?Sized> ReadStream for &mut S {
    fn remaining(&self) -> usize {
        (**self).remaining()
    }
    fn peek(&mut self, dst: &mut [u8]) -> Result<()> {
        (**self).peek(dst)
    }
    fn discard(&mut self, n: usize) -> Result<()> {
        (**self).discard(n)
    }
    fn read(&mut self, dst: &mut [u8]) -> Result<()> {
        (**self).read(dst)
    }
}

impl<S: WriteStream + ?Sized> WriteStream for &mut S {
    fn write(&mut self, src: &[u8]) -> Result<()> {
        (**self).write(src)
    }
}

impl WriteStream for Vec<u8> {
    fn write(&mut self, src: &[u8]) -> Result<()> {
        self.extend_from_slice(src);
        Ok(())
    }
}

/* Shared cursor arithmetic for the slice-backed streams. */

fn check_readable(available: usize, needed: usize) -> Result<()> {
    if available < needed {
        return Err(Error::ShortRead { needed, available });
    }
    Ok(())
}

fn check_writable(available: usize, needed: usize) -> Result<()> {
    if available < needed {
        return Err(Error::CapacityExceeded { needed, available });
    }
    Ok(())
}
