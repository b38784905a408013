use super::{check_readable, check_writable, ReadStream, WriteStream};
use crate::error::Result;

/// Read-only view over borrowed bytes. All bytes start out unread.
pub struct SliceReader<'a> {
    buf: &'a [u8],
    r_pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, r_pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.r_pos
    }

    pub fn unread(&self) -> &'a [u8] {
        &self.buf[self.r_pos..]
    }
}

impl<'a> ReadStream for SliceReader<'a> {
    fn remaining(&self) -> usize {
        self.buf.len() - self.r_pos
    }
    fn peek(&mut self, dst: &mut [u8]) -> Result<()> {
        check_readable(self.remaining(), dst.len())?;
        dst.copy_from_slice(&self.buf[self.r_pos..self.r_pos + dst.len()]);
        Ok(())
    }
    fn discard(&mut self, n: usize) -> Result<()> {
        check_readable(self.remaining(), n)?;
        self.r_pos += n;
        Ok(())
    }
    fn read(&mut self, dst: &mut [u8]) -> Result<()> {
        self.peek(dst)?;
        self.r_pos += dst.len();
        Ok(())
    }
}

/// Write-only view over borrowed, fixed-capacity memory.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    w_pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, w_pos: 0 }
    }

    pub fn spare_capacity(&self) -> usize {
        self.buf.len() - self.w_pos
    }

    pub fn written(&self) -> &[u8] {
        &self.buf[..self.w_pos]
    }
}

impl<'a> WriteStream for SliceWriter<'a> {
    fn write(&mut self, src: &[u8]) -> Result<()> {
        check_writable(self.spare_capacity(), src.len())?;
        self.buf[self.w_pos..self.w_pos + src.len()].copy_from_slice(src);
        self.w_pos += src.len();
        Ok(())
    }
}

/// Combined read/write view over one borrowed region.
/// Reads only see what has been written.
pub struct BufStream<'a> {
    buf: &'a mut [u8],
    r_pos: usize,
    w_pos: usize,
}

impl<'a> BufStream<'a> {
    /// Starts empty: nothing to read, the whole region writable.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            r_pos: 0,
            w_pos: 0,
        }
    }

    /// Treats the whole region as already written.
    pub fn filled(buf: &'a mut [u8]) -> Self {
        let w_pos = buf.len();
        Self {
            buf,
            r_pos: 0,
            w_pos,
        }
    }

    pub fn spare_capacity(&self) -> usize {
        self.buf.len() - self.w_pos
    }

    pub fn unread(&self) -> &[u8] {
        &self.buf[self.r_pos..self.w_pos]
    }
}

impl<'a> ReadStream for BufStream<'a> {
    fn remaining(&self) -> usize {
        self.w_pos - self.r_pos
    }
    fn peek(&mut self, dst: &mut [u8]) -> Result<()> {
        check_readable(self.remaining(), dst.len())?;
        dst.copy_from_slice(&self.buf[self.r_pos..self.r_pos + dst.len()]);
        Ok(())
    }
    fn discard(&mut self, n: usize) -> Result<()> {
        check_readable(self.remaining(), n)?;
        self.r_pos += n;
        Ok(())
    }
    fn read(&mut self, dst: &mut [u8]) -> Result<()> {
        self.peek(dst)?;
        self.r_pos += dst.len();
        Ok(())
    }
}

impl<'a> WriteStream for BufStream<'a> {
    fn write(&mut self, src: &[u8]) -> Result<()> {
        check_writable(self.spare_capacity(), src.len())?;
        self.buf[self.w_pos..self.w_pos + src.len()].copy_from_slice(src);
        self.w_pos += src.len();
        Ok(())
    }
}
