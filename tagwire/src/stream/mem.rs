use super::{check_readable, ReadStream, WriteStream};
use crate::error::Result;
use std::io;
use tracing::trace;

/// Owning, growable byte buffer with independent read and write cursors.
///
/// `data.len()` is the capacity; bytes in `r_pos..w_pos` are unread.
/// A write that does not fit either compacts the buffer in place, when the
/// already consumed prefix is large enough, or reallocates to
/// `max(capacity * 3 / 2, capacity + needed)`. Either way only the unread
/// region is kept, rebased to offset 0.
///
/// `Clone` copies the buffer and keeps both cursors. Moving out with
/// [`std::mem::take`] leaves an empty buffer behind.
#[derive(Clone, Default, Debug)]
pub struct MemStream {
    data: Vec<u8>,
    r_pos: usize,
    w_pos: usize,
}

impl MemStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            data: vec![0u8; cap],
            r_pos: 0,
            w_pos: 0,
        }
    }

    /// Takes ownership of `data`; all of it is unread.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let w_pos = data.len();
        Self {
            data,
            r_pos: 0,
            w_pos,
        }
    }

    pub fn from_slice(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Releases the storage and zeroes both cursors.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn reset_with_copy(&mut self, data: &[u8]) {
        self.reset_with_own(data.to_vec());
    }

    pub fn reset_with_own(&mut self, data: Vec<u8>) {
        *self = Self::from_vec(data);
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    pub fn read_pos(&self) -> usize {
        self.r_pos
    }
    pub fn write_pos(&self) -> usize {
        self.w_pos
    }

    pub fn unread(&self) -> &[u8] {
        &self.data[self.r_pos..self.w_pos]
    }

    pub fn into_unread_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.w_pos);
        self.data.drain(..self.r_pos);
        self.data
    }

    /// Makes room for `needed` more bytes past the write cursor.
    pub fn ensure_write(&mut self, needed: usize) {
        let cap = self.data.len();
        if self.w_pos + needed <= cap {
            return;
        }

        let unread_len = self.w_pos - self.r_pos;

        if self.r_pos >= needed {
            trace!(
                consumed = self.r_pos,
                unread = unread_len,
                needed,
                "compacting MemStream"
            );
            self.data.copy_within(self.r_pos..self.w_pos, 0);
            self.r_pos = 0;
            self.w_pos = unread_len;
            return;
        }

        let new_cap = (cap + cap / 2).max(cap + needed);
        trace!(cap, new_cap, unread = unread_len, "growing MemStream");

        let mut new_data = vec![0u8; new_cap];
        new_data[..unread_len].copy_from_slice(&self.data[self.r_pos..self.w_pos]);
        self.data = new_data;
        self.r_pos = 0;
        self.w_pos = unread_len;
    }
}

impl ReadStream for MemStream {
    fn remaining(&self) -> usize {
        self.w_pos - self.r_pos
    }
    fn peek(&mut self, dst: &mut [u8]) -> Result<()> {
        check_readable(self.remaining(), dst.len())?;
        dst.copy_from_slice(&self.data[self.r_pos..self.r_pos + dst.len()]);
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

impl WriteStream for MemStream {
    fn write(&mut self, src: &[u8]) -> Result<()> {
        if src.is_empty() {
            return Ok(());
        }
        self.ensure_write(src.len());
        self.data[self.w_pos..self.w_pos + src.len()].copy_from_slice(src);
        self.w_pos += src.len();
        Ok(())
    }
}

/* std::io interop */

impl io::Read for MemStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.remaining());
        buf[..len].copy_from_slice(&self.data[self.r_pos..self.r_pos + len]);
        self.r_pos += len;
        Ok(len)
    }
}

impl io::Write for MemStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        WriteStream::write(self, buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use std::mem;

    #[test]
    fn grows_from_empty() {
        let mut ms = MemStream::new();
        assert_eq!(ms.capacity(), 0);

        ms.write(&[1, 2, 3]).unwrap();
        assert_eq!(ms.capacity(), 3);

        /* 3 * 1.5 = 4 < 3 + 2 */
        ms.write(&[4, 5]).unwrap();
        assert_eq!(ms.capacity(), 5);

        /* 5 * 1.5 = 7 >= 5 + 1 */
        ms.write(&[6]).unwrap();
        assert_eq!(ms.capacity(), 7);

        assert_eq!(ms.unread(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn drain_then_write_compacts() {
        let mut ms = MemStream::with_capacity(8);
        ms.write(&[10u8; 8]).unwrap();
        assert_eq!(ms.capacity(), 8);

        let mut out = [0u8; 6];
        ms.read(&mut out).unwrap();
        assert_eq!(ms.read_pos(), 6);

        ms.write(&[20, 21, 22, 23]).unwrap();
        assert_eq!(ms.capacity(), 8);
        assert_eq!(ms.read_pos(), 0);
        assert_eq!(ms.write_pos(), 6);
        assert_eq!(ms.unread(), &[10, 10, 20, 21, 22, 23]);
    }

    #[test]
    fn small_consumed_prefix_reallocates_keeping_unread() {
        let mut ms = MemStream::with_capacity(4);
        ms.write(&[1, 2, 3, 4]).unwrap();
        assert_eq!(ms.read_u8(), Ok(1));

        /* consumed prefix 1 < 3 requested */
        ms.write(&[5, 6, 7]).unwrap();
        assert_eq!(ms.capacity(), 7);
        assert_eq!(ms.read_pos(), 0);
        assert_eq!(ms.unread(), &[2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn interleaved_writes_and_reads_keep_data() {
        let mut ms = MemStream::new();
        let mut expected = std::collections::VecDeque::new();
        let mut next = 0u8;

        for round in 0..50usize {
            let w_len = round % 7 + 1;
            for _ in 0..w_len {
                ms.write_u8(next).unwrap();
                expected.push_back(next);
                next = next.wrapping_add(1);
            }
            let r_len = round % 5;
            for _ in 0..r_len.min(expected.len()) {
                assert_eq!(ms.read_u8(), Ok(expected.pop_front().unwrap()));
            }
        }
        assert_eq!(ms.unread(), expected.make_contiguous());
    }

    #[test]
    fn short_read_consumes_nothing() {
        let mut ms = MemStream::from_slice(&[1, 2]);
        let mut buf = [0u8; 3];
        assert_eq!(
            ReadStream::read(&mut ms, &mut buf),
            Err(Error::ShortRead {
                needed: 3,
                available: 2
            })
        );
        assert_eq!(ms.remaining(), 2);
        assert!(ms.discard(3).is_err());
        assert!(ms.discard(2).is_ok());
        assert_eq!(ms.remaining(), 0);
    }

    #[test]
    fn clone_and_take() {
        let mut a = MemStream::new();
        a.write(&[1, 2, 3]).unwrap();
        a.read_u8().unwrap();

        let b = a.clone();
        assert_eq!(b.read_pos(), 1);
        assert_eq!(b.write_pos(), 3);
        assert_eq!(b.unread(), a.unread());

        let c = mem::take(&mut a);
        assert_eq!(c.unread(), &[2, 3]);
        assert_eq!(a.capacity(), 0);
        assert_eq!(a.read_pos(), 0);
        assert_eq!(a.write_pos(), 0);

        assert_eq!(c.into_unread_vec(), vec![2, 3]);
    }

    #[test]
    fn resets() {
        let mut ms = MemStream::from_vec(vec![1, 2, 3]);
        ms.reset_with_copy(&[7, 8]);
        assert_eq!(ms.unread(), &[7, 8]);
        ms.reset_with_own(vec![9]);
        assert_eq!(ms.unread(), &[9]);
        ms.clear();
        assert_eq!(ms.remaining(), 0);
        assert_eq!(ms.capacity(), 0);
    }

    #[test]
    fn io_interop() {
        let mut ms = MemStream::new();
        io::Write::write_all(&mut ms, b"hello").unwrap();

        let mut buf = [0u8; 8];
        let n = io::Read::read(&mut ms, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"hello");
        assert_eq!(io::Read::read(&mut ms, &mut buf).unwrap(), 0);

        /* Grows past the initial capacity through the io::Write path. */
        let mut ms = MemStream::with_capacity(4);
        let big = vec![7u8; 1000];
        io::Write::write_all(&mut ms, &big).unwrap();
        io::Write::flush(&mut ms).unwrap();
        assert_eq!(ms.unread(), &big[..]);
    }
}
