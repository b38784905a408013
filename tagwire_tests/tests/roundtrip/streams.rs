use anyhow::Result;
use itertools::Itertools;
use rand::Rng;
use tagwire::{
    BufStream, Decode, Encode, Error, MemStream, Reader, SliceReader, SliceWriter, Writer,
};

pub fn test_streams() -> Result<()> {
    fixed_region_round_trip()?;
    buf_stream_reads_what_was_written()?;
    mem_stream_random_chunks()?;
    Ok(())
}

fn fixed_region_round_trip() -> Result<()> {
    let vals = vec![0i64, 1, -1, i64::MAX, i64::MIN, 0x0100_0000_0000_0002];
    let expected_len = vals.ser_solo()?.len();

    let mut region = [0u8; 64];
    let written = {
        let mut w = Writer::new(SliceWriter::new(&mut region));
        w.save(&vals)?;
        w.written().len()
    };
    assert_eq!(written, expected_len);

    let back = Vec::<i64>::deser_solo(&region[..written])?;
    assert_eq!(back, vals);

    /* One byte short of the encoding. */
    let mut region = vec![0u8; expected_len - 1];
    let mut w = Writer::new(SliceWriter::new(&mut region));
    assert!(matches!(
        w.save(&vals),
        Err(Error::CapacityExceeded { .. })
    ));
    Ok(())
}

fn buf_stream_reads_what_was_written() -> Result<()> {
    let mut region = [0u8; 32];
    let mut s = BufStream::new(&mut region);

    Writer::new(&mut s).save("abc")?;
    Writer::new(&mut s).save(&42u16)?;

    let mut r = Reader::new(&mut s);
    assert_eq!(r.load::<String>()?, "abc");
    assert_eq!(r.load::<u16>()?, 42);
    assert!(matches!(
        r.load::<u8>(),
        Err(Error::ShortRead {
            needed: 1,
            available: 0
        })
    ));
    Ok(())
}

/// Writes and reads in random-sized batches so the stream both grows
/// and compacts along the way.
fn mem_stream_random_chunks() -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut ms = MemStream::with_capacity(8);

    let mut next_w = 0u32;
    let mut next_r = 0u32;
    while next_r < 2_000 {
        let n_w = rng.gen_range(0..16);
        for _ in 0..n_w {
            let mut w = Writer::new(&mut ms);
            w.save(&next_w)?;
            w.save(&format!("#{next_w}"))?;
            next_w += 1;
        }

        let n_r = rng.gen_range(0..=(next_w - next_r));
        let mut r = Reader::new(&mut ms);
        for _ in 0..n_r {
            assert_eq!(r.load::<u32>()?, next_r);
            assert_eq!(r.load::<String>()?, format!("#{next_r}"));
            next_r += 1;
        }
    }

    /* Whatever is left is still intact. */
    let rest = ms.unread().to_vec();
    let mut r = Reader::new(SliceReader::new(&rest));
    let mut left = vec![];
    for _ in next_r..next_w {
        left.push(r.load::<u32>()?);
        r.skip()?;
    }
    assert_eq!(left, (next_r..next_w).collect_vec());
    assert_eq!(r.remaining(), 0);
    Ok(())
}
