use anyhow::Result;
use std::collections::{BTreeMap, HashMap, VecDeque};
use tagwire::{serializable, Binary, Decode, Encode, MemStream, Reader, Writer};

#[derive(Debug, Default, PartialEq)]
struct SubData {
    text: String,
}
serializable!(SubData { text });

#[derive(Debug, Default, PartialEq)]
struct Data {
    b: bool,
    i8: i8,
    u8: u8,
    i16: i16,
    u16: u16,
    i32: i32,
    u32: u32,
    i64: i64,
    u64: u64,
    f32: f32,
    f64: f64,
    text: String,
    table: BTreeMap<i32, Vec<String>>,
    sub: SubData,
}
serializable!(Data {
    b, i8, u8, i16, u16, i32, u32, i64, u64, f32, f64, text, table, sub,
});

impl Data {
    fn populated() -> Self {
        Self {
            b: true,
            i8: b'a' as i8,
            u8: 100,
            i16: i16::MIN,
            u16: u16::MAX,
            i32: i32::MIN,
            u32: u32::MAX,
            i64: i64::MIN,
            u64: u64::MAX,
            f32: f32::MAX,
            f64: f64::MAX,
            text: "kom".into(),
            table: BTreeMap::from([
                (0, vec!["a".into(), "b".into(), "c".into()]),
                (1, vec!["aa".into(), "bb".into(), "cc".into()]),
            ]),
            sub: SubData {
                text: "string data".into(),
            },
        }
    }
}

#[derive(Debug, Default, PartialEq)]
struct Envelope {
    seq_no: usize,
    headers: HashMap<String, String>,
    payload: Binary,
    retries: VecDeque<u32>,
    parent: Option<Box<Envelope>>,
}
serializable!(Envelope {
    seq_no,
    headers,
    payload,
    retries,
    parent
});

pub fn test_records() -> Result<()> {
    data_round_trip()?;
    default_differs_from_populated()?;
    nested_optional_records()?;
    Ok(())
}

fn data_round_trip() -> Result<()> {
    let mut ms = MemStream::new();

    let a = Data::populated();
    Writer::new(&mut ms).save(&a)?;

    let mut b = Data::default();
    assert_ne!(a, b);
    Reader::new(&mut ms).load_into(&mut b)?;

    assert_eq!(a, b);
    assert_eq!(ms.unread().len(), 0);
    Ok(())
}

fn default_differs_from_populated() -> Result<()> {
    let populated = Data::populated().ser_solo()?;
    let default = Data::default().ser_solo()?;
    assert!(default.len() < populated.len());

    assert_eq!(Data::deser_solo(&default)?, Data::default());

    /* Decoding a record from a truncated buffer fails instead of defaulting. */
    let cut = &populated[..populated.len() - 1];
    assert!(Data::deser_solo(cut).is_err());
    Ok(())
}

fn nested_optional_records() -> Result<()> {
    let inner = Envelope {
        seq_no: 1,
        headers: HashMap::from([("k".into(), "v".into())]),
        payload: Binary(vec![0, 1, 2, 0xff]),
        retries: VecDeque::from([3, 0]),
        parent: None,
    };
    let outer = Envelope {
        seq_no: 2,
        headers: HashMap::new(),
        payload: Binary::default(),
        retries: VecDeque::new(),
        parent: Some(Box::new(inner)),
    };

    let buf = outer.ser_solo()?;
    assert_eq!(Envelope::deser_solo(&buf)?, outer);
    Ok(())
}
