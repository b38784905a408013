use anyhow::Result;
use itertools::Itertools;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use tagwire::{Decode, Encode, Kind, Map, Value};

pub fn test_values() -> Result<()> {
    document_round_trip()?;
    typed_and_dynamic_agree()?;
    map_keys_in_value_order()?;
    wide_integer_keys_survive()?;
    take_then_encode()?;
    Ok(())
}

fn document() -> Value {
    let mut doc = Map::new();
    doc.insert(Value::from("name"), Value::from("widget"));
    doc.insert(Value::from("count"), Value::from(3u32));
    doc.insert(Value::from("ratio"), Value::from(0.25f64));
    doc.insert(Value::from("missing"), Value::Null);
    doc.insert(
        Value::from("tags"),
        Value::from(vec!["red", "green", "blue"]),
    );
    doc.insert(
        Value::from("dims"),
        Value::from(BTreeMap::from([("w", 10i16), ("h", -4i16)])),
    );
    Value::Map(doc)
}

fn document_round_trip() -> Result<()> {
    let doc = document();
    let buf = doc.ser_solo()?;
    let back = Value::deser_solo(&buf)?;

    assert_eq!(back, doc);
    assert_eq!(format!("{back:?}"), format!("{doc:?}"));

    let map = back.as_map()?;
    assert_eq!(map[&Value::from("count")].get::<u32>()?, 3);
    assert_eq!(map[&Value::from("tags")].as_seq()?.len(), 3);
    assert!(map[&Value::from("missing")].is_null());
    assert_eq!(
        map[&Value::from("dims")].get::<BTreeMap<String, i16>>()?,
        BTreeMap::from([("h".to_owned(), -4), ("w".to_owned(), 10)])
    );

    /* Re-encoding the decoded value reproduces the bytes. */
    assert_eq!(back.ser_solo()?, buf);
    Ok(())
}

fn typed_and_dynamic_agree() -> Result<()> {
    let typed: BTreeMap<i32, Vec<String>> = BTreeMap::from([
        (0, vec!["a".into(), "b".into(), "c".into()]),
        (1, vec!["aa".into(), "bb".into(), "cc".into()]),
    ]);

    /* Same bytes whichever way the data is held. */
    let from_typed = typed.ser_solo()?;
    let from_value = Value::from(typed.clone()).ser_solo()?;
    assert_eq!(from_typed, from_value);

    let val = Value::deser_solo(&from_typed)?;
    assert_eq!(val.kind(), Kind::Map);
    assert_eq!(val.get::<BTreeMap<i32, Vec<String>>>()?, typed);
    assert_eq!(BTreeMap::<i32, Vec<String>>::deser_solo(&from_value)?, typed);
    Ok(())
}

fn map_keys_in_value_order() -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut keys = vec![
        Value::Null,
        Value::from(-2i8),
        Value::from(false),
        Value::from(7u64),
        Value::from(7.5f32),
        Value::from("a"),
        Value::from("b"),
        Value::from(vec![1u8]),
        Value::from(BTreeMap::from([(0u8, 0u8)])),
    ];
    let sorted = keys.clone();

    for _ in 0..10 {
        keys.shuffle(&mut rng);
        let map: Map = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, k)| (k, Value::from(i as u32)))
            .collect();

        let back = Value::deser_solo(&Value::Map(map).ser_solo()?)?;
        let back_keys = back.as_map()?.keys().cloned().collect_vec();
        assert_eq!(
            format!("{:?}", back_keys),
            format!("{:?}", sorted),
            "{}",
            back_keys.iter().join(", ")
        );
    }
    Ok(())
}

fn wide_integer_keys_survive() -> Result<()> {
    let mut rng = rand::thread_rng();
    const TWO_POW_53: i64 = 1 << 53;

    let mut keys = vec![
        Value::from(0u64),
        Value::from(u64::MAX),
        Value::from(-1i8),
        Value::from(i64::MIN),
        Value::from((1u64 << 63) + 1),
        Value::from(i64::MAX),
        Value::from(TWO_POW_53),
        Value::from(TWO_POW_53 + 1),
        Value::from(TWO_POW_53 as f64 + 2.0),
        Value::from(-TWO_POW_53 - 1),
        Value::from(-TWO_POW_53 as f64),
        Value::from(0.5f32),
    ];

    for _ in 0..10 {
        keys.shuffle(&mut rng);
        let map: Map = keys
            .iter()
            .cloned()
            .map(|k| {
                let label = format!("{k:?}");
                (k, Value::from(label))
            })
            .collect();
        assert_eq!(map.len(), keys.len());

        let back = Value::deser_solo(&Value::Map(map.clone()).ser_solo()?)?;
        let back = back.as_map()?;
        assert_eq!(back.len(), keys.len());
        assert_eq!(format!("{back:?}"), format!("{map:?}"));
        for (k, v) in back {
            assert_eq!(v.as_str()?, format!("{k:?}"));
        }
    }

    /* A u64 above i64::MAX next to a negative key. */
    let mut mixed = Map::new();
    mixed.insert(Value::from(0u64), Value::from("zero"));
    mixed.insert(Value::from(u64::MAX), Value::from("max"));
    mixed.insert(Value::from(-1i8), Value::from("minus one"));
    assert_eq!(mixed.len(), 3);

    let back = Value::deser_solo(&Value::Map(mixed.clone()).ser_solo()?)?;
    assert_eq!(back.as_map()?.len(), 3);
    assert_eq!(back, Value::Map(mixed));
    Ok(())
}

fn take_then_encode() -> Result<()> {
    let mut doc = document();
    let moved = doc.take();
    assert!(doc.is_null());
    assert_eq!(doc.ser_solo()?, vec![0x02]);
    assert_eq!(Value::deser_solo(&moved.ser_solo()?)?, document());
    Ok(())
}
