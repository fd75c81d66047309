//! Persisting templates and replaying them in a later "run".
//!
//! Templates are encoded to basic data, written to disk with the binary codec,
//! then decoded by strategies resolved from a freshly built table. Stored data
//! that no longer fits a strategy must surface as `BadData` so the caller can
//! drop the example.

use std::fs;

use rand::SeedableRng;
use searchstrategy::codec;
use searchstrategy::{
    BadData, BasicData, ChaCha8Rng, Descriptor, SearchStrategy, StrategyTable, Template, Value,
};

fn descriptors() -> Vec<Descriptor> {
    vec![
        Descriptor::Bool,
        Descriptor::Random,
        Descriptor::Null,
        Descriptor::just("constant"),
        Descriptor::sampled_from(vec!["red", "green", "blue"]),
    ]
}

#[test]
fn test_templates_replay_from_disk_with_fresh_strategies() {
    let dir = tempfile::tempdir().unwrap();

    // First run: generate, reify, and store every example.
    let mut expected: Vec<Vec<Value>> = Vec::new();
    {
        let table = StrategyTable::standard();
        let mut random = ChaCha8Rng::seed_from_u64(2024);
        for (i, descriptor) in descriptors().iter().enumerate() {
            let strategy = table.resolve(descriptor).unwrap();
            let parameter = strategy.draw_parameter(&mut random);
            let templates: Vec<Template> = (0..5)
                .map(|_| strategy.produce_template(&mut random, &parameter))
                .collect();

            expected.push(templates.iter().map(|t| strategy.reify(t)).collect());

            let stored =
                BasicData::Sequence(templates.iter().map(|t| strategy.to_basic(t)).collect());
            fs::write(dir.path().join(format!("{}.bin", i)), codec::encode(&stored)).unwrap();
        }
    }

    // Second run: a new table, new strategy instances, same descriptors.
    let table = StrategyTable::standard();
    for (i, descriptor) in descriptors().iter().enumerate() {
        let strategy = table.resolve(descriptor).unwrap();
        let bytes = fs::read(dir.path().join(format!("{}.bin", i))).unwrap();
        let stored = codec::decode(&bytes).unwrap();

        let replayed: Vec<Value> = stored
            .as_sequence()
            .unwrap()
            .iter()
            .map(|data| strategy.reify(&strategy.from_basic(data).unwrap()))
            .collect();
        assert_eq!(replayed, expected[i], "replay mismatch for {}", descriptor);
    }
}

#[test]
fn test_stale_examples_are_discarded() {
    let table = StrategyTable::standard();

    // Stored under a five-element list, replayed against a three-element one.
    let old = table
        .resolve(&Descriptor::sampled_from(vec![1, 2, 3, 4, 5]))
        .unwrap();
    let new = table.resolve(&Descriptor::sampled_from(vec![1, 2, 3])).unwrap();

    let stored: Vec<BasicData> = (0..5).map(|i| old.to_basic(&Template::Index(i))).collect();

    let mut kept = Vec::new();
    let mut discarded = Vec::new();
    for data in &stored {
        match new.from_basic(data) {
            Ok(template) => kept.push(new.reify(&template)),
            Err(err) => discarded.push(err),
        }
    }

    assert_eq!(kept, vec![Value::from(1), Value::from(2), Value::from(3)]);
    assert_eq!(
        discarded,
        vec![
            BadData::IndexOutOfRange { index: 3, len: 3 },
            BadData::IndexOutOfRange { index: 4, len: 3 },
        ]
    );
}

#[test]
fn test_corrupt_file_is_bad_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corrupt.bin");

    let mut bytes = codec::encode(&BasicData::Sequence(vec![BasicData::Integer(1)]));
    bytes.truncate(bytes.len() - 3);
    fs::write(&path, &bytes).unwrap();

    let read = fs::read(&path).unwrap();
    assert!(matches!(codec::decode(&read), Err(BadData::Malformed(_))));
}
