use std::path::PathBuf;

use cache_topology::{read_from, CacheLevel, TopologyError};

/// Path of the sysfs-style fixture tree checked in next to this test.
fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cache")
}

#[test]
fn reads_data_cache_levels_in_order() {
    let levels = read_from(&fixture_dir()).unwrap();

    assert_eq!(
        levels,
        vec![
            CacheLevel {
                bytes: 32 * 1024,
                label: "L1",
            },
            CacheLevel {
                bytes: 512 * 1024,
                label: "L2",
            },
            CacheLevel {
                bytes: 16384 * 1024,
                label: "L3",
            },
        ]
    );
}

#[test]
fn skips_the_instruction_cache_index() {
    // index1 describes the L1 instruction cache; the read must not pick
    // it up even though the fixture provides one.
    let levels = read_from(&fixture_dir()).unwrap();
    assert_eq!(levels.len(), 3);
    assert!(levels.iter().all(|level| level.bytes > 0));
}

#[test]
fn missing_index_file_is_an_io_error() {
    let bogus = fixture_dir().join("does-not-exist");
    let result = read_from(&bogus);

    match result {
        Err(TopologyError::Io { path, .. }) => {
            assert!(path.ends_with("index0/size"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}
