//! Translation between wire and local file records.
//!
//! [`to_local`] and [`to_wire`] are total: every well-formed record maps to
//! exactly one record on the other side, and the two are inverses.
//!
//! | wire ([`FileInfo`])         | local ([`File`])                  |
//! |-----------------------------|-----------------------------------|
//! | `/`-separated name          | native separators                 |
//! | blocks without offsets      | offsets = running size total      |
//! | no size                     | size = sum of block sizes         |
//! | invalid bit in `flags`      | `suppressed`, bit cleared         |

use meshsync_types::{BlockInfo, FileInfo};
use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::file::File;

/// Convert a wire record into a local one.
pub fn to_local(wire: &FileInfo) -> File {
    File::new(
        from_slash(&wire.name),
        wire.flags,
        wire.modified,
        wire.version,
        wire.blocks.iter().cloned(),
    )
    .with_suppressed(wire.flags.is_invalid())
}

/// Convert a local record into its wire form.
pub fn to_wire(local: &File) -> FileInfo {
    FileInfo {
        name: to_slash(local.name()),
        flags: local.flags().with_invalid(local.is_suppressed()),
        modified: local.modified(),
        version: local.version(),
        blocks: local
            .blocks()
            .iter()
            .map(|b| BlockInfo {
                size: b.size(),
                hash: b.hash().to_vec(),
            })
            .collect(),
    }
}

impl From<&FileInfo> for File {
    fn from(wire: &FileInfo) -> Self {
        to_local(wire)
    }
}

impl From<&File> for FileInfo {
    fn from(local: &File) -> Self {
        to_wire(local)
    }
}

fn from_slash(name: &str) -> PathBuf {
    if MAIN_SEPARATOR == '/' {
        PathBuf::from(name)
    } else {
        PathBuf::from(name.replace('/', MAIN_SEPARATOR_STR))
    }
}

fn to_slash(path: &Path) -> String {
    let name = path.to_string_lossy();
    if MAIN_SEPARATOR == '/' {
        name.into_owned()
    } else {
        name.replace(MAIN_SEPARATOR, "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshsync_types::{FileFlags, FLAG_DELETED, FLAG_DIRECTORY, FLAG_INVALID};
    use proptest::prelude::*;

    fn wire_file(name: &str, flags: u32, sizes: &[u32]) -> FileInfo {
        FileInfo {
            name: name.into(),
            flags: FileFlags::from_bits(flags),
            modified: 1_705_000_000,
            version: 42,
            blocks: sizes
                .iter()
                .enumerate()
                .map(|(i, &size)| BlockInfo {
                    size,
                    hash: vec![i as u8; 32],
                })
                .collect(),
        }
    }

    #[test]
    fn to_local_derives_offsets_and_size() {
        let local = to_local(&wire_file("a.bin", 0o644, &[100, 50, 200]));

        let offsets: Vec<i64> = local.blocks().iter().map(|b| b.offset()).collect();
        assert_eq!(offsets, vec![0, 100, 150]);
        assert_eq!(local.size(), 350);
        assert_eq!(local.modified(), 1_705_000_000);
        assert_eq!(local.version(), 42);
    }

    #[test]
    fn to_local_uses_native_separators() {
        let local = to_local(&wire_file("dir/sub/file.txt", 0, &[]));
        let expected: PathBuf = ["dir", "sub", "file.txt"].iter().collect();
        assert_eq!(local.name(), expected.as_path());
    }

    #[test]
    fn to_wire_uses_forward_slashes() {
        let name: PathBuf = ["dir", "sub", "file.txt"].iter().collect();
        let local = File::new(name, FileFlags::default(), 0, 0, Vec::new());
        assert_eq!(to_wire(&local).name, "dir/sub/file.txt");
    }

    #[test]
    fn invalid_bit_becomes_suppressed() {
        let local = to_local(&wire_file("x", 0o644 | FLAG_INVALID, &[10]));

        assert!(local.is_suppressed());
        assert!(!local.flags().is_invalid());
        assert_eq!(local.flags().bits(), 0o644);
    }

    #[test]
    fn invalid_bit_is_cleared_without_touching_other_flags() {
        let bits = 0o755 | FLAG_DELETED | FLAG_DIRECTORY;
        let local = to_local(&wire_file("d", bits | FLAG_INVALID, &[]));

        assert!(local.is_suppressed());
        assert_eq!(local.flags().bits(), bits);
        assert_eq!(to_wire(&local).flags.bits(), bits | FLAG_INVALID);
    }

    #[test]
    fn suppressed_sets_invalid_bit_on_wire() {
        let local = File::new(
            "x",
            FileFlags::from_bits(FLAG_DELETED | 0o600),
            0,
            0,
            Vec::new(),
        )
        .with_suppressed(true);

        let wire = to_wire(&local);
        assert_eq!(wire.flags.bits(), FLAG_DELETED | 0o600 | FLAG_INVALID);
    }

    #[test]
    fn unsuppressed_never_carries_invalid_bit() {
        let local = File::new("x", FileFlags::from_bits(0o755), 0, 0, Vec::new());

        let wire = to_wire(&local);
        assert!(!wire.flags.is_invalid());
        assert!(!to_local(&wire).flags().is_invalid());
    }

    #[test]
    fn suppressed_roundtrip_keeps_other_flags() {
        let flags = FLAG_DIRECTORY | FLAG_DELETED | 0o700;
        let local = File::new("d", FileFlags::from_bits(flags), 5, 6, Vec::new())
            .with_suppressed(true);

        let back = to_local(&to_wire(&local));
        assert!(back.is_suppressed());
        assert_eq!(back.flags().bits(), flags);
    }

    #[test]
    fn from_impls_match_functions() {
        let wire = wire_file("a/b", 0o644, &[1, 2]);
        let local = File::from(&wire);
        assert_eq!(local, to_local(&wire));
        assert_eq!(FileInfo::from(&local), wire);
    }

    fn arb_name() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-zA-Z0-9._-]{1,12}", 1..5).prop_map(|parts| parts.join("/"))
    }

    fn arb_wire() -> impl Strategy<Value = FileInfo> {
        (
            arb_name(),
            any::<u32>(),
            any::<i64>(),
            any::<u64>(),
            prop::collection::vec(
                (any::<u32>(), prop::collection::vec(any::<u8>(), 0..33)),
                0..16,
            ),
        )
            .prop_map(|(name, flags, modified, version, blocks)| FileInfo {
                name,
                flags: FileFlags::from_bits(flags),
                modified,
                version,
                blocks: blocks
                    .into_iter()
                    .map(|(size, hash)| BlockInfo { size, hash })
                    .collect(),
            })
    }

    proptest! {
        #[test]
        fn wire_roundtrip_is_exact(wire in arb_wire()) {
            prop_assert_eq!(to_wire(&to_local(&wire)), wire);
        }

        #[test]
        fn local_roundtrip_is_exact(wire in arb_wire()) {
            let local = to_local(&wire);
            prop_assert_eq!(to_local(&to_wire(&local)), local);
        }

        #[test]
        fn blocks_cover_file_without_gaps(wire in arb_wire()) {
            let local = to_local(&wire);
            let mut expected = 0i64;
            for block in local.blocks() {
                prop_assert_eq!(block.offset(), expected);
                expected += i64::from(block.size());
            }
            prop_assert_eq!(local.size(), expected);
        }
    }
}
