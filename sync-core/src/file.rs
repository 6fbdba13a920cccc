//! Local file records.
//!
//! A [`File`] is the form in which the local index tracks a file. Unlike the
//! wire [`FileInfo`](meshsync_types::FileInfo) it knows where each block
//! starts and how large the whole file is. Both are derived from the block
//! list when the record is built and cannot be set independently, so a `File`
//! always covers `[0, size)` with contiguous blocks.

use meshsync_types::{BlockInfo, FileFlags};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A block of a local file, positioned within the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    offset: i64,
    size: u32,
    hash: Vec<u8>,
}

impl Block {
    /// Byte offset of the block within the file.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Block length in bytes.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Content hash of the block.
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }
}

/// A locally tracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: PathBuf,
    size: i64,
    flags: FileFlags,
    modified: i64,
    version: u64,
    blocks: Vec<Block>,
    suppressed: bool,
}

impl File {
    /// Build a file record from its blocks in file order.
    ///
    /// Offsets and the total size are computed here. The invalid bit is never
    /// kept in local flags; use [`File::with_suppressed`] instead.
    pub fn new(
        name: impl Into<PathBuf>,
        flags: FileFlags,
        modified: i64,
        version: u64,
        blocks: impl IntoIterator<Item = BlockInfo>,
    ) -> Self {
        let mut offset = 0i64;
        let blocks = blocks
            .into_iter()
            .map(|b| {
                let block = Block {
                    offset,
                    size: b.size,
                    hash: b.hash,
                };
                offset += i64::from(b.size);
                block
            })
            .collect();

        Self {
            name: name.into(),
            size: offset,
            flags: flags.without_invalid(),
            modified,
            version,
            blocks,
            suppressed: false,
        }
    }

    /// Mark the file as suppressed (tracked but not synchronized).
    pub fn with_suppressed(mut self, suppressed: bool) -> Self {
        self.suppressed = suppressed;
        self
    }

    /// Path relative to the repository root, with native separators.
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Total size in bytes, the sum of all block sizes.
    pub fn size(&self) -> i64 {
        self.size
    }

    /// File flags. Never carries the invalid bit.
    pub fn flags(&self) -> FileFlags {
        self.flags
    }

    /// Modification time, Unix seconds.
    pub fn modified(&self) -> i64 {
        self.modified
    }

    /// Version counter.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Blocks ordered by offset.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether the file is tracked but excluded from synchronization.
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// A compact view for status listings.
    pub fn summary(&self) -> FileSummary {
        FileSummary {
            name: self.name.to_string_lossy().into_owned(),
            size: self.size,
            modified: self.modified,
            flags: self.flags.bits(),
        }
    }
}

/// What the status API shows for a file: no blocks, no hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileSummary {
    /// Path with native separators
    pub name: String,
    /// Total size in bytes
    pub size: i64,
    /// Modification time, Unix seconds
    pub modified: i64,
    /// Raw file flags
    pub flags: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshsync_types::FLAG_INVALID;

    fn block(size: u32, fill: u8) -> BlockInfo {
        BlockInfo {
            size,
            hash: vec![fill; 32],
        }
    }

    #[test]
    fn offsets_are_running_totals() {
        let file = File::new(
            "a.bin",
            FileFlags::from_bits(0o644),
            0,
            1,
            vec![block(100, 1), block(50, 2), block(200, 3)],
        );

        let offsets: Vec<i64> = file.blocks().iter().map(Block::offset).collect();
        assert_eq!(offsets, vec![0, 100, 150]);
        assert_eq!(file.size(), 350);
    }

    #[test]
    fn blocks_keep_hash_and_size() {
        let file = File::new("a", FileFlags::default(), 0, 0, vec![block(10, 7)]);
        assert_eq!(file.blocks()[0].size(), 10);
        assert_eq!(file.blocks()[0].hash(), &[7; 32][..]);
    }

    #[test]
    fn empty_file_has_zero_size() {
        let file = File::new("empty", FileFlags::default(), 0, 0, Vec::new());
        assert_eq!(file.size(), 0);
        assert!(file.blocks().is_empty());
    }

    #[test]
    fn invalid_bit_never_stored_locally() {
        let file = File::new(
            "a",
            FileFlags::from_bits(0o600 | FLAG_INVALID),
            0,
            0,
            Vec::new(),
        );
        assert!(!file.flags().is_invalid());
        assert!(!file.is_suppressed());
        assert_eq!(file.flags().bits(), 0o600);
    }

    #[test]
    fn summary_serializes_pascal_case() {
        let file = File::new(
            "notes.txt",
            FileFlags::from_bits(0o644),
            1_700_000_000,
            3,
            vec![block(4096, 0)],
        );

        let json = serde_json::to_value(file.summary()).unwrap();
        assert_eq!(json["Name"], "notes.txt");
        assert_eq!(json["Size"], 4096);
        assert_eq!(json["Modified"], 1_700_000_000i64);
        assert_eq!(json["Flags"], 0o644);
    }
}
