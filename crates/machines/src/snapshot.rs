//! Machine snapshots for host persistence.
//!
//! The host hands machines an opaque place to put their state; these structs
//! are that compound. Byte encoding wraps a bincode payload in a small header
//! with CRC32 validation so a torn or foreign blob fails loudly instead of
//! restoring garbage.

use anyhow::{Context, Result};
use crc32fast::Hasher;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use voxmech_core::ItemStack;

/// Magic number identifying a machine snapshot blob ("VMSN").
const SNAPSHOT_MAGIC: u32 = 0x564D_534E;

/// Current snapshot format version.
const SNAPSHOT_VERSION: u16 = 1;

/// Why a snapshot is being taken.
///
/// The mode is an explicit parameter so the call site shows which variant it
/// is producing: full world saves and client syncs carry everything, while a
/// [`SaveMode::Block`] snapshot travels with the dropped block item and drops
/// transient scan progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Full world save of a placed machine.
    Tile,
    /// State sync to clients.
    Sync,
    /// Snapshot stored on the block item when the machine is broken.
    Block,
}

/// Scan progress of a cursor-driven machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanProgress {
    /// Ticks left until the next scan step.
    pub wait_time: i32,
    /// Cursor first component.
    pub cursor_x: i32,
    /// Cursor second component.
    pub cursor_y: i32,
}

/// Persisted harvester state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvesterSnapshot {
    /// All inventory slots, in order.
    pub slots: Vec<Option<ItemStack>>,
    /// Stored energy.
    pub energy: u32,
    /// Scan progress; absent in [`SaveMode::Block`] snapshots.
    pub scan: Option<ScanProgress>,
}

/// Persisted composter state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposterSnapshot {
    /// The single slot.
    pub slot: Option<ItemStack>,
    /// Ticks spent on the current conversion.
    pub conversion_time: i32,
}

/// Encode a snapshot into a self-validating byte blob.
pub fn encode_snapshot<T: Serialize>(snapshot: &T) -> Result<Vec<u8>> {
    let payload = bincode::serialize(snapshot).context("Failed to serialize snapshot")?;

    let mut hasher = Hasher::new();
    hasher.update(&payload);
    let crc32 = hasher.finalize();

    let mut bytes = Vec::with_capacity(14 + payload.len());
    bytes.extend_from_slice(&SNAPSHOT_MAGIC.to_le_bytes());
    bytes.extend_from_slice(&SNAPSHOT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&crc32.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode a snapshot blob produced by [`encode_snapshot`].
pub fn decode_snapshot<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.len() < 14 {
        anyhow::bail!("Snapshot header too short");
    }

    let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    if magic != SNAPSHOT_MAGIC {
        anyhow::bail!(
            "Invalid snapshot magic: expected 0x{:08X}, got 0x{:08X}",
            SNAPSHOT_MAGIC,
            magic
        );
    }

    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != SNAPSHOT_VERSION {
        anyhow::bail!("Unsupported snapshot version {}", version);
    }

    let crc32 = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
    let payload_len = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]) as usize;

    let payload = bytes
        .get(14..14 + payload_len)
        .context("Snapshot payload truncated")?;

    let mut hasher = Hasher::new();
    hasher.update(payload);
    let computed = hasher.finalize();
    if computed != crc32 {
        anyhow::bail!(
            "Snapshot CRC32 mismatch: expected {:08X}, got {:08X}",
            crc32,
            computed
        );
    }

    bincode::deserialize(payload).context("Failed to deserialize snapshot")
}
