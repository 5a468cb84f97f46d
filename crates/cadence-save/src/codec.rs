//! Binary encode/decode for saved tick lists.
//!
//! All integers are little-endian. Kind names are length-prefixed with
//! a `u32`. No compression, no padding.

use std::io::{Read, Write};

use cadence_core::{ChunkPos, Priority};

use crate::error::SaveError;
use crate::record::{SavedChunk, SavedTick};
use crate::{FORMAT_VERSION, MAGIC};

/// Upper bound on a kind name, guarding against corrupt length prefixes.
pub const MAX_NAME_LEN: u32 = 1024;

/// Records preallocated before any are read.
const PREALLOC_LIMIT: usize = 4096;

// ── Primitive writers ───────────────────────────────────────────

fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), SaveError> {
    w.write_all(&[v])?;
    Ok(())
}

fn write_u32_le(w: &mut dyn Write, v: u32) -> Result<(), SaveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_u64_le(w: &mut dyn Write, v: u64) -> Result<(), SaveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

fn write_i32_le(w: &mut dyn Write, v: i32) -> Result<(), SaveError> {
    w.write_all(&v.to_le_bytes())?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

fn read_u8(r: &mut dyn Read) -> Result<u8, SaveError> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u32_le(r: &mut dyn Read) -> Result<u32, SaveError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64_le(r: &mut dyn Read) -> Result<u64, SaveError> {
    let mut buf = [0u8; 8];
    r.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

fn read_i32_le(r: &mut dyn Read) -> Result<i32, SaveError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

// ── Records ─────────────────────────────────────────────────────

fn encode_record(w: &mut dyn Write, index: u32, tick: &SavedTick) -> Result<(), SaveError> {
    let len = u32::try_from(tick.kind_name.len())
        .ok()
        .filter(|&len| len <= MAX_NAME_LEN)
        .ok_or_else(|| SaveError::MalformedRecord {
            index,
            detail: format!("kind name is {} bytes, limit {MAX_NAME_LEN}", tick.kind_name.len()),
        })?;
    write_u32_le(w, len)?;
    w.write_all(tick.kind_name.as_bytes())?;
    write_i32_le(w, tick.x)?;
    write_i32_le(w, tick.y)?;
    write_i32_le(w, tick.z)?;
    write_i32_le(w, tick.delay)?;
    write_u8(w, tick.priority.value() as u8)?;
    Ok(())
}

fn decode_record(r: &mut dyn Read, index: u32) -> Result<SavedTick, SaveError> {
    let len = read_u32_le(r)?;
    if len > MAX_NAME_LEN {
        return Err(SaveError::MalformedRecord {
            index,
            detail: format!("kind name length {len} exceeds {MAX_NAME_LEN}"),
        });
    }
    let mut name = vec![0u8; len as usize];
    r.read_exact(&mut name)?;
    let kind_name = String::from_utf8(name).map_err(|e| SaveError::MalformedRecord {
        index,
        detail: format!("invalid UTF-8 kind name: {e}"),
    })?;

    let x = read_i32_le(r)?;
    let y = read_i32_le(r)?;
    let z = read_i32_le(r)?;
    let delay = read_i32_le(r)?;
    let tag = read_u8(r)? as i8;
    let priority = Priority::from_value(tag);
    if priority.value() != tag {
        return Err(SaveError::UnknownPriority { index, tag });
    }

    Ok(SavedTick {
        kind_name,
        x,
        y,
        z,
        delay,
        priority,
    })
}

// ── Chunk lists ─────────────────────────────────────────────────

/// Write a chunk's records with header.
///
/// # Examples
///
/// ```
/// use cadence_core::{ChunkPos, Priority};
/// use cadence_save::{read_chunk_ticks, write_chunk_ticks, SavedChunk, SavedTick};
///
/// let saved = SavedChunk {
///     chunk: ChunkPos::new(-2, 9),
///     ticks: vec![SavedTick {
///         kind_name: "observer".into(),
///         x: -30, y: 12, z: 150,
///         delay: 2,
///         priority: Priority::High,
///     }],
/// };
///
/// let mut buf = Vec::new();
/// write_chunk_ticks(&mut buf, &saved).unwrap();
/// assert_eq!(&buf[..4], b"CDNC");
///
/// let back = read_chunk_ticks(&mut buf.as_slice()).unwrap();
/// assert_eq!(back, saved);
/// ```
pub fn write_chunk_ticks(w: &mut dyn Write, saved: &SavedChunk) -> Result<(), SaveError> {
    let count = u32::try_from(saved.ticks.len()).map_err(|_| SaveError::MalformedRecord {
        index: u32::MAX,
        detail: format!("{} records exceed the u32 count field", saved.ticks.len()),
    })?;

    w.write_all(&MAGIC)?;
    write_u8(w, FORMAT_VERSION)?;
    write_u64_le(w, saved.chunk.to_key())?;
    write_u32_le(w, count)?;
    for (index, tick) in (0u32..).zip(&saved.ticks) {
        encode_record(w, index, tick)?;
    }
    Ok(())
}

/// Read a chunk's records written by [`write_chunk_ticks`].
pub fn read_chunk_ticks(r: &mut dyn Read) -> Result<SavedChunk, SaveError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(SaveError::InvalidMagic);
    }
    let version = read_u8(r)?;
    if version != FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion { found: version });
    }

    let chunk = ChunkPos::from_key(read_u64_le(r)?);
    let count = read_u32_le(r)?;
    let mut ticks = Vec::with_capacity((count as usize).min(PREALLOC_LIMIT));
    for index in 0..count {
        ticks.push(decode_record(r, index)?);
    }
    Ok(SavedChunk { chunk, ticks })
}
