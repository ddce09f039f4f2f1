//! 4-byte word codec.
//!
//! Images and VM memory store every integer as a little-endian two's-complement
//! word. This is the only place byte order is decided; the assembler and the
//! VM both go through these functions.

use super::constants::WORD_SIZE;

/// Append `value` to `out` as a little-endian word.
#[inline]
pub fn write_word(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Read the little-endian word at `offset`, or `None` if it runs past the end.
#[inline]
pub fn read_word(bytes: &[u8], offset: usize) -> Option<i32> {
    let end = offset.checked_add(WORD_SIZE)?;
    let chunk = bytes.get(offset..end)?;
    Some(i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Overwrite the word at `offset` in place, or `None` if it runs past the end.
#[inline]
pub fn store_word(bytes: &mut [u8], offset: usize, value: i32) -> Option<()> {
    let end = offset.checked_add(WORD_SIZE)?;
    bytes.get_mut(offset..end)?.copy_from_slice(&value.to_le_bytes());
    Some(())
}
