//! Image header (8 bytes).
//!
//! Layout:
//! - 0-3: stack region size in bytes
//! - 4-7: number of 4-byte static variables

use super::constants::HEADER_SIZE;
use super::image::ImageError;
use super::word::{read_word, write_word};

/// File header - first 8 bytes of a compiled image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Size of the stack region; the instruction region starts right after it.
    pub stack_size: u32,
    /// Number of static variables (each one word wide).
    pub static_count: u32,
}

impl Header {
    pub fn new(stack_size: u32, static_count: u32) -> Self {
        Self {
            stack_size,
            static_count,
        }
    }

    /// Decode the header from the start of an image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let word = |offset| {
            read_word(bytes, offset)
                .map(|w| w as u32)
                .ok_or(ImageError::TooShort(bytes.len()))
        };
        Ok(Self {
            stack_size: word(0)?,
            static_count: word(4)?,
        })
    }

    /// Encode the header to 8 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = Vec::with_capacity(HEADER_SIZE);
        write_word(&mut out, self.stack_size as i32);
        write_word(&mut out, self.static_count as i32);
        let mut bytes = [0u8; HEADER_SIZE];
        bytes.copy_from_slice(&out);
        bytes
    }

    /// Size of the static region in bytes.
    pub fn static_size(&self) -> u32 {
        self.static_count * 4
    }
}
