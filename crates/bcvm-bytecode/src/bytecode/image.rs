//! Compiled image container.

use super::constants::HEADER_SIZE;
use super::header::Header;

/// Errors that can occur while decoding an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("image too small: {0} bytes (header needs 8)")]
    TooShort(usize),

    #[error("instruction stream too large: {0} bytes")]
    CodeTooLarge(usize),

    #[error("unknown opcode {opcode:#04x} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    #[error("truncated operand at offset {0}")]
    TruncatedOperand(usize),
}

/// A compiled program: header plus raw instruction stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Image {
    header: Header,
    code: Vec<u8>,
}

impl Image {
    pub fn new(header: Header, code: Vec<u8>) -> Self {
        Self { header, code }
    }

    /// Decode an image. Only the header is validated; the instruction
    /// stream is executed (or disassembled) as-is.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ImageError> {
        let header = Header::from_bytes(bytes)?;
        let code = bytes[HEADER_SIZE..].to_vec();
        if u32::try_from(code.len()).is_err() {
            return Err(ImageError::CodeTooLarge(code.len()));
        }
        Ok(Self { header, code })
    }

    /// Encode the image: header followed by the instruction stream.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_SIZE + self.code.len());
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(&self.code);
        out
    }

    pub fn header(&self) -> Header {
        self.header
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Instruction stream length in bytes.
    pub fn code_len(&self) -> u32 {
        self.code.len() as u32
    }

    /// First address past the instruction region (start of static data).
    pub fn static_base(&self) -> u32 {
        self.header.stack_size + self.code_len()
    }
}
