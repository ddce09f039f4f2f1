//! Binary image format for compiled bcvm programs.
//!
//! Layout: `Header (8 bytes) → instruction stream`. All multi-byte integers
//! are 4-byte little-endian words.

mod constants;
mod dump;
mod header;
mod image;
mod instruction;
mod opcode;
mod word;

#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod image_tests;
#[cfg(test)]
mod instruction_tests;

pub use constants::{
    ASSEMBLY_EXTENSION, DEFAULT_STACK_SIZE, EXECUTABLE_EXTENSION, FUNCTION_HEADER_SIZE,
    HEADER_SIZE, WORD_SIZE,
};
pub use dump::{dump, dump_with};
pub use header::Header;
pub use image::{Image, ImageError};
pub use instruction::{FunctionHeader, Instruction};
pub use opcode::Opcode;
pub use word::{read_word, store_word, write_word};
