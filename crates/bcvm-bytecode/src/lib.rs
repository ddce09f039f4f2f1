//! Bytecode format for bcvm.
//!
//! This crate contains:
//! - The opcode table shared by the assembler and the VM
//! - The little-endian word codec
//! - The image container (header + instruction stream)
//! - A human-readable disassembler

pub mod bytecode;

// Re-export commonly used items at crate root
pub use bytecode::{
    ASSEMBLY_EXTENSION, DEFAULT_STACK_SIZE, EXECUTABLE_EXTENSION, FUNCTION_HEADER_SIZE,
    FunctionHeader, HEADER_SIZE, Header, Image, ImageError, Instruction, Opcode, WORD_SIZE, dump,
    dump_with, read_word, store_word, write_word,
};
