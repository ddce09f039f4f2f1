//! Errors that can occur while loading or executing an image.

use std::path::PathBuf;

use bcvm_bytecode::ImageError;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid image: {0}")]
    Image(#[from] ImageError),

    #[error("image needs {required} bytes of memory, arena has {available}")]
    MemoryTooSmall { required: u64, available: usize },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("no program loaded")]
    NoProgram,

    #[error("stack overflow at sp {sp}")]
    StackOverflow { sp: u32 },

    #[error("stack underflow")]
    StackUnderflow,

    #[error("out of memory allocating {requested} bytes")]
    OutOfMemory { requested: i32 },

    #[error("invalid allocation size {0}")]
    InvalidAllocSize(i32),

    #[error("invalid free of address {0}")]
    InvalidFree(u32),

    #[error("invalid opcode {opcode:#04x} at address {addr}")]
    UnknownOpcode { opcode: u8, addr: u32 },

    #[error("program counter {0} outside the instruction region")]
    PcOutOfBounds(u32),

    #[error("memory access at {0} out of bounds")]
    AddressOutOfBounds(u32),

    #[error("negative element count {0}")]
    NegativeCount(i32),

    /// Execution fuel exhausted (too many executed instructions).
    #[error("runtime execution limit exceeded")]
    ExecFuelExhausted,

    #[error("failed to write program output: {0}")]
    Output(#[from] std::io::Error),
}
