//! Runtime VM for executing compiled bcvm images.
//!
//! The VM runs a fetch-decode-execute loop over one flat byte arena that
//! holds the stack, the instruction stream, static data and a free-list heap.

pub mod engine;

// Re-export commonly used items at crate root
pub use engine::{
    DEFAULT_MEMORY_SIZE, Heap, LoadError, Memory, NoopTracer, PrintTracer, Registers,
    RuntimeError, Segment, Tracer, Verbosity, Vm, VmBuilder,
};
