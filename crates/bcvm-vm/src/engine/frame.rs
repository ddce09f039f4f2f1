//! Frame registers for function calls.
//!
//! Frames live on the operand stack itself: `CALL` pushes the caller's
//! RTN, LCL, ARG and THIS (in that order) and `RETURN` reads them back
//! relative to the callee's LCL.

use bcvm_bytecode::WORD_SIZE;

/// Bytes of saved registers between a frame's arguments and its locals.
pub const SAVED_FRAME_SIZE: u32 = 4 * WORD_SIZE as u32;

/// The four frame registers. All are absolute addresses into the stack
/// region, except RTN which points into the instruction region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    /// First argument slot of the active frame.
    pub arg: u32,
    /// First local slot of the active frame.
    pub lcl: u32,
    /// Instruction to resume at on return.
    pub rtn: u32,
    /// Saved and restored unchanged; reserved for methods.
    pub this: u32,
}

impl Registers {
    /// Values in push order.
    pub fn saved(&self) -> [u32; 4] {
        [self.rtn, self.lcl, self.arg, self.this]
    }

    /// Inverse of [`Registers::saved`].
    pub fn from_saved([rtn, lcl, arg, this]: [u32; 4]) -> Self {
        Self { arg, lcl, rtn, this }
    }
}
