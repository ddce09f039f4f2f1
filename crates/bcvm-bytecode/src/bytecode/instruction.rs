//! Instruction definitions.
//!
//! Instructions are runtime-friendly values with `decode`/`encode` methods
//! for the wire format. The assembler encodes through them and the
//! disassembler decodes through them, so both agree on operand layout.

use super::constants::{FUNCTION_HEADER_SIZE, WORD_SIZE};
use super::image::ImageError;
use super::opcode::Opcode;
use super::word::{read_word, write_word};

/// One decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `LITERAL <word>`
    Literal(i32),
    /// `LITERAL_ARRAY <count> <word>*`
    LiteralArray(Vec<i32>),
    /// Any opcode without inline operands.
    Op(Opcode),
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Literal(_) => Opcode::Literal,
            Self::LiteralArray(_) => Opcode::LiteralArray,
            Self::Op(op) => *op,
        }
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::Literal(_) => 1 + WORD_SIZE,
            Self::LiteralArray(values) => 1 + WORD_SIZE + values.len() * WORD_SIZE,
            Self::Op(_) => 1,
        }
    }

    /// Append the wire encoding to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.opcode().into());
        match self {
            Self::Literal(value) => write_word(out, *value),
            Self::LiteralArray(values) => {
                write_word(out, values.len() as i32);
                for &value in values {
                    write_word(out, value);
                }
            }
            Self::Op(op) => debug_assert!(!op.has_operands(), "{op} needs operands"),
        }
    }

    /// Decode the instruction starting at `offset`.
    pub fn decode(code: &[u8], offset: usize) -> Result<Self, ImageError> {
        let Some(&byte) = code.get(offset) else {
            return Err(ImageError::TruncatedOperand(offset));
        };
        let opcode = Opcode::from_u8(byte).ok_or(ImageError::UnknownOpcode {
            opcode: byte,
            offset,
        })?;
        let operand = offset + 1;
        let word = |at: usize| read_word(code, at).ok_or(ImageError::TruncatedOperand(at));

        match opcode {
            Opcode::Literal => Ok(Self::Literal(word(operand)?)),
            Opcode::LiteralArray => {
                let count = word(operand)?;
                let count = usize::try_from(count).map_err(|_| ImageError::TruncatedOperand(operand))?;
                let first = operand + WORD_SIZE;
                let needed = count
                    .checked_mul(WORD_SIZE)
                    .and_then(|n| n.checked_add(first))
                    .ok_or(ImageError::TruncatedOperand(operand))?;
                if needed > code.len() {
                    return Err(ImageError::TruncatedOperand(operand));
                }
                let values = (0..count)
                    .map(|i| word(first + i * WORD_SIZE))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::LiteralArray(values))
            }
            op => Ok(Self::Op(op)),
        }
    }
}

/// The two words at a function's entry address, read by `CALL`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FunctionHeader {
    /// Number of 4-byte argument slots.
    pub arg_count: u32,
    /// Number of 4-byte local variable slots.
    pub local_count: u32,
}

impl FunctionHeader {
    pub const SIZE: usize = FUNCTION_HEADER_SIZE;

    pub fn new(arg_count: u32, local_count: u32) -> Self {
        Self {
            arg_count,
            local_count,
        }
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        write_word(out, self.arg_count as i32);
        write_word(out, self.local_count as i32);
    }

    pub fn decode(code: &[u8], offset: usize) -> Result<Self, ImageError> {
        let word = |at: usize| {
            read_word(code, at)
                .map(|w| w as u32)
                .ok_or(ImageError::TruncatedOperand(at))
        };
        Ok(Self {
            arg_count: word(offset)?,
            local_count: word(offset + WORD_SIZE)?,
        })
    }
}
