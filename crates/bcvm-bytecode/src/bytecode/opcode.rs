//! Instruction opcodes and their assembly mnemonics.
//!
//! The mnemonic table is a plain `match`, so the mapping is fixed at compile
//! time and shared read-only by the assembler, the VM and the disassembler.

use std::fmt;
use std::str::FromStr;

/// Instruction opcodes (1 byte each).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    // Memory manipulation
    Literal = 0,
    LiteralArray = 1,
    Load = 2,
    Store = 3,
    LoadLcl = 4,
    StoreLcl = 5,
    LoadArg = 6,
    Alloc = 7,
    Free = 8,

    // Arithmetic / logic
    Add = 9,
    Sub = 10,
    Less = 11,
    Greater = 12,
    Not = 13,
    Equals = 14,

    // Flow control
    Jmp = 15,
    JmpIf = 16,
    Call = 17,
    Return = 18,

    // Console output
    Print = 19,
    PrintInt = 20,
    PrintEndl = 21,
}

impl Opcode {
    /// Every opcode in numeric order.
    pub const ALL: [Opcode; 22] = [
        Self::Literal,
        Self::LiteralArray,
        Self::Load,
        Self::Store,
        Self::LoadLcl,
        Self::StoreLcl,
        Self::LoadArg,
        Self::Alloc,
        Self::Free,
        Self::Add,
        Self::Sub,
        Self::Less,
        Self::Greater,
        Self::Not,
        Self::Equals,
        Self::Jmp,
        Self::JmpIf,
        Self::Call,
        Self::Return,
        Self::Print,
        Self::PrintInt,
        Self::PrintEndl,
    ];

    /// Decode an opcode byte. Returns `None` for bytes outside the table.
    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Look up an assembly mnemonic (case-sensitive).
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        let op = match name {
            "LITERAL" => Self::Literal,
            "LITERAL_ARRAY" => Self::LiteralArray,
            "LOAD" => Self::Load,
            "STORE" => Self::Store,
            "LOAD_LCL" => Self::LoadLcl,
            "STORE_LCL" => Self::StoreLcl,
            "LOAD_ARG" => Self::LoadArg,
            "ALLOC" => Self::Alloc,
            "FREE" => Self::Free,
            "ADD" => Self::Add,
            "SUB" => Self::Sub,
            "LESS" => Self::Less,
            "GREATER" => Self::Greater,
            "NOT" => Self::Not,
            "EQUALS" => Self::Equals,
            "JMP" => Self::Jmp,
            "JMP_IF" => Self::JmpIf,
            "CALL" => Self::Call,
            "RETURN" => Self::Return,
            "PRINT" => Self::Print,
            "PRINT_INT" => Self::PrintInt,
            "PRINT_ENDL" => Self::PrintEndl,
            _ => return None,
        };
        Some(op)
    }

    /// Assembly mnemonic for this opcode.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Literal => "LITERAL",
            Self::LiteralArray => "LITERAL_ARRAY",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::LoadLcl => "LOAD_LCL",
            Self::StoreLcl => "STORE_LCL",
            Self::LoadArg => "LOAD_ARG",
            Self::Alloc => "ALLOC",
            Self::Free => "FREE",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Less => "LESS",
            Self::Greater => "GREATER",
            Self::Not => "NOT",
            Self::Equals => "EQUALS",
            Self::Jmp => "JMP",
            Self::JmpIf => "JMP_IF",
            Self::Call => "CALL",
            Self::Return => "RETURN",
            Self::Print => "PRINT",
            Self::PrintInt => "PRINT_INT",
            Self::PrintEndl => "PRINT_ENDL",
        }
    }

    /// Whether the opcode carries inline operand words.
    pub fn has_operands(self) -> bool {
        matches!(self, Self::Literal | Self::LiteralArray)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_mnemonic(s).ok_or(())
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> u8 {
        op as u8
    }
}
