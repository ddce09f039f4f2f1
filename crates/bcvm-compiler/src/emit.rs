//! Pass 2: encode the instruction stream.
//!
//! Re-scans the source with the finished symbol table. Every operand is
//! resolved to its final word here, so forward references to labels and
//! functions work.

use bcvm_bytecode::{FunctionHeader, Instruction, Opcode};

use crate::classify::{Abort, LineKind, classify, string_contents};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::{Token, TokenKind};
use crate::resolve::ResolvedProgram;
use crate::source::{Line, lines};
use crate::symbol_table::SymbolTable;

/// Why an operand could not be turned into a word.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LiteralError {
    #[error("`{0}` is not defined")]
    Undefined(String),

    #[error("`{0}` does not fit in a 32-bit word")]
    OutOfRange(String),

    #[error("strings are only allowed as the sole operand of `LITERAL_ARRAY`")]
    MisplacedString,

    #[error("`{0}` is not a literal")]
    Malformed(String),
}

/// Resolve one operand to its word value.
pub fn parse_literal(token: &Token, source: &str, symbols: &SymbolTable) -> Result<i32, LiteralError> {
    let text = token.text(source);
    match token.kind {
        TokenKind::Variable | TokenKind::Label | TokenKind::Function => symbols
            .value(text)
            .map(|value| value as i32)
            .ok_or_else(|| LiteralError::Undefined(text.to_string())),
        TokenKind::Char => text[1..]
            .chars()
            .next()
            .map(|ch| ch as i32)
            .ok_or_else(|| LiteralError::Malformed(text.to_string())),
        TokenKind::Number => text
            .parse::<i32>()
            .map_err(|_| LiteralError::OutOfRange(text.to_string())),
        TokenKind::Str => Err(LiteralError::MisplacedString),
        TokenKind::Garbage => Err(LiteralError::Malformed(text.to_string())),
    }
}

/// Run pass 2, producing the instruction stream. Stops at the first error.
pub fn emit(source: &str, program: &ResolvedProgram) -> Result<Vec<u8>, Diagnostics> {
    let mut emitter = Emitter {
        source,
        symbols: &program.symbols,
        diagnostics: Diagnostics::new(),
        code: Vec::with_capacity(program.instruction_bytes as usize),
    };

    for line in lines(source) {
        if emitter.line(&line).is_err() {
            return Err(emitter.diagnostics);
        }
    }

    debug_assert_eq!(emitter.code.len(), program.instruction_bytes as usize);
    Ok(emitter.code)
}

struct Emitter<'s, 'p> {
    source: &'s str,
    symbols: &'p SymbolTable,
    diagnostics: Diagnostics,
    code: Vec<u8>,
}

impl<'s> Emitter<'s, '_> {
    fn line(&mut self, line: &Line<'s>) -> Result<(), Abort> {
        match classify(line, &mut self.diagnostics)? {
            LineKind::Label => {}
            LineKind::Function => {
                let meta = self.symbols.function_meta(line.opname);
                let header = meta.map_or_else(FunctionHeader::default, |meta| {
                    FunctionHeader::new(meta.arg_count, meta.local_count)
                });
                header.encode(&mut self.code);
            }
            LineKind::Instruction(opcode, tokens) => {
                let instr = self.instruction(line, opcode, &tokens)?;
                instr.encode(&mut self.code);
            }
        }
        Ok(())
    }

    fn instruction(
        &mut self,
        line: &Line<'_>,
        opcode: Opcode,
        tokens: &[Token],
    ) -> Result<Instruction, Abort> {
        match opcode {
            Opcode::Literal => Ok(Instruction::Literal(self.literal(line, &tokens[0])?)),
            Opcode::LiteralArray => {
                let values = match tokens {
                    [only] if only.kind == TokenKind::Str => string_contents(only, self.source)
                        .chars()
                        .map(|ch| ch as i32)
                        .collect(),
                    _ => tokens
                        .iter()
                        .map(|token| self.literal(line, token))
                        .collect::<Result<Vec<_>, _>>()?,
                };
                Ok(Instruction::LiteralArray(values))
            }
            op => Ok(Instruction::Op(op)),
        }
    }

    fn literal(&mut self, line: &Line<'_>, token: &Token) -> Result<i32, Abort> {
        parse_literal(token, self.source, self.symbols).map_err(|err| {
            let (kind, detail) = match &err {
                LiteralError::Undefined(name) => (DiagnosticKind::UndefinedSymbol, name.clone()),
                _ => (DiagnosticKind::MalformedLiteral, err.to_string()),
            };
            self.diagnostics
                .report(kind, line.number, token.span.clone())
                .message(detail)
                .emit();
            Abort
        })
    }
}
