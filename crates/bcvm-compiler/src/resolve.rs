//! Pass 1: build the symbol table.
//!
//! Walks every line, assigning addresses to functions and labels, slots to
//! variables, and counting instruction bytes with the same size rules pass 2
//! encodes with. Statics are fixed up to absolute addresses at the end, once
//! the instruction stream length is known.

use bcvm_bytecode::{FUNCTION_HEADER_SIZE, Instruction, Opcode, WORD_SIZE};

use crate::classify::{Abort, LineKind, classify, string_contents};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::{Token, TokenKind};
use crate::source::{Line, Span, lines, words};
use crate::symbol_table::{SymbolError, SymbolTable};

/// Pass-1 output, consumed by pass 2.
#[derive(Debug, Clone)]
pub struct ResolvedProgram {
    pub symbols: SymbolTable,
    pub instruction_bytes: u32,
}

/// Run pass 1 over `source`. Stops at the first error.
pub fn resolve(source: &str, stack_size: u32) -> Result<ResolvedProgram, Diagnostics> {
    let mut resolver = Resolver {
        source,
        symbols: SymbolTable::new(stack_size),
        diagnostics: Diagnostics::new(),
    };

    for line in lines(source) {
        if resolver.line(&line).is_err() {
            return Err(resolver.diagnostics);
        }
    }

    let mut symbols = resolver.symbols;
    symbols.allocate_static();
    Ok(ResolvedProgram {
        instruction_bytes: symbols.instruction_count(),
        symbols,
    })
}

struct Resolver<'s> {
    source: &'s str,
    symbols: SymbolTable,
    diagnostics: Diagnostics,
}

impl Resolver<'_> {
    fn line(&mut self, line: &Line<'_>) -> Result<(), Abort> {
        match classify(line, &mut self.diagnostics)? {
            LineKind::Label => {
                let result = self.symbols.add_label(line.opname);
                self.check(result, line.number, line.opname_span.clone())
            }
            LineKind::Function => {
                let result = self.symbols.add_function(line.opname, line.args);
                if let Err(err) = &result {
                    // Point at the offending argument when there is one.
                    let span = words(line.args, line.args_offset)
                        .into_iter()
                        .find(|(word, _)| *word == err.name())
                        .map_or(line.opname_span.clone(), |(_, span)| span);
                    return self.check(result, line.number, span);
                }
                self.symbols.advance(FUNCTION_HEADER_SIZE as u32);
                Ok(())
            }
            LineKind::Instruction(opcode, tokens) => self.instruction(line, opcode, &tokens),
        }
    }

    fn instruction(&mut self, line: &Line<'_>, opcode: Opcode, tokens: &[Token]) -> Result<(), Abort> {
        let size = match opcode {
            Opcode::Literal => {
                self.check_var(line, &tokens[0])?;
                Instruction::Literal(0).size()
            }
            Opcode::LiteralArray => {
                let elements = match tokens {
                    [only] if only.kind == TokenKind::Str => {
                        string_contents(only, self.source).chars().count()
                    }
                    _ => {
                        for token in tokens {
                            self.check_var(line, token)?;
                        }
                        tokens.len()
                    }
                };
                1 + WORD_SIZE + elements * WORD_SIZE
            }
            op => Instruction::Op(op).size(),
        };
        self.symbols.advance(size as u32);
        Ok(())
    }

    /// Declare a `#name` operand on first use.
    fn check_var(&mut self, line: &Line<'_>, token: &Token) -> Result<(), Abort> {
        if token.kind != TokenKind::Variable {
            return Ok(());
        }
        let name = token.text(self.source);
        if self.symbols.has_symbol(name) {
            return Ok(());
        }
        let result = self.symbols.add_variable(name, false);
        self.check(result, line.number, token.span.clone())
    }

    fn check(&mut self, result: Result<(), SymbolError>, line: usize, span: Span) -> Result<(), Abort> {
        let Err(err) = result else {
            return Ok(());
        };
        let kind = match err {
            SymbolError::Duplicate(_) => DiagnosticKind::DuplicateSymbol,
            SymbolError::ArgumentInStaticSection(_) => DiagnosticKind::ArgumentInStaticSection,
            SymbolError::MalformedArgument(_) => DiagnosticKind::MalformedArgument,
        };
        self.diagnostics
            .report(kind, line, span)
            .message(err.name())
            .emit();
        Err(Abort)
    }
}
