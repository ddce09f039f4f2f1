//! Line classification shared by both assembler passes.
//!
//! Checks the line's shape (sigil names, mnemonic, operand count) so that
//! pass 1 and pass 2 agree on what every line is before either touches the
//! symbol table.

use bcvm_bytecode::Opcode;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::lexer::{Token, TokenKind, lex_at};
use crate::source::Line;

/// Marker for "a diagnostic was emitted, stop the pass".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Abort;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind {
    Label,
    Function,
    Instruction(Opcode, Vec<Token>),
}

pub(crate) fn classify(line: &Line<'_>, diagnostics: &mut Diagnostics) -> Result<LineKind, Abort> {
    if line.opname.starts_with('@') || line.opname.starts_with('$') {
        if line.sigil_name().is_empty() {
            diagnostics
                .report(DiagnosticKind::MissingName, line.number, line.opname_span.clone())
                .message(line.opname)
                .emit();
            return Err(Abort);
        }
        if line.opname.starts_with('$') {
            return Ok(LineKind::Function);
        }
        if line.has_args() {
            diagnostics
                .report(DiagnosticKind::WrongArity, line.number, line.args_span())
                .message(format!("label `{}` takes no operands", line.opname))
                .emit();
            return Err(Abort);
        }
        return Ok(LineKind::Label);
    }

    let Some(opcode) = Opcode::from_mnemonic(line.opname) else {
        diagnostics
            .report(DiagnosticKind::InvalidOpcode, line.number, line.opname_span.clone())
            .message(line.opname)
            .emit();
        return Err(Abort);
    };

    let tokens = lex_at(line.args, line.args_offset);
    let arity_error = match opcode {
        Opcode::Literal if tokens.len() != 1 => Some(format!(
            "`{opcode}` takes exactly one operand, found {}",
            tokens.len()
        )),
        Opcode::LiteralArray if tokens.is_empty() => {
            Some(format!("`{opcode}` takes at least one operand"))
        }
        Opcode::LiteralArray
            if tokens.len() > 1 && tokens.iter().any(|t| t.kind == TokenKind::Str) =>
        {
            Some(format!("a string must be the only operand of `{opcode}`"))
        }
        op if !op.has_operands() && line.has_args() => {
            Some(format!("`{opcode}` takes no operands"))
        }
        _ => None,
    };

    if let Some(detail) = arity_error {
        let span = if line.has_args() {
            line.args_span()
        } else {
            line.opname_span.clone()
        };
        diagnostics
            .report(DiagnosticKind::WrongArity, line.number, span)
            .message(detail)
            .emit();
        return Err(Abort);
    }

    Ok(LineKind::Instruction(opcode, tokens))
}

/// Characters of a string literal token, without the quotes.
pub(crate) fn string_contents<'t>(token: &Token, source: &'t str) -> &'t str {
    let text = token.text(source);
    &text[1..text.len() - 1]
}
