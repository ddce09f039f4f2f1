//! Human-readable image dump for debugging.
//!
//! Output has two sections: `[header]` with the decoded header words and
//! `[code]` with one line per instruction, prefixed by its absolute runtime
//! address. Raw images carry no symbol information, so function headers can
//! only be recognized when the caller supplies the symbol addresses (see
//! [`dump_with`]); otherwise the two header words are decoded as whatever
//! opcodes their bytes happen to spell.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use bcvm_core::{Colors, width_for_count};

use super::image::{Image, ImageError};
use super::instruction::{FunctionHeader, Instruction};

/// Generate a dump of the image without symbol names.
pub fn dump(image: &Image, colors: Colors) -> String {
    dump_with(image, &[], colors)
}

/// Generate a dump, labelling absolute addresses with symbol names.
///
/// Names starting with `$` mark function entries: the eight bytes at that
/// address are printed as the function header instead of being decoded.
pub fn dump_with(image: &Image, labels: &[(u32, String)], colors: Colors) -> String {
    let mut out = String::new();
    let ctx = DumpContext::new(image, labels, colors);

    dump_header(&mut out, image, &ctx);
    dump_code(&mut out, image, &ctx);

    out
}

struct DumpContext<'a> {
    /// Symbol names by absolute address, in declaration order.
    labels: BTreeMap<u32, Vec<&'a str>>,
    /// Width of the address column.
    addr_width: usize,
    colors: Colors,
}

impl<'a> DumpContext<'a> {
    fn new(image: &Image, labels: &'a [(u32, String)], colors: Colors) -> Self {
        let mut by_addr: BTreeMap<u32, Vec<&str>> = BTreeMap::new();
        for (addr, name) in labels {
            by_addr.entry(*addr).or_default().push(name.as_str());
        }
        Self {
            labels: by_addr,
            addr_width: width_for_count(image.static_base() as usize + 1),
            colors,
        }
    }

    fn is_function(&self, addr: u32) -> bool {
        self.labels
            .get(&addr)
            .is_some_and(|names| names.iter().any(|n| n.starts_with('$')))
    }
}

fn dump_header(out: &mut String, image: &Image, ctx: &DumpContext) {
    let c = &ctx.colors;
    let header = image.header();

    writeln!(out, "{}", c.paint(c.symbol, "[header]")).unwrap();
    writeln!(out, "stack_size   = {}", header.stack_size).unwrap();
    writeln!(out, "static_count = {}", header.static_count).unwrap();
    writeln!(out, "code_bytes   = {}", image.code_len()).unwrap();
    out.push('\n');
}

fn dump_code(out: &mut String, image: &Image, ctx: &DumpContext) {
    let c = &ctx.colors;
    let code = image.code();
    let base = image.header().stack_size;
    let w = ctx.addr_width;

    writeln!(out, "{}", c.paint(c.symbol, "[code]")).unwrap();

    let mut offset = 0usize;
    while offset < code.len() {
        let addr = base + offset as u32;
        if let Some(names) = ctx.labels.get(&addr) {
            for name in names {
                writeln!(out, "{}:", c.paint(c.symbol, name)).unwrap();
            }
        }
        let at = c.paint(c.meta, format!("{addr:0w$}"));

        if ctx.is_function(addr)
            && let Ok(header) = FunctionHeader::decode(code, offset)
        {
            let words = format!(".header args={} locals={}", header.arg_count, header.local_count);
            writeln!(out, "  {at}  {}", c.paint(c.meta, words)).unwrap();
            offset += FunctionHeader::SIZE;
            continue;
        }

        match Instruction::decode(code, offset) {
            Ok(instr) => {
                let operands = format_operands(&instr, c);
                writeln!(out, "  {at}  {}{operands}", instr.opcode()).unwrap();
                offset += instr.size();
            }
            Err(ImageError::UnknownOpcode { opcode, .. }) => {
                writeln!(out, "  {at}  .byte {opcode:#04x}").unwrap();
                offset += 1;
            }
            Err(_) => {
                writeln!(out, "  {at}  .byte {:#04x}  {}", code[offset], c.paint(c.meta, "; truncated")).unwrap();
                offset += 1;
            }
        }
    }
}

fn format_operands(instr: &Instruction, c: &Colors) -> String {
    match instr {
        Instruction::Literal(value) => format!(" {}", c.paint(c.value, value)),
        Instruction::LiteralArray(values) => {
            let list: Vec<String> = values.iter().map(i32::to_string).collect();
            let mut s = format!(" {}", c.paint(c.value, list.join(" ")));
            if let Some(text) = printable_text(values) {
                write!(s, "  {}", c.paint(c.meta, format!("; {text:?}"))).unwrap();
            }
            s
        }
        Instruction::Op(_) => String::new(),
    }
}

/// Render the values as a string if every element is a printable character.
fn printable_text(values: &[i32]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    values
        .iter()
        .map(|&v| {
            u32::try_from(v)
                .ok()
                .and_then(char::from_u32)
                .filter(|ch| !ch.is_control())
        })
        .collect()
}
