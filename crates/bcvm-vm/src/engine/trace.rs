//! Tracing infrastructure for debugging VM execution.
//!
//! The tracer is a zero-cost abstraction: with `NoopTracer` every hook is an
//! `#[inline(always)]` empty function and the calls disappear. `PrintTracer`
//! collects one line per executed instruction plus sub-lines for calls,
//! returns, heap operations and program output, depending on verbosity.

use std::collections::BTreeMap;

use bcvm_bytecode::Opcode;
use bcvm_core::{Colors, truncate_text, width_for_count};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default (-v): instructions, calls and returns.
    #[default]
    Default,
    /// Verbose (-vv): adds stack pointer and heap operations.
    Verbose,
    /// Very verbose (-vvv): adds pushed values and program output.
    VeryVerbose,
}

/// Tracer trait for VM execution instrumentation.
///
/// Each method is called at a specific point during execution:
/// - `trace_instruction` - before executing an instruction
/// - `trace_push` - after a value is pushed
/// - `trace_call` - after a frame is set up
/// - `trace_return` - after a frame is torn down
/// - `trace_alloc` / `trace_free` - after a heap operation
/// - `trace_output` - after the program writes to its output
pub trait Tracer {
    fn trace_instruction(&mut self, pc: u32, opcode: Opcode, sp: u32);

    fn trace_push(&mut self, value: i32);

    fn trace_call(&mut self, target: u32, arg: u32, lcl: u32);

    fn trace_return(&mut self, value: i32, resume: u32);

    fn trace_alloc(&mut self, size: i32, ptr: u32);

    fn trace_free(&mut self, ptr: u32);

    fn trace_output(&mut self, text: &str);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_instruction(&mut self, _pc: u32, _opcode: Opcode, _sp: u32) {}

    #[inline(always)]
    fn trace_push(&mut self, _value: i32) {}

    #[inline(always)]
    fn trace_call(&mut self, _target: u32, _arg: u32, _lcl: u32) {}

    #[inline(always)]
    fn trace_return(&mut self, _value: i32, _resume: u32) {}

    #[inline(always)]
    fn trace_alloc(&mut self, _size: i32, _ptr: u32) {}

    #[inline(always)]
    fn trace_free(&mut self, _ptr: u32) {}

    #[inline(always)]
    fn trace_output(&mut self, _text: &str) {}
}

/// Longest program-output excerpt shown on a trace line.
const OUTPUT_EXCERPT: usize = 32;

/// Tracer that collects execution trace for debugging.
pub struct PrintTracer {
    verbosity: Verbosity,
    /// Collected trace lines.
    lines: Vec<String>,
    /// Function and label names by address.
    labels: BTreeMap<u32, String>,
    /// Names of active functions, innermost last.
    call_stack: Vec<String>,
    /// Address column width.
    addr_width: usize,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            lines: Vec::new(),
            labels: BTreeMap::new(),
            call_stack: Vec::new(),
            addr_width: 1,
            colors,
        }
    }

    /// Name addresses (functions and labels) and align the address column
    /// for addresses below `max_addr`.
    pub fn with_labels(mut self, labels: &[(u32, String)], max_addr: u32) -> Self {
        self.labels = labels.iter().cloned().collect();
        self.addr_width = width_for_count(max_addr as usize + 1);
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Write the collected trace to stderr.
    pub fn print(&self) {
        for line in &self.lines {
            eprintln!("{}", line);
        }
    }

    fn name_of(&self, addr: u32) -> String {
        self.labels
            .get(&addr)
            .cloned()
            .unwrap_or_else(|| format!("<{addr}>"))
    }

    fn add_subline(&mut self, symbol: &str, content: &str) {
        let pad = " ".repeat(self.addr_width);
        self.lines.push(format!("  {pad}  {symbol} {content}"));
    }
}

impl Tracer for PrintTracer {
    fn trace_instruction(&mut self, pc: u32, opcode: Opcode, sp: u32) {
        let c = self.colors;
        if let Some(label) = self.labels.get(&pc) {
            self.lines.push(format!("{}:", c.paint(c.symbol, label)));
        }
        let w = self.addr_width;
        let mut line = format!("  {}  {opcode}", c.paint(c.meta, format!("{pc:0w$}")));
        if self.verbosity != Verbosity::Default {
            line.push_str(&format!("  {}", c.paint(c.meta, format!("sp={sp}"))));
        }
        self.lines.push(line);
    }

    fn trace_push(&mut self, value: i32) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        self.add_subline("↓", &c.paint(c.value, value));
    }

    fn trace_call(&mut self, target: u32, arg: u32, lcl: u32) {
        let c = self.colors;
        let name = self.name_of(target);
        let mut content = c.paint(c.symbol, &name);
        if self.verbosity != Verbosity::Default {
            content.push_str(&format!("  {}", c.paint(c.meta, format!("arg={arg} lcl={lcl}"))));
        }
        self.add_subline("▶", &content);
        self.call_stack.push(name);
    }

    fn trace_return(&mut self, value: i32, resume: u32) {
        let c = self.colors;
        let name = self.call_stack.pop().unwrap_or_default();
        let content = format!(
            "{} = {}  {}",
            c.paint(c.symbol, &name),
            c.paint(c.value, value),
            c.paint(c.meta, format!("→ {resume}"))
        );
        self.add_subline("◀", &content);
    }

    fn trace_alloc(&mut self, size: i32, ptr: u32) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        self.add_subline("+", &format!("alloc {size} @ {ptr}"));
    }

    fn trace_free(&mut self, ptr: u32) {
        if self.verbosity == Verbosity::Default {
            return;
        }
        self.add_subline("-", &format!("free @ {ptr}"));
    }

    fn trace_output(&mut self, text: &str) {
        if self.verbosity != Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        let shown = truncate_text(&text.escape_debug().to_string(), OUTPUT_EXCERPT);
        self.add_subline(">", &c.paint(c.value, shown));
    }
}
