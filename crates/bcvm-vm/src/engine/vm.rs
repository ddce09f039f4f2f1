//! Virtual machine for executing compiled images.
//!
//! Memory layout after loading, in ascending addresses:
//!
//! ```text
//! [0, stack_size)                stack
//! [stack_size, static_base)      instruction stream
//! [static_base, static_end)      static variables
//! [static_end, static_end + 4)   free-list head
//! [static_end + 4, arena end)    heap
//! ```

use std::io::Write;
use std::path::Path;

use bcvm_bytecode::{FUNCTION_HEADER_SIZE, Image, Opcode, WORD_SIZE};

use super::error::{LoadError, RuntimeError};
use super::frame::{Registers, SAVED_FRAME_SIZE};
use super::heap::{Heap, Segment};
use super::memory::Memory;
use super::trace::{NoopTracer, Tracer};

/// Default arena size (16 MiB).
pub const DEFAULT_MEMORY_SIZE: usize = 16 * 1024 * 1024;

const WORD: u32 = WORD_SIZE as u32;

/// Region boundaries of the loaded program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Layout {
    stack_size: u32,
    static_base: u32,
}

/// Builder for VM instances.
pub struct VmBuilder {
    memory_size: usize,
    exec_fuel: Option<u32>,
}

impl VmBuilder {
    pub fn new() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            exec_fuel: None,
        }
    }

    /// Size of the whole arena in bytes. Capped at the 32-bit address space.
    pub fn memory_size(mut self, bytes: usize) -> Self {
        self.memory_size = bytes.min(u32::MAX as usize);
        self
    }

    /// Maximum number of instructions to execute.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    pub fn build(self) -> Vm {
        Vm {
            memory: Memory::new(0),
            memory_size: self.memory_size,
            exec_fuel: self.exec_fuel,
            layout: None,
            heap: Heap::default(),
            registers: Registers::default(),
            sp: 0,
            pc: 0,
        }
    }
}

impl Default for VmBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Virtual machine state for one program execution.
pub struct Vm {
    memory: Memory,
    memory_size: usize,
    exec_fuel: Option<u32>,
    layout: Option<Layout>,
    heap: Heap,
    registers: Registers,
    /// Byte offset of the next free stack slot.
    sp: u32,
    pc: u32,
}

impl Default for Vm {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Vm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> VmBuilder {
        VmBuilder::new()
    }

    /// Read an image file and load it.
    pub fn load_program(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.set_program(&bytes)
    }

    /// Decode an encoded image and load it.
    pub fn set_program(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let image = Image::from_bytes(bytes)?;
        self.load_image(&image)
    }

    /// Lay out a fresh arena for `image` and reset all registers.
    pub fn load_image(&mut self, image: &Image) -> Result<(), LoadError> {
        let header = image.header();
        let static_base = u64::from(header.stack_size) + u64::from(image.code_len());
        let static_end = static_base + u64::from(header.static_count) * u64::from(WORD);
        let required = static_end + u64::from(WORD);
        let available = self.memory_size;
        let too_small = || LoadError::MemoryTooSmall {
            required,
            available,
        };
        if required > available as u64 {
            return Err(too_small());
        }

        // Every address below is < memory_size <= u32::MAX.
        let mut memory = Memory::new(available);
        memory
            .copy_in(header.stack_size, image.code())
            .map_err(|_| too_small())?;
        self.heap = Heap::init(&mut memory, static_end as u32).map_err(|_| too_small())?;
        self.memory = memory;
        self.layout = Some(Layout {
            stack_size: header.stack_size,
            static_base: static_base as u32,
        });
        self.registers = Registers::default();
        self.sp = 0;
        self.pc = header.stack_size;
        Ok(())
    }

    pub fn sp(&self) -> u32 {
        self.sp
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    pub fn registers(&self) -> Registers {
        self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn heap(&self) -> Heap {
        self.heap
    }

    /// Free heap segments in address order.
    pub fn free_segments(&self) -> Result<Vec<Segment>, RuntimeError> {
        self.heap.free_segments(&self.memory)
    }

    /// Run the loaded program to completion, writing its output to `out`.
    pub fn interpret(&mut self, out: &mut impl Write) -> Result<(), RuntimeError> {
        self.interpret_with(out, &mut NoopTracer)
    }

    /// Run with a tracer attached.
    ///
    /// Execution stops when the program counter reaches the end of the
    /// instruction stream. The VM is not reset afterwards; load the image
    /// again to rerun it.
    pub fn interpret_with<W: Write, T: Tracer>(
        &mut self,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        let layout = self.layout.ok_or(RuntimeError::NoProgram)?;
        let mut fuel = self.exec_fuel;

        while self.pc != layout.static_base {
            if self.pc < layout.stack_size || self.pc > layout.static_base {
                return Err(RuntimeError::PcOutOfBounds(self.pc));
            }
            if let Some(remaining) = fuel.as_mut() {
                if *remaining == 0 {
                    return Err(RuntimeError::ExecFuelExhausted);
                }
                *remaining -= 1;
            }

            let byte = self.memory.byte(self.pc)?;
            let opcode = Opcode::from_u8(byte).ok_or(RuntimeError::UnknownOpcode {
                opcode: byte,
                addr: self.pc,
            })?;
            tracer.trace_instruction(self.pc, opcode, self.sp);
            self.step(opcode, layout, out, tracer)?;
        }

        out.flush()?;
        Ok(())
    }

    fn step<W: Write, T: Tracer>(
        &mut self,
        opcode: Opcode,
        layout: Layout,
        out: &mut W,
        tracer: &mut T,
    ) -> Result<(), RuntimeError> {
        let mut next = self.pc + 1;

        match opcode {
            Opcode::Literal => {
                let value = self.memory.read(self.pc + 1)?;
                self.push(value, tracer)?;
                next = self.pc + 1 + WORD;
            }
            Opcode::LiteralArray => {
                let count = self.memory.read(self.pc + 1)?;
                let count = u32::try_from(count).map_err(|_| RuntimeError::NegativeCount(count))?;
                let first = self.pc + 1 + WORD;
                for i in 0..count {
                    let value = self.memory.read(first + i * WORD)?;
                    self.push(value, tracer)?;
                }
                next = first + count * WORD;
            }
            Opcode::Load => {
                let addr = self.pop_addr()?;
                let value = self.memory.read(addr)?;
                self.push(value, tracer)?;
            }
            Opcode::Store => {
                let addr = self.pop_addr()?;
                let value = self.pop()?;
                self.memory.write(addr, value)?;
            }
            Opcode::LoadLcl => {
                let addr = self.registers.lcl.wrapping_add(self.pop_addr()?);
                let value = self.memory.read(addr)?;
                self.push(value, tracer)?;
            }
            Opcode::StoreLcl => {
                let addr = self.registers.lcl.wrapping_add(self.pop_addr()?);
                let value = self.pop()?;
                self.memory.write(addr, value)?;
            }
            Opcode::LoadArg => {
                let addr = self.registers.arg.wrapping_add(self.pop_addr()?);
                let value = self.memory.read(addr)?;
                self.push(value, tracer)?;
            }
            Opcode::Alloc => {
                let size = self.pop()?;
                let ptr = self.heap.alloc(&mut self.memory, size)?;
                tracer.trace_alloc(size, ptr);
                self.push(ptr as i32, tracer)?;
            }
            Opcode::Free => {
                let ptr = self.pop_addr()?;
                self.heap.free(&mut self.memory, ptr)?;
                tracer.trace_free(ptr);
            }
            Opcode::Add => self.binary(tracer, i32::wrapping_add)?,
            Opcode::Sub => self.binary(tracer, i32::wrapping_sub)?,
            Opcode::Less => self.binary(tracer, |a, b| i32::from(a < b))?,
            Opcode::Greater => self.binary(tracer, |a, b| i32::from(a > b))?,
            Opcode::Equals => self.binary(tracer, |a, b| i32::from(a == b))?,
            Opcode::Not => {
                let a = self.pop()?;
                self.push(i32::from(a == 0), tracer)?;
            }
            Opcode::Jmp => next = self.pop_addr()?,
            Opcode::JmpIf => {
                let target = self.pop_addr()?;
                let condition = self.pop()?;
                if condition != 0 {
                    next = target;
                }
            }
            Opcode::Call => next = self.call(layout, tracer)?,
            Opcode::Return => next = self.ret(tracer)?,
            Opcode::Print => {
                let count = self.pop()?;
                let count = usize::try_from(count).map_err(|_| RuntimeError::NegativeCount(count))?;
                // Words that are not Unicode scalar values print as U+FFFD.
                let mut chars = Vec::with_capacity(count.min(1024));
                for _ in 0..count {
                    let value = self.pop()?;
                    chars.push(char::from_u32(value as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                let text: String = chars.into_iter().rev().collect();
                out.write_all(text.as_bytes())?;
                tracer.trace_output(&text);
            }
            Opcode::PrintInt => {
                let text = self.pop()?.to_string();
                out.write_all(text.as_bytes())?;
                tracer.trace_output(&text);
            }
            Opcode::PrintEndl => {
                out.write_all(b"\n")?;
                tracer.trace_output("\n");
            }
        }

        self.pc = next;
        Ok(())
    }

    /// Set up a frame for the function whose address is on top of the stack.
    /// Returns the first instruction of its body.
    fn call<T: Tracer>(&mut self, layout: Layout, tracer: &mut T) -> Result<u32, RuntimeError> {
        let target = self.pop_addr()?;
        let header_end = target.checked_add(FUNCTION_HEADER_SIZE as u32);
        if target < layout.stack_size || header_end.is_none_or(|end| end > layout.static_base) {
            return Err(RuntimeError::PcOutOfBounds(target));
        }
        let arg_count = self.memory.read_addr(target)?;
        let local_count = self.memory.read_addr(target + WORD)?;

        for value in self.registers.saved() {
            self.push(value as i32, tracer)?;
        }
        let args_size = arg_count
            .checked_mul(WORD)
            .and_then(|n| n.checked_add(SAVED_FRAME_SIZE))
            .ok_or(RuntimeError::StackUnderflow)?;
        self.registers.arg = self
            .sp
            .checked_sub(args_size)
            .ok_or(RuntimeError::StackUnderflow)?;
        self.registers.lcl = self.sp;
        for _ in 0..local_count {
            self.push(0, tracer)?;
        }
        self.registers.rtn = self.pc + 1;

        tracer.trace_call(target, self.registers.arg, self.registers.lcl);
        Ok(target + FUNCTION_HEADER_SIZE as u32)
    }

    /// Tear down the active frame, leaving the return value where the first
    /// argument was. Returns the caller's resume address.
    fn ret<T: Tracer>(&mut self, tracer: &mut T) -> Result<u32, RuntimeError> {
        let value = self.pop()?;
        let frame = self
            .registers
            .lcl
            .checked_sub(SAVED_FRAME_SIZE)
            .ok_or(RuntimeError::StackUnderflow)?;
        let saved = [
            self.memory.read_addr(frame)?,
            self.memory.read_addr(frame + WORD)?,
            self.memory.read_addr(frame + 2 * WORD)?,
            self.memory.read_addr(frame + 3 * WORD)?,
        ];

        let Registers { arg, rtn, .. } = self.registers;
        self.memory.write(arg, value)?;
        self.sp = arg + WORD;
        self.registers = Registers::from_saved(saved);

        tracer.trace_return(value, rtn);
        Ok(rtn)
    }

    fn binary<T: Tracer>(&mut self, tracer: &mut T, op: impl Fn(i32, i32) -> i32) -> Result<(), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        self.push(op(a, b), tracer)
    }

    pub(crate) fn push<T: Tracer>(&mut self, value: i32, tracer: &mut T) -> Result<(), RuntimeError> {
        let stack_size = self.layout.map_or(0, |l| l.stack_size);
        if u64::from(self.sp) + u64::from(WORD) >= u64::from(stack_size) {
            return Err(RuntimeError::StackOverflow { sp: self.sp });
        }
        self.memory.write(self.sp, value)?;
        self.sp += WORD;
        tracer.trace_push(value);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Result<i32, RuntimeError> {
        if self.sp < WORD {
            return Err(RuntimeError::StackUnderflow);
        }
        self.sp -= WORD;
        self.memory.read(self.sp)
    }

    fn pop_addr(&mut self) -> Result<u32, RuntimeError> {
        self.pop().map(|w| w as u32)
    }
}
