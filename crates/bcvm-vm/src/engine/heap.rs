//! Free-list allocator living inside the VM arena.
//!
//! The heap is an address-ordered singly linked list of free segments. The
//! list head is one word stored just before the heap. Every segment starts
//! with an 8-byte header:
//!
//! ```text
//! +0  size  (whole segment, header included)
//! +4  next  (address of the next free segment, 0 = end of list)
//! ```
//!
//! Allocation is best fit and splits off the unused tail when it can hold a
//! header. Freeing inserts by address and merges with both neighbours, so
//! adjacent free segments never coexist. A pointer that was never returned
//! by `alloc` is only caught when it fails the cheap plausibility checks;
//! anything subtler corrupts the list.

use bcvm_bytecode::WORD_SIZE;

use super::error::RuntimeError;
use super::memory::Memory;

/// Size of a segment header in bytes.
pub const SEGMENT_HEADER: u32 = 2 * WORD_SIZE as u32;

/// One free segment, as seen by [`Heap::free_segments`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub addr: u32,
    pub size: u32,
}

impl Segment {
    pub fn end(&self) -> u32 {
        self.addr + self.size
    }
}

/// Heap bounds. All state lives in the arena; this only records where.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Heap {
    /// Address of the free-list head cell.
    head: u32,
    /// First heap byte.
    start: u32,
    /// One past the last heap byte.
    end: u32,
}

impl Heap {
    /// Lay out an empty heap after the head cell at `head`, spanning to the
    /// end of the arena as a single free segment.
    ///
    /// `head` need not be word aligned. The heap end is rounded down so the
    /// heap length, and with it every segment size, is a multiple of 4.
    pub fn init(memory: &mut Memory, head: u32) -> Result<Self, RuntimeError> {
        let start = head + WORD_SIZE as u32;
        let arena_end = u32::try_from(memory.len()).unwrap_or(u32::MAX);
        let len = arena_end.saturating_sub(start);
        let end = start + (len - len % WORD_SIZE as u32);
        let heap = Self { head, start, end };

        if end.saturating_sub(start) < SEGMENT_HEADER {
            memory.write_addr(head, 0)?;
            return Ok(heap);
        }
        memory.write_addr(start, end - start)?;
        memory.write_addr(start + WORD_SIZE as u32, 0)?;
        memory.write_addr(head, start)?;
        Ok(heap)
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Allocate `size` payload bytes. Returns the payload address.
    pub fn alloc(&self, memory: &mut Memory, size: i32) -> Result<u32, RuntimeError> {
        let payload = u32::try_from(size).map_err(|_| RuntimeError::InvalidAllocSize(size))?;
        let needed = payload
            .checked_next_multiple_of(WORD_SIZE as u32)
            .and_then(|p| p.checked_add(SEGMENT_HEADER))
            .ok_or(RuntimeError::OutOfMemory { requested: size })?;

        // Best fit: smallest sufficient segment, lowest address on ties.
        let mut best: Option<(u32, Segment)> = None;
        let mut link = self.head;
        let mut cur = memory.read_addr(self.head)?;
        while cur != 0 {
            let seg = Segment {
                addr: cur,
                size: memory.read_addr(cur)?,
            };
            if seg.size >= needed && best.is_none_or(|(_, b)| seg.size < b.size) {
                best = Some((link, seg));
            }
            link = cur + WORD_SIZE as u32;
            cur = memory.read_addr(link)?;
        }

        let Some((link, seg)) = best else {
            return Err(RuntimeError::OutOfMemory { requested: size });
        };
        let next = self.next(memory, seg.addr)?;
        let remainder = seg.size - needed;

        if remainder >= SEGMENT_HEADER {
            let tail = seg.addr + needed;
            memory.write_addr(tail, remainder)?;
            memory.write_addr(tail + WORD_SIZE as u32, next)?;
            memory.write_addr(link, tail)?;
            memory.write_addr(seg.addr, needed)?;
        } else {
            memory.write_addr(link, next)?;
        }
        memory.write_addr(seg.addr + WORD_SIZE as u32, 0)?;
        Ok(seg.addr + SEGMENT_HEADER)
    }

    /// Return the segment owning payload address `ptr` to the free list.
    pub fn free(&self, memory: &mut Memory, ptr: u32) -> Result<(), RuntimeError> {
        let invalid = RuntimeError::InvalidFree(ptr);
        let addr = ptr
            .checked_sub(SEGMENT_HEADER)
            .filter(|&a| a >= self.start && a % WORD_SIZE as u32 == self.start % WORD_SIZE as u32)
            .ok_or(RuntimeError::InvalidFree(ptr))?;
        if addr > self.end.saturating_sub(SEGMENT_HEADER) {
            return Err(invalid);
        }
        let size = memory.read_addr(addr)?;
        if size < SEGMENT_HEADER || size % WORD_SIZE as u32 != 0 || size > self.end - addr {
            return Err(invalid);
        }
        let seg = Segment { addr, size };

        // Find neighbours: `prev` is the last free segment below, `cur` the first above.
        let mut prev: Option<Segment> = None;
        let mut cur = memory.read_addr(self.head)?;
        while cur != 0 && cur < addr {
            prev = Some(Segment {
                addr: cur,
                size: memory.read_addr(cur)?,
            });
            cur = self.next(memory, cur)?;
        }
        if cur == addr
            || prev.is_some_and(|p| p.end() > addr)
            || (cur != 0 && seg.end() > cur)
        {
            return Err(invalid);
        }

        // Insert, then merge with the following segment.
        let mut merged = seg;
        let mut next = cur;
        if cur != 0 && seg.end() == cur {
            merged.size += memory.read_addr(cur)?;
            next = self.next(memory, cur)?;
        }
        memory.write_addr(merged.addr, merged.size)?;
        memory.write_addr(merged.addr + WORD_SIZE as u32, next)?;

        match prev {
            Some(p) if p.end() == merged.addr => {
                memory.write_addr(p.addr, p.size + merged.size)?;
                memory.write_addr(p.addr + WORD_SIZE as u32, next)?;
            }
            Some(p) => memory.write_addr(p.addr + WORD_SIZE as u32, merged.addr)?,
            None => memory.write_addr(self.head, merged.addr)?,
        }
        Ok(())
    }

    /// Free segments in address order.
    pub fn free_segments(&self, memory: &Memory) -> Result<Vec<Segment>, RuntimeError> {
        let mut out = Vec::new();
        let mut cur = memory.read_addr(self.head)?;
        // A well-formed list cannot have more segments than header-sized slots.
        let limit = (self.end.saturating_sub(self.start) / SEGMENT_HEADER) as usize;
        while cur != 0 && out.len() <= limit {
            out.push(Segment {
                addr: cur,
                size: memory.read_addr(cur)?,
            });
            cur = self.next(memory, cur)?;
        }
        Ok(out)
    }

    fn next(&self, memory: &Memory, addr: u32) -> Result<u32, RuntimeError> {
        memory.read_addr(addr + WORD_SIZE as u32)
    }
}
