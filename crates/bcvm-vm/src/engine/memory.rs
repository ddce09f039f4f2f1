//! Flat byte arena with bounds-checked word access.

use bcvm_bytecode::{read_word, store_word};

use super::error::RuntimeError;

/// The VM's single memory region. Addresses are byte offsets.
#[derive(Clone, Debug)]
pub struct Memory {
    bytes: Vec<u8>,
}

impl Memory {
    /// Zeroed arena of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn byte(&self, addr: u32) -> Result<u8, RuntimeError> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(RuntimeError::AddressOutOfBounds(addr))
    }

    pub fn read(&self, addr: u32) -> Result<i32, RuntimeError> {
        read_word(&self.bytes, addr as usize).ok_or(RuntimeError::AddressOutOfBounds(addr))
    }

    pub fn write(&mut self, addr: u32, value: i32) -> Result<(), RuntimeError> {
        store_word(&mut self.bytes, addr as usize, value)
            .ok_or(RuntimeError::AddressOutOfBounds(addr))
    }

    /// Word at `addr` reinterpreted as an address.
    pub fn read_addr(&self, addr: u32) -> Result<u32, RuntimeError> {
        self.read(addr).map(|w| w as u32)
    }

    pub fn write_addr(&mut self, addr: u32, value: u32) -> Result<(), RuntimeError> {
        self.write(addr, value as i32)
    }

    /// Copy `data` into the arena starting at `addr`.
    pub fn copy_in(&mut self, addr: u32, data: &[u8]) -> Result<(), RuntimeError> {
        let start = addr as usize;
        let dest = start
            .checked_add(data.len())
            .and_then(|end| self.bytes.get_mut(start..end))
            .ok_or(RuntimeError::AddressOutOfBounds(addr))?;
        dest.copy_from_slice(data);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
