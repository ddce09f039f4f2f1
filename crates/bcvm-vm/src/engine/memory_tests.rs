use super::error::RuntimeError;
use super::memory::Memory;

#[test]
fn new_memory_is_zeroed() {
    let memory = Memory::new(16);

    assert_eq!(memory.len(), 16);
    assert!(memory.as_bytes().iter().all(|&b| b == 0));
    assert!(Memory::new(0).is_empty());
}

#[test]
fn words_are_little_endian() {
    let mut memory = Memory::new(8);
    memory.write(2, 0x0102_0304).unwrap();

    assert_eq!(memory.as_bytes(), [0, 0, 4, 3, 2, 1, 0, 0]);
    assert_eq!(memory.read(2).unwrap(), 0x0102_0304);
    assert_eq!(memory.byte(5).unwrap(), 1);
}

#[test]
fn addresses_reinterpret_negative_words() {
    let mut memory = Memory::new(4);
    memory.write(0, -1).unwrap();

    assert_eq!(memory.read_addr(0).unwrap(), u32::MAX);
    memory.write_addr(0, 7).unwrap();
    assert_eq!(memory.read(0).unwrap(), 7);
}

#[test]
fn out_of_bounds_access_fails() {
    let mut memory = Memory::new(8);

    assert!(matches!(memory.read(5), Err(RuntimeError::AddressOutOfBounds(5))));
    assert!(matches!(memory.write(8, 1), Err(RuntimeError::AddressOutOfBounds(8))));
    assert!(matches!(memory.byte(8), Err(RuntimeError::AddressOutOfBounds(8))));
    assert!(matches!(
        memory.read(u32::MAX),
        Err(RuntimeError::AddressOutOfBounds(u32::MAX))
    ));
    assert!(memory.read(4).is_ok());
}

#[test]
fn copy_in_bounds() {
    let mut memory = Memory::new(12);
    memory.copy_in(2, &[9, 9, 9, 9, 9, 9]).unwrap();
    assert_eq!(memory.as_bytes(), [0, 0, 9, 9, 9, 9, 9, 9, 0, 0, 0, 0]);

    assert!(memory.copy_in(10, &[1, 2, 3]).is_err());
}
