/// Size of one machine word in bytes.
pub const WORD_SIZE: usize = 4;

/// Image header size: stack size word + static variable count word.
pub const HEADER_SIZE: usize = 2 * WORD_SIZE;

/// Bytes emitted for a `$function` line: argument count + local count.
pub const FUNCTION_HEADER_SIZE: usize = 2 * WORD_SIZE;

/// Stack region size used when the assembler is not configured otherwise (1 MiB).
pub const DEFAULT_STACK_SIZE: u32 = 1_048_576;

/// Extension of assembly source files.
pub const ASSEMBLY_EXTENSION: &str = "bca";

/// Extension of compiled images.
pub const EXECUTABLE_EXTENSION: &str = "bce";
