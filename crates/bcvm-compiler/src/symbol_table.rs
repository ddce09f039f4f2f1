//! Symbol table for the two-pass assembler.
//!
//! The namespace is flat: every name, whatever its kind, is declared once
//! for the whole program. Arguments and locals still record the function
//! whose header precedes them, which decides their frame-relative slot.

use indexmap::IndexMap;
use serde::Serialize;

use bcvm_bytecode::WORD_SIZE;

const SLOT: u32 = WORD_SIZE as u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Label,
    Static,
    Local,
    Arg,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// Name including its sigil (`$f`, `@loop`, `#x`).
    pub name: String,
    /// Absolute address for functions, labels and (allocated) statics;
    /// frame-relative byte offset for arguments and locals.
    pub value: u32,
    pub kind: SymbolKind,
    /// Owning function for arguments and locals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

/// Per-function slot counts, written as the function's header words.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FunctionMeta {
    pub name: String,
    pub arg_count: u32,
    pub local_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolError {
    #[error("`{0}` is already defined")]
    Duplicate(String),

    #[error("argument `{0}` declared outside a function")]
    ArgumentInStaticSection(String),

    #[error("function arguments must be `#name`, found `{0}`")]
    MalformedArgument(String),
}

impl SymbolError {
    /// The offending name.
    pub fn name(&self) -> &str {
        match self {
            Self::Duplicate(name)
            | Self::ArgumentInStaticSection(name)
            | Self::MalformedArgument(name) => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    stack_size: u32,
    instruction_count: u32,
    /// Next free static slot, in bytes.
    static_bytes: u32,
    parsing_static: bool,
    statics_allocated: bool,
    /// Every symbol in declaration order.
    symbols: Vec<Symbol>,
    /// Name → index into `symbols`.
    names: IndexMap<String, usize>,
    functions: IndexMap<String, FunctionMeta>,
    /// Function whose body is being scanned.
    current: Option<String>,
}

impl SymbolTable {
    pub fn new(stack_size: u32) -> Self {
        Self {
            stack_size,
            instruction_count: 0,
            static_bytes: 0,
            parsing_static: true,
            statics_allocated: false,
            symbols: Vec::new(),
            names: IndexMap::new(),
            functions: IndexMap::new(),
            current: None,
        }
    }

    /// Absolute address of the next instruction byte.
    fn address(&self) -> u32 {
        self.stack_size.saturating_add(self.instruction_count)
    }

    fn push(&mut self, name: &str, value: u32, kind: SymbolKind, function: Option<String>) {
        self.names.insert(name.to_string(), self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            value,
            kind,
            function,
        });
    }

    /// Declare a function at the current address and register its arguments.
    ///
    /// `raw_args` is the whitespace-separated argument text of the header line.
    pub fn add_function(&mut self, name: &str, raw_args: &str) -> Result<(), SymbolError> {
        if self.has_symbol(name) {
            return Err(SymbolError::Duplicate(name.to_string()));
        }
        self.push(name, self.address(), SymbolKind::Function, None);
        self.set_parsing_static(false, name);

        for arg in raw_args.split_whitespace() {
            if arg.len() < 2 || !arg.starts_with('#') {
                return Err(SymbolError::MalformedArgument(arg.to_string()));
            }
            self.add_variable(arg, true)?;
        }
        Ok(())
    }

    /// Declare a jump label at the current address.
    pub fn add_label(&mut self, name: &str) -> Result<(), SymbolError> {
        if self.has_symbol(name) {
            return Err(SymbolError::Duplicate(name.to_string()));
        }
        self.push(name, self.address(), SymbolKind::Label, None);
        Ok(())
    }

    /// Declare a variable in the next free slot of its section.
    ///
    /// Outside any function the variable is static. Inside a function it is
    /// an argument (`is_arg`) or a local.
    pub fn add_variable(&mut self, name: &str, is_arg: bool) -> Result<(), SymbolError> {
        if self.has_symbol(name) {
            return Err(SymbolError::Duplicate(name.to_string()));
        }
        if self.parsing_static {
            if is_arg {
                return Err(SymbolError::ArgumentInStaticSection(name.to_string()));
            }
            let value = self.static_bytes;
            self.static_bytes += SLOT;
            self.push(name, value, SymbolKind::Static, None);
            return Ok(());
        }

        let Some(function) = self.current.clone() else {
            return Err(SymbolError::ArgumentInStaticSection(name.to_string()));
        };
        let meta = self.functions.entry(function.clone()).or_default();
        let (kind, value) = if is_arg {
            meta.arg_count += 1;
            (SymbolKind::Arg, (meta.arg_count - 1) * SLOT)
        } else {
            meta.local_count += 1;
            (SymbolKind::Local, (meta.local_count - 1) * SLOT)
        };
        self.push(name, value, kind, Some(function));
        Ok(())
    }

    /// Switch between the static section and a function body.
    ///
    /// A non-empty `function_name` becomes the owner of the arguments and
    /// locals declared next, starting from slot 0.
    pub fn set_parsing_static(&mut self, is_static: bool, function_name: &str) {
        self.parsing_static = is_static;
        self.current = None;
        if function_name.is_empty() {
            return;
        }
        let meta = self.functions.entry(function_name.to_string()).or_default();
        meta.name = function_name.to_string();
        self.current = Some(function_name.to_string());
    }

    pub fn is_parsing_static(&self) -> bool {
        self.parsing_static
    }

    /// Advance the instruction counter by `bytes`.
    pub fn advance(&mut self, bytes: u32) {
        self.instruction_count = self.instruction_count.saturating_add(bytes);
    }

    /// Bytes of instruction stream scanned so far.
    pub fn instruction_count(&self) -> u32 {
        self.instruction_count
    }

    pub fn stack_size(&self) -> u32 {
        self.stack_size
    }

    /// Fix statics up to absolute addresses once the instruction stream
    /// length is known. Later calls do nothing.
    pub fn allocate_static(&mut self) {
        if self.statics_allocated {
            return;
        }
        self.statics_allocated = true;
        self.current = None;

        let base = self.address();
        for symbol in &mut self.symbols {
            if symbol.kind == SymbolKind::Static {
                symbol.value = symbol.value.saturating_add(base);
            }
        }
    }

    pub fn statics_allocated(&self) -> bool {
        self.statics_allocated
    }

    pub fn has_symbol(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Address or slot offset of `name`. `None` means undefined, never 0.
    pub fn value(&self, name: &str) -> Option<u32> {
        self.get(name).map(|symbol| symbol.value)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.names.get(name).map(|&index| &self.symbols[index])
    }

    pub fn function_arg_count(&self, name: &str) -> Option<u32> {
        self.function_meta(name).map(|meta| meta.arg_count)
    }

    pub fn function_var_count(&self, name: &str) -> Option<u32> {
        self.function_meta(name).map(|meta| meta.local_count)
    }

    pub fn function_meta(&self, name: &str) -> Option<&FunctionMeta> {
        self.functions.get(name)
    }

    /// Function metadata in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionMeta> {
        self.functions.values()
    }

    /// Number of static variables (4-byte slots).
    pub fn static_count(&self) -> u32 {
        self.static_bytes / SLOT
    }

    /// Every symbol in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Function and label addresses with their names, for dumps and traces.
    pub fn code_labels(&self) -> Vec<(u32, String)> {
        self.symbols
            .iter()
            .filter(|s| matches!(s.kind, SymbolKind::Function | SymbolKind::Label))
            .map(|s| (s.value, s.name.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Serializable snapshot of the table.
    pub fn listing(&self) -> SymbolListing<'_> {
        SymbolListing {
            stack_size: self.stack_size,
            instruction_bytes: self.instruction_count,
            static_count: self.static_count(),
            symbols: self.symbols.iter().collect(),
            functions: self.functions().collect(),
        }
    }
}

/// Serializable view of a [`SymbolTable`].
#[derive(Debug, Serialize)]
pub struct SymbolListing<'a> {
    pub stack_size: u32,
    pub instruction_bytes: u32,
    pub static_count: u32,
    pub symbols: Vec<&'a Symbol>,
    pub functions: Vec<&'a FunctionMeta>,
}
