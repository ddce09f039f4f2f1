use crate::source::Span;

/// Kinds of assembly errors, in the order the scanner can run into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Line shape
    InvalidOpcode,
    MissingName,
    WrongArity,

    // Declarations
    DuplicateSymbol,
    ArgumentInStaticSection,
    MalformedArgument,

    // Operands
    MalformedLiteral,
    UndefinedSymbol,
}

impl DiagnosticKind {
    /// Base message for this kind, used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::InvalidOpcode => "invalid opcode",
            Self::MissingName => "missing name after sigil",
            Self::WrongArity => "wrong number of arguments",
            Self::DuplicateSymbol => "symbol already defined",
            Self::ArgumentInStaticSection => "argument declared outside a function",
            Self::MalformedArgument => "function arguments must be `#name`",
            Self::MalformedLiteral => "malformed literal",
            Self::UndefinedSymbol => "undefined symbol",
        }
    }

    /// Template for detailed messages. `{}` is replaced by the caller's detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::InvalidOpcode => "invalid opcode `{}`".to_string(),
            Self::DuplicateSymbol => "`{}` is already defined".to_string(),
            Self::UndefinedSymbol => "`{}` is not defined".to_string(),
            Self::ArgumentInStaticSection => {
                "argument `{}` declared outside a function".to_string()
            }
            Self::MalformedArgument => {
                "function arguments must be `#name`, found `{}`".to_string()
            }
            Self::MissingName => "`{}` is missing a name".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// 1-based source line.
    pub(crate) line: usize,
    /// The range shown to the user (underlined in output).
    pub(crate) range: Span,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        kind: DiagnosticKind,
        line: usize,
        range: Span,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            line,
            range,
            message: message.into(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, line: usize, range: Span) -> Self {
        Self::new(kind, line, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn range(&self) -> Span {
        self.range.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
