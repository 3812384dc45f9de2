#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    CodeBlock,
    MarkupBlock,
    Other,
}

/// One block-level unit of the source document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// First word of a fenced code block's info string.
    pub language: Option<String>,
    pub text: String,
}

impl BlockNode {
    pub fn code(language: Option<&str>, text: &str) -> Self {
        BlockNode {
            kind: BlockKind::CodeBlock,
            language: language.map(str::to_string),
            text: text.to_string(),
        }
    }

    pub fn markup(text: &str) -> Self {
        BlockNode {
            kind: BlockKind::MarkupBlock,
            language: None,
            text: text.to_string(),
        }
    }

    pub fn other() -> Self {
        BlockNode {
            kind: BlockKind::Other,
            language: None,
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Execute,
    Ignore,
    Test,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationMarker {
    pub directive: Directive,
    /// Command for execute/test, reason for ignore.
    pub payload: String,
}

/// Per-run counters reported by the synthesizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub commands: usize,
    pub ignored: usize,
    pub injected: usize,
    pub tests: usize,
    pub dropped: usize,
}
