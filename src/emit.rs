use crate::annotation::recognize;
use crate::config::{Config, IgnoreConsumer};
use crate::ir::{AnnotationMarker, BlockKind, BlockNode, Directive, Stats};
use std::io::{self, Write};

const EXECUTE_COMMENT: &str = "# Added as an automation comment";
const TEST_COMMENT: &str = "# Test code block";
const IGNORE_NEXT_COMMENT: &str = "# Ignoring the next code block";
const IGNORING_COMMENT: &str = "# Ignoring...";

/// State carried from one node to the next during a single run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TraversalState {
    pub pending_ignore: bool,
}

/// Line-oriented, append-only script output.
struct ScriptWriter<'w, W: Write> {
    out: &'w mut W,
}

impl<W: Write> ScriptWriter<'_, W> {
    fn line(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.write_all(b"\n")
    }

    fn blank(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")
    }
}

struct Synthesizer<'c, 'w, W: Write> {
    config: &'c Config,
    writer: ScriptWriter<'w, W>,
    stats: Stats,
}

// The closing fence leaves one trailing newline on the literal.
fn code_body(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}

impl<W: Write> Synthesizer<'_, '_, W> {
    fn header(&mut self) -> io::Result<()> {
        self.writer.line(&self.config.shebang)?;
        self.writer.line(&self.config.shell_options)?;
        self.writer.blank()
    }

    fn visit(&mut self, state: &mut TraversalState, node: &BlockNode) -> io::Result<()> {
        match node.kind {
            BlockKind::MarkupBlock => match recognize(&node.text) {
                Some(marker) => self.annotation(state, &marker),
                None => Ok(()),
            },
            BlockKind::CodeBlock => self.code(state, node),
            BlockKind::Other => Ok(()),
        }
    }

    fn annotation(&mut self, state: &mut TraversalState, marker: &AnnotationMarker) -> io::Result<()> {
        match marker.directive {
            Directive::Execute => {
                self.stats.injected += 1;
                self.writer.line(EXECUTE_COMMENT)?;
                self.writer.line(&marker.payload)?;
                self.writer.blank()
            }
            Directive::Ignore => {
                if state.pending_ignore {
                    tracing::debug!("ignore marker while another ignore is pending");
                }
                state.pending_ignore = true;
                let reason = marker.payload.trim();
                if reason.is_empty() {
                    self.writer.line(&format!("{}...", IGNORE_NEXT_COMMENT))
                } else {
                    self.writer.line(&format!("{}: {}", IGNORE_NEXT_COMMENT, reason))
                }
            }
            Directive::Test => {
                self.stats.tests += 1;
                self.writer.line(TEST_COMMENT)?;
                self.writer.line(&marker.payload)?;
                self.writer.blank()
            }
        }
    }

    fn code(&mut self, state: &mut TraversalState, node: &BlockNode) -> io::Result<()> {
        if !self.config.is_target(node.language.as_deref()) {
            self.stats.dropped += 1;
            if state.pending_ignore && self.config.ignore_consumer == IgnoreConsumer::Any {
                state.pending_ignore = false;
                tracing::debug!(language = ?node.language, "pending ignore consumed by non-target block");
            } else {
                tracing::debug!(language = ?node.language, "non-target code block dropped");
            }
            return Ok(());
        }

        let body = code_body(&node.text);
        if state.pending_ignore {
            state.pending_ignore = false;
            self.stats.ignored += 1;
            self.writer.line(IGNORING_COMMENT)?;
            for line in body.split('\n') {
                if line.is_empty() {
                    self.writer.line("#")?;
                } else {
                    self.writer.line(&format!("# {}", line))?;
                }
            }
            return Ok(());
        }

        self.stats.commands += 1;
        self.writer.line(body)?;
        self.writer.blank()
    }
}

/// Writes the script for `blocks` to `out` in document order.
pub fn synthesize<W: Write>(blocks: &[BlockNode], config: &Config, out: &mut W) -> io::Result<Stats> {
    let mut synth = Synthesizer {
        config,
        writer: ScriptWriter { out },
        stats: Stats::default(),
    };
    let mut state = TraversalState::default();

    synth.header()?;
    for node in blocks {
        synth.visit(&mut state, node)?;
    }
    if state.pending_ignore {
        tracing::debug!("ignore marker at end of document has no code block to skip");
    }
    Ok(synth.stats)
}
