//! Formatter state machine
//!
//! A stateful automaton that processes input one byte at a time,
//! translating format tags into ANSI escape sequences (or stripping them)
//! and writing everything through to an output sink immediately.
//!
//! # State machine
//!
//! States:
//! - Default: running text; the pending buffer may hold a partial close tag
//! - ParsingOpenTag: matching a multi-byte opening delimiter
//! - ParsingFormatSpec: inside the specifier, before the open terminator
//! - ParsingCloseTag: matching the closing delimiter
//! - ParseEscape: one byte after the escape introducer (escape mode)
//! - SkipWhitespace: discarding whitespace after a trim escape
//!
//! The automaton never fails on malformed input: anything that cannot be
//! read as a tag is echoed verbatim, and a closing tag with nothing left
//! to pop is ordinary text. Only sink I/O errors surface to the caller.

use std::io::{self, Write};

use crate::format::Format;
use crate::syntax::{self, TagSyntax};

/// Construction-time configuration for a [`FormatterAutomaton`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Suppress escape sequence output entirely; tags are still recognized
    /// and consumed, so payload text survives unformatted
    pub strip: bool,
    /// Interpret C-style escape sequences (`\a \b \r \n \f \t \v \\`) and
    /// the whitespace-trimming `\#`
    pub escape: bool,
    /// Emit one final reset sequence when processing ends
    pub sanitize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            strip: false,
            escape: false,
            sanitize: true,
        }
    }
}

/// Parser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Default,
    ParseEscape,
    ParsingOpenTag,
    ParsingFormatSpec,
    ParsingCloseTag,
    SkipWhitespace,
}

/// Buffer resynchronization outcomes, ordered by match priority
enum Resync {
    CompleteClose,
    BeginSpec,
    InertClose,
    KeepOpen,
    KeepClose,
}

/// The formatter automaton
///
/// Owns a stack of absolute [`Format`] values (bottom = initial state,
/// never popped) and a small pending buffer holding the longest input
/// suffix that could still complete a delimiter. Constructed per input
/// segment; [`finish`](Self::finish) or drop flushes pending text and,
/// unless suppressed, restores the initial state.
pub struct FormatterAutomaton<W: Write> {
    out: W,
    opts: Options,
    syntax: TagSyntax,
    state: State,
    pending: Vec<u8>,
    stack: Vec<Format>,
    /// Delta accumulated from the current format specifier
    spec: Format,
    spec_colors: u8,
    finished: bool,
}

impl<W: Write> FormatterAutomaton<W> {
    /// Create an automaton with the canonical `{spec--text--}` syntax
    pub fn new(out: W, opts: Options) -> Self {
        Self::with_syntax(out, opts, TagSyntax::classic())
    }

    /// Create an automaton with an explicit delimiter scheme
    pub fn with_syntax(out: W, opts: Options, syntax: TagSyntax) -> Self {
        Self {
            out,
            opts,
            syntax,
            state: State::Default,
            pending: Vec::with_capacity(16),
            stack: vec![Format::initial()],
            spec: Format::neutral(),
            spec_colors: 0,
            finished: false,
        }
    }

    /// Current nesting depth; 1 means only the initial format is active
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Process a whole slice through [`accept`](Self::accept)
    pub fn feed(&mut self, bytes: &[u8]) -> io::Result<()> {
        for &byte in bytes {
            self.accept(byte)?;
        }
        Ok(())
    }

    /// Process a single input byte
    pub fn accept(&mut self, byte: u8) -> io::Result<()> {
        if self.state == State::ParseEscape {
            return self.handle_escape(byte);
        }

        // An escape interrupts whatever was pending; a half-matched tag is
        // committed as literal text
        if self.opts.escape && byte == syntax::ESCAPE_CHAR {
            self.flush_pending()?;
            self.pending.push(byte);
            self.state = State::ParseEscape;
            return Ok(());
        }

        match self.state {
            State::SkipWhitespace => self.handle_skip_whitespace(byte),
            State::ParsingCloseTag => self.handle_close_tag(byte),
            State::ParsingFormatSpec => self.handle_format_spec(byte),
            State::Default | State::ParsingOpenTag => self.handle_literal(byte),
            // handled above
            State::ParseEscape => Ok(()),
        }
    }

    /// Flush pending text and, unless suppressed, restore the terminal to
    /// its initial state.
    ///
    /// Runs automatically on drop; call it directly to observe I/O errors.
    /// Subsequent calls are no-ops.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flush_pending()?;
        if self.opts.sanitize {
            let seq = Format::initial().to_escape();
            self.write_ansi(&seq)?;
        }
        self.out.flush()
    }

    // Output helpers

    fn write_ansi(&mut self, seq: &str) -> io::Result<()> {
        if !self.opts.strip {
            self.out.write_all(seq.as_bytes())?;
        }
        Ok(())
    }

    fn write_literal(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }

    fn flush_pending(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.out.write_all(&self.pending)?;
            self.pending.clear();
        }
        Ok(())
    }

    /// Flush the first `n` pending bytes, keeping the rest buffered
    fn flush_pending_head(&mut self, n: usize) -> io::Result<()> {
        if n > 0 {
            self.out.write_all(&self.pending[..n])?;
            self.pending.drain(..n);
        }
        Ok(())
    }

    // Format stack operations

    fn top(&self) -> Format {
        self.stack.last().copied().unwrap_or_else(Format::initial)
    }

    /// Derive the next absolute format from the stack top and `delta`,
    /// push it, and return its escape sequence
    fn push_format(&mut self, delta: Format) -> String {
        let next = Format::apply(&self.top(), &delta);
        self.stack.push(next);
        next.to_escape()
    }

    /// Drop the stack top (while poppable) and return the escape sequence
    /// of the restored format
    fn pop_format(&mut self) -> String {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self.top().to_escape()
    }

    fn begin_spec(&mut self) {
        self.spec = Format::neutral();
        self.spec_colors = 0;
        self.state = State::ParsingFormatSpec;
    }

    /// A complete close tag sits at the end of the pending buffer. Pop if
    /// the stack is poppable; otherwise the closer is ordinary text.
    fn complete_close(&mut self) -> io::Result<()> {
        self.state = State::Default;
        if self.stack.len() > 1 {
            let cut = self.pending.len() - self.syntax.close_tag.len();
            self.pending.truncate(cut);
            self.flush_pending()?;
            let seq = self.pop_format();
            self.write_ansi(&seq)
        } else {
            self.flush_pending()
        }
    }

    /// The pending buffer stopped matching what the current state was
    /// looking for: flush the shortest head so the longest remaining
    /// suffix is still a viable delimiter (or a completed one), and move
    /// to the state that suffix belongs to.
    fn resync(&mut self) -> io::Result<()> {
        for start in 0..self.pending.len() {
            let action = {
                let sfx = &self.pending[start..];
                let open = self.syntax.open_tag.as_bytes();
                let close = self.syntax.close_tag.as_bytes();
                if sfx == close && self.stack.len() > 1 {
                    Some(Resync::CompleteClose)
                } else if sfx == open {
                    Some(Resync::BeginSpec)
                } else if sfx == close {
                    Some(Resync::InertClose)
                } else if open.starts_with(sfx) {
                    Some(Resync::KeepOpen)
                } else if close.starts_with(sfx) {
                    Some(Resync::KeepClose)
                } else {
                    None
                }
            };
            let Some(action) = action else { continue };
            self.flush_pending_head(start)?;
            return match action {
                Resync::CompleteClose | Resync::InertClose => self.complete_close(),
                Resync::BeginSpec => {
                    self.begin_spec();
                    Ok(())
                }
                Resync::KeepOpen => {
                    self.state = State::ParsingOpenTag;
                    Ok(())
                }
                Resync::KeepClose => {
                    self.state = State::Default;
                    Ok(())
                }
            };
        }
        self.flush_pending()?;
        self.state = State::Default;
        Ok(())
    }

    // State handlers

    /// Running text (Default and ParsingOpenTag states): grow the pending
    /// buffer and resolve it greedily against both delimiters
    fn handle_literal(&mut self, byte: u8) -> io::Result<()> {
        self.pending.push(byte);

        let poppable = self.stack.len() > 1;
        let is_close = self.pending == self.syntax.close_tag.as_bytes();
        let is_open = self.pending == self.syntax.open_tag.as_bytes();

        if is_close && poppable {
            return self.complete_close();
        }
        if is_open {
            self.begin_spec();
            return Ok(());
        }
        if is_close {
            return self.complete_close();
        }
        if self.syntax.open_tag.as_bytes().starts_with(&self.pending) {
            self.state = State::ParsingOpenTag;
            return Ok(());
        }
        if self.syntax.close_tag.as_bytes().starts_with(&self.pending) {
            self.state = State::Default;
            return Ok(());
        }
        self.resync()
    }

    /// Inside `{spec`: try the terminator, then the closer growing out of
    /// the opener, then specifier characters; anything else aborts the tag
    fn handle_format_spec(&mut self, byte: u8) -> io::Result<()> {
        self.pending.push(byte);

        // Completed open terminator: the whole tag parsed
        if self.pending.ends_with(self.syntax.open_end.as_bytes()) {
            let seq = self.push_format(self.spec);
            self.write_ansi(&seq)?;
            self.pending.clear();
            self.state = State::Default;
            return Ok(());
        }

        // A close tag can grow out of the opener (e.g. "[/]" from "[");
        // the closer reading wins over specifier characters
        if self.pending.len() > self.syntax.open_tag.len()
            && self.syntax.close_tag.as_bytes().starts_with(&self.pending)
        {
            if self.pending == self.syntax.close_tag.as_bytes() {
                return self.complete_close();
            }
            self.state = State::ParsingCloseTag;
            return Ok(());
        }

        // A partial open terminator stays pending; this also absorbs a
        // lone '-' between specifier characters in the classic scheme
        if self.partial_open_end() {
            return Ok(());
        }

        if self.try_spec_color(byte) || self.try_spec_style(byte) {
            return Ok(());
        }

        // Invalid specifier character: the whole tag so far is literal
        // text, parsing resumes after it
        self.flush_pending()?;
        self.state = State::Default;
        Ok(())
    }

    fn partial_open_end(&self) -> bool {
        let term = self.syntax.open_end.as_bytes();
        (1..term.len()).any(|k| self.pending.ends_with(&term[..k]))
    }

    fn try_spec_color(&mut self, byte: u8) -> bool {
        let Some((color, bright)) = syntax::color_for(byte) else {
            return false;
        };
        // First color is the foreground, second the background, a third
        // invalidates the specifier
        if self.spec_colors >= 2 {
            return false;
        }
        if self.spec_colors == 0 {
            self.spec.set_fg(color, bright);
        } else {
            self.spec.set_bg(color, bright);
        }
        self.spec_colors += 1;
        true
    }

    fn try_spec_style(&mut self, byte: u8) -> bool {
        if byte == syntax::RESET_CHAR {
            self.spec.reset = true;
            return true;
        }
        let Some(style) = syntax::style_for(byte) else {
            return false;
        };
        // Duplicate style within one specifier is a syntax error
        if self.spec.styles.intersects(style) {
            return false;
        }
        self.spec.styles = self.spec.styles | style;
        true
    }

    fn handle_close_tag(&mut self, byte: u8) -> io::Result<()> {
        self.pending.push(byte);
        if self.pending == self.syntax.close_tag.as_bytes() {
            return self.complete_close();
        }
        if self.syntax.close_tag.as_bytes().starts_with(&self.pending) {
            return Ok(());
        }
        self.resync()
    }

    fn handle_escape(&mut self, byte: u8) -> io::Result<()> {
        // pending holds the introducer
        self.pending.clear();
        self.state = State::Default;
        match byte {
            syntax::ESCAPE_CHAR => self.write_literal(b"\\"),
            b'a' => self.write_literal(b"\x07"),
            b'b' => self.write_literal(b"\x08"),
            b'r' => self.write_literal(b"\r"),
            b'n' => self.write_literal(b"\n"),
            b'f' => self.write_literal(b"\x0c"),
            b't' => self.write_literal(b"\t"),
            b'v' => self.write_literal(b"\x0b"),
            syntax::TRIM_ESCAPE => {
                self.state = State::SkipWhitespace;
                Ok(())
            }
            // Unknown escape: introducer and successor pass through
            other => self.write_literal(&[syntax::ESCAPE_CHAR, other]),
        }
    }

    fn handle_skip_whitespace(&mut self, byte: u8) -> io::Result<()> {
        if is_space(byte) {
            return Ok(());
        }
        // First non-whitespace byte is reprocessed from the top
        self.state = State::Default;
        self.accept(byte)
    }
}

impl<W: Write> Drop for FormatterAutomaton<W> {
    /// Restore the terminal on every exit path. Errors cannot be reported
    /// from drop; call [`finish`](Self::finish) first to observe them.
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

/// ASCII whitespace as the trim escape sees it (includes vertical tab)
fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}
