//! Tagtint
//!
//! A streaming translator from markdown-like format tags into ANSI escape
//! sequences. Input is processed one byte at a time by a never-failing
//! state machine; anything that cannot be read as a tag passes through
//! verbatim. This crate provides:
//!
//! - `format`: absolute/delta format values and the SGR renderer
//! - `syntax`: specifier characters and configurable tag delimiters
//! - `automaton`: the per-byte formatter state machine
//! - `ansi`: SGR code constants
//! - `texts`: help, legend and demo text for the command-line driver

pub mod ansi;
pub mod automaton;
pub mod format;
pub mod syntax;
pub mod texts;

pub use automaton::{FormatterAutomaton, Options};
pub use format::{Color, Format, StyleSet};
pub use syntax::{SyntaxError, TagSyntax};
