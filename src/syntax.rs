//! Tag syntax: specifier characters and delimiter schemes
//!
//! The format-spec grammar (color and style characters) is fixed; the
//! delimiters around it are configurable. A [`TagSyntax`] holds the three
//! literal strings the recognizer matches against: the start of an opening
//! tag, the terminator that ends an opening tag, and the closing tag.

use thiserror::Error;

use crate::format::{Color, StyleSet};

/// Introducer for C-style escape sequences (escape mode only)
pub const ESCAPE_CHAR: u8 = b'\\';
/// Escape successor that greedily skips following whitespace
pub const TRIM_ESCAPE: u8 = b'#';
/// Specifier character for "keep the currently active color"
pub const COLOR_CURRENT: u8 = b';';
/// Specifier character for the terminal's default color
pub const COLOR_DEFAULT: u8 = b'd';
/// Specifier character that resets to the initial state before the rest
/// of the specifier applies
pub const RESET_CHAR: u8 = b'0';

const COLOR_CHARS_LOWER: &[u8] = b"krgybmcw";
const COLOR_CHARS_UPPER: &[u8] = b"KRGYBMCW";

const COLOR_ORDER: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

/// Interpret a specifier byte as a color, returning `(color, bright)`.
///
/// Lowercase letters are the base colors, uppercase their bright variants;
/// `;` keeps the active color and `d` selects the terminal default.
pub fn color_for(byte: u8) -> Option<(Color, bool)> {
    if let Some(i) = COLOR_CHARS_LOWER.iter().position(|&b| b == byte) {
        return Some((COLOR_ORDER[i], false));
    }
    if let Some(i) = COLOR_CHARS_UPPER.iter().position(|&b| b == byte) {
        return Some((COLOR_ORDER[i], true));
    }
    match byte {
        COLOR_DEFAULT => Some((Color::Default, false)),
        COLOR_CURRENT => Some((Color::Current, false)),
        _ => None,
    }
}

/// Interpret a specifier byte as a style toggle
pub fn style_for(byte: u8) -> Option<StyleSet> {
    let mut styles = StyleSet::default();
    match byte {
        b'%' => styles.reversed = true,
        b'!' => styles.blink = true,
        b'*' => styles.bold = true,
        b'/' => styles.italic = true,
        b'_' => styles.underline = true,
        b'^' => styles.overline = true,
        b'=' => styles.double_underline = true,
        b'~' => styles.strikethrough = true,
        b'.' => styles.dim = true,
        _ => return None,
    }
    Some(styles)
}

/// Errors building a tag syntax from user-supplied input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unknown tag style '{0}' (expected classic, bracket or xml)")]
    UnknownStyle(String),
    #[error("{0} delimiter must not be empty")]
    EmptyDelimiter(&'static str),
}

/// Delimiter scheme for format tags
///
/// The recognizer is written once against these three strings; only the
/// literals change between schemes. An opening tag is `open_tag` followed
/// by zero or more specifier characters and `open_end`; the closing tag is
/// the literal `close_tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSyntax {
    pub name: &'static str,
    pub open_tag: String,
    pub open_end: String,
    pub close_tag: String,
}

impl TagSyntax {
    fn new(name: &'static str, open_tag: &str, open_end: &str, close_tag: &str) -> Self {
        Self {
            name,
            open_tag: open_tag.to_string(),
            open_end: open_end.to_string(),
            close_tag: close_tag.to_string(),
        }
    }

    /// The canonical `{spec--text--}` scheme
    pub fn classic() -> Self {
        Self::new("classic", "{", "--", "--}")
    }

    /// `[spec]text[/]`
    pub fn bracket() -> Self {
        Self::new("bracket", "[", "]", "[/]")
    }

    /// `<spec>text</>`
    pub fn xml() -> Self {
        Self::new("xml", "<", ">", "</>")
    }

    /// Look up a predefined scheme by name
    pub fn from_name(name: &str) -> Result<Self, SyntaxError> {
        match name {
            "classic" => Ok(Self::classic()),
            "bracket" => Ok(Self::bracket()),
            "xml" => Ok(Self::xml()),
            other => Err(SyntaxError::UnknownStyle(other.to_string())),
        }
    }

    /// Build a custom scheme from three delimiter strings.
    ///
    /// All three must be non-empty; beyond that any literals are accepted
    /// and the recognizer resolves overlaps greedily, the same way it does
    /// for the predefined schemes.
    pub fn custom(open_tag: &str, open_end: &str, close_tag: &str) -> Result<Self, SyntaxError> {
        if open_tag.is_empty() {
            return Err(SyntaxError::EmptyDelimiter("opening"));
        }
        if open_end.is_empty() {
            return Err(SyntaxError::EmptyDelimiter("separator"));
        }
        if close_tag.is_empty() {
            return Err(SyntaxError::EmptyDelimiter("closing"));
        }
        Ok(Self::new("custom", open_tag, open_end, close_tag))
    }
}

impl Default for TagSyntax {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lookup() {
        assert_eq!(color_for(b'r'), Some((Color::Red, false)));
        assert_eq!(color_for(b'R'), Some((Color::Red, true)));
        assert_eq!(color_for(b'k'), Some((Color::Black, false)));
        assert_eq!(color_for(b'd'), Some((Color::Default, false)));
        assert_eq!(color_for(b';'), Some((Color::Current, false)));
        assert_eq!(color_for(b'x'), None);
        assert_eq!(color_for(b'D'), None, "default has no bright variant");
    }

    #[test]
    fn test_style_lookup() {
        assert!(style_for(b'*').map_or(false, |s| s.bold));
        assert!(style_for(b'/').map_or(false, |s| s.italic));
        assert!(style_for(b'~').map_or(false, |s| s.strikethrough));
        assert_eq!(style_for(b'#'), None, "trim is an escape, not a style");
        assert_eq!(style_for(b'0'), None, "reset is handled separately");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(TagSyntax::from_name("classic"), Ok(TagSyntax::classic()));
        assert_eq!(TagSyntax::from_name("xml"), Ok(TagSyntax::xml()));
        assert_eq!(
            TagSyntax::from_name("curly"),
            Err(SyntaxError::UnknownStyle("curly".to_string()))
        );
    }

    #[test]
    fn test_custom_rejects_empty_parts() {
        assert!(TagSyntax::custom("((", "--", "))").is_ok());
        assert_eq!(
            TagSyntax::custom("", "--", "))"),
            Err(SyntaxError::EmptyDelimiter("opening"))
        );
        assert_eq!(
            TagSyntax::custom("((", "", "))"),
            Err(SyntaxError::EmptyDelimiter("separator"))
        );
        assert_eq!(
            TagSyntax::custom("((", "--", ""),
            Err(SyntaxError::EmptyDelimiter("closing"))
        );
    }
}
