//! Format representation for text styling
//!
//! A [`Format`] describes one rendering state: foreground and background
//! color plus a set of independent style toggles. The same shape doubles as
//! the *delta* parsed out of a tag specifier, where a color may be
//! [`Color::Current`] ("keep whatever is active") and `reset` requests
//! starting over from the initial state before the rest of the delta
//! applies. Deltas are combined with the current stack top by
//! [`Format::apply`]; the result is always a fully resolved absolute state.

use std::ops::{BitOr, BitXor};

use crate::ansi;

/// Color of one format channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    /// The terminal's configured default color, distinct from any named
    /// color (and sometimes rendered like bright white)
    Default,
    /// Inherit the color active on top of the format stack. Only ever
    /// appears in deltas; resolved at push time and never stored.
    Current,
}

impl Color {
    /// Offset added to the fg/bg base to form the SGR color code
    fn sgr_offset(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
            // Current is resolved before rendering; Default's offset is 9
            Color::Default | Color::Current => 9,
        }
    }
}

/// Independent style toggles
///
/// Each attribute flips on/off via XOR when its tag character appears,
/// rather than being explicitly set or cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleSet {
    pub reversed: bool,
    pub blink: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub overline: bool,
    pub double_underline: bool,
    pub strikethrough: bool,
    pub dim: bool,
}

impl StyleSet {
    /// True if no style is active
    pub fn is_empty(&self) -> bool {
        *self == StyleSet::default()
    }

    /// True if any style is active in both sets
    pub fn intersects(&self, other: StyleSet) -> bool {
        (self.reversed && other.reversed)
            || (self.blink && other.blink)
            || (self.bold && other.bold)
            || (self.italic && other.italic)
            || (self.underline && other.underline)
            || (self.overline && other.overline)
            || (self.double_underline && other.double_underline)
            || (self.strikethrough && other.strikethrough)
            || (self.dim && other.dim)
    }
}

impl BitXor for StyleSet {
    type Output = StyleSet;

    fn bitxor(self, rhs: StyleSet) -> StyleSet {
        StyleSet {
            reversed: self.reversed ^ rhs.reversed,
            blink: self.blink ^ rhs.blink,
            bold: self.bold ^ rhs.bold,
            italic: self.italic ^ rhs.italic,
            underline: self.underline ^ rhs.underline,
            overline: self.overline ^ rhs.overline,
            double_underline: self.double_underline ^ rhs.double_underline,
            strikethrough: self.strikethrough ^ rhs.strikethrough,
            dim: self.dim ^ rhs.dim,
        }
    }
}

impl BitOr for StyleSet {
    type Output = StyleSet;

    fn bitor(self, rhs: StyleSet) -> StyleSet {
        StyleSet {
            reversed: self.reversed | rhs.reversed,
            blink: self.blink | rhs.blink,
            bold: self.bold | rhs.bold,
            italic: self.italic | rhs.italic,
            underline: self.underline | rhs.underline,
            overline: self.overline | rhs.overline,
            double_underline: self.double_underline | rhs.double_underline,
            strikethrough: self.strikethrough | rhs.strikethrough,
            dim: self.dim | rhs.dim,
        }
    }
}

/// One rendering state (absolute) or one requested change (delta)
///
/// Absolute formats stored on the stack never contain [`Color::Current`]
/// and always have `reset == false`; both are delta-only markers consumed
/// by [`Format::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    pub fg: Color,
    pub fg_bright: bool,
    pub bg: Color,
    pub bg_bright: bool,
    pub styles: StyleSet,
    /// Delta-only: discard accumulated state and start from the initial
    /// format before applying the rest of this delta
    pub reset: bool,
}

impl Format {
    /// The terminal-default state at the bottom of every format stack
    pub fn initial() -> Self {
        Self {
            fg: Color::Default,
            fg_bright: false,
            bg: Color::Default,
            bg_bright: false,
            styles: StyleSet::default(),
            reset: false,
        }
    }

    /// Neutral delta: inherits both colors, toggles nothing
    pub fn neutral() -> Self {
        Self {
            fg: Color::Current,
            fg_bright: false,
            bg: Color::Current,
            bg_bright: false,
            styles: StyleSet::default(),
            reset: false,
        }
    }

    pub fn set_fg(&mut self, color: Color, bright: bool) {
        self.fg = color;
        self.fg_bright = bright;
    }

    pub fn set_bg(&mut self, color: Color, bright: bool) {
        self.bg = color;
        self.bg_bright = bright;
    }

    /// Combine the current stack top with a parsed delta into the next
    /// absolute format.
    ///
    /// Styles toggle (XOR), so opening the same style twice turns it back
    /// off in the inner scope. A [`Color::Current`] channel keeps the
    /// base's color; anything else overwrites it together with its bright
    /// flag.
    pub fn apply(top: &Format, delta: &Format) -> Format {
        let base = if delta.reset { Format::initial() } else { *top };

        let mut next = base;
        next.styles = base.styles ^ delta.styles;
        if delta.fg != Color::Current {
            next.fg = delta.fg;
            next.fg_bright = delta.fg_bright;
        }
        if delta.bg != Color::Current {
            next.bg = delta.bg;
            next.bg_bright = delta.bg_bright;
        }
        next.reset = false;
        next
    }

    /// Render this absolute format as an SGR escape sequence.
    ///
    /// Always emits the reset-all code first, then one code per active
    /// style in canonical order, then the resolved foreground and
    /// background color codes. Pure; cannot fail for any absolute format.
    pub fn to_escape(&self) -> String {
        debug_assert!(
            self.fg != Color::Current && self.bg != Color::Current,
            "escape rendering requires a resolved absolute format"
        );

        let mut codes: Vec<u8> = Vec::with_capacity(12);
        codes.push(ansi::sgr::RESET);

        let s = &self.styles;
        if s.bold {
            codes.push(ansi::sgr::BOLD);
        }
        if s.dim {
            codes.push(ansi::sgr::DIM);
        }
        if s.italic {
            codes.push(ansi::sgr::ITALIC);
        }
        if s.underline {
            codes.push(ansi::sgr::UNDERLINE);
        }
        if s.blink {
            codes.push(ansi::sgr::BLINK);
        }
        if s.reversed {
            codes.push(ansi::sgr::REVERSED);
        }
        if s.strikethrough {
            codes.push(ansi::sgr::STRIKETHROUGH);
        }
        if s.double_underline {
            codes.push(ansi::sgr::DOUBLE_UNDERLINE);
        }
        if s.overline {
            codes.push(ansi::sgr::OVERLINE);
        }

        let bright = |flag: bool| if flag { ansi::BRIGHT_OFFSET } else { 0 };
        codes.push(ansi::FG_BASE + self.fg.sgr_offset() + bright(self.fg_bright));
        codes.push(ansi::BG_BASE + self.bg.sgr_offset() + bright(self.bg_bright));

        let mut seq = String::with_capacity(24);
        seq.push_str(ansi::SEQ_START);
        for (i, code) in codes.iter().enumerate() {
            if i > 0 {
                seq.push(ansi::SEP);
            }
            seq.push_str(&code.to_string());
        }
        seq.push(ansi::SEQ_END);
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(f: impl FnOnce(&mut StyleSet)) -> StyleSet {
        let mut s = StyleSet::default();
        f(&mut s);
        s
    }

    #[test]
    fn test_initial_renders_reset_and_defaults() {
        assert_eq!(Format::initial().to_escape(), "\x1b[0;39;49m");
    }

    #[test]
    fn test_foreground_color_code() {
        let mut f = Format::initial();
        f.set_fg(Color::Red, false);
        assert_eq!(f.to_escape(), "\x1b[0;31;49m");
    }

    #[test]
    fn test_bright_colors() {
        let mut f = Format::initial();
        f.set_fg(Color::Red, true);
        f.set_bg(Color::Blue, true);
        assert_eq!(f.to_escape(), "\x1b[0;91;104m");
    }

    #[test]
    fn test_style_codes_in_canonical_order() {
        let mut f = Format::initial();
        f.styles = style(|s| {
            s.bold = true;
            s.dim = true;
            s.overline = true;
        });
        // bold (1) and dim (2) before overline (53), colors last
        assert_eq!(f.to_escape(), "\x1b[0;1;2;53;39;49m");
    }

    #[test]
    fn test_apply_xor_toggles_styles() {
        let mut top = Format::initial();
        top.styles = style(|s| s.bold = true);

        let mut delta = Format::neutral();
        delta.styles = style(|s| {
            s.bold = true;
            s.italic = true;
        });

        let next = Format::apply(&top, &delta);
        assert!(!next.styles.bold, "repeated style toggles off");
        assert!(next.styles.italic);
    }

    #[test]
    fn test_apply_current_keeps_base_colors() {
        let mut top = Format::initial();
        top.set_fg(Color::Red, true);
        top.set_bg(Color::Yellow, false);

        let next = Format::apply(&top, &Format::neutral());
        assert_eq!(next.fg, Color::Red);
        assert!(next.fg_bright);
        assert_eq!(next.bg, Color::Yellow);
    }

    #[test]
    fn test_apply_overrides_non_current_colors() {
        let mut top = Format::initial();
        top.set_fg(Color::Red, true);

        let mut delta = Format::neutral();
        delta.set_fg(Color::Green, false);

        let next = Format::apply(&top, &delta);
        assert_eq!(next.fg, Color::Green);
        assert!(!next.fg_bright);
        assert_eq!(next.bg, Color::Default, "untouched channel inherited");
    }

    #[test]
    fn test_apply_reset_starts_from_initial() {
        let mut top = Format::initial();
        top.set_fg(Color::Red, false);
        top.styles = style(|s| s.underline = true);

        let mut delta = Format::neutral();
        delta.reset = true;
        delta.set_fg(Color::Yellow, false);

        let next = Format::apply(&top, &delta);
        assert_eq!(next.fg, Color::Yellow);
        assert_eq!(next.bg, Color::Default);
        assert!(next.styles.is_empty(), "reset discards inherited styles");
        assert!(!next.reset, "reset marker never stored on the stack");
    }

    #[test]
    fn test_styleset_intersects() {
        let bold = style(|s| s.bold = true);
        let bold_dim = style(|s| {
            s.bold = true;
            s.dim = true;
        });
        assert!(bold.intersects(bold_dim));
        assert!(!bold.intersects(style(|s| s.dim = true)));
    }
}
