//! Canned text for the command-line driver: usage, help, legend and demo.

pub const USAGE: &str = "Usage: tagtint [options] [strings...]\n";

pub const HELP: &str = r#"
Translates markdown-like tags '{<format>--' and '--}' into ANSI formatting.
When no arguments are passed, input is read from STDIN. Otherwise each
argument is translated separately. Quote arguments that contain spaces or
characters special to your shell.

Options:
    -v --version              print version string
    -l --legend               show formatting legend
    -s --strip                strip formatting tags from input
    -e --escape               enable C-like escape sequences (\a\b\r\n\f\t\v)
                              and the whitespace trim escape \#
    -S --no-sanitize          do not emit a format reset at end of input
    -t --tags <name>          tag style: classic (default), bracket, xml
       --custom-tags O S C    custom opening, separator and closing strings
       --demo                 show demo
    -h --help                 display this help and exit

Overview:
    Formatting uses a stack, but tags do not have to be balanced. The
    formatter is greedy: a tag is translated the moment it completes, so a
    missing closing tag leaves its formatting active in the terminal.

    Parsing is best-effort and never fails: invalid or unrecognized
    formatting is printed verbatim. A closing tag with no open format is
    ordinary text, which lets literal '--}' pass through untouched.

    Strip mode is useful to keep formatted output in the terminal while
    writing plain text to files from the same tagged source.
"#;

pub const LEGEND: &str = r#"
Tag:      {<format>--text--}     e.g. {%Yc*_--foo--}

Colors                      Options
  blac[k]                     [%] Reversed
  [r]ed                       [!] Blink
  [g]reen                     [*] Bold
  [y]ellow                    [/] Italic
  [b]lue                      [_] Underline
  [m]agenta                   [^] Overline
  [c]yan                      [=] Double underline
  [w]hite                     [~] Strikethrough
  [;] current                 [.] Dim
  [d] default                 [0] Reset all formatting

Rules
  The first color is the foreground, the second the background.
  Uppercase selects the bright variant of a color.
  Current [;] is the topmost color on the stack; default [d] is the
  terminal's own color.
  Options toggle (XOR) against the active state, so nesting the same
  option turns it back off.
  Formats are stored on a stack; tags need not be balanced and invalid
  formatting prints verbatim.
"#;

pub const DEMO: &str = r#"
{kw--blac[k]--} {r--[r]ed--} {g--[g]reen--} {y--[y]ellow--} {b--[b]lue--} {m--[m]agenta--} {c--[c]yan--} {w--[w]hite--}
{Kw--blac[K]--} {R--[R]ed--} {G--[G]reen--} {Y--[Y]ellow--} {B--[B]lue--} {M--[M]agenta--} {C--[C]yan--} {W--[W]hite--}
{;k--black BG--} {;r--red BG--} {;g--green BG--} {;y--yellow BG--} {;b--blue BG--} {;m--magenta BG--} {;c--cyan BG--} {;w--white BG--}

{rk--red on black  {;w*--white background, inherited foreground, bold--}  red on black again--}
{ry--red on yellow {dd--default foreground and background--} red on yellow again--}

[%] {%--reversed--}   [!] {!--blink--}   [*] {*--bold--}   [/] {/--italic--}   [.] {.--dim--}
[_] {_--underline--}  [^] {^--overline--}  [=] {=--double underline--}  [~] {~--strikethrough--}
[0] {r*--red bold {0--reset all formatting--} red bold again--}

stack test:
{--normal {*--bold {/--italic {_--underline {.--dim {%--reverse--}--}--}--}--}--}
toggle test: {_--under{_--not under{_--under again--}--}--}

UTF-8: 你好，世界  {%--你好，{*--世界--}--}

below is only relevant with -e:
\\ backslash: \\
\n newline: \n(new line)
\b backspace: [X\bO]
\t tabs: a\tb\tc
\# trim: <\#     no padding here
"#;
