//! Tagtint command-line driver
//!
//! Thin glue around the formatter automaton: parses options, then feeds
//! bytes from arguments, the demo buffer, or stdin through one automaton
//! per input segment.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use tagtint::automaton::{FormatterAutomaton, Options};
use tagtint::syntax::TagSyntax;
use tagtint::texts;

use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut opts = Options::default();
    let mut syntax = TagSyntax::classic();
    let mut demo = false;
    let mut segments: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "-v" | "--version" => {
                println!("tagtint {}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            "-l" | "--legend" => {
                print!("{}", &texts::LEGEND[1..]);
                return ExitCode::SUCCESS;
            }
            "-s" | "--strip" => {
                opts.strip = true;
            }
            "-e" | "--escape" => {
                opts.escape = true;
            }
            "-S" | "--no-sanitize" => {
                opts.sanitize = false;
            }
            "--demo" => {
                demo = true;
            }
            "-t" | "--tags" => {
                i += 1;
                let Some(name) = args.get(i) else {
                    return usage_error("--tags requires a style name");
                };
                syntax = match TagSyntax::from_name(name) {
                    Ok(s) => s,
                    Err(e) => return usage_error(&e.to_string()),
                };
            }
            "--custom-tags" => {
                if i + 3 >= args.len() {
                    return usage_error("--custom-tags requires three strings");
                }
                syntax = match TagSyntax::custom(&args[i + 1], &args[i + 2], &args[i + 3]) {
                    Ok(s) => s,
                    Err(e) => return usage_error(&e.to_string()),
                };
                i += 3;
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return usage_error(&format!("unrecognized option '{arg}'"));
            }
            arg => {
                segments.push(arg.to_string());
            }
        }
        i += 1;
    }

    debug!(
        strip = opts.strip,
        escape = opts.escape,
        sanitize = opts.sanitize,
        tags = syntax.name,
        "configured"
    );

    match run(opts, syntax, demo, &segments) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("tagtint: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Options, syntax: TagSyntax, demo: bool, segments: &[String]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if demo {
        let mut automaton = FormatterAutomaton::with_syntax(&mut out, opts, syntax);
        automaton.feed(texts::DEMO.as_bytes())?;
        return automaton.finish();
    }

    if !segments.is_empty() {
        // Each argument is an independent segment; the automata do not
        // share formatting state
        for (idx, segment) in segments.iter().enumerate() {
            if idx > 0 {
                out.write_all(b" ")?;
            }
            let mut automaton = FormatterAutomaton::with_syntax(&mut out, opts, syntax.clone());
            automaton.feed(segment.as_bytes())?;
            automaton.finish()?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut automaton = FormatterAutomaton::with_syntax(&mut out, opts, syntax);
    let mut buf = [0u8; 4096];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        for &byte in &buf[..n] {
            automaton.accept(byte)?;
        }
    }
    automaton.finish()
}

fn usage_error(message: &str) -> ExitCode {
    eprint!("{}", texts::USAGE);
    eprintln!("tagtint: {message}");
    eprintln!("(try -h or --help for more info)");
    ExitCode::FAILURE
}

fn print_help() {
    print!("{}", texts::USAGE);
    print!("{}", &texts::HELP[1..]);
}
