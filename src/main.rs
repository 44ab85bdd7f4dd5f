//! richedit - preview a file through the embeddable editor core
//!
//! Prints the document highlighted with the Dracula theme, or opens it in
//! a minimal interactive session with `--edit`.

mod terminal;

use std::env;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process;

use richedit::input::Key;
use richedit::{
    create_rich_editor, Config, EditorOptions, EditorView, Language, MountTarget, Preview, Result,
};
use terminal::Terminal;
use tracing::{debug, info};

/// Parsed command line
#[derive(Debug, Default)]
struct Args {
    language: Option<String>,
    line_numbers: bool,
    wrap_column: Option<usize>,
    edit: bool,
    file: Option<PathBuf>,
}

fn main() {
    setup_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by RICHEDIT_LOG (default: warn)
fn setup_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RICHEDIT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
}

fn run() -> Result<()> {
    let Some(args) = parse_args(env::args().skip(1))? else {
        return Ok(());
    };
    let config = Config::load()?;
    debug!(?config, ?args, "starting");

    let text = match &args.file {
        Some(path) => read_or_empty(path)?,
        None => String::new(),
    };

    let mut options = EditorOptions::new()
        .show_line_numbers(args.line_numbers || config.line_numbers)
        .indent_width(config.indent_width);
    options = match (&args.language, args.file.as_deref().and_then(detect_language)) {
        (Some(name), _) => options.with_language_name(name),
        (None, Some(language)) => options.language(language),
        (None, None) => options.language(config.language()),
    };

    let mount = MountTarget::new();
    let wrap_column = args.wrap_column.unwrap_or(config.wrap_column);

    if args.edit {
        let mut view = create_rich_editor(&mount, &text, options)?;
        edit(&mut view, args.file.as_deref(), wrap_column)
    } else {
        let view = create_rich_editor(&mount, &text, options)?;
        Preview::new(wrap_column).render(&view, &mut io::stdout())
    }
}

/// Parse arguments; `None` means the invocation was fully handled
fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            "--version" | "-V" => {
                println!("richedit {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--language" | "-l" => args.language = Some(required(&mut argv, &arg)?),
            "--line-numbers" | "-n" => args.line_numbers = true,
            "--wrap" | "-w" => {
                let value = required(&mut argv, &arg)?;
                let column = value
                    .parse()
                    .map_err(|_| usage_error(format!("invalid wrap column '{}'", value)))?;
                args.wrap_column = Some(column);
            }
            "--edit" | "-e" => args.edit = true,
            _ if arg.starts_with('-') => {
                return Err(usage_error(format!("unknown option '{}'", arg)));
            }
            _ => args.file = Some(PathBuf::from(&arg)),
        }
    }
    Ok(Some(args))
}

fn required(argv: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    argv.next()
        .ok_or_else(|| usage_error(format!("{} needs a value", flag)))
}

fn usage_error(msg: String) -> richedit::EditorError {
    io::Error::new(ErrorKind::InvalidInput, msg).into()
}

fn detect_language(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
}

/// Read a file; a missing file starts an empty document
fn read_or_empty(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

/// Interactive session: keys go to the view, Ctrl-s saves, Ctrl-q quits
fn edit(view: &mut EditorView, path: Option<&Path>, wrap_column: usize) -> Result<()> {
    let mut term = Terminal::new()?;
    let preview = Preview::new(wrap_column.min(term.cols().max(1) as usize));
    loop {
        term.clear()?;
        preview.render(view, &mut io::stdout())?;
        term.flush()?;

        let Some(key) = Key::from_event(term.read_key()?) else {
            continue;
        };
        if key == Key::ctrl('q') {
            return Ok(());
        }
        if key == Key::ctrl('s') {
            if let Some(path) = path {
                fs::write(path, view.text())?;
                info!(path = %path.display(), "saved");
            }
            continue;
        }
        view.handle_key(key);
    }
}

fn print_usage() {
    println!("richedit {} - embeddable editor core preview", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: richedit [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -l, --language L   python, javascript or markdown (default)");
    println!("  -n, --line-numbers Show the line-number gutter");
    println!("  -w, --wrap N       Wrap column for long lines");
    println!("  -e, --edit         Edit interactively (C-s save, C-q quit)");
    println!("  -h, --help         Show this help message");
    println!("  -V, --version      Show version information");
    println!();
    println!("Settings are read from ~/.richedit.toml; RICHEDIT_LOG sets the log filter.");
}
