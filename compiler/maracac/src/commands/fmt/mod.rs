//! The `fmt` command: format Maraca source files.
//!
//! Supports single files, directories, and stdin.
//! Directories are walked for `*.ma` files, which are formatted in parallel.

#![allow(
    clippy::struct_excessive_bools,
    reason = "FmtOptions mirrors boolean CLI flags"
)]

use std::borrow::Cow;
use std::fmt::Write as _;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use maraca_fmt::FormatConfig;
use maraca_ir::Span;
use maraca_parse::{ParseError, ParseErrorKind};
use rayon::prelude::*;

use super::read_file;

/// Per-directory list of excluded paths.
const IGNORE_FILE: &str = ".maracafmtignore";

/// Extension of Maraca source files.
const SOURCE_EXTENSION: &str = "ma";

/// Unchanged lines shown around a diff hunk.
const DIFF_CONTEXT: usize = 2;

/// Options for the format command.
#[derive(Clone, Copy, Debug, Default)]
pub struct FmtOptions {
    /// Report files that would change without touching them.
    /// The command exits with 1 if any would.
    pub check: bool,
    /// Print a diff instead of rewriting files.
    pub diff: bool,
    /// Read from stdin and write to stdout.
    pub stdin: bool,
    /// Ignore `.maracafmtignore` and the default exclusions.
    pub no_ignore: bool,
    /// Layout settings passed through to the formatter.
    pub style: FormatConfig,
}

/// What the command line asked for.
#[derive(Debug)]
pub enum FmtCommand {
    Help,
    Run {
        options: FmtOptions,
        /// Files and directories; empty in stdin mode.
        paths: Vec<String>,
    },
}

/// Result of formatting a single file.
#[derive(Debug, PartialEq, Eq)]
pub enum FormatResult {
    /// Already formatted.
    Unchanged,
    /// Rewritten on disk.
    Formatted,
    /// Would change (check or diff mode).
    WouldFormat,
    /// The file could not be read, parsed, formatted or written.
    /// Contains the rendered message.
    Error(String),
}

/// Parse the arguments that follow `maraca fmt`.
pub fn parse_fmt_args(args: &[String]) -> Result<FmtCommand, String> {
    let mut options = FmtOptions::default();
    let mut paths = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--check" => options.check = true,
            "--diff" => options.diff = true,
            "--stdin" => options.stdin = true,
            "--no-ignore" => options.no_ignore = true,
            "--help" | "-h" => return Ok(FmtCommand::Help),
            arg => {
                if let Some(value) = arg.strip_prefix("--width=") {
                    options.style.print_width = parse_count("--width", value)?;
                } else if let Some(value) = arg.strip_prefix("--tab-width=") {
                    options.style.tab_width = parse_count("--tab-width", value)?;
                } else if arg.starts_with('-') {
                    return Err(format!("unknown option: {arg}"));
                } else {
                    paths.push(arg.to_string());
                }
            }
        }
    }

    if options.stdin {
        if !paths.is_empty() {
            return Err("cannot specify paths with --stdin".to_string());
        }
        if options.check {
            return Err("cannot use --check with --stdin".to_string());
        }
        if options.diff {
            return Err("cannot use --diff with --stdin".to_string());
        }
    } else if paths.is_empty() {
        paths.push(".".to_string());
    }

    Ok(FmtCommand::Run { options, paths })
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{flag} expects a positive number, got '{value}'")),
    }
}

/// Format one source text.
///
/// CRLF line endings become LF, and a non-empty result ends with exactly one
/// newline. Failures come back as messages rendered for the terminal.
pub fn format_source(path: &str, source: &str, style: &FormatConfig) -> Result<String, String> {
    let source = normalize_line_endings(source);
    let parsed = maraca_parse::parse(&source)
        .map_err(|e| format_parse_error(path, &e, &source, use_colors()))?;
    let mut formatted = maraca_fmt::format_tree(&parsed.arena, parsed.root, style)
        .map_err(|e| format!("error: {e}\n  --> {path}\n"))?;
    if !formatted.is_empty() {
        formatted.push('\n');
    }
    Ok(formatted)
}

fn normalize_line_endings(source: &str) -> Cow<'_, str> {
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

/// Format a single file on disk.
pub fn format_file(path: &str, options: &FmtOptions) -> FormatResult {
    match read_file(path) {
        Ok(content) => format_content(path, &content, options),
        Err(message) => FormatResult::Error(format!("error: {message}\n")),
    }
}

fn format_content(path: &str, content: &str, options: &FmtOptions) -> FormatResult {
    tracing::debug!(path, len = content.len(), "formatting file");
    let formatted = match format_source(path, content, &options.style) {
        Ok(formatted) => formatted,
        Err(message) => return FormatResult::Error(message),
    };

    if formatted == content {
        return FormatResult::Unchanged;
    }

    if options.check {
        return FormatResult::WouldFormat;
    }

    if options.diff {
        print!("{}", render_diff(path, content, &formatted));
        return FormatResult::WouldFormat;
    }

    if let Err(e) = std::fs::write(path, &formatted) {
        return FormatResult::Error(format!("error: cannot write '{path}': {e}\n"));
    }

    FormatResult::Formatted
}

/// Format stdin to stdout. Returns false if the input did not parse.
fn format_stdin(style: &FormatConfig) -> bool {
    let mut content = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut content) {
        eprintln!("Error reading from stdin: {e}");
        return false;
    }

    match format_source("<stdin>", &content, style) {
        Ok(formatted) => {
            print!("{formatted}");
            true
        }
        Err(message) => {
            eprint!("{message}");
            false
        }
    }
}

/// Unified diff with a single hunk covering everything that changed.
fn render_diff(path: &str, original: &str, formatted: &str) -> String {
    let old: Vec<&str> = original.lines().collect();
    let new: Vec<&str> = formatted.lines().collect();

    let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = String::new();
    let _ = writeln!(out, "--- {path}");
    let _ = writeln!(out, "+++ {path}");

    if prefix == old.len() && prefix == new.len() {
        out.push_str("\\ line endings or final newline differ\n");
        return out;
    }

    let start = prefix.saturating_sub(DIFF_CONTEXT);
    let old_changed = old.len() - suffix;
    let new_changed = new.len() - suffix;
    let old_end = (old_changed + DIFF_CONTEXT).min(old.len());
    let new_end = (new_changed + DIFF_CONTEXT).min(new.len());

    let _ = writeln!(
        out,
        "@@ -{},{} +{},{} @@",
        start + 1,
        old_end - start,
        start + 1,
        new_end - start
    );
    for line in &old[start..prefix] {
        let _ = writeln!(out, " {line}");
    }
    for line in &old[prefix..old_changed] {
        let _ = writeln!(out, "-{line}");
    }
    for line in &new[prefix..new_changed] {
        let _ = writeln!(out, "+{line}");
    }
    for line in &old[old_changed..old_end] {
        let _ = writeln!(out, " {line}");
    }
    out
}

/// Per-run counters, shared across worker threads.
#[derive(Default)]
struct Totals {
    formatted: AtomicUsize,
    unchanged: AtomicUsize,
    errors: AtomicUsize,
}

impl Totals {
    fn record(&self, path: &str, result: FormatResult, options: &FmtOptions) {
        match result {
            FormatResult::Formatted => {
                println!("Formatted: {path}");
                self.formatted.fetch_add(1, Ordering::Relaxed);
            }
            FormatResult::WouldFormat => {
                if options.check {
                    println!("Would format: {path}");
                }
                self.formatted.fetch_add(1, Ordering::Relaxed);
            }
            FormatResult::Unchanged => {
                self.unchanged.fetch_add(1, Ordering::Relaxed);
            }
            FormatResult::Error(message) => {
                eprint!("{message}");
                self.errors.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::Relaxed)
    }
}

/// Format every source file under `path` in parallel.
fn format_directory(path: &Path, options: &FmtOptions, totals: &Totals) {
    let files = collect_source_files(path, options);
    tracing::debug!(dir = %path.display(), files = files.len(), "formatting directory");

    files.par_iter().for_each(|file| {
        let file = file.display().to_string();
        totals.record(&file, format_file(&file, options), options);
    });
}

/// All `*.ma` files below `root`, sorted, minus ignored paths.
fn collect_source_files(root: &Path, options: &FmtOptions) -> Vec<PathBuf> {
    let patterns = if options.no_ignore {
        Vec::new()
    } else {
        load_ignore_patterns(root)
    };
    let mut files = Vec::new();
    visit_source_files(root, root, options, &patterns, &mut files);
    files.sort();
    files
}

fn visit_source_files(
    dir: &Path,
    root: &Path,
    options: &FmtOptions,
    patterns: &[String],
    files: &mut Vec<PathBuf>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error reading directory '{}': {e}", dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if !options.no_ignore {
            let skip_name = path.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
                name.starts_with('.') || name == "target" || name == "node_modules"
            });
            if skip_name || is_ignored(&path, root, patterns) {
                continue;
            }
        }

        if path.is_dir() {
            visit_source_files(&path, root, options, patterns, files);
        } else if path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION) {
            files.push(path);
        }
    }
}

/// Patterns from `.maracafmtignore` in `root`: one per line, `#` comments.
fn load_ignore_patterns(root: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(root.join(IGNORE_FILE)) else {
        return Vec::new();
    };
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_end_matches('/').to_string())
        .collect()
}

/// Whether `path` is excluded by any pattern.
///
/// Patterns match the path relative to `root`. A pattern without `/` also
/// matches a bare file or directory name at any depth.
fn is_ignored(path: &Path, root: &Path, patterns: &[String]) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    let relative = relative.to_string_lossy().replace('\\', "/");
    let name = path.file_name().and_then(|n| n.to_str());

    patterns.iter().any(|pattern| {
        glob_match(pattern, &relative)
            || (!pattern.contains('/') && name.is_some_and(|name| wildcard_match(pattern, name)))
    })
}

/// `*` matches within one path segment, `**` any number of whole segments.
fn glob_match(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.trim_start_matches('/').split('/').collect();
    let path: Vec<&str> = path.split('/').collect();
    match_segments(&pattern, &path)
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_segments(rest, &path[skip..])),
        Some((first, rest)) => path.split_first().is_some_and(|(segment, tail)| {
            wildcard_match(first, segment) && match_segments(rest, tail)
        }),
    }
}

fn wildcard_match(pattern: &str, text: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == text,
        Some((prefix, rest)) => {
            let Some(text) = text.strip_prefix(prefix) else {
                return false;
            };
            text.char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(text.len()))
                .any(|i| wildcard_match(rest, &text[i..]))
        }
    }
}

/// Run the format command and return the process exit code.
pub fn run_format(args: &[String]) -> i32 {
    let (options, paths) = match parse_fmt_args(args) {
        Ok(FmtCommand::Help) => {
            print_fmt_help();
            return 0;
        }
        Ok(FmtCommand::Run { options, paths }) => (options, paths),
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("Run 'maraca fmt --help' for usage");
            return 1;
        }
    };

    if options.stdin {
        return i32::from(!format_stdin(&options.style));
    }

    let totals = Totals::default();
    let mut walked_dir = false;

    for path in &paths {
        let path_obj = PathBuf::from(path);
        if path_obj.is_file() {
            totals.record(path, format_file(path, &options), &options);
        } else if path_obj.is_dir() {
            walked_dir = true;
            format_directory(&path_obj, &options, &totals);
        } else {
            eprintln!("Path not found: {path}");
            totals.errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    let formatted = Totals::get(&totals.formatted);
    let unchanged = Totals::get(&totals.unchanged);
    let errors = Totals::get(&totals.errors);

    if (paths.len() > 1 || walked_dir) && (formatted > 0 || unchanged > 0) {
        let verb = if options.check {
            "would format"
        } else {
            "formatted"
        };
        println!("\n{formatted} {verb}, {unchanged} unchanged");
    }

    i32::from(errors > 0 || (options.check && formatted > 0))
}

fn print_fmt_help() {
    println!("Format Maraca source files");
    println!();
    println!("Usage: maraca fmt [options] [paths...]");
    println!();
    println!("Arguments:");
    println!("  paths             Files or directories to format (default: .)");
    println!();
    println!("Options:");
    println!("  --check           Check if files are formatted (exit 1 if not)");
    println!("  --diff            Show diff output instead of modifying files");
    println!("  --stdin           Read from stdin, write to stdout");
    println!("  --width=<n>       Target line width (default: 80)");
    println!("  --tab-width=<n>   Spaces per indentation level (default: 2)");
    println!("  --no-ignore       Ignore .maracafmtignore files and format everything");
    println!("  --help            Show this help message");
    println!();
    println!("Ignore files:");
    println!("  Create a .maracafmtignore file to exclude paths from formatting.");
    println!("  Patterns support * (within a directory) and ** (any directories).");
    println!("  Default ignores: hidden files (.*), target/, node_modules/");
    println!();
    println!("Examples:");
    println!("  maraca fmt                      # Format all files in current directory");
    println!("  maraca fmt src/                 # Format all files in src/");
    println!("  maraca fmt --check              # Check formatting in CI");
    println!("  maraca fmt --diff app.ma        # Preview formatting changes");
    println!("  cat app.ma | maraca fmt --stdin # Format stdin to stdout");
}

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const BLUE: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

/// The source line containing byte `offset`, and where that line starts.
fn get_source_line(source: &str, offset: u32) -> Option<(&str, usize)> {
    let offset = offset as usize;
    let before = source.get(..offset)?;
    let line_start = before.rfind('\n').map_or(0, |pos| pos + 1);
    let line_end = source[offset..]
        .find('\n')
        .map_or(source.len(), |pos| offset + pos);
    Some((&source[line_start..line_end], line_start))
}

/// A hint for the usual causes of each error.
fn get_suggestion(error: &ParseError) -> Option<&'static str> {
    match error.kind {
        ParseErrorKind::Unterminated("string") => Some("add a closing `\"` to end the string"),
        ParseErrorKind::Unterminated("comment") => Some("add a closing `` ` `` to end the comment"),
        ParseErrorKind::Unterminated("inline code") => {
            Some("add a closing `'` to end the inline code")
        }
        ParseErrorKind::Unterminated("block") => {
            Some("check for a missing closing bracket, brace or `>`")
        }
        ParseErrorKind::Expected(what) if what.contains("between items") => {
            Some("separate list items with `,`")
        }
        ParseErrorKind::Expected(_) => Some("check for a missing or mismatched closing bracket"),
        ParseErrorKind::UnexpectedChar(c) if matches!(c, ')' | ']' | '}' | '>') => {
            Some("this bracket has no matching opener")
        }
        ParseErrorKind::UnexpectedChar(_) => {
            Some("escape the character with `\\` or quote it to use it as text")
        }
        ParseErrorKind::UnexpectedEnd => Some("the last expression is incomplete"),
        ParseErrorKind::Unterminated(_) => None,
    }
}

/// Render a parse error with a source excerpt.
fn format_parse_error(path: &str, error: &ParseError, source: &str, use_color: bool) -> String {
    let (error_c, note_c, help_c, bold, blue, reset) = if use_color {
        (
            colors::ERROR,
            colors::NOTE,
            colors::HELP,
            colors::BOLD,
            colors::BLUE,
            colors::RESET,
        )
    } else {
        ("", "", "", "", "", "")
    };
    let mut output = String::new();

    let span = error.span;
    let (line, col) = error.line_col(source);
    let (end_line, end_col) = Span::new(span.end, span.end).line_col(source);

    let _ = writeln!(output, "{error_c}error{reset}{bold}: {error}{reset}");
    let _ = writeln!(output, "  {blue}-->{reset} {path}:{line}:{col}");

    if let Some((source_line, _)) = get_source_line(source, span.start) {
        let line_num = line.to_string();
        let padding = " ".repeat(line_num.len());
        let underline_len = if end_line == line && end_col > col {
            (end_col - col) as usize
        } else {
            1
        };

        let _ = writeln!(output, "  {padding} {blue}|{reset}");
        let _ = writeln!(output, "  {blue}{line_num} |{reset} {source_line}");
        let _ = writeln!(
            output,
            "  {padding} {blue}|{reset} {}{error_c}{}{reset}",
            " ".repeat(col.saturating_sub(1) as usize),
            "^".repeat(underline_len)
        );
    }

    if let Some(suggestion) = get_suggestion(error) {
        let _ = writeln!(output, "  = {help_c}help{reset}: {suggestion}");
    }

    let _ = writeln!(
        output,
        "\n{note_c}note{reset}: fix the syntax error to enable formatting"
    );
    output
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests panic on unexpected state for clear failure messages"
)]
