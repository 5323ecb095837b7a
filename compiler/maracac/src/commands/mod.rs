//! Command handlers for the Maraca CLI.
//!
//! Shared utilities like `read_file` live here in the module root.

mod fmt;

pub use fmt::{
    format_source, parse_fmt_args, run_format, FmtCommand, FmtOptions, FormatResult,
};

/// Read a source file, turning I/O failures into a printable message.
pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}
