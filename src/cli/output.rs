//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Only result lines go to stdout; everything else goes to stderr.

use std::fmt::Display;
use std::io::{self, Write};

use colored::Colorize;

/// Write error (red bold "error:" prefix)
pub fn write_error<W: Write>(w: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}: {}", "error".red().bold(), msg)
}

/// Write warning (yellow "Warning:" prefix)
pub fn write_warning<W: Write>(w: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}: {}", "Warning".yellow(), msg)
}

/// Write section header (cyan bold)
pub fn write_header<W: Write>(w: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}", msg.to_string().cyan().bold())
}

/// Write plain output (no color)
pub fn write_info<W: Write>(w: &mut W, msg: &(impl Display + ?Sized)) -> io::Result<()> {
    writeln!(w, "{}", msg)
}

/// Print error to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    let _ = write_error(&mut io::stderr().lock(), msg);
}

/// Print plain output to stdout (result lines)
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}
