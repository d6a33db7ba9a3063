//! Terminal output utilities

use console::style;

/// Column gap after the longest key
pub const TABLE_PADDING: usize = 3;

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Print a warning message to stderr
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", style("warning").yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}: {}", style("success").green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{}: {}", style("info").blue().bold(), message);
}

/// Render rows as two aligned columns
///
/// The first column is as wide as the longest key plus `padding`.
pub fn format_table<K, V>(rows: &[(K, V)], padding: usize) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let width = rows
        .iter()
        .map(|(key, _)| console::measure_text_width(key.as_ref()))
        .max()
        .unwrap_or(0)
        + padding;

    let mut out = String::new();
    for (key, value) in rows {
        let key = key.as_ref();
        let spaces = width - console::measure_text_width(key);
        out.push_str(key);
        out.push_str(&" ".repeat(spaces));
        out.push_str(value.as_ref());
        out.push('\n');
    }
    out
}

/// Print a two-column table preceded by a blank line
pub fn print_table<K, V>(rows: &[(K, V)])
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    println!();
    print!("{}", format_table(rows, TABLE_PADDING));
}
