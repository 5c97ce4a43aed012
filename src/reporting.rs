// Reporting and output for sigfeat
// Writes rendered records to timestamped text and Markdown files

use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_SEPARATOR: &str = "; ";

fn report_path(dir: &Path, extension: &str) -> String {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("sigfeat_records_{}.{}", timestamp, extension))
        .to_string_lossy()
        .into_owned()
}

/// Escape a token for a Markdown table cell
fn escape_markdown_cell(token: &str) -> String {
    token.replace('\\', "\\\\").replace('|', "\\|")
}

/// Code span for one token; a double-backtick span keeps inner backticks literal
fn markdown_code_span(token: &str) -> String {
    let escaped = escape_markdown_cell(token);
    if escaped.contains('`') {
        format!("`` {} ``", escaped)
    } else {
        format!("`{}`", escaped)
    }
}

/// One record per line, tokens joined with `separator`
pub fn export_records(dir: &Path, records: &[Vec<String>], separator: &str) -> Result<String, std::io::Error> {
    let filename = report_path(dir, "txt");
    let mut file = File::create(&filename)?;

    for record in records {
        writeln!(file, "{}", record.join(separator))?;
    }

    Ok(filename)
}

pub fn export_markdown(dir: &Path, records: &[Vec<String>]) -> Result<String, std::io::Error> {
    let filename = report_path(dir, "md");
    let mut file = File::create(&filename)?;

    writeln!(file, "# sigfeat Records\n")?;
    writeln!(file, "| # | Tokens |")?;
    writeln!(file, "|---|--------|")?;
    for (index, record) in records.iter().enumerate() {
        let cells: Vec<String> = record.iter().map(|t| markdown_code_span(t)).collect();
        writeln!(file, "| {} | {} |", index + 1, cells.join(" "))?;
    }

    Ok(filename)
}
