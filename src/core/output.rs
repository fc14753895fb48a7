use crate::core::symbols::SHORTHAND_SYMBOLS;
use crate::domain::model::{ExpandedQuery, ExpansionResult, OutputFormat};
use crate::utils::error::{ExpandError, Result};

pub fn render(result: &ExpansionResult, format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Txt => Ok(render_text(result).into_bytes()),
        OutputFormat::Json => Ok(serde_json::to_vec_pretty(result)?),
        OutputFormat::Csv => render_delimited(result, b','),
        OutputFormat::Tsv => render_delimited(result, b'\t'),
    }
}

/// One expanded query per line; line breaks inside a query are written as `\n` / `\r`.
fn render_text(result: &ExpansionResult) -> String {
    let mut text = String::new();
    for query in &result.queries {
        text.push_str(&escape_line_breaks(&query.expanded));
        text.push('\n');
    }
    text
}

fn escape_line_breaks(query: &str) -> String {
    query.replace('\r', "\\r").replace('\n', "\\n")
}

/// `name<TAB>original<TAB>=> expanded` per query, `-` for unnamed queries.
pub fn render_dry_run(queries: &[ExpandedQuery]) -> String {
    let mut text = String::new();
    for query in queries {
        text.push_str(&format!(
            "{}\t{}\t=> {}\n",
            query.name.as_deref().unwrap_or("-"),
            escape_line_breaks(&query.original),
            escape_line_breaks(&query.expanded)
        ));
    }
    text
}

/// The shorthand catalogue as an aligned table. Canonical forms are quoted
/// so the padding around `$` stays visible.
pub fn render_symbol_table() -> String {
    let mut text = format!("{:<10} {:<16} DESCRIPTION\n", "SHORTHAND", "CANONICAL");
    for symbol in SHORTHAND_SYMBOLS {
        text.push_str(&format!(
            "{:<10} {:<16} {}\n",
            symbol.shorthand,
            format!("{:?}", symbol.canonical),
            symbol.description
        ));
    }
    text
}

fn render_delimited(result: &ExpansionResult, delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(["name", "original", "expanded", "changed"])?;
    for query in &result.queries {
        writer.write_record([
            query.name.as_deref().unwrap_or(""),
            query.original.as_str(),
            query.expanded.as_str(),
            if query.changed { "true" } else { "false" },
        ])?;
    }

    writer.into_inner().map_err(|e| ExpandError::ProcessingError {
        message: format!("Failed to flush delimited output: {}", e),
    })
}
