use comfy_table::{presets, Table};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("row {row} has {got} column(s), header has {expected}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },
}

fn check_widths(header: &[&str], rows: &[Vec<String>]) -> Result<(), RenderError> {
    for (idx, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(RenderError::ColumnMismatch {
                row: idx,
                expected: header.len(),
                got: row.len(),
            });
        }
    }
    Ok(())
}

/// Table Markdown : en-tête, séparateur `---`, une ligne par enregistrement.
/// Zéro ligne de données reste valide (en-tête + séparateur seuls).
pub fn markdown_table(header: &[&str], rows: &[Vec<String>]) -> Result<String, RenderError> {
    check_widths(header, rows)?;
    let mut out = String::new();
    out.push_str(&pipe_row(header.iter().copied()));
    out.push_str(&pipe_row(header.iter().map(|_| "---")));
    for row in rows {
        out.push_str(&pipe_row(row.iter().map(String::as_str)));
    }
    Ok(out)
}

fn pipe_row<'a, I: Iterator<Item = &'a str>>(cells: I) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(cell);
        line.push_str(" |");
    }
    line.push('\n');
    line
}

/// Table ASCII bordée (comfy-table) : chaque colonne est au moins aussi
/// large que sa cellule la plus large.
pub fn bordered_table(header: &[&str], rows: &[Vec<String>]) -> Result<String, RenderError> {
    check_widths(header, rows)?;
    let mut table = Table::new();
    table.load_preset(presets::ASCII_FULL);
    table.set_header(header.iter().copied());
    for row in rows {
        table.add_row(row);
    }
    let mut out = table.to_string();
    out.push('\n');
    Ok(out)
}
