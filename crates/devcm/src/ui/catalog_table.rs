//! Catalog table rendering
//!
//! Renders the feature catalog as an indexed table:
//!
//! ```text
//! Available Features
//! Index  Name     Description
//!     0  Node.js  Node runtime with npm and yarn
//!     1  Python   Python interpreter and pip
//! ```
//!
//! Styling goes through `console`, which drops ANSI codes when stdout is not a
//! terminal.

use console::{measure_text_width, pad_str, style, Alignment};
use devcm_core::catalog::FeatureDescriptor;

const TITLE: &str = "Available Features";
const HEADERS: [&str; 3] = ["Index", "Name", "Description"];
const GAP: &str = "  ";

/// Render `catalog` as a table, one line per feature, ending with a newline.
pub fn render(catalog: &[FeatureDescriptor]) -> String {
    let rows: Vec<[String; 3]> = catalog
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            [
                index.to_string(),
                feature.name().to_string(),
                feature.description().to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(measure_text_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(measure_text_width(cell));
        }
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", style(TITLE).bold()));

    let header = format_row(&HEADERS.map(str::to_string), &widths);
    out.push_str(&format!("{}\n", style(header).bold()));

    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out
}

fn format_row(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let index = pad_str(&cells[0], widths[0], Alignment::Right, None);
    let name = pad_str(&cells[1], widths[1], Alignment::Left, None);
    // Last column is not padded to avoid trailing whitespace
    format!("{}{}{}{}{}", index, GAP, name, GAP, cells[2])
        .trim_end()
        .to_string()
}
