//! Table rendering for resolutions, candidate lists and the catalog.

use std::path::PathBuf;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use macrodata_model::{MatchCandidate, Resolution, ResolutionOutcome, VariableEntry};

/// Table of candidates with 1-based indices, as offered by the chooser.
pub fn candidate_table(candidates: &[MatchCandidate]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Description"),
        header_cell("Score"),
    ]);
    apply_table_style(&mut table);
    table.set_constraints(vec![
        ColumnConstraint::LowerBoundary(Width::Fixed(3)),
        ColumnConstraint::UpperBoundary(Width::Fixed(26)),
        ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
    ]);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (index, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            code_cell(&candidate.entry.code),
            Cell::new(&candidate.entry.display_name),
            Cell::new(&candidate.entry.description),
            score_cell(candidate.score),
        ]);
    }
    table
}

/// Table of catalog entries.
pub fn variables_table<'a>(entries: impl IntoIterator<Item = &'a VariableEntry>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Source"),
        header_cell("Series"),
        header_cell("Units"),
    ]);
    apply_table_style(&mut table);
    for entry in entries {
        table.add_row(vec![
            code_cell(&entry.code),
            Cell::new(&entry.display_name),
            Cell::new(entry.source),
            Cell::new(entry.upstream_id()),
            entry
                .units
                .as_deref()
                .map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    table
}

pub fn print_resolution(resolution: &Resolution) {
    println!("Query: {}", resolution.query);
    println!(
        "Source: {} ({})",
        resolution.source(),
        resolution.source().provider()
    );
    println!("Reasoning: {}", resolution.reasoning());
    match &resolution.outcome {
        ResolutionOutcome::Resolved { candidate } => {
            let entry = &candidate.entry;
            println!(
                "Resolved: {} - {} [{}] (score {:.2})",
                entry.code,
                entry.display_name,
                entry.upstream_id(),
                candidate.score
            );
        }
        ResolutionOutcome::AmbiguousChoice { candidates } => {
            println!("Ambiguous: {} candidates", candidates.len());
            println!("{}", candidate_table(candidates));
        }
        ResolutionOutcome::NoMatch { query } => {
            println!("No catalog variable matches \"{query}\"");
        }
    }
}

pub fn print_saved(paths: &[PathBuf]) {
    for path in paths {
        println!("Saved: {}", path.display());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn code_cell(code: &str) -> Cell {
    Cell::new(code).fg(Color::Cyan)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn score_cell(score: f64) -> Cell {
    let cell = Cell::new(format!("{score:.2}"));
    if score >= 0.75 {
        cell.fg(Color::Green)
    } else if score >= 0.5 {
        cell.fg(Color::Yellow)
    } else {
        cell
    }
}
