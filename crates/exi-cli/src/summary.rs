use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use exi_cli::types::{PipelineResult, StageCounts};
use exi_model::{ExamSummary, REPORT_HEADER, format_float};

pub fn print_summary(result: &PipelineResult) {
    let analysis = &result.analysis;
    for line in stage_lines(&analysis.counts) {
        println!("{line}");
    }
    println!();
    println!("Input: {}", analysis.input_dir.display());
    println!(
        "Files: {}  Rows loaded: {}  Rows kept: {}",
        analysis.counts.files_read, analysis.counts.rows_loaded, analysis.counts.rows_kept
    );
    println!("Output: {}", result.output_file.display());

    if analysis.summaries.is_empty() {
        println!("No exams to report.");
        return;
    }
    println!("{}", summary_table(&analysis.summaries));
}

/// Per-stage removal counts, one console line each.
fn stage_lines(counts: &StageCounts) -> Vec<String> {
    let mut lines = vec![
        format!("{} rows removed due to commas", counts.comma_rows_removed),
        format!("{} duplicate rows removed", counts.duplicate_rows_removed),
        format!("{} rows removed for zero DAP", counts.zero_dap_rows_removed),
    ];
    if counts.malformed_collimation > 0 {
        lines.push(format!(
            "{} collimation values could not be split",
            counts.malformed_collimation
        ));
    }
    lines
}

fn summary_table(summaries: &[ExamSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(REPORT_HEADER.iter().map(|label| header_cell(label)));
    apply_summary_table_style(&mut table);
    for index in 1..REPORT_HEADER.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total = 0usize;
    for summary in summaries {
        total += summary.n;
        let mut row = vec![exam_cell(summary.exam.as_deref()), Cell::new(summary.n)];
        row.extend(summary.medians().map(|(_, value)| median_cell(value)));
        table.add_row(row);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    table
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ColumnConstraint::LowerBoundary(Width::Fixed(5)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn exam_cell(exam: Option<&str>) -> Cell {
    match exam {
        None => dim_cell("(no label)"),
        Some("") => dim_cell("(blank)"),
        Some(exam) => Cell::new(exam)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
    }
}

fn median_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_float(value)),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
