use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ardac_cli::types::NodeRunSummary;

pub fn print_summary(summary: &NodeRunSummary) {
    println!("Release: {}", summary.dcc_release);
    println!("{}", summary_table(summary));
}

fn summary_table(summary: &NodeRunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Node"),
        header_cell("Subjects"),
        header_cell("Records"),
        header_cell("QC"),
        header_cell("Output"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    table.add_row(vec![
        Cell::new(summary.node.display_name()).add_attribute(Attribute::Bold),
        Cell::new(summary.subjects),
        Cell::new(summary.records),
        qc_count_cell(summary.qc_records),
        path_cell(Some(&summary.node_file)),
    ]);
    if summary.qc_file.is_some() {
        table.add_row(vec![
            dim_cell("QC"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            path_cell(summary.qc_file.as_deref()),
        ]);
    }
    table
}

fn qc_count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn path_cell(path: Option<&Path>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()),
        None => dim_cell("-"),
    }
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ardac_model::{NodeKind, SubjectsType};

    use super::*;

    fn summary(qc_records: Option<usize>) -> NodeRunSummary {
        NodeRunSummary {
            node: NodeKind::Audit,
            subjects: SubjectsType::Observational,
            dcc_release: "DCC_data_release_v2.0.0".to_string(),
            records: 12,
            qc_records,
            node_file: PathBuf::from("audit_obs_DCC_data_release_v2.0.0.tsv"),
            qc_file: qc_records.map(|_| PathBuf::from("audit_qc_obs_DCC_data_release_v2.0.0.tsv")),
            duration_ms: 3,
        }
    }

    #[test]
    fn table_lists_qc_file_when_present() {
        let rendered = summary_table(&summary(Some(2))).to_string();
        assert!(rendered.contains("audit_obs_DCC_data_release_v2.0.0.tsv"));
        assert!(rendered.contains("audit_qc_obs_DCC_data_release_v2.0.0.tsv"));
    }

    #[test]
    fn case_summary_has_one_row() {
        let table = summary_table(&summary(None));
        assert_eq!(table.row_count(), 1);
    }
}
