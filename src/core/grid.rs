use crate::domain::model::{Record, RecordId};
use crate::domain::schema::{ColumnKind, EntitySpec};
use serde_json::Value;

pub const DEFAULT_PAGE_SIZE: usize = 5;

// 像素寬度換算成終端機字元
const PIXELS_PER_CHAR: u16 = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub id: RecordId,
    pub cells: Vec<String>,
}

/// Row/column projection of a working list, ready for a renderer.
#[derive(Debug, Clone)]
pub struct Grid {
    spec: &'static EntitySpec,
    rows: Vec<GridRow>,
}

pub fn display_value(value: Option<&Value>, kind: ColumnKind) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Bool(true)) => "Sí".to_string(),
        Some(Value::Bool(false)) => "No".to_string(),
        Some(Value::String(text)) if kind == ColumnKind::Boolean => match text.as_str() {
            "true" | "1" => "Sí".to_string(),
            "false" | "0" => "No".to_string(),
            _ => text.clone(),
        },
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

impl Grid {
    pub fn new(spec: &'static EntitySpec, records: &[Record]) -> Self {
        let rows = records
            .iter()
            .map(|record| GridRow {
                id: record.id.clone(),
                cells: spec
                    .data_columns()
                    .map(|column| display_value(record.field(column.field).as_ref(), column.kind))
                    .collect(),
            })
            .collect();
        Self { spec, rows }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.spec.data_columns().map(|c| c.label).collect()
    }

    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.rows.len().div_ceil(page_size)
    }

    /// Zero-based page; out of range yields an empty slice.
    pub fn page(&self, index: usize, page_size: usize) -> &[GridRow] {
        let start = index.saturating_mul(page_size).min(self.rows.len());
        let end = start.saturating_add(page_size).min(self.rows.len());
        &self.rows[start..end]
    }

    fn column_widths(&self, rows: &[GridRow]) -> Vec<usize> {
        self.spec
            .data_columns()
            .enumerate()
            .map(|(index, column)| {
                let cells = rows
                    .iter()
                    .filter_map(|row| row.cells.get(index))
                    .map(|cell| cell.chars().count());
                cells
                    .chain([
                        column.label.chars().count(),
                        usize::from(column.min_width / PIXELS_PER_CHAR),
                    ])
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Plain-text table of the given rows.
    pub fn render_rows(&self, rows: &[GridRow]) -> String {
        let widths = self.column_widths(rows);
        let line = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    let pad = width.saturating_sub(cell.chars().count());
                    format!("{}{}", cell, " ".repeat(pad))
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = Vec::with_capacity(rows.len() + 2);
        out.push(line(self.headers()));
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in rows {
            out.push(line(row.cells.iter().map(String::as_str).collect()));
        }
        out.join("\n")
    }

    pub fn render_page(&self, index: usize, page_size: usize) -> String {
        self.render_rows(self.page(index, page_size))
    }
}
