//! Sheet layout: the cell grid and column widths, independent of the file format

use crate::types::{InfoValue, PackageList, SystemInfo};

pub const SYSTEM_INFO_SHEET: &str = "System Info";
pub const PACKAGES_SHEET: &str = "Installed Packages";

/// Extra characters added to the longest cell of each column
const WIDTH_MARGIN: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Character count of the displayed value
    ///
    /// Non-finite numbers have no spreadsheet representation and cannot be
    /// measured.
    pub fn display_width(&self) -> Option<usize> {
        match self {
            CellValue::Text(s) => Some(s.chars().count()),
            CellValue::Number(n) if n.is_finite() => Some(n.to_string().chars().count()),
            CellValue::Number(_) => None,
        }
    }
}

impl From<&InfoValue> for CellValue {
    fn from(value: &InfoValue) -> Self {
        match value {
            InfoValue::Text(s) => CellValue::Text(s.clone()),
            InfoValue::Integer(n) => CellValue::Number(*n as f64),
            InfoValue::Float(n) => CellValue::Number(*n),
        }
    }
}

/// A named sheet: header row followed by data rows
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl SheetLayout {
    pub fn new(name: impl Into<String>, header: &[&str]) -> Self {
        Self {
            name: name.into(),
            rows: vec![header
                .iter()
                .map(|h| CellValue::Text(h.to_string()))
                .collect()],
        }
    }

    /// `Key` / `Value` rows in mapping order
    pub fn system_info(info: &SystemInfo) -> Self {
        let mut layout = Self::new(SYSTEM_INFO_SHEET, &["Key", "Value"]);
        for (key, value) in info.iter() {
            layout.push_row(vec![CellValue::Text(key.to_string()), value.into()]);
        }
        layout
    }

    /// One package per row, or the sentinel/error string as the only row
    pub fn packages(packages: &PackageList) -> Self {
        let mut layout = Self::new(PACKAGES_SHEET, &["Installed packages"]);
        for row in packages.rows() {
            layout.push_row(vec![CellValue::Text(row)]);
        }
        layout
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Longest measurable cell per column plus the margin
    pub fn column_widths(&self) -> Vec<f64> {
        (0..self.column_count())
            .map(|col| {
                let longest = self
                    .rows
                    .iter()
                    .enumerate()
                    .filter_map(|(row, cells)| {
                        let cell = cells.get(col)?;
                        let width = cell.display_width();
                        if width.is_none() {
                            tracing::warn!(
                                sheet = %self.name,
                                row,
                                col,
                                "Cannot measure cell width, skipping"
                            );
                        }
                        width
                    })
                    .max()
                    .unwrap_or(0);
                (longest + WIDTH_MARGIN) as f64
            })
            .collect()
    }
}
