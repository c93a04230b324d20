//! Spreadsheet export
//!
//! Builds one [`SheetLayout`] per sheet and renders it into an xlsx workbook.
//! Every populated cell gets a thin border and centered alignment.

pub mod layout;

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

use crate::error::ReportError;
use crate::types::{PackageList, SystemInfo};

pub use layout::{CellValue, SheetLayout};

/// Format applied to every populated cell
fn cell_format() -> Format {
    Format::new()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

/// Layouts for both sheets, in workbook order
pub fn build_layouts(info: &SystemInfo, packages: &PackageList) -> [SheetLayout; 2] {
    [
        SheetLayout::system_info(info),
        SheetLayout::packages(packages),
    ]
}

fn render(workbook: &mut Workbook, layout: &SheetLayout, format: &Format) -> Result<(), ReportError> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(layout.name())?;

    for (row, cells) in layout.rows().iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let (r, c) = (row as u32, col as u16);
            let written = match cell {
                CellValue::Text(s) => sheet.write_string_with_format(r, c, s, format).map(|_| ()),
                CellValue::Number(n) => sheet.write_number_with_format(r, c, *n, format).map(|_| ()),
            };
            if let Err(e) = written {
                tracing::warn!(sheet = %layout.name(), row, col, "Skipping cell: {}", e);
            }
        }
    }

    for (col, width) in layout.column_widths().into_iter().enumerate() {
        sheet.set_column_width(col as u16, width)?;
    }

    Ok(())
}

/// Write the two-sheet report, replacing any existing file at `path`
pub fn write_report(
    info: &SystemInfo,
    packages: &PackageList,
    path: &Path,
) -> Result<PathBuf, ReportError> {
    let mut workbook = Workbook::new();
    let format = cell_format();

    for layout in &build_layouts(info, packages) {
        render(&mut workbook, layout, &format)?;
        tracing::debug!(sheet = %layout.name(), rows = layout.row_count(), "Rendered sheet");
    }

    workbook.save(path)?;
    tracing::info!("Report written to {}", path.display());
    Ok(path.to_path_buf())
}
