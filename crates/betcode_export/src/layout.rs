//! Static column layout of the export sheet.

use crate::conf::{N_EXPORT_COLUMNS, TUP_COLUMN_LAYOUT};
use crate::spec::SpecColumnSpec;

/// Ordered column declarations; `headers` overrides the built-in labels.
pub fn derive_column_layout(
    headers: Option<&[String; N_EXPORT_COLUMNS]>,
) -> [SpecColumnSpec; N_EXPORT_COLUMNS] {
    TUP_COLUMN_LAYOUT.map(|(column, header, width_px, kind)| SpecColumnSpec {
        column,
        header: headers
            .map(|l_headers| l_headers[column.index()].clone())
            .unwrap_or_else(|| header.to_string()),
        width_px,
        kind,
    })
}
