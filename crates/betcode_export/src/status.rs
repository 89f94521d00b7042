//! Status code to display label resolution.

use crate::spec::{EnumBetCodeStatus, SpecStatusLabels};

/// Display label for `status`. Never fails.
pub fn derive_status_label(status: EnumBetCodeStatus, labels: &SpecStatusLabels) -> &str {
    match status {
        EnumBetCodeStatus::Pending => &labels.pending,
        EnumBetCodeStatus::Verified => &labels.verified,
        EnumBetCodeStatus::Deleted => &labels.deleted,
        EnumBetCodeStatus::Unrecognized => &labels.unrecognized,
    }
}

/// Display label for a raw status code; `None` resolves to the unrecognized label.
pub fn derive_status_label_from_code<'a>(
    code: Option<&str>,
    labels: &'a SpecStatusLabels,
) -> &'a str {
    derive_status_label(EnumBetCodeStatus::from(code.map(str::to_string)), labels)
}
