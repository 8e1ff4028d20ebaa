//! # Date Normalization
//!
//! Date fields accept either the literal text `YYYY-MM-DD` or a native
//! date/time value. Native values are reduced to their calendar date here,
//! before schema validation, so the schema's date pattern always sees the
//! normalized text and both spellings store the same value.
//!
//! Text already in `YYYY-MM-DD` shape is left alone but checked for being
//! a real calendar day, since the schema pattern cannot reject `2025-02-30`.
//! Values that are neither are also left alone for the schema to report.

use astro_core::temporal::is_iso_date_shape;
use astro_core::{ContentDate, RecordKind};
use serde_json::Value;

use crate::validate::Violation;

/// Date fields per record kind. `name[]` descends into every element of
/// the array `name`.
fn date_fields(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::Image => &["date", "acquisitions[].date"],
        RecordKind::Object | RecordKind::Equipment | RecordKind::Location => &[],
    }
}

/// Normalize every date field of a `kind` document in place.
///
/// Returns violations for date fields that have the `YYYY-MM-DD` shape but
/// do not name a real day.
pub fn normalize_dates(kind: RecordKind, document: &mut Value) -> Vec<Violation> {
    let mut violations = Vec::new();
    for field in date_fields(kind) {
        let segments: Vec<&str> = field.split('.').collect();
        visit(document, &segments, String::new(), &mut violations);
    }
    violations
}

fn visit(value: &mut Value, segments: &[&str], pointer: String, out: &mut Vec<Violation>) {
    let Some((head, rest)) = segments.split_first() else {
        normalize_date_value(value, &pointer, out);
        return;
    };

    if let Some(name) = head.strip_suffix("[]") {
        if let Some(Value::Array(items)) = value.get_mut(name) {
            for (i, item) in items.iter_mut().enumerate() {
                visit(item, rest, format!("{pointer}/{name}/{i}"), out);
            }
        }
    } else if let Some(child) = value.get_mut(*head) {
        visit(child, rest, format!("{pointer}/{head}"), out);
    }
}

fn normalize_date_value(value: &mut Value, pointer: &str, out: &mut Vec<Violation>) {
    let Value::String(raw) = value else {
        return;
    };

    if is_iso_date_shape(raw) {
        if let Err(e) = ContentDate::parse(raw) {
            out.push(Violation {
                instance_path: pointer.to_string(),
                schema_path: String::new(),
                message: e.to_string(),
            });
        }
        return;
    }

    if let Ok(date) = ContentDate::parse_lenient(raw) {
        *value = Value::String(date.to_iso_date());
    }
}
