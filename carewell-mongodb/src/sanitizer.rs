//! BSON key sanitization for MongoDB compatibility.
//!
//! MongoDB restricts document keys from containing dots, dollar signs,
//! and null bytes. Keys are escaped on the way in and restored on the
//! way out; the keys here come from struct field names, which never
//! contain a replacement token. Values are legal as-is and pass through
//! untouched, so free-form string data (quotes, review comments)
//! round-trips exactly even when it contains a token like `__dot__`.

use bson::Bson;

/// Character replacements applied to document keys.
const REPLACEMENTS: [(&str, &str); 3] = [
    (".", "__dot__"),
    ("$", "__dollar__"),
    ("\0", "__null__"),
];

/// Recursively escapes problematic characters in document keys.
///
/// Arrays and documents are processed element-by-element; all other
/// values, strings included, pass through unchanged.
pub(crate) fn sanitize_value(value: &Bson) -> Bson {
    match value {
        Bson::Array(arr) => Bson::Array(arr.iter().map(sanitize_value).collect()),
        Bson::Document(doc) => Bson::Document(
            doc.iter()
                .map(|(k, v)| (sanitize_str(k), sanitize_value(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Escapes problematic characters in a single key.
pub(crate) fn sanitize_str(input: &str) -> String {
    let mut out = input.to_string();
    for (target, replacement) in REPLACEMENTS {
        out = out.replace(target, replacement);
    }
    out
}

/// Recursively reverts [`sanitize_value`] on a value read back from MongoDB.
pub(crate) fn restore_value(value: &Bson) -> Bson {
    match value {
        Bson::Array(arr) => Bson::Array(arr.iter().map(restore_value).collect()),
        Bson::Document(doc) => Bson::Document(
            doc.iter()
                .map(|(k, v)| (restore_str(k), restore_value(v)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

/// Reverts [`sanitize_str`] escapes.
pub(crate) fn restore_str(input: &str) -> String {
    let mut out = input.to_string();
    for (target, replacement) in REPLACEMENTS.iter().rev() {
        out = out.replace(replacement, target);
    }
    out
}
