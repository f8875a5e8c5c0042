//! Table name derivation: file name → lowercase ASCII SQL identifier.

use anyhow::{Result, bail};

use crate::utils::config::{CSV_SUFFIX, MAX_IDENTIFIER_LEN};

/// Ordered substitutions applied before lowercasing. Uppercase umlauts map to capitalized
/// pairs so the lowercase pass yields the same result as the lowercase forms.
pub const SUBSTITUTIONS: &[(char, &str)] = &[
    (' ', "_"),
    ('ä', "ae"),
    ('ö', "oe"),
    ('ü', "ue"),
    ('ß', "ss"),
    ('Ü', "Ue"),
    ('Ä', "Ae"),
    ('Ö', "Oe"),
    ('-', "_"),
];

/// Portion of the file name naming the sensor: everything before the last underscore.
/// Names without an underscore use the whole stem (`.csv` stripped).
pub fn sensor_prefix(file_name: &str) -> &str {
    match file_name.rfind('_') {
        Some(idx) => &file_name[..idx],
        None => file_name.strip_suffix(CSV_SUFFIX).unwrap_or(file_name),
    }
}

/// Apply [`SUBSTITUTIONS`] and lowercase. No truncation; idempotent on its own output.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out.to_lowercase()
}

/// True if `name` is `[a-z_][a-z0-9_]*` and at most [`MAX_IDENTIFIER_LEN`] bytes.
/// Reserved words are not checked; they fail when the table is provisioned.
pub fn is_valid_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    let Some(first) = bytes.first() else {
        return false;
    };
    bytes.len() <= MAX_IDENTIFIER_LEN
        && !first.is_ascii_digit()
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'_')
}

/// Derive the sensor table name for a CSV file name, e.g. `Kitchen Temp_2024-01-15.csv` → `kitchen_temp`.
pub fn table_name_from_file_name(file_name: &str) -> Result<String> {
    let name = sanitize_identifier(sensor_prefix(file_name));
    if !is_valid_identifier(&name) {
        bail!(
            "cannot derive a table name from {:?}: {:?} is not a plain lowercase identifier \
            (a-z, 0-9, _; not starting with a digit; at most {} characters)",
            file_name,
            name,
            MAX_IDENTIFIER_LEN
        );
    }
    Ok(name)
}
