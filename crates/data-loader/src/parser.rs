//! Parser for comma-delimited rating files.
//!
//! Format, one triple per line: `itemId,userId,rating`
//!
//! The first column is the item and the second the user. Fields are trimmed,
//! blank lines are skipped, and any malformed row aborts the whole parse.
//! Identifiers may be written as integers (`8`) or integral decimals (`8.0`);
//! a fractional or negative identifier is a parse error.

use crate::error::{DataLoadError, Result};
use crate::types::RatingTriple;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const FIELDS_PER_LINE: usize = 3;

/// Read a file to a string, mapping a missing file to `FileNotFound`
fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Parse an identifier field, accepting integral decimals such as `8.0`
fn parse_id(field: &str) -> std::result::Result<u32, String> {
    if let Ok(id) = field.parse::<u32>() {
        return Ok(id);
    }
    let value: f64 = field.parse().map_err(|e| format!("{}", e))?;
    if value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err("not a non-negative integer".to_string())
    }
}

/// Parse a rating file from disk
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingTriple>> {
    let content = read_to_string(path)?;
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_ratings_str(&file, &content)
}

/// Parse rating rows held in memory. `file` is only used in error messages.
pub fn parse_ratings_str(file: &str, content: &str) -> Result<Vec<RatingTriple>> {
    let mut ratings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line_trimmed.split(',').map(str::trim).collect();
        if parts.len() != FIELDS_PER_LINE {
            return Err(DataLoadError::FieldCountMismatch {
                expected: FIELDS_PER_LINE,
                found: parts.len(),
                line: line_no,
            });
        }

        let item_id = parse_id(parts[0]).map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid itemId '{}': {}", parts[0], e),
        })?;
        let user_id = parse_id(parts[1]).map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid userId '{}': {}", parts[1], e),
        })?;
        let rating: f64 = parts[2].parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid rating '{}': {}", parts[2], e),
        })?;
        if !rating.is_finite() {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: parts[2].to_string(),
                line: line_no,
            });
        }

        ratings.push(RatingTriple::new(user_id, item_id, rating));
    }

    Ok(ratings)
}
