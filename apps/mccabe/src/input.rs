//! # Input Loading
//!
//! Reads equilibrium data files and validates file paths.
//!
//! ## Supported Formats
//!
//! - `json`: `{"x": [0.0, 0.05, ...], "y": [0.0, 0.18, ...]}`
//! - `text`: one `x, y` pair per line. The delimiter is sniffed from the
//!   first data line (`,` `;` or tab, otherwise spaces). Blank lines and
//!   lines starting with `#` are skipped; a non-numeric first line is
//!   treated as a header.

use mccabe_core::{EquilibriumTable, ThieleError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of an equilibrium data or configuration file (4 MB).
pub const MAX_INPUT_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ThieleError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ThieleError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ThieleError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve `path` to an existing regular file.
pub fn validate_file_path(path: &Path) -> Result<PathBuf, ThieleError> {
    let canonical = path.canonicalize().map_err(|e| {
        ThieleError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ThieleError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve the parent of `path` to an existing directory and rejoin the file name.
pub fn validate_output_path(path: &Path) -> Result<PathBuf, ThieleError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        ThieleError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(ThieleError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| ThieleError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read a bounded text file.
pub fn read_text_file(path: &Path) -> Result<String, ThieleError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;
    std::fs::read_to_string(&validated)
        .map_err(|e| ThieleError::IoError(format!("Read file: {}", e)))
}

// =============================================================================
// EQUILIBRIUM DATA
// =============================================================================

/// Equilibrium data file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// `{"x": [...], "y": [...]}`
    Json,
    /// Two-column text.
    Text,
}

impl InputFormat {
    /// Parse a format name; `auto` picks by file extension.
    pub fn resolve(name: &str, path: &Path) -> Result<Self, ThieleError> {
        match name {
            "json" => Ok(Self::Json),
            "text" | "csv" => Ok(Self::Text),
            "auto" => {
                let is_json = path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
                Ok(if is_json { Self::Json } else { Self::Text })
            }
            _ => Err(ThieleError::SerializationError(format!(
                "Unknown format: {}. Use: auto, json, text",
                name
            ))),
        }
    }
}

/// Serialized form of an equilibrium table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct XyData {
    /// Liquid mole fractions.
    pub x: Vec<f64>,
    /// Vapor mole fractions.
    pub y: Vec<f64>,
}

impl XyData {
    /// Validate into a table.
    pub fn into_table(self) -> Result<EquilibriumTable, ThieleError> {
        EquilibriumTable::new(self.x, self.y)
    }
}

impl From<&EquilibriumTable> for XyData {
    fn from(table: &EquilibriumTable) -> Self {
        Self {
            x: table.xs().to_vec(),
            y: table.ys().to_vec(),
        }
    }
}

/// Load an equilibrium table from a file.
pub fn load_equilibrium(path: &Path, format: InputFormat) -> Result<EquilibriumTable, ThieleError> {
    tracing::info!("Loading equilibrium data from {:?} ({:?})", path, format);
    let contents = read_text_file(path)?;
    let table = match format {
        InputFormat::Json => parse_json(&contents)?,
        InputFormat::Text => parse_text(&contents)?,
    };
    tracing::debug!("Loaded {} equilibrium samples", table.len());
    Ok(table)
}

/// Parse `{"x": [...], "y": [...]}`.
pub fn parse_json(contents: &str) -> Result<EquilibriumTable, ThieleError> {
    let data: XyData = serde_json::from_str(contents)
        .map_err(|e| ThieleError::SerializationError(format!("Equilibrium JSON: {}", e)))?;
    data.into_table()
}

/// Pick the field delimiter from the first data line: the most frequent of
/// `,` `;` and tab, otherwise a space.
fn detect_delimiter(contents: &str) -> u8 {
    let first = contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
        .unwrap_or_default();

    [b',', b';', b'\t']
        .into_iter()
        .map(|delim| (delim, first.bytes().filter(|&b| b == delim).count()))
        .filter(|&(_, count)| count > 0)
        .max_by_key(|&(_, count)| count)
        .map_or(b' ', |(delim, _)| delim)
}

/// Parse two-column text.
pub fn parse_text(contents: &str) -> Result<EquilibriumTable, ThieleError> {
    let delimiter = detect_delimiter(contents);
    tracing::trace!("Text delimiter: {:?}", char::from(delimiter));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .has_headers(false)
        .from_reader(contents.as_bytes());

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut seen_data_line = false;

    for record in reader.records() {
        let record = record
            .map_err(|e| ThieleError::SerializationError(format!("Equilibrium text: {}", e)))?;
        let line = record.position().map_or(0, csv::Position::line);

        // Repeated spaces produce empty fields.
        let fields: Vec<&str> = record.iter().filter(|f| !f.is_empty()).collect();
        if fields.first().is_none_or(|f| f.starts_with('#')) {
            continue;
        }

        let parsed = match fields.as_slice() {
            [a, b] => a.parse::<f64>().ok().zip(b.parse::<f64>().ok()),
            _ => None,
        };

        match parsed {
            Some((xi, yi)) => {
                x.push(xi);
                y.push(yi);
                seen_data_line = true;
            }
            // header line
            None if !seen_data_line && fields.len() == 2 => {}
            None => {
                return Err(ThieleError::SerializationError(format!(
                    "Line {}: expected two numbers, got '{}'",
                    line,
                    fields.join(", ")
                )));
            }
        }
    }

    EquilibriumTable::new(x, y)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_with_header_and_comments() {
        let text = "x, y\n# source: test\n0.0, 0.0\n0.5,0.8\n\n  # end\n1.0 ,1.0\n";
        let table = parse_text(text).expect("table");
        assert_eq!(table.xs(), &[0.0, 0.5, 1.0]);
        assert_eq!(table.ys(), &[0.0, 0.8, 1.0]);
    }

    #[test]
    fn text_rejects_garbage_after_data() {
        let text = "0.0,0.0\nfoo,bar\n";
        assert!(matches!(
            parse_text(text),
            Err(ThieleError::SerializationError(msg)) if msg.starts_with("Line 2")
        ));
    }

    #[test]
    fn text_delimiters_are_detected() {
        assert_eq!(detect_delimiter("# c\n0.1,0.2\n"), b',');
        assert_eq!(detect_delimiter("0.1;0.2\n"), b';');
        assert_eq!(detect_delimiter("x\ty\n"), b'\t');
        assert_eq!(detect_delimiter("  0.1   0.2\n"), b' ');
    }

    #[test]
    fn text_semicolon_tab_and_space_files() {
        for text in [
            "x;y\n0.0;0.0\n0.5;0.8\n1.0;1.0\n",
            "x\ty\n0.0\t0.0\n0.5\t0.8\n1.0\t1.0\n",
            "  0.0   0.0\n0.5 0.8\n\n1.0    1.0\n",
        ] {
            let table = parse_text(text).expect("table");
            assert_eq!(table.xs(), &[0.0, 0.5, 1.0], "{:?}", text);
            assert_eq!(table.ys(), &[0.0, 0.8, 1.0], "{:?}", text);
        }
    }

    #[test]
    fn text_error_names_record_line() {
        let text = "0.0,0.0\n0.5,0.8\n0.5,0.8,0.9\n";
        assert!(matches!(
            parse_text(text),
            Err(ThieleError::SerializationError(msg))
                if msg == "Line 3: expected two numbers, got '0.5, 0.8, 0.9'"
        ));
    }

    #[test]
    fn text_rejects_three_columns() {
        assert!(parse_text("0.0,0.0,0.0\n").is_err());
    }

    #[test]
    fn empty_text_is_empty_table() {
        assert_eq!(parse_text("# nothing\n"), Err(ThieleError::EmptyTable));
    }

    #[test]
    fn json_round_trip() {
        let table = parse_json(r#"{"x": [0.0, 1.0], "y": [0.0, 1.0]}"#).expect("table");
        let data = XyData::from(&table);
        assert_eq!(data.x, vec![0.0, 1.0]);
    }

    #[test]
    fn json_length_mismatch_is_data_error() {
        let result = parse_json(r#"{"x": [0.0, 1.0], "y": [0.0]}"#);
        assert_eq!(
            result,
            Err(ThieleError::LengthMismatch { x_len: 2, y_len: 1 })
        );
    }

    #[test]
    fn format_resolution() {
        let json = Path::new("vle.JSON");
        let csv = Path::new("vle.csv");
        assert_eq!(InputFormat::resolve("auto", json), Ok(InputFormat::Json));
        assert_eq!(InputFormat::resolve("auto", csv), Ok(InputFormat::Text));
        assert_eq!(InputFormat::resolve("text", json), Ok(InputFormat::Text));
        assert!(InputFormat::resolve("xml", csv).is_err());
    }
}
