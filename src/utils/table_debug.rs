// src/utils/table_debug.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::table::Table;
use crate::utils::error::AppError;

/// Renders a reconstructed table for operator inspection, one row per line
/// with cells joined by `|`. This is the view to read when an extraction
/// fails and the anchors need eyeballing.
pub fn format_table(table: &Table) -> String {
    table
        .iter()
        .map(|row| row.join("|"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Saves a reconstructed table as pretty-printed JSON with a small metadata
/// envelope, for offline inspection of documents that failed extraction.
pub fn save_table_json<P: AsRef<Path>>(table: &Table, path: P) -> Result<PathBuf, AppError> {
    let path = path.as_ref().to_path_buf();

    let dump = serde_json::json!({
        "row_count": table.len(),
        "rows": table,
        "dump_timestamp": chrono::Utc::now().to_rfc3339(),
    });

    let dump_str = serde_json::to_string_pretty(&dump)
        .map_err(|e| AppError::Serialization(e.to_string()))?;

    fs::write(&path, dump_str)?;

    tracing::info!("Saved table dump to {}", path.display());

    Ok(path)
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_joins_cells_with_pipes() {
        let table: Table = vec![
            vec!["⑥성명".to_string(), "홍길동".to_string()],
            vec!["근무기간".to_string()],
        ];

        let rendered = format_table(&table);
        assert_eq!(rendered, "⑥성명|홍길동\n근무기간");
    }

    #[test]
    fn test_format_empty_table() {
        assert_eq!(format_table(&Vec::new()), "");
    }
}
