//! Writers for the predictions file and the console summary.

use anyhow::{Context, Result};
use pipeline::{EvaluationReport, PredictionRow, Predictions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Format one predictions-file line: `itemId,userId,actual,predicted \n`
pub fn format_row(row: &PredictionRow) -> String {
    format!(
        "{},{},{:?},{:?} \n",
        row.item_id, row.user_id, row.actual, row.predicted
    )
}

/// Write all predictions, ordered by user then item.
///
/// Rows go to a temporary file in the target directory that is persisted
/// over `path` once fully flushed. On any failure the temporary file is
/// removed, so no truncated predictions file is left behind.
pub fn write_predictions(path: &Path, predictions: &Predictions) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        for row in predictions.rows() {
            writer.write_all(format_row(&row).as_bytes())?;
        }
        writer.flush()?;
    }

    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move predictions into {}", path.display()))?;
    Ok(())
}

/// The two summary lines, metrics to 4 decimal places
pub fn format_summary(report: &EvaluationReport) -> String {
    format!("RMSE {:.4}\nMAE {:.4}", report.rmse, report.mae)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_format_row() {
        let row = PredictionRow {
            item_id: 8,
            user_id: 1744889,
            actual: 4.0,
            predicted: 3.25,
        };
        assert_eq!(format_row(&row), "8,1744889,4.0,3.25 \n");
    }

    #[test]
    fn test_format_summary() {
        let report = EvaluationReport {
            rmse: 0.912345,
            mae: 0.7,
            graded: 10,
            skipped: 0,
        };
        assert_eq!(format_summary(&report), "RMSE 0.9123\nMAE 0.7000");
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cli-output-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_empty_predictions() {
        let dir = scratch_dir("empty");
        let path = dir.join("predictions.txt");

        write_predictions(&path, &Predictions::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert_eq!(dir_entries(&dir), vec!["predictions.txt".to_string()]);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_persist_leaves_no_temporary_file() {
        let dir = scratch_dir("blocked");
        // A non-empty directory at the target path makes the final rename fail
        let path = dir.join("predictions.txt");
        fs::create_dir_all(path.join("occupied")).unwrap();

        let result = write_predictions(&path, &Predictions::default());

        assert!(result.is_err());
        assert!(!path.with_extension("tmp").exists());
        assert_eq!(dir_entries(&dir), vec!["predictions.txt".to_string()]);
        assert!(path.is_dir());
        fs::remove_dir_all(&dir).unwrap();
    }
}
