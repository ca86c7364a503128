//! JSON report writer.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::error::IoError;

/// Serialise `report` as pretty-printed JSON to `path`.
///
/// # Errors
///
/// Returns [`IoError::Fs`] if the file cannot be created and
/// [`IoError::Json`] if serialisation fails.
pub fn write_json_report<T: Serialize + ?Sized>(path: &Path, report: &T) -> Result<(), IoError> {
    let file = File::create(path).map_err(|e| IoError::Fs {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    std::io::Write::flush(&mut writer).map_err(|e| IoError::Fs {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Summary {
        cells: usize,
        failures: Vec<String>,
    }

    #[test]
    fn writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let summary = Summary {
            cells: 12,
            failures: vec!["cell (1.25, 2.75): no crop present".to_string()],
        };
        write_json_report(&path, &summary).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"cells\": 12"));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["failures"][0], "cell (1.25, 2.75): no crop present");
    }

    #[test]
    fn unwritable_path() {
        let err = write_json_report(Path::new("/nonexistent/dir/report.json"), &1).unwrap_err();
        assert!(matches!(err, IoError::Fs { .. }));
    }
}
