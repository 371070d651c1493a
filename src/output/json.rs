use crate::output::results::ResultsIndex;
use crate::output::traits::OutputResult;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// Builds the results file name for a point in time
///
/// The RFC 3339 timestamp has `:` and `.` replaced by `-` so it is safe on
/// every filesystem.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use site_signals::output::results_file_name;
///
/// let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap();
/// assert_eq!(results_file_name(at), "2024-05-01T12-30-15-000Z.json");
/// ```
pub fn results_file_name(at: DateTime<Utc>) -> String {
    let timestamp = at
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("{}.json", timestamp)
}

/// Writes the results index as pretty-printed JSON into `dir`
///
/// # Arguments
///
/// * `index` - The results to persist
/// * `dir` - Output directory (created if missing)
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Failed to create the directory, serialize or write
pub fn save_results(index: &ResultsIndex, dir: &Path) -> OutputResult<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(results_file_name(Utc::now()));
    let json = serde_json::to_string_pretty(index)?;
    fs::write(&path, json)?;

    tracing::info!("Results saved to {}", path.display());
    Ok(path)
}
