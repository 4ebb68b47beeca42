//! CSV loading with date-column detection and per-path memoization.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use cached::{Cached, SizedCache};
use polars::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::{DatasetError, Result};

/// Header names recognized as a frame's date column.
pub const DATE_COLUMN_CANDIDATES: &[&str] = &["date", "datetime", "timestamp"];

/// A parsed CSV file together with its detected date column.
#[derive(Debug, Clone)]
pub struct LoadedFrame {
    pub frame: DataFrame,
    /// Header of the date column, original spelling; `None` when the
    /// file has no recognizable date column (the frame is then left in
    /// file order).
    pub date_column: Option<String>,
}

struct CacheEntry {
    modified: SystemTime,
    loaded: Arc<LoadedFrame>,
}

/// Loads CSV files into DataFrames and memoizes them by path.
///
/// Entries carry the file's modification time; a hit with a stale
/// mtime is discarded and the file re-read, so edits on disk are
/// picked up without restarting the process.
pub struct FrameStore {
    cache: Mutex<SizedCache<PathBuf, CacheEntry>>,
    hits: AtomicU64,
}

impl FrameStore {
    /// Creates a store holding at most `capacity` parsed frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: Mutex::new(SizedCache::with_size(capacity)),
            hits: AtomicU64::new(0),
        }
    }

    /// Default capacity: 64 frames.
    pub fn with_defaults() -> Self {
        Self::new(64)
    }

    /// Load `path`, reusing the cached frame when the file is unchanged.
    #[instrument(skip(self))]
    pub fn load(&self, path: &Path) -> Result<Arc<LoadedFrame>> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DatasetError::MissingSource(path.display().to_string()),
            _ => DatasetError::Io(e),
        })?;
        if !metadata.is_file() {
            return Err(DatasetError::MissingSource(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let modified = metadata.modified()?;

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(entry) = cache.cache_get(&path.to_path_buf()) {
                if entry.modified == modified {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    debug!("frame cache hit for {}", path.display());
                    return Ok(Arc::clone(&entry.loaded));
                }
                debug!("frame cache entry for {} is stale, reloading", path.display());
            }
        }

        let loaded = Arc::new(read_frame(path)?);
        if let Ok(mut cache) = self.cache.lock() {
            cache.cache_set(
                path.to_path_buf(),
                CacheEntry {
                    modified,
                    loaded: Arc::clone(&loaded),
                },
            );
        }
        info!(
            "loaded {} rows from {}",
            loaded.frame.height(),
            path.display()
        );
        Ok(loaded)
    }

    /// Number of frames currently memoized.
    pub fn cache_size(&self) -> usize {
        match self.cache.lock() {
            Ok(cache) => cache.cache_size(),
            Err(_) => 0,
        }
    }

    /// Number of loads served from memory since the store was created.
    pub fn cache_hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameStore")
            .field("cached_frames", &self.cache_size())
            .field("hits", &self.cache_hits())
            .finish()
    }
}

/// Read and prepare one CSV file: parse, detect the date column, sort.
fn read_frame(path: &Path) -> Result<LoadedFrame> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DatasetError::Parse(format!("{}: {}", path.display(), e)))?
        .finish()
        .map_err(|e| DatasetError::Parse(format!("{}: {}", path.display(), e)))?;
    prepare_frame(frame)
}

/// Detect the date column and sort ascending by it. The sort is stable,
/// so rows with equal dates keep their file order and "latest" stays
/// well-defined for duplicate dates.
pub fn prepare_frame(frame: DataFrame) -> Result<LoadedFrame> {
    let Some(name) = detect_date_column(&frame) else {
        return Ok(LoadedFrame {
            frame,
            date_column: None,
        });
    };

    let mut frame = frame;
    // try_parse_dates already yields a temporal dtype for clean files;
    // the cast covers columns that inferred as plain strings.
    let dtype = frame.column(&name)?.dtype().clone();
    if !matches!(dtype, DataType::Date | DataType::Datetime(_, _)) {
        let parsed = frame.column(&name)?.cast(&DataType::Date).map_err(|e| {
            DatasetError::Parse(format!("column '{}' is not parseable as dates: {}", name, e))
        })?;
        frame.replace(&name, parsed.as_materialized_series().clone())?;
    }

    let frame = frame.sort(
        [name.as_str()],
        SortMultipleOptions::default().with_maintain_order(true),
    )?;
    Ok(LoadedFrame {
        frame,
        date_column: Some(name),
    })
}

/// First header (in file order) whose lowercase form is a recognized
/// date-column name.
pub fn detect_date_column(frame: &DataFrame) -> Option<String> {
    frame
        .get_column_names()
        .into_iter()
        .find(|name| DATE_COLUMN_CANDIDATES.contains(&name.as_str().to_lowercase().as_str()))
        .map(|name| name.to_string())
}

/// Map of display name (file stem) to CSV path for the per-company
/// predictions directory.
#[instrument]
pub fn list_company_files(dir: &Path) -> Result<BTreeMap<String, PathBuf>> {
    if !dir.is_dir() {
        return Err(DatasetError::MissingSource(dir.display().to_string()));
    }

    let mut files = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            files.insert(stem.to_string(), path.clone());
        }
    }

    if files.is_empty() {
        return Err(DatasetError::MissingSource(format!(
            "no CSV prediction files in {}",
            dir.display()
        )));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    const UNSORTED: &str = "\
Date,actual_low,predicted_low
2023-01-03,98.0,97.5
2023-01-01,100.0,101.5
2023-01-02,99.0,98.5
";

    #[test]
    fn detects_and_sorts_by_date_column() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "acme.csv", UNSORTED);

        let store = FrameStore::with_defaults();
        let loaded = store.load(&path).unwrap();

        assert_eq!(loaded.date_column.as_deref(), Some("Date"));
        assert_eq!(loaded.frame.height(), 3);

        let lows: Vec<Option<f64>> = loaded
            .frame
            .column("actual_low")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(lows, vec![Some(100.0), Some(99.0), Some(98.0)]);
    }

    #[test]
    fn frame_without_date_column_is_left_unsorted() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "no_dates.csv",
            "actual_low,predicted_low\n3.0,2.0\n1.0,2.0\n",
        );

        let store = FrameStore::with_defaults();
        let loaded = store.load(&path).unwrap();

        assert_eq!(loaded.date_column, None);
        let lows: Vec<Option<f64>> = loaded
            .frame
            .column("actual_low")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(lows, vec![Some(3.0), Some(1.0)]);
    }

    #[test]
    fn stable_sort_keeps_file_order_for_equal_dates() {
        let dir = tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "dupes.csv",
            "date,actual_low,predicted_low\n2023-01-02,2.0,2.0\n2023-01-01,1.0,1.0\n2023-01-02,3.0,3.0\n",
        );

        let store = FrameStore::with_defaults();
        let loaded = store.load(&path).unwrap();

        let lows: Vec<Option<f64>> = loaded
            .frame
            .column("actual_low")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        // The later duplicate stays last: "latest" is last by file order.
        assert_eq!(lows, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn second_load_is_served_from_cache() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "cached.csv", UNSORTED);

        let store = FrameStore::with_defaults();
        let first = store.load(&path).unwrap();
        let second = store.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.cache_hits(), 1);
        assert_eq!(store.cache_size(), 1);
    }

    #[test]
    fn modified_file_is_reloaded() {
        let dir = tempdir().unwrap();
        let path = write_csv(dir.path(), "stale.csv", UNSORTED);

        let store = FrameStore::with_defaults();
        let first = store.load(&path).unwrap();
        assert_eq!(first.frame.height(), 3);

        fs::write(
            &path,
            "Date,actual_low,predicted_low\n2023-02-01,5.0,5.5\n",
        )
        .unwrap();
        // Force a distinct mtime; plain rewrites can land in the same
        // filesystem timestamp granule.
        let file = File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(5))
            .unwrap();

        let second = store.load(&path).unwrap();
        assert_eq!(second.frame.height(), 1);
        assert_eq!(store.cache_hits(), 0);
        assert_eq!(store.cache_size(), 1);
    }

    #[test]
    fn missing_file_is_a_missing_source() {
        let dir = tempdir().unwrap();
        let store = FrameStore::with_defaults();
        let err = store.load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::MissingSource(_)));
    }

    #[test]
    fn company_listing_maps_stems_and_skips_other_files() {
        let dir = tempdir().unwrap();
        write_csv(dir.path(), "Acme.csv", UNSORTED);
        write_csv(dir.path(), "Globex.CSV", UNSORTED);
        write_csv(dir.path(), "notes.txt", "not a csv");

        let files = list_company_files(dir.path()).unwrap();
        let names: Vec<&String> = files.keys().collect();
        assert_eq!(names, vec!["Acme", "Globex"]);
    }

    #[test]
    fn empty_or_missing_directory_is_a_missing_source() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            list_company_files(dir.path()),
            Err(DatasetError::MissingSource(_))
        ));
        assert!(matches!(
            list_company_files(&dir.path().join("absent")),
            Err(DatasetError::MissingSource(_))
        ));
    }
}
