use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    error::{Error, Result},
    mutex::{Mutex, lock},
    store::{AtomicCounterStore, CounterStore, next_counter},
};

/// A counter persisted as a decimal integer in a text file.
///
/// Writes go to a sibling `*.tmp` file that is flushed and then renamed over
/// the counter file, so readers never see a half-written value.
/// [`AtomicCounterStore::fetch_increment`] holds an in-process lock across
/// the read and the write; it does **not** coordinate separate processes
/// sharing the same file.
#[derive(Debug)]
pub struct FileCounter {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileCounter {
    /// Opens a counter at `path`. The file does not need to exist yet; reads
    /// fail with [`Error::CounterMissing`] until it is initialized.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Writes `start` to `path` and returns the opened counter.
    ///
    /// Unless `overwrite` is set, an existing counter file is left untouched
    /// and an [`io::ErrorKind::AlreadyExists`] storage error is returned.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists (without `overwrite`) or
    /// cannot be written.
    pub fn initialize(path: impl Into<PathBuf>, start: u64, overwrite: bool) -> Result<Self> {
        let counter = Self::new(path);
        if !overwrite && counter.path.try_exists()? {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", counter.path.display()),
            )
            .into());
        }
        counter.set_counter(start)?;
        Ok(counter)
    }

    /// The path of the counter file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read(&self) -> Result<u64> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(Error::CounterMissing),
            Err(e) => return Err(e.into()),
        };
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Err(Error::CounterMissing);
        }
        trimmed.parse().map_err(|_| Error::CorruptCounter {
            value: trimmed.to_owned(),
        })
    }

    fn write(&self, value: u64) -> Result<()> {
        let tmp = self.tmp_path();
        let written = write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, &self.path));
        if written.is_err() {
            // Best effort; the original error is what gets reported.
            let _ = fs::remove_file(&tmp);
        }
        written.map_err(Error::from)
    }
}

fn write_synced(path: &Path, value: u64) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    writeln!(file, "{value}")?;
    file.sync_all()
}

impl CounterStore for FileCounter {
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(path = %self.path.display())))]
    fn get_counter(&self) -> Result<u64> {
        let _guard = lock(&self.guard)?;
        self.read()
    }

    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(path = %self.path.display())))]
    fn set_counter(&self, value: u64) -> Result<()> {
        let _guard = lock(&self.guard)?;
        self.write(value)
    }
}

impl AtomicCounterStore for FileCounter {
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self), fields(path = %self.path.display())))]
    fn fetch_increment(&self) -> Result<u64> {
        let _guard = lock(&self.guard)?;
        let current = self.read()?;
        self.write(next_counter(current)?)?;
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, thread::scope};

    use super::*;

    #[test]
    fn missing_file_is_missing_counter() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCounter::new(dir.path().join("sscc.counter"));
        assert_eq!(store.get_counter(), Err(Error::CounterMissing));
        assert_eq!(store.fetch_increment(), Err(Error::CounterMissing));
    }

    #[test]
    fn empty_file_is_missing_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sscc.counter");
        fs::write(&path, "\n").unwrap();
        assert_eq!(FileCounter::new(path).get_counter(), Err(Error::CounterMissing));
    }

    #[test]
    fn garbage_is_corrupt_counter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sscc.counter");
        fs::write(&path, "twelve\n").unwrap();
        assert_eq!(
            FileCounter::new(path).get_counter(),
            Err(Error::CorruptCounter {
                value: "twelve".into()
            })
        );
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sscc.counter");

        let store = FileCounter::initialize(&path, 100, false).unwrap();
        assert_eq!(store.fetch_increment(), Ok(100));
        drop(store);

        let reopened = FileCounter::new(&path);
        assert_eq!(reopened.get_counter(), Ok(101));
        assert_eq!(fs::read_to_string(&path).unwrap(), "101\n");
        assert!(!reopened.tmp_path().exists());
    }

    #[test]
    fn failed_write_removes_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory in place of the counter file makes the rename fail.
        let path = dir.path().join("sscc.counter");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("occupied"), "").unwrap();

        let store = FileCounter::new(&path);
        assert!(matches!(store.set_counter(1), Err(Error::Storage { .. })));
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn initialize_refuses_to_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sscc.counter");
        FileCounter::initialize(&path, 5, false).unwrap();

        let err = FileCounter::initialize(&path, 0, false).unwrap_err();
        assert!(matches!(
            err,
            Error::Storage {
                kind: io::ErrorKind::AlreadyExists,
                ..
            }
        ));
        assert_eq!(FileCounter::new(&path).get_counter(), Ok(5));

        FileCounter::initialize(&path, 0, true).unwrap();
        assert_eq!(FileCounter::new(&path).get_counter(), Ok(0));
    }

    #[test]
    fn fetch_increment_is_serialized_within_process() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCounter::initialize(dir.path().join("sscc.counter"), 0, false).unwrap();

        let seen = scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        (0..50)
                            .map(|_| store.fetch_increment().unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect::<HashSet<_>>()
        });

        assert_eq!(seen.len(), 200);
        assert_eq!(store.get_counter(), Ok(200));
    }
}
