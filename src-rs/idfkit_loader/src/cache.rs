//! On-disk cache of parsed schemas, one file per EnergyPlus version.
//!
//! A cache file holds a bincode-encoded [`CacheHeader`] followed by the
//! bincode-encoded [`Schema`]. Only the header is a stable contract: a file
//! whose header names another parser version is rejected without decoding
//! the schema.

use std::{
    cell::RefCell,
    collections::HashMap,
    fs,
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
    sync::Arc,
};

use idfkit_parser::{PARSER_VERSION, SchemaSource};
use idfkit_schema::{Schema, SchemaError, SchemaErrorKind, version_key};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

const EXTENSION: &str = "idd.bin";

/// The validated prefix of a cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheHeader {
    /// Full EnergyPlus version of the cached schema
    pub version: String,
    /// Parser that produced the schema
    pub parser_version: String,
}

/// A directory of cached schemas.
///
/// Loaded schemas are kept in memory, so asking twice for the same version
/// reads the file once.
#[derive(Debug)]
pub struct SchemaCache {
    dir: PathBuf,
    loaded: RefCell<HashMap<String, Arc<Schema>>>,
}

impl SchemaCache {
    /// Creates a cache rooted at `dir`. The directory is created on the
    /// first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            loaded: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file a version is cached in.
    #[must_use]
    pub fn path_for(&self, version: &str) -> PathBuf {
        self.dir.join(format!("{}.{EXTENSION}", version_key(version)))
    }

    /// Writes a schema to the cache and keeps it in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema has no version or the file cannot be
    /// written.
    pub fn store(&self, schema: Arc<Schema>) -> Result<PathBuf, LoadError> {
        let version = schema.version().ok_or_else(SchemaError::no_version)?.to_string();
        let path = self.path_for(&version);
        let header = CacheHeader {
            version: version.clone(),
            parser_version: schema.parser_version().to_string(),
        };

        let write_error = |source| LoadError::Write {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_error)?;
        let mut writer = BufWriter::new(fs::File::create(&path).map_err(write_error)?);
        bincode::serialize_into(&mut writer, &header)?;
        bincode::serialize_into(&mut writer, schema.as_ref())?;
        writer.flush().map_err(write_error)?;

        tracing::debug!(version, path = %path.display(), "cached schema");
        let key = version_key(&version);
        if schema.parser_version() == PARSER_VERSION {
            self.loaded.borrow_mut().insert(key, schema);
        } else {
            self.loaded.borrow_mut().remove(&key);
        }
        Ok(path)
    }

    /// Loads the schema for a version.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaErrorKind::Missing`] if nothing is cached for the
    /// version, [`SchemaErrorKind::IncompatibleParser`] if the file was
    /// written by another parser, and [`SchemaErrorKind::Corrupt`] if it
    /// cannot be decoded.
    pub fn load(&self, version: &str) -> Result<Arc<Schema>, SchemaError> {
        let key = version_key(version);
        if let Some(schema) = self.loaded.borrow().get(&key) {
            check_parser_version(schema.version().unwrap_or(version), schema.parser_version())?;
            return Ok(Arc::clone(schema));
        }

        let path = self.path_for(version);
        let schema = Arc::new(read_cache_file(&path, version)?);
        tracing::debug!(version, path = %path.display(), "loaded cached schema");
        self.loaded.borrow_mut().insert(key, Arc::clone(&schema));
        Ok(schema)
    }

    /// Lists the versions with a cache file, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn versions(&self) -> io::Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error),
        };

        let suffix = format!(".{EXTENSION}");
        let mut versions = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            if let Some(version) = name.to_str().and_then(|name| name.strip_suffix(&suffix)) {
                versions.push(version.to_string());
            }
        }
        versions.sort();
        Ok(versions)
    }
}

impl SchemaSource for SchemaCache {
    fn schema(&self, version: &str) -> Result<Arc<Schema>, SchemaError> {
        self.load(version)
    }
}

fn read_cache_file(path: &Path, version: &str) -> Result<Schema, SchemaError> {
    let corrupt = |detail: &dyn std::fmt::Display| {
        SchemaError::new(
            SchemaErrorKind::Corrupt,
            format!("the cached schema `{}` is unreadable: {detail}", path.display()),
            Some(version.to_string()),
        )
    };

    let file = match fs::File::open(path) {
        Ok(file) => file,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Err(SchemaError::missing(version));
        }
        Err(error) => return Err(corrupt(&error)),
    };
    let mut reader = BufReader::new(file);

    let header: CacheHeader = bincode::deserialize_from(&mut reader).map_err(|error| corrupt(&error))?;
    check_parser_version(&header.version, &header.parser_version)?;

    bincode::deserialize_from(&mut reader).map_err(|error| corrupt(&error))
}

fn check_parser_version(version: &str, parser_version: &str) -> Result<(), SchemaError> {
    if parser_version == PARSER_VERSION {
        Ok(())
    } else {
        Err(SchemaError::incompatible_parser(version, parser_version, PARSER_VERSION))
    }
}

#[cfg(test)]
mod tests {
    use idfkit_parser::parse_idd;

    use super::*;

    const IDD: &str = "!IDD_Version 8.1.0.009
Version,
  A1 ; \\field Version Identifier
Zone,
  A1 ; \\field Name
       \\reference ZoneNames
";

    fn schema() -> Arc<Schema> {
        Arc::new(parse_idd(IDD))
    }

    #[test]
    fn store_then_load_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let schema = schema();
        let path = SchemaCache::new(dir.path())
            .store(Arc::clone(&schema))
            .expect("stored");
        assert_eq!(path, dir.path().join("8.1.idd.bin"));

        let fresh = SchemaCache::new(dir.path());
        let loaded = fresh.load("8.1").expect("cached");
        assert_eq!(*loaded, *schema);
        assert_eq!(fresh.versions().expect("listed"), ["8.1"]);
    }

    #[test]
    fn loads_are_memoized() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = SchemaCache::new(dir.path());
        let path = cache.store(schema()).expect("stored");
        fs::remove_file(path).expect("removed");

        let first = cache.load("8.1.0.009").expect("in memory");
        let second = cache.schema("8.1").expect("in memory");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn missing_version() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = SchemaCache::new(dir.path()).load("9.4").expect_err("nothing cached");
        assert_eq!(error.kind(), SchemaErrorKind::Missing);
        assert_eq!(error.version(), Some("9.4"));
    }

    #[test]
    fn other_parser_version_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = SchemaCache::new(dir.path());
        let mut schema = Schema::new("idfkit-0.0.0-old");
        schema.set_version("8.1");
        cache.store(Arc::new(schema)).expect("stored");

        let error = SchemaCache::new(dir.path()).load("8.1").expect_err("stale cache");
        assert_eq!(error.kind(), SchemaErrorKind::IncompatibleParser);
    }

    #[test]
    fn other_parser_version_is_rejected_by_the_storing_cache() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = SchemaCache::new(dir.path());
        let mut schema = Schema::new("idfkit-0.0.0-old");
        schema.set_version("8.1");
        cache.store(Arc::new(schema)).expect("stored");

        let error = cache.load("8.1").expect_err("stale schema");
        assert_eq!(error.kind(), SchemaErrorKind::IncompatibleParser);
    }

    #[test]
    fn restoring_with_current_parser_replaces_stale_schema() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = SchemaCache::new(dir.path());
        let mut stale = Schema::new("idfkit-0.0.0-old");
        stale.set_version("8.1");
        cache.store(Arc::new(stale)).expect("stored");
        cache.store(schema()).expect("stored");

        let loaded = cache.load("8.1").expect("current parser");
        assert_eq!(loaded.parser_version(), PARSER_VERSION);
    }

    #[test]
    fn garbage_is_corrupt() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("8.1.idd.bin"), [0xff, 0x01]).expect("written");

        let error = SchemaCache::new(dir.path()).load("8.1").expect_err("garbage");
        assert_eq!(error.kind(), SchemaErrorKind::Corrupt);
    }

    #[test]
    fn unversioned_schema_cannot_be_stored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = SchemaCache::new(dir.path())
            .store(Arc::new(Schema::new(PARSER_VERSION)))
            .expect_err("no version");
        assert!(matches!(error, LoadError::Schema(_)));
    }

    #[test]
    fn versions_of_missing_dir_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = SchemaCache::new(dir.path().join("absent"));
        assert!(cache.versions().expect("no error").is_empty());
    }
}
