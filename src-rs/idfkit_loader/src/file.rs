//! Reading IDD and IDF files from disk.

use std::{fs, path::Path, sync::Arc};

use idfkit_model::{Instance, TextEncoding};
use idfkit_parser::{Config, IddParser, IdfParser, SchemaSource};
use idfkit_schema::{Schema, SchemaError};

use crate::{cache::SchemaCache, error::LoadError};

/// Reads a text file, decoding it as Latin-1 if it is not valid UTF-8.
///
/// # Errors
///
/// Returns [`LoadError::Read`] if the file cannot be read.
pub fn read_text(path: &Path) -> Result<String, LoadError> {
    read_text_with_encoding(path).map(|(text, _)| text)
}

/// Like [`read_text`], also returning the encoding the file was read in.
///
/// # Errors
///
/// Returns [`LoadError::Read`] if the file cannot be read.
pub fn read_text_with_encoding(path: &Path) -> Result<(String, TextEncoding), LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (text, encoding) = TextEncoding::decode(bytes);
    if encoding == TextEncoding::Latin1 {
        tracing::debug!(path = %path.display(), "decoded as Latin-1");
    }
    Ok((text, encoding))
}

/// Parses an IDD file and stores the schema in the cache.
///
/// # Errors
///
/// Returns an error if the file cannot be read, declares no version, or
/// the cache cannot be written.
pub fn load_idd(path: &Path, cache: &SchemaCache) -> Result<Arc<Schema>, LoadError> {
    load_idd_with_progress(path, cache, |_| {})
}

/// Like [`load_idd`], reporting each progress step to `on_progress`.
///
/// # Errors
///
/// See [`load_idd`].
pub fn load_idd_with_progress(
    path: &Path,
    cache: &SchemaCache,
    mut on_progress: impl FnMut(u8),
) -> Result<Arc<Schema>, LoadError> {
    let text = read_text(path)?;
    let mut parser = IddParser::new(&text);
    parser.by_ref().for_each(&mut on_progress);

    let schema = Arc::new(parser.finish());
    if schema.version().is_none() {
        return Err(SchemaError::no_version().into());
    }
    cache.store(Arc::clone(&schema))?;
    Ok(schema)
}

/// Parses an IDF file and records its path on the instance.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_idf<S: SchemaSource + ?Sized>(
    path: &Path,
    source: &S,
    config: Config,
) -> Result<Instance, LoadError> {
    load_idf_with_progress(path, source, config, |_| {})
}

/// Like [`load_idf`], reporting each progress step to `on_progress`.
///
/// # Errors
///
/// See [`load_idf`].
pub fn load_idf_with_progress<S: SchemaSource + ?Sized>(
    path: &Path,
    source: &S,
    config: Config,
    mut on_progress: impl FnMut(u8),
) -> Result<Instance, LoadError> {
    let (text, encoding) = read_text_with_encoding(path)?;
    let mut parser = IdfParser::new(&text, source, config);
    for step in parser.by_ref() {
        on_progress(step?);
    }

    let mut instance = parser.finish()?;
    instance.set_file_path(path);
    instance.set_encoding(encoding);
    tracing::debug!(path = %path.display(), objects = instance.object_count(), "loaded IDF");
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use idfkit_parser::NoSchemas;
    use idfkit_schema::SchemaErrorKind;

    use super::*;

    const IDD: &str = "!IDD_Version 8.1.0.009
Version,
  A1 ; \\field Version Identifier
Zone,
  A1 , \\field Name
       \\reference ZoneNames
  N1 ; \\field X Origin
ZoneList,
  A1 , \\field Name
  A2 ; \\field Zone 1 Name
       \\object-list ZoneNames
";

    const IDF: &str = "Version,8.1;\nZone,Core_ZN,0;\nZoneList,All,Core_ZN;\n";

    #[test]
    fn latin1_fallback() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("latin1.idf");
        fs::write(&path, b"Zone,Caf\xe9;\n").expect("written");

        assert_eq!(read_text(&path).expect("readable"), "Zone,Caf\u{e9};\n");
        let (_, encoding) = read_text_with_encoding(&path).expect("readable");
        assert_eq!(encoding, TextEncoding::Latin1);
    }

    #[test]
    fn loaded_idf_remembers_latin1() {
        let dir = tempfile::tempdir().expect("temp dir");
        let idf = dir.path().join("latin1.idf");
        fs::write(&idf, b"Version,8.1;\nZone,Caf\xe9,0;\n").expect("written");
        let schema = Arc::new(idfkit_parser::parse_idd(IDD));

        let instance = load_idf(&idf, &schema, Config::new()).expect("IDF loads");
        assert_eq!(instance.encoding(), TextEncoding::Latin1);
        assert_eq!(instance.value("Zone", 0, 0), Some("Caf\u{e9}"));

        let utf8 = dir.path().join("utf8.idf");
        fs::write(&utf8, IDF).expect("written");
        let instance = load_idf(&utf8, &schema, Config::new()).expect("IDF loads");
        assert_eq!(instance.encoding(), TextEncoding::Utf8);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let error = read_text(&dir.path().join("absent.idf")).expect_err("missing");
        assert!(matches!(error, LoadError::Read { .. }));
    }

    #[test]
    fn idd_then_idf_through_the_cache() {
        let dir = tempfile::tempdir().expect("temp dir");
        let idd = dir.path().join("Energy+.idd");
        let idf = dir.path().join("in.idf");
        fs::write(&idd, IDD).expect("written");
        fs::write(&idf, IDF).expect("written");

        let cache_dir = dir.path().join("cache");
        let mut idd_progress = Vec::new();
        load_idd_with_progress(&idd, &SchemaCache::new(&cache_dir), |percent| idd_progress.push(percent))
            .expect("IDD loads");
        assert_eq!(idd_progress.last(), Some(&100));
        assert!(cache_dir.join("8.1.idd.bin").is_file());

        let cache = SchemaCache::new(&cache_dir);
        let mut idf_progress = Vec::new();
        let instance = load_idf_with_progress(&idf, &cache, Config::new(), |percent| {
            idf_progress.push(percent);
        })
        .expect("IDF loads");

        assert_eq!(idf_progress.last(), Some(&100));
        assert_eq!(instance.file_path(), Some(idf.as_path()));
        let zone = instance.field("Zone", 0, 0).expect("zone name").id();
        assert_eq!(instance.reference_count(zone), 1);
    }

    #[test]
    fn idf_without_cached_schema() {
        let dir = tempfile::tempdir().expect("temp dir");
        let idf = dir.path().join("in.idf");
        fs::write(&idf, IDF).expect("written");

        let error = load_idf(&idf, &NoSchemas, Config::new()).expect_err("no schema");
        let LoadError::Parser(idfkit_parser::ParserError::Schema(error)) = error else {
            panic!("expected a schema error, got {error:?}");
        };
        assert_eq!(error.kind(), SchemaErrorKind::Missing);
    }

    #[test]
    fn unversioned_idd_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let idd = dir.path().join("Energy+.idd");
        fs::write(&idd, "Version,\n  A1 ; \\field Version Identifier\n").expect("written");

        let error = load_idd(&idd, &SchemaCache::new(dir.path())).expect_err("no version");
        assert!(matches!(error, LoadError::Schema(_)));
    }
}
