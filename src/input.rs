//! Common routines for handling input data.
//!
//! Entity data lives in folders of CSV files. A folder can either be a directory on disk or the
//! packaged default data compiled into the program (see [`DEFAULT_ENTITY_DIR`]).
use crate::tag::Tag;
use anyhow::{Context, Result, ensure};
use include_dir::{Dir, include_dir};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub mod disc_rates;
pub mod exposures;
pub mod impact_funcs;
pub mod measures;

/// The packaged default entity data, used when no input file is given
pub const DEFAULT_ENTITY_DIR: Dir = include_dir!("data/entity_template");

/// The name by which the packaged default data is referred to in tags and error messages
pub const DEFAULT_ENTITY_NAME: &str = "entity_template";

/// A folder from which entity CSV files can be read
pub trait InputFolder {
    /// The path used to refer to `file_name` in error messages
    fn file_path(&self, file_name: &str) -> PathBuf;

    /// The path used to refer to the folder itself
    fn folder_path(&self) -> PathBuf;

    /// Read the raw contents of `file_name`, returning `None` if there is no such file
    fn read_file(&self, file_name: &str) -> Result<Option<Vec<u8>>>;
}

impl InputFolder for Path {
    fn file_path(&self, file_name: &str) -> PathBuf {
        self.join(file_name)
    }

    fn folder_path(&self) -> PathBuf {
        self.to_path_buf()
    }

    fn read_file(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        let file_path = self.join(file_name);
        match fs::read(&file_path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| input_err_msg(&file_path)),
        }
    }
}

impl InputFolder for Dir<'_> {
    fn file_path(&self, file_name: &str) -> PathBuf {
        [DEFAULT_ENTITY_NAME, file_name].iter().collect()
    }

    fn folder_path(&self) -> PathBuf {
        PathBuf::from(DEFAULT_ENTITY_NAME)
    }

    fn read_file(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.get_file(file_name).map(|file| file.contents().to_vec()))
    }
}

/// One or more entity folders to read from
#[derive(Debug, Clone, PartialEq)]
pub enum EntitySource {
    /// A single folder
    Single(PathBuf),
    /// Several folders, read in order with their records appended
    Many(Vec<PathBuf>),
}

impl EntitySource {
    /// The folders to read, in order
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Single(path) => std::slice::from_ref(path),
            Self::Many(paths) => paths,
        }
    }
}

impl From<PathBuf> for EntitySource {
    fn from(path: PathBuf) -> Self {
        Self::Single(path)
    }
}

impl From<&Path> for EntitySource {
    fn from(path: &Path) -> Self {
        Self::Single(path.to_path_buf())
    }
}

impl From<Vec<PathBuf>> for EntitySource {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self::Many(paths)
    }
}

/// A description of the data being read
#[derive(Debug, Clone, PartialEq)]
pub enum Description {
    /// One description applied to every folder
    Single(String),
    /// One description per folder
    Many(Vec<String>),
}

impl From<&str> for Description {
    fn from(description: &str) -> Self {
        Self::Single(description.into())
    }
}

impl From<String> for Description {
    fn from(description: String) -> Self {
        Self::Single(description)
    }
}

impl From<Vec<String>> for Description {
    fn from(descriptions: Vec<String>) -> Self {
        Self::Many(descriptions)
    }
}

/// Pair each folder in `source` with its description.
///
/// A [`Description::Many`] must contain exactly one description per folder. Folders with no
/// description are given an empty one.
pub fn pair_descriptions<'a>(
    source: &'a EntitySource,
    description: Option<&'a Description>,
) -> Result<Vec<(&'a Path, &'a str)>> {
    let paths = source.paths();
    ensure!(!paths.is_empty(), "No entity files provided");

    let pairs = match description {
        None => paths.iter().map(|path| (path.as_path(), "")).collect(),
        Some(Description::Single(description)) => paths
            .iter()
            .map(|path| (path.as_path(), description.as_str()))
            .collect(),
        Some(Description::Many(descriptions)) => {
            ensure!(
                descriptions.len() == paths.len(),
                "Got {} descriptions for {} entity files",
                descriptions.len(),
                paths.len()
            );
            paths
                .iter()
                .map(PathBuf::as_path)
                .zip(descriptions.iter().map(String::as_str))
                .collect()
        }
    };

    Ok(pairs)
}

/// One of the data collections making up an entity
pub trait EntityCollection: Sized + Default {
    /// Human-readable name of the collection, used in log and error messages
    const NAME: &'static str;

    /// Read the collection's records from a single folder
    fn read_folder<F: InputFolder + ?Sized>(folder: &F) -> Result<Self>;

    /// Append the records of `other` to this collection
    fn append(&mut self, other: Self);

    /// Check that the collection is in a valid state
    fn check(&self) -> Result<()>;

    /// The provenance of the collection's data
    fn tag(&self) -> &Tag;

    /// Mutable access to the provenance of the collection's data
    fn tag_mut(&mut self) -> &mut Tag;

    /// The number of records in the collection
    fn len(&self) -> usize;

    /// Whether the collection has no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create the collection from the packaged default data
    fn from_default() -> Self {
        read_default_collection()
    }

    /// Replace the collection's contents with the records read from `source`.
    ///
    /// The collection is left unchanged if reading fails.
    fn read(&mut self, source: &EntitySource, description: Option<&Description>) -> Result<()> {
        *self = read_collection(source, description)?;
        Ok(())
    }
}

/// Read a collection from every folder in `source`, appending records in order.
pub fn read_collection<C: EntityCollection>(
    source: &EntitySource,
    description: Option<&Description>,
) -> Result<C> {
    let mut collection = C::default();
    for (path, description) in pair_descriptions(source, description)? {
        let mut part = C::read_folder(path)?;
        part.tag_mut().push(path.to_path_buf(), description);
        collection.append(part);
    }

    Ok(collection)
}

/// Read a collection from the packaged default data.
///
/// # Panics
///
/// Panics if the packaged data cannot be read, which indicates a bug.
pub fn read_default_collection<C: EntityCollection>() -> C {
    let mut collection = C::read_folder(&DEFAULT_ENTITY_DIR).unwrap_or_else(|err| {
        panic!("Packaged default data for {} is invalid: {err:?}", C::NAME)
    });
    collection
        .tag_mut()
        .push(DEFAULT_ENTITY_DIR.folder_path(), "");

    collection
}

/// Read a series of type `T`s from a CSV file in `folder`.
///
/// # Arguments
///
/// * `folder` - Folder containing the file
/// * `file_name` - Name of the CSV file
pub fn read_csv<T: DeserializeOwned, F: InputFolder + ?Sized>(
    folder: &F,
    file_name: &str,
) -> Result<Vec<T>> {
    let file_path = folder.file_path(file_name);
    let contents = folder
        .read_file(file_name)?
        .with_context(|| format!("Missing file: {}", file_path.display()))?;

    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(contents.as_slice())
        .into_deserialize()
        .collect::<Result<Vec<T>, _>>()
        .with_context(|| input_err_msg(&file_path))
}

/// Parse a TOML file at the specified path.
///
/// # Arguments
///
/// * `file_path` - Path to the TOML file
pub fn read_toml<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let toml_str = fs::read_to_string(file_path).with_context(|| input_err_msg(file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(file_path))?;
    Ok(toml_data)
}

/// Parse an optional TOML file in `folder`, returning `None` if it is absent
pub fn read_toml_optional<T: DeserializeOwned, F: InputFolder + ?Sized>(
    folder: &F,
    file_name: &str,
) -> Result<Option<T>> {
    let file_path = folder.file_path(file_name);
    let Some(contents) = folder.read_file(file_name)? else {
        return Ok(None);
    };

    let toml_str = String::from_utf8(contents).with_context(|| input_err_msg(&file_path))?;
    let toml_data = toml::from_str(&toml_str).with_context(|| input_err_msg(&file_path))?;
    Ok(Some(toml_data))
}

/// Format an error message to include the file path. To be used with `anyhow::Context`.
pub fn input_err_msg<P: AsRef<Path>>(file_path: P) -> String {
    format!("Error reading {}", file_path.as_ref().display())
}
