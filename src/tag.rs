//! Provenance information for entity data.
use itertools::Itertools;
use std::fmt;
use std::path::PathBuf;

/// The files a collection was read from, together with their descriptions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    file_names: Vec<PathBuf>,
    descriptions: Vec<String>,
}

impl Tag {
    /// Create a tag for a single file
    pub fn new(file_name: PathBuf, description: &str) -> Self {
        let mut tag = Self::default();
        tag.push(file_name, description);
        tag
    }

    /// Record that data was read from another file
    pub fn push(&mut self, file_name: PathBuf, description: &str) {
        self.file_names.push(file_name);
        self.descriptions.push(description.to_string());
    }

    /// Append the files and descriptions of another tag
    pub fn append(&mut self, other: Tag) {
        self.file_names.extend(other.file_names);
        self.descriptions.extend(other.descriptions);
    }

    /// The files data was read from, in order
    pub fn file_names(&self) -> &[PathBuf] {
        &self.file_names
    }

    /// The descriptions of the files, in the same order as [`Tag::file_names`]
    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    /// Whether no files have been recorded
    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.file_names
                .iter()
                .zip(&self.descriptions)
                .map(|(file_name, description)| if description.is_empty() {
                    file_name.display().to_string()
                } else {
                    format!("{} ({description})", file_name.display())
                })
                .join("; ")
        )
    }
}
