use serde::{Deserialize, Serialize};

use crate::domain::models::cid::Cid;

/// A file as handed over by a browser file picker or a multipart upload.
///
/// Depending on how the file was selected it may carry an explicit
/// `filepath` (drag and drop of folders), a `webkit_relative_path`
/// (directory inputs) or only its base `name`.
#[derive(Debug, Clone, Default)]
pub struct SelectedFile {
    pub filepath: Option<String>,
    pub webkit_relative_path: Option<String>,
    pub name: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
            ..Default::default()
        }
    }

    pub fn with_filepath(mut self, filepath: impl Into<String>) -> Self {
        self.filepath = Some(filepath.into());
        self
    }

    pub fn with_webkit_relative_path(mut self, path: impl Into<String>) -> Self {
        self.webkit_relative_path = Some(path.into());
        self
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

/// Upload-ready descriptor produced by normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStream {
    pub path: String,
    pub content: Vec<u8>,
    pub size: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    File,
    Directory,
}

/// An entry previously stored on the node, as returned by a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    #[serde(default)]
    pub name: String,
    pub cid: Cid,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(rename = "type")]
    pub file_type: FileType,
}

impl FileStat {
    pub fn file(name: impl Into<String>, cid: impl Into<Cid>, size: u64) -> Self {
        Self {
            name: name.into(),
            cid: cid.into(),
            size: Some(size),
            file_type: FileType::File,
        }
    }

    pub fn directory(name: impl Into<String>, cid: impl Into<Cid>) -> Self {
        Self {
            name: name.into(),
            cid: cid.into(),
            size: None,
            file_type: FileType::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDownload {
    pub url: String,
    pub filename: String,
}

/// One named link appended to a directory object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLink {
    pub name: String,
    pub size: Option<u64>,
    pub cid: Cid,
}

impl From<&FileStat> for DirectoryLink {
    fn from(stat: &FileStat) -> Self {
        Self {
            name: stat.name.clone(),
            size: stat.size,
            cid: stat.cid.clone(),
        }
    }
}

/// Entry reported by the node after adding content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedEntry {
    pub name: String,
    pub cid: Cid,
    pub size: u64,
}
