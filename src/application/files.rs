use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::{
    application::{error::ApplicationError, services::IpfsService},
    domain::models::{
        cid::Cid,
        file::{DirectoryLink, FileDownload, FileStat, FileStream, SelectedFile},
    },
};

/// Characters left untouched by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Where the path of a normalized stream came from, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource<'a> {
    FilePath(&'a str),
    WebkitRelativePath(&'a str),
    Name(&'a str),
}

impl<'a> PathSource<'a> {
    /// Resolves the first non-empty source; falls back to the base name
    /// even when that is empty.
    pub fn resolve(file: &'a SelectedFile) -> Self {
        let non_empty = |value: &'a Option<String>| {
            value.as_deref().filter(|path| !path.is_empty())
        };

        if let Some(path) = non_empty(&file.filepath) {
            PathSource::FilePath(path)
        } else if let Some(path) = non_empty(&file.webkit_relative_path) {
            PathSource::WebkitRelativePath(path)
        } else {
            PathSource::Name(&file.name)
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            PathSource::FilePath(path)
            | PathSource::WebkitRelativePath(path)
            | PathSource::Name(path) => path,
        }
    }
}

pub fn normalize_files(files: Vec<SelectedFile>) -> Vec<FileStream> {
    files
        .into_iter()
        .map(|file| {
            let path = PathSource::resolve(&file).as_str().to_string();
            let size = file.size();
            FileStream {
                path,
                content: file.content,
                size,
            }
        })
        .collect()
}

/// Folds `files` into a fresh directory object, one link at a time.
///
/// Each append depends on the identifier returned by the previous one, so
/// the calls are strictly sequential. The first failure aborts the fold and
/// no partial identifier escapes.
pub async fn make_cid_from_files(
    files: &[FileStat],
    ipfs: &dyn IpfsService,
) -> Result<Cid, ApplicationError> {
    let mut cid = ipfs.new_directory().await?;

    for file in files {
        cid = ipfs.add_link(&cid, DirectoryLink::from(file)).await?;
    }

    Ok(cid)
}

fn archive_url(gateway_url: &str, cid: &Cid) -> String {
    format!(
        "{}/api/v0/get?arg={}&archive=true&compress=true",
        gateway_url, cid
    )
}

fn download_single(file: &FileStat, gateway_url: &str) -> FileDownload {
    if file.is_directory() {
        let name = if file.name.is_empty() {
            format!("download_{}", file.cid)
        } else {
            file.name.clone()
        };

        FileDownload {
            url: archive_url(gateway_url, &file.cid),
            filename: format!("{}.tar.gz", name),
        }
    } else {
        FileDownload {
            url: format!(
                "{}/ipfs/{}?download=true&filename={}",
                gateway_url, file.cid, file.name
            ),
            filename: file.name.clone(),
        }
    }
}

async fn download_multiple(
    files: &[FileStat],
    gateway_url: &str,
    ipfs: &dyn IpfsService,
) -> Result<FileDownload, ApplicationError> {
    let cid = make_cid_from_files(files, ipfs).await?;

    Ok(FileDownload {
        url: archive_url(gateway_url, &cid),
        filename: format!("download_{}.tar.gz", cid),
    })
}

fn ensure_selection(files: &[FileStat]) -> Result<(), ApplicationError> {
    if files.is_empty() {
        return Err(ApplicationError::BadRequest("no files selected".to_string()));
    }
    Ok(())
}

pub async fn get_download_link(
    files: &[FileStat],
    gateway_url: &str,
    ipfs: &dyn IpfsService,
) -> Result<FileDownload, ApplicationError> {
    ensure_selection(files)?;

    match files {
        [file] => Ok(download_single(file, gateway_url)),
        _ => download_multiple(files, gateway_url, ipfs).await,
    }
}

pub async fn get_shareable_link(
    files: &[FileStat],
    gateway_url: &str,
    ipfs: &dyn IpfsService,
) -> Result<String, ApplicationError> {
    ensure_selection(files)?;

    let (cid, filename) = match files {
        [file] => {
            let filename = (!file.is_directory()).then(|| {
                format!("?filename={}", utf8_percent_encode(&file.name, URI_COMPONENT))
            });
            (file.cid.clone(), filename)
        }
        _ => (make_cid_from_files(files, ipfs).await?, None),
    };

    Ok(format!(
        "{}/ipfs/{}{}",
        gateway_url,
        cid,
        filename.unwrap_or_default()
    ))
}
