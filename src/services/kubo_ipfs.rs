use std::{collections::BTreeSet, time::Duration};

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, info, warn};

use crate::{
    application::{error::ApplicationError, services::IpfsService},
    domain::models::{
        cid::Cid,
        file::{AddedEntry, DirectoryLink, FileStream},
    },
    services::error::IpfsError,
};

const UNIXFS_DIR_TEMPLATE: &str = "unixfs-dir";
const DIRECTORY_MIME: &str = "application/x-directory";

/// Multipart file names are unescaped by the node; keep `/` as separator.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct ObjectResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

#[derive(Debug, Deserialize)]
struct NodeErrorResponse {
    #[serde(rename = "Message")]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SizeField {
    Number(u64),
    Text(String),
}

impl SizeField {
    fn value(&self) -> Result<u64, IpfsError> {
        match self {
            SizeField::Number(n) => Ok(*n),
            SizeField::Text(s) => s
                .parse()
                .map_err(|_| IpfsError::InvalidResponse(format!("invalid size '{}'", s))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddEvent {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Hash")]
    hash: Option<String>,
    #[serde(rename = "Size")]
    size: Option<SizeField>,
}

/// Talks to a Kubo node over its `/api/v0` RPC interface.
pub struct KuboIpfsService {
    client: Client,
    api_url: String,
}

impl KuboIpfsService {
    pub fn new(api_url: &str, timeout_secs: u64) -> Result<Self, IpfsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| IpfsError::InternalError(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, command: &str) -> String {
        format!("{}/api/v0/{}", self.api_url, command)
    }

    async fn check_status(response: Response, command: &str) -> Result<Response, IpfsError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<NodeErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or(body);

        warn!("{} failed with status {}: {}", command, status, message);

        if status.as_u16() == 404 {
            Err(IpfsError::NotFound(message))
        } else {
            Err(IpfsError::ProviderError(format!(
                "{} failed: {}",
                command, message
            )))
        }
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        command: &str,
        args: &[(&str, &str)],
    ) -> Result<T, IpfsError> {
        let response = self
            .client
            .post(self.endpoint(command))
            .query(args)
            .send()
            .await?;

        let response = Self::check_status(response, command).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| IpfsError::InvalidResponse(e.to_string()))
    }
}

/// One part of an `add` request body.
#[derive(Debug, PartialEq, Eq)]
enum AddPart {
    Directory(String),
    File(String, Vec<u8>),
}

/// Lays out the parts for `add`: each parent directory once, before the
/// first file under it, and the files in input order. Empty segments are
/// collapsed; a path naming no file is rejected.
fn plan_add_parts(streams: Vec<FileStream>) -> Result<Vec<AddPart>, IpfsError> {
    let mut parts = Vec::new();
    let mut directories = BTreeSet::new();

    for stream in streams {
        let segments: Vec<&str> = stream
            .path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() || stream.path.ends_with('/') {
            return Err(IpfsError::InvalidPath(stream.path));
        }
        let path = segments.join("/");

        let mut prefix = String::new();
        for segment in &segments[..segments.len() - 1] {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);

            if directories.insert(prefix.clone()) {
                parts.push(AddPart::Directory(prefix.clone()));
            }
        }

        parts.push(AddPart::File(path, stream.content));
    }

    Ok(parts)
}

fn build_add_form(streams: Vec<FileStream>) -> Result<multipart::Form, IpfsError> {
    let mut form = multipart::Form::new();

    for part in plan_add_parts(streams)? {
        let (path, content, mime) = match part {
            AddPart::Directory(path) => (path, Vec::new(), DIRECTORY_MIME),
            AddPart::File(path, content) => (path, content, "application/octet-stream"),
        };

        let part = multipart::Part::bytes(content)
            .file_name(encode_path(&path))
            .mime_str(mime)
            .map_err(|e| IpfsError::InternalError(e.to_string()))?;
        form = form.part("file", part);
    }

    Ok(form)
}

fn encode_path(path: &str) -> String {
    utf8_percent_encode(path, PATH_SEGMENT).to_string()
}

fn parse_add_events(body: &str) -> Result<Vec<AddedEntry>, IpfsError> {
    let mut entries = Vec::new();

    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let event: AddEvent =
            serde_json::from_str(line).map_err(|e| IpfsError::InvalidResponse(e.to_string()))?;

        // progress events carry no hash
        let Some(hash) = event.hash else {
            continue;
        };

        entries.push(AddedEntry {
            name: event.name,
            cid: Cid::new(hash),
            size: event.size.as_ref().map(SizeField::value).transpose()?.unwrap_or(0),
        });
    }

    Ok(entries)
}

#[async_trait]
impl IpfsService for KuboIpfsService {
    async fn new_directory(&self) -> Result<Cid, ApplicationError> {
        let object: ObjectResponse = self
            .post_json("object/new", &[("arg", UNIXFS_DIR_TEMPLATE)])
            .await?;

        debug!("Created empty directory {}", object.hash);
        Ok(Cid::new(object.hash))
    }

    async fn add_link(
        &self,
        directory: &Cid,
        link: DirectoryLink,
    ) -> Result<Cid, ApplicationError> {
        // Kubo derives the link size from the target itself
        debug!(
            "Adding link '{}' -> {} (size {:?}) to {}",
            link.name, link.cid, link.size, directory
        );

        let object: ObjectResponse = self
            .post_json(
                "object/patch/add-link",
                &[
                    ("arg", directory.as_str()),
                    ("arg", link.name.as_str()),
                    ("arg", link.cid.as_str()),
                ],
            )
            .await?;

        Ok(Cid::new(object.hash))
    }

    async fn add(&self, streams: Vec<FileStream>) -> Result<Vec<AddedEntry>, ApplicationError> {
        let count = streams.len();
        let form = build_add_form(streams)?;

        let response = self
            .client
            .post(self.endpoint("add"))
            .query(&[("wrap-with-directory", "true"), ("pin", "true")])
            .multipart(form)
            .send()
            .await
            .map_err(IpfsError::from)?;

        let response = Self::check_status(response, "add").await?;

        let body = response
            .text()
            .await
            .map_err(|e| IpfsError::NetworkError(e.to_string()))?;

        let entries = parse_add_events(&body)?;
        info!("Added {} streams, node reported {} entries", count, entries.len());

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_output_with_string_sizes() {
        let body = concat!(
            "{\"Name\":\"docs/a.txt\",\"Hash\":\"QmA\",\"Size\":\"14\"}\n",
            "{\"Name\":\"docs\",\"Hash\":\"QmDocs\",\"Size\":\"70\"}\n",
            "{\"Name\":\"\",\"Hash\":\"QmWrap\",\"Size\":\"121\"}\n",
        );

        let entries = parse_add_events(body).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "docs/a.txt");
        assert_eq!(entries[0].cid, Cid::from("QmA"));
        assert_eq!(entries[0].size, 14);
        assert_eq!(entries[2].cid.as_str(), "QmWrap");
    }

    #[test]
    fn skips_progress_events() {
        let body = "{\"Name\":\"a.txt\",\"Bytes\":1024}\n{\"Name\":\"a.txt\",\"Hash\":\"QmA\",\"Size\":1030}\n";
        let entries = parse_add_events(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 1030);
    }

    #[test]
    fn rejects_malformed_sizes() {
        let err = parse_add_events("{\"Name\":\"a.txt\",\"Hash\":\"QmA\",\"Size\":\"lots\"}\n")
            .unwrap_err();
        assert!(matches!(err, IpfsError::InvalidResponse(msg) if msg.contains("lots")));
    }

    fn stream(path: &str) -> FileStream {
        FileStream {
            path: path.to_string(),
            content: b"x".to_vec(),
            size: 1,
        }
    }

    #[test]
    fn add_parts_collapse_empty_segments() {
        let parts = plan_add_parts(vec![stream("/a//b.txt"), stream("a/c.txt")]).unwrap();
        assert_eq!(
            parts,
            vec![
                AddPart::Directory("a".to_string()),
                AddPart::File("a/b.txt".to_string(), b"x".to_vec()),
                AddPart::File("a/c.txt".to_string(), b"x".to_vec()),
            ]
        );
    }

    #[test]
    fn add_parts_reject_directory_like_paths() {
        let err = plan_add_parts(vec![stream("dir/")]).unwrap_err();
        assert!(matches!(err, IpfsError::InvalidPath(p) if p == "dir/"));

        let err = plan_add_parts(vec![stream("//")]).unwrap_err();
        assert!(matches!(err, IpfsError::InvalidPath(_)));
    }

    #[test]
    fn add_form_builds_for_nested_paths() {
        assert!(build_add_form(vec![stream("docs/a b.txt")]).is_ok());
    }

    #[test]
    fn rejects_garbage_output() {
        let err = parse_add_events("not json").unwrap_err();
        assert!(matches!(err, IpfsError::InvalidResponse(_)));
    }

    #[test]
    fn encodes_paths_but_keeps_separators() {
        assert_eq!(encode_path("my docs/a b.txt"), "my%20docs/a%20b.txt");
        assert_eq!(encode_path("plain-name_1.txt"), "plain-name_1.txt");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let service = KuboIpfsService::new("http://127.0.0.1:5001/", 5).unwrap();
        assert_eq!(
            service.endpoint("object/new"),
            "http://127.0.0.1:5001/api/v0/object/new"
        );
    }
}
