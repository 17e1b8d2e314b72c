use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::{
        cid::Cid,
        file::{AddedEntry, DirectoryLink, FileStream},
    },
};

/// Client for the IPFS node that owns storage, hashing and directory
/// encoding. Every call produces a new identifier; nothing is mutated in
/// place.
#[async_trait]
pub trait IpfsService: Send + Sync {
    /// Creates an empty unixfs directory object.
    async fn new_directory(&self) -> Result<Cid, ApplicationError>;

    /// Returns the identifier of `directory` with `link` appended.
    async fn add_link(&self, directory: &Cid, link: DirectoryLink)
        -> Result<Cid, ApplicationError>;

    async fn add(&self, streams: Vec<FileStream>) -> Result<Vec<AddedEntry>, ApplicationError>;
}
