#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use gateway_links::{
    domain::models::{
        cid::Cid,
        file::{AddedEntry, DirectoryLink, FileStream},
    },
    ApplicationError, IpfsService,
};

pub const TEMPLATE_CID: &str = "QmEmptyDir";

/// Records every call. Each appended link yields `<dir>+<name>` unless a
/// fixed identifier is configured, so tests can see how identifiers thread.
#[derive(Default)]
pub struct RecordingIpfs {
    pub calls: Mutex<Vec<String>>,
    pub fixed_link_cid: Option<String>,
    pub fail_on_link: Option<String>,
    pub added: Mutex<Vec<FileStream>>,
}

impl RecordingIpfs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(cid: &str) -> Self {
        Self {
            fixed_link_cid: Some(cid.to_string()),
            ..Default::default()
        }
    }

    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on_link: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IpfsService for RecordingIpfs {
    async fn new_directory(&self) -> Result<Cid, ApplicationError> {
        self.calls.lock().unwrap().push("new".to_string());
        Ok(Cid::from(TEMPLATE_CID))
    }

    async fn add_link(
        &self,
        directory: &Cid,
        link: DirectoryLink,
    ) -> Result<Cid, ApplicationError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("link {} {} {}", directory, link.name, link.cid));

        if self.fail_on_link.as_deref() == Some(link.name.as_str()) {
            return Err(ApplicationError::StorageError(format!(
                "cannot add link {}",
                link.name
            )));
        }

        Ok(match &self.fixed_link_cid {
            Some(cid) => Cid::from(cid.as_str()),
            None => Cid::new(format!("{}+{}", directory, link.name)),
        })
    }

    async fn add(&self, streams: Vec<FileStream>) -> Result<Vec<AddedEntry>, ApplicationError> {
        let entries = streams
            .iter()
            .map(|s| AddedEntry {
                name: s.path.clone(),
                cid: Cid::new(format!("Qm{}", s.path)),
                size: s.size,
            })
            .collect();
        self.added.lock().unwrap().extend(streams);
        Ok(entries)
    }
}
