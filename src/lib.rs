//! Gateway link helpers for an IPFS web front-end.
//!
//! Normalizes browser file selections, folds stored entries into a
//! directory on the node, derives download and share URLs on a gateway,
//! and formats byte counts for display.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod services;

pub use application::{
    error::ApplicationError,
    files::{get_download_link, get_shareable_link, make_cid_from_files, normalize_files},
    services::IpfsService,
    size::{human_size, SizeOptions},
};
