mod ipfs_service;

pub use ipfs_service::IpfsService;
