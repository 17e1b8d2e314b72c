pub mod cid;
pub mod file;
