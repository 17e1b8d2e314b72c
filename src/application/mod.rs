pub mod error;
pub mod files;
pub mod services;
pub mod size;
