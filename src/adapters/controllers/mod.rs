pub mod file_controller;
pub mod health_controller;
pub mod link_controller;
pub mod size_controller;
