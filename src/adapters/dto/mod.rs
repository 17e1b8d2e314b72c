pub mod file_dto;
pub mod link_dto;
pub mod size_dto;
