use serde::{Deserialize, Serialize};

use crate::application::size::{SizeOptions, Standard};

/// Query string of `GET /api/v1/size`. A missing `bytes` renders "N/A".
#[derive(Debug, Default, Deserialize)]
pub struct SizeQuery {
    pub bytes: Option<u64>,
    pub spacer: Option<String>,
    pub round: Option<u32>,
    pub standard: Option<Standard>,
    pub base: Option<u32>,
    pub bits: Option<bool>,
    pub pad: Option<bool>,
}

impl SizeQuery {
    pub fn options(&self) -> SizeOptions {
        SizeOptions {
            spacer: self.spacer.clone(),
            round: self.round,
            standard: self.standard,
            base: self.base,
            bits: self.bits,
            pad: self.pad,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SizeResponse {
    pub size: String,
}
