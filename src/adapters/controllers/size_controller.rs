use axum::{extract::Query, Json};

use crate::{
    adapters::dto::size_dto::{SizeQuery, SizeResponse},
    application::size::human_size,
};

pub struct SizeController;

impl SizeController {
    /// GET /api/v1/size?bytes=...
    pub async fn human_size(Query(query): Query<SizeQuery>) -> Json<SizeResponse> {
        Json(SizeResponse {
            size: human_size(query.bytes, &query.options()),
        })
    }
}
