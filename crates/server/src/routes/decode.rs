use axum::{extract::RawQuery, Json};
use common::utils::percent;
use serde::Serialize;

use crate::observability::DECODE_REQUESTS_TOTAL;

#[derive(Debug, Serialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct DecodeOutput {
    pub input: String,
    pub decoded: String,
    pub params: Vec<QueryParam>,
}

fn decode_output(input: String) -> DecodeOutput {
    DECODE_REQUESTS_TOTAL.inc();
    let decoded = percent::decode(&input);
    let params = percent::parse_query(&input)
        .into_iter()
        .map(|(key, value)| QueryParam { key, value })
        .collect();
    DecodeOutput { input, decoded, params }
}

/// Decode the request's own raw query string: `/api/decode?name=Vijay%20Kumar`
#[utoipa::path(get, path = "/api/decode", tag = "decode", responses((status = 200, description = "Decoded query string")))]
pub async fn decode_query(RawQuery(query): RawQuery) -> Json<DecodeOutput> {
    Json(decode_output(query.unwrap_or_default()))
}

/// Decode a text/plain body
#[utoipa::path(post, path = "/api/decode", tag = "decode", request_body = String, responses((status = 200, description = "Decoded body")))]
pub async fn decode_body(body: String) -> Json<DecodeOutput> {
    Json(decode_output(body))
}
