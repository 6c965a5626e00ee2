//! Wire encoding of todo responses.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use super::ApiError;
use crate::db::Todo;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Serialize a value to its wire form plus content type.
pub trait Encode {
    fn encode(&self) -> Result<(Vec<u8>, &'static str), ApiError>;
}

fn encode_json<T: serde::Serialize + ?Sized>(
    value: &T,
) -> Result<(Vec<u8>, &'static str), ApiError> {
    serde_json::to_vec(value)
        .map(|bytes| (bytes, JSON_CONTENT_TYPE))
        .map_err(|e| ApiError::Internal(format!("encode response: {}", e)))
}

impl Encode for Todo {
    fn encode(&self) -> Result<(Vec<u8>, &'static str), ApiError> {
        encode_json(self)
    }
}

impl Encode for [Todo] {
    fn encode(&self) -> Result<(Vec<u8>, &'static str), ApiError> {
        encode_json(self)
    }
}

/// Build a response carrying the encoded value.
pub fn respond<E: Encode + ?Sized>(status: StatusCode, value: &E) -> Result<Response, ApiError> {
    let (bytes, content_type) = value.encode()?;
    Ok((status, [(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
