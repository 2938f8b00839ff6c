use axum::extract::{FromRequest, FromRequestParts};

use super::error::ApiError;

/// JSONボディ抽出器
///
/// 不正なJSONや型の合わないフィールドも`{error, message}`形式で返す。
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// クエリ文字列抽出器
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
