use crate::application::loan::LoanApplicationError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーと、リクエストの解釈に失敗した場合の拒否をまとめ、
/// HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    Application(LoanApplicationError),
    /// ボディ・クエリの解析失敗（ステータスは抽出器の判定をそのまま使う）
    Rejected { status: StatusCode, message: String },
}

impl From<LoanApplicationError> for ApiError {
    fn from(err: LoanApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            ApiError::Application(err) => err,
            ApiError::Rejected { status, message } => {
                let body = Json(ErrorResponse::new("INVALID_REQUEST", message));
                return (status, body).into_response();
            }
        };

        let message = err.to_string();
        let (status, error_type) = match err {
            // 404 Not Found - リクエストされたリソースが存在しない
            LoanApplicationError::ItemNotFound => (StatusCode::NOT_FOUND, "ITEM_NOT_FOUND"),
            LoanApplicationError::MemberNotFound => (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND"),

            // 409 Conflict - 資料・会員の現在状態と矛盾する
            LoanApplicationError::ItemUnavailable => (StatusCode::CONFLICT, "ITEM_UNAVAILABLE"),
            LoanApplicationError::AlreadyAvailable => (StatusCode::CONFLICT, "ALREADY_AVAILABLE"),
            LoanApplicationError::DuplicateItem => (StatusCode::CONFLICT, "DUPLICATE_ITEM"),
            LoanApplicationError::DuplicateMember => (StatusCode::CONFLICT, "DUPLICATE_MEMBER"),

            // 422 Unprocessable Entity - ビジネスルール違反
            LoanApplicationError::InvalidDuration => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_DURATION")
            }
            LoanApplicationError::DurationExceeded { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DURATION_EXCEEDED")
            }
            LoanApplicationError::WrongVariant => {
                (StatusCode::UNPROCESSABLE_ENTITY, "WRONG_VARIANT")
            }
            LoanApplicationError::InvalidInput(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INPUT")
            }

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            LoanApplicationError::CatalogueError(ref e) => {
                tracing::error!("Catalogue error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "CATALOGUE_ERROR")
            }
            LoanApplicationError::MemberDirectoryError(ref e) => {
                tracing::error!("Member directory error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "MEMBER_DIRECTORY_ERROR")
            }
            LoanApplicationError::EventStoreError(ref e) => {
                tracing::error!("Event store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "EVENT_STORE_ERROR")
            }
            LoanApplicationError::StatisticsError(ref e) => {
                tracing::error!("Statistics store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "STATISTICS_ERROR")
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
