//! # Products API エラー定義
//!
//! ハンドラで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラー分類
//!
//! | 種別 | ステータス | クライアントへの文言 |
//! |------|-----------|---------------------|
//! | 設定不備 | 500 | `Server misconfiguration`（固定） |
//! | 入力不正 | 400 | 各ハンドラのメッセージ |
//! | メソッド不許可 | 405 | `Method Not Allowed`（固定） |
//! | 未発見 | 404 | 各ハンドラのメッセージ |
//! | ストア障害 | 500 | `Internal server error`（固定） |
//!
//! 5xx 系はクライアントに内部情報を漏らさないため文言を固定し、
//! 詳細はログにのみ出力する。リトライは一切行わず、検出した
//! 呼び出しの中で同期的にエラーを返す。

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use stockflow_infra::InfraError;
use stockflow_shared::ErrorResponse;
use thiserror::Error;

/// Products API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
   /// 必須設定（テーブル名）の欠落。デプロイ不備であり、ストア呼び出し前に検出する
   #[error("設定不備: {0}")]
   Configuration(String),

   /// クライアント入力の不正
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 許可されていない HTTP メソッド
   #[error("許可されていないメソッド")]
   MethodNotAllowed,

   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 外部ストア（DynamoDB）の呼び出し失敗
   #[error("ストアエラー: {0}")]
   Dependency(#[from] InfraError),
}

impl IntoResponse for ApiError {
   fn into_response(self) -> Response {
      let (status, body) = match &self {
         ApiError::Configuration(detail) => {
            tracing::error!("設定不備: {}", detail);
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               ErrorResponse::server_misconfiguration(),
            )
         }
         ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone())),
         ApiError::MethodNotAllowed => (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::method_not_allowed(),
         ),
         ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg.clone())),
         ApiError::Dependency(e) => {
            tracing::error!(
               error = %e,
               span_trace = %e.span_trace(),
               "ストア呼び出しに失敗"
            );
            (
               StatusCode::INTERNAL_SERVER_ERROR,
               ErrorResponse::internal_error(),
            )
         }
      };

      (status, Json(body)).into_response()
   }
}
