//! # エラーレスポンス
//!
//! 全ハンドラで共通のエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は API 層の責務（shared に axum 依存を入れない）
//! - 固定文言のエラーは便利コンストラクタで提供し、文言の重複を排除
//! - 任意の文言は `new()` で自由に作成可能

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// すべてのエンドポイントで統一されたエラーレスポンス形式
/// `{ "message": "..." }`。クライアントはステータスコードと
/// この `message` だけを契約として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   pub message: String,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         message: message.into(),
      }
   }

   /// 500 Server misconfiguration
   ///
   /// 必須環境変数の欠落などデプロイ不備を示す。文言は固定。
   pub fn server_misconfiguration() -> Self {
      Self::new("Server misconfiguration")
   }

   /// 500 Internal server error
   ///
   /// message は固定値（内部情報を漏らさないため）。
   /// 詳細はログにのみ出力する。
   pub fn internal_error() -> Self {
      Self::new("Internal server error")
   }

   /// 405 Method Not Allowed
   pub fn method_not_allowed() -> Self {
      Self::new("Method Not Allowed")
   }
}
