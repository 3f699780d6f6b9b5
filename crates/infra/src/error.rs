//! # インフラ層エラー定義
//!
//! DynamoDB との通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **ドメインエラーとの分離**: インフラ固有のエラーを明示
//! - **SpanTrace 自動捕捉**: convenience constructor や `From` 実装で
//!   エラー生成時の呼び出し経路を自動記録する
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（DynamoDb, Conversion 等）

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// convenience constructor や `From` 変換でエラーを生成すると、
/// その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
///
/// API 層でこのエラー種別に応じて適切な HTTP レスポンスに変換する。
/// いずれの種別もクライアントへは汎用メッセージのみを返し、
/// 詳細はログに残す。
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// DynamoDB エラー
   ///
   /// DynamoDB への操作で発生するエラー。
   /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
   /// 手動で String にマップする。
   #[error("DynamoDB エラー: {0}")]
   DynamoDb(String),

   /// アイテム変換エラー
   ///
   /// DynamoDB アイテムと構造体の相互変換（serde_dynamo）に失敗した場合。
   #[error("アイテム変換エラー: {0}")]
   Conversion(String),

   /// シリアライズ/デシリアライズエラー
   ///
   /// JSON の変換に失敗した場合に使用する。
   #[error("シリアライズエラー: {0}")]
   Serialization(#[source] serde_json::Error),

   /// 予期しないエラー
   ///
   /// 上記に分類できない予期しないエラー。
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
   /// エラー種別を取得する
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   /// SpanTrace を取得する
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   // ===== Convenience constructors =====

   /// DynamoDB エラーを生成する
   pub fn dynamo_db(msg: impl Into<String>) -> Self {
      Self {
         kind:       InfraErrorKind::DynamoDb(msg.into()),
         span_trace: SpanTrace::capture(),
      }
   }

   /// アイテム変換エラーを生成する
   pub fn conversion(msg: impl Into<String>) -> Self {
      Self {
         kind:       InfraErrorKind::Conversion(msg.into()),
         span_trace: SpanTrace::capture(),
      }
   }

   /// 予期しないエラーを生成する
   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self {
         kind:       InfraErrorKind::Unexpected(msg.into()),
         span_trace: SpanTrace::capture(),
      }
   }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<serde_json::Error> for InfraError {
   fn from(source: serde_json::Error) -> Self {
      Self {
         kind:       InfraErrorKind::Serialization(source),
         span_trace: SpanTrace::capture(),
      }
   }
}
