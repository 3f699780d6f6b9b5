//! # 商品レコード
//!
//! 商品カタログの中心エンティティ。スキーマレスな「商品」を表現する。
//!
//! ## 設計方針
//!
//! - **オープンなレコード**: クライアントが送ったフィールドは型を問わず
//!   そのまま保持する（文字列・数値・真偽値・ネスト構造）
//! - **予約フィールドの分離**: キー系フィールド（`pk` / `sk` / `gsi_pk`）と
//!   導出フィールド（`id` / `createdAt`）は構造体フィールドとして明示し、
//!   それ以外を `#[serde(flatten)]` のマップに流す
//! - **マージ規則**: 予約フィールドは常にサーバー側の値が勝つ。
//!   クライアントが同名フィールドを送ってきた場合は破棄する
//!
//! ## キー設計
//!
//! | フィールド | 値 |
//! |-----------|-----|
//! | `pk` | 固定値 `"product"` |
//! | `sk` | 生成した UUID（`id` と同値） |
//! | `gsi_pk` | 固定値 `"all"`（全件取得用 GSI のキー） |
//!
//! `sk` を生成直後の UUID から導出するため、登録が既存キーを
//! 上書きすることはない。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 商品レコード
///
/// 一度登録された商品は変更されない（更新・削除の操作は存在しない）。
/// `attributes` にはクライアント提供のフィールドがそのまま入る。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
   /// パーティションキー（固定値 `"product"`）
   pub pk: String,
   /// ソートキー（`id` の文字列表現）
   pub sk: String,
   /// 商品 ID（UUID v4）
   pub id: Uuid,
   /// 登録日時（ISO 8601）。登録時に一度だけ設定される。
   #[serde(rename = "createdAt")]
   pub created_at: DateTime<Utc>,
   /// 全件取得用 GSI のパーティションキー（固定値 `"all"`）
   pub gsi_pk: String,
   /// クライアント提供のフィールド
   #[serde(flatten)]
   pub attributes: Map<String, Value>,
}

impl Product {
   /// `pk` の固定値
   pub const PARTITION_VALUE: &'static str = "product";
   /// `gsi_pk` の固定値
   pub const GSI_ALL_VALUE: &'static str = "all";
   /// クライアントが上書きできない予約フィールド名
   pub const RESERVED_FIELDS: [&'static str; 5] = ["pk", "sk", "id", "createdAt", "gsi_pk"];

   /// クライアント提供のペイロードから商品レコードを組み立てる
   ///
   /// ID を新規生成し、`sk` は ID と同値、`created_at` は渡された時刻を
   /// 設定する。ペイロード中の予約フィールドは破棄される（予約側が勝つ）。
   pub fn create(mut payload: Map<String, Value>, now: DateTime<Utc>) -> Self {
      for field in Self::RESERVED_FIELDS {
         payload.remove(field);
      }

      let id = Uuid::new_v4();

      Self {
         pk: Self::PARTITION_VALUE.to_string(),
         sk: id.to_string(),
         id,
         created_at: now,
         gsi_pk: Self::GSI_ALL_VALUE.to_string(),
         attributes: payload,
      }
   }
}
