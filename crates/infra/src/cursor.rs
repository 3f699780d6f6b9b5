//! # ページネーショントークン
//!
//! 一覧取得の継続位置を表す不透明トークンのエンコード / デコード。
//!
//! ## 形式
//!
//! DynamoDB の `LastEvaluatedKey`（文字列属性のマップ）を
//! `HashMap<String, String>` → JSON → base64（standard）の順に変換した
//! 文字列。次のリクエストで逆変換して `ExclusiveStartKey` に渡す。
//!
//! ## 契約
//!
//! - **可逆性**: エンコードしたトークンをデコードすると元のキー構造を
//!   正確に再現する
//! - **不透明**: クライアントはトークンの中身に依存してはならない。
//!   サーバー側も保存せず、有効期限や発行元クエリとの紐付けを持たない
//! - **デコード失敗はエラーにしない**: 改ざん・破損したトークンは
//!   「トークンなし」として扱い、警告ログを出して先頭ページから
//!   取得を続行する（可用性優先のポリシー）
//!
//! `AttributeValue` は `Serialize` / `Deserialize` 非対応のため、
//! `HashMap<String, String>` に変換してからシリアライズする。
//! 商品テーブルのキー属性（`pk` / `sk` / `gsi_pk`）はすべて文字列なので
//! この変換で情報は失われない。

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

/// `LastEvaluatedKey` をページネーショントークンにエンコードする
///
/// 文字列以外の属性はキーに現れない前提で無視する。
pub fn encode_last_key(key: &HashMap<String, AttributeValue>) -> String {
   let key_strings: HashMap<String, String> = key
      .iter()
      .filter_map(|(k, v)| v.as_s().ok().map(|s| (k.clone(), s.clone())))
      .collect();
   let json = serde_json::to_vec(&key_strings).unwrap_or_default();
   BASE64.encode(json)
}

/// ページネーショントークンを `ExclusiveStartKey` にデコードする
///
/// base64 デコードまたは JSON パースに失敗した場合は `None` を返し、
/// 警告ログを出力する。呼び出し側はトークンが無かったものとして
/// 先頭から取得を続行する。
pub fn decode_start_key(token: &str) -> Option<HashMap<String, AttributeValue>> {
   let decoded = match BASE64.decode(token) {
      Ok(bytes) => bytes,
      Err(e) => {
         tracing::warn!("不正なページネーショントークン（base64 デコード失敗）: {e}");
         return None;
      }
   };

   let key_strings: HashMap<String, String> = match serde_json::from_slice(&decoded) {
      Ok(map) => map,
      Err(e) => {
         tracing::warn!("不正なページネーショントークン（JSON パース失敗）: {e}");
         return None;
      }
   };

   Some(
      key_strings
         .into_iter()
         .map(|(k, v)| (k, AttributeValue::S(v)))
         .collect(),
   )
}
