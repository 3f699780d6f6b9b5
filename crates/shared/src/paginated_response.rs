//! # ページネーション付きレスポンス
//!
//! カーソルベースのページネーションに対応した API レスポンス型。

use serde::{Deserialize, Serialize};

/// ページネーション付きレスポンス
///
/// 一覧系エンドポイントの統一レスポンス形式。
///
/// ## JSON 形式
///
/// ```json
/// {
///   "items": [...],
///   "nextToken": "opaque-token-string"
/// }
/// ```
///
/// `nextToken` が `null` の場合は最後のページを意味する。
/// `null` の場合もフィールド自体は省略しない（クライアントが
/// 終端判定に使うため）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
   pub items:      Vec<T>,
   #[serde(rename = "nextToken")]
   pub next_token: Option<String>,
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_serializeでnext_tokenがnextTokenにリネームされる() {
      let response = PaginatedResponse {
         items:      vec!["a", "b"],
         next_token: Some("dG9rZW4=".to_string()),
      };
      let json = serde_json::to_value(&response).unwrap();

      assert_eq!(
         json,
         serde_json::json!({ "items": ["a", "b"], "nextToken": "dG9rZW4=" })
      );
   }

   #[test]
   fn test_serializeで最終ページのnextTokenはnullで出力される() {
      let response: PaginatedResponse<String> = PaginatedResponse {
         items:      vec![],
         next_token: None,
      };
      let json = serde_json::to_value(&response).unwrap();

      // フィールド省略ではなく null を明示する
      assert_eq!(json, serde_json::json!({ "items": [], "nextToken": null }));
   }

   #[test]
   fn test_deserializeでjsonからオブジェクトに変換する() {
      let json = r#"{ "items": [1, 2, 3], "nextToken": null }"#;
      let response: PaginatedResponse<i32> = serde_json::from_str(json).unwrap();

      assert_eq!(response.items, vec![1, 2, 3]);
      assert_eq!(response.next_token, None);
   }
}
