//! # Products API 設定
//!
//! 環境変数から Products API サーバーの設定を読み込む。
//!
//! 起動時に一度だけ構築し、以降は参照で引き回す。
//! テーブル名の欠落は起動エラーにしない（該当エンドポイントが
//! リクエストごとに 500 を返す）ため、`Option` で保持する。

use std::env;

/// Products API サーバーの設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// 商品テーブル名（未設定の場合、商品系エンドポイントは 500 を返す）
    pub products_table: Option<String>,
    /// DynamoDB エンドポイント URL（DynamoDB Local 使用時に設定、
    /// 未設定で AWS デフォルト）
    pub dynamodb_endpoint: Option<String>,
    /// HTTP メソッド検査を行うか（デフォルト: true）
    pub enforce_method: bool,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self {
            host: env::var("PRODUCTS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PRODUCTS_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PRODUCTS_PORT は有効なポート番号である必要があります"),
            products_table: env::var("PRODUCTS_TABLE").ok(),
            dynamodb_endpoint: env::var("DYNAMODB_ENDPOINT").ok(),
            enforce_method: parse_flag(env::var("ENFORCE_METHOD").ok(), true),
        }
    }
}

/// 真偽値フラグをパースする
///
/// `"false"` / `"0"` のみ無効化として扱い、それ以外はデフォルト値を使う。
fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref() {
        Some("false") | Some("0") => false,
        Some("true") | Some("1") => true,
        _ => default,
    }
}
