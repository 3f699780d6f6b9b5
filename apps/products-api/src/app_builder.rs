//! # アプリケーション構築
//!
//! State の注入とルーター構築を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。
//!
//! ## メソッド検査ポリシー
//!
//! メソッドとパスの対応付けはデプロイ構成でありハンドラロジックでは
//! ないため、検査はルーター構築時に適用する:
//!
//! - `enforce_method = true`（デフォルト）: 各ルートを特定メソッドに
//!   束縛し、不一致は 405 の JSON レスポンスを返す
//! - `enforce_method = false`: 取得系ルートを任意メソッドで受け付ける
//!   （検査を落とした過去バージョンの挙動）。`/products` は POST と
//!   GET で別ハンドラに振り分けるため、メソッドディスパッチ自体は残る

use std::sync::Arc;

use axum::{
   Router,
   routing::{any, get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
   config::AppConfig,
   error::ApiError,
   handler::{ProductState, create_product, get_product_by_id, health_check, list_products},
};

/// ルーターを構築する
pub fn build_app(config: &AppConfig, state: Arc<ProductState>) -> Router {
   let router = if config.enforce_method {
      Router::new()
         .route(
            "/products",
            post(create_product)
               .get(list_products)
               .fallback(method_not_allowed),
         )
         .route("/product", get(get_product_by_id).fallback(method_not_allowed))
   } else {
      Router::new()
         .route("/products", post(create_product).get(list_products))
         .route("/product", any(get_product_by_id))
   };

   router
      .route("/health", get(health_check))
      .with_state(state)
      .layer(TraceLayer::new_for_http())
}

/// メソッド不一致時の 405 レスポンス
async fn method_not_allowed() -> ApiError {
   tracing::warn!("許可されていないメソッドで呼び出されました");
   ApiError::MethodNotAllowed
}
