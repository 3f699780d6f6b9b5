//! # Products API サーバー
//!
//! DynamoDB の単一テーブルを背にした商品カタログ API。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | `POST` | `/products` | 商品を登録 |
//! | `GET` | `/products` | 商品一覧（カーソルページネーション） |
//! | `GET` | `/product?id=...` | 商品 ID で 1 件取得 |
//! | `GET` | `/health` | ヘルスチェック |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `PRODUCTS_TABLE` | No* | 商品テーブル名。未設定でも起動するが、商品系エンドポイントは 500 を返す |
//! | `DYNAMODB_ENDPOINT` | No | DynamoDB Local のエンドポイント。設定時はログも Pretty 形式になる |
//! | `PRODUCTS_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PRODUCTS_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `ENFORCE_METHOD` | No | HTTP メソッド検査（デフォルト: `true`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（未設定時は実行環境から自動判定） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（DynamoDB Local）
//! DYNAMODB_ENDPOINT=http://localhost:8000 PRODUCTS_TABLE=products \
//!     cargo run -p stockflow-products-api
//!
//! # 本番環境
//! PRODUCTS_TABLE=products cargo run -p stockflow-products-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use stockflow_domain::clock::SystemClock;
use stockflow_infra::{
   dynamodb,
   repository::{DynamoDbProductRepository, ProductRepository},
};
use stockflow_products_api::{ProductState, build_app, config::AppConfig};
use stockflow_shared::observability::{LogFormat, TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Products API サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // 設定読み込み
   let config = AppConfig::from_env();

   // トレーシング初期化（ローカルエンドポイント設定時は Pretty がデフォルト）
   let log_format = LogFormat::from_env_or(config.dynamodb_endpoint.is_some());
   let tracing_config = TracingConfig::new("products-api", log_format);
   init_tracing(&tracing_config);

   tracing::info!(
      service = %tracing_config.service_name,
      table = ?config.products_table,
      endpoint = ?config.dynamodb_endpoint,
      "設定を読み込みました"
   );

   // リポジトリ構築
   // テーブル名が未設定でも起動は継続する。商品系エンドポイントは
   // リクエストごとに 500 を返し、デプロイ不備として表面化させる。
   let repository: Option<Arc<dyn ProductRepository>> = match &config.products_table {
      Some(table_name) => {
         let client = dynamodb::create_client(config.dynamodb_endpoint.as_deref()).await;

         // テーブル自動作成はローカル開発時のみ（本番は IaC で管理）
         if config.dynamodb_endpoint.is_some() {
            dynamodb::ensure_products_table(&client, table_name).await?;
         }

         Some(Arc::new(DynamoDbProductRepository::new(
            client,
            table_name.clone(),
         )))
      }
      None => {
         tracing::error!("PRODUCTS_TABLE が設定されていません（商品系エンドポイントは 500 を返します）");
         None
      }
   };

   let state = Arc::new(ProductState {
      repository,
      clock: Arc::new(SystemClock),
   });

   // ルーター構築
   let app = build_app(&config, state);

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Products API サーバーが起動しました: {}", addr);

   axum::serve(listener, app).await?;

   Ok(())
}
