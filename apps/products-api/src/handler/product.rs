//! # 商品 API ハンドラ
//!
//! 商品の登録・取得・一覧の 3 エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /products` - 商品を登録
//! - `GET /product?id=...` - 商品 ID で 1 件取得
//! - `GET /products` - 商品一覧（カーソルベースページネーション）
//!
//! 各ハンドラは「設定確認 → 入力検証 → ストア呼び出し 1 回 →
//! レスポンス整形」の直線的なパイプライン。リトライや
//! ハンドラ間の呼び出しは行わない。

use std::sync::Arc;

use axum::{
   Json,
   body::Bytes,
   extract::{Query, State},
   http::StatusCode,
   response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stockflow_domain::{Product, clock::Clock};
use stockflow_infra::repository::{ProductQuery, ProductRepository};
use stockflow_shared::PaginatedResponse;

use crate::error::ApiError;

/// 1 ページのデフォルト件数
const DEFAULT_PAGE_SIZE: i32 = 10;

/// 商品 API の共有状態
///
/// プロセス起動時に一度だけ構築し、全ハンドラに参照で注入される。
/// `repository` が `None` なのはテーブル名設定が欠落している場合のみで、
/// その場合は各ハンドラがストア呼び出しを行わずに 500 を返す。
pub struct ProductState {
   pub repository: Option<Arc<dyn ProductRepository>>,
   pub clock:      Arc<dyn Clock>,
}

impl ProductState {
   /// リポジトリを取得する。未構成なら設定不備エラー
   fn repository(&self) -> Result<&Arc<dyn ProductRepository>, ApiError> {
      self.repository.as_ref().ok_or_else(|| {
         ApiError::Configuration("PRODUCTS_TABLE が設定されていません".to_string())
      })
   }
}

/// 商品 1 件取得のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct GetProductQuery {
   /// 商品 ID
   pub id: Option<String>,
}

/// 商品一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
   /// 取得件数。数値でない・正でない・未指定の場合は 10 にフォールバック
   pub limit:      Option<String>,
   /// 前ページの継続トークン（不透明文字列）
   #[serde(rename = "nextToken")]
   pub next_token: Option<String>,
   /// グルーピングキー。指定時はそのパーティションのみを取得
   pub pk:         Option<String>,
}

/// 商品 1 件取得のレスポンス
#[derive(Debug, Serialize)]
pub struct GetProductResponse {
   pub product: Product,
}

/// POST /products
///
/// リクエストボディの JSON オブジェクトをそのまま商品レコードとして
/// 登録する。ID と登録日時はサーバー側で生成し、クライアントが
/// 同名フィールドを送っても上書きされる（予約フィールド優先）。
///
/// 同一ペイロードで 2 回呼ぶと別レコードになる（冪等ではない）。
pub async fn create_product(
   State(state): State<Arc<ProductState>>,
   body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
   let repository = state.repository()?;

   if body.is_empty() {
      tracing::warn!("リクエストボディがありません");
      return Err(ApiError::BadRequest("Missing request body".to_string()));
   }

   let payload: Map<String, Value> = serde_json::from_slice(&body).map_err(|e| {
      tracing::warn!("リクエストボディの JSON パースに失敗: {e}");
      ApiError::BadRequest("Invalid JSON body".to_string())
   })?;

   let product = Product::create(payload, state.clock.now());

   repository.insert(&product).await?;

   tracing::info!(id = %product.id, "商品を登録しました");

   Ok((StatusCode::CREATED, Json(product)))
}

/// GET /product?id=...
///
/// 商品 ID（ソートキー）で 1 件取得する。
pub async fn get_product_by_id(
   State(state): State<Arc<ProductState>>,
   Query(query): Query<GetProductQuery>,
) -> Result<Json<GetProductResponse>, ApiError> {
   let repository = state.repository()?;

   let id = query.id.filter(|id| !id.is_empty()).ok_or_else(|| {
      tracing::warn!("クエリパラメータ id がありません");
      ApiError::BadRequest("Missing required query param: id".to_string())
   })?;

   match repository.find_by_id(&id).await? {
      Some(product) => Ok(Json(GetProductResponse { product })),
      None => {
         tracing::warn!(%id, "商品が見つかりません");
         Err(ApiError::NotFound("Product not found".to_string()))
      }
   }
}

/// GET /products
///
/// 商品一覧を 1 ページ取得する。`pk` 指定時はそのパーティションを、
/// 未指定時は全件一覧用 GSI を Query する。
///
/// `limit` が数値として解釈できない場合はエラーにせず 10 に
/// フォールバックし、破損した `nextToken` はトークンなしとして扱う
/// （どちらも可用性優先のポリシー）。
pub async fn list_products(
   State(state): State<Arc<ProductState>>,
   Query(query): Query<ListProductsQuery>,
) -> Result<Json<PaginatedResponse<Product>>, ApiError> {
   let repository = state.repository()?;

   let limit = query
      .limit
      .as_deref()
      .and_then(|s| s.parse::<i32>().ok())
      .filter(|n| *n > 0)
      .unwrap_or(DEFAULT_PAGE_SIZE);

   let page = repository
      .list(&ProductQuery {
         pk: query.pk,
         limit,
         cursor: query.next_token,
      })
      .await?;

   tracing::info!(
      item_count = page.items.len(),
      next_token_present = page.next_token.is_some(),
      "商品一覧を取得しました"
   );

   Ok(Json(PaginatedResponse {
      items:      page.items,
      next_token: page.next_token,
   }))
}
