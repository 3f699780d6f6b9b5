//! # ProductRepository
//!
//! 商品レコードの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **単一テーブル**: PK = `pk`（固定値 `"product"`）、SK = `sk`（商品 ID）
//! - **全件一覧は GSI**: `gsi_all_products`（PK = `gsi_pk` 固定値 `"all"`）を
//!   Query することで、テーブル全体の Scan を避ける
//! - **カーソルページネーション**: DynamoDB の `LastEvaluatedKey` を
//!   base64 でエンコード（[`crate::cursor`]）
//! - **アイテム変換**: レコードはスキーマレスなので serde_dynamo で
//!   構造体とアイテムを相互変換する

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use stockflow_domain::Product;

use crate::{InfraError, cursor, dynamodb::GSI_ALL_PRODUCTS};

/// 一覧取得の条件
#[derive(Debug, Default)]
pub struct ProductQuery {
   /// グルーピングキー。指定された場合はそのパーティションを Query し、
   /// 未指定の場合は全件一覧用 GSI を Query する。
   pub pk:     Option<String>,
   /// 1 ページの最大件数
   pub limit:  i32,
   /// 前ページの継続トークン（不透明文字列）
   pub cursor: Option<String>,
}

/// 商品のページ
#[derive(Debug)]
pub struct ProductPage {
   pub items:      Vec<Product>,
   /// 続きがある場合のみ `Some`
   pub next_token: Option<String>,
}

/// 商品リポジトリトレイト
#[async_trait]
pub trait ProductRepository: Send + Sync {
   /// 商品を登録する
   async fn insert(&self, product: &Product) -> Result<(), InfraError>;

   /// 商品 ID で 1 件取得する
   async fn find_by_id(&self, id: &str) -> Result<Option<Product>, InfraError>;

   /// 商品の一覧を 1 ページ取得する
   async fn list(&self, query: &ProductQuery) -> Result<ProductPage, InfraError>;
}

/// DynamoDB 実装の ProductRepository
pub struct DynamoDbProductRepository {
   client:     Client,
   table_name: String,
}

impl DynamoDbProductRepository {
   pub fn new(client: Client, table_name: String) -> Self {
      Self { client, table_name }
   }
}

#[async_trait]
impl ProductRepository for DynamoDbProductRepository {
   #[tracing::instrument(skip_all, level = "debug", fields(id = %product.id))]
   async fn insert(&self, product: &Product) -> Result<(), InfraError> {
      let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(product)
         .map_err(|e| InfraError::conversion(format!("商品のアイテム変換に失敗: {e}")))?;

      self
         .client
         .put_item()
         .table_name(&self.table_name)
         .set_item(Some(item))
         .send()
         .await
         .map_err(|e| InfraError::dynamo_db(format!("商品の登録に失敗: {e}")))?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &str) -> Result<Option<Product>, InfraError> {
      let output = self
         .client
         .get_item()
         .table_name(&self.table_name)
         .key(
            "pk",
            AttributeValue::S(Product::PARTITION_VALUE.to_string()),
         )
         .key("sk", AttributeValue::S(id.to_string()))
         .send()
         .await
         .map_err(|e| InfraError::dynamo_db(format!("商品の取得に失敗: {e}")))?;

      let Some(item) = output.item else {
         return Ok(None);
      };

      let product: Product = serde_dynamo::from_item(item)
         .map_err(|e| InfraError::conversion(format!("商品のアイテム変換に失敗: {e}")))?;

      Ok(Some(product))
   }

   #[tracing::instrument(skip_all, level = "debug", fields(pk = ?query.pk, limit = query.limit))]
   async fn list(&self, query: &ProductQuery) -> Result<ProductPage, InfraError> {
      // グルーピングキーがあればそのパーティション、なければ全件 GSI
      let mut request = match &query.pk {
         Some(pk) => self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("pk = :pk")
            .expression_attribute_values(":pk", AttributeValue::S(pk.clone())),
         None => self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(GSI_ALL_PRODUCTS)
            .key_condition_expression("gsi_pk = :gsi_pk")
            .expression_attribute_values(
               ":gsi_pk",
               AttributeValue::S(Product::GSI_ALL_VALUE.to_string()),
            ),
      };

      request = request.limit(query.limit);

      // 破損したトークンは「なし」として扱う（cursor モジュールが警告を出す）
      if let Some(start_key) = query.cursor.as_deref().and_then(cursor::decode_start_key) {
         request = request.set_exclusive_start_key(Some(start_key));
      }

      let output = request
         .send()
         .await
         .map_err(|e| InfraError::dynamo_db(format!("商品の一覧取得に失敗: {e}")))?;

      // 変換に失敗したアイテムはスキップする（ログには残す）
      let items: Vec<Product> = output
         .items()
         .iter()
         .filter_map(|item| {
            serde_dynamo::from_item(item.clone())
               .inspect_err(|e| tracing::warn!("商品のアイテム変換に失敗（スキップ）: {e}"))
               .ok()
         })
         .collect();

      let next_token = output.last_evaluated_key().map(cursor::encode_last_key);

      Ok(ProductPage { items, next_token })
   }
}
