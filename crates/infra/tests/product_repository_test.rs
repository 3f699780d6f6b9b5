//! ProductRepository（DynamoDB 実装）の統合テスト
//!
//! DynamoDB Local を使用したテスト。ローカルストアが起動していない
//! 環境でスイートを壊さないよう `#[ignore]` を付与している。
//!
//! 実行方法:
//! ```bash
//! docker run -d -p 8000:8000 amazon/dynamodb-local -jar DynamoDBLocal.jar -sharedDb -inMemory
//! cargo test -p stockflow-infra --test product_repository_test -- --ignored
//! ```

use serde_json::{Map, Value, json};
use stockflow_domain::Product;
use stockflow_infra::{
   dynamodb,
   repository::{DynamoDbProductRepository, ProductQuery, ProductRepository},
};

fn dynamodb_endpoint() -> String {
   std::env::var("DYNAMODB_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// テストごとに独立したテーブルとリポジトリを用意する
async fn setup() -> (aws_sdk_dynamodb::Client, String, DynamoDbProductRepository) {
   let client = dynamodb::create_client(Some(&dynamodb_endpoint())).await;
   let table_name = format!("test_products_{}", uuid::Uuid::now_v7());
   dynamodb::ensure_products_table(&client, &table_name)
      .await
      .expect("テーブル作成に失敗");
   let repository = DynamoDbProductRepository::new(client.clone(), table_name.clone());
   (client, table_name, repository)
}

async fn teardown(client: &aws_sdk_dynamodb::Client, table_name: &str) {
   let _ = client.delete_table().table_name(table_name).send().await;
}

fn payload(value: Value) -> Map<String, Value> {
   let Value::Object(map) = value else {
      panic!("テストペイロードはオブジェクトであること");
   };
   map
}

fn sample_product(name: &str) -> Product {
   Product::create(
      payload(json!({ "name": name, "price": 10, "category": "electronics" })),
      chrono::Utc::now(),
   )
}

#[tokio::test]
#[ignore = "要 DynamoDB Local"]
async fn test_insertした商品をfind_by_idで取得できる() {
   let (client, table_name, repository) = setup().await;

   let product = sample_product("Test");
   repository.insert(&product).await.expect("登録に失敗");

   let found = repository
      .find_by_id(&product.id.to_string())
      .await
      .expect("取得に失敗")
      .expect("商品が見つかること");

   assert_eq!(found, product);

   teardown(&client, &table_name).await;
}

#[tokio::test]
#[ignore = "要 DynamoDB Local"]
async fn test_存在しないidのfind_by_idはnoneを返す() {
   let (client, table_name, repository) = setup().await;

   let found = repository
      .find_by_id("does-not-exist")
      .await
      .expect("取得呼び出し自体は成功すること");

   assert!(found.is_none());

   teardown(&client, &table_name).await;
}

#[tokio::test]
#[ignore = "要 DynamoDB Local"]
async fn test_listがトークンで全ページを辿れる() {
   let (client, table_name, repository) = setup().await;

   for i in 0..5 {
      repository
         .insert(&sample_product(&format!("商品{i}")))
         .await
         .expect("登録に失敗");
   }

   // 1ページ目: 2件 + 継続トークン
   let page1 = repository
      .list(&ProductQuery {
         pk:     None,
         limit:  2,
         cursor: None,
      })
      .await
      .expect("一覧取得に失敗");
   assert_eq!(page1.items.len(), 2);
   assert!(page1.next_token.is_some(), "続きがあること");

   // 2ページ目以降をトークンで辿り、全 5 件を重複なく回収できる
   let mut seen: Vec<String> = page1.items.iter().map(|p| p.sk.clone()).collect();
   let mut cursor = page1.next_token;
   while let Some(token) = cursor {
      let page = repository
         .list(&ProductQuery {
            pk:     None,
            limit:  2,
            cursor: Some(token),
         })
         .await
         .expect("一覧取得に失敗");
      seen.extend(page.items.iter().map(|p| p.sk.clone()));
      cursor = page.next_token;
   }

   seen.sort();
   seen.dedup();
   assert_eq!(seen.len(), 5, "全件を重複なく取得できること");

   teardown(&client, &table_name).await;
}

#[tokio::test]
#[ignore = "要 DynamoDB Local"]
async fn test_グルーピングキー指定でパーティションをqueryできる() {
   let (client, table_name, repository) = setup().await;

   repository
      .insert(&sample_product("Test"))
      .await
      .expect("登録に失敗");

   // 商品はすべて pk = "product" に入っている
   let page = repository
      .list(&ProductQuery {
         pk:     Some("product".to_string()),
         limit:  10,
         cursor: None,
      })
      .await
      .expect("一覧取得に失敗");
   assert_eq!(page.items.len(), 1);

   // 存在しないパーティションは空ページ
   let empty = repository
      .list(&ProductQuery {
         pk:     Some("no-such-partition".to_string()),
         limit:  10,
         cursor: None,
      })
      .await
      .expect("一覧取得に失敗");
   assert!(empty.items.is_empty());
   assert!(empty.next_token.is_none());

   teardown(&client, &table_name).await;
}

#[tokio::test]
#[ignore = "要 DynamoDB Local"]
async fn test_破損したトークンは無視されて先頭ページが返る() {
   let (client, table_name, repository) = setup().await;

   repository
      .insert(&sample_product("Test"))
      .await
      .expect("登録に失敗");

   let page = repository
      .list(&ProductQuery {
         pk:     None,
         limit:  10,
         cursor: Some("%%%broken-token%%%".to_string()),
      })
      .await
      .expect("破損トークンでもエラーにならないこと");

   assert_eq!(page.items.len(), 1);

   teardown(&client, &table_name).await;
}
