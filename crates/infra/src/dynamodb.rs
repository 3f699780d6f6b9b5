//! # DynamoDB 接続管理
//!
//! Amazon DynamoDB への接続管理を行う。
//!
//! ## 設計方針
//!
//! - **ローカル開発**: `DYNAMODB_ENDPOINT` で DynamoDB Local に接続
//! - **本番環境**: デフォルトの認証情報チェーン（IAM ロール等）で接続
//! - **テーブル自動作成**: ローカル開発時のみアプリケーション起動時に
//!   テーブルが存在しなければ作成（冪等）。本番のテーブルは IaC で
//!   プロビジョニングされる前提
//!
//! ## テーブルスキーマ
//!
//! - PK: `pk` (String) — 固定値 `"product"`
//! - SK: `sk` (String) — 商品 ID（UUID）
//! - GSI `gsi_all_products`: PK `gsi_pk` (String) / SK `sk` (String)、
//!   全商品を一つのパーティションに集約して一覧取得に使う

use aws_sdk_dynamodb::{
    Client,
    types::{
        AttributeDefinition,
        BillingMode,
        GlobalSecondaryIndex,
        KeySchemaElement,
        KeyType,
        Projection,
        ProjectionType,
        ScalarAttributeType,
    },
};

use crate::InfraError;

/// 全商品一覧用 GSI の名前
pub const GSI_ALL_PRODUCTS: &str = "gsi_all_products";

/// DynamoDB クライアントを作成する
///
/// `endpoint` が指定された場合は DynamoDB Local 用のクライアントを作成する。
/// 認証情報はダミー値を使用する（DynamoDB Local はクレデンシャルを
/// 検証しないが、SDK はプロバイダを必要とする）。
///
/// `endpoint` が `None` の場合はデフォルトの認証情報チェーン
/// （環境変数、IAM ロール等）を使用する。
///
/// # 引数
///
/// * `endpoint` - DynamoDB エンドポイント URL（例: `http://localhost:8000`）
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let config = match endpoint {
        Some(url) => {
            aws_config::defaults(aws_config::BehaviorVersion::latest())
                .endpoint_url(url)
                .region(aws_config::Region::new("ap-northeast-1"))
                .credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
                    "local", "local", None, None, "local",
                ))
                .load()
                .await
        }
        None => aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await,
    };

    Client::new(&config)
}

/// 商品テーブルが存在しなければ作成する（冪等）
///
/// # 引数
///
/// * `client` - DynamoDB クライアント
/// * `table_name` - テーブル名
pub async fn ensure_products_table(client: &Client, table_name: &str) -> Result<(), InfraError> {
    // テーブルの存在確認
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => {
            tracing::debug!("テーブル '{}' は既に存在します", table_name);
            return Ok(());
        }
        Err(err) => {
            // ResourceNotFoundException の場合のみテーブル作成に進む
            let service_err = err.as_service_error();
            if !service_err
                .map(|e| e.is_resource_not_found_exception())
                .unwrap_or(false)
            {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{}' の確認に失敗: {}",
                    table_name, err
                )));
            }
        }
    }

    // テーブル作成
    tracing::info!("テーブル '{}' を作成します", table_name);

    let key_schema = |name: &str, key_type: KeyType| {
        KeySchemaElement::builder()
            .attribute_name(name)
            .key_type(key_type)
            .build()
            .map_err(|e| InfraError::dynamo_db(format!("KeySchema 構築エラー: {}", e)))
    };
    let attribute = |name: &str| {
        AttributeDefinition::builder()
            .attribute_name(name)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| InfraError::dynamo_db(format!("AttributeDefinition 構築エラー: {}", e)))
    };

    let gsi = GlobalSecondaryIndex::builder()
        .index_name(GSI_ALL_PRODUCTS)
        .key_schema(key_schema("gsi_pk", KeyType::Hash)?)
        .key_schema(key_schema("sk", KeyType::Range)?)
        .projection(
            Projection::builder()
                .projection_type(ProjectionType::All)
                .build(),
        )
        .build()
        .map_err(|e| InfraError::dynamo_db(format!("GSI 構築エラー: {}", e)))?;

    let create_result = client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema("pk", KeyType::Hash)?)
        .key_schema(key_schema("sk", KeyType::Range)?)
        .attribute_definitions(attribute("pk")?)
        .attribute_definitions(attribute("sk")?)
        .attribute_definitions(attribute("gsi_pk")?)
        .global_secondary_indexes(gsi)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match create_result {
        Ok(_) => {
            tracing::info!("テーブル '{}' を作成しました", table_name);
            Ok(())
        }
        Err(err) => {
            // ResourceInUseException は並行呼び出し時に発生しうる（テーブルが作成中）
            // この場合は冪等として成功扱いにする
            let is_resource_in_use = err
                .as_service_error()
                .map(|e| e.is_resource_in_use_exception())
                .unwrap_or(false);
            if !is_resource_in_use {
                return Err(InfraError::dynamo_db(format!(
                    "テーブル '{}' の作成に失敗: {}",
                    table_name, err
                )));
            }
            tracing::debug!(
                "テーブル '{}' は既に作成中または存在します（ResourceInUseException）",
                table_name
            );
            Ok(())
        }
    }
}
