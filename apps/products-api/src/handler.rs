//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは「検証 → ストア呼び出し 1 回 → レスポンス整形」の
//!   直線的なパイプラインに保つ。ハンドラ同士は呼び合わない

pub mod health;
pub mod product;

pub use health::health_check;
pub use product::{ProductState, create_product, get_product_by_id, list_products};
