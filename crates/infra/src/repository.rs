//! # リポジトリ
//!
//! 永続化層へのアクセスを抽象化するリポジトリを定義する。
//!
//! ## 設計方針
//!
//! - トレイトで抽象化し、ハンドラはトレイトオブジェクト経由で利用する
//! - テストではインメモリのスタブ実装に差し替える

pub mod product_repository;

pub use product_repository::{
   DynamoDbProductRepository,
   ProductPage,
   ProductQuery,
   ProductRepository,
};
