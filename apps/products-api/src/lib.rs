//! # Products API ライブラリ
//!
//! Products API のハンドラ・設定・ルーター構築を公開する。
//! 統合テストからスタブリポジトリでアプリを組み立てられるようにする。

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;

pub use app_builder::build_app;
pub use handler::ProductState;
