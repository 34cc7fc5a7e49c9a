//! site-i18n
//!
//! 静的サイト向けの多言語化ランタイム。翻訳テーブル、言語切り替え、
//! 同意管理、テーマ、ページ表示の補助を提供する。

pub mod catalog;
pub mod config;
pub mod consent;
pub mod dom;
pub mod language;
pub mod logging;
pub mod page;
pub mod presentation;
pub mod resolve;
pub mod storage;
pub mod theme;
pub mod types;

mod test_utils;

pub use catalog::Catalog;
pub use language::LanguageManager;
pub use page::Page;
pub use resolve::Resolver;
