//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use crate::catalog::{
    Catalog,
    LanguageTable,
};
use crate::storage::{
    MemoryStore,
    PreferenceStore,
    StorageError,
};
use crate::types::LanguageCode;

/// JSON 値からカタログを作成する
///
/// 最初の要素がデフォルト言語になる。
pub(crate) fn catalog_from_json(tables: &[(&str, serde_json::Value)]) -> Catalog {
    let default_language = LanguageCode::new(tables[0].0);
    let tables = tables
        .iter()
        .map(|(code, value)| LanguageTable::from_value(LanguageCode::new(*code), value.clone()).unwrap());
    Catalog::new(&default_language, tables).unwrap()
}

/// 書き込み回数を記録する `MemoryStore` のラッパー
#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    pub(crate) inner: MemoryStore,
    pub(crate) writes: Vec<(String, String)>,
}

impl PreferenceStore for RecordingStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.push((key.to_string(), value.to_string()));
        self.inner.set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key)
    }
}
