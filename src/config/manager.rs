//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SiteSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: SiteSettings,

    /// サイトのルートパス
    site_root: Option<PathBuf>,

    /// 読み込み時に解決した `localesDir`
    locales_dir: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: SiteSettings::default(), site_root: None, locales_dir: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `site_root` - サイトのルートパス
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    /// - `localesDir` がディレクトリでない
    pub fn load_settings(&mut self, site_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for site: {:?}", site_root);

        let settings = if let Some(root) = &site_root {
            loader::load_from_site_root(root)?.map_or_else(SiteSettings::default, |site| {
                tracing::debug!("Loaded site settings: {:?}", site);
                site
            })
        } else {
            SiteSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;
        let locales_dir =
            loader::resolve_locales_dir(site_root.as_deref(), settings.locales_dir.as_deref())?;

        self.current_settings = settings;
        self.site_root = site_root;
        self.locales_dir = locales_dir;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &SiteSettings {
        &self.current_settings
    }

    /// サイトルートを取得
    #[must_use]
    pub const fn site_root(&self) -> Option<&PathBuf> {
        self.site_root.as_ref()
    }

    /// 読み込み時に解決した `localesDir`
    ///
    /// 未設定の場合は `None`（組み込みの翻訳テーブルを使用）。
    #[must_use]
    pub fn locales_dir(&self) -> Option<&Path> {
        self.locales_dir.as_deref()
    }
}
