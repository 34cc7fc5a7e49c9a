//! 設定ファイルの読み込み関数

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SiteSettings,
    ValidationError,
};

/// 設定ファイル名
pub(super) const CONFIG_FILE_NAME: &str = ".site-i18n.json";

/// サイトのルートから設定を読み込む
///
/// `.site-i18n.json` ファイルを探して読み込む
///
/// # Arguments
/// * `site_root` - サイトのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_site_root(site_root: &Path) -> Result<Option<SiteSettings>, ConfigError> {
    let config_path = site_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: SiteSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}

/// `localesDir` を解決し、ディレクトリが存在することを確認する
///
/// 相対パスはサイトルートからの相対として扱う。サイトルートがない場合は
/// カレントディレクトリ基準。
///
/// # Returns
/// - `Ok(None)`: `localesDir` が未設定（組み込みの翻訳テーブルを使用）
/// - `Ok(Some(dir))`: 解決済みのディレクトリ
///
/// # Errors
/// - 解決先がディレクトリでない場合は `ConfigError::ValidationErrors`
pub(super) fn resolve_locales_dir(
    site_root: Option<&Path>,
    locales_dir: Option<&str>,
) -> Result<Option<PathBuf>, ConfigError> {
    let Some(raw) = locales_dir else {
        return Ok(None);
    };
    let dir = PathBuf::from(raw);
    let resolved = match site_root {
        Some(root) if dir.is_relative() => root.join(&dir),
        _ => dir,
    };

    if !resolved.is_dir() {
        return Err(ConfigError::ValidationErrors(vec![ValidationError::new(
            "localesDir",
            format!("{} is not a directory", resolved.display()),
        )]));
    }

    tracing::debug!("Using locales directory: {:?}", resolved);
    Ok(Some(resolved))
}
