use crate::config::types::{MAX_RECENT_PATHS, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 記錄最近使用的來源資料夾，最新的在最前面
///
/// 以路徑比較去重，`/photos/site/` 與 `/photos/site` 視為同一個資料夾。
pub fn add_recent_path(settings: &mut UserSettings, folder: &Path) {
    settings
        .recent_paths
        .retain(|recent| Path::new(recent) != folder);
    settings
        .recent_paths
        .insert(0, folder.to_string_lossy().into_owned());
    settings.recent_paths.truncate(MAX_RECENT_PATHS);
}
