use anyhow::{Context, Result, bail};
use std::fs;
use std::path::PathBuf;

/// 去掉前後空白與成對引號（拖放資料夾到終端機時常見）
fn strip_input(input: &str) -> &str {
    let trimmed = input.trim();
    ['"', '\'']
        .iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(*quote)
                .and_then(|rest| rest.strip_suffix(*quote))
        })
        .unwrap_or(trimmed)
}

/// 將使用者輸入轉為來源資料夾，路徑必須存在且為資料夾
pub fn resolve_source_folder(input: &str) -> Result<PathBuf> {
    let path = PathBuf::from(strip_input(input));
    if path.as_os_str().is_empty() {
        bail!("No folder was entered");
    }

    let metadata = fs::metadata(&path)
        .with_context(|| format!("Cannot access folder {}", path.display()))?;
    if !metadata.is_dir() {
        bail!("Not a folder: {}", path.display());
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_strip_input() {
        assert_eq!(strip_input("  /photos/site \n"), "/photos/site");
        assert_eq!(strip_input("'/photos/my site'"), "/photos/my site");
        assert_eq!(strip_input("\"/photos/my site\" "), "/photos/my site");
        assert_eq!(strip_input("'/photos/unbalanced"), "'/photos/unbalanced");
    }

    #[test]
    fn test_resolve_existing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let input = format!(" '{}' ", temp_dir.path().display());
        assert_eq!(resolve_source_folder(&input).unwrap(), temp_dir.path());
    }

    #[test]
    fn test_resolve_missing_folder() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        let error = resolve_source_folder(&missing.to_string_lossy()).unwrap_err();
        assert!(error.to_string().starts_with("Cannot access folder"));
    }

    #[test]
    fn test_resolve_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("photo.jpg");
        fs::write(&file, b"x").unwrap();
        let error = resolve_source_folder(&file.to_string_lossy()).unwrap_err();
        assert!(error.to_string().starts_with("Not a folder"));
    }

    #[test]
    fn test_resolve_blank_input() {
        assert!(resolve_source_folder("   ").is_err());
        assert!(resolve_source_folder("''").is_err());
    }
}
