use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// 可納入縮時影片的圖片副檔名（小寫，不含點）
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// 一般檔案，或指向檔案的符號連結（不跟隨資料夾連結）
fn is_file_or_file_link(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

/// 遞迴掃描資料夾下所有圖片，依完整路徑字典序排序
///
/// 以 `.` 開頭的資料夾不會進入，以 `.` 開頭的檔案會被略過。
/// 根目錄本身不受隱藏規則影響；不存在或無法讀取的路徑回傳空清單。
#[must_use]
pub fn scan_image_files(directory: &Path) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(std::result::Result::ok)
        .filter(|entry| is_image_file(entry.path()))
        .filter(is_file_or_file_link)
        .map(DirEntry::into_path)
        .collect();

    // 以完整路徑字串排序，而非逐段比較
    images.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    images
}
