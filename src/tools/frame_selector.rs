use std::path::PathBuf;

/// 從第 0 張開始，每 `stride` 張取一張，保持原有順序
///
/// 呼叫端需保證 `stride >= 1`（由 `TimelapseJob` 驗證）。
#[must_use]
pub fn select_frames(images: &[PathBuf], stride: usize) -> Vec<PathBuf> {
    debug_assert!(stride >= 1, "stride must be positive");
    images.iter().step_by(stride.max(1)).cloned().collect()
}

/// 預估影片長度（秒）
#[must_use]
pub fn calculate_runtime(frame_count: usize, framerate: u32) -> f64 {
    frame_count as f64 / f64::from(framerate)
}
