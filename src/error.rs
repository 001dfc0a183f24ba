//! 縮時影片流程中可預期的錯誤
//!
//! 其他錯誤（解碼失敗、ffmpeg 失敗等）以 `anyhow` 附帶 context 向上傳遞。

/// Designed failure modes of a timelapse run.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimelapseError {
    #[error("No images found in the specified folder.")]
    EmptySelection,

    #[error("Framerate must be a positive number of frames per second")]
    InvalidFramerate,

    #[error("Skip frames must be at least 1")]
    InvalidSkipFrames,

    #[error("Interrupted before all frames were written")]
    Interrupted,

    #[error("Frame is {found_width}x{found_height}, video is {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },
}

impl TimelapseError {
    /// 從 `anyhow::Error` 鏈中找出 `TimelapseError`
    #[must_use]
    pub fn find(error: &anyhow::Error) -> Option<&Self> {
        error.chain().find_map(|cause| cause.downcast_ref::<Self>())
    }
}
