//! 將圖片序列依序寫入影片
//!
//! 解碼、編碼與進度顯示都透過 trait 注入，方便測試時替換。

use crate::error::TimelapseError;
use anyhow::{Context, Result};
use image::RgbImage;
use log::{debug, info, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

pub const PROGRESS_LABEL: &str = "Creating timelapse";

/// 四字元編碼識別碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    pub const MP4V: Self = Self(*b"mp4v");
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

pub trait FrameDecoder {
    fn decode(&self, path: &Path) -> Result<RgbImage>;
}

pub trait FrameWriter {
    fn append(&mut self, frame: &RgbImage) -> Result<()>;

    /// 關閉輸出並確保檔案完整寫入，只會呼叫一次
    fn finalize(self) -> Result<()>;
}

pub trait VideoEncoder {
    type Writer: FrameWriter;

    fn open(
        &self,
        output: &Path,
        codec: FourCc,
        framerate: u32,
        size: (u32, u32),
    ) -> Result<Self::Writer>;
}

/// 純觀察用途，不影響流程
pub trait ProgressReporter {
    fn report(&self, current: usize, total: usize, label: &str);
}

pub struct Assembler<'a, D, E, P> {
    decoder: &'a D,
    encoder: &'a E,
    progress: &'a P,
    shutdown_signal: &'a AtomicBool,
}

impl<'a, D, E, P> Assembler<'a, D, E, P>
where
    D: FrameDecoder,
    E: VideoEncoder,
    P: ProgressReporter,
{
    pub const fn new(
        decoder: &'a D,
        encoder: &'a E,
        progress: &'a P,
        shutdown_signal: &'a AtomicBool,
    ) -> Self {
        Self {
            decoder,
            encoder,
            progress,
            shutdown_signal,
        }
    }

    /// 依序將 `images` 寫成一支影片，回傳寫入的幀數
    ///
    /// 影片尺寸取自第一張圖片；空序列回傳 `TimelapseError::EmptySelection`，
    /// 且不會開啟編碼器。
    pub fn assemble(&self, images: &[PathBuf], output: &Path, framerate: u32) -> Result<usize> {
        let Some(first_path) = images.first() else {
            return Err(TimelapseError::EmptySelection.into());
        };

        if self.is_interrupted() {
            warn!("收到中斷信號，未開始寫入影片");
            return Err(TimelapseError::Interrupted.into());
        }

        let first_frame = self.decode(first_path)?;
        let size = first_frame.dimensions();
        info!(
            "建立影片 {} ({}x{}, {} fps, {} 幀)",
            output.display(),
            size.0,
            size.1,
            framerate,
            images.len()
        );

        let mut writer = self
            .encoder
            .open(output, FourCc::MP4V, framerate, size)
            .with_context(|| format!("Failed to open video writer for {}", output.display()))?;

        let total = images.len();
        let mut pending_first = Some(first_frame);

        for (index, path) in images.iter().enumerate() {
            if self.is_interrupted() {
                warn!("收到中斷信號，已寫入 {index}/{total} 幀");
                return Err(TimelapseError::Interrupted.into());
            }

            let frame = match pending_first.take() {
                Some(frame) => frame,
                None => self.decode(path)?,
            };

            writer
                .append(&frame)
                .with_context(|| format!("Failed to write frame {}", path.display()))?;
            self.progress.report(index + 1, total, PROGRESS_LABEL);
        }

        writer
            .finalize()
            .with_context(|| format!("Failed to finalize {}", output.display()))?;

        debug!("影片寫入完成: {}", output.display());
        Ok(total)
    }

    fn is_interrupted(&self) -> bool {
        self.shutdown_signal.load(Ordering::SeqCst)
    }

    fn decode(&self, path: &Path) -> Result<RgbImage> {
        self.decoder
            .decode(path)
            .with_context(|| format!("Failed to read image {}", path.display()))
    }
}
