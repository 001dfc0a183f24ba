use crate::component::timelapse_builder::FrameDecoder;
use anyhow::{Context, Result};
use image::RgbImage;
use std::path::Path;

/// 以 `image` crate 解碼 PNG / JPEG，轉為 RGB8
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileDecoder;

impl FrameDecoder for ImageFileDecoder {
    fn decode(&self, path: &Path) -> Result<RgbImage> {
        let image = image::open(path)
            .with_context(|| format!("Failed to decode {}", path.display()))?;
        Ok(image.to_rgb8())
    }
}
