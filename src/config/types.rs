use serde::{Deserialize, Serialize};

/// 最近使用路徑的保留數量
pub const MAX_RECENT_PATHS: usize = 10;

/// ffmpeg `-q:v` 的有效範圍（數字越小品質越高）
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 31;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderSettings {
    pub ffmpeg_binary: String,
    pub quality: u8,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            ffmpeg_binary: "ffmpeg".to_string(),
            quality: 2,
        }
    }
}

impl EncoderSettings {
    #[must_use]
    pub fn clamped_quality(&self) -> u8 {
        self.quality.clamp(MIN_QUALITY, MAX_QUALITY)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub recent_paths: Vec<String>,
    pub encoder: EncoderSettings,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub settings: UserSettings,
}
