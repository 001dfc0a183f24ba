use super::assembler::{FourCc, FrameWriter, VideoEncoder};
use crate::config::EncoderSettings;
use crate::error::TimelapseError;
use anyhow::{Context, Result, bail};
use image::RgbImage;
use log::{debug, warn};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdin, Command, Stdio};
use std::thread::{self, JoinHandle};

/// yuv420p 需要偶數寬高；奇數時裁掉最後一列/行，輸出不會大於第一張圖片
const EVEN_SIZE_FILTER: &str = "crop=trunc(iw/2)*2:trunc(ih/2)*2:0:0";

/// 透過 stdin 將 RGB 原始幀送入 ffmpeg
pub struct FfmpegEncoder {
    binary: String,
    quality: u8,
}

impl FfmpegEncoder {
    #[must_use]
    pub fn new(settings: &EncoderSettings) -> Self {
        Self {
            binary: settings.ffmpeg_binary.clone(),
            quality: settings.clamped_quality(),
        }
    }

    /// 將 FourCC 對應到 ffmpeg 的編碼器名稱
    fn codec_name(codec: FourCc) -> Result<&'static str> {
        match codec {
            FourCc::MP4V => Ok("mpeg4"),
            other => bail!("Unsupported codec: {other}"),
        }
    }

    #[must_use]
    pub fn build_command(
        &self,
        output: &Path,
        codec_name: &str,
        codec: FourCc,
        framerate: u32,
        (width, height): (u32, u32),
    ) -> Command {
        let mut cmd = Command::new(&self.binary);

        cmd.args([
            "-hide_banner",
            "-nostdin",
            "-loglevel", "error",
            "-y",
            "-f", "rawvideo",
            "-pix_fmt", "rgb24",
            "-s", &format!("{width}x{height}"),
            "-r", &framerate.to_string(),
            "-i", "pipe:0",
            "-vf", EVEN_SIZE_FILTER,
            "-c:v", codec_name,
            "-tag:v", &codec.to_string(),
            "-q:v", &self.quality.to_string(),
            "-pix_fmt", "yuv420p",
            "-an",
            "-f", "mp4",
        ]);
        cmd.arg(output);

        cmd
    }
}

impl VideoEncoder for FfmpegEncoder {
    type Writer = FfmpegFrameWriter;

    fn open(
        &self,
        output: &Path,
        codec: FourCc,
        framerate: u32,
        size: (u32, u32),
    ) -> Result<FfmpegFrameWriter> {
        let codec_name = Self::codec_name(codec)?;
        let mut cmd = self.build_command(output, codec_name, codec, framerate, size);
        debug!("執行: {cmd:?}");

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}. Is ffmpeg installed?", self.binary))?;

        let stdin = child
            .stdin
            .take()
            .context("Failed to open ffmpeg stdin")?;
        let stderr = child
            .stderr
            .take()
            .context("Failed to open ffmpeg stderr")?;

        Ok(FfmpegFrameWriter {
            child: Some(child),
            stdin: Some(BufWriter::new(stdin)),
            stderr_reader: Some(spawn_stderr_reader(stderr)),
            output: output.to_path_buf(),
            size,
            frames_written: 0,
        })
    }
}

pub struct FfmpegFrameWriter {
    child: Option<Child>,
    stdin: Option<BufWriter<ChildStdin>>,
    stderr_reader: Option<JoinHandle<String>>,
    output: PathBuf,
    size: (u32, u32),
    frames_written: usize,
}

/// 持續讀取 stderr，避免管線塞滿時 ffmpeg 卡住
fn spawn_stderr_reader(stderr: ChildStderr) -> JoinHandle<String> {
    thread::spawn(move || {
        BufReader::new(stderr)
            .lines()
            .map_while(std::result::Result::ok)
            .collect::<Vec<_>>()
            .join("\n")
    })
}

impl FrameWriter for FfmpegFrameWriter {
    fn append(&mut self, frame: &RgbImage) -> Result<()> {
        let (width, height) = frame.dimensions();
        if (width, height) != self.size {
            return Err(TimelapseError::FrameSizeMismatch {
                expected_width: self.size.0,
                expected_height: self.size.1,
                found_width: width,
                found_height: height,
            }
            .into());
        }

        let stdin = self.stdin.as_mut().context("ffmpeg input already closed")?;
        stdin
            .write_all(frame.as_raw())
            .context("ffmpeg stopped accepting frames")?;
        self.frames_written += 1;
        Ok(())
    }

    fn finalize(mut self) -> Result<()> {
        if let Some(mut stdin) = self.stdin.take() {
            stdin.flush().context("Failed to flush frames to ffmpeg")?;
        }

        let mut child = self.child.take().context("ffmpeg process already finished")?;
        let status = child.wait().context("Failed to wait for ffmpeg")?;
        let stderr = self
            .stderr_reader
            .take()
            .and_then(|reader| reader.join().ok())
            .unwrap_or_default();

        if !status.success() {
            bail!("ffmpeg encoding failed: {}", stderr.trim());
        }

        if !self.output.exists() {
            bail!("Video was not created: {}", self.output.display());
        }

        debug!(
            "ffmpeg 完成 {} 幀: {}",
            self.frames_written,
            self.output.display()
        );
        Ok(())
    }
}

impl Drop for FfmpegFrameWriter {
    fn drop(&mut self) {
        // 未 finalize 就被丟棄（中斷或錯誤），停止 ffmpeg
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            warn!("ffmpeg 未完成即終止: {}", self.output.display());
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn encoder() -> FfmpegEncoder {
        FfmpegEncoder::new(&EncoderSettings::default())
    }

    fn args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(OsStr::to_string_lossy)
            .map(|arg| arg.into_owned())
            .collect()
    }

    fn value_after(args: &[String], flag: &str) -> String {
        let index = args.iter().position(|arg| arg == flag).unwrap();
        args[index + 1].clone()
    }

    #[test]
    fn test_build_command() {
        let cmd = encoder().build_command(
            Path::new("/out/timelapse.mp4"),
            "mpeg4",
            FourCc::MP4V,
            24,
            (1920, 1080),
        );
        let args = args(&cmd);

        assert_eq!(cmd.get_program(), "ffmpeg");
        assert_eq!(value_after(&args, "-s"), "1920x1080");
        assert_eq!(value_after(&args, "-r"), "24");
        assert_eq!(value_after(&args, "-i"), "pipe:0");
        assert_eq!(value_after(&args, "-c:v"), "mpeg4");
        assert_eq!(value_after(&args, "-tag:v"), "mp4v");
        assert_eq!(value_after(&args, "-q:v"), "2");
        assert_eq!(args.last().unwrap(), "/out/timelapse.mp4");
    }

    #[test]
    fn test_odd_sizes_are_cropped_not_padded() {
        let cmd = encoder().build_command(
            Path::new("out.mp4"),
            "mpeg4",
            FourCc::MP4V,
            24,
            (641, 481),
        );
        let filter = value_after(&args(&cmd), "-vf");

        assert!(filter.starts_with("crop="));
        assert!(filter.contains("trunc(iw/2)*2"));
        assert!(!filter.contains("pad"));
        assert!(!filter.contains("ceil"));
    }

    #[test]
    fn test_codec_name() {
        assert_eq!(FfmpegEncoder::codec_name(FourCc::MP4V).unwrap(), "mpeg4");
        assert!(FfmpegEncoder::codec_name(FourCc(*b"avc1")).is_err());
    }

    #[test]
    fn test_custom_binary() {
        let settings = EncoderSettings {
            ffmpeg_binary: "/opt/ffmpeg/bin/ffmpeg".to_string(),
            quality: 99,
        };
        let cmd = FfmpegEncoder::new(&settings).build_command(
            Path::new("out.mp4"),
            "mpeg4",
            FourCc::MP4V,
            5,
            (3, 3),
        );
        assert_eq!(cmd.get_program(), "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(value_after(&args(&cmd), "-q:v"), "31");
    }

    #[test]
    fn test_open_missing_binary_fails() {
        let settings = EncoderSettings {
            ffmpeg_binary: "definitely-not-an-ffmpeg-binary".to_string(),
            quality: 2,
        };
        let result = FfmpegEncoder::new(&settings).open(
            Path::new("out.mp4"),
            FourCc::MP4V,
            24,
            (2, 2),
        );
        assert!(result.is_err());
    }
}
