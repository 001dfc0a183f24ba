//! 縮時影片的參數、預覽計畫與執行
//!
//! 這裡不做任何互動；資料夾與確認結果都由呼叫端傳入。

use super::assembler::{Assembler, FrameDecoder, ProgressReporter, VideoEncoder};
use crate::error::TimelapseError;
use crate::tools::{calculate_runtime, scan_image_files, select_frames};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelapseJob {
    pub source_folder: PathBuf,
    pub framerate: u32,
    pub skip_frames: usize,
    pub output_dir: PathBuf,
}

impl TimelapseJob {
    pub fn new(
        source_folder: impl Into<PathBuf>,
        framerate: u32,
        skip_frames: usize,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, TimelapseError> {
        if framerate == 0 {
            return Err(TimelapseError::InvalidFramerate);
        }
        if skip_frames == 0 {
            return Err(TimelapseError::InvalidSkipFrames);
        }
        Ok(Self {
            source_folder: source_folder.into(),
            framerate,
            skip_frames,
            output_dir: output_dir.into(),
        })
    }
}

/// 掃描與抽樣後、確認前的結果
#[derive(Debug, Clone)]
pub struct TimelapsePlan {
    pub job: TimelapseJob,
    pub found_count: usize,
    pub selection: Vec<PathBuf>,
}

impl TimelapsePlan {
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.selection.len()
    }

    #[must_use]
    pub fn runtime_seconds(&self) -> f64 {
        calculate_runtime(self.frame_count(), self.job.framerate)
    }

    /// 輸出檔路徑，日期取自第一張選取圖片的修改時間
    pub fn output_path(&self) -> Result<PathBuf> {
        let first = self
            .selection
            .first()
            .ok_or(TimelapseError::EmptySelection)?;
        let date = modified_date(first)?;
        Ok(self.job.output_dir.join(output_file_name(
            date,
            self.job.framerate,
            self.job.skip_frames,
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Created { output: PathBuf, frames: usize },
    Cancelled,
}

/// 掃描資料夾並套用抽樣間隔
#[must_use]
pub fn plan_timelapse(job: TimelapseJob) -> TimelapsePlan {
    let images = scan_image_files(&job.source_folder);
    let found_count = images.len();
    let selection = select_frames(&images, job.skip_frames);
    info!(
        "{}: 找到 {found_count} 張圖片，每 {} 張取一張，共 {} 幀",
        job.source_folder.display(),
        job.skip_frames,
        selection.len()
    );

    TimelapsePlan {
        job,
        found_count,
        selection,
    }
}

/// 依確認結果執行計畫
///
/// 未確認時不讀取任何圖片、也不建立檔案。
pub fn run_plan<D, E, P>(
    plan: &TimelapsePlan,
    confirmed: bool,
    decoder: &D,
    encoder: &E,
    progress: &P,
    shutdown_signal: &AtomicBool,
) -> Result<RunOutcome>
where
    D: FrameDecoder,
    E: VideoEncoder,
    P: ProgressReporter,
{
    if !confirmed {
        info!("使用者取消建立縮時影片");
        return Ok(RunOutcome::Cancelled);
    }
    if shutdown_signal.load(Ordering::SeqCst) {
        return Err(TimelapseError::Interrupted.into());
    }

    let output = plan.output_path()?;
    let frames = Assembler::new(decoder, encoder, progress, shutdown_signal).assemble(
        &plan.selection,
        &output,
        plan.job.framerate,
    )?;

    info!("縮時影片已建立: {} ({frames} 幀)", output.display());
    Ok(RunOutcome::Created { output, frames })
}

/// 以 y / Y 開頭的回答視為同意
#[must_use]
pub fn is_confirmed(answer: &str) -> bool {
    answer.starts_with(['y', 'Y'])
}

#[must_use]
pub fn output_file_name(date: NaiveDate, framerate: u32, skip_frames: usize) -> String {
    format!(
        "timelapse_{}_fr{framerate}_skip{skip_frames}.mp4",
        date.format("%Y-%m-%d")
    )
}

/// 檔案修改時間換算成本地日期
pub fn modified_date(path: &Path) -> Result<NaiveDate> {
    let modified = fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .with_context(|| format!("Failed to read modification time of {}", path.display()))?;
    Ok(DateTime::<Local>::from(modified).date_naive())
}
