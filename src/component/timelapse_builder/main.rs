use super::ffmpeg_writer::FfmpegEncoder;
use super::job::{
    RunOutcome, TimelapseJob, TimelapsePlan, is_confirmed, plan_timelapse, run_plan,
};
use crate::config::load::SETTINGS_FILE;
use crate::config::{Config, add_recent_path, save_settings};
use crate::error::TimelapseError;
use crate::signal::ShutdownSignal;
use crate::tools::{ImageFileDecoder, TerminalProgress, resolve_source_folder};
use anyhow::Result;
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::warn;
use std::path::Path;
use std::sync::Arc;

/// 互動式前端：詢問參數、顯示預覽、確認後建立影片
pub struct TimelapseBuilder {
    config: Config,
    shutdown_signal: Arc<ShutdownSignal>,
    framerate: Option<u32>,
    skip_frames: Option<usize>,
}

impl TimelapseBuilder {
    pub const fn new(
        config: Config,
        shutdown_signal: Arc<ShutdownSignal>,
        framerate: Option<u32>,
        skip_frames: Option<usize>,
    ) -> Self {
        Self {
            config,
            shutdown_signal,
            framerate,
            skip_frames,
        }
    }

    pub fn run(&mut self) -> Result<RunOutcome> {
        println!("{}", style("=== Timelapse Builder ===").cyan().bold());

        let framerate = match self.framerate {
            Some(framerate) => framerate,
            None => self.prompt_framerate()?,
        };
        let skip_frames = match self.skip_frames {
            Some(skip_frames) => skip_frames,
            None => self.prompt_skip_frames()?,
        };

        let Some(input_path) = self.prompt_input_path()? else {
            println!("{}", style("Operation canceled.").yellow());
            return Ok(RunOutcome::Cancelled);
        };
        let directory = resolve_source_folder(&input_path)?;

        let job = TimelapseJob::new(&directory, framerate, skip_frames, ".")?;
        let plan = plan_timelapse(job);
        println!("Found {} images.", plan.found_count);

        if plan.selection.is_empty() {
            return Err(TimelapseError::EmptySelection.into());
        }

        self.print_preview(&plan);
        let confirmed = self.confirm()?;
        if !confirmed {
            println!("{}", style("Operation canceled.").yellow());
        }

        let progress = TerminalProgress::new();
        let outcome = {
            let _graceful = self.shutdown_signal.graceful();
            run_plan(
                &plan,
                confirmed,
                &ImageFileDecoder,
                &FfmpegEncoder::new(&self.config.settings.encoder),
                &progress,
                self.shutdown_signal.flag(),
            )?
        };

        if let RunOutcome::Created { output, .. } = &outcome {
            println!(
                "{} {}",
                style("Timelapse video created successfully.").green().bold(),
                style(output.display()).dim()
            );
            self.remember_path(&directory);
        }

        Ok(outcome)
    }

    fn prompt_framerate(&self) -> Result<u32> {
        let framerate = Input::<u32>::new()
            .with_prompt("Enter the framerate for the timelapse video (frames per second)")
            .validate_with(|value: &u32| -> Result<(), &str> {
                if *value == 0 {
                    Err("Framerate must be at least 1")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(framerate)
    }

    fn prompt_skip_frames(&self) -> Result<usize> {
        let skip_frames = Input::<usize>::new()
            .with_prompt("Enter the number of images to skip between each frame")
            .validate_with(|value: &usize| -> Result<(), &str> {
                if *value == 0 {
                    Err("Skip frames must be at least 1")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;
        Ok(skip_frames)
    }

    /// 有歷史路徑時提供選單，ESC 取消
    fn prompt_input_path(&self) -> Result<Option<String>> {
        let recent_paths = &self.config.settings.recent_paths;

        if recent_paths.is_empty() {
            return Ok(Some(Self::prompt_new_path()?));
        }

        let mut options: Vec<String> = recent_paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let indicator = if Path::new(p).is_dir() { "✓" } else { "✗" };
                format!("{} [{}] {}", i + 1, indicator, p)
            })
            .collect();
        options.push("Enter a new path...".to_string());

        println!("{}", style("(press ESC to cancel)").dim());

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Choose the folder containing images")
            .items(&options)
            .default(0)
            .interact_opt()?;

        match selection {
            None => Ok(None),
            Some(idx) if idx < recent_paths.len() => Ok(Some(recent_paths[idx].clone())),
            Some(_) => Ok(Some(Self::prompt_new_path()?)),
        }
    }

    fn prompt_new_path() -> Result<String> {
        let path: String = Input::new()
            .with_prompt("Enter the path to the folder containing images")
            .interact_text()?;
        Ok(path)
    }

    fn print_preview(&self, plan: &TimelapsePlan) {
        println!(
            "The generated video will have {} frames and a runtime of {:.2} seconds.",
            style(plan.frame_count()).cyan(),
            plan.runtime_seconds()
        );
    }

    fn confirm(&self) -> Result<bool> {
        let answer: String = Input::new()
            .with_prompt("Do you want to proceed? (yes/no)")
            .allow_empty(true)
            .interact_text()?;
        Ok(is_confirmed(&answer))
    }

    /// 記錄最近使用的資料夾；寫入失敗不影響結果
    fn remember_path(&mut self, path: &Path) {
        add_recent_path(&mut self.config.settings, path);
        if let Err(e) = save_settings(&self.config.settings, Path::new(SETTINGS_FILE)) {
            warn!("無法儲存設定: {e:#}");
        }
    }
}
