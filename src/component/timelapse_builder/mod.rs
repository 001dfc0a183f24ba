//! 縮時影片元件
//!
//! 掃描圖片資料夾、依間隔抽樣，透過 ffmpeg 編碼成 mp4

mod assembler;
mod ffmpeg_writer;
mod job;
mod main;

pub use assembler::{
    Assembler, FourCc, FrameDecoder, FrameWriter, PROGRESS_LABEL, ProgressReporter, VideoEncoder,
};
pub use ffmpeg_writer::{FfmpegEncoder, FfmpegFrameWriter};
pub use job::{
    RunOutcome, TimelapseJob, TimelapsePlan, is_confirmed, modified_date, output_file_name,
    plan_timelapse, run_plan,
};
pub use main::TimelapseBuilder;
