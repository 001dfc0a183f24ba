//! Ctrl-C 處理
//!
//! 只有寫入影片期間會攔截中斷、在幀之間停止；其餘時間（掃描、提問）
//! 與第二次 Ctrl-C 都直接結束程式。

use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 依慣例 128 + SIGINT
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptAction {
    /// 設定旗標，讓寫入迴圈在下一幀前停止
    StopAfterFrame,
    Exit,
}

#[derive(Debug, Default)]
pub struct ShutdownSignal {
    requested: AtomicBool,
    graceful: AtomicBool,
}

impl ShutdownSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 寫入迴圈檢查的旗標
    #[must_use]
    pub fn flag(&self) -> &AtomicBool {
        &self.requested
    }

    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// 在回傳的 guard 存活期間，第一次 Ctrl-C 只會要求停止
    #[must_use]
    pub fn graceful(&self) -> GracefulGuard<'_> {
        self.graceful.store(true, Ordering::SeqCst);
        GracefulGuard { signal: self }
    }

    pub fn on_interrupt(&self) -> InterruptAction {
        if self.graceful.load(Ordering::SeqCst) && !self.requested.swap(true, Ordering::SeqCst) {
            InterruptAction::StopAfterFrame
        } else {
            InterruptAction::Exit
        }
    }
}

pub struct GracefulGuard<'a> {
    signal: &'a ShutdownSignal,
}

impl Drop for GracefulGuard<'_> {
    fn drop(&mut self) {
        self.signal.graceful.store(false, Ordering::SeqCst);
    }
}

#[must_use]
pub fn setup_shutdown_signal() -> Arc<ShutdownSignal> {
    let shutdown_signal = Arc::new(ShutdownSignal::new());
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || match signal_clone.on_interrupt() {
        InterruptAction::StopAfterFrame => {
            eprintln!("\nInterrupt received, stopping after the current frame...");
        }
        InterruptAction::Exit => {
            warn!("收到中斷信號，直接結束");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    })
    .expect("Failed to install Ctrl-C handler");

    shutdown_signal
}
