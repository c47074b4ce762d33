// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Terminal progress spinner shown while a blocking stage runs.

use std::io::{IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const FRAME_INTERVAL: Duration = Duration::from_millis(300);

/// Animates `message` on stderr until stopped.
///
/// Animation only runs when stderr is a terminal; otherwise the final
/// status line is all that is printed.
pub struct Spinner {
    message: String,
    stop: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start spinning. Must be called from within a tokio runtime.
    pub fn start(message: impl Into<String>) -> Self {
        Self::with_animation(message, std::io::stderr().is_terminal())
    }

    fn with_animation(message: impl Into<String>, animate: bool) -> Self {
        let message = message.into();
        let stop = Arc::new(AtomicBool::new(false));

        let task = animate.then(|| {
            let stop = Arc::clone(&stop);
            let label = message.clone();
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(FRAME_INTERVAL);
                for frame in FRAMES.iter().cycle() {
                    interval.tick().await;
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    let mut err = std::io::stderr().lock();
                    let _ = write!(err, "\r{label} {frame}");
                    let _ = err.flush();
                }
            })
        });

        Self {
            message,
            stop,
            task,
        }
    }

    /// Stop the animation and print `message` followed by `status`.
    pub async fn stop(mut self, status: &str) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        eprintln!("\r{} {status}", self.message);
    }
}
