//! Test doubles: an uploader that follows a fixed script of outcomes and a
//! sleeper that records pauses instead of blocking.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use uploadr_core::retry::Sleeper;
use uploadr_core::{AbortToken, UploadError, Uploader};

/// Counters shared between a `ScriptedUploader` and the test body.
#[derive(Debug, Default)]
pub struct Calls {
    pub uploads: Vec<String>,
    pub closes: u32,
}

/// Returns `Ok` for `true` entries and a rejection for `false` entries, in order.
/// Once the script is empty every further attempt fails.
pub struct ScriptedUploader {
    script: VecDeque<bool>,
    calls: Arc<Mutex<Calls>>,
    close_error: Option<String>,
}

impl ScriptedUploader {
    pub fn new(script: &[bool]) -> (Self, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let up = Self {
            script: script.iter().copied().collect(),
            calls: Arc::clone(&calls),
            close_error: None,
        };
        (up, calls)
    }

    pub fn always_failing() -> (Self, Arc<Mutex<Calls>>) {
        Self::new(&[])
    }

    /// Make `close` fail with the given message.
    pub fn failing_close(mut self, msg: &str) -> Self {
        self.close_error = Some(msg.to_string());
        self
    }
}

impl Uploader for ScriptedUploader {
    fn upload_file(&mut self, name: &str) -> Result<(), UploadError> {
        let mut calls = self.calls.lock().unwrap();
        calls.uploads.push(name.to_string());
        let attempt = calls.uploads.len();
        match self.script.pop_front() {
            Some(true) => Ok(()),
            _ => Err(UploadError::Rejected(format!("scripted failure #{attempt}"))),
        }
    }

    fn close(&mut self) -> Result<(), UploadError> {
        self.calls.lock().unwrap().closes += 1;
        match &self.close_error {
            Some(msg) => Err(UploadError::Rejected(msg.clone())),
            None => Ok(()),
        }
    }
}

/// Records every requested pause.
#[derive(Debug, Default, Clone)]
pub struct RecordingSleeper(pub Arc<Mutex<Vec<Duration>>>);

impl RecordingSleeper {
    pub fn pauses(&self) -> Vec<Duration> {
        self.0.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration, _abort: Option<&AbortToken>) {
        self.0.lock().unwrap().push(duration);
    }
}
