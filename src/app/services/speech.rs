use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::app::infrastructure::config::SpeechConfig;
use crate::app::infrastructure::error::{AppError, Result};

/// Text-to-speech output with at most one utterance at a time.
pub trait SpeechEngine {
    /// Start speaking `text`, replacing any current utterance.
    fn speak(&mut self, text: &str) -> Result<()>;

    fn cancel(&mut self);

    /// True once the current utterance has ended (or none was started).
    fn is_finished(&mut self) -> bool;
}

/// Pipes the text to an external speech program on stdin.
pub struct CommandSpeech {
    command: String,
    args: Vec<String>,
    child: Option<Child>,
}

impl CommandSpeech {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            child: None,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }
}

impl SpeechEngine for CommandSpeech {
    fn speak(&mut self, text: &str) -> Result<()> {
        self.cancel();

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AppError::Speech(format!("Failed to start {}: {}", self.command, e)))?;

        // Long texts would fill the pipe before the program starts reading
        if let Some(mut stdin) = child.stdin.take() {
            let text = text.to_string();
            thread::spawn(move || {
                if let Err(e) = stdin.write_all(text.as_bytes()) {
                    debug!("Speech input closed early: {}", e);
                }
            });
        }

        debug!("Speaking {} characters with {}", text.len(), self.command);
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                debug!("Speech process already gone: {}", e);
            }
            if let Err(e) = child.wait() {
                warn!("Failed to reap speech process: {}", e);
            }
        }
    }

    fn is_finished(&mut self) -> bool {
        let Some(child) = self.child.as_mut() else {
            return true;
        };
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!("Speech ended with {}", status);
                self.child = None;
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Lost track of speech process: {}", e);
                self.child = None;
                true
            }
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}
