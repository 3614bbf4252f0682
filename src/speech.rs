use std::process::Command;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};

use anyhow::Context;

/// Something that can turn text into audible speech.
/// Calls block until the phrase has been spoken.
pub trait SpeechEngine: Send {
    fn say(&mut self, text: &str) -> anyhow::Result<()>;
}

/// Speaks through the platform's speech command
/// (`say` on macOS, System.Speech on Windows, `espeak-ng`/`espeak` elsewhere)
pub struct CommandSpeech {
    /// Words per minute
    pub rate: u32,
}

impl CommandSpeech {
    pub fn new(rate: u32) -> Self {
        Self { rate }
    }

    #[cfg(target_os = "macos")]
    fn commands(&self, text: &str) -> Vec<Command> {
        let mut say = Command::new("say");
        say.arg("-r").arg(self.rate.to_string()).arg(text);
        vec![say]
    }

    #[cfg(target_os = "windows")]
    fn commands(&self, text: &str) -> Vec<Command> {
        // SpeechSynthesizer.Rate is -10..10 with 0 at roughly 180 wpm
        let rate = ((self.rate as i32 - 180) / 20).clamp(-10, 10);
        let script = format!(
            "Add-Type -AssemblyName System.Speech; \
             $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
             $s.Rate = {}; $s.Speak('{}')",
            rate,
            text.replace('\'', "''")
        );
        let mut powershell = Command::new("powershell");
        powershell.args(["-NoProfile", "-Command", &script]);
        vec![powershell]
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn commands(&self, text: &str) -> Vec<Command> {
        ["espeak-ng", "espeak"]
            .iter()
            .map(|program| {
                let mut cmd = Command::new(program);
                cmd.arg("-s").arg(self.rate.to_string()).arg(text);
                cmd
            })
            .collect()
    }
}

impl SpeechEngine for CommandSpeech {
    fn say(&mut self, text: &str) -> anyhow::Result<()> {
        let mut last_error = None;
        for mut cmd in self.commands(text) {
            match cmd.status() {
                Ok(status) if status.success() => return Ok(()),
                Ok(status) => {
                    last_error = Some(anyhow::anyhow!("{:?} exited with {}", cmd.get_program(), status))
                }
                Err(e) => {
                    last_error = Some(anyhow::Error::new(e).context(format!(
                        "Failed to run {:?}",
                        cmd.get_program()
                    )))
                }
            }
        }
        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("No speech command available")))
    }
}

/// Engine used when speech is muted; phrases only go to the log
pub struct MutedSpeech;

impl SpeechEngine for MutedSpeech {
    fn say(&mut self, text: &str) -> anyhow::Result<()> {
        log::info!("(muted) {}", text);
        Ok(())
    }
}

/// Cheap, cloneable handle for queueing phrases on the speech worker.
/// Never blocks: when the queue is full the phrase is dropped.
#[derive(Debug, Clone)]
pub struct SpeechNotifier {
    sender: SyncSender<String>,
}

/// The dedicated speech thread. It exits once every notifier is dropped.
#[derive(Debug)]
pub struct SpeechWorker {
    handle: JoinHandle<()>,
}

impl SpeechNotifier {
    /// Start the worker thread with a queue of `capacity` pending phrases
    pub fn spawn(
        engine: Box<dyn SpeechEngine>,
        capacity: usize,
    ) -> anyhow::Result<(SpeechNotifier, SpeechWorker)> {
        let (sender, receiver) = mpsc::sync_channel(capacity.max(1));
        let handle = thread::Builder::new()
            .name("speech".to_string())
            .spawn(move || run_worker(engine, receiver))
            .context("Failed to start speech worker")?;

        Ok((SpeechNotifier { sender }, SpeechWorker { handle }))
    }

    /// Queue a phrase. Returns false if it was dropped.
    pub fn speak(&self, text: impl Into<String>) -> bool {
        match self.sender.try_send(text.into()) {
            Ok(()) => true,
            Err(TrySendError::Full(text)) => {
                log::debug!("Speech queue full, dropping {:?}", text);
                false
            }
            Err(TrySendError::Disconnected(text)) => {
                log::warn!("Speech worker stopped, dropping {:?}", text);
                false
            }
        }
    }
}

impl SpeechWorker {
    /// Wait for the queue to drain. Only returns after all notifiers are dropped.
    pub fn join(self) {
        if self.handle.join().is_err() {
            log::error!("Speech worker panicked");
        }
    }
}

fn run_worker(mut engine: Box<dyn SpeechEngine>, receiver: Receiver<String>) {
    while let Ok(text) = receiver.recv() {
        if let Err(e) = engine.say(&text) {
            log::warn!("Speech failed for {:?}: {:#}", text, e);
        }
    }
    log::debug!("Speech worker finished");
}
