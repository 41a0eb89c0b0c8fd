//! Desktop output integration
//!
//! Owns the rodio output stream on a dedicated thread and exposes it as an
//! [`AudioOutput`] the playback controller can own.

use crate::error::{AudioError, Result};
use crate::source::SourceLoader;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use soundboard_playback::{AudioOutput, PlaybackError};
use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// How often the audio thread refreshes the status snapshot
const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Commands that may wait while the audio thread is busy loading
const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Commands sent to the audio thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputCommand {
    /// Load `url` and play it, replacing the current sound
    Play {
        url: String,
        /// Load request this command belongs to
        generation: u64,
    },

    /// Stop and unload the current sound
    Stop,

    /// Exit the audio thread
    Shutdown,
}

/// Snapshot of the audio thread's state, shared with the handle
#[derive(Debug, Default)]
struct OutputStatus {
    /// Bumped on every play/stop; work for an older generation is dropped
    generation: u64,
    source: Option<String>,
    position: Duration,
    duration: Option<Duration>,
    finished: bool,
    /// Load failure not yet taken by the controller
    error: Option<String>,
}

impl OutputStatus {
    /// Forget the previous sound; returns the generation of the next one
    fn reset(&mut self, source: Option<String>) -> u64 {
        self.generation += 1;
        self.source = source;
        self.position = Duration::ZERO;
        self.duration = None;
        self.finished = false;
        self.error = None;
        self.generation
    }
}

fn lock(status: &Mutex<OutputStatus>) -> MutexGuard<'_, OutputStatus> {
    status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// rodio-backed audio output
///
/// `play` returns as soon as the command is queued; loading happens on the audio
/// thread. A sound that fails to load surfaces through `take_error`.
pub struct DesktopOutput {
    command_tx: Sender<OutputCommand>,
    status: Arc<Mutex<OutputStatus>>,
    thread: Option<JoinHandle<()>>,
}

impl DesktopOutput {
    /// Open the default output device
    ///
    /// # Returns
    /// * `Ok(output)` - Device opened, audio thread running
    /// * `Err(_)` - No usable output device
    pub fn new() -> Result<Self> {
        let (command_tx, command_rx) = bounded(COMMAND_QUEUE_CAPACITY);
        let (ready_tx, ready_rx) = bounded(1);
        let status = Arc::new(Mutex::new(OutputStatus::default()));

        let thread_status = Arc::clone(&status);
        let thread = thread::Builder::new()
            .name("soundboard-audio".to_string())
            .spawn(move || audio_thread(&command_rx, &thread_status, &ready_tx))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                info!("Audio output ready");
                Ok(Self {
                    command_tx,
                    status,
                    thread: Some(thread),
                })
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(AudioError::DeviceError(
                    "Audio thread exited during startup".to_string(),
                ))
            }
        }
    }

    /// Queue a command without blocking the caller
    fn send(&self, command: OutputCommand) -> soundboard_playback::Result<()> {
        self.command_tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => {
                PlaybackError::OutputUnavailable("Audio thread is busy".to_string())
            }
            TrySendError::Disconnected(_) => {
                PlaybackError::OutputUnavailable("Audio thread is not running".to_string())
            }
        })
    }
}

impl AudioOutput for DesktopOutput {
    fn play(&mut self, url: &str) -> soundboard_playback::Result<()> {
        let generation = lock(&self.status).reset(Some(url.to_string()));

        self.send(OutputCommand::Play {
            url: url.to_string(),
            generation,
        })
    }

    fn stop(&mut self) {
        lock(&self.status).reset(None);

        if let Err(e) = self.send(OutputCommand::Stop) {
            warn!(error = %e, "Stop not delivered");
        }
    }

    fn source(&self) -> Option<String> {
        lock(&self.status).source.clone()
    }

    fn position(&self) -> Duration {
        lock(&self.status).position
    }

    fn duration(&self) -> Option<Duration> {
        lock(&self.status).duration
    }

    fn is_finished(&self) -> bool {
        lock(&self.status).finished
    }

    fn take_error(&mut self) -> Option<String> {
        lock(&self.status).error.take()
    }
}

impl Drop for DesktopOutput {
    fn drop(&mut self) {
        let _ = self.command_tx.try_send(OutputCommand::Shutdown);
        let Some(thread) = self.thread.take() else {
            return;
        };

        // A thread stuck in a download exits on its own once the fetch returns;
        // dropping the sender disconnects its queue.
        if thread.is_finished() {
            if thread.join().is_err() {
                error!("Audio thread panicked");
            }
        } else {
            debug!("Detaching busy audio thread");
        }
    }
}

/// Audio thread body: owns the device stream and at most one sink
fn audio_thread(
    command_rx: &Receiver<OutputCommand>,
    status: &Mutex<OutputStatus>,
    ready_tx: &Sender<Result<()>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = ready_tx.send(Err(AudioError::DeviceError(e.to_string())));
            return;
        }
    };

    let loader = match SourceLoader::new() {
        Ok(loader) => loader,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };
    let _ = ready_tx.send(Ok(()));

    let mut sink: Option<Sink> = None;
    let mut sink_generation = 0;

    loop {
        match command_rx.recv_timeout(STATUS_POLL_INTERVAL) {
            Ok(OutputCommand::Play { url, generation }) => {
                // Dropping the old sink silences it before the new one starts
                if let Some(old) = sink.take() {
                    old.stop();
                }
                if lock(status).generation != generation {
                    debug!(url = %url, "Skipping superseded load");
                    continue;
                }

                match open_sink(&handle, &loader, &url) {
                    Ok((new_sink, duration)) => {
                        let mut current = lock(status);
                        if current.generation == generation {
                            current.duration = duration;
                            sink = Some(new_sink);
                            sink_generation = generation;
                            debug!(url = %url, duration = ?duration, "Sound loaded");
                        } else {
                            new_sink.stop();
                        }
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "Failed to load sound");
                        let mut current = lock(status);
                        if current.generation == generation {
                            current.error = Some(e.to_string());
                        }
                    }
                }
            }
            Ok(OutputCommand::Stop) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
            }
            Ok(OutputCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        if let Some(active) = &sink {
            let mut current = lock(status);
            if current.generation == sink_generation {
                current.position = active.get_pos();
                if active.empty() {
                    current.finished = true;
                }
            }
        }
    }

    debug!("Audio thread exiting");
}

/// Fetch, decode and start `url` on a fresh sink
fn open_sink(
    handle: &OutputStreamHandle,
    loader: &SourceLoader,
    url: &str,
) -> Result<(Sink, Option<Duration>)> {
    let bytes = loader.fetch(url)?;
    let decoder =
        Decoder::new(Cursor::new(bytes)).map_err(|e| AudioError::UnsupportedFormat(e.to_string()))?;
    let duration = decoder.total_duration();

    let sink = Sink::try_new(handle).map_err(|e| AudioError::PlaybackError(e.to_string()))?;
    sink.append(decoder);
    sink.play();

    Ok((sink, duration))
}
