use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::mpsc;
use tracing::trace;

use crate::error::NarrationError;

/// The speech model returns signed 16-bit little-endian PCM at this rate.
pub const TTS_SAMPLE_RATE: u32 = 24_000;
pub const TTS_CHANNELS: u16 = 1;

/// Raw synthesized audio, ready to hand to whatever plays it.
#[derive(Clone, PartialEq, Eq)]
pub struct SpeechClip {
    pcm: Vec<u8>,
    sample_rate: u32,
    channels: u16,
}

impl SpeechClip {
    #[must_use]
    pub fn pcm16(pcm: Vec<u8>, sample_rate: u32, channels: u16) -> Self {
        Self {
            pcm,
            sample_rate,
            channels: channels.max(1),
        }
    }

    /// Decode a base64 PCM payload as returned by the speech model.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError::Decode` for invalid base64.
    pub fn from_base64(data: &str) -> Result<Self, NarrationError> {
        let pcm = STANDARD.decode(data.trim())?;
        Ok(Self::pcm16(pcm, TTS_SAMPLE_RATE, TTS_CHANNELS))
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }

    #[must_use]
    pub fn frames(&self) -> usize {
        self.pcm.len() / 2 / usize::from(self.channels)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames() == 0
    }

    /// Playback length derived from the frame count.
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        #[allow(clippy::cast_precision_loss)]
        let secs = self.frames() as f64 / f64::from(self.sample_rate);
        Duration::from_secs_f64(secs)
    }

    /// Re-encode the PCM bytes for transport into a webview.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.pcm)
    }
}

impl std::fmt::Debug for SpeechClip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechClip")
            .field("bytes", &self.pcm.len())
            .field("sample_rate", &self.sample_rate)
            .field("channels", &self.channels)
            .finish()
    }
}

/// Destination for synthesized audio.
pub trait PlaybackSink: Send + Sync {
    /// Queue a clip for playback.
    ///
    /// # Errors
    ///
    /// Returns `NarrationError::PlaybackClosed` when nothing is listening anymore.
    fn play(&self, clip: SpeechClip) -> Result<(), NarrationError>;

    /// Drop queued clips and silence whatever is already playing.
    fn stop(&self) {}
}

/// What the audio front end should do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Playback {
    Clip(SpeechClip),
    /// Silence everything started so far.
    Stop,
}

#[derive(Debug)]
enum Message {
    Clip { epoch: u64, clip: SpeechClip },
    Stop,
}

/// Forwards clips to a [`SpeechReceiver`] owned by the audio front end.
///
/// Every [`stop`](PlaybackSink::stop) starts a new epoch; clips queued in an older epoch
/// are discarded on the receiving side.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Message>,
    epoch: Arc<AtomicU64>,
}

impl ChannelSink {
    #[must_use]
    pub fn new() -> (Self, SpeechReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let epoch = Arc::new(AtomicU64::new(0));
        let receiver = SpeechReceiver {
            rx,
            epoch: Arc::clone(&epoch),
        };
        (Self { tx, epoch }, receiver)
    }
}

impl PlaybackSink for ChannelSink {
    fn play(&self, clip: SpeechClip) -> Result<(), NarrationError> {
        let epoch = self.epoch.load(Ordering::Acquire);
        self.tx
            .send(Message::Clip { epoch, clip })
            .map_err(|_| NarrationError::PlaybackClosed)
    }

    fn stop(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        if self.tx.send(Message::Stop).is_err() {
            trace!("playback receiver gone, stop ignored");
        }
    }
}

/// Receiving end of a [`ChannelSink`].
#[derive(Debug)]
pub struct SpeechReceiver {
    rx: mpsc::UnboundedReceiver<Message>,
    epoch: Arc<AtomicU64>,
}

impl SpeechReceiver {
    /// Next playback command; `None` once every sink is gone.
    pub async fn recv(&mut self) -> Option<Playback> {
        loop {
            let message = self.rx.recv().await?;
            if let Some(playback) = self.accept(message) {
                return Some(playback);
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<Playback> {
        loop {
            let message = self.rx.try_recv().ok()?;
            if let Some(playback) = self.accept(message) {
                return Some(playback);
            }
        }
    }

    fn accept(&self, message: Message) -> Option<Playback> {
        match message {
            Message::Clip { epoch, clip } => {
                if epoch == self.epoch.load(Ordering::Acquire) {
                    Some(Playback::Clip(clip))
                } else {
                    trace!(?clip, "stale clip dropped");
                    None
                }
            }
            Message::Stop => Some(Playback::Stop),
        }
    }
}
