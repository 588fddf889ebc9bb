//! The process-wide audio output: a mixer clocked in frames, fed by scheduled phoneme voices.
//!
//! ```text
//!  Synthesizer::speak ──Schedule──► crossbeam queue ──► Mixer ──blocks──► AudioSink
//!                                                         │
//!  PlaybackHandle::finished ◄──── watch<frame clock> ◄────┘
//! ```
//!
//! An [`OutputDevice`] starts suspended. [`OutputDevice::resume`] starts the sink and,
//! in [`ClockMode::RealTime`], a mixer thread paced to the sample clock. In
//! [`ClockMode::Manual`] the clock only moves through [`OutputDevice::advance`].

use crate::{
    config::Config,
    error::{Error, Result},
    synthesis::PhonemeVoice,
};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};
use tokio::sync::{Mutex as AsyncMutex, oneshot, watch};
use tracing::{debug, info, warn};

/// Where mixed blocks go.
pub trait AudioSink: Send {
    /// Called once from the mixer before the first block.
    ///
    /// # Errors
    ///
    /// A message describing why the output cannot start.
    fn start(&mut self, sample_rate: u32) -> std::result::Result<(), String>;

    /// Consumes one block of mono samples in `-1.0 ..= 1.0`.
    ///
    /// # Errors
    ///
    /// A message describing why the block was not accepted. The mixer stops on error.
    fn write(&mut self, block: &[f32]) -> std::result::Result<(), String>;

    fn stop(&mut self) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn start(&mut self, _sample_rate: u32) -> std::result::Result<(), String> {
        Ok(())
    }

    fn write(&mut self, _block: &[f32]) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// Appends every block to a shared buffer.
#[derive(Debug, Default, Clone)]
pub struct CaptureSink {
    samples: Arc<Mutex<Vec<f32>>>,
}

impl CaptureSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The buffer the sink writes into.
    #[must_use]
    pub fn buffer(&self) -> Arc<Mutex<Vec<f32>>> {
        Arc::clone(&self.samples)
    }

    #[must_use]
    pub fn samples(&self) -> Vec<f32> {
        self.samples.lock().clone()
    }
}

impl AudioSink for CaptureSink {
    fn start(&mut self, _sample_rate: u32) -> std::result::Result<(), String> {
        Ok(())
    }

    fn write(&mut self, block: &[f32]) -> std::result::Result<(), String> {
        self.samples.lock().extend_from_slice(block);
        Ok(())
    }
}

#[cfg(feature = "playback")]
pub use hardware::CpalSink;

#[cfg(feature = "playback")]
mod hardware {
    use super::AudioSink;
    use cpal::{
        FromSample, SizedSample,
        traits::{DeviceTrait, HostTrait, StreamTrait},
    };
    use parking_lot::Mutex;
    use std::{
        collections::VecDeque,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        thread::{self, JoinHandle},
        time::Duration,
    };
    use tracing::{info, warn};

    /// Most samples buffered ahead of the hardware, in seconds.
    const MAX_QUEUED_SECS: f64 = 0.25;

    /// The default output device of the default host.
    ///
    /// `cpal::Stream` is not `Send` everywhere, so a dedicated thread owns it and the
    /// data callback drains a shared queue filled by [`AudioSink::write`].
    #[derive(Default)]
    pub struct CpalSink {
        queue: Arc<Mutex<VecDeque<f32>>>,
        running: Arc<AtomicBool>,
        thread: Option<JoinHandle<()>>,
        max_queued: usize,
    }

    impl CpalSink {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    fn make_stream<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        queue: Arc<Mutex<VecDeque<f32>>>,
    ) -> Result<cpal::Stream, String>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = usize::from(config.channels);
        let err_fn = |err| warn!("output stream error: {err}");
        device
            .build_output_stream(
                config,
                move |output: &mut [T], _info: &cpal::OutputCallbackInfo| {
                    let mut queue = queue.lock();
                    for frame in output.chunks_mut(channels) {
                        let sample = T::from_sample(queue.pop_front().unwrap_or(0.0));
                        frame.fill(sample);
                    }
                },
                err_fn,
                None,
            )
            .map_err(|e| e.to_string())
    }

    fn open(sample_rate: u32, queue: Arc<Mutex<VecDeque<f32>>>) -> Result<cpal::Stream, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| "no audio output device found".to_owned())?;
        let supported = device.default_output_config().map_err(|e| e.to_string())?;
        let mut config: cpal::StreamConfig = supported.config();
        config.sample_rate = cpal::SampleRate(sample_rate);
        info!(sample_rate, channels = config.channels, "opening audio output");
        let stream = match supported.sample_format() {
            cpal::SampleFormat::I16 => make_stream::<i16>(&device, &config, queue)?,
            cpal::SampleFormat::I32 => make_stream::<i32>(&device, &config, queue)?,
            cpal::SampleFormat::F32 => make_stream::<f32>(&device, &config, queue)?,
            other => return Err(format!("unsupported sample format {other:?}")),
        };
        stream.play().map_err(|e| e.to_string())?;
        Ok(stream)
    }

    impl AudioSink for CpalSink {
        fn start(&mut self, sample_rate: u32) -> Result<(), String> {
            self.max_queued = (f64::from(sample_rate) * MAX_QUEUED_SECS) as usize;
            self.running.store(true, Ordering::SeqCst);
            let queue = Arc::clone(&self.queue);
            let running = Arc::clone(&self.running);
            let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);
            let thread = thread::Builder::new()
                .name("phonosynth-cpal".into())
                .spawn(move || {
                    let stream = match open(sample_rate, queue) {
                        Ok(stream) => {
                            let _ = ready_tx.send(Ok(()));
                            stream
                        }
                        Err(e) => {
                            let _ = ready_tx.send(Err(e));
                            return;
                        }
                    };
                    while running.load(Ordering::SeqCst) {
                        thread::park();
                    }
                    drop(stream);
                })
                .map_err(|e| e.to_string())?;
            self.thread = Some(thread);
            ready_rx
                .recv()
                .map_err(|_| "audio thread exited before opening the stream".to_owned())?
        }

        fn write(&mut self, block: &[f32]) -> Result<(), String> {
            // the mixer is paced by wall time; this only bounds drift against the hardware clock
            while self.queue.lock().len() > self.max_queued {
                thread::sleep(Duration::from_millis(2));
            }
            self.queue.lock().extend(block.iter().copied());
            Ok(())
        }

        fn stop(&mut self) {
            self.running.store(false, Ordering::SeqCst);
            if let Some(thread) = self.thread.take() {
                thread.thread().unpark();
                let _ = thread.join();
            }
            self.queue.lock().clear();
        }
    }

    impl Drop for CpalSink {
        fn drop(&mut self) {
            self.stop();
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceState {
    Suspended,
    Running,
    Closed,
}

/// What drives the device clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClockMode {
    /// A mixer thread renders one block per block period of wall time.
    #[default]
    RealTime,
    /// The clock only moves through [`OutputDevice::advance`].
    Manual,
}

enum Command {
    Schedule(Vec<PhonemeVoice>),
    Close,
}

struct Mixer {
    sink: Box<dyn AudioSink>,
    commands: Receiver<Command>,
    clock: watch::Sender<u64>,
    voices: Vec<PhonemeVoice>,
    frame: u64,
    mix: Vec<f64>,
    out: Vec<f32>,
}

impl Mixer {
    /// Takes every pending command. `false` once the device is closing.
    fn drain(&mut self) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(Command::Schedule(voices)) => self.voices.extend(voices),
                Ok(Command::Close) | Err(TryRecvError::Disconnected) => return false,
                Err(TryRecvError::Empty) => return true,
            }
        }
    }

    fn render_block(&mut self, frames: usize) -> std::result::Result<(), String> {
        self.mix.clear();
        self.mix.resize(frames, 0.0);
        for voice in &mut self.voices {
            voice.mix_into(self.frame, &mut self.mix);
        }
        self.voices.retain(|v| !v.is_finished());
        self.out.clear();
        self.out
            .extend(self.mix.iter().map(|s| s.clamp(-1.0, 1.0) as f32));
        self.sink.write(&self.out)?;
        self.frame += frames as u64;
        self.clock.send_replace(self.frame);
        Ok(())
    }

    fn run(mut self, sample_rate: u32, block_frames: usize) {
        let period = block_frames as f64 / f64::from(sample_rate);
        let started = Instant::now();
        let mut blocks = 0u64;
        while self.drain() {
            if let Err(e) = self.render_block(block_frames) {
                warn!("audio sink failed, stopping the mixer: {e}");
                break;
            }
            blocks += 1;
            let deadline = started + Duration::from_secs_f64(blocks as f64 * period);
            if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
        }
        self.sink.stop();
        debug!(frame = self.frame, "mixer stopped");
    }
}

/// The audio output shared by every real-time request.
pub struct OutputDevice {
    sample_rate: u32,
    block_frames: usize,
    mode: ClockMode,
    state: Mutex<DeviceState>,
    commands: Sender<Command>,
    clock: watch::Receiver<u64>,
    /// Held here while suspended, and for the device's lifetime in manual mode.
    mixer: Mutex<Option<Mixer>>,
    thread: Mutex<Option<JoinHandle<()>>>,
    /// Held for the whole of a resume so concurrent callers wait for its outcome.
    transition: AsyncMutex<()>,
}

impl OutputDevice {
    /// A suspended device writing into `sink`.
    #[must_use]
    pub fn acquire(config: &Config, sink: Box<dyn AudioSink>, mode: ClockMode) -> Self {
        let (commands, receiver) = crossbeam_channel::unbounded();
        let (clock_tx, clock) = watch::channel(0);
        let mixer = Mixer {
            sink,
            commands: receiver,
            clock: clock_tx,
            voices: Vec::new(),
            frame: 0,
            mix: Vec::with_capacity(config.block_frames),
            out: Vec::with_capacity(config.block_frames),
        };
        debug!(sample_rate = config.sample_rate, ?mode, "acquired output device");
        OutputDevice {
            sample_rate: config.sample_rate,
            block_frames: config.block_frames,
            mode,
            state: Mutex::new(DeviceState::Suspended),
            commands,
            clock,
            mixer: Mutex::new(Some(mixer)),
            thread: Mutex::new(None),
            transition: AsyncMutex::new(()),
        }
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    #[must_use]
    pub fn state(&self) -> DeviceState {
        *self.state.lock()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        *self.clock.borrow()
    }

    /// Device time in seconds.
    #[must_use]
    pub fn now(&self) -> f64 {
        self.frame() as f64 / f64::from(self.sample_rate)
    }

    /// Starts the sink and the clock. Resuming a running device does nothing. Callers
    /// arriving while another resume is in flight wait for it to finish first.
    ///
    /// # Errors
    ///
    /// [`Error::EngineNotReady`] when the device is closed or the sink fails to start.
    pub async fn resume(&self) -> Result<()> {
        let _transition = self.transition.lock().await;
        match self.state() {
            DeviceState::Running => return Ok(()),
            DeviceState::Closed => {
                return Err(Error::EngineNotReady("output device is closed".into()));
            }
            DeviceState::Suspended => {}
        }
        let Some(mut mixer) = self.mixer.lock().take() else {
            return Err(Error::EngineNotReady("output device has no mixer".into()));
        };
        let thread = match self.mode {
            ClockMode::Manual => {
                let started = mixer.sink.start(self.sample_rate);
                *self.mixer.lock() = Some(mixer);
                started.map_err(Error::EngineNotReady)?;
                None
            }
            ClockMode::RealTime => Some(self.spawn_mixer(mixer).await?),
        };
        {
            let mut state = self.state.lock();
            if *state == DeviceState::Closed {
                drop(state);
                // close() already queued the stop command
                if let Some(thread) = thread {
                    let _ = thread.join();
                }
                return Err(Error::EngineNotReady("output device was closed".into()));
            }
            *state = DeviceState::Running;
        }
        *self.thread.lock() = thread;
        info!(sample_rate = self.sample_rate, mode = ?self.mode, "output device running");
        Ok(())
    }

    /// Hands `mixer` to a new thread and waits until its sink has started. On failure the
    /// mixer is put back so a later resume can try again.
    async fn spawn_mixer(&self, mixer: Mixer) -> Result<JoinHandle<()>> {
        let (handoff_tx, handoff_rx) = crossbeam_channel::bounded::<Mixer>(1);
        let (ready_tx, ready_rx) = oneshot::channel();
        let sample_rate = self.sample_rate;
        let block_frames = self.block_frames;
        let spawned = thread::Builder::new()
            .name("phonosynth-mixer".into())
            .spawn(move || {
                let Ok(mut mixer) = handoff_rx.recv() else {
                    return;
                };
                match mixer.sink.start(sample_rate) {
                    Ok(()) => {
                        let _ = ready_tx.send(Ok(()));
                        mixer.run(sample_rate, block_frames);
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err((e, mixer)));
                    }
                }
            });
        let thread = match spawned {
            Ok(thread) => thread,
            Err(e) => {
                *self.mixer.lock() = Some(mixer);
                return Err(Error::EngineNotReady(format!(
                    "cannot start the mixer thread: {e}"
                )));
            }
        };
        if let Err(crossbeam_channel::SendError(mixer)) = handoff_tx.send(mixer) {
            let _ = thread.join();
            *self.mixer.lock() = Some(mixer);
            return Err(Error::EngineNotReady("mixer thread exited".into()));
        }
        match ready_rx.await {
            Ok(Ok(())) => Ok(thread),
            Ok(Err((e, mixer))) => {
                let _ = thread.join();
                *self.mixer.lock() = Some(mixer);
                Err(Error::EngineNotReady(e))
            }
            Err(_) => {
                let _ = thread.join();
                Err(Error::EngineNotReady("mixer thread exited".into()))
            }
        }
    }

    /// Renders `frames` frames in blocks. Only for [`ClockMode::Manual`].
    ///
    /// # Errors
    ///
    /// [`Error::EngineNotReady`] when the device is not running, is real-time, or the sink fails.
    pub fn advance(&self, frames: u64) -> Result<()> {
        if self.mode != ClockMode::Manual {
            return Err(Error::EngineNotReady(
                "the real-time clock cannot be advanced by hand".into(),
            ));
        }
        if self.state() != DeviceState::Running {
            return Err(Error::EngineNotReady("output device is not running".into()));
        }
        let mut guard = self.mixer.lock();
        let Some(mixer) = guard.as_mut() else {
            return Err(Error::EngineNotReady("output device has no mixer".into()));
        };
        let mut left = frames;
        while left > 0 {
            if !mixer.drain() {
                break;
            }
            let block = left.min(self.block_frames as u64);
            mixer
                .render_block(block as usize)
                .map_err(Error::EngineNotReady)?;
            left -= block;
        }
        Ok(())
    }

    /// Commits `voices` to the mixer. They play to completion even if the returned handle
    /// is stopped.
    ///
    /// # Errors
    ///
    /// [`Error::EngineNotReady`] unless the device is running.
    pub fn schedule(
        &self,
        voices: Vec<PhonemeVoice>,
        start_time: f64,
        end_time: f64,
    ) -> Result<PlaybackHandle> {
        if self.state() != DeviceState::Running {
            return Err(Error::EngineNotReady("output device is not running".into()));
        }
        let end_frame = (end_time * f64::from(self.sample_rate)).ceil() as u64;
        let count = voices.len();
        self.commands
            .send(Command::Schedule(voices))
            .map_err(|_| Error::EngineNotReady("mixer is gone".into()))?;
        debug!(voices = count, start_time, end_time, "scheduled playback");
        let (stop, stopped) = watch::channel(false);
        Ok(PlaybackHandle {
            start_time,
            end_time,
            end_frame,
            clock: self.clock.clone(),
            stop,
            stopped,
        })
    }

    /// Stops the mixer and the sink. Closing twice does nothing.
    pub fn close(&self) {
        {
            let mut state = self.state.lock();
            if *state == DeviceState::Closed {
                return;
            }
            *state = DeviceState::Closed;
        }
        let _ = self.commands.send(Command::Close);
        if let Some(thread) = self.thread.lock().take() {
            let _ = thread.join();
        }
        if let Some(mut mixer) = self.mixer.lock().take() {
            mixer.sink.stop();
        }
        info!("output device closed");
    }
}

impl Drop for OutputDevice {
    fn drop(&mut self) {
        self.close();
    }
}

/// One scheduled utterance.
#[derive(Debug)]
pub struct PlaybackHandle {
    start_time: f64,
    end_time: f64,
    end_frame: u64,
    clock: watch::Receiver<u64>,
    stop: watch::Sender<bool>,
    stopped: watch::Receiver<bool>,
}

impl PlaybackHandle {
    /// Device time of the first phoneme, in seconds.
    #[must_use]
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Marks the playback finished. Voices already committed to the mixer keep sounding.
    pub fn stop(&self) {
        if !self.stop.send_replace(true) {
            info!(
                start = self.start_time,
                end = self.end_time,
                "playback stopped; committed phonemes still play out"
            );
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        *self.stopped.borrow() || *self.clock.borrow() >= self.end_frame
    }

    /// Resolves once the device clock passes the last phoneme, the handle is stopped,
    /// or the device closes.
    pub async fn finished(&self) {
        let mut clock = self.clock.clone();
        let mut stopped = self.stopped.clone();
        let end = self.end_frame;
        tokio::select! {
            _ = clock.wait_for(|frame| *frame >= end) => {}
            _ = stopped.wait_for(|s| *s) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            sample_rate: 8_000,
            block_frames: 100,
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn lifecycle() {
        let device = OutputDevice::acquire(&config(), Box::new(NullSink), ClockMode::Manual);
        assert_eq!(device.state(), DeviceState::Suspended);
        assert!(device.schedule(Vec::new(), 0.0, 0.0).is_err());
        device.resume().await.unwrap();
        assert_eq!(device.state(), DeviceState::Running);
        device.resume().await.unwrap();
        device.close();
        assert_eq!(device.state(), DeviceState::Closed);
        assert!(matches!(
            device.resume().await,
            Err(Error::EngineNotReady(_))
        ));
    }

    struct Broken;

    impl AudioSink for Broken {
        fn start(&mut self, _: u32) -> std::result::Result<(), String> {
            Err("no hardware".into())
        }

        fn write(&mut self, _: &[f32]) -> std::result::Result<(), String> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn failing_sink_is_not_ready() {
        for mode in [ClockMode::Manual, ClockMode::RealTime] {
            let device = OutputDevice::acquire(&config(), Box::new(Broken), mode);
            assert!(matches!(
                device.resume().await,
                Err(Error::EngineNotReady(_))
            ));
            assert_eq!(device.state(), DeviceState::Suspended);
        }
    }

    /// Fails to start `failures` times, slowly, then works.
    struct Flaky {
        failures: usize,
        starts: Arc<Mutex<usize>>,
    }

    impl AudioSink for Flaky {
        fn start(&mut self, _: u32) -> std::result::Result<(), String> {
            thread::sleep(Duration::from_millis(20));
            *self.starts.lock() += 1;
            if self.failures > 0 {
                self.failures -= 1;
                return Err("device busy".into());
            }
            Ok(())
        }

        fn write(&mut self, _: &[f32]) -> std::result::Result<(), String> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn concurrent_resumes_share_one_start() {
        let starts = Arc::new(Mutex::new(0));
        let sink = Flaky {
            failures: 0,
            starts: Arc::clone(&starts),
        };
        let device = OutputDevice::acquire(&config(), Box::new(sink), ClockMode::RealTime);
        let (first, second) = tokio::join!(device.resume(), device.resume());
        first.unwrap();
        second.unwrap();
        assert_eq!(device.state(), DeviceState::Running);
        assert_eq!(*starts.lock(), 1);
        device.close();
    }

    #[tokio::test]
    async fn resume_retries_after_a_failed_start() {
        for mode in [ClockMode::Manual, ClockMode::RealTime] {
            let starts = Arc::new(Mutex::new(0));
            let sink = Flaky {
                failures: 1,
                starts: Arc::clone(&starts),
            };
            let device = OutputDevice::acquire(&config(), Box::new(sink), mode);
            assert!(matches!(
                device.resume().await,
                Err(Error::EngineNotReady(_))
            ));
            assert_eq!(device.state(), DeviceState::Suspended);
            device.resume().await.unwrap();
            assert_eq!(device.state(), DeviceState::Running);
            assert_eq!(*starts.lock(), 2);
            device.close();
        }
    }

    #[tokio::test]
    async fn manual_clock_moves_in_blocks() {
        let sink = CaptureSink::new();
        let device = OutputDevice::acquire(&config(), Box::new(sink.clone()), ClockMode::Manual);
        device.resume().await.unwrap();
        device.advance(250).unwrap();
        assert_eq!(device.frame(), 250);
        assert!((device.now() - 250.0 / 8_000.0).abs() < 1e-12);
        assert_eq!(sink.samples().len(), 250);
        assert!(sink.samples().iter().all(|s| *s == 0.0));
    }

    #[tokio::test]
    async fn handle_finishes_with_the_clock() {
        let device = OutputDevice::acquire(&config(), Box::new(NullSink), ClockMode::Manual);
        device.resume().await.unwrap();
        let handle = device.schedule(Vec::new(), 0.0, 0.05).unwrap();
        assert!(!handle.is_finished());
        device.advance(400).unwrap();
        assert!(handle.is_finished());
        handle.finished().await;
    }

    #[tokio::test]
    async fn real_time_clock_advances() {
        let device = OutputDevice::acquire(&config(), Box::new(NullSink), ClockMode::RealTime);
        device.resume().await.unwrap();
        let handle = device.schedule(Vec::new(), 0.0, 0.05).unwrap();
        tokio::time::timeout(Duration::from_secs(5), handle.finished())
            .await
            .unwrap();
        assert!(device.now() >= 0.05);
        assert!(device.advance(10).is_err());
    }
}
