use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use phonosynth::{
    AudioSink, ClockMode, Config, OutputDevice, QualityHint, SynthesisRequest, Synthesizer,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "phonosynth", version, about = "Formant text to speech for English and Hindi")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Speech {
    text: String,

    #[arg(long, default_value = "default")]
    voice: String,

    /// Percent change of the voice pitch, -100..=100
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pitch: i32,

    /// Speed multiplier, 0.25..=4.0
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Percent of the voice loudness, 0..=100
    #[arg(long, default_value_t = 80)]
    volume: u8,

    /// 64000, 128000, 192000 or 320000
    #[arg(long, default_value_t = 128_000)]
    quality: u32,

    #[arg(long)]
    seed: Option<u64>,
}

impl Speech {
    fn request(&self) -> Result<SynthesisRequest> {
        let mut request = SynthesisRequest::new(self.text.as_str())
            .voice(self.voice.as_str())
            .pitch_offset(self.pitch)
            .speed(self.speed)
            .volume(self.volume)
            .quality(QualityHint::try_from(self.quality)?);
        request.seed = self.seed;
        Ok(request)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render to a WAV file
    Say {
        #[command(flatten)]
        speech: Speech,

        /// Only the first characters, slightly faster
        #[arg(long)]
        preview: bool,

        #[arg(long, short)]
        out: PathBuf,
    },
    /// Speak through the output device
    Play {
        #[command(flatten)]
        speech: Speech,
    },
    /// Print the detected language and phoneme symbols
    Phonemes { text: String },
    /// List the available voices
    Voices,
}

fn output_sink() -> Box<dyn AudioSink> {
    #[cfg(feature = "playback")]
    {
        Box::new(phonosynth::CpalSink::new())
    }
    #[cfg(not(feature = "playback"))]
    {
        Box::new(phonosynth::NullSink)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };
    let synth = Synthesizer::new(config)?;

    match cli.command {
        Command::Say {
            speech,
            preview,
            out,
        } => {
            let request = speech.request()?;
            let bytes = if preview {
                synth.preview(&request).await?
            } else {
                synth.synthesize(&request).await?
            };
            std::fs::write(&out, &bytes)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), bytes = bytes.len(), "wrote audio");
        }
        Command::Play { speech } => {
            let request = speech.request()?;
            let device = OutputDevice::acquire(synth.config(), output_sink(), ClockMode::RealTime);
            let handle = synth.speak(&device, &request).await?;
            handle.finished().await;
            device.close();
        }
        Command::Phonemes { text } => {
            let utterance = synth.analyze(&text);
            println!("{}", utterance.language);
            let symbols: Vec<&str> = utterance.symbols.iter().map(|s| s.as_str()).collect();
            println!("{}", symbols.join(" "));
        }
        Command::Voices => {
            for voice in synth.voices().iter() {
                println!(
                    "{:<12} {:<8} {:>6.1} Hz  {}",
                    voice.id,
                    voice.language.to_string(),
                    voice.base_pitch_hz,
                    voice.display_name
                );
            }
        }
    }
    Ok(())
}
