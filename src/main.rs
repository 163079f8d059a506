//! trimfade Command Line Interface
//!
//! Trim, fade and re-encode audio clips.

use clap::{Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};
use trimfade::encoder::default_compressor;
use trimfade::processor::{ExportSettings, export_clip};
use trimfade::sink::{ExportSink, FileSink, suggested_file_name};
use trimfade::{ExportFormat, FadeSpec, TimeRange, decoder};

#[derive(Parser)]
#[command(name = "trimfade")]
#[command(about = "Trim, fade and re-encode audio clips", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print stream information for an audio file
    Probe {
        /// Input audio file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Cut a range out of an audio file and save it as WAV or MP3
    Export {
        /// Input audio file (anything symphonia can decode)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file; defaults to <input>_trimmed.<format> next to the input
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Start time in seconds
        #[arg(short, long, default_value_t = 0.0)]
        start: f64,

        /// End time in seconds; defaults to the end of the input
        #[arg(short, long)]
        end: Option<f64>,

        /// Fade-in length in seconds
        #[arg(long, default_value_t = 0.0)]
        fade_in: f64,

        /// Fade-out length in seconds
        #[arg(long, default_value_t = 0.0)]
        fade_out: f64,

        /// Output format (wav, mp3); defaults to the output extension, then wav
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// MP3 bitrate in kbps
        #[arg(short, long, default_value_t = 128)]
        bitrate: u32,
    },
}

fn resolve_format(explicit: Option<ExportFormat>, output: Option<&Path>) -> ExportFormat {
    explicit
        .or_else(|| {
            output
                .and_then(|p| p.extension())
                .and_then(|e| e.to_str())
                .and_then(ExportFormat::from_extension)
        })
        .unwrap_or(ExportFormat::Wav)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    debug!("trimfade {}", trimfade::VERSION);

    match cli.command {
        Commands::Probe { input } => {
            let metadata = decoder::probe(&input)?;
            println!("File:        {}", input.display());
            println!("Codec:       {}", metadata.codec);
            println!("Sample rate: {} Hz", metadata.sample_rate);
            println!("Channels:    {}", metadata.channels);
            if let Some(bits) = metadata.bits_per_sample {
                println!("Bit depth:   {}", bits);
            }
            match metadata.duration_secs() {
                Some(secs) => println!("Duration:    {:.3} s", secs),
                None => println!("Duration:    unknown"),
            }
        }
        Commands::Export {
            input,
            output,
            start,
            end,
            fade_in,
            fade_out,
            format,
            bitrate,
        } => {
            let format = resolve_format(format, output.as_deref());
            let fade = FadeSpec::new(fade_in, fade_out)?;

            info!("Decoding {}", input.display());
            let source = decoder::load_source(&input)?;
            info!(
                "Decoded {:.3}s, {} Hz, {} channels",
                source.duration_secs(),
                source.sample_rate(),
                source.channel_count()
            );

            let range = TimeRange::new(start, end.unwrap_or_else(|| source.duration_secs()))?;
            let settings = ExportSettings::new(format).with_bitrate(bitrate);
            let blob = export_clip(&source, &range, &fade, &settings, default_compressor())?;
            drop(source);

            let output = output.unwrap_or_else(|| {
                let stem = input
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or_default();
                input.with_file_name(suggested_file_name(stem, format))
            });
            let dir = output
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = output
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or("output path has no usable file name")?;

            let size = blob.len();
            FileSink::new(dir).deliver(file_name, blob)?;
            println!("Saved {} ({} bytes)", output.display(), size);
        }
    }

    Ok(())
}
