use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "resona",
    about = "Neural audio analysis: tempo, key, energy, and mood from an audio file"
)]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: Option<PathBuf>,

    /// Write the JSON result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// ONNX model file to run
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Config file (TOML); defaults to resona.toml or the user config dir
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// FFT frame length in samples (power of two)
    #[arg(long, default_value_t = 2048)]
    pub fft_size: usize,

    /// Hop between consecutive frames in samples
    #[arg(long, default_value_t = 512)]
    pub hop_size: usize,

    /// Number of mel bands
    #[arg(long, default_value_t = 128)]
    pub mel_bands: usize,

    /// Number of time frames fed to the model
    #[arg(long, default_value_t = 100)]
    pub sequence_length: usize,

    /// Dump the extracted feature tensor as JSON and skip inference
    #[arg(long)]
    pub features_only: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}
