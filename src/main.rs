mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use resona::audio::decode;
use resona::config::{load_config, Config};
use resona::{AnalysisConfig, FeaturePipeline};

use cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect resona.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("resona.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("resona").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("resona").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });

    let mut file_cfg = Config::default();
    if let Some(ref path) = config_path {
        if let Some(cfg) = load_config(path) {
            log::info!("Loaded config from {}", path.display());
            file_cfg = cfg;
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    // Merge: config values apply only when CLI is at its default
    if cli.fft_size == 2048 {
        cli.fft_size = file_cfg.analysis.fft_size;
    }
    if cli.hop_size == 512 {
        cli.hop_size = file_cfg.analysis.hop_size;
    }
    if cli.mel_bands == 128 {
        cli.mel_bands = file_cfg.analysis.mel_bands;
    }
    if cli.sequence_length == 100 {
        cli.sequence_length = file_cfg.analysis.sequence_length;
    }
    if cli.model.is_none() {
        cli.model = file_cfg.model.path.clone();
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    log::info!("resona - neural audio analysis");
    log::info!("Input: {}", input.display());

    // 1. Decode audio to a mono signal
    log::info!("Decoding audio...");
    let signal = decode::decode_to_mono(input)?;

    let config = AnalysisConfig {
        sample_rate: signal.sample_rate,
        fft_size: cli.fft_size,
        hop_size: cli.hop_size,
        mel_bands: cli.mel_bands,
        sequence_length: cli.sequence_length,
    };

    // 2. Feature extraction only: dump the tensor and exit
    if cli.features_only {
        let pipeline = FeaturePipeline::new(config)?;
        let tensor = pipeline.extract(&signal);
        let frames: Vec<&[f32]> = (0..tensor.shape()[1]).map(|i| tensor.frame(i)).collect();
        let json = serde_json::json!({
            "shape": tensor.shape(),
            "frames": frames,
        });
        write_output(cli.output.as_deref(), &json, cli.pretty)?;
        return Ok(());
    }

    // 3. Run the model and decode its output
    let model_path = cli.model.as_ref().context(
        "Model file is required (pass --model or set [model] path in the config)",
    )?;

    #[cfg(feature = "onnx")]
    {
        log::info!("Loading model: {}", model_path.display());
        let engine =
            resona::OnnxEngine::load(model_path, config.sequence_length, config.mel_bands)?;
        let analyzer = resona::Analyzer::with_table(config, engine, file_cfg.model.outputs)?;

        log::info!("Analyzing audio...");
        let result = analyzer.analyze(&signal)?;
        log::info!(
            "Analysis: {:.1} BPM, {} {}, energy {:.2}, danceability {:.2}, valence {:.2}, arousal {:.2}",
            result.bpm,
            result.key_name(),
            result.scale_name(),
            result.energy,
            result.danceability,
            result.valence,
            result.arousal
        );

        let json = serde_json::to_value(&result)?;
        write_output(cli.output.as_deref(), &json, cli.pretty)?;
        Ok(())
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = model_path;
        anyhow::bail!(
            "Model inference requires the 'onnx' feature. \
             Rebuild with: cargo build --features onnx"
        );
    }
}

fn write_output(path: Option<&std::path::Path>, value: &serde_json::Value, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match path {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write output: {}", path.display()))?;
            log::info!("Wrote {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}
