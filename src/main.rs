use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vqpress::models::{AppConfig, ArtifactFormat, ConfigOverrides};
use vqpress::services::{ChecksumStatus, CompressionPipeline};

#[derive(Parser)]
#[command(name = "vqpress")]
#[command(about = "Codebook (vector quantization) compressor for grayscale images")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a PNG image into a codebook-index artifact
    Compress {
        /// Input PNG file (color images are reduced to luma)
        #[arg(short, long)]
        input: PathBuf,

        /// Output artifact path
        #[arg(short, long)]
        output: PathBuf,

        /// Also write the quantized image to this PNG file
        #[arg(short, long)]
        preview: Option<PathBuf>,

        /// YAML configuration file (defaults to CONFIG_FILE, then built-in)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of codewords (K), 1 to 256
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        codebook_size: Option<i64>,

        /// Upper bound on clustering rounds
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        max_iterations: Option<i64>,

        /// Fixed seed for reproducible codebooks
        #[arg(short, long)]
        seed: Option<u64>,

        /// Artifact layout: "raw" (with JSON sidecar) or "container"
        #[arg(short, long)]
        format: Option<ArtifactFormat>,
    },
    /// Restore a PNG image from an artifact
    Decompress {
        /// Artifact produced by `compress`
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Codebook sidecar for raw artifacts (defaults to <input>.codebook.json)
        #[arg(short, long)]
        sidecar: Option<PathBuf>,
    },
    /// Describe an artifact and check it against its sidecar
    Inspect {
        /// Artifact to describe
        #[arg(short, long)]
        input: PathBuf,

        /// Codebook sidecar for raw artifacts (defaults to <input>.codebook.json)
        #[arg(short, long)]
        sidecar: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        run_status_command();
        return Ok(());
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vqpress=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match command {
        Commands::Compress {
            input,
            output,
            preview,
            config,
            codebook_size,
            max_iterations,
            seed,
            format,
        } => {
            let mut app_config = AppConfig::load(config.as_deref())?;
            app_config.apply_overrides(&ConfigOverrides {
                codebook_size,
                max_iterations,
                seed,
                format,
            });
            run_compress_command(app_config, &input, &output, preview.as_deref())
        }
        Commands::Decompress {
            input,
            output,
            sidecar,
        } => run_decompress_command(&input, &output, sidecar.as_deref()),
        Commands::Inspect { input, sidecar } => run_inspect_command(&input, sidecar.as_deref()),
    }
}

fn run_compress_command(
    config: AppConfig,
    input: &Path,
    output: &Path,
    preview: Option<&Path>,
) -> anyhow::Result<()> {
    let pipeline = CompressionPipeline::new(config);
    let summary = pipeline.compress(input, output, preview)?;

    println!(
        "Compressed {} ({}x{}) -> {} ({} bytes)",
        input.display(),
        summary.width,
        summary.height,
        summary.artifact_path.display(),
        summary.artifact_bytes
    );
    println!("  Codebook:   {:?}", summary.codebook);
    println!(
        "  Seed:       {} ({} rounds, {})",
        summary.seed,
        summary.iterations_run,
        if summary.converged {
            "converged"
        } else {
            "iteration cap reached"
        }
    );
    println!("  Distortion: {}", summary.distortion);
    if let Some(path) = &summary.sidecar_path {
        println!("  Sidecar:    {}", path.display());
    }
    if let Some(path) = &summary.preview_path {
        println!("  Preview:    {}", path.display());
    }
    Ok(())
}

fn run_decompress_command(
    input: &Path,
    output: &Path,
    sidecar: Option<&Path>,
) -> anyhow::Result<()> {
    let pipeline = CompressionPipeline::new(AppConfig::default());
    let summary = pipeline.decompress(input, output, sidecar)?;

    println!(
        "Restored {} ({}x{}, K={}) -> {}",
        input.display(),
        summary.width,
        summary.height,
        summary.codebook.len(),
        summary.output_path.display()
    );
    Ok(())
}

fn run_inspect_command(input: &Path, sidecar: Option<&Path>) -> anyhow::Result<()> {
    let pipeline = CompressionPipeline::new(AppConfig::default());
    let report = pipeline.inspect(input, sidecar)?;

    let unknown = || "unknown".to_string();
    println!("{}", input.display());
    println!(
        "  Format:     {}",
        match report.format {
            ArtifactFormat::Raw => "raw",
            ArtifactFormat::Container => "container",
        }
    );
    println!("  Size:       {} bytes, {} records", report.bytes, report.records);
    println!(
        "  Dimensions: {}x{}",
        report.width.map_or_else(unknown, |w| w.to_string()),
        report.height.map_or_else(unknown, |h| h.to_string())
    );
    match &report.codebook {
        Some(codebook) => println!("  Codebook:   {:?} (K={})", codebook, codebook.len()),
        None => println!("  Codebook:   unknown"),
    }
    if let Some(seed) = report.seed {
        println!("  Seed:       {seed}");
    }
    println!(
        "  Checksum:   {}",
        match report.checksum {
            ChecksumStatus::Verified => "verified against sidecar",
            ChecksumStatus::Mismatch => "MISMATCH (artifact does not belong to this sidecar)",
            ChecksumStatus::NoSidecar => "no sidecar found",
            ChecksumStatus::NotApplicable => "n/a (self-describing container)",
        }
    );
    Ok(())
}

fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("vqpress v{VERSION}");
    println!("Codebook compression for grayscale images\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG")
            .ok()
            .as_deref()
            .unwrap_or("vqpress=info (default)")
    );

    println!("\nConfiguration:");
    match AppConfig::load(None) {
        Ok(config) => {
            println!("  codebook_size  = {}", config.compression.codebook_size);
            println!("  max_iterations = {}", config.compression.max_iterations);
            println!(
                "  seed           = {}",
                config
                    .compression
                    .seed
                    .map_or_else(|| "(random per run)".to_string(), |s| s.to_string())
            );
            println!("  format         = {:?}", config.artifact.format);
            println!("  write_preview  = {}", config.artifact.write_preview);
        }
        Err(e) => println!("  (failed to load: {e})"),
    }

    println!("\nCommands:");
    println!("  vqpress compress   -i <image.png> -o <out.vq>     Compress an image");
    println!("  vqpress decompress -i <out.vq> -o <restored.png>  Restore an image");
    println!("  vqpress inspect    -i <out.vq>                    Describe an artifact");
    println!("  vqpress --help                                    Show all options");
}
