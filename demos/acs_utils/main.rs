//! ACS CLI Utility
//!
//! A command-line tool for converting Microsoft Agent character files into
//! portable sprite atlases and for inspecting their contents.
//!
//! # Features
//!
//! - **ingest**: Convert an ACS file to `atlas.png` + `manifest.json`
//! - **info**: Display information about an ACS file
//!
//! # Usage
//!
//! ```bash
//! # Convert a character (writes next to the input by default)
//! cargo run --example acs_utils -- ingest CLIPPIT.ACS
//!
//! # Convert with an explicit name and output directory
//! cargo run --example acs_utils -- ingest CLIPPIT.ACS -o assets/clippy -n Clippy
//!
//! # Show character information
//! cargo run --example acs_utils -- info CLIPPIT.ACS --detailed
//! ```

use clap::{Parser, Subcommand};
use msagent_rs::file::acs::File as AcsFile;
use msagent_rs::ingest::{ingest_file, IngestOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "acs_utils")]
#[command(author = "msagent-rs project")]
#[command(version = "1.0")]
#[command(about = "ACS utility - convert and inspect Agent character files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Convert an ACS file to a sprite atlas and manifest
	Ingest {
		/// Input ACS file path
		#[arg(value_name = "INPUT_ACS")]
		input: PathBuf,

		/// Output directory (optional, defaults to `<input>_assets/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,

		/// Character name (optional, defaults to the input file name)
		#[arg(short, long, value_name = "NAME")]
		name: Option<String>,

		/// Fallback duration in seconds for frames without timing
		#[arg(long, value_name = "SECONDS")]
		fallback_duration: Option<f64>,
	},

	/// Display information about an ACS file
	Info {
		/// Input ACS file path
		#[arg(value_name = "INPUT_ACS")]
		input: PathBuf,

		/// Show per-animation frame information
		#[arg(short, long)]
		detailed: bool,
	},
}

fn handle_ingest(
	input: PathBuf,
	output: Option<PathBuf>,
	name: Option<String>,
	fallback_duration: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
	let output_dir = output.unwrap_or_else(|| {
		let mut dir = input.clone();
		dir.set_extension("");
		let label = format!("{}_assets", dir.file_name().unwrap().to_string_lossy());
		dir.with_file_name(label)
	});

	let mut options = IngestOptions::new(&output_dir);
	options.character_name = name;
	if let Some(duration) = fallback_duration {
		options.fallback_frame_duration = duration;
	}

	let report = ingest_file(&input, &options)?;

	println!(
		"✓ Ingested {} -> {} ({} frames, {} clips, atlas {})",
		input.display(),
		output_dir.display(),
		report.manifest.frames.len(),
		report.manifest.animations.len(),
		report.atlas_size,
	);

	Ok(())
}

fn handle_info(input: PathBuf, detailed: bool) -> Result<(), Box<dyn std::error::Error>> {
	println!("📄 ACS File Information");
	println!("   File: {}", input.display());

	let acs = AcsFile::open(&input)?;
	let file_size = std::fs::metadata(&input)?.len();

	println!("\n📊 Summary:");
	println!("   Canvas: {}", acs.canvas_size());
	println!("   Transparency index: {}", acs.transparency_index());
	println!("   Images: {}", acs.images().len());
	println!("   Animations: {}", acs.animations().len());
	println!("   File size: {} bytes ({:.2} KB)", file_size, file_size as f64 / 1024.0);

	if detailed {
		println!("\n📋 Animations:");
		println!("   {:<28} {:<8} {}", "Name", "Frames", "Duration (ticks)");
		println!("   {}", "-".repeat(60));

		for animation in acs.animations() {
			let total_ticks: u32 =
				animation.frames.iter().map(|frame| u32::from(frame.duration_ticks)).sum();
			println!(
				"   {:<28} {:<8} {}",
				animation.name,
				animation.frames.len(),
				total_ticks
			);
		}
	}

	Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	match cli.command {
		Commands::Ingest {
			input,
			output,
			name,
			fallback_duration,
		} => handle_ingest(input, output, name, fallback_duration),

		Commands::Info {
			input,
			detailed,
		} => handle_info(input, detailed),
	}
}
