use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use color_ranker::{
    DEFAULT_NUM_COLORS, DEFAULT_TOLERANCE, RankConfig, Ranking, SeedConfig, parse_hex_palette,
    rank_image_bytes,
};
use serde_json::json;

/// Rank the dominant colors of one or more images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of palette slots in the output
    #[arg(short = 'k', long, default_value_t = DEFAULT_NUM_COLORS)]
    num_colors: usize,

    /// Per-channel distance under which a pixel counts as a seed color
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: u32,

    /// Comma-separated list of hex colors to use as seeds (skip k-means)
    #[arg(short = 'c', long)]
    palette: Option<String>,

    /// Shrink the longest side to this before k-means seeding
    #[arg(long)]
    downscale: Option<u32>,

    /// Print one JSON document per input instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let palette = match &args.palette {
        Some(s) => {
            let hex: Vec<&str> = s.split(',').map(str::trim).collect();
            Some(parse_hex_palette(&hex).context("invalid --palette")?)
        }
        None => None,
    };

    let config = RankConfig::new(args.num_colors, args.tolerance);
    let seed_config = SeedConfig {
        downscale: args.downscale,
        ..SeedConfig::default()
    };

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let ranking = rank_image_bytes(&bytes, &config, &seed_config, palette.as_deref())
            .with_context(|| format!("ranking colors of {}", input.display()))?;

        if args.json {
            println!("{}", to_json(input, &ranking));
        } else {
            println!("{}", input.display());
            for entry in &ranking.entries {
                println!("  {entry}");
            }
            println!("  Unique colors: {}", ranking.unique_color_count);
        }
    }

    Ok(())
}

fn to_json(input: &Path, ranking: &Ranking) -> serde_json::Value {
    let colors: Vec<_> = ranking
        .entries
        .iter()
        .map(|e| {
            json!({
                "hex": e.hex,
                "rgb": e.color.channels(),
                "percentage": e.percentage,
            })
        })
        .collect();
    json!({
        "file": input.display().to_string(),
        "colors": colors,
        "unique_colors": ranking.unique_color_count,
        "total_pixels": ranking.total_pixels,
    })
}
