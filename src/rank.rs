use std::collections::HashSet;
use std::fmt;

use log::{debug, trace, warn};

use crate::color::PixelColor;
use crate::config::RankConfig;
use crate::error::{RankError, Result};

/// One seed color and the number of pixels assigned to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorBucket {
    pub color: PixelColor,
    pub count: usize,
}

/// A single row of the ranked output.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedColorEntry {
    pub hex: String,
    pub color: PixelColor,
    /// Share of all pixels in the image, in `[0, 1]`.
    pub percentage: f64,
}

impl RankedColorEntry {
    fn from_bucket(bucket: &ColorBucket, total_pixels: usize) -> Self {
        Self {
            hex: bucket.color.to_hex(),
            color: bucket.color,
            percentage: bucket.count as f64 / total_pixels as f64,
        }
    }

    /// White, zero-percentage filler appended when fewer buckets than
    /// requested slots exist.
    pub fn sentinel() -> Self {
        Self {
            hex: PixelColor::WHITE.to_hex(),
            color: PixelColor::WHITE,
            percentage: 0.0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.color == PixelColor::WHITE && self.percentage == 0.0
    }
}

impl fmt::Display for RankedColorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.color.channels();
        write!(
            f,
            "Color: ({r}, {g}, {b}), Hex: {}, Percentage: {:.2}%",
            self.hex,
            self.percentage * 100.0
        )
    }
}

/// Result of [`rank_colors`].
#[derive(Clone, Debug, PartialEq)]
pub struct Ranking {
    /// Exactly `num_colors` entries, most common first.
    pub entries: Vec<RankedColorEntry>,
    /// Distinct exact colors seen in the image, matched or not.
    pub unique_color_count: usize,
    pub total_pixels: usize,
}

impl Ranking {
    /// Entries other than padding. A real white bucket with no pixels is
    /// indistinguishable from padding and is skipped too.
    pub fn real_entries(&self) -> impl Iterator<Item = &RankedColorEntry> {
        self.entries.iter().filter(|e| !e.is_sentinel())
    }
}

/// Assign every pixel to a seed bucket and rank the buckets by coverage.
///
/// Buckets are scanned in seed order and a pixel lands in the *first* bucket
/// whose seed is within `tolerance` on every channel, even when a later seed
/// is closer. Seed order is therefore part of the result: reordering
/// overlapping seeds can change the counts.
///
/// Percentages are taken against the full pixel count, so pixels that match
/// no bucket still dilute every share and the real percentages sum to less
/// than 1 whenever something went unmatched.
pub fn rank_colors(
    pixels: &[PixelColor],
    seeds: &[PixelColor],
    config: &RankConfig,
) -> Result<Ranking> {
    config.validate()?;
    if pixels.is_empty() {
        return Err(RankError::EmptyInput);
    }
    if seeds.is_empty() {
        return Err(RankError::InvalidSeed("seed palette is empty".into()));
    }

    let mut buckets = make_buckets(seeds);
    let mut matched: HashSet<PixelColor> = HashSet::new();
    let mut unmatched: HashSet<PixelColor> = HashSet::new();

    for pixel in pixels {
        match buckets
            .iter_mut()
            .find(|b| b.color.within_tolerance(pixel, config.tolerance))
        {
            Some(bucket) => {
                bucket.count += 1;
                matched.insert(*pixel);
            }
            None => {
                unmatched.insert(*pixel);
            }
        }
    }

    let unique_color_count = matched.union(&unmatched).count();
    let total_pixels = pixels.len();
    trace!(
        "scanned {total_pixels} pixels into {} buckets, {} distinct unmatched colors",
        buckets.len(),
        unmatched.len()
    );

    // Counts share a denominator, so ordering them is ordering the
    // percentages. The sort is stable: ties keep seed order.
    buckets.sort_by(|a, b| b.count.cmp(&a.count));

    let mut entries: Vec<RankedColorEntry> = buckets
        .iter()
        .take(config.num_colors)
        .map(|b| RankedColorEntry::from_bucket(b, total_pixels))
        .collect();
    entries.resize_with(config.num_colors, RankedColorEntry::sentinel);

    for entry in &entries {
        debug!("{entry}");
    }
    debug!("{unique_color_count} unique colors across {total_pixels} pixels");

    Ok(Ranking {
        entries,
        unique_color_count,
        total_pixels,
    })
}

fn make_buckets(seeds: &[PixelColor]) -> Vec<ColorBucket> {
    let mut seen = HashSet::with_capacity(seeds.len());
    let mut buckets = Vec::with_capacity(seeds.len());
    for &color in seeds {
        if seen.insert(color) {
            buckets.push(ColorBucket { color, count: 0 });
        } else {
            warn!("duplicate seed color {color} ignored");
        }
    }
    buckets
}
