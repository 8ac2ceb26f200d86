use std::collections::HashMap;

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use kmeans_colors::get_kmeans;
use log::debug;
use palette::{IntoColor, Lab, LinSrgb, Srgb};

use crate::color::PixelColor;
use crate::config::SeedConfig;
use crate::error::{RankError, Result};

/// k-means cluster indices are stored as `u8`.
const MAX_SEEDS: usize = 256;

/// Flatten an image into row-major RGB pixels. Alpha is dropped.
pub fn pixels_from_image(img: &DynamicImage) -> Vec<PixelColor> {
    img.to_rgb8().pixels().map(|&px| PixelColor::from(px)).collect()
}

/// Shrink `img` so its longest side is at most `longest_side`, keeping the
/// aspect ratio. Images that already fit are returned unchanged.
pub fn downscale(img: &DynamicImage, longest_side: u32) -> DynamicImage {
    let (orig_w, orig_h) = img.dimensions();
    let max_side = orig_w.max(orig_h);
    if longest_side == 0 || max_side <= longest_side {
        return img.clone();
    }
    let ratio = longest_side as f32 / max_side as f32;
    let w = ((orig_w as f32) * ratio).round().max(1.0) as u32;
    let h = ((orig_h as f32) * ratio).round().max(1.0) as u32;
    DynamicImage::ImageRgba8(image::imageops::resize(img, w, h, FilterType::Nearest))
}

/// Build a seed palette of at most `k` distinct colors, most common first.
///
/// When the image holds no more than `k` distinct colors those colors are the
/// palette. Otherwise the pixels are clustered with k-means in CIE Lab and
/// the centroids are ordered by cluster population.
pub fn seed_palette(
    pixels: &[PixelColor],
    k: usize,
    config: &SeedConfig,
) -> Result<Vec<PixelColor>> {
    if k == 0 || k > MAX_SEEDS {
        return Err(RankError::InvalidConfig(format!(
            "seed palette size must be between 1 and {MAX_SEEDS}, got {k}"
        )));
    }
    if pixels.is_empty() {
        return Err(RankError::EmptyInput);
    }

    let exact = exact_palette(pixels);
    if exact.len() <= k {
        debug!("{} distinct colors, skipping k-means", exact.len());
        return Ok(exact);
    }

    let lab_pixels: Vec<Lab> = pixels
        .iter()
        .map(|&c| -> Lab {
            let linear: LinSrgb<f32> = Srgb::<u8>::from(c).into_linear();
            linear.into_color()
        })
        .collect();

    let kmeans = get_kmeans(
        k,
        config.max_iterations,
        config.convergence,
        false,
        &lab_pixels,
        config.random_seed,
    );

    let mut populations = vec![0usize; kmeans.centroids.len()];
    for &idx in &kmeans.indices {
        populations[idx as usize] += 1;
    }

    let mut clusters: Vec<(PixelColor, usize)> = kmeans
        .centroids
        .iter()
        .zip(populations)
        .filter(|&(_, population)| population > 0)
        .map(|(&lab, population)| {
            let rgb_f32: Srgb<f32> = Srgb::from_linear(lab.into_color());
            (PixelColor::from(rgb_f32.into_format::<u8>()), population)
        })
        .collect();
    clusters.sort_by(|a, b| b.1.cmp(&a.1));

    let mut seeds: Vec<PixelColor> = Vec::with_capacity(clusters.len());
    for (color, _) in clusters {
        if !seeds.contains(&color) {
            seeds.push(color);
        }
    }
    seeds.truncate(k);
    debug!("k-means produced {} seed colors (k = {k})", seeds.len());
    Ok(seeds)
}

/// Every distinct color, most frequent first, ties in first-seen order.
fn exact_palette(pixels: &[PixelColor]) -> Vec<PixelColor> {
    let mut index: HashMap<PixelColor, usize> = HashMap::new();
    let mut counts: Vec<(PixelColor, usize)> = Vec::new();
    for &px in pixels {
        let slot = *index.entry(px).or_insert_with(|| {
            counts.push((px, 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().map(|(c, _)| c).collect()
}

/// Parse caller-supplied seed colors given as hex strings.
pub fn parse_hex_palette<S: AsRef<str>>(colors: &[S]) -> Result<Vec<PixelColor>> {
    colors.iter().map(|s| PixelColor::from_hex(s.as_ref())).collect()
}
