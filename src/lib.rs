//! Rank the dominant colors of an image.
//!
//! A seed palette (k-means in Lab, or caller supplied) anchors one bucket per
//! color. Every pixel is counted into the first bucket whose seed lies within
//! a per-channel tolerance, and the buckets are returned as a fixed-length,
//! most-common-first list of hex colors with their share of the image.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

mod color;
mod config;
mod error;
mod rank;
mod seed;

pub use color::PixelColor;
pub use config::{DEFAULT_NUM_COLORS, DEFAULT_TOLERANCE, RankConfig, SeedConfig};
pub use error::{RankError, Result};
pub use rank::{ColorBucket, RankedColorEntry, Ranking, rank_colors};
pub use seed::{downscale, parse_hex_palette, pixels_from_image, seed_palette};

/// Decode `input`, seed it and rank it in one go.
///
/// Seeds come from `palette` when given, otherwise from k-means over the
/// image (optionally shrunk to `seed_config.downscale` first). Ranking always
/// scans the full-resolution pixels.
pub fn rank_image_bytes(
    input: &[u8],
    config: &RankConfig,
    seed_config: &SeedConfig,
    palette: Option<&[PixelColor]>,
) -> Result<Ranking> {
    config.validate()?;
    let img = image::load_from_memory(input)?;
    let pixels = pixels_from_image(&img);
    if pixels.is_empty() {
        return Err(RankError::EmptyInput);
    }

    let seeds = match palette {
        Some(given) => given.to_vec(),
        None => match seed_config.downscale {
            Some(side) => {
                let sample = pixels_from_image(&downscale(&img, side));
                seed_palette(&sample, config.num_colors, seed_config)?
            }
            None => seed_palette(&pixels, config.num_colors, seed_config)?,
        },
    };

    rank_colors(&pixels, &seeds, config)
}

/// Rank the colors of an encoded image (PNG, JPEG, GIF, ...).
///
/// `palette` is an optional array of `#rrggbb` strings used as seeds instead
/// of k-means. Resolves to
/// `{ colors: [{ hex, rgb: [r, g, b], percentage }], uniqueColors }`.
#[wasm_bindgen]
pub fn rank_image_colors(
    input: Vec<u8>,
    num_colors: i32,
    tolerance: i32,
    palette: Option<Array>,
) -> std::result::Result<Object, JsValue> {
    let config = RankConfig::from_signed(num_colors.into(), tolerance.into()).map_err(to_js)?;

    let seeds = match palette {
        Some(js_palette) => {
            let mut tmp = Vec::new();
            for val in js_palette.iter() {
                let s = val
                    .as_string()
                    .ok_or_else(|| JsValue::from_str("Palette values must be strings"))?;
                tmp.push(PixelColor::from_hex(&s).map_err(to_js)?);
            }
            Some(tmp)
        }
        None => None,
    };

    let ranking = rank_image_bytes(&input, &config, &SeedConfig::default(), seeds.as_deref())
        .map_err(to_js)?;

    let colors_js = Array::new();
    for entry in &ranking.entries {
        let rgb_js = Array::new();
        for channel in entry.color.channels() {
            rgb_js.push(&JsValue::from(channel));
        }
        let entry_js = Object::new();
        Reflect::set(&entry_js, &JsValue::from_str("hex"), &JsValue::from_str(&entry.hex))?;
        Reflect::set(&entry_js, &JsValue::from_str("rgb"), &rgb_js)?;
        Reflect::set(
            &entry_js,
            &JsValue::from_str("percentage"),
            &JsValue::from_f64(entry.percentage),
        )?;
        colors_js.push(&entry_js);
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("colors"), &colors_js)?;
    Reflect::set(
        &result,
        &JsValue::from_str("uniqueColors"),
        &JsValue::from_f64(ranking.unique_color_count as f64),
    )?;

    Ok(result)
}

fn to_js(e: RankError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
