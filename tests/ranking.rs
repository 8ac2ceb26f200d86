use std::io::Cursor;

use color_ranker::{
    PixelColor, RankConfig, RankError, SeedConfig, rank_colors, rank_image_bytes,
};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// Encode an image whose left `left_cols` columns are `left` and the rest `right`.
fn two_tone_png(width: u32, height: u32, left_cols: u32, left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        if x < left_cols { Rgb(left) } else { Rgb(right) }
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn ranks_png_with_given_palette() {
    let png = two_tone_png(4, 4, 3, [0, 0, 0], [255, 255, 255]);
    let seeds = [PixelColor::new(0, 0, 0), PixelColor::WHITE];

    let ranking =
        rank_image_bytes(&png, &RankConfig::new(2, 0), &SeedConfig::default(), Some(&seeds[..]))
            .unwrap();

    assert_eq!(ranking.total_pixels, 16);
    assert_eq!(ranking.entries[0].hex, "#000000");
    assert_eq!(ranking.entries[0].percentage, 0.75);
    assert_eq!(ranking.entries[1].hex, "#ffffff");
    assert_eq!(ranking.entries[1].percentage, 0.25);
    assert_eq!(ranking.unique_color_count, 2);
}

#[test]
fn seeds_from_image_when_no_palette() {
    let png = two_tone_png(10, 10, 7, [200, 30, 30], [20, 20, 180]);

    let ranking =
        rank_image_bytes(&png, &RankConfig::default(), &SeedConfig::default(), None).unwrap();

    assert_eq!(ranking.entries.len(), 10);
    assert_eq!(ranking.entries[0].color, PixelColor::new(200, 30, 30));
    assert_eq!(ranking.entries[0].percentage, 0.7);
    assert_eq!(ranking.entries[1].color, PixelColor::new(20, 20, 180));
    assert!((ranking.entries[1].percentage - 0.3).abs() < 1e-12);
    assert!(ranking.entries[2..].iter().all(|e| e.is_sentinel()));
    assert_eq!(ranking.unique_color_count, 2);
}

#[test]
fn downscaled_seeding_still_ranks_every_pixel() {
    let png = two_tone_png(40, 20, 10, [10, 200, 10], [240, 240, 0]);
    let seed_config = SeedConfig {
        downscale: Some(8),
        ..SeedConfig::default()
    };

    let ranking = rank_image_bytes(&png, &RankConfig::new(3, 10), &seed_config, None).unwrap();

    assert_eq!(ranking.total_pixels, 800);
    let sum: f64 = ranking.real_entries().map(|e| e.percentage).sum();
    assert!((sum - 1.0).abs() < 1e-12);
    assert!(ranking.entries[2].is_sentinel());
}

#[test]
fn output_length_matches_request() {
    let png = two_tone_png(6, 6, 2, [1, 1, 1], [90, 90, 90]);
    let seeds = [PixelColor::new(1, 1, 1), PixelColor::new(90, 90, 90)];
    for n in 1..=6 {
        let config = RankConfig::new(n, 10);
        let ranking =
            rank_image_bytes(&png, &config, &SeedConfig::default(), Some(&seeds[..])).unwrap();
        assert_eq!(ranking.entries.len(), n);
    }
}

#[test]
fn garbage_bytes_fail_to_decode() {
    let (config, seed_config) = (RankConfig::default(), SeedConfig::default());
    let err = rank_image_bytes(b"not an image", &config, &seed_config, None).unwrap_err();
    assert!(matches!(err, RankError::Decode(_)));
}

#[test]
fn unmatched_share_is_not_renormalised() {
    // Only the black seed is given; the grey third of the image matches
    // nothing and still counts toward the total.
    let pixels: Vec<PixelColor> = (0..9)
        .map(|i| if i < 6 { PixelColor::new(0, 0, 0) } else { PixelColor::new(128, 128, 128) })
        .collect();
    let black = PixelColor::new(0, 0, 0);
    let ranking = rank_colors(&pixels, &[black], &RankConfig::new(1, 10)).unwrap();
    assert!((ranking.entries[0].percentage - 2.0 / 3.0).abs() < 1e-12);
}
