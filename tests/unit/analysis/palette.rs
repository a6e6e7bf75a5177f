//! Tests for palette quantization

#[cfg(test)]
mod tests {
    use atomosaic::analysis::palette::{Palette, quantize};
    use atomosaic::io::error::AtomosaicError;
    use image::{Rgb, RgbImage};
    use ndarray::Array2;
    use rand::{SeedableRng, rngs::StdRng};

    fn two_tone() -> RgbImage {
        RgbImage::from_fn(8, 8, |x, _| {
            if x < 4 {
                Rgb([10, 20, 30])
            } else {
                Rgb([30, 40, 50])
            }
        })
    }

    // Tests that the requested number of colors is always returned
    // Verified by dropping clusters that end up empty
    #[test]
    fn test_returns_exactly_k_colors() {
        let image = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 77]));
        let mut rng = StdRng::seed_from_u64(1);

        for k in [1, 2, 5, 16, 72] {
            let palette = Palette::from_image(&image, k, 20, &mut rng).unwrap();
            assert_eq!(palette.len(), k);
            assert!(!palette.is_empty());
        }
    }

    // Tests that a single cluster lands on the sample mean
    // Verified by skipping the rescale by the channel deviations
    #[test]
    fn test_single_color_is_mean() {
        let mut rng = StdRng::seed_from_u64(9);
        let palette = Palette::from_image(&two_tone(), 1, 20, &mut rng).unwrap();
        assert_eq!(palette.colors(), &[Rgb([20, 30, 40])]);
    }

    // Tests that k beyond the distinct colors still yields k valid colors
    // Verified by requiring distinct initial samples
    #[test]
    fn test_more_clusters_than_distinct_colors() {
        let mut rng = StdRng::seed_from_u64(4);
        let palette = Palette::from_image(&two_tone(), 6, 20, &mut rng).unwrap();

        assert_eq!(palette.len(), 6);
        for color in palette.colors() {
            assert!(
                *color == Rgb([10, 20, 30]) || *color == Rgb([30, 40, 50]),
                "unexpected color {color:?}"
            );
        }
    }

    // Tests that a flat image with zero deviation passes through unchanged
    // Verified by dividing by the raw zero deviation during whitening
    #[test]
    fn test_flat_image_palette() {
        let image = RgbImage::from_pixel(5, 5, Rgb([123, 45, 67]));
        let mut rng = StdRng::seed_from_u64(2);
        let palette = Palette::from_image(&image, 3, 20, &mut rng).unwrap();
        assert!(palette.colors().iter().all(|c| *c == Rgb([123, 45, 67])));
    }

    // Tests that rescaled centroids are clamped into the display range
    // Verified by casting without clamping
    #[test]
    fn test_out_of_range_samples_clamped() {
        let samples =
            Array2::from_shape_vec((2, 3), vec![-40.0, 100.0, 300.0, -40.0, 100.0, 300.0])
                .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let palette = quantize(&samples, 1, 5, &mut rng).unwrap();
        assert_eq!(palette.colors(), &[Rgb([0, 100, 255])]);
    }

    // Tests rejection of zero clusters and empty palettes
    // Verified by removing the emptiness checks
    #[test]
    fn test_invalid_palettes() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Palette::from_image(&two_tone(), 0, 20, &mut rng),
            Err(AtomosaicError::InvalidParameter { .. })
        ));
        assert!(matches!(
            Palette::from_image(&RgbImage::new(0, 0), 3, 20, &mut rng),
            Err(AtomosaicError::InvalidSourceData { .. })
        ));
        assert!(Palette::new(vec![]).is_err());
    }

    // Tests that random choice always returns a palette member
    // Verified by indexing one past the chosen position
    #[test]
    fn test_choose_returns_member() {
        let palette = Palette::new(vec![Rgb([1, 1, 1]), Rgb([2, 2, 2])]).unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..50 {
            assert!(palette.colors().contains(&palette.choose(&mut rng)));
        }
    }
}
