//! Domain-level regression tests for retro-quant.
//!
//! Each test pins a property of the full pipeline rather than a single
//! function, and says what it means when it breaks.

#[cfg(test)]
mod domain_tests {
    use crate::api::{convert_to_retro, ConvertError, PaletteSource, RetroConverter};
    use crate::color::Rgb;
    use crate::dither::{dither, dither_indices};
    use crate::palette::{build_palette, Palette};
    use crate::preprocess::pixelate;
    use crate::quantize::quantize;
    use crate::raster::Raster;
    use pretty_assertions::assert_eq;

    /// Deterministic pseudo-random raster (LCG) so tests do not depend on
    /// an RNG crate's stream.
    fn noise_raster(width: usize, height: usize, mut state: u32) -> Raster {
        let mut next = || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        };
        let pixels = (0..width * height)
            .map(|_| Rgb::new(next(), next(), next()))
            .collect();
        Raster::new(width, height, pixels).unwrap()
    }

    fn gray_gradient(width: usize, height: usize) -> Raster {
        let pixels = (0..width * height)
            .map(|i| {
                let v = ((i % width) * 255 / (width - 1)) as u8;
                Rgb::new(v, v, v)
            })
            .collect();
        Raster::new(width, height, pixels).unwrap()
    }

    fn channel_means(raster: &Raster) -> [f64; 3] {
        let n = raster.pixels().len() as f64;
        let mut sum = [0.0f64; 3];
        for p in raster.pixels() {
            sum[0] += p.r as f64;
            sum[1] += p.g as f64;
            sum[2] += p.b as f64;
        }
        [sum[0] / n, sum[1] / n, sum[2] / n]
    }

    fn checkerboard() -> Raster {
        Raster::from_rows(vec![
            vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)],
            vec![Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)],
        ])
        .unwrap()
    }

    // ========================================================================
    // Label validity
    // ========================================================================

    /// If this breaks, it means: quantization produced the wrong number of
    /// labels or an index past the end of the palette, which would panic
    /// when materializing or write a corrupt indexed image.
    #[test]
    fn test_labels_cover_raster_and_index_palette() {
        for (w, h, n) in [(1, 1, 1), (7, 3, 2), (16, 16, 8), (33, 17, 64), (20, 20, 256)] {
            let raster = noise_raster(w, h, (w * 31 + h) as u32);
            let palette = build_palette(raster.pixels(), n, 42).unwrap();
            for labels in [
                quantize(&raster, &palette),
                dither_indices(&raster, &palette).unwrap(),
            ] {
                assert_eq!(labels.labels().len(), w * h, "{w}x{h} n={n}");
                assert!(
                    labels.labels().iter().all(|&l| (l as usize) < palette.len()),
                    "{w}x{h} n={n}: label out of range for {} colors",
                    palette.len()
                );
            }
        }
    }

    // ========================================================================
    // Palette construction
    // ========================================================================

    /// If this breaks, it means: a single-cluster run no longer returns the
    /// centroid, so center updates are unweighted or rounding is off.
    #[test]
    fn test_single_color_palette_is_mean() {
        let raster = noise_raster(23, 19, 7);
        let mean = channel_means(&raster);
        let palette = build_palette(raster.pixels(), 1, 99).unwrap();
        assert_eq!(palette.len(), 1);
        let c = palette.get(0);
        for (got, want) in [(c.r, mean[0]), (c.g, mean[1]), (c.b, mean[2])] {
            assert!(
                (got as f64 - want).abs() <= 0.5 + 1e-9,
                "channel {got} vs mean {want:.3}"
            );
        }
    }

    /// If this breaks, it means: empty input reaches the clustering loop.
    #[test]
    fn test_empty_pixels_invalid_input() {
        assert!(matches!(
            build_palette(&[], 8, 0),
            Err(ConvertError::InvalidInput(_))
        ));
    }

    // ========================================================================
    // Idempotence
    // ========================================================================

    /// If this breaks, it means: nearest-color matching is not stable for
    /// exact palette colors, or rebuilding a palette from an already
    /// reduced image no longer recovers its colors.
    #[test]
    fn test_quantize_is_idempotent() {
        let raster = noise_raster(40, 30, 1234);
        let first = RetroConverter::new(12)
            .dithering(false)
            .seed(5)
            .convert(&raster)
            .unwrap();
        let once = first.to_raster();

        let again = quantize(&once, first.palette()).to_raster(first.palette());
        assert_eq!(again, once);

        let rebuilt = convert_to_retro(&once, 12, false, 77).unwrap();
        assert_eq!(rebuilt, once);
    }

    // ========================================================================
    // Brightness preservation
    // ========================================================================

    /// If this breaks, it means: error is dropped or clamped inside the
    /// accumulator instead of only at lookup, so dithered tones drift
    /// toward the palette extremes.
    #[test]
    fn test_dither_preserves_mean_brightness_gray() {
        let raster = gray_gradient(256, 256);
        let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
        let out = dither(&raster, &palette).unwrap();

        let before = channel_means(&raster);
        let after = channel_means(&out);
        for c in 0..3 {
            assert!(
                (before[c] - after[c]).abs() <= 2.0,
                "channel {c}: input mean {:.2}, dithered mean {:.2}",
                before[c],
                after[c]
            );
        }

        // Plain quantization of the same gradient has only two levels too,
        // but dithering is what keeps the mid-tones: a 128 column must not
        // be solid.
        let mid = (0..256).map(|y| out.get(128, y)).collect::<Vec<_>>();
        assert!(mid.iter().any(|&p| p == Rgb::new(0, 0, 0)));
        assert!(mid.iter().any(|&p| p == Rgb::new(255, 255, 255)));
    }

    /// Cube-corner palette dithers each channel independently.
    #[test]
    fn test_dither_preserves_mean_brightness_color() {
        let (w, h) = (192, 192);
        let pixels = (0..w * h)
            .map(|i| {
                let x = i % w;
                let y = i / w;
                Rgb::new(
                    (x * 255 / (w - 1)) as u8,
                    (y * 255 / (h - 1)) as u8,
                    ((x + y) * 255 / (w + h - 2)) as u8,
                )
            })
            .collect();
        let raster = Raster::new(w, h, pixels).unwrap();
        let palette = Palette::classic(8).unwrap();
        let out = dither(&raster, &palette).unwrap();

        let before = channel_means(&raster);
        let after = channel_means(&out);
        for c in 0..3 {
            assert!(
                (before[c] - after[c]).abs() <= 2.0,
                "channel {c}: input mean {:.2}, dithered mean {:.2}",
                before[c],
                after[c]
            );
        }
    }

    // ========================================================================
    // Boundaries
    // ========================================================================

    /// If this breaks, it means: diffusion writes outside the raster.
    #[test]
    fn test_one_by_one_dither() {
        let raster = Raster::new(1, 1, vec![Rgb::new(10, 200, 30)]).unwrap();
        for palette in [
            Palette::new(vec![Rgb::new(0, 0, 0)]).unwrap(),
            Palette::classic(8).unwrap(),
            Palette::classic(256).unwrap(),
        ] {
            let out = dither(&raster, &palette).unwrap();
            assert_eq!(out.pixels().len(), 1);
            let idx = palette.find_nearest_rgb(raster.get(0, 0));
            assert_eq!(out.get(0, 0), palette.get(idx));
        }
    }

    /// Single row and single column rasters skip every out-of-bounds
    /// neighbor.
    #[test]
    fn test_degenerate_strips_dither() {
        let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
        let row = gray_gradient(50, 1);
        let col = Raster::new(1, 50, row.pixels().to_vec()).unwrap();
        assert_eq!(dither(&row, &palette).unwrap().width(), 50);
        assert_eq!(dither(&col, &palette).unwrap().height(), 50);
    }

    #[test]
    fn test_pixelate_block_one_is_noop() {
        let raster = noise_raster(13, 9, 3);
        assert_eq!(pixelate(&raster, 1).unwrap(), raster);
    }

    /// If this breaks, it means: the unclamped accumulator diverges when
    /// the palette cannot represent the image at all.
    #[test]
    fn test_unreachable_palette_stays_valid() {
        let raster = Raster::new(64, 64, vec![Rgb::new(255, 255, 255); 64 * 64]).unwrap();
        let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(40, 40, 40)]).unwrap();
        let out = dither(&raster, &palette).unwrap();
        assert!(out.pixels().iter().all(|&p| p == Rgb::new(40, 40, 40)));
    }

    // ========================================================================
    // Concrete scenario
    // ========================================================================

    /// If this breaks, it means: k-means no longer converges onto the two
    /// exact colors of a checkerboard.
    #[test]
    fn test_checkerboard_two_colors_round_trips() {
        let raster = checkerboard();
        for seed in [0, 1, 42, u64::MAX] {
            let palette = build_palette(raster.pixels(), 2, seed).unwrap();
            let mut colors = palette.colors().to_vec();
            colors.sort();
            assert_eq!(colors, vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);

            assert_eq!(convert_to_retro(&raster, 2, false, seed).unwrap(), raster);
            assert_eq!(convert_to_retro(&raster, 2, true, seed).unwrap(), raster);
        }
    }

    /// Dithering and quantization must differ on mid-tones: otherwise the
    /// dithering flag is being ignored.
    #[test]
    fn test_dithering_flag_changes_mid_tones() {
        let raster = Raster::new(16, 16, vec![Rgb::new(128, 128, 128); 256]).unwrap();
        let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
        let flat = RetroConverter::new(2)
            .palette(PaletteSource::Fixed(palette.clone()))
            .dithering(false)
            .convert(&raster)
            .unwrap();
        let dithered = RetroConverter::new(2)
            .palette(PaletteSource::Fixed(palette))
            .convert(&raster)
            .unwrap();

        assert!(flat.indices().iter().all(|&i| i == 1));
        let whites = dithered.indices().iter().filter(|&&i| i == 1).count();
        assert!((100..=156).contains(&whites), "{whites} white of 256");
    }
}
