use image::{GrayImage, Luma, RgbImage, RgbaImage, imageops};

/// Binary foreground mask from the alpha channel: 255 where alpha > 0, else 0.
/// Output dimensions equal the input's.
pub fn alpha_mask(fg: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(fg.width(), fg.height(), |x, y| {
        let alpha = fg.get_pixel(x, y)[3];
        Luma([if alpha > 0 { 255 } else { 0 }])
    })
}

/// Standard "over" compositing of a straight-alpha foreground onto an opaque
/// background: `out = a * fg + (1 - a) * bg` with `a = alpha / 255`, computed
/// in f32 and rounded back to u8. The background is resampled bilinearly to
/// the foreground's dimensions when they differ. Channel order is RGB on both
/// sides; conversions live at the load/save boundary, never here.
pub fn composite_over(fg: &RgbaImage, bg: &RgbImage) -> RgbImage {
    let (width, height) = fg.dimensions();
    let resized;
    let bg = if bg.dimensions() == (width, height) {
        bg
    } else {
        resized = imageops::resize(bg, width, height, imageops::FilterType::Triangle);
        &resized
    };

    let mut out = RgbImage::new(width, height);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let f = fg.get_pixel(x, y);
        let b = bg.get_pixel(x, y);
        let alpha = f32::from(f[3]) / 255.0;
        for c in 0..3 {
            let blended = alpha * f32::from(f[c]) + (1.0 - alpha) * f32::from(b[c]);
            px[c] = blended.round() as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use image::{Rgb, Rgba};

    use super::*;

    fn diff(a: u8, b: u8) -> u8 {
        a.abs_diff(b)
    }

    #[test]
    fn mask_is_binary_and_thresholds_at_zero() {
        let mut fg = RgbaImage::new(3, 2);
        fg.put_pixel(0, 0, Rgba([50, 60, 70, 0]));
        fg.put_pixel(1, 0, Rgba([50, 60, 70, 1]));
        fg.put_pixel(2, 0, Rgba([50, 60, 70, 128]));
        fg.put_pixel(0, 1, Rgba([50, 60, 70, 255]));
        fg.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        fg.put_pixel(2, 1, Rgba([255, 255, 255, 2]));

        let mask = alpha_mask(&fg);
        assert_eq!(mask.dimensions(), (3, 2));
        for (x, y, px) in mask.enumerate_pixels() {
            let expected = if fg.get_pixel(x, y)[3] > 0 { 255 } else { 0 };
            assert_eq!(px[0], expected, "mask mismatch at ({x},{y})");
            assert!(px[0] == 0 || px[0] == 255);
        }
    }

    #[test]
    fn fully_opaque_foreground_wins() {
        let fg = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
        let bg = RgbImage::from_pixel(4, 4, Rgb([0, 0, 255]));

        let out = composite_over(&fg, &bg);
        assert_eq!(out.dimensions(), (4, 4));
        for px in out.pixels() {
            assert_eq!(px, &Rgb([255, 0, 0]));
        }
    }

    #[test]
    fn fully_transparent_foreground_shows_background() {
        let fg = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 0]));
        let bg = RgbImage::from_pixel(3, 3, Rgb([12, 34, 56]));

        let out = composite_over(&fg, &bg);
        for px in out.pixels() {
            assert_eq!(px, &Rgb([12, 34, 56]));
        }
    }

    #[test]
    fn checkerboard_alpha_selects_per_pixel() {
        let mut fg = RgbaImage::from_pixel(2, 2, Rgba([200, 10, 10, 255]));
        fg.put_pixel(0, 0, Rgba([200, 10, 10, 0]));
        fg.put_pixel(1, 1, Rgba([200, 10, 10, 0]));
        let bg = RgbImage::from_pixel(2, 2, Rgb([0, 255, 0]));

        let out = composite_over(&fg, &bg);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 255, 0]));
        assert_eq!(out.get_pixel(1, 1), &Rgb([0, 255, 0]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([200, 10, 10]));
        assert_eq!(out.get_pixel(0, 1), &Rgb([200, 10, 10]));
    }

    #[test]
    fn half_alpha_blends_both_sides() {
        let fg = RgbaImage::from_pixel(1, 1, Rgba([200, 0, 100, 128]));
        let bg = RgbImage::from_pixel(1, 1, Rgb([0, 200, 100]));

        let out = composite_over(&fg, &bg);
        let px = out.get_pixel(0, 0);
        let a = 128.0f32 / 255.0;
        let expected = [
            a * 200.0,
            (1.0 - a) * 200.0,
            a * 100.0 + (1.0 - a) * 100.0,
        ];
        for c in 0..3 {
            assert!(diff(px[c], expected[c].round() as u8) <= 1);
        }
    }

    #[test]
    fn background_is_resized_to_foreground_dimensions() {
        let fg = RgbaImage::from_pixel(4, 6, Rgba([0, 0, 0, 0]));
        let bg = RgbImage::from_pixel(2, 2, Rgb([90, 90, 90]));

        let out = composite_over(&fg, &bg);
        assert_eq!(out.dimensions(), (4, 6));
        // Constant background stays constant under resampling.
        for px in out.pixels() {
            for c in 0..3 {
                assert!(diff(px[c], 90) <= 1);
            }
        }
    }
}
