use image::{Rgb, RgbImage};
use imageproc::filter::separable_filter_equal;
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use rand::Rng;

use crate::error::{SegprepError, SegprepResult};

/// Corner pixels introduced by non-axis-aligned stripe rotation take this
/// fill; callers treat it as acceptable background noise.
const ROTATION_FILL: Rgb<u8> = Rgb([0, 0, 0]);

const STRIPE_ANGLES_DEG: [f32; 4] = [0.0, 45.0, 90.0, 135.0];

const BLUR_KERNEL_TAPS: usize = 25;
const BLUR_SIGMA: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundStyle {
    Solid,
    Striped,
    Blended,
}

/// Synthesizes a background of the requested size, choosing uniformly among
/// the three styles. Every draw comes from the injected generator; seed it
/// for reproducible output.
pub fn generate<R: Rng>(rng: &mut R, width: u32, height: u32) -> SegprepResult<RgbImage> {
    let style = match rng.gen_range(0..3u8) {
        0 => BackgroundStyle::Solid,
        1 => BackgroundStyle::Striped,
        _ => BackgroundStyle::Blended,
    };
    generate_styled(rng, style, width, height)
}

pub fn generate_styled<R: Rng>(
    rng: &mut R,
    style: BackgroundStyle,
    width: u32,
    height: u32,
) -> SegprepResult<RgbImage> {
    if width == 0 || height == 0 {
        return Err(SegprepError::validation(
            "background canvas must have non-zero width and height",
        ));
    }
    Ok(match style {
        BackgroundStyle::Solid => solid(rng, width, height),
        BackgroundStyle::Striped => striped(rng, width, height),
        BackgroundStyle::Blended => blended(rng, width, height),
    })
}

fn random_color<R: Rng>(rng: &mut R) -> Rgb<u8> {
    Rgb([
        rng.gen_range(0..=u8::MAX),
        rng.gen_range(0..=u8::MAX),
        rng.gen_range(0..=u8::MAX),
    ])
}

fn solid<R: Rng>(rng: &mut R, width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, random_color(rng))
}

fn striped<R: Rng>(rng: &mut R, width: u32, height: u32) -> RgbImage {
    let bands = rng.gen_range(2..=5u32);
    let colors: Vec<Rgb<u8>> = (0..bands).map(|_| random_color(rng)).collect();
    let canvas = striped_canvas(&colors, width, height);

    let angle = STRIPE_ANGLES_DEG[rng.gen_range(0..STRIPE_ANGLES_DEG.len())];
    if angle == 0.0 {
        return canvas;
    }
    rotate_about_center(
        &canvas,
        angle.to_radians(),
        Interpolation::Bilinear,
        ROTATION_FILL,
    )
}

/// Vertical bands of equal integer width, left to right. The division
/// remainder is absorbed by the final band so the canvas width is matched
/// exactly; when width < bands the final band covers the whole canvas.
fn striped_canvas(colors: &[Rgb<u8>], width: u32, height: u32) -> RgbImage {
    let bands = colors.len() as u32;
    let band_width = width / bands;
    RgbImage::from_fn(width, height, |x, _| {
        let band = if band_width == 0 {
            bands - 1
        } else {
            (x / band_width).min(bands - 1)
        };
        colors[band as usize]
    })
}

fn blended<R: Rng>(rng: &mut R, width: u32, height: u32) -> RgbImage {
    let noise = RgbImage::from_fn(width, height, |_, _| random_color(rng));
    let kernel = gaussian_kernel(BLUR_KERNEL_TAPS, BLUR_SIGMA);
    separable_filter_equal(&noise, &kernel)
}

fn gaussian_kernel(taps: usize, sigma: f32) -> Vec<f32> {
    let radius = (taps / 2) as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / denom).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}
