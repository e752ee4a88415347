/// Template matching implementation
///
/// Zero-mean normalized cross-correlation over the whole frame, thresholded in
/// raster order
use super::types::Position;
use image::{GrayImage, ImageBuffer, Luma};
use imageproc::integral_image::{integral_image, integral_squared_image};
use imageproc::template_matching::{MatchTemplateMethod, match_template};

/// Default acceptance threshold for correlation scores
pub const DEFAULT_THRESHOLD: f32 = 0.8;

type IntegralImage = ImageBuffer<Luma<u64>, Vec<u64>>;

/// Find every position in `frame` where `template` correlates at or above `threshold`
///
/// Positions are returned in the scan order of the score surface (row by row, then
/// column). Overlapping hits of one physical object are not merged. A template that
/// does not fit inside the frame yields no matches.
pub fn find_matches(frame: &GrayImage, template: &GrayImage, threshold: f32) -> Vec<Position> {
    if template.width() == 0 || template.height() == 0 {
        log::debug!(
            "⚠️ Skipping empty template: {}x{}",
            template.width(),
            template.height()
        );
        return Vec::new();
    }
    if template.width() > frame.width() || template.height() > frame.height() {
        log::debug!(
            "⚠️ Skipping template - too large for frame: {}x{} > {}x{}",
            template.width(),
            template.height(),
            frame.width(),
            frame.height()
        );
        return Vec::new();
    }

    let scores = correlation_coefficients(frame, template);
    let columns = frame.width() - template.width() + 1;

    scores
        .iter()
        .enumerate()
        .filter(|(_, score)| **score >= threshold)
        .map(|(i, _)| Position::new(i as u32 % columns, i as u32 / columns))
        .collect()
}

/// Mean-subtracted correlation score for every placement, in raster order
///
/// For `n` template pixels the score is
/// `(n·ΣTI − ΣT·ΣI) / sqrt((n·ΣT² − (ΣT)²) · (n·ΣI² − (ΣI)²))`, which is invariant to
/// brightness offsets. A flat template or a flat window scores 0.
fn correlation_coefficients(frame: &GrayImage, template: &GrayImage) -> Vec<f32> {
    let (tw, th) = template.dimensions();
    let n = u128::from(tw) * u128::from(th);

    let template_sum: u128 = template.pixels().map(|p| u128::from(p[0])).sum();
    let template_sq_sum: u128 = template
        .pixels()
        .map(|p| u128::from(p[0]) * u128::from(p[0]))
        .sum();
    let template_spread = (n * template_sq_sum - template_sum * template_sum) as f64;

    let placements = (frame.width() - tw + 1) as usize * (frame.height() - th + 1) as usize;
    if template_spread == 0.0 {
        return vec![0.0; placements];
    }

    // Σ T·I for every placement
    let cross = match_template(frame, template, MatchTemplateMethod::CrossCorrelation);
    let sums: IntegralImage = integral_image(frame);
    let sq_sums: IntegralImage = integral_squared_image(frame);

    let mut scores = Vec::with_capacity(placements);
    for (x, y, product) in cross.enumerate_pixels() {
        let window_sum = u128::from(window_total(&sums, x, y, tw, th));
        let window_sq_sum = u128::from(window_total(&sq_sums, x, y, tw, th));
        let window_spread = (n * window_sq_sum - window_sum * window_sum) as f64;
        if window_spread == 0.0 {
            scores.push(0.0);
            continue;
        }

        let numerator =
            n as f64 * f64::from(product[0]) - template_sum as f64 * window_sum as f64;
        let score = numerator / (template_spread * window_spread).sqrt();
        scores.push(score.clamp(-1.0, 1.0) as f32);
    }
    scores
}

/// Sum over the `width`×`height` window at (`x`, `y`); integral images carry a
/// leading zero row and column
fn window_total(integral: &IntegralImage, x: u32, y: u32, width: u32, height: u32) -> u64 {
    let at = |px: u32, py: u32| integral.get_pixel(px, py)[0];
    (at(x + width, y + height) + at(x, y)) - (at(x, y + height) + at(x + width, y))
}
