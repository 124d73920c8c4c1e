//! Scalar reference kernels for score evaluation.

use crate::kernel::{Kernel, ScoreMap};
use crate::template::SqDiffPlan;
use crate::util::{PlateMatchError, PlateMatchResult};
use crate::ImageView;

/// Scalar normalized squared-difference kernel.
///
/// `score = sum((I - T)^2) / sqrt(sum(I^2) * sum(T^2))`, clamped to `[0, 1]`.
/// A zero denominator scores `1.0`, so all-black windows or templates never
/// count as matches. Identical windows score exactly `0.0`.
pub struct SqDiffNormedScalar;

impl SqDiffNormedScalar {
    fn score_window(image: ImageView<'_, u8>, plan: &SqDiffPlan, x: usize, y: usize) -> f32 {
        let tpl_width = plan.width();
        let pixels = plan.pixels();

        let mut diff2 = 0.0f64;
        let mut sum_i2 = 0.0f64;
        for ty in 0..plan.height() {
            let img_row = match image.row(y + ty) {
                Some(row) => &row[x..x + tpl_width],
                None => return 1.0,
            };
            let tpl_row = &pixels[ty * tpl_width..(ty + 1) * tpl_width];
            for (&value, &t) in img_row.iter().zip(tpl_row) {
                let v = value as f64;
                let d = v - t as f64;
                diff2 += d * d;
                sum_i2 += v * v;
            }
        }

        let denom = (sum_i2 * plan.energy()).sqrt();
        if denom <= f64::EPSILON {
            return 1.0;
        }
        (diff2 / denom).min(1.0) as f32
    }
}

impl Kernel for SqDiffNormedScalar {
    type Plan = SqDiffPlan;

    fn score_at(image: ImageView<'_, u8>, plan: &Self::Plan, x: usize, y: usize) -> f32 {
        if image.width() < plan.width() || image.height() < plan.height() {
            return f32::INFINITY;
        }
        if x > image.width() - plan.width() || y > image.height() - plan.height() {
            return f32::INFINITY;
        }
        Self::score_window(image, plan, x, y)
    }

    fn scan_full(image: ImageView<'_, u8>, plan: &Self::Plan) -> PlateMatchResult<ScoreMap> {
        let img_width = image.width();
        let img_height = image.height();
        let tpl_width = plan.width();
        let tpl_height = plan.height();
        if img_width < tpl_width || img_height < tpl_height {
            return Err(PlateMatchError::RoiOutOfBounds {
                x: 0,
                y: 0,
                width: tpl_width,
                height: tpl_height,
                img_width,
                img_height,
            });
        }

        let map_width = img_width - tpl_width + 1;
        let map_height = img_height - tpl_height + 1;
        let mut scores = Vec::with_capacity(map_width * map_height);
        for y in 0..map_height {
            for x in 0..map_width {
                scores.push(Self::score_window(image, plan, x, y));
            }
        }
        Ok(ScoreMap::new(map_width, map_height, scores))
    }
}

#[cfg(test)]
mod tests {
    use super::SqDiffNormedScalar;
    use crate::kernel::Kernel;
    use crate::template::SqDiffPlan;
    use crate::ImageView;

    fn pattern(width: usize, height: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(((x * 31 + y * 17 + x * y) % 200 + 20) as u8);
            }
        }
        data
    }

    #[test]
    fn scan_locates_embedded_template() {
        let (img_w, img_h) = (12, 9);
        let image = pattern(img_w, img_h);
        let image_view = ImageView::from_slice(&image, img_w, img_h).unwrap();
        let tpl_view = image_view.roi(4, 3, 5, 4).unwrap();
        let plan = SqDiffPlan::from_view(tpl_view);

        let map = <SqDiffNormedScalar as Kernel>::scan_full(image_view, &plan).unwrap();
        assert_eq!((map.width(), map.height()), (8, 6));
        let (x, y, score) = map.min_loc().unwrap();
        assert_eq!((x, y), (4, 3));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn score_matches_bruteforce_formula() {
        let image = pattern(6, 4);
        let tpl: Vec<u8> = pattern(6, 4).iter().map(|v| v.saturating_add(9)).collect();
        let image_view = ImageView::from_slice(&image, 6, 4).unwrap();
        let tpl_view = ImageView::from_slice(&tpl, 6, 4).unwrap();
        let plan = SqDiffPlan::from_view(tpl_view);

        let mut diff2 = 0.0f64;
        let mut sum_i2 = 0.0f64;
        let mut sum_t2 = 0.0f64;
        for (&i, &t) in image.iter().zip(&tpl) {
            let (i, t) = (i as f64, t as f64);
            diff2 += (i - t) * (i - t);
            sum_i2 += i * i;
            sum_t2 += t * t;
        }
        let expected = diff2 / (sum_i2 * sum_t2).sqrt();

        let score = <SqDiffNormedScalar as Kernel>::score_at(image_view, &plan, 0, 0);
        assert!((score as f64 - expected).abs() < 1e-6);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn black_window_scores_worst() {
        let image = vec![0u8; 16];
        let tpl = pattern(4, 4);
        let image_view = ImageView::from_slice(&image, 4, 4).unwrap();
        let plan = SqDiffPlan::from_view(ImageView::from_slice(&tpl, 4, 4).unwrap());
        assert_eq!(
            <SqDiffNormedScalar as Kernel>::score_at(image_view, &plan, 0, 0),
            1.0
        );
    }

    #[test]
    fn oversized_template_is_rejected() {
        let image = pattern(3, 3);
        let tpl = pattern(4, 2);
        let image_view = ImageView::from_slice(&image, 3, 3).unwrap();
        let plan = SqDiffPlan::from_view(ImageView::from_slice(&tpl, 4, 2).unwrap());
        assert!(<SqDiffNormedScalar as Kernel>::scan_full(image_view, &plan).is_err());
        assert_eq!(
            <SqDiffNormedScalar as Kernel>::score_at(image_view, &plan, 0, 0),
            f32::INFINITY
        );
    }
}
