use imageproc::image::{GrayImage, Luma};
use imageproc::template_matching::{match_template, MatchTemplateMethod};
use platematch::lowlevel::{resize_u8, scan_sqdiff_normed, SqDiffPlan};
use platematch::{
    resolve, resolve_region, DecisionPolicy, Gallery, ImageView, Interpolation, Outcome,
    PlateMatchError, Rect, Template,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_plate(width: usize, height: usize, seed: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13 + seed) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn gradient(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push((40 + x * 3 + y * 2).min(255) as u8);
        }
    }
    data
}

fn random_image(rng: &mut StdRng, width: usize, height: usize, lo: u8, hi: u8) -> Vec<u8> {
    (0..width * height).map(|_| rng.random_range(lo..hi)).collect()
}

#[test]
fn score_map_agrees_with_imageproc() {
    let mut rng = StdRng::seed_from_u64(7);
    let (img_w, img_h, tpl_w, tpl_h) = (14, 9, 5, 3);
    let image = random_image(&mut rng, img_w, img_h, 20, 230);
    let template = random_image(&mut rng, tpl_w, tpl_h, 20, 230);

    let view = ImageView::from_slice(&image, img_w, img_h).unwrap();
    let plan = SqDiffPlan::from_view(ImageView::from_slice(&template, tpl_w, tpl_h).unwrap());
    let ours = scan_sqdiff_normed(view, &plan).unwrap();

    let image_buf = GrayImage::from_raw(img_w as u32, img_h as u32, image.clone()).unwrap();
    let tpl_buf = GrayImage::from_raw(tpl_w as u32, tpl_h as u32, template.clone()).unwrap();
    let reference = match_template(
        &image_buf,
        &tpl_buf,
        MatchTemplateMethod::SumOfSquaredErrorsNormalized,
    );

    assert_eq!(ours.width(), reference.width() as usize);
    assert_eq!(ours.height(), reference.height() as usize);
    for y in 0..ours.height() {
        for x in 0..ours.width() {
            let Luma([expected]) = *reference.get_pixel(x as u32, y as u32);
            let got = ours.get(x, y).unwrap();
            assert!(
                (got - expected.min(1.0)).abs() < 1e-4,
                "({x}, {y}): got {got}, expected {expected}"
            );
        }
    }
}

#[test]
fn exact_template_scores_zero_and_wins() {
    let (w, h) = (36, 12);
    let region_data = make_plate(w, h, 3);
    let region = ImageView::from_slice(&region_data, w, h).unwrap();

    let gallery: Gallery = vec![
        Template::new("XYZ789", make_plate(w, h, 90), w, h).unwrap(),
        Template::new("ABC123", region_data.clone(), w, h).unwrap(),
        Template::new("QQQ000", make_plate(w, h, 200), w, h).unwrap(),
    ]
    .into_iter()
    .collect();

    let best = resolve(region, &gallery, Interpolation::Bilinear).unwrap();
    assert_eq!(best.index, Some(1));
    assert_eq!(best.label.as_deref(), Some("ABC123"));
    assert_eq!(best.score, 0.0);
}

#[test]
fn rescaled_template_still_matches() {
    let (tpl_w, tpl_h) = (80, 24);
    let (reg_w, reg_h) = (40, 12);
    let source = gradient(tpl_w, tpl_h);
    let source_view = ImageView::from_slice(&source, tpl_w, tpl_h).unwrap();
    let region =
        resize_u8(source_view, reg_w, reg_h, Interpolation::Bilinear).unwrap();

    let mut inverted = source.clone();
    inverted.iter_mut().for_each(|v| *v = 255 - *v);
    let gallery: Gallery = vec![
        Template::new("INV", inverted, tpl_w, tpl_h).unwrap(),
        Template::new("GRAD", source, tpl_w, tpl_h).unwrap(),
    ]
    .into_iter()
    .collect();

    for interpolation in [Interpolation::Bilinear, Interpolation::Nearest] {
        let best = resolve(region.view(), &gallery, interpolation).unwrap();
        assert_eq!(best.label.as_deref(), Some("GRAD"));
        assert!(best.score < 0.05, "score {}", best.score);
    }
}

#[test]
fn ties_go_to_the_earliest_template() {
    let (w, h) = (20, 8);
    let data = make_plate(w, h, 11);
    let region = ImageView::from_slice(&data, w, h).unwrap();
    let gallery: Gallery = vec![
        Template::new("FIRST", data.clone(), w, h).unwrap(),
        Template::new("SECOND", data.clone(), w, h).unwrap(),
    ]
    .into_iter()
    .collect();

    for _ in 0..3 {
        let best = resolve(region, &gallery, Interpolation::Bilinear).unwrap();
        assert_eq!(best.index, Some(0));
        assert_eq!(best.label.as_deref(), Some("FIRST"));
    }
}

#[test]
fn unrelated_region_is_unmatched() {
    let mut rng = StdRng::seed_from_u64(42);
    let (w, h) = (30, 10);
    let dark = random_image(&mut rng, w, h, 0, 40);
    let region = ImageView::from_slice(&dark, w, h).unwrap();

    let gallery: Gallery = (0..4)
        .map(|i| {
            let bright = random_image(&mut rng, w, h, 200, 255);
            Template::new(format!("P{i}"), bright, w, h).unwrap()
        })
        .collect();

    let best = resolve(region, &gallery, Interpolation::Bilinear).unwrap();
    assert!(best.score >= 0.5);
    assert!(best.score <= 1.0);
    assert_eq!(DecisionPolicy::default().decide(&best), Outcome::Unmatched);
}

#[test]
fn black_region_never_matches() {
    let (w, h) = (16, 6);
    let black = vec![0u8; w * h];
    let region = ImageView::from_slice(&black, w, h).unwrap();
    let gallery: Gallery = std::iter::once(Template::new("BLACK", black.clone(), w, h).unwrap())
        .collect();

    let best = resolve(region, &gallery, Interpolation::Bilinear).unwrap();
    assert_eq!(best.score, 1.0);
    assert_eq!(DecisionPolicy::default().decide(&best), Outcome::Unmatched);
}

#[test]
fn degenerate_region_is_rejected() {
    let frame = make_plate(64, 32, 0);
    let gray = ImageView::from_slice(&frame, 64, 32).unwrap();
    let gallery: Gallery = std::iter::once(Template::new("A", make_plate(8, 4, 1), 8, 4).unwrap())
        .collect();

    let rect = Rect::new(10, 10, 0, 5);
    let err = resolve_region(gray, rect, &gallery, Interpolation::Bilinear)
        .err()
        .unwrap();
    assert_eq!(
        err,
        PlateMatchError::InvalidRegion {
            x: 10,
            y: 10,
            width: 0,
            height: 5,
        }
    );
}

#[test]
fn looser_threshold_never_rejects_a_stricter_match() {
    let mut rng = StdRng::seed_from_u64(3);
    let (w, h) = (24, 8);
    let region_data = random_image(&mut rng, w, h, 30, 220);
    let region = ImageView::from_slice(&region_data, w, h).unwrap();
    let gallery: Gallery = (0..5)
        .map(|i| Template::new(format!("T{i}"), random_image(&mut rng, w, h, 30, 220), w, h).unwrap())
        .collect();
    let best = resolve(region, &gallery, Interpolation::Bilinear).unwrap();

    let thresholds = [0.0f32, 0.05, 0.1, 0.2, 0.3, 0.5, 0.8, 1.0, 1.5];
    for pair in thresholds.windows(2) {
        let strict = DecisionPolicy::new(pair[0]).unwrap().decide(&best);
        let loose = DecisionPolicy::new(pair[1]).unwrap().decide(&best);
        if strict.is_matched() {
            assert_eq!(strict, loose);
        }
    }
    assert!(DecisionPolicy::new(1.5).unwrap().decide(&best).is_matched());
}
