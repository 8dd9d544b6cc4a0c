mod common;
use common::*;

#[test]
fn single_bright_patch_yields_one_contour() -> anyhow::Result<()> {
    let img = bright_patch_scene(40, 30);
    let detector = BuildingDetector::new();

    let contours = detector.light_contours(&img)?;
    assert_eq!(contours.len(), 1);

    let rect = contours[0].oriented_rect().expect("contour has points");
    let (short, long) = rect.sides();
    assert!((short - 30.0).abs() <= 2.0, "short side was {}", short);
    assert!((long - 40.0).abs() <= 2.0, "long side was {}", long);

    let (cx, cy) = rect.center();
    assert!((cx - 79.5).abs() <= 1.5, "center x was {}", cx);
    assert!((cy - 84.5).abs() <= 1.5, "center y was {}", cy);

    Ok(())
}

#[test]
fn light_mask_covers_exactly_the_bright_patch() -> anyhow::Result<()> {
    let img = bright_patch_scene(40, 30);
    let mask = BuildingDetector::new().light_mask(&img)?;

    assert_eq!(count_set(&mask), 40 * 30);
    assert_eq!(mask.get_pixel(60, 70)[0], 255);
    assert_eq!(mask.get_pixel(99, 99)[0], 255);
    assert_eq!(mask.get_pixel(59, 70)[0], 0);
    assert_eq!(mask.get_pixel(100, 99)[0], 0);

    Ok(())
}

#[test]
fn patch_below_min_area_is_dropped() -> anyhow::Result<()> {
    let img = bright_patch_scene(15, 15);
    let detector = BuildingDetector::new();

    // The mask still sees the patch, only the area filter removes it
    assert!(count_set(&detector.light_mask(&img)?) > 0);
    assert!(detector.light_contours(&img)?.is_empty());
    assert!(detector.detect_with_mode(&img, DetectionMode::LightOnly)?.is_empty());

    Ok(())
}

#[test]
fn area_threshold_is_exclusive() -> anyhow::Result<()> {
    let detector = BuildingDetector::new();

    // Boundary through pixel centers encloses (w - 1) * (h - 1)
    let exactly_300 = bright_patch_scene(16, 21);
    assert!(detector.light_contours(&exactly_300)?.is_empty());

    let just_above = bright_patch_scene(16, 22);
    let contours = detector.light_contours(&just_above)?;
    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0].area(), 315.0);

    Ok(())
}

#[test]
fn red_roofs_on_both_sides_of_the_hue_wrap_are_detected() -> anyhow::Result<()> {
    let mut img = solid(200, 120, MID_GRAY);
    // hue 5 and hue 170 in 8-bit HSV
    fill_rect(&mut img, 20, 20, 40, 40, image::Rgb([255, 42, 0]));
    fill_rect(&mut img, 120, 20, 40, 40, image::Rgb([255, 0, 85]));

    let contours = BuildingDetector::new().light_contours(&img)?;
    assert_eq!(contours.len(), 2);

    Ok(())
}

#[test]
fn cyan_roof_is_not_a_light_building() -> anyhow::Result<()> {
    let mut img = solid(120, 120, MID_GRAY);
    // hue 90, saturated but bright only in two channels
    fill_rect(&mut img, 30, 30, 40, 40, image::Rgb([0, 160, 160]));

    let mask = BuildingDetector::new().light_mask(&img)?;
    assert_eq!(count_set(&mask), 0);

    Ok(())
}
