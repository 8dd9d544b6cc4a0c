mod common;
use common::*;

use imageproc::point::Point;
use roofscan::render::{annotate, OUTLINE_COLOR};

fn rect_contour(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
    Contour::new(vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ])
}

#[test]
fn contour_area_and_bounds() {
    let contour = rect_contour(10, 20, 40, 30);
    assert_eq!(contour.area(), 300.0);
    assert_eq!(contour.bounds(), Some((10, 20, 40, 30)));

    // Orientation does not change the area
    let mut reversed = contour.points.clone();
    reversed.reverse();
    assert_eq!(Contour::new(reversed).area(), 300.0);

    let degenerate = Contour::new(vec![Point::new(0, 0), Point::new(5, 5)]);
    assert_eq!(degenerate.area(), 0.0);
    assert!(Contour::new(Vec::new()).oriented_rect().is_none());
}

#[test]
fn oriented_rect_of_axis_aligned_box() {
    let rect = rect_contour(0, 0, 30, 10)
        .oriented_rect()
        .expect("non-empty contour");

    assert_eq!(rect.sides(), (10.0, 30.0));
    assert_eq!(rect.area(), 300.0);
    assert_eq!(rect.center(), (15.0, 5.0));
    assert!((rect.aspect_ratio() - 3.0).abs() < 1e-6);
    assert_eq!(rect.angle() % 90.0, 0.0);
}

#[test]
fn oriented_rect_follows_a_diamond() {
    let diamond = Contour::new(vec![
        Point::new(20, 0),
        Point::new(40, 20),
        Point::new(20, 40),
        Point::new(0, 20),
    ]);
    let rect = diamond.oriented_rect().expect("non-empty contour");

    let (short, long) = rect.sides();
    let expected = (2.0f32 * 20.0 * 20.0).sqrt();
    assert!((short - expected).abs() < 0.5);
    assert!((long - expected).abs() < 0.5);
    assert!((rect.angle().abs() % 90.0 - 45.0).abs() < 1.0);
}

#[test]
fn annotate_draws_green_outlines_on_a_copy() -> anyhow::Result<()> {
    let img = bright_patch_scene(40, 30);
    let detections = BuildingDetector::new().detect(&img)?;
    assert_eq!(detections.len(), 1);

    let annotated = annotate(&img, &detections);

    assert_eq!(annotated.get_pixel(60, 70), &OUTLINE_COLOR);
    assert_eq!(annotated.get_pixel(80, 70), &OUTLINE_COLOR);
    // Patch interior stays untouched
    assert_eq!(annotated.get_pixel(80, 85), &WHITE_ROOF);
    // The source image is not modified
    assert_eq!(img.get_pixel(60, 70), &WHITE_ROOF);

    let green = annotated.pixels().filter(|p| **p == OUTLINE_COLOR).count();
    assert!(green >= 2 * (39 + 29));

    Ok(())
}

#[test]
fn detection_from_contour_keeps_area() {
    let detection = BuildingDetection::from_contour(&rect_contour(0, 0, 20, 20)).expect("has points");
    assert_eq!(detection.area, 400.0);
    assert_eq!(detection.rect.area(), 400.0);
}
