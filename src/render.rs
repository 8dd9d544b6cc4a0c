use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use imageproc::point::Point;

use crate::models::{BuildingDetection, OrientedRect};

pub const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
pub const OUTLINE_THICKNESS: u32 = 2;

/// Draw a closed polygon, `thickness` pixels wide
pub fn draw_closed_polygon(canvas: &mut RgbImage, points: &[Point<i32>], color: Rgb<u8>, thickness: u32) {
    if points.is_empty() {
        return;
    }

    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        for offset in 0..thickness.max(1) as i32 {
            for (ox, oy) in [(offset, 0), (0, offset)] {
                draw_line_segment_mut(
                    canvas,
                    ((p1.x + ox) as f32, (p1.y + oy) as f32),
                    ((p2.x + ox) as f32, (p2.y + oy) as f32),
                    color,
                );
            }
        }
    }
}

pub fn draw_oriented_rect(canvas: &mut RgbImage, rect: &OrientedRect) {
    draw_closed_polygon(canvas, &rect.corners, OUTLINE_COLOR, OUTLINE_THICKNESS);
}

/// Draw every detection's rectangle onto the image in place
pub fn draw_detections(canvas: &mut RgbImage, detections: &[BuildingDetection]) {
    for detection in detections {
        draw_oriented_rect(canvas, &detection.rect);
    }
}

/// Copy of `original` with every detection drawn on it
pub fn annotate(original: &RgbImage, detections: &[BuildingDetection]) -> RgbImage {
    let mut canvas = original.clone();
    draw_detections(&mut canvas, detections);
    canvas
}
