use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::HashMap;
use crate::models::Contour;

/// Find the outermost boundaries of the non-zero regions in a binary mask.
/// Holes and anything nested inside them are skipped.
pub fn find_external_contours(mask: &GrayImage) -> Vec<Contour> {
    find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| Contour::new(c.points))
        .collect()
}

/// Keep contours whose enclosed area is strictly greater than `min_area`
pub fn filter_by_area(contours: Vec<Contour>, min_area: f64) -> Vec<Contour> {
    contours
        .into_iter()
        .filter(|c| c.area() > min_area)
        .collect()
}

/// Clear connected regions (8-connectivity) of at most `max_pixels` pixels
pub fn remove_small_regions(mask: &GrayImage, max_pixels: u32) -> GrayImage {
    let labeled = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    let mut counts: HashMap<u32, u32> = HashMap::new();
    for label in labeled.pixels() {
        if label[0] != 0 {
            *counts.entry(label[0]).or_insert(0) += 1;
        }
    }

    let mut cleaned = mask.clone();
    for (x, y, label) in labeled.enumerate_pixels() {
        let label_val = label[0];
        if label_val == 0 {
            continue; // Skip background
        }
        if counts.get(&label_val).copied().unwrap_or(0) <= max_pixels {
            cleaned.put_pixel(x, y, Luma([0]));
        }
    }
    cleaned
}
