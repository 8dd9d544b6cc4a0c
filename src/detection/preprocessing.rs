use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contrast::{threshold, ThresholdType};
use imageproc::map::map_colors;

/// Convert image to grayscale with BT.601 luma weights (0.299, 0.587, 0.114)
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    map_colors(img, luma601)
}

// 14-bit fixed point, rounded
fn luma601(Rgb([r, g, b]): Rgb<u8>) -> Luma<u8> {
    let y = (r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + (1 << 13)) >> 14;
    Luma([y as u8])
}

/// Edge-preserving smoothing over a circular window of the given diameter
///
/// Each output pixel is a weighted mean of its neighbours, where the weight
/// falls off with both spatial distance (`sigma_space`) and intensity
/// difference (`sigma_color`). Borders are reflected without repeating the
/// edge pixel.
pub fn bilateral_filter(
    img: &GrayImage,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> GrayImage {
    let (width, height) = img.dimensions();
    let radius = (diameter / 2).max(1) as i64;

    let space_coeff = -0.5 / (sigma_space * sigma_space);
    let color_coeff = -0.5 / (sigma_color * sigma_color);

    let mut offsets = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2 <= (radius * radius) as f32 {
                offsets.push((dx, dy, (r2 * space_coeff).exp()));
            }
        }
    }

    let color_weights: Vec<f32> = (0..256)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    GrayImage::from_fn(width, height, |x, y| {
        let center = img.get_pixel(x, y)[0] as i32;
        let mut sum = 0.0f32;
        let mut weight_sum = 0.0f32;

        for &(dx, dy, space_weight) in &offsets {
            let sx = reflect101(x as i64 + dx, width as i64);
            let sy = reflect101(y as i64 + dy, height as i64);
            let value = img.get_pixel(sx, sy)[0] as i32;
            let weight = space_weight * color_weights[(value - center).unsigned_abs() as usize];
            sum += value as f32 * weight;
            weight_sum += weight;
        }

        Luma([(sum / weight_sum).round().clamp(0.0, 255.0) as u8])
    })
}

/// Contrast limited adaptive histogram equalization
///
/// The image is split into a `tiles.0 x tiles.1` grid. Each tile gets its own
/// clipped, equalized lookup table and every pixel blends the tables of the
/// four nearest tile centers.
pub fn clahe(img: &GrayImage, clip_limit: f32, tiles: (u32, u32)) -> GrayImage {
    let (width, height) = img.dimensions();
    let (tiles_x, tiles_y) = (tiles.0.max(1), tiles.1.max(1));
    if width == 0 || height == 0 {
        return img.clone();
    }

    let tile_w = width.div_ceil(tiles_x);
    let tile_h = height.div_ceil(tiles_y);
    let tile_area = (tile_w * tile_h) as usize;

    let clip = if clip_limit > 0.0 {
        ((clip_limit * tile_area as f32 / 256.0) as usize).max(1)
    } else {
        usize::MAX
    };
    let lut_scale = 255.0 / tile_area as f32;

    let mut luts = vec![[0u8; 256]; (tiles_x * tiles_y) as usize];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let mut hist = [0usize; 256];
            for y in ty * tile_h..(ty + 1) * tile_h {
                let sy = reflect101(y as i64, height as i64);
                for x in tx * tile_w..(tx + 1) * tile_w {
                    let sx = reflect101(x as i64, width as i64);
                    hist[img.get_pixel(sx, sy)[0] as usize] += 1;
                }
            }

            clip_histogram(&mut hist, clip);

            let lut = &mut luts[(ty * tiles_x + tx) as usize];
            let mut cumulative = 0usize;
            for (value, count) in hist.iter().enumerate() {
                cumulative += count;
                lut[value] = (cumulative as f32 * lut_scale).round().min(255.0) as u8;
            }
        }
    }

    let neighbours = |pos: u32, tile: u32, count: u32| -> (usize, usize, f32) {
        let f = pos as f32 / tile as f32 - 0.5;
        let lo = f.floor();
        let frac = f - lo;
        let first = (lo as i64).max(0) as usize;
        let second = ((lo as i64 + 1).min(count as i64 - 1)).max(0) as usize;
        (first, second, frac)
    };

    GrayImage::from_fn(width, height, |x, y| {
        let value = img.get_pixel(x, y)[0] as usize;
        let (tx1, tx2, xa) = neighbours(x, tile_w, tiles_x);
        let (ty1, ty2, ya) = neighbours(y, tile_h, tiles_y);
        let at = |tx: usize, ty: usize| luts[ty * tiles_x as usize + tx][value] as f32;

        let top = at(tx1, ty1) * (1.0 - xa) + at(tx2, ty1) * xa;
        let bottom = at(tx1, ty2) * (1.0 - xa) + at(tx2, ty2) * xa;
        let blended = top * (1.0 - ya) + bottom * ya;

        Luma([blended.round().clamp(0.0, 255.0) as u8])
    })
}

/// Clip histogram bins at `clip` and spread the excess across all bins
fn clip_histogram(hist: &mut [usize; 256], clip: usize) {
    let mut clipped = 0usize;
    for count in hist.iter_mut() {
        if *count > clip {
            clipped += *count - clip;
            *count = clip;
        }
    }

    let batch = clipped / hist.len();
    let mut residual = clipped - batch * hist.len();
    for count in hist.iter_mut() {
        *count += batch;
    }

    if residual > 0 {
        let step = (hist.len() / residual).max(1);
        let mut i = 0;
        while i < hist.len() && residual > 0 {
            hist[i] += 1;
            i += step;
            residual -= 1;
        }
    }
}

/// Binary threshold: pixels strictly above `level` become 255, the rest 0
pub fn threshold_binary(img: &GrayImage, level: u8) -> GrayImage {
    threshold(img, level, ThresholdType::Binary)
}

/// Reflect an out-of-range coordinate back into `0..len` without repeating the edge
fn reflect101(mut i: i64, len: i64) -> u32 {
    if len <= 1 {
        return 0;
    }
    while i < 0 || i >= len {
        if i < 0 {
            i = -i;
        }
        if i >= len {
            i = 2 * len - 2 - i;
        }
    }
    i as u32
}
