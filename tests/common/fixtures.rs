use image::{GrayImage, Luma, Rgb, RgbImage};

/// Color constants for tests
pub const DARK_GROUND: Rgb<u8> = Rgb([20, 20, 20]);
pub const MID_GRAY: Rgb<u8> = Rgb([100, 100, 100]);
pub const GRASS: Rgb<u8> = Rgb([90, 110, 70]);
pub const WHITE_ROOF: Rgb<u8> = Rgb([255, 255, 255]);
pub const BRIGHT_ROOF: Rgb<u8> = Rgb([235, 235, 235]);
pub const RED_ROOF: Rgb<u8> = Rgb([200, 40, 30]);
/// Hue 135°, saturation ~18 %, value ~43 %: inside the dark roof band
pub const DARK_ROOF: Rgb<u8> = Rgb([90, 110, 95]);

/// Image filled with one color
pub fn solid(width: u32, height: u32, color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(width, height, color)
}

/// Paint an axis-aligned rectangle with its top-left corner at (x, y)
pub fn fill_rect(img: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    for py in y..y + height {
        for px in x..x + width {
            img.put_pixel(px, py, color);
        }
    }
}

/// Binary mask with the given rectangles set to 255
pub fn mask_with_rects(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    for &(x, y, w, h) in rects {
        for py in y..y + h {
            for px in x..x + w {
                mask.put_pixel(px, py, Luma([255]));
            }
        }
    }
    mask
}

/// 200x200 dark image with a single white patch at (60, 70)
pub fn bright_patch_scene(patch_width: u32, patch_height: u32) -> RgbImage {
    let mut img = solid(200, 200, DARK_GROUND);
    fill_rect(&mut img, 60, 70, patch_width, patch_height, WHITE_ROOF);
    img
}

/// Where the roofs of `aerial_scene` sit, as (x, y, width, height)
pub const SCENE_RED_ROOF: (u32, u32, u32, u32) = (20, 20, 40, 30);
pub const SCENE_BRIGHT_ROOF: (u32, u32, u32, u32) = (120, 30, 50, 35);
pub const SCENE_DARK_ROOF: (u32, u32, u32, u32) = (40, 120, 45, 30);
pub const SCENE_SPECK: (u32, u32, u32, u32) = (200, 170, 5, 5);

/// 240x200 grass field with a red roof, a bright roof, a dark roof and
/// a red speck too small to count as a building
pub fn aerial_scene() -> RgbImage {
    let mut img = solid(240, 200, GRASS);
    for (rect, color) in [
        (SCENE_RED_ROOF, RED_ROOF),
        (SCENE_BRIGHT_ROOF, BRIGHT_ROOF),
        (SCENE_DARK_ROOF, DARK_ROOF),
        (SCENE_SPECK, RED_ROOF),
    ] {
        let (x, y, w, h) = rect;
        fill_rect(&mut img, x, y, w, h, color);
    }
    img
}

/// Number of non-zero pixels in a mask
pub fn count_set(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p[0] != 0).count()
}

/// Writes an image to a temp PNG. The file is removed when dropped.
pub fn write_temp_png(img: &RgbImage) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".png")
        .tempfile()
        .expect("Failed to create temp image file");
    img.save_with_format(file.path(), image::ImageFormat::Png)
        .expect("Failed to save test image");
    file
}
