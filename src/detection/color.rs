use image::{GrayImage, Luma, Rgb, RgbImage};

/// 8-bit HSV triple: hue in 0..180 (half degrees), saturation and value in 0..=255
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub fn from_rgb(rgb: Rgb<u8>) -> Self {
        let [r, g, b] = rgb.0.map(|c| c as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = max - min;

        let s = if max > 0.0 { diff * 255.0 / max } else { 0.0 };

        let degrees = if diff == 0.0 {
            0.0
        } else if max == r {
            60.0 * (g - b) / diff
        } else if max == g {
            120.0 + 60.0 * (b - r) / diff
        } else {
            240.0 + 60.0 * (r - g) / diff
        };
        let degrees = if degrees < 0.0 { degrees + 360.0 } else { degrees };

        let h = (degrees / 2.0).round() as u32 % 180;

        Self {
            h: h as u8,
            s: s.round() as u8,
            v: max as u8,
        }
    }
}

/// Inclusive per-channel HSV bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HsvRange {
    pub low: Hsv,
    pub high: Hsv,
}

impl HsvRange {
    pub const fn new(low: [u8; 3], high: [u8; 3]) -> Self {
        Self {
            low: Hsv { h: low[0], s: low[1], v: low[2] },
            high: Hsv { h: high[0], s: high[1], v: high[2] },
        }
    }

    /// Build a range from hue in degrees and saturation/value in percent.
    /// Fractional bounds are rounded to the nearest integer, ties to even.
    pub fn from_degrees_percent(low: [f32; 3], high: [f32; 3]) -> Self {
        let scaled = |bounds: [f32; 3], i: usize| {
            if i == 0 {
                bounds[0] / 2.0
            } else {
                bounds[i] * 255.0 / 100.0
            }
        };
        let round = |bounds: [f32; 3]| -> [u8; 3] {
            std::array::from_fn(|i| scaled(bounds, i).round_ties_even().clamp(0.0, 255.0) as u8)
        };
        Self::new(round(low), round(high))
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.low.h..=self.high.h).contains(&hsv.h)
            && (self.low.s..=self.high.s).contains(&hsv.s)
            && (self.low.v..=self.high.v).contains(&hsv.v)
    }
}

/// Reddish-brown and orange roofs. Two ranges because red straddles hue 0.
pub const LIGHT_ROOF_RANGES: [HsvRange; 2] = [
    HsvRange::new([0, 80, 80], [10, 255, 255]),
    HsvRange::new([160, 80, 80], [179, 255, 255]),
];

/// Dark rooftops: hue 127°-140°, saturation 7-21 %, value 20-50 %
pub const DARK_ROOF_RANGE: HsvRange = HsvRange::new([64, 18, 51], [70, 54, 128]);

/// Mask of pixels inside any of the given ranges
pub fn in_ranges(img: &RgbImage, ranges: &[HsvRange]) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let hsv = Hsv::from_rgb(*img.get_pixel(x, y));
        if ranges.iter().any(|range| range.contains(hsv)) {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Pixelwise OR of two masks of equal size
pub fn union(a: &GrayImage, b: &GrayImage) -> GrayImage {
    assert_eq!(a.dimensions(), b.dimensions(), "masks must have the same size");
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y)[0] | b.get_pixel(x, y)[0]])
    })
}
