pub mod preprocessing;
pub mod color;
pub mod morphology;
pub mod contours;
pub mod steps;

use image::{GrayImage, RgbImage};
use log::debug;

use crate::error::DetectError;
use crate::models::{BuildingDetection, Contour};
use color::{HsvRange, DARK_ROOF_RANGE, LIGHT_ROOF_RANGES};
use morphology::RectKernel;

/// Which masks feed the contour stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    /// Light and dark roof masks combined
    Combined,
    /// Light roof mask only
    LightOnly,
}

impl DetectionMode {
    pub fn window_title(self) -> &'static str {
        match self {
            DetectionMode::Combined => "Bing map",
            DetectionMode::LightOnly => "Original",
        }
    }
}

/// Segmentation constants tuned for aerial map tiles
#[derive(Debug, Clone)]
pub struct DetectorParams {
    pub bilateral_diameter: u32,
    pub bilateral_sigma_color: f32,
    pub bilateral_sigma_space: f32,
    pub clahe_clip_limit: f32,
    pub clahe_tiles: (u32, u32),
    /// Enhanced intensity above which a pixel counts as a bright roof
    pub brightness_threshold: u8,
    pub light_ranges: Vec<HsvRange>,
    pub light_kernel: RectKernel,
    pub dark_range: HsvRange,
    pub dark_kernel: RectKernel,
    /// Contours must enclose strictly more than this many square pixels
    pub min_area: f64,
    /// When set, dark-mask regions with at most this many pixels are dropped
    /// before the union with the light mask
    pub dark_min_area: Option<u32>,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            bilateral_diameter: 7,
            bilateral_sigma_color: 35.0,
            bilateral_sigma_space: 35.0,
            clahe_clip_limit: 2.0,
            clahe_tiles: (8, 8),
            brightness_threshold: 210,
            light_ranges: LIGHT_ROOF_RANGES.to_vec(),
            light_kernel: RectKernel::square(6),
            dark_range: DARK_ROOF_RANGE,
            dark_kernel: RectKernel::square(5),
            min_area: 300.0,
            dark_min_area: None,
        }
    }
}

/// Building detector for a single aerial image
#[derive(Debug, Clone, Default)]
pub struct BuildingDetector {
    pub params: DetectorParams,
}

impl BuildingDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: DetectorParams) -> Self {
        Self { params }
    }

    /// Mask of bright and reddish-brown rooftops
    pub fn light_mask(&self, img: &RgbImage) -> Result<GrayImage, DetectError> {
        ensure_not_empty(img)?;
        let p = &self.params;

        let gray = preprocessing::to_grayscale(img);
        let smoothed = preprocessing::bilateral_filter(
            &gray,
            p.bilateral_diameter,
            p.bilateral_sigma_color,
            p.bilateral_sigma_space,
        );
        let enhanced = preprocessing::clahe(&smoothed, p.clahe_clip_limit, p.clahe_tiles);
        let bright = preprocessing::threshold_binary(&enhanced, p.brightness_threshold);

        let roof_color = color::in_ranges(img, &p.light_ranges);
        let combined = color::union(&roof_color, &bright);

        Ok(morphology::close_rect(&combined, p.light_kernel))
    }

    /// Light rooftop contours with area above the minimum
    pub fn light_contours(&self, img: &RgbImage) -> Result<Vec<Contour>, DetectError> {
        let mask = self.light_mask(img)?;
        Ok(self.contours_from_mask(&mask))
    }

    /// Mask of dark rooftops in a narrow hue band
    pub fn dark_mask(&self, img: &RgbImage) -> Result<GrayImage, DetectError> {
        ensure_not_empty(img)?;
        let p = &self.params;

        let mask = color::in_ranges(img, std::slice::from_ref(&p.dark_range));
        let closed = morphology::close_rect(&mask, p.dark_kernel);

        Ok(match p.dark_min_area {
            Some(max_pixels) => contours::remove_small_regions(&closed, max_pixels),
            None => closed,
        })
    }

    /// Union of the light and dark masks
    pub fn combined_mask(&self, img: &RgbImage) -> Result<GrayImage, DetectError> {
        let light = self.light_mask(img)?;
        let dark = self.dark_mask(img)?;
        Ok(color::union(&light, &dark))
    }

    /// Mask feeding the contour stage for the given mode
    pub fn mask(&self, img: &RgbImage, mode: DetectionMode) -> Result<GrayImage, DetectError> {
        match mode {
            DetectionMode::Combined => self.combined_mask(img),
            DetectionMode::LightOnly => self.light_mask(img),
        }
    }

    /// External contours of a mask, keeping those above the minimum area
    pub fn contours_from_mask(&self, mask: &GrayImage) -> Vec<Contour> {
        let all = contours::find_external_contours(mask);
        let total = all.len();
        let kept = contours::filter_by_area(all, self.params.min_area);
        debug!(
            "contours: kept {} of {} above area {}",
            kept.len(),
            total,
            self.params.min_area
        );
        kept
    }

    /// Light and dark buildings with their oriented rectangles
    pub fn detect(&self, img: &RgbImage) -> Result<Vec<BuildingDetection>, DetectError> {
        self.detect_with_mode(img, DetectionMode::Combined)
    }

    pub fn detect_with_mode(
        &self,
        img: &RgbImage,
        mode: DetectionMode,
    ) -> Result<Vec<BuildingDetection>, DetectError> {
        let mask = self.mask(img, mode)?;
        let detections: Vec<BuildingDetection> = self
            .contours_from_mask(&mask)
            .iter()
            .filter_map(BuildingDetection::from_contour)
            .collect();
        debug!("{:?}: {} buildings", mode, detections.len());
        Ok(detections)
    }
}

fn ensure_not_empty(img: &RgbImage) -> Result<(), DetectError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(DetectError::EmptyImage);
    }
    Ok(())
}

/// Build the step pipeline for the given mode
pub fn build_standard_pipeline(mode: DetectionMode, verbose: bool) -> crate::pipeline::Pipeline {
    use crate::pipeline::Pipeline;
    use crate::detection::steps::*;
    use std::sync::Arc;

    let params = DetectorParams::default();

    let pipeline = Pipeline::new()
        .with_verbose(verbose)
        .add_step(Arc::new(LightMaskStep {
            params: params.clone(),
        }));

    let pipeline = match mode {
        DetectionMode::Combined => pipeline.add_step(Arc::new(DarkMaskStep {
            params: params.clone(),
        })),
        DetectionMode::LightOnly => pipeline,
    };

    pipeline
        .add_step(Arc::new(ContourDetectionStep {
            min_area: params.min_area,
        }))
        .add_step(Arc::new(OrientedRectStep))
}
