use crate::pipeline::{PipelineData, PipelineStep, PipelineContext, BoundingBox, MetadataValue};
use crate::detection::{color, contours, BuildingDetector, DetectorParams};
use crate::models::{BuildingDetection, Contour, OrientedRect};
use anyhow::Result;
use image::DynamicImage;

/// Replace each item's image with the light rooftop mask of its original
pub struct LightMaskStep {
    pub params: DetectorParams,
}

impl PipelineStep for LightMaskStep {
    fn process(&self, data: Vec<PipelineData>, context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let detector = BuildingDetector::with_params(self.params.clone());
        let mut result = Vec::new();

        for item in data {
            let mask = detector.light_mask(&item.original)?;
            let lit = count_set(&mask);
            if context.verbose {
                println!("  Light mask: {} pixels set", lit);
            }
            result.push(
                item.with_image(DynamicImage::ImageLuma8(mask))
                    .with_metadata("light_pixels", MetadataValue::Int(lit as i32)),
            );
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Light Building Mask"
    }
}

/// OR the dark rooftop mask into each item's working mask
pub struct DarkMaskStep {
    pub params: DetectorParams,
}

impl PipelineStep for DarkMaskStep {
    fn process(&self, data: Vec<PipelineData>, context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let detector = BuildingDetector::with_params(self.params.clone());
        let mut result = Vec::new();

        for item in data {
            let dark = detector.dark_mask(&item.original)?;
            let current = item.image.to_luma8();
            if current.dimensions() != dark.dimensions() {
                return Err(anyhow::anyhow!(
                    "Working mask is {:?} but the original is {:?}",
                    current.dimensions(),
                    dark.dimensions()
                ));
            }

            let dark_pixels = count_set(&dark);
            if context.verbose {
                println!("  Dark mask: {} pixels set", dark_pixels);
            }

            let combined = color::union(&current, &dark);
            result.push(
                item.with_image(DynamicImage::ImageLuma8(combined))
                    .with_metadata("dark_pixels", MetadataValue::Int(dark_pixels as i32)),
            );
        }
        Ok(result)
    }

    fn name(&self) -> &str {
        "Dark Building Mask"
    }
}

/// Find external contours in the working mask - splits one mask into one item per building
pub struct ContourDetectionStep {
    pub min_area: f64,
}

impl PipelineStep for ContourDetectionStep {
    fn process(&self, data: Vec<PipelineData>, context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();

        for item in data {
            let mask = item.image.to_luma8();
            let all = contours::find_external_contours(&mask);
            let total = all.len();
            let kept = contours::filter_by_area(all, self.min_area);

            if context.verbose {
                println!("  Kept {} of {} contours (area > {})", kept.len(), total, self.min_area);
            }

            for (index, contour) in kept.into_iter().enumerate() {
                let Some((min_x, min_y, max_x, max_y)) = contour.bounds() else {
                    continue;
                };

                // Contour points come from the mask, so they are inside the image
                let bbox = BoundingBox {
                    x: min_x as u32,
                    y: min_y as u32,
                    width: (max_x - min_x + 1) as u32,
                    height: (max_y - min_y + 1) as u32,
                };
                let cropped = image::imageops::crop_imm(
                    item.original.as_ref(),
                    bbox.x,
                    bbox.y,
                    bbox.width,
                    bbox.height,
                )
                .to_image();

                let region = PipelineData::from_region(
                    DynamicImage::ImageRgb8(cropped),
                    item.original.clone(),
                    bbox,
                )
                .with_metadata("contour_index", MetadataValue::Int(index as i32))
                .with_metadata("area", MetadataValue::Double(contour.area()))
                .with_metadata("contour", MetadataValue::Points(contour.points));

                result.push(region);
            }
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Contour Detection"
    }
}

/// Fit a minimum-area rectangle to each item's contour
pub struct OrientedRectStep;

impl PipelineStep for OrientedRectStep {
    fn process(&self, data: Vec<PipelineData>, _context: &PipelineContext) -> Result<Vec<PipelineData>> {
        let mut result = Vec::new();

        for item in data {
            let points = item
                .get_points("contour")
                .ok_or_else(|| anyhow::anyhow!("Missing contour"))?
                .to_vec();

            let Some(rect) = Contour::new(points).oriented_rect() else {
                continue;
            };

            result.push(
                item.with_metadata("rect_corners", MetadataValue::Points(rect.corners.to_vec()))
                    .with_metadata("rect_width", MetadataValue::Float(rect.width()))
                    .with_metadata("rect_height", MetadataValue::Float(rect.height()))
                    .with_metadata("rect_angle", MetadataValue::Float(rect.angle())),
            );
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "Oriented Rectangle"
    }
}

/// Rebuild a detection from an item that went through `OrientedRectStep`
pub fn detection_from_item(item: &PipelineData) -> Option<BuildingDetection> {
    let area = item.get_double("area")?;
    let corners: [_; 4] = item.get_points("rect_corners")?.try_into().ok()?;
    Some(BuildingDetection {
        area,
        rect: OrientedRect { corners },
    })
}

fn count_set(mask: &image::GrayImage) -> u32 {
    mask.pixels().filter(|p| p[0] != 0).count() as u32
}
