use image::{GrayImage, Luma};
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask};

/// Rectangular structuring element, anchored at (width / 2, height / 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectKernel {
    pub width: u8,
    pub height: u8,
}

impl RectKernel {
    pub const fn square(size: u8) -> Self {
        Self { width: size, height: size }
    }

    /// Element for erosion, centered on the anchor
    fn erosion_mask(&self) -> Mask {
        let (w, h) = self.dims();
        Mask::from_image(&self.footprint(), w / 2, h / 2)
    }

    /// Element for dilation: the erosion element reflected through the anchor
    fn dilation_mask(&self) -> Mask {
        let (w, h) = self.dims();
        Mask::from_image(&self.footprint(), w - 1 - w / 2, h - 1 - h / 2)
    }

    fn dims(&self) -> (u8, u8) {
        (self.width.max(1), self.height.max(1))
    }

    fn footprint(&self) -> GrayImage {
        let (w, h) = self.dims();
        GrayImage::from_pixel(w.into(), h.into(), Luma([255u8]))
    }
}

/// Grow bright regions by the reflected kernel. Pixels outside the image are ignored.
pub fn dilate_rect(img: &GrayImage, kernel: RectKernel) -> GrayImage {
    grayscale_dilate(img, &kernel.dilation_mask())
}

/// Shrink bright regions by the kernel. Pixels outside the image are ignored.
pub fn erode_rect(img: &GrayImage, kernel: RectKernel) -> GrayImage {
    grayscale_erode(img, &kernel.erosion_mask())
}

/// Morphological closing (dilate then erode) - fills small gaps and merges nearby blobs.
/// Every set input pixel stays set, and even-sized kernels do not shift the mask.
pub fn close_rect(img: &GrayImage, kernel: RectKernel) -> GrayImage {
    erode_rect(&dilate_rect(img, kernel), kernel)
}
