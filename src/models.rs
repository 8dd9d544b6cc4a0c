use imageproc::geometry::{contour_area, min_area_rect};
use imageproc::point::Point;

/// External boundary of a connected mask region
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Area enclosed by the boundary polygon, through pixel centers
    pub fn area(&self) -> f64 {
        contour_area(&self.points)
    }

    /// Axis-aligned bounds as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let first = self.points.first()?;
        Some(self.points.iter().fold(
            (first.x, first.y, first.x, first.y),
            |(min_x, min_y, max_x, max_y), p| {
                (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
            },
        ))
    }

    /// Minimum-area rectangle enclosing the contour, or None for an empty contour
    pub fn oriented_rect(&self) -> Option<OrientedRect> {
        if self.points.is_empty() {
            return None;
        }
        Some(OrientedRect {
            corners: min_area_rect(&self.points),
        })
    }
}

/// Rotated rectangle with integer pixel corners, listed in drawing order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedRect {
    pub corners: [Point<i32>; 4],
}

impl OrientedRect {
    pub fn center(&self) -> (f32, f32) {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0f32, 0.0f32), |(sx, sy), p| (sx + p.x as f32, sy + p.y as f32));
        (sx / 4.0, sy / 4.0)
    }

    /// Length of the first edge (corner 0 → corner 1)
    pub fn width(&self) -> f32 {
        edge_length(self.corners[0], self.corners[1])
    }

    /// Length of the second edge (corner 1 → corner 2)
    pub fn height(&self) -> f32 {
        edge_length(self.corners[1], self.corners[2])
    }

    /// Rotation of the first edge in degrees, in (-180, 180]
    pub fn angle(&self) -> f32 {
        let dx = (self.corners[1].x - self.corners[0].x) as f32;
        let dy = (self.corners[1].y - self.corners[0].y) as f32;
        dy.atan2(dx).to_degrees()
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// Long side over short side; 0.0 for degenerate rectangles
    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = (self.width(), self.height());
        let short = w.min(h);
        if short == 0.0 {
            return 0.0;
        }
        w.max(h) / short
    }

    /// Lengths of the two sides, shorter first
    pub fn sides(&self) -> (f32, f32) {
        let (w, h) = (self.width(), self.height());
        (w.min(h), w.max(h))
    }
}

fn edge_length(a: Point<i32>, b: Point<i32>) -> f32 {
    let dx = (b.x - a.x) as f32;
    let dy = (b.y - a.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

/// One detected building outline
#[derive(Debug, Clone)]
pub struct BuildingDetection {
    pub area: f64,
    pub rect: OrientedRect,
}

impl BuildingDetection {
    pub fn from_contour(contour: &Contour) -> Option<Self> {
        Some(Self {
            area: contour.area(),
            rect: contour.oriented_rect()?,
        })
    }
}
