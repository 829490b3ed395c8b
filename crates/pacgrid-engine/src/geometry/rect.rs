use super::Vertex;

/// Axis-aligned bounds in device space (+Y up).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DeviceRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl DeviceRect {
    /// The full [-1, 1] × [-1, 1] device square.
    pub const FULL: DeviceRect = DeviceRect::new(-1.0, -1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: [min_x, min_y],
            max: [max_x, max_y],
        }
    }

    /// Bounding box of the x/y components of `vertices`. `None` for an empty slice.
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        let first = vertices.first()?;
        let mut r = DeviceRect::new(
            first.position[0],
            first.position[1],
            first.position[0],
            first.position[1],
        );
        for v in &vertices[1..] {
            r.min[0] = r.min[0].min(v.position[0]);
            r.min[1] = r.min[1].min(v.position[1]);
            r.max[0] = r.max[0].max(v.position[0]);
            r.max[1] = r.max[1].max(v.position[1]);
        }
        Some(r)
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.max[0] - self.min[0]
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.max[1] - self.min[1]
    }

    #[inline]
    pub fn area(self) -> f32 {
        self.width() * self.height()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// True when the interiors overlap. Rects that only share an edge do not.
    #[inline]
    pub fn overlaps(self, other: DeviceRect) -> bool {
        self.min[0] < other.max[0]
            && other.min[0] < self.max[0]
            && self.min[1] < other.max[1]
            && other.min[1] < self.max[1]
    }

    /// Smallest rect enclosing both.
    #[inline]
    pub fn union(self, other: DeviceRect) -> DeviceRect {
        DeviceRect::new(
            self.min[0].min(other.min[0]),
            self.min[1].min(other.min[1]),
            self.max[0].max(other.max[0]),
            self.max[1].max(other.max[1]),
        )
    }
}
