/// Rasterization mode for cell triangles.
///
/// Cycles Fill → Line → Point → Fill. Line and Point need optional device
/// features; see [`PolygonMode::required_features`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
    Point,
}

impl PolygonMode {
    pub const ALL: [PolygonMode; 3] = [PolygonMode::Fill, PolygonMode::Line, PolygonMode::Point];

    /// Next mode in the cycle.
    #[inline]
    pub const fn next(self) -> Self {
        match self {
            PolygonMode::Fill => PolygonMode::Line,
            PolygonMode::Line => PolygonMode::Point,
            PolygonMode::Point => PolygonMode::Fill,
        }
    }

    /// Position in [`PolygonMode::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PolygonMode::Fill => 0,
            PolygonMode::Line => 1,
            PolygonMode::Point => 2,
        }
    }

    pub fn required_features(self) -> wgpu::Features {
        match self {
            PolygonMode::Fill => wgpu::Features::empty(),
            PolygonMode::Line => wgpu::Features::POLYGON_MODE_LINE,
            PolygonMode::Point => wgpu::Features::POLYGON_MODE_POINT,
        }
    }

    pub fn to_wgpu(self) -> wgpu::PolygonMode {
        match self {
            PolygonMode::Fill => wgpu::PolygonMode::Fill,
            PolygonMode::Line => wgpu::PolygonMode::Line,
            PolygonMode::Point => wgpu::PolygonMode::Point,
        }
    }
}
