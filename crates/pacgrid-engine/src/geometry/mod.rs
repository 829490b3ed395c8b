//! Cell geometry: the unit-quad template and its placement into device space.
//!
//! Device space is the square the rasterizer consumes directly:
//! - X and Y both span [-1, 1]
//! - +X right, +Y up
//! - grid row 0 sits on the bottom edge
//!
//! Everything here is pure CPU math; uploading lives in `render`.

mod address;
mod place;
mod rect;
mod template;

pub use address::{GridAddress, GridDims};
pub use place::{cell_rect, device_edge, place_quad};
pub use rect::DeviceRect;
pub use template::{unit_quad, Vertex, UNIT_QUAD, VERTICES_PER_CELL};
