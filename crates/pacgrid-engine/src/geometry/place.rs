use super::{unit_quad, DeviceRect, GridAddress, GridDims, Vertex, VERTICES_PER_CELL};

/// Device-space coordinate of edge `index` when an axis is split into `count` cells.
///
/// Edge `0` is exactly -1 and edge `count` exactly 1. Both neighbours of an interior
/// edge evaluate this same expression, so they agree bit for bit.
#[inline]
pub fn device_edge(index: u32, count: u32) -> f32 {
    debug_assert!(count > 0 && index <= count);
    (2.0 * f64::from(index) / f64::from(count) - 1.0) as f32
}

/// Device-space bounds assigned to `address`.
#[inline]
pub fn cell_rect(address: GridAddress, dims: GridDims) -> DeviceRect {
    DeviceRect::new(
        device_edge(address.column, dims.columns()),
        device_edge(address.row, dims.rows()),
        device_edge(address.column + 1, dims.columns()),
        device_edge(address.row + 1, dims.rows()),
    )
}

/// Places the unit quad into the cell at `address`.
///
/// Template x/y below zero land on the cell's low edge, the rest on its high edge.
/// z and the texture coordinates are copied unchanged, so every cell shows the whole image.
pub fn place_quad(address: GridAddress, dims: GridDims) -> [Vertex; VERTICES_PER_CELL] {
    debug_assert!(dims.contains(address), "{address} outside {dims} grid");

    let rect = cell_rect(address, dims);
    let mut vertices = *unit_quad();

    for v in &mut vertices {
        v.position[0] = if v.position[0] < 0.0 { rect.min[0] } else { rect.max[0] };
        v.position[1] = if v.position[1] < 0.0 { rect.min[1] } else { rect.max[1] };
    }

    vertices
}
