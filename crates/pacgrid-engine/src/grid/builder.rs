use anyhow::{Context, Result};

use crate::geometry::{cell_rect, place_quad, GridAddress, GridDims, Vertex, VERTICES_PER_CELL};

use super::{Grid, PlacedCell};

/// Destination for placed cell geometry.
///
/// The GPU implementation lives in `render::upload`; tests substitute recorders.
/// Returning `Err` is treated as fatal for the whole board.
pub trait CellUploader {
    /// Owned handle needed to draw the uploaded cell later.
    type Drawable;

    fn upload(
        &mut self,
        address: GridAddress,
        vertices: &[Vertex; VERTICES_PER_CELL],
    ) -> Result<Self::Drawable>;
}

/// Places the unit quad at `address` and uploads it.
pub fn compile_cell<U>(
    uploader: &mut U,
    address: GridAddress,
    dims: GridDims,
) -> Result<PlacedCell<U::Drawable>>
where
    U: CellUploader + ?Sized,
{
    anyhow::ensure!(
        dims.contains(address),
        "cell {address} lies outside the {dims} grid"
    );

    let vertices = place_quad(address, dims);
    let drawable = uploader
        .upload(address, &vertices)
        .with_context(|| format!("failed to upload geometry for cell {address}"))?;

    Ok(PlacedCell {
        address,
        rect: cell_rect(address, dims),
        drawable,
    })
}

/// Compiles every cell of a `dims` board.
///
/// Iteration is column-major; within a column, storage rows run top to bottom,
/// so storage row `i` holds logical row `rows - 1 - i`.
///
/// On the first failure the cells built so far are dropped (releasing their
/// drawables) and the error is returned; no partial grid escapes.
pub fn build_grid<U>(uploader: &mut U, dims: GridDims) -> Result<Grid<U::Drawable>>
where
    U: CellUploader + ?Sized,
{
    let mut cells = Vec::with_capacity(dims.cell_count());

    for column in 0..dims.columns() {
        for row_index in 0..dims.rows() {
            let row = dims
                .flip_row(row_index)
                .context("row index outside grid")?;
            let cell = compile_cell(uploader, GridAddress::new(column, row), dims)
                .with_context(|| format!("failed to build {dims} grid"))?;
            cells.push(cell);
        }
    }

    log::info!("built {dims} grid ({} cells)", cells.len());
    Ok(Grid::from_cells(dims, cells))
}
