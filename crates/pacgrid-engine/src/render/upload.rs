use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::geometry::{GridAddress, Vertex, VERTICES_PER_CELL};
use crate::grid::CellUploader;

use super::scope::checked;
use super::RenderCtx;

/// GPU-resident geometry of one cell.
///
/// Owns its vertex buffer; the buffer is destroyed when the cell is dropped.
#[derive(Debug)]
pub struct CellBuffer {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl CellBuffer {
    #[inline]
    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}

impl Drop for CellBuffer {
    fn drop(&mut self) {
        self.buffer.destroy();
    }
}

/// Uploads each placed cell into its own static vertex buffer.
///
/// Allocation and validation failures come back as `Err` naming the cell.
pub struct GpuCellUploader<'a> {
    device: &'a wgpu::Device,
}

impl<'a> GpuCellUploader<'a> {
    pub fn new(ctx: &RenderCtx<'a>) -> Self {
        Self { device: ctx.device }
    }
}

impl CellUploader for GpuCellUploader<'_> {
    type Drawable = CellBuffer;

    fn upload(
        &mut self,
        address: GridAddress,
        vertices: &[Vertex; VERTICES_PER_CELL],
    ) -> Result<CellBuffer> {
        let label = format!("pacgrid cell {address} vbo");
        let buffer = checked(self.device, || {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&label),
                    contents: bytemuck::cast_slice(vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        })
        .with_context(|| format!("failed to create vertex buffer for cell {address}"))?;

        Ok(CellBuffer {
            buffer,
            vertex_count: VERTICES_PER_CELL as u32,
        })
    }
}
