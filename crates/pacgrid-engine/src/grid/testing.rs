//! Test uploaders that stand in for the GPU.

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use crate::geometry::{GridAddress, Vertex, VERTICES_PER_CELL};

use super::CellUploader;

/// Accepts everything and produces `()` drawables.
pub(crate) struct NullUploader;

impl CellUploader for NullUploader {
    type Drawable = ();

    fn upload(&mut self, _: GridAddress, _: &[Vertex; VERTICES_PER_CELL]) -> Result<()> {
        Ok(())
    }
}

/// Drawable that tracks how many uploads are still alive.
#[derive(Debug)]
pub(crate) struct Token(Rc<Cell<usize>>);

impl Drop for Token {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Records successful uploads and optionally fails the n-th one.
#[derive(Default)]
pub(crate) struct RecordingUploader {
    uploaded: Vec<GridAddress>,
    vertices: Vec<[Vertex; VERTICES_PER_CELL]>,
    live: Rc<Cell<usize>>,
    fail_at: Option<usize>,
    calls: usize,
}

impl RecordingUploader {
    pub(crate) fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    pub(crate) fn uploaded(&self) -> Vec<GridAddress> {
        self.uploaded.clone()
    }

    pub(crate) fn vertices(&self) -> &[[Vertex; VERTICES_PER_CELL]] {
        &self.vertices
    }

    pub(crate) fn live(&self) -> usize {
        self.live.get()
    }
}

impl CellUploader for RecordingUploader {
    type Drawable = Token;

    fn upload(
        &mut self,
        address: GridAddress,
        vertices: &[Vertex; VERTICES_PER_CELL],
    ) -> Result<Token> {
        let call = self.calls;
        self.calls += 1;
        anyhow::ensure!(self.fail_at != Some(call), "out of device memory");

        self.uploaded.push(address);
        self.vertices.push(*vertices);
        self.live.set(self.live.get() + 1);
        Ok(Token(Rc::clone(&self.live)))
    }
}
