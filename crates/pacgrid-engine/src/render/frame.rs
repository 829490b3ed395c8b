use crate::grid::{Grid, VisibleCells};

use super::{FrameCmd, FrameCommands, PolygonMode};

/// Records one frame of the board into `commands`.
///
/// Order is fixed: clear, program, texture, one draw per visible cell
/// (storage order), present. Any previous contents are discarded.
pub fn record_frame<D, V>(
    commands: &mut FrameCommands,
    grid: &Grid<D>,
    visible: &V,
    mode: PolygonMode,
    clear: wgpu::Color,
) where
    V: VisibleCells + ?Sized,
{
    commands.clear();
    commands.push(FrameCmd::Clear(clear));
    commands.push(FrameCmd::UseProgram(mode));
    commands.push(FrameCmd::BindTexture);

    for (slot, cell) in grid.iter().enumerate() {
        if visible.is_visible(cell.address) {
            commands.push(FrameCmd::Draw(slot));
        }
    }

    commands.push(FrameCmd::Present);
}
