use anyhow::Result;

use super::PolygonMode;

/// One step of a recorded frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum FrameCmd {
    /// Clear the color target.
    Clear(wgpu::Color),
    /// Activate the shader program in the given polygon mode.
    UseProgram(PolygonMode),
    /// Bind the board's shared texture.
    BindTexture,
    /// Draw the grid cell at this storage slot.
    Draw(usize),
    /// Hand the finished frame to the window surface.
    Present,
}

/// Recorded command stream for one frame.
///
/// Reused across frames; `clear()` keeps capacity.
#[derive(Debug, Default)]
pub struct FrameCommands {
    cmds: Vec<FrameCmd>,
}

impl FrameCommands {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn push(&mut self, cmd: FrameCmd) {
        self.cmds.push(cmd);
    }

    #[inline]
    pub fn as_slice(&self) -> &[FrameCmd] {
        &self.cmds
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, FrameCmd> {
        self.cmds.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// Clear color of the recorded frame, if it starts with a clear.
    pub fn clear_color(&self) -> Option<wgpu::Color> {
        match self.cmds.first() {
            Some(FrameCmd::Clear(c)) => Some(*c),
            _ => None,
        }
    }

    /// Storage slots drawn this frame, in order.
    pub fn draws(&self) -> impl Iterator<Item = usize> + '_ {
        self.cmds.iter().filter_map(|c| match c {
            FrameCmd::Draw(slot) => Some(*slot),
            _ => None,
        })
    }

    /// Checks the frame grammar
    /// `Clear, UseProgram, BindTexture, Draw*, Present`
    /// and that every drawn slot is below `slot_count`.
    pub fn validate(&self, slot_count: usize) -> Result<()> {
        let mut phase = Phase::Start;

        for (i, cmd) in self.cmds.iter().enumerate() {
            phase = match (phase, cmd) {
                (Phase::Start, FrameCmd::Clear(_)) => Phase::Cleared,
                (Phase::Cleared, FrameCmd::UseProgram(_)) => Phase::ProgramBound,
                (Phase::ProgramBound, FrameCmd::BindTexture) => Phase::Drawing,
                (Phase::Drawing, FrameCmd::Draw(slot)) => {
                    anyhow::ensure!(
                        *slot < slot_count,
                        "draw of slot {slot} at position {i} but the grid has {slot_count} cells"
                    );
                    Phase::Drawing
                }
                (Phase::Drawing, FrameCmd::Present) => Phase::Presented,
                (phase, cmd) => anyhow::bail!("{cmd:?} at position {i} is not allowed after {phase:?}"),
            };
        }

        anyhow::ensure!(
            phase == Phase::Presented,
            "frame ended after {phase:?} without being presented"
        );
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Phase {
    Start,
    Cleared,
    ProgramBound,
    Drawing,
    Presented,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(cmds: &[FrameCmd]) -> FrameCommands {
        let mut f = FrameCommands::new();
        for c in cmds {
            f.push(*c);
        }
        f
    }

    const SLOTS: usize = 16;
    const CLEAR: FrameCmd = FrameCmd::Clear(wgpu::Color::BLACK);
    const PROGRAM: FrameCmd = FrameCmd::UseProgram(PolygonMode::Fill);

    #[test]
    fn well_formed_frame_passes() {
        let f = frame(&[CLEAR, PROGRAM, FrameCmd::BindTexture, FrameCmd::Draw(3), FrameCmd::Draw(9), FrameCmd::Present]);
        assert!(f.validate(SLOTS).is_ok());
        assert_eq!(f.draws().collect::<Vec<_>>(), vec![3, 9]);
        assert_eq!(f.clear_color(), Some(wgpu::Color::BLACK));
    }

    #[test]
    fn frame_without_draws_is_valid() {
        let f = frame(&[CLEAR, PROGRAM, FrameCmd::BindTexture, FrameCmd::Present]);
        assert!(f.validate(SLOTS).is_ok());
    }

    #[test]
    fn draw_before_texture_is_rejected() {
        let f = frame(&[CLEAR, PROGRAM, FrameCmd::Draw(0), FrameCmd::BindTexture, FrameCmd::Present]);
        assert!(f.validate(SLOTS).is_err());
    }

    #[test]
    fn missing_present_is_rejected() {
        let f = frame(&[CLEAR, PROGRAM, FrameCmd::BindTexture, FrameCmd::Draw(0)]);
        let err = f.validate(SLOTS).unwrap_err();
        assert!(err.to_string().contains("without being presented"));
    }

    #[test]
    fn commands_after_present_are_rejected() {
        let f = frame(&[CLEAR, PROGRAM, FrameCmd::BindTexture, FrameCmd::Present, CLEAR]);
        assert!(f.validate(SLOTS).is_err());
    }

    #[test]
    fn draw_outside_the_grid_is_rejected() {
        let f = frame(&[CLEAR, PROGRAM, FrameCmd::BindTexture, FrameCmd::Draw(SLOTS), FrameCmd::Present]);
        let err = f.validate(SLOTS).unwrap_err();
        assert!(err.to_string().contains("slot 16"), "{err}");
        assert!(f.validate(SLOTS + 1).is_ok());
    }

    #[test]
    fn empty_frame_is_rejected() {
        assert!(FrameCommands::new().validate(SLOTS).is_err());
        assert_eq!(FrameCommands::new().clear_color(), None);
    }
}
