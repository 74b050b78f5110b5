/// Commands the bridge issues back to the native player. Only the scrub
/// gesture machine calls these; everything else flows player → bridge
/// through the view setters.
pub trait PlayerControl {
    /// Seek to a normalized position in [0, 1].
    fn seek_to(&mut self, position: f32);
    fn pause(&mut self);
    fn resume(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    SeekTo(f32),
    Pause,
    Resume,
}

/// Records every issued command in order. Useful for hosts that marshal
/// commands elsewhere, and for exercising the gesture machine in tests.
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    commands: Vec<PlayerCommand>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<PlayerCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl PlayerControl for RecordingPlayer {
    fn seek_to(&mut self, position: f32) {
        self.commands.push(PlayerCommand::SeekTo(position));
    }

    fn pause(&mut self) {
        self.commands.push(PlayerCommand::Pause);
    }

    fn resume(&mut self) {
        self.commands.push(PlayerCommand::Resume);
    }
}
