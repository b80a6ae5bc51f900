use crate::config::{GroupName, ScratchPadName};
use serde::{Deserialize, Serialize};

/// An action the runtime performs when a key or mouse binding fires.
///
/// Group and dropdown names refer to entries of the configured groups and
/// scratchpads; `tilerc-check` verifies they exist.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Command {
    KillWindow,
    Shutdown,
    ReloadConfig,
    /// Run a shell command line, detached.
    Spawn(String),
    NextLayout,
    /// Cycle focus to the next window of the current layout.
    LayoutNext,
    ToggleDropdown {
        group: ScratchPadName,
        name: String,
    },
    NextGroup,
    PrevGroup,
    /// Show a group on the current screen.
    GroupToScreen(GroupName),
    /// Move the focused window to a group.
    WindowToGroup {
        group: GroupName,
        switch_group: bool,
    },
    /// Switch virtual terminal.
    ChangeVt(u8),
    SetPositionFloating,
    SetSizeFloating,
    GetPosition,
    GetSize,
    BringToFront,
}

impl Command {
    /// The group this command targets, if any.
    pub fn target_group(&self) -> Option<&str> {
        match self {
            Self::GroupToScreen(group) | Self::WindowToGroup { group, .. } => Some(group.as_str()),
            Self::ToggleDropdown { group, .. } => Some(group.as_str()),
            _ => None,
        }
    }

    /// The program this command launches, if any.
    pub fn spawned_program(&self) -> Option<&str> {
        match self {
            Self::Spawn(line) => line.split_whitespace().next(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_program_is_first_word() {
        let command = Command::Spawn("brightnessctl set 64+".to_owned());
        assert_eq!(command.spawned_program(), Some("brightnessctl"));
        assert_eq!(Command::KillWindow.spawned_program(), None);
    }

    #[test]
    fn target_group_covers_group_commands() {
        let to_group = Command::WindowToGroup {
            group: "3".to_owned(),
            switch_group: true,
        };
        let dropdown = Command::ToggleDropdown {
            group: "scratchpad".into(),
            name: "terminal".to_owned(),
        };
        assert_eq!(to_group.target_group(), Some("3"));
        assert_eq!(dropdown.target_group(), Some("scratchpad"));
        assert_eq!(Command::NextGroup.target_group(), None);
    }
}
