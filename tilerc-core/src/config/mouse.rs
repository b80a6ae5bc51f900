use super::{Modifier, MouseButton};
use crate::Command;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum MouseBinding {
    /// Press, move, release. `start` runs on press, `command` on every motion.
    Drag {
        modifier: Modifier,
        button: MouseButton,
        command: Command,
        #[serde(default)]
        start: Option<Command>,
    },
    Click {
        modifier: Modifier,
        button: MouseButton,
        command: Command,
    },
}

impl MouseBinding {
    /// Copy of this binding with the `modkey` placeholder substituted.
    #[must_use]
    pub fn mapped(&self, modkey: &str) -> Self {
        let mut binding = self.clone();
        match binding {
            Self::Drag {
                ref mut modifier, ..
            }
            | Self::Click {
                ref mut modifier, ..
            } => *modifier = modifier.mapped(modkey),
        }
        binding
    }

    pub fn combo(&self) -> (&Modifier, MouseButton) {
        match self {
            Self::Drag {
                modifier, button, ..
            }
            | Self::Click {
                modifier, button, ..
            } => (modifier, *button),
        }
    }
}
