use crate::Command;
use serde::{Deserialize, Serialize};

/// Placeholder modifier replaced by the configured mod key.
pub const MODKEY: &str = "modkey";

/// Display backend a binding can be restricted to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    X11,
    Wayland,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Keybind {
    pub modifier: Option<Modifier>,
    pub key: String,
    pub command: Command,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only active when the runtime runs on this backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_on: Option<Backend>,
}

impl Keybind {
    pub fn new(modifier: impl Into<Modifier>, key: impl Into<String>, command: Command) -> Self {
        let modifier = modifier.into();
        Self {
            modifier: (!modifier.is_empty()).then_some(modifier),
            key: key.into(),
            command,
            description: None,
            only_on: None,
        }
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn only_on(mut self, backend: Backend) -> Self {
        self.only_on = Some(backend);
        self
    }

    /// Copy of this binding with the `modkey` placeholder substituted.
    #[must_use]
    pub fn mapped(&self, modkey: &str) -> Self {
        Self {
            modifier: self.modifier.as_ref().map(|m| m.mapped(modkey)),
            ..self.clone()
        }
    }

    pub fn is_active_on(&self, backend: Backend) -> bool {
        self.only_on.map_or(true, |only| only == backend)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl Modifier {
    pub fn is_empty(&self) -> bool {
        match self {
            Modifier::Single(single) => single.is_empty(),
            Modifier::List(list) => list.is_empty(),
        }
    }

    /// Copy with the `modkey` placeholder replaced by `modkey`.
    #[must_use]
    pub fn mapped(&self, modkey: &str) -> Self {
        let mut modifier = self.clone();
        match modifier {
            Modifier::Single(ref mut m) if *m == MODKEY => *m = modkey.to_owned(),
            Modifier::List(ref mut ms) => {
                for m in ms {
                    if *m == MODKEY {
                        *m = modkey.to_owned();
                    }
                }
            }
            Modifier::Single(_) => {}
        }
        modifier
    }

    /// Lowercased, sorted list form, used to compare key combinations.
    pub fn normalized(&self) -> Vec<String> {
        let mut ms: Vec<String> = self.into_iter().map(|m| m.to_lowercase()).collect();
        ms.sort_unstable();
        ms.dedup();
        ms
    }
}

impl IntoIterator for &Modifier {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        let ms = match self {
            Modifier::Single(m) => vec![m.clone()],
            Modifier::List(ms) => ms.clone(),
        };
        ms.into_iter()
    }
}

impl From<Vec<String>> for Modifier {
    fn from(l: Vec<String>) -> Self {
        Self::List(l)
    }
}

impl From<&[&str]> for Modifier {
    fn from(l: &[&str]) -> Self {
        Self::List(l.iter().map(|m| (*m).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Modifier {
    fn from(l: [&str; N]) -> Self {
        Self::from(&l[..])
    }
}

impl From<&str> for Modifier {
    fn from(m: &str) -> Self {
        Self::Single(m.to_owned())
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(modifier) => write!(f, "{modifier}"),
            Self::List(modifiers) => write!(f, "{}", modifiers.join("+")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modkey_placeholder_is_substituted() {
        let keybind = Keybind::new([MODKEY, "shift"], "q", Command::Shutdown);
        let mapped = keybind.mapped("mod4");
        assert_eq!(
            mapped.modifier,
            Some(Modifier::List(vec!["mod4".to_owned(), "shift".to_owned()]))
        );

        let single = Keybind::new(MODKEY, "w", Command::Spawn("firefox".to_owned()));
        assert_eq!(single.mapped("mod1").modifier, Some("mod1".into()));
    }

    #[test]
    fn empty_modifier_becomes_none() {
        let keybind = Keybind::new(Vec::<String>::new(), "XF86AudioMute", Command::NextLayout);
        assert_eq!(keybind.modifier, None);
    }

    #[test]
    fn normalized_ignores_order_and_case() {
        let a = Modifier::from(["Shift", "mod4"]);
        let b = Modifier::from(["mod4", "shift"]);
        assert_eq!(a.normalized(), b.normalized());
    }

    #[test]
    fn backend_restriction() {
        let keybind = Keybind::new(["control", "mod1"], "f1", Command::ChangeVt(1))
            .only_on(Backend::Wayland);
        assert!(keybind.is_active_on(Backend::Wayland));
        assert!(!keybind.is_active_on(Backend::X11));
    }
}
