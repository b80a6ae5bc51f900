use crate::models::Color;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Floating layer settings and the rules deciding which windows float.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FloatingLayout {
    pub border_focus: Color,
    pub border_normal: Color,
    pub border_width: u32,
    /// Keep the runtime's built-in rules (dialogs, utilities, splash screens).
    #[serde(default)]
    pub default_float_rules: bool,
    #[serde(default)]
    pub float_rules: Vec<FloatRule>,
}

impl FloatingLayout {
    /// The most specific rule matching a window, if any.
    pub fn best_match(&self, class: Option<&str>, title: Option<&str>) -> Option<&FloatRule> {
        self.float_rules
            .iter()
            .map(|rule| (rule.score(class, title), rule))
            .filter(|(score, _)| *score > 0)
            .max_by_key(|(score, _)| *score)
            .map(|(_, rule)| rule)
    }
}

/// Selecting by `WM_CLASS` and/or window title, marks a window as floating.
///
/// # Example
///
/// In `config.ron`
///
/// ```ron
/// float_rules: [
///     (wm_class: "ssh-askpass"),
///     (title: "pinentry"),
/// ]
/// ```
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct FloatRule {
    /// `WM_CLASS` in X11, app id on wayland
    #[serde(
        default,
        deserialize_with = "from_regex",
        serialize_with = "to_config_string"
    )]
    pub wm_class: Option<Regex>,
    /// `_NET_WM_NAME` in X11
    #[serde(
        default,
        deserialize_with = "from_regex",
        serialize_with = "to_config_string"
    )]
    pub title: Option<Regex>,
}

impl FloatRule {
    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex.
    pub fn class(pattern: &str) -> Self {
        Self {
            wm_class: Some(Regex::new(pattern).expect("valid regex")),
            title: None,
        }
    }

    /// # Panics
    ///
    /// Panics if `pattern` is not a valid regex.
    pub fn title(pattern: &str) -> Self {
        Self {
            wm_class: None,
            title: Some(Regex::new(pattern).expect("valid regex")),
        }
    }

    /// Score the similarity between a window and this rule.
    ///
    /// Multiple rules might match a `WM_CLASS` but we want the most
    /// specific one to apply: matches by title are scored greater than by `WM_CLASS`.
    pub fn score(&self, class: Option<&str>, title: Option<&str>) -> u8 {
        // the whole string must be consumed by the regex. an empty string would match every
        // regex that way, unless the rule is explicitly for empty strings.
        let matches = |re: &Regex, s: Option<&str>| {
            s.map_or(false, |s| {
                re.replace(s, "") == "" && (!s.is_empty() || re.as_str().is_empty())
            })
        };

        let class_score = self
            .wm_class
            .as_ref()
            .map_or(0, |re| u8::from(matches(re, class)));
        let title_score = self
            .title
            .as_ref()
            .map_or(0, |re| u8::from(matches(re, title)));

        class_score + 2 * title_score
    }
}

impl PartialEq for FloatRule {
    fn eq(&self, other: &Self) -> bool {
        let pattern = |re: &Option<Regex>| re.as_ref().map(Regex::as_str).map(str::to_owned);
        pattern(&self.wm_class) == pattern(&other.wm_class)
            && pattern(&self.title) == pattern(&other.title)
    }
}

fn from_regex<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Regex>, D::Error> {
    let res: Option<String> = Deserialize::deserialize(deserializer)?;
    res.map(|s| Regex::new(&s).map_err(de::Error::custom))
        .transpose()
}

fn to_config_string<S: Serializer>(wc: &Option<Regex>, s: S) -> Result<S::Ok, S::Error> {
    match wc {
        Some(ref re) => s.serialize_some(re.as_str()),
        None => s.serialize_none(),
    }
}
