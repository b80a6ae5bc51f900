use super::{is_program_in_path, Config};
use chrono::format::{Item, StrftimeItems};
use std::collections::HashSet;
use thiserror::Error;
use tilerc_core::config::{Backend, Keybind, Widget};
use tilerc_core::models::Rect;
use tilerc_core::{BatteryRefresh, Command};
use tracing_subscriber::EnvFilter;

/// Screen used to check that dropdown geometry stays visible.
const REFERENCE_SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CheckError {
    #[error("Multiple commands bound to key combination {0}")]
    DuplicateBinding(String),
    #[error("Key binding #{0} has no key")]
    EmptyKey(usize),
    #[error("{context} targets unknown group `{group}`")]
    UnknownGroup { group: String, context: String },
    #[error("Scratchpad `{group}` has no dropdown `{name}`")]
    UnknownDropdown { group: String, name: String },
    #[error("Group `{0}` is defined more than once")]
    DuplicateGroup(String),
    #[error("A group has an empty name")]
    EmptyGroupName,
    #[error("Dropdown `{dropdown}` of scratchpad `{scratchpad}` does not fit on screen")]
    DropdownGeometry { scratchpad: String, dropdown: String },
    #[error("Layout `{layout}` has main pane ratio {ratio}, expected a value between 0 and 1")]
    LayoutRatio { layout: String, ratio: f32 },
    #[error("No layouts are configured")]
    NoLayouts,
    #[error("No screens are configured")]
    NoScreens,
    #[error("Clock format `{0}` is invalid")]
    InvalidClockFormat(String),
    #[error("Mouse binding {0} is defined more than once")]
    DuplicateMouseBinding(String),
    #[error("Battery status command is empty")]
    EmptyBatteryCommand,
    #[error("Battery timeout must be at least one second")]
    ZeroBatteryTimeout,
    #[error("Battery refresh interval must be at least one second")]
    ZeroBatteryInterval,
    #[error("Log level is invalid: {0}")]
    InvalidLogLevel(String),
    #[error("Program `{0}` is not in PATH")]
    MissingProgram(String),
}

impl CheckError {
    /// Problems the runtime copes with; everything else breaks a feature.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::MissingProgram(_))
    }
}

impl Config {
    /// Every problem found in this configuration.
    pub fn check(&self) -> Vec<CheckError> {
        let mut errors = Vec::new();
        errors.extend(self.check_log_level());
        errors.extend(self.check_keybinds());
        errors.extend(self.check_groups());
        errors.extend(self.check_scratchpads());
        errors.extend(self.check_layouts());
        errors.extend(self.check_bars());
        errors.extend(self.check_mouse());
        errors.extend(self.check_battery());
        errors.extend(self.check_programs());
        errors
    }

    /// Prints the result of [`Config::check`]. Returns whether no errors were found.
    pub fn report_checks(&self, verbose: bool) -> bool {
        println!("\x1b[0;94m::\x1b[0m Checking configuration . . .");
        let problems = self.check();
        if verbose {
            println!(
                "Checked {} key bindings, {} groups, {} scratchpads, {} screens.",
                self.keys.len(),
                self.groups.len(),
                self.scratchpads.len(),
                self.screens.len()
            );
        }
        if problems.is_empty() {
            println!("\x1b[0;92m    -> All checks OK\x1b[0m");
            return true;
        }
        for problem in &problems {
            if problem.is_warning() {
                println!("\x1b[1;93mWARN: {problem}\x1b[0m");
            } else {
                println!("\x1b[1;91mERROR: {problem}\x1b[0m");
            }
        }
        problems.iter().all(CheckError::is_warning)
    }

    pub fn check_log_level(&self) -> Option<CheckError> {
        EnvFilter::builder()
            .parse(&self.log_level)
            .err()
            .map(|err| CheckError::InvalidLogLevel(err.to_string()))
    }

    /// Checks every key binding for a key, conflicting key combinations and known targets.
    pub fn check_keybinds(&self) -> Vec<CheckError> {
        let mut returns = Vec::new();
        let bindings = self.mapped_bindings();

        for (index, keybind) in bindings.iter().enumerate() {
            if keybind.key.trim().is_empty() {
                returns.push(CheckError::EmptyKey(index));
            }
            if bindings[..index]
                .iter()
                .any(|earlier| conflicts(earlier, keybind))
            {
                returns.push(CheckError::DuplicateBinding(combo_name(keybind)));
            }
            returns.extend(self.check_command(&keybind.command, &combo_name(keybind)));
        }
        returns
    }

    pub fn check_groups(&self) -> Vec<CheckError> {
        let mut returns = Vec::new();
        let mut seen = HashSet::new();
        for name in self.group_names() {
            if name.trim().is_empty() {
                returns.push(CheckError::EmptyGroupName);
            } else if !seen.insert(name) {
                returns.push(CheckError::DuplicateGroup(name.to_owned()));
            }
        }
        returns
    }

    pub fn check_scratchpads(&self) -> Vec<CheckError> {
        self.scratchpads
            .iter()
            .flat_map(|pad| {
                pad.dropdowns
                    .iter()
                    .filter(|dropdown| !dropdown.is_sane(&REFERENCE_SCREEN))
                    .map(|dropdown| CheckError::DropdownGeometry {
                        scratchpad: pad.name.to_string(),
                        dropdown: dropdown.name.clone(),
                    })
            })
            .collect()
    }

    pub fn check_layouts(&self) -> Vec<CheckError> {
        if self.layouts.is_empty() {
            return vec![CheckError::NoLayouts];
        }
        self.layouts
            .iter()
            .filter_map(|layout| {
                let ratio = layout.params()?.ratio;
                (ratio <= 0.0 || ratio >= 1.0).then(|| CheckError::LayoutRatio {
                    layout: layout.name().to_owned(),
                    ratio,
                })
            })
            .collect()
    }

    pub fn check_bars(&self) -> Vec<CheckError> {
        let mut returns = Vec::new();
        if self.screens.is_empty() {
            returns.push(CheckError::NoScreens);
        }
        for widget in self.screens.iter().flat_map(|s| s.bars()).flat_map(|b| &b.widgets) {
            if let Widget::Clock { format, .. } = widget {
                if !is_valid_strftime(format) {
                    returns.push(CheckError::InvalidClockFormat(format.clone()));
                }
            }
            for command in widget.commands() {
                returns.extend(self.check_command(command, widget.name()));
            }
        }
        returns
    }

    pub fn check_mouse(&self) -> Vec<CheckError> {
        let mut returns = Vec::new();
        let mut seen = HashSet::new();
        for binding in self.mapped_mouse() {
            let (modifier, button) = binding.combo();
            if !seen.insert((modifier.normalized(), button)) {
                returns.push(CheckError::DuplicateMouseBinding(format!(
                    "{modifier} + {button:?}"
                )));
            }
        }
        returns
    }

    /// Battery settings, only when some bar shows the battery text.
    pub fn check_battery(&self) -> Vec<CheckError> {
        let mut returns = Vec::new();
        let shown: usize = self
            .screens
            .iter()
            .flat_map(|screen| screen.bars())
            .map(|bar| bar.battery_slots())
            .sum();
        if shown == 0 {
            return returns;
        }
        if self.battery.command.is_empty() {
            returns.push(CheckError::EmptyBatteryCommand);
        }
        if self.battery.timeout_secs == 0 {
            returns.push(CheckError::ZeroBatteryTimeout);
        }
        if self.battery.refresh == (BatteryRefresh::Every { secs: 0 }) {
            returns.push(CheckError::ZeroBatteryInterval);
        }
        returns
    }

    /// Programs started by bindings or autostart that cannot be found.
    pub fn check_programs(&self) -> Vec<CheckError> {
        let autostart = self
            .autostart
            .cursor
            .iter()
            .chain(&self.autostart.processes)
            .map(|spec| spec.program.as_str());
        let spawned = self
            .keys
            .iter()
            .filter_map(|keybind| keybind.command.spawned_program());

        let mut seen = HashSet::new();
        autostart
            .chain(spawned)
            .chain(self.battery.command.first().map(String::as_str))
            .filter(|program| seen.insert(*program))
            .filter(|program| !is_program_in_path(program))
            .map(|program| CheckError::MissingProgram(program.to_owned()))
            .collect()
    }

    fn check_command(&self, command: &Command, context: &str) -> Vec<CheckError> {
        let mut returns = Vec::new();
        let Some(group) = command.target_group() else {
            return returns;
        };
        let known = self.group_names().contains(&group);
        if !known {
            returns.push(CheckError::UnknownGroup {
                group: group.to_owned(),
                context: context.to_owned(),
            });
        }
        if let Command::ToggleDropdown { group, name } = command {
            let has_dropdown = self
                .scratchpad(group.as_str())
                .is_some_and(|pad| pad.dropdown(name).is_some());
            if known && !has_dropdown {
                returns.push(CheckError::UnknownDropdown {
                    group: group.to_string(),
                    name: name.clone(),
                });
            }
        }
        returns
    }
}

fn combo_name(keybind: &Keybind) -> String {
    match &keybind.modifier {
        Some(modifier) => format!("{modifier} + {}", keybind.key),
        None => keybind.key.clone(),
    }
}

fn conflicts(a: &Keybind, b: &Keybind) -> bool {
    let mods = |k: &Keybind| k.modifier.as_ref().map(|m| m.normalized()).unwrap_or_default();
    let same_backend = [Backend::X11, Backend::Wayland]
        .into_iter()
        .any(|backend| a.is_active_on(backend) && b.is_active_on(backend));
    same_backend && a.key.to_lowercase() == b.key.to_lowercase() && mods(a) == mods(b)
}

fn is_valid_strftime(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilerc_core::config::{Layout, MODKEY};
    use tilerc_core::models::Size;

    fn errors_only(config: &Config) -> Vec<CheckError> {
        config.check().into_iter().filter(|e| !e.is_warning()).collect()
    }

    #[test]
    fn default_config_has_no_errors() {
        assert_eq!(errors_only(&Config::default()), Vec::new());
    }

    #[test]
    fn duplicate_key_combination() {
        let mut config = Config::default();
        config
            .keys
            .push(Keybind::new(["Shift", MODKEY], "Q", Command::KillWindow));
        assert_eq!(
            config.check_keybinds(),
            vec![CheckError::DuplicateBinding("Shift+mod4 + Q".to_owned())]
        );
    }

    #[test]
    fn bindings_on_other_backends_do_not_conflict() {
        let mut config = Config::default();
        config.keys = vec![
            Keybind::new(["control", "mod1"], "f1", Command::ChangeVt(1)).only_on(Backend::Wayland),
            Keybind::new(["control", "mod1"], "f1", Command::Shutdown).only_on(Backend::X11),
        ];
        assert!(config.check_keybinds().is_empty());
    }

    #[test]
    fn unknown_group_and_dropdown() {
        let mut config = Config::default();
        config.keys = vec![
            Keybind::new([MODKEY], "9", Command::GroupToScreen("9".to_owned())),
            Keybind::new(
                [MODKEY],
                "d",
                Command::ToggleDropdown {
                    group: "scratchpad".into(),
                    name: "music".to_owned(),
                },
            ),
        ];
        let errors = config.check_keybinds();
        assert_eq!(errors.len(), 2);
        assert!(matches!(&errors[0], CheckError::UnknownGroup { group, .. } if group == "9"));
        assert!(matches!(&errors[1], CheckError::UnknownDropdown { name, .. } if name == "music"));
    }

    #[test]
    fn duplicate_group_names() {
        let mut config = Config::default();
        config.groups.push(tilerc_core::config::Group::new("scratchpad"));
        assert_eq!(
            config.check_groups(),
            vec![CheckError::DuplicateGroup("scratchpad".to_owned())]
        );
    }

    #[test]
    fn offscreen_dropdown() {
        let mut config = Config::default();
        config.scratchpads[0].dropdowns[0].x = Some(Size::Ratio(0.5));
        assert_eq!(config.check_scratchpads().len(), 1);
    }

    #[test]
    fn layout_ratio_out_of_range() {
        let mut config = Config::default();
        assert!(config.check_layouts().is_empty());
        if let Some(Layout::MonadWide(params)) = config.layouts.first_mut() {
            params.ratio = 1.5;
        }
        assert_eq!(
            config.check_layouts(),
            vec![CheckError::LayoutRatio {
                layout: "monadwide".to_owned(),
                ratio: 1.5
            }]
        );
        config.layouts.clear();
        assert_eq!(config.check_layouts(), vec![CheckError::NoLayouts]);
    }

    #[test]
    fn clock_format() {
        assert!(is_valid_strftime("%H:%M"));
        assert!(!is_valid_strftime("%H:%Q"));

        let mut config = Config::default();
        if let Some(Widget::Clock { format, .. }) = config.screens[0]
            .top
            .as_mut()
            .and_then(|bar| bar.widgets.iter_mut().find(|w| matches!(w, Widget::Clock { .. })))
        {
            *format = "%H:%Q".to_owned();
        }
        assert_eq!(
            config.check_bars(),
            vec![CheckError::InvalidClockFormat("%H:%Q".to_owned())]
        );
    }

    #[test]
    fn log_level() {
        let mut config = Config::default();
        assert!(config.check_log_level().is_none());
        config.log_level = "tilerc=notalevel".to_owned();
        assert!(config.check_log_level().is_some());
    }

    #[test]
    fn battery_settings() {
        let mut config = Config::default();
        config.battery.command.clear();
        config.battery.timeout_secs = 0;
        config.battery.refresh = BatteryRefresh::Every { secs: 0 };
        assert_eq!(config.check_battery().len(), 3);

        for bar in config.screens.iter_mut().filter_map(|s| s.top.as_mut()) {
            bar.widgets.retain(|w| {
                !matches!(
                    w,
                    Widget::TextBox {
                        text: tilerc_core::config::TextSource::Battery,
                        ..
                    }
                )
            });
        }
        assert!(config.check_battery().is_empty());
    }

    #[test]
    fn missing_programs_are_warnings() {
        let mut config = Config::default();
        config.keys = vec![Keybind::new(
            [MODKEY],
            "x",
            Command::Spawn("tilerc-no-such-program --flag".to_owned()),
        )];
        let missing: Vec<_> = config
            .check_programs()
            .into_iter()
            .filter(|e| *e == CheckError::MissingProgram("tilerc-no-such-program".to_owned()))
            .collect();
        assert_eq!(missing.len(), 1);
        assert!(missing[0].is_warning());
    }
}
