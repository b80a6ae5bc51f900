use super::{Behavior, Config, FocusOnActivation};
use std::collections::BTreeMap;
use tilerc_core::config::{
    groups_from_chars, Backend, Bar, DropDown, FloatRule, FloatingLayout, HighlightMethod, Keybind,
    Layout, Modifier, MonadParams, MouseBinding, MouseButton, NameTransform, ScratchPad, Screen,
    SpacerLength, TextSource, Widget, WidgetDefaults, MODKEY,
};
use tilerc_core::models::{Color, Size};
use tilerc_core::{AutostartConfig, BatteryConfig, Command, ProcessSpec};

const GROUP_NAMES: &str = "12345";
const SCRATCHPAD: &str = "scratchpad";
const VT_COUNT: u8 = 7;

const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
const TRANSPARENT: Color = Color::transparent();
const PURPLE: Color = Color::rgb(0x67, 0x60, 0x8B);

fn spawn(line: &str) -> Command {
    Command::Spawn(line.to_owned())
}

fn no_mod() -> Modifier {
    Modifier::List(Vec::new())
}

impl Default for Config {
    // We allow this because the default is a transcription of the whole desktop, one
    // record after another.
    #[allow(clippy::too_many_lines)]
    fn default() -> Self {
        let terminal = "st".to_owned();

        let mut keys = vec![
            Keybind::new([MODKEY], "q", Command::KillWindow),
            Keybind::new([MODKEY, "shift"], "q", Command::Shutdown),
            Keybind::new([MODKEY, "control"], "r", Command::ReloadConfig),
            Keybind::new([MODKEY], "s", spawn("flatpak run org.flameshot.Flameshot gui")),
            Keybind::new([MODKEY], "w", spawn("firefox")),
            Keybind::new([MODKEY], "Return", Command::NextLayout),
            Keybind::new(
                [MODKEY],
                "space",
                Command::ToggleDropdown {
                    group: SCRATCHPAD.into(),
                    name: "terminal".to_owned(),
                },
            ),
            Keybind::new([MODKEY], "Tab", Command::LayoutNext),
            Keybind::new([MODKEY], "Right", Command::NextGroup),
            Keybind::new([MODKEY], "Left", Command::PrevGroup),
            Keybind::new(no_mod(), "XF86MonBrightnessUp", spawn("brightnessctl set 64+")),
            Keybind::new(no_mod(), "XF86MonBrightnessDown", spawn("brightnessctl set 64-")),
            Keybind::new(
                no_mod(),
                "XF86AudioRaiseVolume",
                spawn("wpctl set-volume @DEFAULT_SINK@ 0.1+"),
            ),
            Keybind::new(
                no_mod(),
                "XF86AudioLowerVolume",
                spawn("wpctl set-volume @DEFAULT_SINK@ 0.1-"),
            ),
            Keybind::new(
                no_mod(),
                "XF86AudioMute",
                spawn("wpctl set-mute @DEFAULT_SINK@ toggle"),
            ),
        ];

        // VT switching only makes sense when the runtime is the session's compositor
        for vt in 1..=VT_COUNT {
            keys.push(
                Keybind::new(["control", "mod1"], format!("f{vt}"), Command::ChangeVt(vt))
                    .describe(format!("Switch to VT{vt}"))
                    .only_on(Backend::Wayland),
            );
        }

        let groups = groups_from_chars(GROUP_NAMES);
        for group in &groups {
            let name = &group.name;
            keys.push(
                Keybind::new([MODKEY], name.as_str(), Command::GroupToScreen(name.clone()))
                    .describe(format!("Switch to group {name}")),
            );
            keys.push(
                Keybind::new(
                    [MODKEY, "shift"],
                    name.as_str(),
                    Command::WindowToGroup {
                        group: name.clone(),
                        switch_group: true,
                    },
                )
                .describe(format!("Switch to & move focused window to group {name}")),
            );
            keys.push(Keybind::new(
                [MODKEY, "control"],
                name.as_str(),
                Command::WindowToGroup {
                    group: name.clone(),
                    switch_group: false,
                },
            ));
        }

        let scratchpad = ScratchPad {
            name: SCRATCHPAD.into(),
            dropdowns: vec![DropDown {
                name: "terminal".to_owned(),
                value: terminal.clone(),
                x: Some(Size::Ratio(0.002)),
                y: Some(Size::Ratio(0.003)),
                width: Some(Size::Ratio(0.996)),
                height: Some(Size::Ratio(0.99)),
                opacity: 0.92,
                on_focus_lost_hide: false,
            }],
        };

        let layouts = vec![
            Layout::MonadWide(MonadParams {
                ratio: 0.70,
                border_focus: PURPLE,
                border_normal: Color::rgb(0x29, 0x0F, 0x34),
                border_width: 1,
                margin: 6,
            }),
            Layout::Max,
        ];

        let screens = vec![Screen {
            top: Some(Bar {
                size: 24,
                background: Some(TRANSPARENT),
                widgets: default_widgets(),
            }),
            bottom: None,
        }];

        let mouse = vec![
            MouseBinding::Drag {
                modifier: [MODKEY].into(),
                button: MouseButton::Button1,
                command: Command::SetPositionFloating,
                start: Some(Command::GetPosition),
            },
            MouseBinding::Drag {
                modifier: [MODKEY].into(),
                button: MouseButton::Button3,
                command: Command::SetSizeFloating,
                start: Some(Command::GetSize),
            },
            MouseBinding::Click {
                modifier: [MODKEY].into(),
                button: MouseButton::Button2,
                command: Command::BringToFront,
            },
        ];

        let floating_layout = FloatingLayout {
            border_focus: PURPLE,
            border_normal: PURPLE,
            border_width: 1,
            default_float_rules: true,
            float_rules: vec![
                FloatRule::class("confirmreset"), // gitk
                FloatRule::class("makebranch"),   // gitk
                FloatRule::class("maketag"),      // gitk
                FloatRule::class("ssh-askpass"),
                FloatRule::title("branchdialog"), // gitk
                FloatRule::title("pinentry"),     // GPG key password entry
            ],
        };

        let autostart = AutostartConfig {
            cursor: Some(ProcessSpec::new("xsetroot", ["-cursor_name", "left_ptr"])),
            processes: vec![
                ProcessSpec::new("nm-applet", Vec::<String>::new()),
                ProcessSpec::new("flatpak", ["run", "org.flameshot.Flameshot"]),
                ProcessSpec::shell(
                    "while true; do xclip -selection clipboard -t text/plain -o 2>/dev/null \
                     | cliphist store 2>/dev/null; sleep 1; done",
                ),
                ProcessSpec::new("dunst", Vec::<String>::new()),
            ],
        };

        Self {
            modkey: "mod4".to_owned(), // win key
            terminal,
            keys,
            groups,
            scratchpads: vec![scratchpad],
            layouts,
            widget_defaults: WidgetDefaults {
                font: "sans".to_owned(),
                fontsize: 14,
                padding: 3,
            },
            extension_defaults: None,
            screens,
            mouse,
            floating_layout,
            behavior: Behavior::default(),
            battery: BatteryConfig::default(),
            autostart,
            battery_status_file: None,
            log_level: "info".to_owned(),
        }
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            follow_mouse_focus: true,
            bring_front_click: false,
            floats_kept_above: true,
            cursor_warp: false,
            auto_fullscreen: true,
            focus_on_window_activation: FocusOnActivation::Smart,
            reconfigure_screens: true,
            auto_minimize: true,
            wl_xcursor_theme: None,
            wl_xcursor_size: 24,
            wmname: "LG3D".to_owned(),
        }
    }
}

fn spacer(length: SpacerLength, background: Option<Color>) -> Widget {
    Widget::Spacer { length, background }
}

fn text(text: TextSource, foreground: Color, padding: u32) -> Widget {
    Widget::TextBox {
        text,
        background: Some(TRANSPARENT),
        foreground: Some(foreground),
        padding: Some(padding),
    }
}

fn default_widgets() -> Vec<Widget> {
    let chords_colors = BTreeMap::from([(
        "launch".to_owned(),
        (Color::rgb(0xFF, 0x00, 0x00), WHITE),
    )]);
    let volume_callbacks = BTreeMap::from([(MouseButton::Button1, spawn("pavucontrol"))]);

    vec![
        Widget::GroupBox {
            background: Some(TRANSPARENT),
            highlight_method: HighlightMethod::Border,
            inactive: Color::rgb(0x44, 0x44, 0x44),
            active: WHITE,
            block_highlight_text_color: WHITE,
            borderwidth: 1,
        },
        spacer(SpacerLength::Fixed(10), None),
        Widget::CurrentLayout {
            max_chars: Some(2),
            scroll: true,
            width: Some(60),
        },
        spacer(SpacerLength::Fixed(10), Some(TRANSPARENT)),
        Widget::Systray,
        spacer(SpacerLength::Fixed(1194), Some(TRANSPARENT)),
        Widget::Clock {
            format: "%H:%M".to_owned(),
            fontsize: Some(16),
            foreground: Some(WHITE),
            background: Some(TRANSPARENT),
        },
        spacer(SpacerLength::Stretch, None),
        Widget::Chord {
            chords_colors,
            name_transform: NameTransform::Uppercase,
        },
        Widget::PulseVolume {
            background: Some(TRANSPARENT),
            foreground: Some(WHITE),
            emoji: true,
            emoji_list: ["🔇", "🔈", "🔉", "🔊"].map(str::to_owned).to_vec(),
            unmute_format: "{volume}%".to_owned(),
            mute_format: "MUTE".to_owned(),
            mouse_callbacks: volume_callbacks,
        },
        text(TextSource::Static(" ".to_owned()), Color::rgb(0xB8, 0xA0, 0x00), 0),
        Widget::Backlight {
            background: Some(TRANSPARENT),
            foreground: Some(WHITE),
            fmt: "{}".to_owned(),
            backlight_name: "amdgpu_bl0".to_owned(),
            update_interval: 0.1,
        },
        text(TextSource::Static("   ".to_owned()), Color::rgb(0x66, 0x66, 0x66), 0),
        text(TextSource::Battery, WHITE, 3),
    ]
}
