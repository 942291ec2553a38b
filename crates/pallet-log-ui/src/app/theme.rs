//! Light/dark theme selection and egui visuals.

use eframe::egui;
use egui::Color32;

/// Which color theme to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    /// Follow the OS preference.
    #[default]
    System,
    Dark,
    Light,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::System, ThemeMode::Dark, ThemeMode::Light];

    /// Parses a config value. Unknown names fall back to `System`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Dark" => Self::Dark,
            "Light" => Self::Light,
            _ => Self::System,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Resolves `System` through the OS preference. Anything but an explicit
    /// light preference is treated as dark.
    pub fn is_dark(self) -> bool {
        match self {
            Self::Dark => true,
            Self::Light => false,
            Self::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }
}

/// Accent used for totals and the header.
pub(crate) fn accent_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(129, 140, 248)
    } else {
        Color32::from_rgb(79, 70, 229)
    }
}

/// Installs the app's visuals and spacing on `ctx`.
pub(crate) fn apply_visuals(ctx: &egui::Context, dark_mode: bool) {
    let mut visuals = if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    let widget_rounding = egui::CornerRadius::same(4);
    visuals.widgets.noninteractive.corner_radius = widget_rounding;
    visuals.widgets.inactive.corner_radius = widget_rounding;
    visuals.widgets.hovered.corner_radius = widget_rounding;
    visuals.widgets.active.corner_radius = widget_rounding;
    visuals.widgets.open.corner_radius = widget_rounding;

    visuals.window_corner_radius = egui::CornerRadius::same(8);
    visuals.menu_corner_radius = egui::CornerRadius::same(4);
    visuals.widgets.noninteractive.bg_stroke.width = 0.0;
    visuals.window_stroke.width = 1.0;
    visuals.popup_shadow = egui::Shadow {
        offset: [0, 2],
        blur: 8,
        spread: 0,
        color: Color32::from_black_alpha(40),
    };
    visuals.hyperlink_color = accent_color(dark_mode);

    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::Vec2::new(8.0, 6.0);
        style.spacing.button_padding = egui::Vec2::new(8.0, 4.0);
        style.spacing.window_margin = egui::Margin::same(12);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names_round_trip() {
        for mode in ThemeMode::ALL {
            assert_eq!(ThemeMode::from_name(mode.name()), mode);
        }
    }

    #[test]
    fn test_unknown_theme_is_system() {
        assert_eq!(ThemeMode::from_name("Solarized"), ThemeMode::System);
        assert_eq!(ThemeMode::from_name(""), ThemeMode::System);
    }

    #[test]
    fn test_explicit_modes_ignore_os() {
        assert!(ThemeMode::Dark.is_dark());
        assert!(!ThemeMode::Light.is_dark());
    }
}
