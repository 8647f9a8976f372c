/// Colour scheme and status levels for the dashboard.
///
/// All colours are defined here and emitted as CSS custom properties, so the
/// template references semantic names (`var(--accent)`) rather than raw hex
/// codes.
use std::fmt::Write;

/// Utilisation level shown as green, orange, or red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Green,
    Orange,
    Red,
}

impl Status {
    /// `<= 50` green, `<= 80` orange, anything above red. NaN counts as green.
    pub fn for_percent(percent: f64) -> Self {
        if percent.is_nan() || percent <= 50.0 {
            Self::Green
        } else if percent <= 80.0 {
            Self::Orange
        } else {
            Self::Red
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Green => "status-green",
            Self::Orange => "status-orange",
            Self::Red => "status-red",
        }
    }
}

/// Which palette is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

/// Semantic colour palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub surface: Rgb,
    pub text_primary: Rgb,
    pub text_secondary: Rgb,
    pub text_muted: Rgb,
    pub accent: Rgb,
    pub separator: Rgb,
    pub header_bg: Rgb,
    pub green: Rgb,
    pub orange: Rgb,
    pub red: Rgb,
    pub bar_small: Rgb,
    pub bar_large: Rgb,
}

impl Palette {
    /// Dark theme, the default.
    pub fn dark() -> Self {
        Self {
            background: Rgb(0x1e, 0x1e, 0x2e),
            surface: Rgb(0x2a, 0x2a, 0x3c),
            text_primary: Rgb(0xe4, 0xe4, 0xe8),
            text_secondary: Rgb(0xb8, 0xb8, 0xc4),
            text_muted: Rgb(0x6c, 0x70, 0x86),
            accent: Rgb(0x89, 0xb4, 0xfa),
            separator: Rgb(0x3a, 0x3a, 0x50),
            header_bg: Rgb(0x22, 0x22, 0x34),
            green: Rgb(0xa6, 0xe3, 0xa1),
            orange: Rgb(0xfa, 0xb3, 0x87),
            red: Rgb(0xf3, 0x8b, 0xa8),
            bar_small: Rgb(0xa6, 0xe3, 0xa1),
            bar_large: Rgb(0xf3, 0x8b, 0xa8),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Rgb(0xf5, 0xf5, 0xf5),
            surface: Rgb(0xff, 0xff, 0xff),
            text_primary: Rgb(0x1e, 0x1e, 0x2e),
            text_secondary: Rgb(0x4a, 0x4a, 0x5a),
            text_muted: Rgb(0x8a, 0x8a, 0x9a),
            accent: Rgb(0x3a, 0x6f, 0xd8),
            separator: Rgb(0xd0, 0xd0, 0xd8),
            header_bg: Rgb(0xe8, 0xe8, 0xf0),
            green: Rgb(0x30, 0x98, 0x30),
            orange: Rgb(0xd0, 0x80, 0x20),
            red: Rgb(0xd0, 0x40, 0x50),
            bar_small: Rgb(0x60, 0xb0, 0x60),
            bar_large: Rgb(0xd0, 0x50, 0x60),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// A `:root { ... }` block declaring one custom property per colour.
    pub fn css_variables(&self) -> String {
        let entries = [
            ("background", self.background),
            ("surface", self.surface),
            ("text-primary", self.text_primary),
            ("text-secondary", self.text_secondary),
            ("text-muted", self.text_muted),
            ("accent", self.accent),
            ("separator", self.separator),
            ("header-bg", self.header_bg),
            ("status-green", self.green),
            ("status-orange", self.orange),
            ("status-red", self.red),
        ];
        let mut css = String::from(":root {\n");
        for (name, colour) in entries {
            let _ = writeln!(css, "    --{name}: {};", colour.to_hex());
        }
        css.push('}');
        css
    }

    /// Bar colour between `bar_small` and `bar_large` for 0.0–100.0.
    pub fn bar_color(&self, percent: f64) -> Rgb {
        let t = if percent.is_finite() {
            (percent / 100.0) as f32
        } else {
            0.0
        };
        self.bar_small.lerp(self.bar_large, t)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_thresholds_are_inclusive() {
        assert_eq!(Status::for_percent(0.0), Status::Green);
        assert_eq!(Status::for_percent(50.0), Status::Green);
        assert_eq!(Status::for_percent(50.1), Status::Orange);
        assert_eq!(Status::for_percent(80.0), Status::Orange);
        assert_eq!(Status::for_percent(80.01), Status::Red);
        assert_eq!(Status::for_percent(f64::NAN), Status::Green);
    }

    #[test]
    fn css_class_names() {
        assert_eq!(Status::Green.css_class(), "status-green");
        assert_eq!(Status::Red.name(), "red");
    }

    #[test]
    fn bar_colour_endpoints() {
        let p = Palette::dark();
        assert_eq!(p.bar_color(0.0), p.bar_small);
        assert_eq!(p.bar_color(100.0), p.bar_large);
        assert_eq!(p.bar_color(250.0), p.bar_large);
        assert_eq!(p.bar_color(f64::NAN), p.bar_small);
    }

    #[test]
    fn css_variables_cover_status_colours() {
        let css = Palette::light().css_variables();
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--status-red: #d04050;"));
        assert!(css.contains("--background: #f5f5f5;"));
    }
}
