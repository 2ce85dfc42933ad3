//! Theme colors for the form
//! Defaults, then a kitty-style colour file, then explicit config overrides

use ratatui::style::Color;
use std::collections::HashMap;
use std::fs;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,      // Focused borders, selected base
    pub danger: Color,      // Validation errors
    pub success: Color,     // Converted values
    pub text: Color,        // Primary text
    pub text_dim: Color,    // Hints and placeholders
    pub inactive: Color,    // Unfocused borders
    pub header: Color,      // Box titles and base names
    pub bg_selected: Color, // Focused button background
}

impl Default for Theme {
    fn default() -> Self {
        // Catppuccin-inspired
        Self {
            accent: Color::Rgb(250, 179, 135),
            danger: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 218, 149),
            text: Color::Rgb(205, 214, 244),
            text_dim: Color::Rgb(147, 153, 178),
            inactive: Color::Rgb(88, 91, 112),
            header: Color::Rgb(137, 180, 250),
            bg_selected: Color::Rgb(69, 71, 90),
        }
    }
}

impl Theme {
    /// Build the theme from config
    pub fn load(config: &ThemeConfig) -> Self {
        let mut theme = Self::default();

        if let Some(path) = &config.file {
            match fs::read_to_string(path) {
                Ok(content) => theme.apply_kitty_colors(&Self::parse_kitty_conf(&content)),
                Err(e) => tracing::warn!("Could not read theme file {}: {}", path.display(), e),
            }
        }

        theme.apply_overrides(config);
        theme
    }

    /// Map kitty colour names onto our roles
    fn apply_kitty_colors(&mut self, colors: &HashMap<String, Color>) {
        let pick = |keys: &[&str]| keys.iter().find_map(|k| colors.get(*k).copied());

        if let Some(c) = pick(&["color2", "color10"]) {
            self.accent = c;
        }
        if let Some(c) = pick(&["color1", "color9"]) {
            self.danger = c;
        }
        if let Some(c) = pick(&["color10", "color2"]) {
            self.success = c;
        }
        if let Some(c) = pick(&["foreground"]) {
            self.text = c;
        }
        if let Some(c) = pick(&["color8"]) {
            self.text_dim = c;
        }
        if let Some(c) = pick(&["inactive_border_color", "color8"]) {
            self.inactive = c;
        }
        if let Some(c) = pick(&["color4", "color12"]) {
            self.header = c;
        }
        if let Some(c) = pick(&["selection_background", "color0"]) {
            self.bg_selected = c;
        }
    }

    fn apply_overrides(&mut self, config: &ThemeConfig) {
        let slots: [(&Option<String>, &mut Color, &str); 8] = [
            (&config.accent, &mut self.accent, "accent"),
            (&config.danger, &mut self.danger, "danger"),
            (&config.success, &mut self.success, "success"),
            (&config.text, &mut self.text, "text"),
            (&config.text_dim, &mut self.text_dim, "text_dim"),
            (&config.inactive, &mut self.inactive, "inactive"),
            (&config.header, &mut self.header, "header"),
            (&config.bg_selected, &mut self.bg_selected, "bg_selected"),
        ];

        for (value, slot, name) in slots {
            if let Some(value) = value {
                match Self::parse_hex_color(value) {
                    Some(color) => *slot = color,
                    None => tracing::warn!("Ignoring invalid {} color: {}", name, value),
                }
            }
        }
    }

    /// Parse kitty.conf format: `key value` or `key #hexcolor`
    fn parse_kitty_conf(content: &str) -> HashMap<String, Color> {
        let mut colors = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once(char::is_whitespace) {
                if let Some(color) = Self::parse_hex_color(value) {
                    colors.insert(key.trim().to_string(), color);
                }
            }
        }

        colors
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(Theme::parse_hex_color("#FFC107"), Some(Color::Rgb(255, 193, 7)));
        assert_eq!(Theme::parse_hex_color("fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(Theme::parse_hex_color("#12"), None);
        assert_eq!(Theme::parse_hex_color("#zzzzzz"), None);
        assert_eq!(Theme::parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_parse_kitty_conf() {
        let content = "# comment\nforeground #bebebe\ncolor1   #D35F5F\nfont_family JetBrains Mono\n\n";
        let colors = Theme::parse_kitty_conf(content);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors.get("foreground"), Some(&Color::Rgb(190, 190, 190)));
        assert_eq!(colors.get("color1"), Some(&Color::Rgb(211, 95, 95)));
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let config = ThemeConfig {
            accent: Some("#000000".to_string()),
            danger: Some("not a color".to_string()),
            ..ThemeConfig::default()
        };
        let theme = Theme::load(&config);
        assert_eq!(theme.accent, Color::Rgb(0, 0, 0));
        assert_eq!(theme.danger, Theme::default().danger);
    }

    #[test]
    fn test_kitty_colors_then_overrides() {
        let mut theme = Theme::default();
        theme.apply_kitty_colors(&Theme::parse_kitty_conf("color2 #00ff00\ncolor1 #ff0000"));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 0));
        assert_eq!(theme.danger, Color::Rgb(255, 0, 0));

        theme.apply_overrides(&ThemeConfig {
            danger: Some("#00f".to_string()),
            ..ThemeConfig::default()
        });
        assert_eq!(theme.danger, Color::Rgb(0, 0, 255));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 0));
    }
}
