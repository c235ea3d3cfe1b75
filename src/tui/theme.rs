//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score-based colors (traffic light pattern, green is best)
    pub score_high: Color,
    pub score_mid: Color,
    pub score_low: Color,
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub kpi_value: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,

    // Chart colors
    pub histogram_bar: Color,
    pub radar_line: Color,
    pub radar_grid: Color,
    pub scatter_low: Color,
    pub scatter_mid: Color,
    pub scatter_high: Color,
    pub axis_color: Color,
}

impl ThemeColors {
    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            score_high: Color::Green,
            score_mid: Color::Yellow,
            score_low: Color::Red,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            kpi_value: Color::White,
            tab_active_style: Style::new().fg(Color::Cyan).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
            histogram_bar: Color::Cyan,
            radar_line: Color::Cyan,
            radar_grid: Color::Indexed(240),
            scatter_low: Color::Rgb(68, 1, 84),
            scatter_mid: Color::Rgb(33, 145, 140),
            scatter_high: Color::Rgb(253, 231, 37),
            axis_color: Color::Gray,
        }
    }

    /// Light theme palette for bright terminal backgrounds
    pub fn light() -> Self {
        Self {
            score_high: Color::Rgb(0, 128, 0),
            score_mid: Color::Rgb(175, 120, 0),
            score_low: Color::Rgb(180, 0, 0),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(255),
            index_color: Color::Indexed(244),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(243),
            title_color: Color::Blue,
            kpi_value: Color::Black,
            tab_active_style: Style::new().fg(Color::Blue).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::Indexed(245)),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(180, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(254),
            histogram_bar: Color::Blue,
            radar_line: Color::Blue,
            radar_grid: Color::Indexed(248),
            scatter_low: Color::Rgb(68, 1, 84),
            scatter_mid: Color::Rgb(33, 145, 140),
            scatter_high: Color::Rgb(190, 170, 0),
            axis_color: Color::Indexed(240),
        }
    }

    /// Returns the appropriate color for a score based on its percentage of max score
    pub fn score_color(&self, score: f64, max_score: f64) -> Color {
        let percentage = if max_score > 0.0 {
            (score / max_score) * 100.0
        } else {
            0.0
        };

        if percentage >= 70.0 {
            self.score_high
        } else if percentage >= 40.0 {
            self.score_mid
        } else {
            self.score_low
        }
    }
}

/// Diverging red-white-blue scale for correlation coefficients in [-1, 1]
pub fn correlation_color(r: f64) -> Color {
    let r = r.clamp(-1.0, 1.0);
    let fade = |full: u8| -> u8 {
        // Blend from white (255) toward `full` by |r|
        (255.0 - (255.0 - full as f64) * r.abs()).round() as u8
    };
    if r < 0.0 {
        Color::Rgb(fade(178), fade(24), fade(43))
    } else {
        Color::Rgb(fade(33), fade(102), fade(172))
    }
}

/// Pick the palette for the configured mode, probing the terminal on `auto`
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
