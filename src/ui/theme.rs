//! Terminal styles, resolved once per process

use owo_colors::Style;
use std::sync::OnceLock;

use crate::metric::Metric;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub heading: Style,
    pub ok: Style,
    pub failure: Style,
    pub caution: Style,
    pub accent: Style,
    pub label: Style,
    pub faint: Style,
    weight: Style,
    water: Style,
    distance: Style,
}

impl Theme {
    /// Colors follow `console`'s terminal and `CLICOLOR` detection
    pub fn detect() -> Self {
        Self::new(console::colors_enabled())
    }

    pub fn new(color: bool) -> Self {
        if !color {
            return Self {
                heading: Style::new(),
                ok: Style::new(),
                failure: Style::new(),
                caution: Style::new(),
                accent: Style::new(),
                label: Style::new(),
                faint: Style::new(),
                weight: Style::new(),
                water: Style::new(),
                distance: Style::new(),
            };
        }

        Self {
            heading: Style::new().cyan().bold(),
            ok: Style::new().green().bold(),
            failure: Style::new().red().bold(),
            caution: Style::new().yellow().bold(),
            accent: Style::new().magenta(),
            label: Style::new().white().dimmed(),
            faint: Style::new().bright_black(),
            weight: Style::new().bright_magenta(),
            water: Style::new().blue(),
            distance: Style::new().green(),
        }
    }

    /// Line and marker style for a metric's chart
    pub fn series(&self, metric: Metric) -> Style {
        match metric {
            Metric::Weight => self.weight.clone(),
            Metric::Water => self.water.clone(),
            Metric::Distance => self.distance.clone(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
