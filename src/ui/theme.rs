//! Terminal colours for standings and load notices
//!
//! Colour follows `console`'s own decision for stdout, which covers TTY
//! detection and the `CLICOLOR` / `CLICOLOR_FORCE` variables.

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    /// Championship and section titles
    pub title: Style,
    pub leader: Style,
    /// P2 and P3
    pub podium: Style,
    pub created: Style,
    pub loaded: Style,
    pub warn: Style,
    pub label: Style,
    pub dim: Style,
}

impl Theme {
    pub fn detect() -> Self {
        Self::for_colors(console::colors_enabled())
    }

    pub fn for_colors(enabled: bool) -> Self {
        if enabled {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            title: Style::new().red().bold(),
            leader: Style::new().yellow().bold(),
            podium: Style::new().bold(),
            created: Style::new().cyan(),
            loaded: Style::new().green().bold(),
            warn: Style::new().yellow().bold(),
            label: Style::new().white().dimmed(),
            dim: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        Self {
            title: Style::new(),
            leader: Style::new(),
            podium: Style::new(),
            created: Style::new(),
            loaded: Style::new(),
            warn: Style::new(),
            label: Style::new(),
            dim: Style::new(),
        }
    }

    /// Style for a championship position, `None` off the podium
    pub fn for_rank(&self, rank: usize) -> Option<&Style> {
        match rank {
            1 => Some(&self.leader),
            2 | 3 => Some(&self.podium),
            _ => None,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
