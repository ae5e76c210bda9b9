//! Application model types: `App` and `Screen`.
//!
//! The `App` struct holds what the terminal UI needs beyond the playback
//! controller: the active screen and the cursor over the year/session grid.

use crate::catalog::Catalog;
use crate::navigation;
use crate::player::Selection;

/// Which screen is shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    /// Catalog overview: one row of sessions per year.
    #[default]
    Top,
    /// Transport controls for the selected track.
    Player,
}

/// One year row of the catalog grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRow {
    pub year: i32,
    pub sessions: Vec<u32>,
}

/// The presentation model.
#[derive(Debug, Clone)]
pub struct App {
    pub screen: Screen,
    /// Years newest first, each with its sessions ascending.
    rows: Vec<YearRow>,
    /// Cursor as (row index, session index within the row).
    cursor: (usize, usize),
}

impl App {
    /// Create a new `App` laid out over `catalog`.
    pub fn new(catalog: &Catalog) -> Self {
        let rows = navigation::distinct_years(catalog)
            .into_iter()
            .map(|year| YearRow {
                year,
                sessions: navigation::sessions_for_year(catalog, year),
            })
            .collect();

        Self {
            screen: Screen::Top,
            rows,
            cursor: (0, 0),
        }
    }

    pub fn rows(&self) -> &[YearRow] {
        &self.rows
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Return true if the catalog contains any tracks.
    pub fn has_tracks(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Track under the cursor.
    pub fn cursor_selection(&self) -> Option<Selection> {
        let (r, s) = self.cursor;
        let row = self.rows.get(r)?;
        let session = *row.sessions.get(s)?;
        Some(Selection::new(row.year, session))
    }

    /// Move the cursor between years (positive = down = older), keeping it in range.
    pub fn move_year(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let r = step_clamped(self.cursor.0, delta, self.rows.len());
        let s = self.cursor.1.min(self.rows[r].sessions.len().saturating_sub(1));
        self.cursor = (r, s);
    }

    /// Move the cursor between sessions of the current year.
    pub fn move_session(&mut self, delta: isize) {
        let Some(row) = self.rows.get(self.cursor.0) else {
            return;
        };
        if row.sessions.is_empty() {
            return;
        }
        self.cursor.1 = step_clamped(self.cursor.1, delta, row.sessions.len());
    }

    /// Put the cursor on `selection`, if it is part of the grid.
    pub fn focus(&mut self, selection: Selection) {
        let Some(r) = self.rows.iter().position(|row| row.year == selection.year) else {
            return;
        };
        if let Some(s) = self.rows[r]
            .sessions
            .iter()
            .position(|&n| n == selection.session)
        {
            self.cursor = (r, s);
        }
    }

    pub fn show_player(&mut self) {
        self.screen = Screen::Player;
    }

    pub fn show_top(&mut self) {
        self.screen = Screen::Top;
    }
}

fn step_clamped(current: usize, delta: isize, len: usize) -> usize {
    current
        .saturating_add_signed(delta)
        .min(len.saturating_sub(1))
}
