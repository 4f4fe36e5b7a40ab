//! Plain-text formation layout.
//!
//! Four rows of four cells. Each row starts with the overflow column, then
//! the three formation columns; the fourth row holds the remaining
//! overflow slots. Every member takes two lines:
//!
//! ```text
//! Ruska     408/445   -37
//! mbr    60  100/100  *
//! ```

use std::io::{self, Write};

use phalanx_consensus::Snapshot;
use phalanx_roster::Member;
use phalanx_topology::{Place, GRID_SIZE};

use crate::receiver::Renderer;

/// Width of one member cell.
pub const CELL_WIDTH: usize = 24;

/// Column draw order within a row.
const COLUMNS: [i32; 4] = [GRID_SIZE + 1, 1, 2, 3];

/// Render a snapshot as eight text lines, two per formation row.
pub fn render_lines(snapshot: &Snapshot) -> Vec<String> {
    let mut lines = Vec::with_capacity(8);
    for y in 1..=GRID_SIZE + 1 {
        let mut upper = String::new();
        let mut lower = String::new();
        for x in COLUMNS {
            let [top, bottom] = match snapshot.formation.get(Place::new(x, y)) {
                Some(member) => cell(member, snapshot.is_target(&member.name)),
                None => [String::new(), String::new()],
            };
            upper.push_str(&format!("{top:<width$}", width = CELL_WIDTH));
            lower.push_str(&format!("{bottom:<width$}", width = CELL_WIDTH));
        }
        lines.push(upper.trim_end().to_string());
        lines.push(lower.trim_end().to_string());
    }
    lines
}

/// The two lines of one member cell.
pub fn cell(member: &Member, is_target: bool) -> [String; 2] {
    let name: String = member.name.chars().take(8).collect();
    let diff = match member.hp.deficit() {
        Some(0) | None => String::new(),
        Some(d) => d.to_string(),
    };
    let top = format!(
        "{name:<9}{:>4}/{:<4}{diff:>5}",
        value(member.hp.current),
        value(member.hp.max),
    );
    let bottom = format!(
        "{:<5}{:>4} {:>4}/{:<4}{}",
        member.state_label(),
        value(member.ep.current),
        value(member.sp.current),
        value(member.sp.max),
        if is_target { " *" } else { "" },
    );
    [top, bottom]
}

fn value(v: Option<i32>) -> String {
    v.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// Redraws the whole layout on every snapshot.
#[derive(Debug)]
pub struct TextRenderer<W> {
    out: W,
    clear: bool,
}

impl<W: Write> TextRenderer<W> {
    /// Write plain frames, one after the other.
    pub fn new(out: W) -> Self {
        Self { out, clear: false }
    }

    /// Clear the terminal before each frame.
    pub fn clearing(out: W) -> Self {
        Self { out, clear: true }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn draw(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        if self.clear {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        for line in render_lines(snapshot) {
            writeln!(self.out, "{line}")?;
        }
        if snapshot.auxiliary_present {
            writeln!(self.out, "(+ summoned)")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, snapshot: Snapshot) {
        if let Err(e) = self.draw(&snapshot) {
            tracing::error!("Failed to draw snapshot {}: {}", snapshot.seq, e);
        }
    }
}
