use super::{Cell, Marker};

/// Neighbor-count threshold rule over the 26-neighborhood.
/// A living cell survives inside `[survive_min, survive_max]`,
/// a dead cell is born on exactly `birth` neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdRule {
    pub survive_min: u8,
    pub survive_max: u8,
    pub birth: u8,
}

impl ThresholdRule {
    pub const fn new(survive_min: u8, survive_max: u8, birth: u8) -> Self {
        Self { survive_min, survive_max, birth }
    }

    /// Next state of a tracked position given its living neighbor count
    pub const fn next_state(&self, current: Marker, neighbors: u8) -> Cell {
        let alive = match current {
            Marker::Alive => neighbors >= self.survive_min && neighbors <= self.survive_max,
            Marker::ActiveZone => neighbors == self.birth,
        };
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Named rule sets selectable from the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RulePreset {
    /// Carter Bays' 5766
    #[default]
    Bays5766,
    /// Carter Bays' 4555
    Bays4555,
    Dense4644,
    Sparse2333,
}

impl RulePreset {
    pub fn all() -> Vec<RulePreset> {
        vec![
            RulePreset::Bays5766,
            RulePreset::Bays4555,
            RulePreset::Dense4644,
            RulePreset::Sparse2333,
        ]
    }

    pub const fn rule(self) -> ThresholdRule {
        match self {
            RulePreset::Bays5766 => ThresholdRule::new(5, 7, 6),
            RulePreset::Bays4555 => ThresholdRule::new(4, 5, 5),
            RulePreset::Dense4644 => ThresholdRule::new(4, 6, 4),
            RulePreset::Sparse2333 => ThresholdRule::new(2, 3, 3),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            RulePreset::Bays5766 => "5766",
            RulePreset::Bays4555 => "4555",
            RulePreset::Dense4644 => "4644",
            RulePreset::Sparse2333 => "2333",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            RulePreset::Bays5766 => "S5-7/B6 - Stable, has gliders",
            RulePreset::Bays4555 => "S4-5/B5 - Oscillators",
            RulePreset::Dense4644 => "S4-6/B4 - Dense growth",
            RulePreset::Sparse2333 => "S2-3/B3 - Dies out fast",
        }
    }

    /// Following preset, wrapping around
    pub fn next(self) -> RulePreset {
        let all = Self::all();
        let idx = all.iter().position(|&p| p == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }
}
