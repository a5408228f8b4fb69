use chrono::{DateTime, NaiveDate, Utc};

// ---------------------------------------------------------------------------
// Activity states
// ---------------------------------------------------------------------------

/// Ordinal activity level of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityState {
    /// acceleration <= fidget cutoff
    Sedentary,
    /// fidget cutoff < acceleration <= active cutoff
    Fidget,
    /// acceleration > active cutoff
    Active,
}

impl ActivityState {
    /// Parses a stored label. Unknown labels yield `None` and are treated as unset.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "SEDENTARY" => Some(ActivityState::Sedentary),
            "FIDGET" => Some(ActivityState::Fidget),
            "ACTIVE" => Some(ActivityState::Active),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActivityState::Sedentary => "SEDENTARY",
            ActivityState::Fidget => "FIDGET",
            ActivityState::Active => "ACTIVE",
        };
        write!(f, "{s}")
    }
}

/// Day-level label. Fidget time is folded into ACTIVE before this is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DominantState {
    Sedentary,
    Active,
}

impl DominantState {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "SEDENTARY" => Some(DominantState::Sedentary),
            "ACTIVE" => Some(DominantState::Active),
            _ => None,
        }
    }
}

impl std::fmt::Display for DominantState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DominantState::Sedentary => write!(f, "SEDENTARY"),
            DominantState::Active => write!(f, "ACTIVE"),
        }
    }
}

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

/// One timestamped acceleration reading from the sample store.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub acceleration: f64,
    /// Label recorded at ingest time, if any. Recomputed by the classifier.
    pub state: Option<ActivityState>,
}

/// Per-state sample counts over a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    pub sedentary: u64,
    pub fidget: u64,
    pub active: u64,
}

impl StateCounts {
    pub fn record(&mut self, state: ActivityState) {
        match state {
            ActivityState::Sedentary => self.sedentary += 1,
            ActivityState::Fidget => self.fidget += 1,
            ActivityState::Active => self.active += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.sedentary + self.fidget + self.active
    }
}

impl FromIterator<ActivityState> for StateCounts {
    fn from_iter<I: IntoIterator<Item = ActivityState>>(iter: I) -> Self {
        let mut counts = StateCounts::default();
        for state in iter {
            counts.record(state);
        }
        counts
    }
}

// ---------------------------------------------------------------------------
// Daily summary
// ---------------------------------------------------------------------------

/// The persisted, date-keyed aggregate of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub sedentary_minutes: f64,
    /// FIDGET + ACTIVE minutes.
    pub active_minutes: f64,
    pub dominant_state: DominantState,
    /// Always within 0..=100.
    pub activity_score: u8,
}
