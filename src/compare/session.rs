// The comparison session: single owner of the loaded dataset, the slot
// selection, and the normalization/dictionary configuration.
//
// Every state mutation goes through `selection`; the UI then calls
// `derive()` to recompute the full render-ready view. Unresolvable slot
// names are skipped, never an error.

use crate::compare::normalize;
use crate::compare::selection::{SelectionState, SlotId};
use crate::config::NormalizationConfig;
use crate::dataset::{Dataset, Stat, StatLine};
use crate::dictionary::Dictionaries;

/// Derived comparison output for one resolved slot.
#[derive(Debug, Clone)]
pub struct SlotComparison {
    pub number: u8,
    pub id: SlotId,
    /// Canonical record name (may differ from the typed name in case).
    pub player_name: String,
    /// Normalized radar vector in `Stat::ALL` order.
    pub radar: [f64; Stat::COUNT],
    pub stats: StatLine,
    pub team: String,
    pub team_full: String,
    pub position: String,
    pub position_full: String,
    pub games_played: Option<f64>,
}

/// The full derived view: one entry per slot whose name resolved against
/// the dataset, in slot order. Recomputed on every update; never stored.
#[derive(Debug, Clone, Default)]
pub struct ComparisonView {
    pub slots: Vec<SlotComparison>,
}

/// One dropdown suggestion: dataset rank (1-based) plus player name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub rank: usize,
    pub name: String,
}

/// Session context: initialized once at startup, mutated only through
/// `selection`, read through `derive()` and `suggestions()`.
#[derive(Debug)]
pub struct CompareSession {
    dataset: Dataset,
    pub selection: SelectionState,
    normalization: NormalizationConfig,
    dictionaries: Dictionaries,
    dropdown_limit: usize,
}

impl CompareSession {
    /// Build a session over a loaded dataset. Slots 1 and 2 are seeded with
    /// the first two dataset records so the charts have content at startup.
    pub fn new(
        dataset: Dataset,
        normalization: NormalizationConfig,
        dictionaries: Dictionaries,
        dropdown_limit: usize,
    ) -> Self {
        let mut selection = SelectionState::new();
        let records = dataset.records();
        if let Some(first) = records.first() {
            selection.set_name(1, first.name.clone());
        }
        if let Some(second) = records.get(1) {
            selection.set_name(2, second.name.clone());
        }

        CompareSession {
            dataset,
            selection,
            normalization,
            dictionaries,
            dropdown_limit,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn radar_max(&self) -> f64 {
        self.normalization.radar_max
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dictionaries
    }

    /// Recompute the comparison view for the current slot set. Slots whose
    /// name is blank or unmatched are omitted.
    pub fn derive(&self) -> ComparisonView {
        let mut slots = Vec::with_capacity(self.selection.slot_count());
        for (number, slot) in self.selection.slots() {
            let Some(record) = self.dataset.lookup(&slot.name) else {
                continue;
            };
            slots.push(SlotComparison {
                number,
                id: slot.id(),
                player_name: record.name.clone(),
                radar: normalize(&record.stats, &self.normalization),
                stats: record.stats.clone(),
                team: record.team.clone(),
                team_full: self.dictionaries.full_team_names(&record.team),
                position: record.position.clone(),
                position_full: self.dictionaries.full_position_names(&record.position),
                games_played: record.games_played,
            });
        }
        ComparisonView { slots }
    }

    /// Dropdown suggestions for a slot: the first `dropdown_limit` dataset
    /// players (numbered by dataset rank), filtered by a case-insensitive
    /// substring match on the name. An empty query lists them all.
    pub fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        let needle = query.trim().to_lowercase();
        self.dataset
            .records()
            .iter()
            .take(self.dropdown_limit)
            .enumerate()
            .filter(|(_, r)| needle.is_empty() || r.name.to_lowercase().contains(&needle))
            .map(|(i, r)| Suggestion {
                rank: i + 1,
                name: r.name.clone(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
