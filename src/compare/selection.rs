// Selection state: which comparison slots exist and who fills them.
//
// Slots 1 and 2 live for the whole session. Up to two optional slots can be
// added; their display numbers are derived from position (3 + index), so
// removal renumbers the survivors with no bookkeeping. Each slot also
// carries a stable `SlotId` so the UI can keep focus on a slot while its
// display number changes.

/// Number of always-present slots.
pub const FIXED_SLOTS: usize = 2;

/// Maximum optional slots on top of the fixed pair.
pub const MAX_EXTRA_SLOTS: usize = 2;

/// First display number used by optional slots.
const FIRST_EXTRA_NUMBER: u8 = 3;

/// Stable slot identity, never reused within a session. The `Default` value
/// matches no live slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotId(u64);

/// One comparison participant position.
#[derive(Debug, Clone)]
pub struct Slot {
    id: SlotId,
    /// User-entered or suggestion-picked player name; may be empty or
    /// unresolvable against the dataset.
    pub name: String,
}

impl Slot {
    pub fn id(&self) -> SlotId {
        self.id
    }
}

/// The active slot set: two fixed slots plus an ordered list of optional
/// slots.
#[derive(Debug, Clone)]
pub struct SelectionState {
    fixed: [Slot; FIXED_SLOTS],
    extras: Vec<Slot>,
    next_id: u64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState {
            fixed: [
                Slot {
                    id: SlotId(1),
                    name: String::new(),
                },
                Slot {
                    id: SlotId(2),
                    name: String::new(),
                },
            ],
            extras: Vec::new(),
            next_id: 3,
        }
    }

    /// True iff another optional slot can be added.
    pub fn can_add(&self) -> bool {
        self.extras.len() < MAX_EXTRA_SLOTS
    }

    /// Add an optional slot with an empty name. Returns the assigned display
    /// number (3 if free, else 4), or `None` when already at capacity.
    pub fn add_slot(&mut self) -> Option<u8> {
        if !self.can_add() {
            return None;
        }
        let id = SlotId(self.next_id);
        self.next_id += 1;
        self.extras.push(Slot {
            id,
            name: String::new(),
        });
        Some(FIRST_EXTRA_NUMBER + (self.extras.len() as u8 - 1))
    }

    /// Remove the optional slot with the given display number. Fixed slots
    /// and absent numbers are a no-op. Surviving optional slots keep their
    /// relative order and renumber contiguously from 3.
    pub fn remove_slot(&mut self, number: u8) {
        if let Some(idx) = self.extra_index(number) {
            self.extras.remove(idx);
        }
    }

    /// Set the player name of the slot with the given display number.
    /// Unknown numbers are ignored.
    pub fn set_name(&mut self, number: u8, name: impl Into<String>) {
        if let Some(slot) = self.slot_mut(number) {
            slot.name = name.into();
        }
    }

    /// The player name of the slot with the given display number.
    pub fn name(&self, number: u8) -> Option<&str> {
        self.slot(number).map(|s| s.name.as_str())
    }

    /// Total active slots (fixed + optional).
    pub fn slot_count(&self) -> usize {
        FIXED_SLOTS + self.extras.len()
    }

    /// Ordered iteration over `(display_number, slot)`.
    pub fn slots(&self) -> impl Iterator<Item = (u8, &Slot)> {
        self.fixed
            .iter()
            .chain(self.extras.iter())
            .enumerate()
            .map(|(i, slot)| (i as u8 + 1, slot))
    }

    /// The slot with the given display number.
    pub fn slot(&self, number: u8) -> Option<&Slot> {
        match number {
            1..=2 => self.fixed.get(number as usize - 1),
            _ => self
                .extra_index(number)
                .and_then(|idx| self.extras.get(idx)),
        }
    }

    fn slot_mut(&mut self, number: u8) -> Option<&mut Slot> {
        match number {
            1..=2 => self.fixed.get_mut(number as usize - 1),
            _ => {
                let idx = self.extra_index(number)?;
                self.extras.get_mut(idx)
            }
        }
    }

    /// Current display number of the slot with the given stable id.
    pub fn number_of(&self, id: SlotId) -> Option<u8> {
        self.slots()
            .find(|(_, slot)| slot.id == id)
            .map(|(number, _)| number)
    }

    /// Stable id of the slot with the given display number.
    pub fn id_of(&self, number: u8) -> Option<SlotId> {
        self.slot(number).map(|s| s.id)
    }

    fn extra_index(&self, number: u8) -> Option<usize> {
        if number < FIRST_EXTRA_NUMBER {
            return None;
        }
        let idx = (number - FIRST_EXTRA_NUMBER) as usize;
        (idx < self.extras.len()).then_some(idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
