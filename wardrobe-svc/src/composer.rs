//! Outfit composer
//!
//! Pure selection state machine turning item taps into a validated,
//! ordered outfit. No I/O: the composer works on item snapshots from the
//! store and never mutates it.
//!
//! States: `Idle` -> `Selecting` (0-3 categories populated) -> `Idle` on
//! cancel or on successful composition. Within `Selecting`, each wearable
//! category holds at most one item; tapping the current selection clears it,
//! tapping another item of the same category replaces it, and accessory
//! items are never selectable.

use thiserror::Error;
use wardrobe_common::{Category, Item};

/// Composition errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    /// Selection mode is not active
    #[error("Selection mode is not active")]
    NotSelecting,

    /// No wearable category is populated
    #[error("No items selected for the outfit")]
    EmptySelection,
}

/// An assembled outfit: the populated selections in Upper -> Bottom -> Shoe
/// order, empty slots omitted. Built on demand, never stored.
pub type Outfit = Vec<Item>;

/// Per-session selection slots, at most one item per wearable category
#[derive(Debug, Clone, Default, PartialEq)]
struct Selection {
    upper: Option<Item>,
    bottom: Option<Item>,
    shoe: Option<Item>,
}

impl Selection {
    fn slot_mut(&mut self, category: Category) -> Option<&mut Option<Item>> {
        match category {
            Category::UpperWear => Some(&mut self.upper),
            Category::BottomWear => Some(&mut self.bottom),
            Category::Shoe => Some(&mut self.shoe),
            Category::Accessory => None,
        }
    }

    fn slot(&self, category: Category) -> Option<&Item> {
        match category {
            Category::UpperWear => self.upper.as_ref(),
            Category::BottomWear => self.bottom.as_ref(),
            Category::Shoe => self.shoe.as_ref(),
            Category::Accessory => None,
        }
    }

    fn ordered(&self) -> Vec<Item> {
        [&self.upper, &self.bottom, &self.shoe]
            .into_iter()
            .filter_map(|slot| slot.clone())
            .collect()
    }

    fn is_empty(&self) -> bool {
        self.upper.is_none() && self.bottom.is_none() && self.shoe.is_none()
    }
}

#[derive(Debug, Clone, Default)]
enum Mode {
    #[default]
    Idle,
    Selecting(Selection),
}

/// Selection-session state machine
#[derive(Debug, Clone, Default)]
pub struct OutfitComposer {
    mode: Mode,
}

impl OutfitComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether selection mode is active
    pub fn is_selecting(&self) -> bool {
        matches!(self.mode, Mode::Selecting(_))
    }

    /// Enter selection mode with empty slots; no-op if already selecting
    pub fn enter_selection(&mut self) {
        if !self.is_selecting() {
            self.mode = Mode::Selecting(Selection::default());
        }
    }

    /// Leave selection mode, discarding any partial selection
    pub fn cancel(&mut self) {
        self.mode = Mode::Idle;
    }

    /// Toggle an item in or out of its category slot
    ///
    /// No-op outside selection mode and for accessory items. Tapping the
    /// item currently selected for its category clears that slot; tapping a
    /// different item replaces whatever the slot held.
    pub fn toggle_select(&mut self, item: &Item) {
        let Mode::Selecting(selection) = &mut self.mode else {
            return;
        };
        let Some(slot) = selection.slot_mut(item.category) else {
            return;
        };

        match slot {
            Some(current) if current.id == item.id => *slot = None,
            _ => *slot = Some(item.clone()),
        }
    }

    /// The item currently selected for a category, if any
    pub fn selected(&self, category: Category) -> Option<&Item> {
        match &self.mode {
            Mode::Selecting(selection) => selection.slot(category),
            Mode::Idle => None,
        }
    }

    /// Whether this item is the current selection for its category
    pub fn is_selected(&self, item: &Item) -> bool {
        self.selected(item.category)
            .is_some_and(|selected| selected.id == item.id)
    }

    /// True iff at least one wearable category is populated
    ///
    /// Partial outfits of one or two items are permitted.
    pub fn can_compose(&self) -> bool {
        match &self.mode {
            Mode::Selecting(selection) => !selection.is_empty(),
            Mode::Idle => false,
        }
    }

    /// Produce the ordered outfit and return to `Idle`, clearing selection
    pub fn compose(&mut self) -> Result<Outfit, ComposeError> {
        let Mode::Selecting(selection) = &self.mode else {
            return Err(ComposeError::NotSelecting);
        };
        if selection.is_empty() {
            return Err(ComposeError::EmptySelection);
        }

        let outfit = selection.ordered();
        self.mode = Mode::Idle;
        Ok(outfit)
    }
}
