//! Rotary-encoder menu state machine.
//!
//! Navigation and editing are modelled as a sum type with exhaustive
//! matching: adding a menu node is a compile-time-checked exercise. The
//! machine owns the cursor; the configuration it edits is passed in by
//! reference each tick (no globals).
//!
//! Inputs per tick are the accumulated encoder delta (signed detents since
//! last consumption) and an already-debounced button edge. A delta is
//! interpreted as *either* navigation *or* a value step, never both.
//!
//! Persistence is requested, not performed: the machine reports a
//! [`MenuOutcome`] and the application service drives the config store.

use crate::config::ClimateConfig;

/// Every node of the fixed menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNode {
    /// Default resting state showing live readings.
    MainDisplay,
    /// The six-entry root menu.
    Root,
    SetTargetTemp,
    SetTargetHumidity,
    SetMinTemp,
    /// Placeholder — no sub-behavior yet.
    Calibrate,
    ResetConfirm,
}

/// Number of entries in the root menu.
pub const ROOT_ENTRIES: i32 = 6;

/// Cursor over the menu tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCursor {
    pub node: MenuNode,
    /// Root entry index; meaningless outside `Root`.
    pub selected_index: i32,
    /// True while a numeric leaf is capturing encoder deltas as value steps.
    pub edit_mode: bool,
}

/// What the service must do after an input was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Nothing beyond a possible cursor move / value change.
    None,
    /// An edit was committed (edit mode left): run the store's dirty check.
    PersistRequested,
    /// Defaults were restored: force an out-of-cycle persist.
    ResetRequested,
}

pub struct MenuMachine {
    cursor: MenuCursor,
}

impl Default for MenuMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuMachine {
    pub fn new() -> Self {
        Self {
            cursor: MenuCursor {
                node: MenuNode::MainDisplay,
                selected_index: 0,
                edit_mode: false,
            },
        }
    }

    /// Current cursor (for rendering).
    pub fn cursor(&self) -> MenuCursor {
        self.cursor
    }

    /// Consume an accumulated encoder delta.
    ///
    /// In `Root` (not editing) the delta moves the selection; in an edit
    /// leaf with `edit_mode` it steps the corresponding config field. On
    /// `MainDisplay` encoder input is ignored entirely so line noise can
    /// never drift a parameter.
    pub fn handle_delta(&mut self, delta: i32, config: &mut ClimateConfig) {
        if delta == 0 {
            return;
        }

        match (self.cursor.node, self.cursor.edit_mode) {
            (MenuNode::MainDisplay, _) => {}

            (MenuNode::Root, _) => {
                self.cursor.selected_index =
                    (self.cursor.selected_index + delta).clamp(0, ROOT_ENTRIES - 1);
            }

            (MenuNode::SetTargetTemp, true) => {
                let (lo, hi) = ClimateConfig::TARGET_TEMP_RANGE;
                config.target_temp =
                    (config.target_temp + delta as f32 * ClimateConfig::TEMP_STEP).clamp(lo, hi);
            }
            (MenuNode::SetTargetHumidity, true) => {
                let (lo, hi) = ClimateConfig::TARGET_HUM_RANGE;
                config.target_humidity =
                    (config.target_humidity + delta as f32 * ClimateConfig::HUM_STEP).clamp(lo, hi);
            }
            (MenuNode::SetMinTemp, true) => {
                let (lo, hi) = ClimateConfig::MIN_TEMP_RANGE;
                config.min_temp =
                    (config.min_temp + delta as f32 * ClimateConfig::TEMP_STEP).clamp(lo, hi);
            }

            // Leaves outside edit mode ignore rotation.
            (MenuNode::SetTargetTemp, false)
            | (MenuNode::SetTargetHumidity, false)
            | (MenuNode::SetMinTemp, false)
            | (MenuNode::Calibrate, _)
            | (MenuNode::ResetConfirm, _) => {}
        }
    }

    /// Consume a debounced button press.
    pub fn handle_button(&mut self, config: &mut ClimateConfig) -> MenuOutcome {
        // Committing an edit takes priority over navigation.
        if self.cursor.edit_mode {
            self.cursor.edit_mode = false;
            return MenuOutcome::PersistRequested;
        }

        match self.cursor.node {
            MenuNode::MainDisplay => {
                self.cursor.node = MenuNode::Root;
                self.cursor.selected_index = 0;
                MenuOutcome::None
            }

            MenuNode::Root => {
                self.cursor.node = match self.cursor.selected_index {
                    0 => MenuNode::SetTargetTemp,
                    1 => MenuNode::SetTargetHumidity,
                    2 => MenuNode::SetMinTemp,
                    3 => MenuNode::Calibrate,
                    4 => MenuNode::ResetConfirm,
                    _ => MenuNode::MainDisplay,
                };
                MenuOutcome::None
            }

            MenuNode::SetTargetTemp | MenuNode::SetTargetHumidity | MenuNode::SetMinTemp => {
                self.cursor.edit_mode = true;
                MenuOutcome::None
            }

            MenuNode::Calibrate => {
                self.cursor.node = MenuNode::Root;
                MenuOutcome::None
            }

            MenuNode::ResetConfirm => {
                *config = ClimateConfig::default();
                self.cursor.node = MenuNode::MainDisplay;
                MenuOutcome::ResetRequested
            }
        }
    }
}
