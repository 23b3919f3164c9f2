//! Operating-mode selection from the two front-panel toggle switches.
//!
//! The mode is re-derived on every loop tick from the raw toggle levels and
//! is never persisted. Ambiguous switch states (both active, neither active)
//! fail safe to [`OperatingMode::MeasureOnly`]: a miswired or mid-travel
//! toggle must disable ventilation, never guess a mode.

/// The three operating modes of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingMode {
    /// Cool/dry the enclosure using cooler outside air.
    Summer,
    /// Warm/dry the enclosure using milder outside air (below 15 °C).
    Winter,
    /// Sensors and display only; the fan relay is forced off.
    MeasureOnly,
}

impl OperatingMode {
    /// Single-character tag shown in the display's top-left corner.
    pub fn tag(self) -> char {
        match self {
            Self::Summer => 'S',
            Self::Winter => 'W',
            Self::MeasureOnly => 'M',
        }
    }
}

/// Map the two toggle levels to an operating mode.
///
/// Pure and total; exactly one toggle active selects its mode, anything
/// else is `MeasureOnly`.
pub fn determine_mode(winter_active: bool, summer_active: bool) -> OperatingMode {
    match (winter_active, summer_active) {
        (false, true) => OperatingMode::Summer,
        (true, false) => OperatingMode::Winter,
        // Both or neither: ambiguous hardware state, do not ventilate.
        (true, true) | (false, false) => OperatingMode::MeasureOnly,
    }
}
