//! Display content — semantic rendering of the main view and menu views
//! into two fixed-width lines for a 16×2 character display.
//!
//! The core supplies content only; the [`DisplayPort`]
//! (crate::app::ports::DisplayPort) adapter owns the physical bus and
//! layout. Lines are `heapless::String<16>` so the render path allocates
//! nothing; overlong content is truncated at the column limit, matching
//! what the physical display would do.

pub mod lcd;

use core::fmt::Write as _;

use heapless::String;

use crate::config::ClimateConfig;
use crate::menu::{MenuCursor, MenuNode};
use crate::mode::OperatingMode;
use crate::sensors::ClimateSnapshot;

/// Character columns on the display.
pub const COLS: usize = 16;

/// One rendered frame: two lines of at most [`COLS`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayFrame {
    pub line0: String<COLS>,
    pub line1: String<COLS>,
}

/// Append `args`-formatted text, silently truncating at the column limit.
macro_rules! put {
    ($line:expr, $($arg:tt)*) => {
        let _ = write!(LineWriter(&mut $line), $($arg)*);
    };
}

/// Writer that drops characters past the line capacity instead of erroring.
struct LineWriter<'a>(&'a mut String<COLS>);

impl core::fmt::Write for LineWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for ch in s.chars() {
            if self.0.push(ch).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Boot greeting shown while init runs.
pub fn boot_view() -> DisplayFrame {
    let mut frame = DisplayFrame::default();
    put!(frame.line0, "ContainerFan");
    put!(frame.line1, "v{}", env!("CARGO_PKG_VERSION"));
    frame
}

/// Render the main (idle) view: mode tag, temperatures, humidity and fan
/// marker. Sensor faults show placeholders instead of stale numbers.
pub fn main_view(mode: OperatingMode, snap: &ClimateSnapshot, fan_on: bool) -> DisplayFrame {
    let mut frame = DisplayFrame::default();

    if snap.valid {
        put!(frame.line0, "{} I:{:.1} O:{:.1}", mode.tag(), snap.inside_temp, snap.outside_temp);
        put!(frame.line1, "RH I:{:.0} O:{:.0}", snap.inside_humidity, snap.outside_humidity);
    } else {
        put!(frame.line0, "{} I:--.- O:--.-", mode.tag());
        put!(frame.line1, "RH I:-- O:--");
    }
    if fan_on {
        put!(frame.line1, " ON");
    }
    frame
}

/// Render the active menu node.
pub fn menu_view(cursor: MenuCursor, config: &ClimateConfig) -> DisplayFrame {
    let mut frame = DisplayFrame::default();
    let edit_marker = if cursor.edit_mode { " <" } else { "" };

    match cursor.node {
        // The main view has its own renderer; an empty frame here keeps the
        // function total.
        MenuNode::MainDisplay => {}

        MenuNode::Root => {
            put!(frame.line0, "MENU:");
            let label = match cursor.selected_index {
                0 => "1.Target temp",
                1 => "2.Target humid",
                2 => "3.Min temp",
                3 => "4.Calibration",
                4 => "5.Reset config",
                _ => "6.Back",
            };
            put!(frame.line1, "{label}");
        }

        MenuNode::SetTargetTemp => {
            put!(frame.line0, "Target temp:");
            put!(frame.line1, "{:.1} C{edit_marker}", config.target_temp);
        }

        MenuNode::SetTargetHumidity => {
            put!(frame.line0, "Target humidity:");
            put!(frame.line1, "{:.0} %{edit_marker}", config.target_humidity);
        }

        MenuNode::SetMinTemp => {
            put!(frame.line0, "Min temp:");
            put!(frame.line1, "{:.1} C{edit_marker}", config.min_temp);
        }

        MenuNode::Calibrate => {
            put!(frame.line0, "Calibration");
            put!(frame.line1, "Not implemented");
        }

        MenuNode::ResetConfirm => {
            put!(frame.line0, "Reset config");
            put!(frame.line1, "Press = reset");
        }
    }
    frame
}
