use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Visual phase of the flashing cells during `Showing`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    #[default]
    Hidden,
    FlipIn,
    Shown,
    FlipOut,
}

/// One step of the reveal sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealStep {
    Phase(RevealPhase),
    /// Hide everything and hand the board to the player.
    Finish,
}

/// Offsets from the start of an attempt for the double-pulse reveal:
/// flip in, hold, flip out, pause, flip in, hold, flip out.
pub fn reveal_plan(timings: &Timings, first_level: bool) -> [(Duration, RevealStep); 8] {
    use RevealPhase::*;
    use RevealStep::*;

    let lead_in = if first_level {
        timings.first_lead_in
    } else {
        timings.lead_in
    };
    let pulse_in = lead_in;
    let shown = pulse_in + timings.flip;
    let pulse_out = shown + timings.hold;
    let gap = pulse_out + timings.flip;
    let second_in = gap + timings.pause;
    let second_shown = second_in + timings.flip;
    let second_out = second_shown + timings.hold;
    let finish = second_out + timings.flip;

    [
        (pulse_in, Phase(FlipIn)),
        (shown, Phase(Shown)),
        (pulse_out, Phase(FlipOut)),
        (gap, Phase(Hidden)),
        (second_in, Phase(FlipIn)),
        (second_shown, Phase(Shown)),
        (second_out, Phase(FlipOut)),
        (finish, Finish),
    ]
}
