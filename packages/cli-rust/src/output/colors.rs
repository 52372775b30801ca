//! Color utilities for CLI output
//!
//! Consistent styling for trust states and add outcomes.

use console::{Style, StyledObject};
use knownhosts_trust_core::AddOutcome;

/// Style a trust state
///
/// - trusted -> green bold
/// - not trusted -> yellow
pub fn trust_style(trusted: bool) -> StyledObject<&'static str> {
    if trusted {
        Style::new().green().bold().apply_to("trusted")
    } else {
        Style::new().yellow().apply_to("not trusted")
    }
}

/// Short label for what an add did
///
/// - added -> green
/// - already known -> dim
/// - not SSH -> dim
pub fn outcome_style(outcome: AddOutcome) -> StyledObject<&'static str> {
    match outcome {
        AddOutcome::Added => Style::new().green().apply_to("added"),
        AddOutcome::AlreadyKnown => Style::new().dim().apply_to("already known"),
        AddOutcome::NotSsh => Style::new().dim().apply_to("not an SSH remote"),
    }
}
