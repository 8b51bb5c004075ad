//! First-class invariants for Avalon.
//!
//! Invariants are logical properties of [`GameState`] that must hold at
//! every observable point. The engine checks them after each accepted
//! action in debug builds; tests check them directly.

use super::GameState;
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod mission_tally;
pub mod team_size;
pub mod terminal;

pub use mission_tally::MissionTallyInvariant;
pub use team_size::TeamSizeInvariant;
pub use terminal::TerminalInvariant;

/// All Avalon state invariants as a composable set.
pub type AvalonInvariants = (TeamSizeInvariant, MissionTallyInvariant, TerminalInvariant);

/// Asserts that all game invariants hold (panics on violation in debug builds).
#[instrument(skip(state))]
pub fn assert_invariants(state: &GameState) {
    if let Err(violations) = AvalonInvariants::check_all(state) {
        for violation in &violations {
            warn!(description = %violation.description, "Invariant violated");
        }
        debug_assert!(violations.is_empty(), "Invariants violated: {:?}", violations);
    }
}
