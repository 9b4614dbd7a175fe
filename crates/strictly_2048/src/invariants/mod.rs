//! First-class invariants for 2048 grids.
//!
//! Invariants are logical properties that must hold for every grid the
//! engine produces. They are checked by the move and spawn contracts and can
//! be tested independently.

mod grid_shape;
mod power_of_two;

pub use grid_shape::GridShapeInvariant;
pub use power_of_two::PowerOfTwoInvariant;

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
///
/// Implemented for tuples so sets compose as type aliases.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every invariant a well-formed grid satisfies.
pub type GridInvariants = (GridShapeInvariant, PowerOfTwoInvariant);

/// Joins violation descriptions into one message.
pub fn describe(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_invariant_set_holds_for_empty_grid() {
        assert!(GridInvariants::check_all(&Grid::new(4)).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_violation() {
        let mut grid = Grid::new(4);
        grid.set(3, 12);

        let violations = GridInvariants::check_all(&grid).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            describe(&violations),
            PowerOfTwoInvariant::description()
        );
    }
}
