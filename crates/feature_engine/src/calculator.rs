//! Per-window calculator seam.

use contracts::ContractError;

use crate::window::Window;

/// One feature pass over a single window
///
/// Passes write disjoint feature blocks and never read each other's output,
/// so they may run in any order.
pub trait WindowCalculator {
    /// Pass name (used for logging/metrics)
    fn name(&self) -> &'static str;

    /// Compute this pass's block and store it on the window
    ///
    /// # Errors
    /// `EmptyWindow` if the window holds no samples.
    fn apply(&self, window: &mut Window) -> Result<(), ContractError>;
}

/// Run `calculator` over every window, in order
pub fn apply_all<C: WindowCalculator + ?Sized>(
    calculator: &C,
    windows: &mut [Window],
) -> Result<(), ContractError> {
    windows
        .iter_mut()
        .try_for_each(|window| calculator.apply(window))
}

pub(crate) fn non_empty(window: &Window) -> Result<(), ContractError> {
    if window.is_empty() {
        return Err(ContractError::EmptyWindow {
            window_id: window.id(),
        });
    }
    Ok(())
}
