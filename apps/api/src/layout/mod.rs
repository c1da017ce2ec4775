// Page fitting: the one-unit trim operation and the render/measure/trim loop
// that drives it against the page budget.

pub mod fit_loop;
pub mod trim;

// Re-export the public API consumed by other modules (generator, handlers).
pub use fit_loop::{fit_to_pages, FitOutcome};
pub use trim::trim_once;
