//! Render/measure/trim loop — re-renders the document, counts pages, and
//! trims one unit at a time until the page budget is met or nothing
//! trimmable remains.
//!
//! Inherently sequential: each iteration depends on the previous page count,
//! so there is no parallelism within one document's fitting loop.

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::layout::trim::trim_once;
use crate::pdf::PageRenderer;
use crate::resume::model::Section;

/// Final state of a fitting run. `html` is the rendering that was measured
/// last — the one the caller should persist.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub html: String,
    pub pages: u32,
    pub within_budget: bool,
    pub trims: u32,
}

/// Runs the fitting loop. `rebuild` re-renders the full document from the
/// current (shrinking) section list. A `max_pages` of 0 disables fitting.
///
/// Exhausting all trimmable content is not an error: the best-effort final
/// state is returned with `within_budget == false`.
pub async fn fit_to_pages<F>(
    renderer: &dyn PageRenderer,
    sections: &mut Vec<Section>,
    rebuild: F,
    max_pages: u32,
) -> Result<FitOutcome, AppError>
where
    F: Fn(&[Section]) -> String,
{
    if max_pages == 0 {
        return Ok(FitOutcome {
            html: rebuild(sections),
            pages: 0,
            within_budget: true,
            trims: 0,
        });
    }

    let mut trims = 0u32;
    loop {
        let html = rebuild(sections);
        let pages = renderer.page_count(&html).await?;
        debug!(pages, trims, "measured rendered document");

        if pages <= max_pages {
            return Ok(FitOutcome {
                html,
                pages,
                within_budget: true,
                trims,
            });
        }
        if !trim_once(sections) {
            warn!(
                pages,
                max_pages, trims, "content exhausted before reaching page budget"
            );
            return Ok(FitOutcome {
                html,
                pages,
                within_budget: false,
                trims,
            });
        }
        trims += 1;
    }
}
