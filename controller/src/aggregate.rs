//! Error/warning totals for the status indicator.

use locpopup_types::{AggregateCounts, LocationEntry};

/// Count errors and warnings over the whole list, wherever the cursor is.
///
/// Other categories are ignored.
#[must_use]
pub fn aggregate(entries: &[LocationEntry]) -> AggregateCounts {
    entries
        .iter()
        .fold(AggregateCounts::default(), |mut counts, entry| {
            let category = entry.category();
            if category.is_error() {
                counts.errors += 1;
            } else if category.is_warning() {
                counts.warnings += 1;
            }
            counts
        })
}
