use stockview_core::IntervalSelection;

use crate::report::IntervalRow;

pub fn run() -> Vec<IntervalRow> {
    IntervalSelection::ALL
        .into_iter()
        .map(|selection| IntervalRow {
            label: selection.label(),
            endpoint: if selection.is_real_time() { "prev" } else { "range" },
            bar_size: selection.bar_size(),
        })
        .collect()
}
