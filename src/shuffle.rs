use std::collections::HashMap;

use crate::map::PartialCounts;

/// Word → the partial counts contributed by each map task whose output
/// contained that word. Built once, read-only afterwards.
pub type ShuffleMap = HashMap<String, Vec<u64>>;

/// The synchronization barrier between the stages. Runs on the coordinator's
/// thread of control only after every map task has reached a terminal state,
/// so it is the sole writer of cross-task state and needs no locking.
///
/// Each partial map contributes exactly one entry to its words' lists; the
/// list order is irrelevant (summation is commutative) but nothing is
/// dropped or duplicated.
pub fn merge(partials: Vec<PartialCounts>) -> ShuffleMap {
    let mut shuffled = ShuffleMap::new();
    for partial in partials {
        for (word, count) in partial {
            shuffled.entry(word).or_default().push(count);
        }
    }
    shuffled
}
