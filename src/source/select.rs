use crate::source::record::AreaRecord;
use std::collections::BTreeMap;

/// Keeps the most populous record of every state.
///
/// Records missing the state code or population are skipped. When two
/// records tie, the one read first wins. Output is ordered by state code.
pub fn most_populous_per_state(
    records: Vec<AreaRecord>,
    state_field: &str,
    population_field: &str,
) -> Vec<AreaRecord> {
    let mut best: BTreeMap<String, (f64, AreaRecord)> = BTreeMap::new();

    for record in records {
        let (Some(state), Some(population)) =
            (record.text(state_field), record.number(population_field))
        else {
            tracing::debug!(
                "Skipping place without '{}' or '{}'",
                state_field,
                population_field
            );
            continue;
        };

        match best.get(&state) {
            Some((current, _)) if *current >= population => {}
            _ => {
                best.insert(state, (population, record));
            }
        }
    }

    best.into_values().map(|(_, record)| record).collect()
}
