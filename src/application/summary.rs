// Fleet summary - aggregate indicators over the enriched table
use crate::application::normalizer::optional_key;
use crate::domain::summary::{FleetSummary, GroupMean, StatusCount, mean};
use crate::domain::tire::{EnrichedTireRecord, InitialTreadSource, TreadCondition};
use crate::infrastructure::config::StatusOffset;
use std::cmp::Ordering;

const NO_STATUS: &str = "Sem status";

pub fn summarize(records: &[EnrichedTireRecord], offsets: &[StatusOffset]) -> FleetSummary {
    let total = records.len();
    let critical_count = records
        .iter()
        .filter(|r| r.tread_condition == Some(TreadCondition::Critical))
        .count();

    FleetSummary {
        total,
        status_counts: status_counts(records, offsets),
        vehicle_type_counts: vehicle_type_counts(records),
        condition_counts: TreadCondition::ALL
            .iter()
            .map(|c| (*c, records.iter().filter(|r| r.tread_condition == Some(*c)).count()))
            .collect(),
        mean_tread_mm: mean(records.iter().filter_map(|r| r.record.measured_tread_mm)),
        mean_distance_km: mean(records.iter().filter_map(|r| r.distance_km)),
        critical_count,
        critical_pct: (total > 0).then(|| critical_count as f64 / total as f64 * 100.0),
        wear_by_vehicle_type: wear_by_vehicle_type(records),
        unresolved_initial_tread: records
            .iter()
            .filter(|r| r.initial_tread_source == InitialTreadSource::Unresolved)
            .count(),
    }
}

/// Counts grouped by normalized status, labelled with the first spelling seen.
fn status_counts(records: &[EnrichedTireRecord], offsets: &[StatusOffset]) -> Vec<StatusCount> {
    let mut counts: Vec<(Option<String>, StatusCount)> = Vec::new();

    for record in records {
        let status = record.record.status.as_deref();
        let key = optional_key(status);
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, entry)) => entry.count += 1,
            None => counts.push((
                key,
                StatusCount {
                    status: status.unwrap_or(NO_STATUS).to_string(),
                    count: 1,
                    offset: 0,
                },
            )),
        }
    }

    for offset in offsets {
        let key = optional_key(Some(offset.status.as_str()));
        match counts.iter_mut().find(|(k, _)| key.is_some() && *k == key) {
            Some((_, entry)) => entry.offset += offset.offset,
            None => counts.push((
                key,
                StatusCount {
                    status: offset.status.clone(),
                    count: 0,
                    offset: offset.offset,
                },
            )),
        }
    }

    let mut counts: Vec<StatusCount> = counts.into_iter().map(|(_, c)| c).collect();
    counts.sort_by(|a, b| b.adjusted().cmp(&a.adjusted()).then_with(|| a.status.cmp(&b.status)));
    counts
}

fn vehicle_type_counts(records: &[EnrichedTireRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|(label, _)| *label == record.vehicle_type) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.vehicle_type.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

fn wear_by_vehicle_type(records: &[EnrichedTireRecord]) -> Vec<GroupMean> {
    let mut groups: Vec<(String, Vec<f64>, usize)> = Vec::new();
    for record in records {
        let idx = match groups.iter().position(|(label, _, _)| *label == record.vehicle_type) {
            Some(idx) => idx,
            None => {
                groups.push((record.vehicle_type.clone(), Vec::new(), 0));
                groups.len() - 1
            }
        };
        let group = &mut groups[idx];
        group.2 += 1;
        if let Some(rate) = record.wear_mm_per_km {
            group.1.push(rate);
        }
    }

    let mut means: Vec<GroupMean> = groups
        .into_iter()
        .map(|(label, rates, count)| GroupMean {
            label,
            count,
            mean: mean(rates),
        })
        .collect();

    means.sort_by(|a, b| match (a.mean, b.mean) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.label.cmp(&b.label)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.label.cmp(&b.label),
    });
    means
}
