// Fleet-level aggregates consumed by the dashboard
use crate::domain::tire::TreadCondition;

#[derive(Debug, Clone, PartialEq)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
    /// Manual correction configured for this status; zero unless overridden.
    pub offset: i64,
}

impl StatusCount {
    pub fn adjusted(&self) -> i64 {
        self.count as i64 + self.offset
    }
}

/// Mean of a metric over one category.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub label: String,
    pub count: usize,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FleetSummary {
    pub total: usize,
    pub status_counts: Vec<StatusCount>,
    pub vehicle_type_counts: Vec<(String, usize)>,
    pub condition_counts: Vec<(TreadCondition, usize)>,
    pub mean_tread_mm: Option<f64>,
    pub mean_distance_km: Option<f64>,
    pub critical_count: usize,
    pub critical_pct: Option<f64>,
    /// Sorted ascending by mean; categories without any wear value last.
    pub wear_by_vehicle_type: Vec<GroupMean>,
    pub unresolved_initial_tread: usize,
}

impl FleetSummary {
    pub fn status_count(&self, status: &str) -> Option<&StatusCount> {
        self.status_counts.iter().find(|s| s.status == status)
    }
}

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Median with the two middle values averaged on even-length input.
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut sorted: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}
