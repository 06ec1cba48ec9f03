// Wear calculator - consumed tread, distance travelled and wear rate
use crate::domain::tire::TreadCondition;
use crate::infrastructure::config::TreadThresholds;

#[derive(Debug, Clone, Copy)]
pub struct WearCalculator {
    thresholds: TreadThresholds,
}

impl WearCalculator {
    pub fn new(thresholds: TreadThresholds) -> Self {
        Self { thresholds }
    }

    /// Distance run until the measurement, in km.
    ///
    /// The accumulated life distance wins when positive; otherwise the
    /// observation reading minus the initial odometer. Non-positive is missing.
    pub fn distance_travelled(
        &self,
        life_distance_km: Option<f64>,
        observation_km: Option<f64>,
        initial_odometer_km: Option<f64>,
    ) -> Option<f64> {
        if let Some(life) = life_distance_km.filter(|d| *d > 0.0) {
            return Some(life);
        }
        let (reading, odometer) = (observation_km?, initial_odometer_km?);
        Some(reading - odometer).filter(|d| *d > 0.0)
    }

    pub fn consumed_tread(&self, initial_mm: Option<f64>, measured_mm: Option<f64>) -> Option<f64> {
        Some(initial_mm? - measured_mm?)
    }

    /// mm of tread per km; missing unless distance is strictly positive.
    pub fn wear_rate(&self, consumed_mm: Option<f64>, distance_km: Option<f64>) -> Option<f64> {
        let distance = distance_km.filter(|d| *d > 0.0)?;
        Some(consumed_mm? / distance)
    }

    pub fn condition(&self, tread_mm: Option<f64>) -> Option<TreadCondition> {
        let tread = tread_mm?;
        if tread < self.thresholds.critical_mm {
            Some(TreadCondition::Critical)
        } else if tread < self.thresholds.warning_mm {
            Some(TreadCondition::Warning)
        } else {
            Some(TreadCondition::Ok)
        }
    }
}
