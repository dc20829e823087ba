//! Post-hoc run summary computation from tick records.

use std::fmt;

use serde::Serialize;

use super::types::TickRecord;

/// Aggregate statistics derived from a complete headless run.
///
/// Computed post-hoc from the tick record vector so the report always
/// agrees with the exported telemetry.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Simulated duration (s).
    pub duration_s: f64,
    /// Highest vehicle speed reached (km/h).
    pub top_speed_kmh: f64,
    /// Total distance covered (km).
    pub distance_km: f64,
    /// Net energy drawn from the pack (kWh).
    pub energy_consumed_kwh: f64,
    /// Lowest state of charge reached (%).
    pub min_soc_pct: f64,
    /// Highest pack temperature reached (°C).
    pub peak_battery_temp_c: f64,
    /// Highest motor torque reached (Nm).
    pub peak_torque_nm: f64,
    /// Consumption rate at the end of the run (Wh/km).
    pub final_efficiency_wh_per_km: f64,
}

impl RunSummary {
    /// Computes all aggregates from the complete record vector.
    ///
    /// An empty run yields a zeroed report with SoC at 100% and the pack
    /// at ambient temperature.
    pub fn from_records(records: &[TickRecord]) -> Self {
        let Some(last) = records.last() else {
            return Self {
                duration_s: 0.0,
                top_speed_kmh: 0.0,
                distance_km: 0.0,
                energy_consumed_kwh: 0.0,
                min_soc_pct: 100.0,
                peak_battery_temp_c: super::types::AMBIENT_PACK_TEMP_C,
                peak_torque_nm: 0.0,
                final_efficiency_wh_per_km: 0.0,
            };
        };

        let mut top_speed = 0.0_f64;
        let mut min_soc = 100.0_f64;
        let mut peak_temp = f64::MIN;
        let mut peak_torque = 0.0_f64;
        for r in records {
            top_speed = top_speed.max(r.speed_kmh);
            min_soc = min_soc.min(r.soc_pct);
            peak_temp = peak_temp.max(r.battery_temp_c);
            peak_torque = peak_torque.max(r.motor_torque_nm);
        }

        Self {
            duration_s: last.time_s,
            top_speed_kmh: top_speed,
            distance_km: last.distance_km,
            energy_consumed_kwh: last.energy_kwh,
            min_soc_pct: min_soc,
            peak_battery_temp_c: peak_temp,
            peak_torque_nm: peak_torque,
            final_efficiency_wh_per_km: last.efficiency_wh_per_km,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Run Summary ---")?;
        writeln!(f, "Duration:        {:.1} s", self.duration_s)?;
        writeln!(f, "Top speed:       {:.1} km/h", self.top_speed_kmh)?;
        writeln!(f, "Distance:        {:.2} km", self.distance_km)?;
        writeln!(f, "Energy consumed: {:.2} kWh", self.energy_consumed_kwh)?;
        writeln!(f, "Minimum SoC:     {:.1} %", self.min_soc_pct)?;
        writeln!(f, "Peak pack temp:  {:.1} °C", self.peak_battery_temp_c)?;
        writeln!(f, "Peak torque:     {:.0} Nm", self.peak_torque_nm)?;
        write!(
            f,
            "Efficiency:      {:.0} Wh/km",
            self.final_efficiency_wh_per_km
        )
    }
}
