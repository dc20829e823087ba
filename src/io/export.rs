//! CSV export for tick records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::TickRecord;

/// Column header for CSV telemetry export.
const HEADER: &str = "tick,time_s,speed_kmh,accel_ms2,motor_rpm,motor_torque_nm,\
                      soc_pct,distance_km,energy_kwh,battery_temp_c,efficiency_wh_per_km";

/// Exports tick records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per tick. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[TickRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes tick records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[TickRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            r.tick.to_string(),
            format!("{:.2}", r.time_s),
            format!("{:.4}", r.speed_kmh),
            format!("{:.4}", r.accel_ms2),
            format!("{:.1}", r.motor_rpm),
            format!("{:.4}", r.motor_torque_nm),
            format!("{:.4}", r.soc_pct),
            format!("{:.6}", r.distance_km),
            format!("{:.6}", r.energy_kwh),
            format!("{:.4}", r.battery_temp_c),
            format!("{:.4}", r.efficiency_wh_per_km),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScenarioConfig;
    use crate::runner::run_scenario;

    fn sample_records(ticks: usize) -> Vec<TickRecord> {
        let mut cfg = ScenarioConfig::baseline();
        cfg.run.ticks = ticks;
        run_scenario(&cfg).records
    }

    #[test]
    fn header_row_matches_schema() {
        let mut buf = Vec::new();
        write_csv(&[], &mut buf).expect("write should succeed");
        let text = String::from_utf8(buf).expect("CSV is UTF-8");
        let header = text.lines().next();
        assert_eq!(
            header,
            Some(
                "tick,time_s,speed_kmh,accel_ms2,motor_rpm,motor_torque_nm,\
                 soc_pct,distance_km,energy_kwh,battery_temp_c,efficiency_wh_per_km"
            )
        );
    }

    #[test]
    fn one_row_per_record_plus_header() {
        let records = sample_records(12);
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).expect("write should succeed");
        let text = String::from_utf8(buf).expect("CSV is UTF-8");
        assert_eq!(text.lines().count(), 13);
    }

    #[test]
    fn output_is_deterministic() {
        let records = sample_records(8);
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_csv(&records, &mut a).expect("write should succeed");
        write_csv(&records, &mut b).expect("write should succeed");
        assert_eq!(a, b);
    }
}
