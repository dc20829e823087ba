//! Color constants and scaling helpers for the TUI.

use ratatui::style::Color;

/// Pack voltage trace color.
pub const VOLTAGE_COLOR: Color = Color::Red;
/// Motor current trace color.
pub const CURRENT_COLOR: Color = Color::Green;
/// Vehicle speed trace color.
pub const SPEED_COLOR: Color = Color::Blue;
/// Pack temperature trace color.
pub const TEMP_COLOR: Color = Color::Yellow;
/// SoC gauge color when high (>= 50%).
pub const SOC_HIGH: Color = Color::Green;
/// SoC gauge color when medium (>= 20%).
pub const SOC_MID: Color = Color::Yellow;
/// SoC gauge color when low (< 20%).
pub const SOC_LOW: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Returns a color based on the battery state of charge (percent).
pub fn soc_color(soc_pct: f64) -> Color {
    if soc_pct >= 50.0 {
        SOC_HIGH
    } else if soc_pct >= 20.0 {
        SOC_MID
    } else {
        SOC_LOW
    }
}

/// Normalizes a voltage sample against 120% of nominal pack voltage.
pub fn norm_voltage(sample_v: f64, nominal_v: f64) -> f64 {
    sample_v / (nominal_v * 1.2)
}

/// Normalizes a current sample against 120% of rated motor current.
pub fn norm_current(sample_a: f64, power_kw: f64, nominal_v: f64) -> f64 {
    sample_a / (power_kw * 1000.0 / nominal_v * 1.2)
}

/// Normalizes a speed sample against 200 km/h.
pub fn norm_speed(sample_kmh: f64) -> f64 {
    sample_kmh / 200.0
}

/// Normalizes a temperature sample over the 10–70 °C pack range.
pub fn norm_temp(sample_c: f64) -> f64 {
    (sample_c - 10.0) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soc_color_thresholds() {
        assert_eq!(soc_color(80.0), SOC_HIGH);
        assert_eq!(soc_color(50.0), SOC_HIGH);
        assert_eq!(soc_color(35.0), SOC_MID);
        assert_eq!(soc_color(5.0), SOC_LOW);
    }

    #[test]
    fn normalized_channels_land_in_unit_range() {
        assert!(norm_voltage(400.0, 400.0) < 1.0);
        assert!(norm_current(375.0, 150.0, 400.0) < 1.0);
        assert!(norm_speed(180.0) < 1.0);
        assert!((norm_temp(10.0), norm_temp(70.0)) == (0.0, 1.0));
    }
}
