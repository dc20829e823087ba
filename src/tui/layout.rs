//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use super::runtime::App;
use super::style;
use crate::sim::waveform::WAVE_POINTS;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // waveform chart
            Constraint::Length(3), // SOC gauge
            Constraint::Length(6), // status panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_waveforms(frame, app, chunks[1]);
    render_soc_gauge(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: preset name, run state, pedal command, loop cadence.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let state_label = if app.paused {
        "PAUSED"
    } else if app.is_running() {
        "RUNNING"
    } else {
        "STOPPED"
    };

    let state_icon = if app.paused {
        "‖"
    } else if app.is_running() {
        "▶"
    } else {
        "■"
    };

    let header = Line::from(vec![
        Span::styled(
            " EV-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ pedal={:+.1} m/s² │ {}ms │ {} {} ",
            app.commanded_accel_ms2,
            app.tick_interval_ms(),
            state_icon,
            state_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Four-channel waveform chart, each channel normalized to [0, 1] the way
/// the bench canvas scaled them: voltage against 120% nominal, current
/// against 120% rated, speed against 200 km/h, temperature over 10–70 °C.
fn render_waveforms(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.state();
    let snap = app.waveforms();

    let voltage_data: Vec<(f64, f64)> = snap
        .voltage_v()
        .enumerate()
        .map(|(i, v)| (i as f64, style::norm_voltage(v, state.battery_voltage_v)))
        .collect();
    let current_data: Vec<(f64, f64)> = snap
        .current_a()
        .enumerate()
        .map(|(i, c)| {
            (
                i as f64,
                style::norm_current(c, state.motor_power_kw, state.battery_voltage_v),
            )
        })
        .collect();
    let speed_data: Vec<(f64, f64)> = snap
        .speed_kmh()
        .enumerate()
        .map(|(i, s)| (i as f64, style::norm_speed(s)))
        .collect();
    let temp_data: Vec<(f64, f64)> = snap
        .temperature_c()
        .enumerate()
        .map(|(i, t)| (i as f64, style::norm_temp(t)))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Voltage (V)")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::VOLTAGE_COLOR))
            .data(&voltage_data),
        Dataset::default()
            .name("Current (A)")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::CURRENT_COLOR))
            .data(&current_data),
        Dataset::default()
            .name("Speed (km/h)")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::SPEED_COLOR))
            .data(&speed_data),
        Dataset::default()
            .name("Temp (°C)")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::TEMP_COLOR))
            .data(&temp_data),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(" Waveforms ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("sample")
                .bounds([0.0, (WAVE_POINTS - 1) as f64])
                .labels(vec!["0".to_string(), format!("{}", WAVE_POINTS - 1)]),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, 1.05])
                .labels(vec!["0".to_string(), "1".to_string()]),
        );

    frame.render_widget(chart, area);
}

/// Battery SoC gauge.
fn render_soc_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let soc = app.state().soc_pct;
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" State of Charge ")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(style::soc_color(soc)))
        .ratio((soc / 100.0).clamp(0.0, 1.0))
        .label(format!("{soc:.1}%"));
    frame.render_widget(gauge, area);
}

/// Status panel: the readouts the bench displayed as labels.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let s = app.state();
    let lines = vec![
        Line::from(format!(
            "  Speed: {:>6.1} km/h   Distance: {:>7.2} km    Energy: {:>6.2} kWh",
            s.vehicle_speed_kmh, s.distance_km, s.energy_consumed_kwh,
        )),
        Line::from(format!(
            "  Torque: {:>6.1} Nm    RPM: {:>7.0}           Temp:   {:>5.1} °C",
            s.motor_torque_nm, s.motor_rpm, s.battery_temp_c,
        )),
        Line::from(format!(
            "  Mode: {:<8}       Regen: {:<5}           Eff:    {:>5.0} Wh/km",
            s.drive_mode.name(),
            if s.regen_braking { "on" } else { "off" },
            s.energy_efficiency_wh_per_km,
        )),
        Line::from(format!(
            "  Pack: {:.0} V / {:.0} kWh   Motor: {:.0} kW",
            s.battery_voltage_v, s.battery_capacity_kwh, s.motor_power_kw,
        )),
    ];

    let block = Block::default().title(" Status ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  s:Start  x:Stop  r:Reset  ↑/↓:Pedal  Space:Pause  +/-:Cadence  1/2/3:Preset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
