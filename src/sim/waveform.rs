//! Rolling sample buffers feeding the waveform display.
//!
//! Four parallel fixed-capacity circular buffers (voltage, current, speed,
//! pack temperature) share one write cursor. The recorder is allocated once
//! at engine construction, zero-filled, overwritten continuously while the
//! simulation runs, and never resized.

use serde::Serialize;

/// Number of samples retained per channel.
pub const WAVE_POINTS: usize = 200;

/// Fixed-capacity circular recorder for plotted scalar channels.
#[derive(Debug, Clone)]
pub struct WaveformRecorder {
    voltage_v: Vec<f64>,
    current_a: Vec<f64>,
    speed_kmh: Vec<f64>,
    temperature_c: Vec<f64>,
    cursor: usize,
}

impl WaveformRecorder {
    /// Creates a zero-filled recorder.
    pub fn new() -> Self {
        Self {
            voltage_v: vec![0.0; WAVE_POINTS],
            current_a: vec![0.0; WAVE_POINTS],
            speed_kmh: vec![0.0; WAVE_POINTS],
            temperature_c: vec![0.0; WAVE_POINTS],
            cursor: 0,
        }
    }

    /// Samples retained per channel.
    pub fn capacity(&self) -> usize {
        WAVE_POINTS
    }

    /// Writes one sample into each channel at the cursor, then advances
    /// the cursor modulo capacity.
    pub fn record(&mut self, voltage_v: f64, current_a: f64, speed_kmh: f64, temperature_c: f64) {
        self.voltage_v[self.cursor] = voltage_v;
        self.current_a[self.cursor] = current_a;
        self.speed_kmh[self.cursor] = speed_kmh;
        self.temperature_c[self.cursor] = temperature_c;
        self.cursor = (self.cursor + 1) % WAVE_POINTS;
    }

    /// Returns a read-only view of the most recent `count` samples per
    /// channel in chronological (oldest-to-newest) order.
    ///
    /// Requesting more than [`WAVE_POINTS`] samples saturates to the full
    /// buffer; there is no bounds error.
    pub fn snapshot(&self, count: usize) -> WaveformSnapshot<'_> {
        let count = count.min(WAVE_POINTS);
        let start = (self.cursor + WAVE_POINTS - count) % WAVE_POINTS;
        WaveformSnapshot {
            rec: self,
            start,
            count,
        }
    }
}

impl Default for WaveformRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// A borrowed, chronological window over the recorder's channels.
///
/// Each channel accessor yields a lazy, finite, restartable (`Clone`)
/// iterator; the snapshot never mutates the recorder.
#[derive(Debug, Clone, Copy)]
pub struct WaveformSnapshot<'a> {
    rec: &'a WaveformRecorder,
    start: usize,
    count: usize,
}

impl<'a> WaveformSnapshot<'a> {
    /// Samples per channel in this window.
    pub fn len(&self) -> usize {
        self.count
    }

    /// `true` when the window is empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn channel(&self, buf: &'a [f64]) -> impl Iterator<Item = f64> + Clone + 'a {
        let end = self.start + self.count;
        let split = end.min(WAVE_POINTS);
        let wrapped = end - split;
        buf[self.start..split]
            .iter()
            .chain(buf[..wrapped].iter())
            .copied()
    }

    /// Pack voltage samples (V), oldest first.
    pub fn voltage_v(&self) -> impl Iterator<Item = f64> + Clone + 'a {
        self.channel(&self.rec.voltage_v)
    }

    /// Motor current samples (A), oldest first.
    pub fn current_a(&self) -> impl Iterator<Item = f64> + Clone + 'a {
        self.channel(&self.rec.current_a)
    }

    /// Vehicle speed samples (km/h), oldest first.
    pub fn speed_kmh(&self) -> impl Iterator<Item = f64> + Clone + 'a {
        self.channel(&self.rec.speed_kmh)
    }

    /// Pack temperature samples (°C), oldest first.
    pub fn temperature_c(&self) -> impl Iterator<Item = f64> + Clone + 'a {
        self.channel(&self.rec.temperature_c)
    }

    /// Collects all four channels into owned vectors.
    pub fn to_dump(&self) -> WaveformDump {
        WaveformDump {
            voltage_v: self.voltage_v().collect(),
            current_a: self.current_a().collect(),
            speed_kmh: self.speed_kmh().collect(),
            temperature_c: self.temperature_c().collect(),
        }
    }
}

/// Owned copy of a snapshot, used by the API surface.
#[derive(Debug, Clone, Serialize)]
pub struct WaveformDump {
    /// Pack voltage samples (V), oldest first.
    pub voltage_v: Vec<f64>,
    /// Motor current samples (A), oldest first.
    pub current_a: Vec<f64>,
    /// Vehicle speed samples (km/h), oldest first.
    pub speed_kmh: Vec<f64>,
    /// Pack temperature samples (°C), oldest first.
    pub temperature_c: Vec<f64>,
}
