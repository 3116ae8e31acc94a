use super::snapshot::SystemSnapshot;
use std::collections::VecDeque;
use std::time::Instant;

pub const HISTORY_LEN: usize = 120;

/// Exactly `width` samples: the newest `width` when there are enough,
/// otherwise the series left-padded with zeros.
pub fn fit_to_width(samples: &[f64], width: usize) -> Vec<f64> {
    if samples.len() >= width {
        samples[samples.len() - width..].to_vec()
    } else {
        let mut out = vec![0.0; width - samples.len()];
        out.extend_from_slice(samples);
        out
    }
}

/// Fixed-capacity series of timestamped samples, oldest evicted first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<(Instant, f64)>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

impl HistoryBuffer {
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, value: f64) {
        self.push_at(value, Instant::now());
    }

    pub fn push_at(&mut self, value: f64, at: Instant) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back((at, value));
    }

    /// Oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().map(|(_, v)| *v).collect()
    }

    pub fn timestamps(&self) -> Vec<Instant> {
        self.samples.iter().map(|(t, _)| *t).collect()
    }

    pub fn latest(&self) -> Option<f64> {
        self.samples.back().map(|(_, v)| *v)
    }

    pub fn min(&self) -> Option<f64> {
        self.samples.iter().map(|(_, v)| *v).reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.samples.iter().map(|(_, v)| *v).reduce(f64::max)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|(_, v)| *v).sum();
        Some(sum / self.samples.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn fitted(&self, width: usize) -> Vec<f64> {
        fit_to_width(&self.snapshot(), width)
    }
}

/// Per-second rates derived from a monotonically increasing counter.
#[derive(Debug, Clone, Default)]
pub struct RateBuffer {
    rates: HistoryBuffer,
    last: Option<(u64, Instant)>,
}

impl RateBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            rates: HistoryBuffer::new(capacity),
            last: None,
        }
    }

    /// Record a counter reading and return the rate since the previous one.
    ///
    /// The first reading only sets the baseline. A counter that went
    /// backwards (wrap or reset) or a non-positive interval yields 0.
    pub fn update(&mut self, total: u64, now: Instant) -> f64 {
        let rate = match self.last {
            None => 0.0,
            Some((last_total, last_at)) => {
                let elapsed = now.saturating_duration_since(last_at).as_secs_f64();
                if elapsed <= 0.0 || total < last_total {
                    0.0
                } else {
                    (total - last_total) as f64 / elapsed
                }
            }
        };
        self.last = Some((total, now));
        self.rates.push_at(rate, now);
        rate
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.rates
    }

    pub fn latest(&self) -> f64 {
        self.rates.latest().unwrap_or(0.0)
    }

    pub fn clear(&mut self) {
        self.rates.clear();
        self.last = None;
    }
}

/// Every graphed series, fed once per tick from a snapshot.
#[derive(Debug, Clone)]
pub struct SystemHistory {
    capacity: usize,
    cpu_total: HistoryBuffer,
    cpu_cores: Vec<HistoryBuffer>,
    memory: HistoryBuffer,
    swap: HistoryBuffer,
    gpu_usage: HistoryBuffer,
    gpu_memory: HistoryBuffer,
    gpu_temp: HistoryBuffer,
    net_up: RateBuffer,
    net_down: RateBuffer,
    disk_read: RateBuffer,
    disk_write: RateBuffer,
}

impl Default for SystemHistory {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

impl SystemHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            cpu_total: HistoryBuffer::new(capacity),
            cpu_cores: Vec::new(),
            memory: HistoryBuffer::new(capacity),
            swap: HistoryBuffer::new(capacity),
            gpu_usage: HistoryBuffer::new(capacity),
            gpu_memory: HistoryBuffer::new(capacity),
            gpu_temp: HistoryBuffer::new(capacity),
            net_up: RateBuffer::new(capacity),
            net_down: RateBuffer::new(capacity),
            disk_read: RateBuffer::new(capacity),
            disk_write: RateBuffer::new(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record(&mut self, snapshot: &SystemSnapshot) {
        self.record_at(snapshot, Instant::now());
    }

    pub fn record_at(&mut self, snapshot: &SystemSnapshot, now: Instant) {
        self.cpu_total.push_at(snapshot.cpu.usage_percent, now);

        let cores = &snapshot.cpu.per_core;
        if self.cpu_cores.len() != cores.len() {
            self.cpu_cores = (0..cores.len())
                .map(|_| HistoryBuffer::new(self.capacity))
                .collect();
        }
        for (buffer, usage) in self.cpu_cores.iter_mut().zip(cores) {
            buffer.push_at(*usage, now);
        }

        self.memory.push_at(snapshot.memory.percent, now);
        self.swap.push_at(snapshot.memory.swap_percent, now);

        let gpu = &snapshot.gpu;
        if let Some(usage) = gpu.usage_percent {
            self.gpu_usage.push_at(usage, now);
        }
        if let Some(percent) = gpu.vram_percent() {
            self.gpu_memory.push_at(percent, now);
        }
        if let Some(temp) = gpu.temp_c {
            self.gpu_temp.push_at(temp, now);
        }

        self.net_up.update(snapshot.network.bytes_sent, now);
        self.net_down.update(snapshot.network.bytes_recv, now);
        self.disk_read.update(snapshot.disk_io.read_bytes, now);
        self.disk_write.update(snapshot.disk_io.write_bytes, now);
    }

    pub fn cpu_graph_data(&self, width: usize) -> Vec<f64> {
        self.cpu_total.fitted(width)
    }

    /// Empty when the core does not exist.
    pub fn core_graph_data(&self, core: usize, width: usize) -> Vec<f64> {
        self.cpu_cores
            .get(core)
            .map(|buffer| buffer.fitted(width))
            .unwrap_or_default()
    }

    pub fn memory_graph_data(&self, width: usize) -> Vec<f64> {
        self.memory.fitted(width)
    }

    pub fn swap_graph_data(&self, width: usize) -> Vec<f64> {
        self.swap.fitted(width)
    }

    pub fn gpu_graph_data(&self, width: usize) -> Vec<f64> {
        self.gpu_usage.fitted(width)
    }

    pub fn gpu_memory_graph_data(&self, width: usize) -> Vec<f64> {
        self.gpu_memory.fitted(width)
    }

    pub fn gpu_temp_graph_data(&self, width: usize) -> Vec<f64> {
        self.gpu_temp.fitted(width)
    }

    /// `(up, down)` in bytes per second.
    pub fn network_graph_data(&self, width: usize) -> (Vec<f64>, Vec<f64>) {
        (
            self.net_up.history().fitted(width),
            self.net_down.history().fitted(width),
        )
    }

    /// `(read, write)` in bytes per second.
    pub fn disk_io_graph_data(&self, width: usize) -> (Vec<f64>, Vec<f64>) {
        (
            self.disk_read.history().fitted(width),
            self.disk_write.history().fitted(width),
        )
    }

    /// Most recent `(up, down)` rates.
    pub fn network_rates(&self) -> (f64, f64) {
        (self.net_up.latest(), self.net_down.latest())
    }

    /// Most recent `(read, write)` rates.
    pub fn disk_io_rates(&self) -> (f64, f64) {
        (self.disk_read.latest(), self.disk_write.latest())
    }

    pub fn cpu_total(&self) -> &HistoryBuffer {
        &self.cpu_total
    }

    pub fn clear(&mut self) {
        self.cpu_total.clear();
        self.cpu_cores.clear();
        self.memory.clear();
        self.swap.clear();
        self.gpu_usage.clear();
        self.gpu_memory.clear();
        self.gpu_temp.clear();
        self.net_up.clear();
        self.net_down.clear();
        self.disk_read.clear();
        self.disk_write.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::snapshot::{CpuSnapshot, GpuSnapshot};
    use proptest::prelude::*;
    use std::time::Duration;

    #[test]
    fn buffer_evicts_oldest() {
        let mut buffer = HistoryBuffer::new(3);
        for v in 1..=5 {
            buffer.push(v as f64);
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.snapshot(), vec![3.0, 4.0, 5.0]);
        assert_eq!(buffer.latest(), Some(5.0));
        assert_eq!(buffer.min(), Some(3.0));
        assert_eq!(buffer.max(), Some(5.0));
        assert_eq!(buffer.mean(), Some(4.0));
    }

    #[test]
    fn zero_capacity_holds_one_sample() {
        let mut buffer = HistoryBuffer::new(0);
        buffer.push(1.0);
        buffer.push(2.0);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.snapshot(), vec![2.0]);
    }

    #[test]
    fn empty_buffer_has_no_stats() {
        let buffer = HistoryBuffer::new(4);
        assert!(buffer.is_empty());
        assert_eq!(buffer.latest(), None);
        assert_eq!(buffer.mean(), None);
    }

    #[test]
    fn fit_pads_or_takes_tail() {
        assert_eq!(fit_to_width(&[1.0, 2.0], 4), vec![0.0, 0.0, 1.0, 2.0]);
        assert_eq!(fit_to_width(&[1.0, 2.0, 3.0], 2), vec![2.0, 3.0]);
        assert!(fit_to_width(&[1.0], 0).is_empty());
    }

    #[test]
    fn rate_from_counter_deltas() {
        let t0 = Instant::now();
        let mut rate = RateBuffer::new(10);
        assert_eq!(rate.update(1000, t0), 0.0);
        assert_eq!(rate.update(1500, t0 + Duration::from_secs(1)), 500.0);
        assert_eq!(rate.update(200, t0 + Duration::from_secs(2)), 0.0);
        assert_eq!(rate.history().snapshot(), vec![0.0, 500.0, 0.0]);
    }

    #[test]
    fn rate_ignores_zero_interval() {
        let t0 = Instant::now();
        let mut rate = RateBuffer::new(10);
        rate.update(10, t0);
        assert_eq!(rate.update(20, t0), 0.0);
    }

    #[test]
    fn core_buffers_follow_core_count() {
        let mut history = SystemHistory::new(8);
        let mut snapshot = SystemSnapshot {
            cpu: CpuSnapshot {
                per_core: vec![10.0, 20.0],
                ..CpuSnapshot::default()
            },
            ..SystemSnapshot::default()
        };
        history.record(&snapshot);
        assert_eq!(history.core_graph_data(1, 2), vec![0.0, 20.0]);

        snapshot.cpu.per_core = vec![1.0, 2.0, 3.0, 4.0];
        history.record(&snapshot);
        assert_eq!(history.core_graph_data(3, 1), vec![4.0]);
        assert_eq!(history.core_graph_data(0, 2), vec![0.0, 1.0]);
        assert!(history.core_graph_data(9, 2).is_empty());
    }

    #[test]
    fn gpu_series_skip_missing_values() {
        let mut history = SystemHistory::new(8);
        let mut snapshot = SystemSnapshot {
            gpu: GpuSnapshot::unavailable(),
            ..SystemSnapshot::default()
        };
        history.record(&snapshot);
        snapshot.gpu.usage_percent = Some(42.0);
        history.record(&snapshot);
        assert_eq!(history.gpu_graph_data(3), vec![0.0, 0.0, 42.0]);
        assert!(history.gpu_usage.len() == 1);
    }

    #[test]
    fn network_rates_use_snapshot_counters() {
        let t0 = Instant::now();
        let mut history = SystemHistory::new(8);
        let mut snapshot = SystemSnapshot::default();
        snapshot.network.bytes_sent = 1_000;
        snapshot.network.bytes_recv = 4_000;
        history.record_at(&snapshot, t0);
        snapshot.network.bytes_sent = 3_000;
        snapshot.network.bytes_recv = 8_000;
        history.record_at(&snapshot, t0 + Duration::from_secs(2));
        assert_eq!(history.network_rates(), (1_000.0, 2_000.0));
        let (up, down) = history.network_graph_data(2);
        assert_eq!(up, vec![0.0, 1_000.0]);
        assert_eq!(down, vec![0.0, 2_000.0]);
    }

    #[test]
    fn clear_resets_every_series() {
        let mut history = SystemHistory::new(4);
        history.record(&SystemSnapshot::default());
        history.clear();
        assert!(history.cpu_total().is_empty());
        assert_eq!(history.network_rates(), (0.0, 0.0));
    }

    #[test]
    fn secondary_series_are_recorded() {
        let t0 = Instant::now();
        let mut history = SystemHistory::new(4);
        let mut snapshot = SystemSnapshot::default();
        snapshot.memory.swap_percent = 12.5;
        snapshot.gpu = GpuSnapshot {
            name: "gpu".into(),
            usage_percent: Some(10.0),
            vram_used_mb: Some(1024.0),
            vram_total_mb: Some(4096.0),
            temp_c: Some(55.0),
        };
        history.record_at(&snapshot, t0);
        snapshot.gpu.temp_c = None;
        history.record_at(&snapshot, t0 + Duration::from_secs(1));

        assert_eq!(history.swap_graph_data(3), vec![0.0, 12.5, 12.5]);
        assert_eq!(history.gpu_memory_graph_data(2), vec![25.0, 25.0]);
        assert_eq!(history.gpu_temp_graph_data(2), vec![0.0, 55.0]);
    }

    #[test]
    fn timestamps_track_samples() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(500);
        let mut buffer = HistoryBuffer::new(2);
        buffer.push_at(4.0, t0);
        buffer.push_at(-2.0, t1);
        assert_eq!(buffer.timestamps(), vec![t0, t1]);
        assert_eq!(buffer.min(), Some(-2.0));
        assert_eq!(buffer.mean(), Some(1.0));
        buffer.push_at(0.0, t1 + Duration::from_millis(500));
        assert_eq!(buffer.timestamps()[0], t1);
    }

    proptest! {
        #[test]
        fn buffer_keeps_last_capacity(values in proptest::collection::vec(-1e6f64..1e6, 0..300), cap in 1usize..64) {
            let mut buffer = HistoryBuffer::new(cap);
            for v in &values {
                buffer.push(*v);
            }
            let expected: Vec<f64> = values.iter().rev().take(cap).rev().copied().collect();
            prop_assert_eq!(buffer.len(), values.len().min(cap));
            prop_assert_eq!(buffer.snapshot(), expected);
        }

        #[test]
        fn fit_always_matches_width(values in proptest::collection::vec(0.0f64..100.0, 0..200), width in 0usize..150) {
            let fitted = fit_to_width(&values, width);
            prop_assert_eq!(fitted.len(), width);
            if values.len() >= width {
                prop_assert_eq!(&fitted[..], &values[values.len() - width..]);
            } else {
                let pad = width - values.len();
                prop_assert!(fitted[..pad].iter().all(|v| *v == 0.0));
                prop_assert_eq!(&fitted[pad..], &values[..]);
            }
        }
    }
}
