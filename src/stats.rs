//! Rolling statistics for flock tracking and graph display.

use crate::flocking::Rule;
use crate::simulation::TickReport;

/// Ring buffer that stores the last N samples of a metric.
pub struct RingBuffer {
    data: Vec<f32>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: vec![0.0; capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    pub fn push(&mut self, value: f32) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Return samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let start = if self.len < self.capacity {
            0
        } else {
            self.head
        };
        (0..self.len).map(move |i| self.data[(start + i) % self.capacity])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn last(&self) -> Option<f32> {
        if self.len == 0 {
            None
        } else {
            let idx = (self.head + self.capacity - 1) % self.capacity;
            Some(self.data[idx])
        }
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

/// All tracked flock statistics.
pub struct SimStats {
    pub polarization: RingBuffer,
    pub blinks: RingBuffer,
    /// Share of boids per rule, indexed by `Rule::index`.
    pub rule_share: [RingBuffer; 4],

    // Per-sample accumulators
    pub blinks_since_sample: u32,
    pub sample_interval: u32,
    pub tick_counter: u32,
}

impl SimStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            polarization: RingBuffer::new(capacity),
            blinks: RingBuffer::new(capacity),
            rule_share: std::array::from_fn(|_| RingBuffer::new(capacity)),
            blinks_since_sample: 0,
            sample_interval: 10, // sample every N ticks
            tick_counter: 0,
        }
    }

    /// Record a tick. Blinks add up between samples; the rest is sampled as-is.
    pub fn record(&mut self, report: &TickReport) {
        self.blinks_since_sample += report.blinks as u32;

        self.tick_counter += 1;
        // an interval of zero samples every tick
        if self.tick_counter % self.sample_interval.max(1) != 0 {
            return;
        }

        self.polarization.push(report.polarization as f32);
        self.blinks.push(self.blinks_since_sample as f32);

        let total: usize = report.rule_counts.iter().sum();
        for rule in Rule::ALL {
            let share = if total > 0 {
                report.count(rule) as f32 / total as f32
            } else {
                0.0
            };
            self.rule_share[rule.index()].push(share);
        }

        self.blinks_since_sample = 0;
    }

    pub fn reset(&mut self) {
        self.polarization.clear();
        self.blinks.clear();
        for buf in &mut self.rule_share {
            buf.clear();
        }
        self.blinks_since_sample = 0;
        self.tick_counter = 0;
    }
}
