// Baseline aggregation parameters
pub const COST_DECIMALS: u32 = 2;
pub const RUNTIME_DECIMALS: u32 = 2;
pub const DEVIATION_DECIMALS: u32 = 6;
pub const NO_DATA_MARKER: &str = "---";
pub const UNKNOWN_MARKER: &str = "unknown";
pub const MAX_WORKERS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Denominator of the percent-optimal columns. `None` uses the number of
    /// distinct instances found in each file.
    pub instances_per_experiment: Option<usize>,
    pub cost_decimals: u32,
    pub runtime_decimals: u32,
    pub deviation_decimals: u32,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            instances_per_experiment: None,
            cost_decimals: COST_DECIMALS,
            runtime_decimals: RUNTIME_DECIMALS,
            deviation_decimals: DEVIATION_DECIMALS,
        }
    }
}

impl AggregationConfig {
    pub fn with_instances_per_experiment(mut self, n: Option<usize>) -> Self {
        self.instances_per_experiment = n;
        self
    }

    /// Instances counted when turning optimal counts into percentages.
    /// `span` is one past the highest instance index in the file.
    pub fn expected_instances(&self, span: usize) -> usize {
        self.instances_per_experiment.unwrap_or(span)
    }
}

/// Rounds half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}
