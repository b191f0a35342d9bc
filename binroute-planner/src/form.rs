use serde::Serialize;

pub const MIN_BINS: u32 = 1;
pub const MIN_THRESHOLD: f64 = 0.0;
pub const MAX_THRESHOLD: f64 = 1.0;
pub const THRESHOLD_STEP: f64 = 0.1;

/// Parameters typed by the user before they are submitted.
///
/// Text that is not a number is refused, the same way a numeric input
/// refuses it. Values outside the advertised bounds are kept and forwarded;
/// rejecting them is left to the backend.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RouteForm {
    bins: u32,
    threshold: f64,
}

impl Default for RouteForm {
    fn default() -> Self {
        Self {
            bins: 20,
            threshold: 0.7,
        }
    }
}

impl RouteForm {
    pub fn bins(&self) -> u32 {
        self.bins
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_bins(&mut self, input: &str) -> Result<(), String> {
        self.bins = input
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Number of Bins must be a whole number, got {:?}", input))?;
        Ok(())
    }

    pub fn set_threshold(&mut self, input: &str) -> Result<(), String> {
        let threshold = input
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Fill Threshold must be a number, got {:?}", input))?;
        if !threshold.is_finite() {
            return Err(format!("Fill Threshold must be a number, got {:?}", input));
        }
        self.threshold = threshold;
        Ok(())
    }

    pub fn in_range(&self) -> bool {
        self.bins >= MIN_BINS && (MIN_THRESHOLD..=MAX_THRESHOLD).contains(&self.threshold)
    }

    /// Values to hand to the coordinator.
    pub fn submit(&self) -> (u32, f64) {
        (self.bins, self.threshold)
    }
}
