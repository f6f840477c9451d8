use crate::error::{ReportError, ReportResult};

/// Linear mapping between a finite, non-empty domain and the unit interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ReportResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ReportError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Position of `value` inside the domain, `0` at the start and `1` at the end.
    ///
    /// Values outside the domain extrapolate.
    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        (value - self.domain_start) / span
    }

    /// Inverse of [`LinearScale::normalize`].
    #[must_use]
    pub fn interpolate(self, fraction: f64) -> f64 {
        let span = self.domain_end - self.domain_start;
        self.domain_start + fraction * span
    }
}
