use chrono::{DateTime, Months, Utc};

use crate::attachment::Attachment;
use crate::error::CoreError;

/// Age threshold for attachments, measured in calendar years back from "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    years: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            years: Self::DEFAULT_YEARS,
        }
    }
}

impl RetentionPolicy {
    pub const DEFAULT_YEARS: u32 = 3;

    pub fn new(years: u32) -> Result<Self, CoreError> {
        if years == 0 {
            return Err(CoreError::InvalidInput(
                "retention window must be at least one year".into(),
            ));
        }
        Ok(Self { years })
    }

    pub fn years(&self) -> u32 {
        self.years
    }

    /// `now` minus the retention window. Month arithmetic clamps to the last
    /// valid day, so Feb 29 minus one year lands on Feb 28.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.years.saturating_mul(12)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// An attachment is old when either its creation or its last update
    /// precedes the cutoff.
    pub fn is_old(&self, attachment: &Attachment, now: DateTime<Utc>) -> bool {
        let cutoff = self.cutoff(now);
        attachment.created < cutoff || attachment.updated < cutoff
    }
}
