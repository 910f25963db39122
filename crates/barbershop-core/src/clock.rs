use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};

/// Source of the shop's local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// System clock shifted to the shop's fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct ShopClock {
    offset: FixedOffset,
}

impl ShopClock {
    /// Builds a clock for the given offset in minutes east of UTC.
    ///
    /// Offsets outside chrono's supported range fall back to UTC.
    #[must_use]
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(minutes * 60).unwrap_or_else(|| {
            tracing::warn!(minutes, "unsupported UTC offset; using UTC");
            Utc.fix()
        });
        Self { offset }
    }
}

impl Clock for ShopClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_its_instant() {
        let instant = chrono::NaiveDate::from_ymd_opt(2025, 3, 4)
            .and_then(|d| d.and_hms_opt(15, 30, 0))
            .expect("valid instant");
        assert_eq!(FixedClock(instant).now(), instant);
    }

    #[test]
    fn shop_clock_applies_offset() {
        let utc = ShopClock::from_offset_minutes(0).now();
        let ist = ShopClock::from_offset_minutes(330).now();
        let diff = (ist - utc).num_minutes();
        assert!((329..=331).contains(&diff), "unexpected offset diff {diff}");
    }
}
