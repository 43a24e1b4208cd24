use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, Timelike, Utc};

/// Wall clock in the league's local time zone.
#[derive(Debug, Clone, Copy)]
pub struct LeagueClock {
    offset: FixedOffset,
    frozen: Option<DateTime<FixedOffset>>,
}

impl LeagueClock {
    /// `utc_offset_hours` outside +-23 falls back to UTC.
    pub fn new(utc_offset_hours: i32) -> Self {
        let offset = utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset, frozen: None }
    }

    /// A clock stuck at `at`.
    #[cfg(test)]
    pub fn fixed(at: DateTime<FixedOffset>) -> Self {
        Self { offset: *at.offset(), frozen: Some(at) }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.frozen.unwrap_or_else(|| Utc::now().with_timezone(&self.offset))
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// The date whose games are "today's". Games run past midnight, so
    /// between 01:00 and 08:00 the slate is still yesterday's.
    pub fn slate_date(&self) -> NaiveDate {
        let now = self.now();
        let today = now.date_naive();
        if (1..8).contains(&now.hour()) {
            today - Duration::days(1)
        } else {
            today
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn pacific(y: i32, m: u32, d: u32, h: u32) -> LeagueClock {
        let tz = FixedOffset::west_opt(8 * 3600).unwrap();
        LeagueClock::fixed(tz.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap())
    }

    #[test]
    fn test_slate_rolls_back_overnight() {
        let day = NaiveDate::from_ymd_opt(2021, 11, 23).unwrap();
        assert_eq!(pacific(2021, 11, 24, 1).slate_date(), day);
        assert_eq!(pacific(2021, 11, 24, 7).slate_date(), day);
    }

    #[test]
    fn test_slate_is_today_otherwise() {
        let day = NaiveDate::from_ymd_opt(2021, 11, 24).unwrap();
        assert_eq!(pacific(2021, 11, 24, 0).slate_date(), day);
        assert_eq!(pacific(2021, 11, 24, 8).slate_date(), day);
        assert_eq!(pacific(2021, 11, 24, 22).slate_date(), day);
    }

    #[test]
    fn test_offset_applies_to_now() {
        let clock = LeagueClock::new(-8);
        assert_eq!(clock.now().offset().local_minus_utc(), -8 * 3600);
        assert_eq!(LeagueClock::new(99).now().offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_overflowing_offset_is_utc() {
        for hours in [1_000_000, i32::MIN, i32::MAX] {
            let clock = LeagueClock::new(hours);
            assert_eq!(clock.now().offset().local_minus_utc(), 0);
            assert_eq!(clock.today(), Utc::now().date_naive());
        }
    }
}
