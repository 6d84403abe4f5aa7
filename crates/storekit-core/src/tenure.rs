//! Account tenure bucketing.

use chrono::{DateTime, Utc};

use crate::consumption::AccountTenure;

impl AccountTenure {
    /// Bucket a number of elapsed days.
    ///
    /// Thresholds are half-open: 0, 1 and 2 days fall in `Days0To3`, 3 days in
    /// `Days3To10`, and so on up to 365 days and beyond in `DaysOver365`.
    /// Negative values (a start date in the future) count as `Days0To3`.
    #[must_use]
    pub const fn from_elapsed_days(days: i64) -> Self {
        match days {
            i64::MIN..=2 => Self::Days0To3,
            3..=9 => Self::Days3To10,
            10..=29 => Self::Days10To30,
            30..=89 => Self::Days30To90,
            90..=179 => Self::Days90To180,
            180..=364 => Self::Days180To365,
            _ => Self::DaysOver365,
        }
    }

    /// Bucket the whole days elapsed between `since` and `now`.
    #[must_use]
    pub fn between(since: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::from_elapsed_days((now - since).num_days())
    }
}

/// Tenure of an account created at `since`, measured against the current time.
#[must_use]
pub fn account_tenure(since: DateTime<Utc>) -> AccountTenure {
    AccountTenure::between(since, Utc::now())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn buckets_use_half_open_thresholds() {
        let cases = [
            (0, AccountTenure::Days0To3),
            (2, AccountTenure::Days0To3),
            (9, AccountTenure::Days3To10),
            (29, AccountTenure::Days10To30),
            (89, AccountTenure::Days30To90),
            (179, AccountTenure::Days90To180),
            (364, AccountTenure::Days180To365),
            (365, AccountTenure::DaysOver365),
            (1000, AccountTenure::DaysOver365),
        ];

        for (days, expected) in cases {
            assert_eq!(AccountTenure::from_elapsed_days(days), expected, "{days} days");
        }
    }

    #[test]
    fn boundaries_start_the_next_bucket() {
        assert_eq!(AccountTenure::from_elapsed_days(3), AccountTenure::Days3To10);
        assert_eq!(AccountTenure::from_elapsed_days(10), AccountTenure::Days10To30);
        assert_eq!(AccountTenure::from_elapsed_days(30), AccountTenure::Days30To90);
        assert_eq!(AccountTenure::from_elapsed_days(90), AccountTenure::Days90To180);
        assert_eq!(AccountTenure::from_elapsed_days(180), AccountTenure::Days180To365);
    }

    #[test]
    fn future_dates_count_as_new_accounts() {
        assert_eq!(AccountTenure::from_elapsed_days(-4), AccountTenure::Days0To3);
    }

    #[test]
    fn between_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let since = now - Duration::days(29) - Duration::hours(23);
        assert_eq!(AccountTenure::between(since, now), AccountTenure::Days10To30);
        assert_eq!(
            AccountTenure::between(now - Duration::days(400), now),
            AccountTenure::DaysOver365
        );
    }

    #[test]
    fn account_tenure_uses_current_time() {
        let since = Utc::now() - Duration::days(100);
        assert_eq!(account_tenure(since), AccountTenure::Days90To180);
    }
}
