//! Time-limited promotions and their countdowns.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A featured promotion with a deadline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Headline discount, in percent.
    pub discount_percent: u8,
    pub ends_at: DateTime<Utc>,
    pub image: String,
}

impl Deal {
    /// Time remaining until the deal ends.
    pub fn time_left(&self, now: DateTime<Utc>) -> TimeLeft {
        TimeLeft::until(self.ends_at, now)
    }

    /// Check if the deal has ended.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.ends_at <= now
    }
}

/// Countdown split into whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl TimeLeft {
    /// Time from `now` until `end`. A deadline in the past yields zeros.
    pub fn until(end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = end - now;
        if remaining <= Duration::zero() {
            return Self::default();
        }

        let total_seconds = remaining.num_seconds();
        Self {
            days: total_seconds / 86_400,
            hours: (total_seconds / 3_600) % 24,
            minutes: (total_seconds / 60) % 60,
            seconds: total_seconds % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// The featured promotions, with deadlines relative to `now`.
pub fn featured_deals(now: DateTime<Utc>) -> Vec<Deal> {
    [
        (
            1,
            "Spring Tech Sale",
            "Up to 40% off on premium laptops",
            40,
            3,
            "https://images.unsplash.com/photo-1611078489935-0cb964de46d6?q=80&w=1000",
        ),
        (
            2,
            "Gaming Laptops Flash Sale",
            "Limited time offers on gaming laptops",
            25,
            1,
            "https://images.unsplash.com/photo-1603481546238-487240415921?q=80&w=1000",
        ),
        (
            3,
            "Business Laptops Deal",
            "Special pricing on business-class laptops",
            30,
            5,
            "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?q=80&w=1000",
        ),
    ]
    .into_iter()
    .map(|(id, title, description, discount_percent, days, image)| Deal {
        id,
        title: title.to_string(),
        description: description.to_string(),
        discount_percent,
        ends_at: now + Duration::days(days),
        image: image.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_time_left_components() {
        let end = now() + Duration::days(2) + Duration::hours(5) + Duration::minutes(7) + Duration::seconds(9);
        let left = TimeLeft::until(end, now());
        assert_eq!(
            left,
            TimeLeft {
                days: 2,
                hours: 5,
                minutes: 7,
                seconds: 9
            }
        );
        assert_eq!(left.to_string(), "2d 05h 07m 09s");
    }

    #[test]
    fn test_time_left_truncates_millis() {
        let end = now() + Duration::milliseconds(1_999);
        assert_eq!(TimeLeft::until(end, now()).seconds, 1);
    }

    #[test]
    fn test_expired_is_zero() {
        assert!(TimeLeft::until(now(), now()).is_zero());
        assert!(TimeLeft::until(now() - Duration::hours(1), now()).is_zero());
    }

    #[test]
    fn test_featured_deals() {
        let deals = featured_deals(now());
        assert_eq!(deals.len(), 3);
        assert_eq!(deals[0].title, "Spring Tech Sale");
        assert_eq!(deals[0].discount_percent, 40);
        assert_eq!(deals[0].time_left(now()).days, 3);
        assert_eq!(deals[1].time_left(now()).days, 1);
        assert_eq!(deals[2].discount_percent, 30);
        assert!(deals.iter().all(|d| !d.is_expired(now())));
        assert!(deals[1].is_expired(now() + Duration::days(1)));
    }
}
