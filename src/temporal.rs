/*
Relative-time and urgency classification.
Module is independent from HTTP / Axum so it can be tested directly;
every function takes an explicit `now` and treats a missing date as the
false/empty default instead of failing.
*/

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate};

// Due-date window used by the dashboard and the task views.
pub const DUE_SOON_DAYS: i64 = 3;

// Current local time with its fixed offset, for handlers that need a "now".
pub fn now_fixed_offset() -> DateTime<FixedOffset> {
    let local = chrono::Local::now();
    let offset_seconds = local.offset().local_minus_utc();
    let fixed = FixedOffset::east_opt(offset_seconds).unwrap();
    local.with_timezone(&fixed)
}

// "Today" / "Tomorrow" / "<duration> ago" / "in <duration>".
// Missing date -> empty string.
pub fn format_relative(date: Option<DateTime<FixedOffset>>, now: DateTime<FixedOffset>) -> String {
    let Some(date) = date else {
        return String::new();
    };

    let day = date.date_naive();
    let today = now.date_naive();

    if day == today {
        return "Today".to_string();
    }
    if today.succ_opt() == Some(day) {
        return "Tomorrow".to_string();
    }

    if date < now {
        format!("{} ago", humanize(now - date))
    } else {
        format!("in {}", humanize(date - now))
    }
}

// Largest-unit approximation of a duration: "3 days", "2 months", "1 year".
fn humanize(d: Duration) -> String {
    let minutes = d.num_minutes();
    let hours = d.num_hours();
    let days = d.num_days();

    if days >= 365 {
        plural(days / 365, "year")
    } else if days >= 30 {
        plural(days / 30, "month")
    } else if days >= 1 {
        plural(days, "day")
    } else if hours >= 1 {
        plural(hours, "hour")
    } else if minutes >= 1 {
        plural(minutes, "minute")
    } else {
        "less than a minute".to_string()
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

// A due date lasts to the end of its own calendar day, so overdue means
// the due date is strictly before today. Due today is not overdue.
pub fn is_overdue(due: Option<DateTime<FixedOffset>>, now: DateTime<FixedOffset>) -> bool {
    match due {
        Some(due) => due.date_naive() < now.date_naive(),
        None => false,
    }
}

// On or before now + threshold_days, and not already overdue.
pub fn is_due_soon(
    due: Option<DateTime<FixedOffset>>,
    now: DateTime<FixedOffset>,
    threshold_days: i64,
) -> bool {
    let Some(due) = due else {
        return false;
    };

    let day = due.date_naive();
    let today = now.date_naive();
    day >= today && day <= today + Duration::days(threshold_days)
}

// Items whose extracted date falls in the given zero-indexed month/year.
// Items without a date are dropped.
pub fn bucket_by_month<T>(
    items: &[T],
    month0: u32,
    year: i32,
    date_of: impl Fn(&T) -> Option<NaiveDate>,
) -> Vec<&T> {
    items
        .iter()
        .filter(|item| match date_of(item) {
            Some(d) => d.month0() == month0 && d.year() == year,
            None => false,
        })
        .collect()
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Zero-indexed; out of range -> empty string.
pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES.get(month0 as usize).copied().unwrap_or("")
}

// One calendar month in the trailing window produced by last_n_months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
    pub month0: u32,
    pub year: i32,
}

impl MonthRef {
    pub fn name(&self) -> &'static str {
        month_name(self.month0)
    }

    // "Jun 2024"
    pub fn label(&self) -> String {
        let name = self.name();
        format!("{} {}", &name[..name.len().min(3)], self.year)
    }
}

// The n consecutive calendar months ending at now's month, oldest first.
pub fn last_n_months(n: u32, now: DateTime<FixedOffset>) -> Vec<MonthRef> {
    let mut months = Vec::with_capacity(n as usize);
    // total months since year zero, so subtraction walks across year breaks
    let anchor = now.year() * 12 + now.month0() as i32;

    for back in (0..n as i32).rev() {
        let total = anchor - back;
        months.push(MonthRef {
            month0: total.rem_euclid(12) as u32,
            year: total.div_euclid(12),
        });
    }

    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    #[test]
    fn relative_labels_for_today_and_tomorrow() {
        let now = at(2024, 6, 20, 10);
        assert_eq!(format_relative(Some(at(2024, 6, 20, 23)), now), "Today");
        assert_eq!(format_relative(Some(at(2024, 6, 21, 1)), now), "Tomorrow");
    }

    #[test]
    fn relative_labels_for_past_and_future() {
        let now = at(2024, 1, 4, 0);
        assert_eq!(format_relative(Some(at(2024, 1, 1, 0)), now), "3 days ago");
        assert_eq!(format_relative(Some(at(2024, 1, 9, 0)), now), "in 5 days");
        assert_eq!(
            format_relative(Some(at(2024, 4, 4, 0)), now),
            "in 3 months"
        );
        assert_eq!(format_relative(Some(at(2022, 1, 4, 0)), now), "2 years ago");
    }

    #[test]
    fn relative_label_for_missing_date_is_empty() {
        assert_eq!(format_relative(None, at(2024, 6, 20, 10)), "");
    }

    #[test]
    fn due_today_is_not_overdue_but_yesterday_is() {
        let now = at(2024, 6, 20, 15);
        assert!(!is_overdue(Some(at(2024, 6, 20, 8)), now));
        assert!(is_overdue(Some(at(2024, 6, 19, 23)), now));
        assert!(!is_overdue(None, now));
    }

    #[test]
    fn three_days_late_is_overdue() {
        let now = at(2024, 1, 4, 0);
        assert!(is_overdue(Some(at(2024, 1, 1, 0)), now));
    }

    #[test]
    fn due_soon_includes_today_through_threshold_and_excludes_overdue() {
        let now = at(2024, 6, 20, 9);
        assert!(is_due_soon(Some(at(2024, 6, 20, 18)), now, DUE_SOON_DAYS));
        assert!(is_due_soon(Some(at(2024, 6, 23, 0)), now, DUE_SOON_DAYS));
        assert!(!is_due_soon(Some(at(2024, 6, 24, 0)), now, DUE_SOON_DAYS));
        assert!(!is_due_soon(Some(at(2024, 6, 19, 0)), now, DUE_SOON_DAYS));
        assert!(!is_due_soon(None, now, DUE_SOON_DAYS));
    }

    #[test]
    fn bucket_by_month_filters_on_zero_indexed_month_and_year() {
        let dates = [
            Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()),
            Some(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()),
            Some(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap()),
            None,
        ];

        // June is month0 = 5
        let june = bucket_by_month(&dates, 5, 2024, |d| *d);
        assert_eq!(june.len(), 2);
    }

    #[test]
    fn month_names_and_labels() {
        assert_eq!(month_name(0), "January");
        assert_eq!(month_name(11), "December");
        assert_eq!(month_name(12), "");

        let m = MonthRef { month0: 5, year: 2024 };
        assert_eq!(m.label(), "Jun 2024");
    }

    #[test]
    fn last_n_months_walks_back_across_the_year_break() {
        let now = at(2024, 2, 10, 0); // February 2024
        let window = last_n_months(4, now);

        assert_eq!(
            window,
            vec![
                MonthRef { month0: 10, year: 2023 }, // November
                MonthRef { month0: 11, year: 2023 }, // December
                MonthRef { month0: 0, year: 2024 },  // January
                MonthRef { month0: 1, year: 2024 },  // February
            ]
        );
    }
}
