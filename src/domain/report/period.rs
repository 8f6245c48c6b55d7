use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Named reporting window, evaluated against a reference instant.
///
/// Windows are half-open `[start, end)` at midnight boundaries. `today` and
/// `this_week` extend to the end of the reference day; `this_month` covers
/// the whole calendar month, which filters identically for time-bounded
/// queries since future rows do not exist yet. Weeks start on Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Today,
        Period::Yesterday,
        Period::ThisWeek,
        Period::LastWeek,
        Period::ThisMonth,
        Period::LastMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::ThisWeek => "this_week",
            Period::LastWeek => "last_week",
            Period::ThisMonth => "this_month",
            Period::LastMonth => "last_month",
        }
    }

    pub fn from_name(name: &str) -> Option<Period> {
        Period::ALL.iter().find(|p| p.as_str() == name).copied()
    }

    pub fn window(&self, now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let today = now.date();
        let tomorrow = today + Duration::days(1);
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let (start, end) = match self {
            Period::Today => (today, tomorrow),
            Period::Yesterday => (today - Duration::days(1), today),
            Period::ThisWeek => (monday, tomorrow),
            Period::LastWeek => (monday - Duration::days(7), monday),
            Period::ThisMonth => (month_start(today), next_month_start(today)),
            Period::LastMonth => (prev_month_start(today), month_start(today)),
        };
        (start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn month_start(day: NaiveDate) -> NaiveDate {
    day.with_day(1).expect("day 1 exists in every month")
}

fn next_month_start(day: NaiveDate) -> NaiveDate {
    let first = if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)
    };
    first.expect("first of month is a valid date")
}

fn prev_month_start(day: NaiveDate) -> NaiveDate {
    let first = if day.month() == 1 {
        NaiveDate::from_ymd_opt(day.year() - 1, 12, 1)
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() - 1, 1)
    };
    first.expect("first of month is a valid date")
}
