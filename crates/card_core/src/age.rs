//! Display age derived from the directory's loosely formatted birthday field.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

/// Source of "today" for age computation.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeOutcome {
    Years(i32),
    InvalidDate,
}

impl fmt::Display for AgeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgeOutcome::Years(years) => write!(f, "{years}"),
            AgeOutcome::InvalidDate => f.write_str("Invalid Date"),
        }
    }
}

/// Computes whole years between `birthday` (`DD-MM-YYYY[ time]`) and `today`.
pub fn compute_age(birthday: &str, today: NaiveDate) -> AgeOutcome {
    let Some(birth_date) = parse_birth_date(birthday) else {
        return AgeOutcome::InvalidDate;
    };

    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    AgeOutcome::Years(age)
}

fn parse_birth_date(birthday: &str) -> Option<NaiveDate> {
    // Anything after the first space is a time segment and is ignored.
    let date_segment = birthday.split(' ').next()?;
    let parts: Vec<&str> = date_segment.split('-').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    if day.len() != 2 || month.len() != 2 || year.len() != 4 {
        return None;
    }
    if ![day, month, year]
        .iter()
        .all(|part| part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}
