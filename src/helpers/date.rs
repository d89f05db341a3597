//! Date helper functions

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Persian month names, Farvardin first
const JALALI_MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

/// A date in the Persian solar calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    /// Convert a Gregorian date. `None` for years before 1 CE.
    pub fn from_gregorian(date: NaiveDate) -> Option<Self> {
        const MONTH_OFFSETS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

        if date.year() < 1 {
            return None;
        }

        let (gy, gm, gd) = (date.year() as i64, date.month() as usize, date.day() as i64);
        let gy2 = if gm > 2 { gy + 1 } else { gy };
        let mut days = 355666 + 365 * gy + (gy2 + 3) / 4 - (gy2 + 99) / 100 + (gy2 + 399) / 400
            + gd
            + MONTH_OFFSETS[gm - 1];

        let mut year = -1595 + 33 * (days / 12053);
        days %= 12053;
        year += 4 * (days / 1461);
        days %= 1461;
        if days > 365 {
            year += (days - 1) / 365;
            days = (days - 1) % 365;
        }

        let (month, day) = if days < 186 {
            (1 + days / 31, 1 + days % 31)
        } else {
            (7 + (days - 186) / 30, 1 + (days - 186) % 30)
        };

        Some(Self {
            year: year as i32,
            month: month as u32,
            day: day as u32,
        })
    }

    /// Persian name of the month
    pub fn month_name(&self) -> &'static str {
        JALALI_MONTHS[(self.month - 1) as usize]
    }
}

/// Parse a Gregorian date or date-time string as written in front-matter or
/// produced by serializing a parsed date
pub fn parse_gregorian(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Format a Gregorian date string as a Jalali date ("1 فروردین 1403").
///
/// Anything that cannot be parsed is returned unchanged.
pub fn to_jalali(gregorian: &str) -> String {
    match parse_gregorian(gregorian).and_then(JalaliDate::from_gregorian) {
        Some(jalali) => format!("{} {} {}", jalali.day, jalali.month_name(), jalali.year),
        None => gregorian.to_string(),
    }
}
