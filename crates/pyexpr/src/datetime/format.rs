use super::{date_to_ordinal, Date, DateError, TimeOfDay};
use std::fmt::Write;

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

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

/// Minimal C-locale `strftime`.
///
/// Supported: `%Y %m %d %H %M %S %y %f %j %w %a %A %b %B %I %p %%`. Any
/// other directive is rejected rather than passed through.
pub fn strftime(format: &str, date: &Date, time: &TimeOfDay) -> Result<String, DateError> {
    let mut out = String::with_capacity(format.len() + 8);
    let mut chars = format.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        let Some(directive) = chars.next() else {
            return Err(DateError::TrailingPercent);
        };
        write_directive(&mut out, directive, date, time)?;
    }
    Ok(out)
}

fn write_directive(
    out: &mut String,
    directive: char,
    date: &Date,
    time: &TimeOfDay,
) -> Result<(), DateError> {
    let weekday = date.weekday() as usize;
    let month_name = MONTH_NAMES[(date.month() - 1) as usize];
    // Writing into a String cannot fail.
    let _ = match directive {
        'Y' => write!(out, "{:04}", date.year()),
        'y' => write!(out, "{:02}", date.year() % 100),
        'm' => write!(out, "{:02}", date.month()),
        'd' => write!(out, "{:02}", date.day()),
        'H' => write!(out, "{:02}", time.hour()),
        'I' => write!(out, "{:02}", twelve_hour(time.hour())),
        'M' => write!(out, "{:02}", time.minute()),
        'S' => write!(out, "{:02}", time.second()),
        'f' => write!(out, "{:06}", time.microsecond()),
        'p' => out.write_str(if time.hour() < 12 { "AM" } else { "PM" }),
        'j' => write!(out, "{:03}", day_of_year(date)),
        'w' => write!(out, "{}", (weekday + 1) % 7),
        'a' => out.write_str(&WEEKDAY_NAMES[weekday][..3]),
        'A' => out.write_str(WEEKDAY_NAMES[weekday]),
        'b' => out.write_str(&month_name[..3]),
        'B' => out.write_str(month_name),
        '%' => out.write_str("%"),
        other => return Err(DateError::UnknownDirective(other)),
    };
    Ok(())
}

fn twelve_hour(hour: i64) -> i64 {
    match hour % 12 {
        0 => 12,
        other => other,
    }
}

fn day_of_year(date: &Date) -> i64 {
    date.to_ordinal() - date_to_ordinal(date.year(), 1, 1) + 1
}

#[cfg(test)]
#[path = "format_test.rs"]
mod tests;
