//! ## Packed dates
//!
//! A date word is `age<<14 | month<<10 | day<<5 | year_low`, with the year being
//! `1972 + year_low + 32*age`.  The two bit age field covers 1972 through 2099.
//! A zero word means there is no date.

use chrono::Datelike;
use regex::Regex;
use log::{debug,error};
use super::types::Error;
use crate::DYNERR;

pub const BASE_YEAR: i32 = 1972;
pub const MAX_YEAR: i32 = 2099;
const MONTHS: [&str;12] = ["Jan","Feb","Mar","Apr","May","Jun","Jul","Aug","Sep","Oct","Nov","Dec"];
const BLANK: &str = "         ";

/// Pack a date, returns 0 (no date) if anything is out of range
pub fn pack(year: i32,month: u32,day: u32) -> u16 {
    if year < BASE_YEAR || year > MAX_YEAR || month < 1 || month > 12 || day < 1 || day > 31 {
        debug!("date {}-{}-{} cannot be packed",year,month,day);
        return 0;
    }
    let age = std::cmp::min(3,(year - BASE_YEAR)/32);
    let year_low = std::cmp::max(0,year - BASE_YEAR - 32*age);
    ((age as u16) << 14) | ((month as u16 & 0x0f) << 10) | ((day as u16 & 0x1f) << 5) | (year_low as u16 & 0x1f)
}

/// Pack a calendar date, or today's date if `time` is `None`
pub fn pack_date(time: Option<chrono::NaiveDate>) -> u16 {
    let now = match time {
        Some(t) => t,
        None => chrono::Local::now().date_naive()
    };
    pack(now.year(),now.month(),now.day())
}

/// Unpack the raw fields as (year,month,day), no calendar check is made
pub fn unpack(word: u16) -> Option<(i32,u32,u32)> {
    if word==0 {
        return None;
    }
    let age = (word >> 14) as i32;
    let month = ((word >> 10) & 0x0f) as u32;
    let day = ((word >> 5) & 0x1f) as u32;
    let year = BASE_YEAR + (word & 0x1f) as i32 + 32*age;
    if month < 1 || month > 12 || day < 1 {
        return None;
    }
    Some((year,month,day))
}

/// Unpack to a calendar date, fails for dates the calendar does not have (e.g. 31-Feb)
pub fn unpack_date(word: u16) -> Option<chrono::NaiveDate> {
    let (y,m,d) = unpack(word)?;
    chrono::NaiveDate::from_ymd_opt(y,m,d)
}

/// Format as `dd-Mon-yy`, or blanks of the same width if there is no valid date
pub fn display(word: u16) -> String {
    match unpack(word) {
        Some((y,m,d)) => format!("{:02}-{}-{:02}",d,MONTHS[m as usize - 1],y%100),
        None => BLANK.to_string()
    }
}

/// Parse `dd-MMM-yy`, month is case insensitive, years 72-99 are 19xx, others 20xx
pub fn parse(s: &str) -> Result<u16,DYNERR> {
    let patt = Regex::new(r"^(\d{2})-([A-Za-z]{3})-(\d{2})$")?;
    let caps = match patt.captures(s.trim()) {
        Some(c) => c,
        None => {
            error!("date `{}` is not of the form dd-MMM-yy",s);
            return Err(Box::new(Error::InvalidDate));
        }
    };
    let day = u32::from_str_radix(&caps[1],10)?;
    let mon = caps[2].to_lowercase();
    let month = match MONTHS.iter().position(|m| m.to_lowercase()==mon) {
        Some(i) => i as u32 + 1,
        None => {
            error!("unknown month `{}`",&caps[2]);
            return Err(Box::new(Error::InvalidDate));
        }
    };
    let yy = i32::from_str_radix(&caps[3],10)?;
    let year = match yy {
        72..=99 => 1900 + yy,
        _ => 2000 + yy
    };
    match pack(year,month,day) {
        0 => {
            error!("date `{}` is out of range",s);
            Err(Box::new(Error::InvalidDate))
        },
        w => Ok(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing() {
        assert_eq!(pack(1972,1,1),(1 << 10) | (1 << 5));
        assert_eq!(pack(1997,1,15),(1 << 10) | (15 << 5) | 25);
        // second age window
        assert_eq!(pack(2004,3,9),(1 << 14) | (3 << 10) | (9 << 5));
        assert_eq!(pack(2099,12,31) >> 14,3);
        assert_eq!(pack(1971,1,1),0);
        assert_eq!(pack(2100,1,1),0);
        assert_eq!(pack(2000,13,1),0);
        assert_eq!(pack(2000,1,0),0);
    }

    #[test]
    fn day_bits_survive() {
        for day in 1..=31 {
            assert_eq!(unpack(pack(1985,6,day)),Some((1985,6,day)));
        }
    }

    #[test]
    fn every_year() {
        for year in BASE_YEAR..=MAX_YEAR {
            assert_eq!(unpack(pack(year,7,4)),Some((year,7,4)));
        }
    }

    #[test]
    fn display_words() {
        assert_eq!(display(pack(1997,1,15)),"15-Jan-97");
        assert_eq!(display(pack(2024,11,3)),"03-Nov-24");
        assert_eq!(display(0),BLANK);
        // month 0 is not a date
        assert_eq!(display(15 << 5),BLANK);
    }

    #[test]
    fn parsing() {
        assert_eq!(parse("15-jan-97").expect("parse failed"),pack(1997,1,15));
        assert_eq!(parse("01-DEC-05").expect("parse failed"),pack(2005,12,1));
        assert!(parse("1-Jan-97").is_err());
        assert!(parse("15-Foo-97").is_err());
        assert!(parse("15/Jan/97").is_err());
        assert!(parse("32-Jan-97").is_err());
        match parse("00-Jan-97") {
            Err(e) => assert_eq!(e.to_string(),"invalid date"),
            Ok(_) => panic!("day zero accepted")
        }
    }

    #[test]
    fn calendar() {
        assert_eq!(unpack_date(pack(1999,2,28)),chrono::NaiveDate::from_ymd_opt(1999,2,28));
        assert_eq!(unpack_date(pack(1999,2,31)),None);
    }
}
