pub mod block;
pub mod config;
pub mod export;
pub mod plan;
pub mod skill;

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
