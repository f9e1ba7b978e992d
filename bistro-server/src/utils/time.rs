//! 时间工具函数
//!
//! 全系统的时间戳统一为 Unix epoch 毫秒 (`i64`)；日历相关的聚合
//! (今日营收、近 7 日历史) 使用本地时区的自然日比较。

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike};

/// 当前时间, Unix epoch 毫秒
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 毫秒时间戳 → 本地时间
pub fn to_local(millis: i64) -> DateTime<Local> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(|| Local.timestamp_millis_opt(0).single().unwrap())
}

/// 毫秒时间戳的本地自然日
pub fn local_date(millis: i64) -> NaiveDate {
    to_local(millis).date_naive()
}

/// 两个毫秒时间戳是否落在同一个本地自然日
pub fn same_local_day(a: i64, b: i64) -> bool {
    local_date(a) == local_date(b)
}

/// 毫秒时间戳的本地小时 (0..=23)
pub fn local_hour(millis: i64) -> u32 {
    to_local(millis).hour()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_day_within_one_millisecond() {
        let now = now_millis();
        assert!(same_local_day(now, now + 1));
    }

    #[test]
    fn hour_is_in_range() {
        assert!(local_hour(now_millis()) < 24);
    }
}
