//! Expiration time parsing
//!
//! Accepts RFC 3339 timestamps (`2030-01-01T00:00:00Z`) or relative
//! durations such as `30m`, `1d`, `2w`, `1d2h30m`.

use chrono::{DateTime, Duration, Utc};

/// Parse an expiration string relative to `now`.
pub fn parse_expire_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("过期时间不能为空".to_string());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let duration = parse_relative(input)?;
    now.checked_add_signed(duration)
        .ok_or_else(|| "计算的过期时间超出了有效范围".to_string())
}

fn parse_relative(input: &str) -> Result<Duration, String> {
    let mut total = Duration::zero();
    let mut remaining = input;

    while !remaining.is_empty() {
        let digits = remaining
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(remaining.len());
        if digits == 0 {
            return Err(format!("无效的时间格式: '{}'", input));
        }
        let num: i64 = remaining[..digits]
            .parse()
            .map_err(|_| format!("无效的数字: '{}'", &remaining[..digits]))?;
        remaining = &remaining[digits..];

        let unit_len = remaining
            .find(|c: char| !c.is_alphabetic())
            .unwrap_or(remaining.len());
        if unit_len == 0 {
            return Err(format!("缺少时间单位，数字 '{}' 后应跟时间单位", num));
        }
        let unit = &remaining[..unit_len];
        remaining = &remaining[unit_len..];

        // "M" 表示月，其余单位大小写不敏感
        let step = match unit {
            "M" => num.checked_mul(30).and_then(Duration::try_days),
            _ => match unit.to_lowercase().as_str() {
                "s" | "sec" | "second" | "seconds" => Duration::try_seconds(num),
                "m" | "min" | "minute" | "minutes" => Duration::try_minutes(num),
                "h" | "hour" | "hours" => Duration::try_hours(num),
                "d" | "day" | "days" => Duration::try_days(num),
                "w" | "week" | "weeks" => Duration::try_weeks(num),
                "month" | "months" => num.checked_mul(30).and_then(Duration::try_days),
                "y" | "year" | "years" => num.checked_mul(365).and_then(Duration::try_days),
                _ => return Err(format!("不支持的时间单位: '{}'", unit)),
            },
        }
        .ok_or_else(|| format!("时间间隔过大: '{}'", input))?;

        total = total
            .checked_add(&step)
            .ok_or_else(|| format!("时间间隔过大: '{}'", input))?;
    }

    if total == Duration::zero() {
        return Err("时间间隔不能为零".to_string());
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative_time() {
        let now = Utc::now();

        assert_eq!(parse_expire_time("1d", now).unwrap(), now + Duration::days(1));
        assert_eq!(parse_expire_time("2w", now).unwrap(), now + Duration::weeks(2));
        assert_eq!(parse_expire_time("30m", now).unwrap(), now + Duration::minutes(30));
        assert_eq!(parse_expire_time("2M", now).unwrap(), now + Duration::days(60));
        assert_eq!(
            parse_expire_time("1d2h30m", now).unwrap(),
            now + Duration::days(1) + Duration::hours(2) + Duration::minutes(30)
        );
    }

    #[test]
    fn test_parse_rfc3339() {
        let result = parse_expire_time("2023-10-01T12:00:00Z", Utc::now()).unwrap();
        assert_eq!(result.to_rfc3339(), "2023-10-01T12:00:00+00:00");
    }

    #[test]
    fn test_invalid_format() {
        let now = Utc::now();
        assert!(parse_expire_time("", now).is_err());
        assert!(parse_expire_time("invalid", now).is_err());
        assert!(parse_expire_time("1x", now).is_err());
        assert!(parse_expire_time("10", now).is_err());
        assert!(parse_expire_time("0d", now).is_err());
        assert!(parse_expire_time("2021-01-01", now).is_err());
    }

    #[test]
    fn test_oversized_interval_is_rejected() {
        let now = Utc::now();
        assert!(parse_expire_time("999999999999999999M", now).is_err());
        assert!(parse_expire_time("999999999999999999y", now).is_err());
        assert!(parse_expire_time("100000000000d100000000000d", now).is_err());
    }
}
