/// Render a duration in milliseconds as `H:MM:SS`.
///
/// Missing, zero and NaN durations render as an empty string. Seconds keep
/// any fractional part left over from the millisecond division, so `1500`
/// becomes `0:00:01.5`.
pub fn hhmmss(value: Option<f64>) -> String {
    let Some(ms) = value.filter(|v| *v != 0.0 && !v.is_nan()) else {
        return String::new();
    };

    let total = ms / 1000.0;
    let hours = (total / 3600.0).floor();
    let rest = total % 3600.0;
    let minutes = (rest / 60.0).floor();
    let seconds = rest % 60.0;

    format!("{}:{}:{}", hours + 0.0, pad(minutes), pad(seconds))
}

fn pad(v: f64) -> String {
    // -0.0 would print as "-0"
    let v = v + 0.0;
    if v < 10.0 {
        format!("0{}", v)
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_for_missing_or_zero() {
        assert_eq!(hhmmss(None), "");
        assert_eq!(hhmmss(Some(0.0)), "");
        assert_eq!(hhmmss(Some(f64::NAN)), "");
    }

    #[test]
    fn whole_seconds() {
        assert_eq!(hhmmss(Some(3_661_000.0)), "1:01:01");
        assert_eq!(hhmmss(Some(7_384_000.0)), "2:03:04");
        assert_eq!(hhmmss(Some(59_000.0)), "0:00:59");
        assert_eq!(hhmmss(Some(600_000.0)), "0:10:00");
    }

    #[test]
    fn long_durations_grow_the_hour_field() {
        assert_eq!(hhmmss(Some(360_000_000.0)), "100:00:00");
    }

    #[test]
    fn negative_whole_hours_have_no_signed_zeros() {
        assert_eq!(hhmmss(Some(-3_600_000.0)), "-1:00:00");
        assert_eq!(hhmmss(Some(-7_200_000.0)), "-2:00:00");
    }

    #[test]
    fn fractional_seconds_are_kept() {
        assert_eq!(hhmmss(Some(1_500.0)), "0:00:01.5");
        assert_eq!(hhmmss(Some(62_250.0)), "0:01:02.25");
    }
}
