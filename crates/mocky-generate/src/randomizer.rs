//! Scalar primitives drawn from an injected random source.
//!
//! Every function takes the generator as `&mut dyn RngCore`, so callers
//! decide between a seeded [`rand_chacha::ChaCha8Rng`] and OS entropy.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::{Rng, RngCore};

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Uniform integer in `[min, max]`; bounds may be given in either order.
pub fn random_int(rng: &mut dyn RngCore, min: i64, max: i64) -> i64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rng.random_range(low..=high)
}

/// Uniform float in `[min, max)` rounded to `decimals` fractional digits.
pub fn random_float(rng: &mut dyn RngCore, min: f64, max: f64, decimals: u32) -> f64 {
    let raw = min + rng.random::<f64>() * (max - min);
    round_to(raw, decimals)
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Uniform pick; `None` only when `items` is empty.
pub fn random_choice<'a, T>(rng: &mut dyn RngCore, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..items.len());
    items.get(idx)
}

/// Pick from a closed vocabulary and return an owned string.
pub fn pick(rng: &mut dyn RngCore, values: &[&str]) -> String {
    random_choice(rng, values)
        .map(|value| value.to_string())
        .unwrap_or_default()
}

pub fn random_bool(rng: &mut dyn RngCore) -> bool {
    rng.random_bool(0.5)
}

/// Uniform instant between `start` and `end` (millisecond resolution).
///
/// When `end` precedes `start` the result lies in `[end, start]`.
pub fn random_instant(
    rng: &mut dyn RngCore,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> DateTime<Utc> {
    let span_ms = (end - start).num_milliseconds();
    let offset = (rng.random::<f64>() * span_ms as f64) as i64;
    start + Duration::milliseconds(offset)
}

/// Uniform timestamp between two instants, as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn random_date(rng: &mut dyn RngCore, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format_timestamp(random_instant(rng, start, end))
}

pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `"{prefix}_{9 base36 chars}"`.
pub fn random_id(rng: &mut dyn RngCore, prefix: &str) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("{prefix}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn int_bounds_are_inclusive() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let value = random_int(&mut rng, 1, 3);
            assert!((1..=3).contains(&value));
            seen_min |= value == 1;
            seen_max |= value == 3;
        }
        assert!(seen_min && seen_max);
    }

    #[test]
    fn float_is_rounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let value = random_float(&mut rng, 1.0, 5.0, 1);
            assert!((1.0..=5.0).contains(&value));
            assert_eq!(round_to(value, 1), value);
        }
    }

    #[test]
    fn ids_carry_prefix_and_base36_suffix() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let id = random_id(&mut rng, "usr");
        let suffix = id.strip_prefix("usr_").expect("prefix");
        assert_eq!(suffix.len(), 9);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn choice_on_empty_is_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let empty: [u8; 0] = [];
        assert!(random_choice(&mut rng, &empty).is_none());
    }

    #[test]
    fn dates_stay_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single().expect("start");
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("end");
        for _ in 0..100 {
            let instant = random_instant(&mut rng, start, end);
            assert!(instant >= start && instant <= end);
        }
        let text = random_date(&mut rng, start, end);
        assert!(text.starts_with("2023-"));
        assert!(text.ends_with('Z'));
        assert_eq!(text.len(), "2023-01-01T00:00:00.000Z".len());
    }
}
