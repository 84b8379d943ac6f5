//! Table-driven generators, one per dataset type.

use chrono::{DateTime, NaiveDate, Utc};
use rand::RngCore;
use serde_json::{Number, Value};

use mocky_core::{Dataset, EntityType, Record};

use crate::foreign::ForeignContext;

pub mod addresses;
pub mod comments;
pub mod companies;
pub mod custom;
pub mod events;
pub mod posts;
pub mod products;
pub mod schedules;
pub mod transactions;
pub mod users;

/// Inputs shared by every generator call.
pub struct GeneratorContext<'a> {
    /// Reference instant for "until now" date ranges.
    pub now: DateTime<Utc>,
    /// Foreign-key pools; empty pools make generators synthesize ids.
    pub foreign: &'a dyn ForeignContext,
    /// JSON text for the `custom` dataset type.
    pub custom_template: &'a str,
}

type RecordBuilder = fn(&GeneratorContext<'_>, &mut dyn RngCore) -> Record;

/// Generate `count` records of `entity`.
pub fn generate_dataset(
    entity: EntityType,
    count: usize,
    ctx: &GeneratorContext<'_>,
    rng: &mut dyn RngCore,
) -> Dataset {
    let build: RecordBuilder = match entity {
        EntityType::Users => users::user,
        EntityType::Products => products::product,
        EntityType::Posts => posts::post,
        EntityType::Comments => comments::comment,
        EntityType::Companies => companies::company,
        EntityType::Addresses => addresses::address,
        EntityType::Transactions => transactions::transaction,
        EntityType::Events => events::event,
        EntityType::Schedules => schedules::schedule,
        EntityType::Custom => return custom::generate(count, ctx.custom_template, rng),
    };

    (0..count).map(|_| build(ctx, rng)).collect()
}

/// JSON number; integral values are stored as integers.
pub(crate) fn number(value: f64) -> Value {
    const MAX_SAFE: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE {
        return Value::from(value as i64);
    }
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Midnight UTC of a calendar date.
pub(crate) fn utc_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_become_integers() {
        assert_eq!(number(42.0), Value::from(42));
        assert!(number(4.25).is_f64());
        assert_eq!(number(f64::NAN), Value::Null);
    }
}
