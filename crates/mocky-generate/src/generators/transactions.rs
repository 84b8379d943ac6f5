use rand::RngCore;
use serde_json::json;

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::{GeneratorContext, number, utc_date};
use crate::randomizer::{pick, random_date, random_float, random_id};

const TYPES: &[&str] = &["purchase", "refund", "transfer", "deposit", "withdrawal"];
const STATUSES: &[&str] = &["completed", "pending", "failed", "cancelled"];
const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "JPY", "AUD"];
const PAYMENT_METHODS: &[&str] = &[
    "credit_card",
    "debit_card",
    "paypal",
    "bank_transfer",
    "crypto",
];

pub fn transaction(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    let since = utc_date(2023, 1, 1);

    record([
        ("id", json!(random_id(rng, EntityType::Transactions.id_prefix()))),
        ("type", json!(pick(rng, TYPES))),
        ("amount", number(random_float(rng, 10.0, 10000.0, 2))),
        ("currency", json!(pick(rng, CURRENCIES))),
        ("status", json!(pick(rng, STATUSES))),
        ("paymentMethod", json!(pick(rng, PAYMENT_METHODS))),
        (
            "description",
            json!(format!("{} transaction", pick(rng, TYPES))),
        ),
        ("userId", json!(ctx.foreign.pick_fk(EntityType::Users, rng))),
        ("createdAt", json!(random_date(rng, since, ctx.now))),
        ("processedAt", json!(random_date(rng, since, ctx.now))),
    ])
}
