use rand::RngCore;
use serde_json::json;

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::{GeneratorContext, number, utc_date};
use crate::randomizer::{
    pick, random_bool, random_choice, random_date, random_float, random_id, random_int,
};

const NAMES: &[&str] = &[
    "Tech Solutions",
    "Global Innovations",
    "Digital Dynamics",
    "Smart Systems",
    "Future Corp",
    "Nexus Industries",
    "Prime Ventures",
    "Alpha Group",
    "Quantum Labs",
    "Apex Technologies",
];
const SUFFIXES: &[&str] = &[
    "Inc.",
    "LLC",
    "Corp.",
    "Ltd.",
    "Group",
    "Solutions",
    "Technologies",
    "Systems",
];
const INDUSTRIES: &[&str] = &[
    "Technology",
    "Finance",
    "Healthcare",
    "Education",
    "Retail",
    "Manufacturing",
    "Consulting",
    "Real Estate",
];
const EMPLOYEE_BANDS: &[i64] = &[10, 50, 100, 250, 500, 1000, 2500, 5000];
const HEADQUARTERS: &[&str] = &[
    "New York",
    "San Francisco",
    "London",
    "Tokyo",
    "Singapore",
    "Berlin",
];

pub fn company(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    let name = format!("{} {}", pick(rng, NAMES), pick(rng, SUFFIXES));
    let domain: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    let employees = random_choice(rng, EMPLOYEE_BANDS).copied().unwrap_or(10);

    record([
        ("id", json!(random_id(rng, EntityType::Companies.id_prefix()))),
        ("name", json!(name)),
        ("industry", json!(pick(rng, INDUSTRIES))),
        ("founded", json!(random_int(rng, 1990, 2024))),
        ("employees", json!(employees)),
        ("revenue", number(random_float(rng, 100_000.0, 50_000_000.0, 0))),
        ("isPublic", json!(random_bool(rng))),
        ("website", json!(format!("https://{domain}.com"))),
        ("headquarters", json!(pick(rng, HEADQUARTERS))),
        ("createdAt", json!(random_date(rng, utc_date(2020, 1, 1), ctx.now))),
    ])
}
