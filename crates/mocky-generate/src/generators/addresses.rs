use rand::{Rng, RngCore};
use serde_json::json;

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::{GeneratorContext, number};
use crate::randomizer::{pick, random_id, random_int};

const STREETS: &[&str] = &[
    "Main St",
    "Oak Ave",
    "Maple Dr",
    "Park Ln",
    "Washington Blvd",
    "Broadway",
    "Market St",
    "Church Rd",
];
const CITIES: &[&str] = &[
    "New York",
    "Los Angeles",
    "Chicago",
    "Houston",
    "Phoenix",
    "Philadelphia",
    "San Antonio",
    "San Diego",
    "Dallas",
    "San Jose",
];
const STATES: &[&str] = &["NY", "CA", "IL", "TX", "AZ", "PA", "FL", "OH", "NC", "MI"];
const COUNTRIES: &[&str] = &[
    "USA",
    "Canada",
    "UK",
    "Germany",
    "France",
    "Japan",
    "Australia",
];

pub fn address(_ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    let street_number = random_int(rng, 1, 9999);
    let street = pick(rng, STREETS);
    let city = pick(rng, CITIES);
    let state = pick(rng, STATES);
    let zip_code = random_int(rng, 10000, 99999);
    let country = pick(rng, COUNTRIES);
    // Integer degree plus a fractional jitter in [0, 1).
    let latitude = random_int(rng, -90, 90) as f64 + rng.random::<f64>();
    let longitude = random_int(rng, -180, 180) as f64 + rng.random::<f64>();

    record([
        ("id", json!(random_id(rng, EntityType::Addresses.id_prefix()))),
        ("street", json!(format!("{street_number} {street}"))),
        ("city", json!(city)),
        ("state", json!(state)),
        ("zipCode", json!(zip_code.to_string())),
        ("country", json!(country)),
        (
            "fullAddress",
            json!(format!(
                "{street_number} {street}, {city}, {state} {zip_code}"
            )),
        ),
        ("latitude", number(latitude)),
        ("longitude", number(longitude)),
    ])
}
