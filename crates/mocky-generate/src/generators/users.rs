use rand::RngCore;
use serde_json::json;

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::{GeneratorContext, utc_date};
use crate::randomizer::{pick, random_bool, random_date, random_id, random_int};

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen",
];
pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];
pub const EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "example.com",
];
pub const CITIES: &[&str] = &[
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
pub const ROLES: &[&str] = &["Admin", "User", "Editor", "Viewer", "Moderator"];

pub fn user(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    let first_name = pick(rng, FIRST_NAMES);
    let last_name = pick(rng, LAST_NAMES);
    let email = format!(
        "{}.{}{}@{}",
        first_name.to_lowercase(),
        last_name.to_lowercase(),
        random_int(rng, 1, 999),
        pick(rng, EMAIL_DOMAINS)
    );
    let avatar = format!(
        "https://api.dicebear.com/7.x/avataaars/svg?seed={first_name}{last_name}"
    );

    record([
        ("id", json!(random_id(rng, EntityType::Users.id_prefix()))),
        ("firstName", json!(first_name)),
        ("lastName", json!(last_name)),
        ("email", json!(email)),
        ("role", json!(pick(rng, ROLES))),
        ("isActive", json!(random_bool(rng))),
        ("age", json!(random_int(rng, 18, 80))),
        ("city", json!(pick(rng, CITIES))),
        ("createdAt", json!(random_date(rng, utc_date(2020, 1, 1), ctx.now))),
        ("avatar", json!(avatar)),
    ])
}
