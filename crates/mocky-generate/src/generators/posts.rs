use rand::RngCore;
use serde_json::{Value, json};

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::{GeneratorContext, utc_date};
use crate::randomizer::{pick, random_date, random_id, random_int};

const TITLES: &[&str] = &[
    "The Future of Tech",
    "Why I Love Coding",
    "Top 10 Tips for React",
    "Understanding JavaScript Closures",
    "A Day in the Life",
    "Travel Diaries: Tokyo",
    "Healthy Eating Habits",
    "The Art of Minimalism",
    "How to Stay Productive",
    "Mastering CSS Grid",
    "The Rise of AI",
    "Web Design Trends 2024",
];
const BODIES: &[&str] = &[
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.",
    "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.",
    "Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur.",
    "Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.",
];
const TAGS: &[&str] = &[
    "tech",
    "lifestyle",
    "coding",
    "travel",
    "food",
    "design",
    "productivity",
    "health",
];

pub fn post(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    let tag_count = random_int(rng, 1, 3);
    let tags: Vec<Value> = (0..tag_count).map(|_| json!(pick(rng, TAGS))).collect();

    record([
        ("id", json!(random_id(rng, EntityType::Posts.id_prefix()))),
        ("title", json!(pick(rng, TITLES))),
        ("content", json!(pick(rng, BODIES))),
        ("published", json!(true)),
        ("likes", json!(random_int(rng, 0, 5000))),
        ("views", json!(random_int(rng, 100, 10000))),
        ("tags", Value::Array(tags)),
        ("createdAt", json!(random_date(rng, utc_date(2022, 1, 1), ctx.now))),
        ("authorId", json!(ctx.foreign.pick_fk(EntityType::Users, rng))),
    ])
}
