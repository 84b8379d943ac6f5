use chrono::{Datelike, Duration};
use rand::RngCore;
use serde_json::json;

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::{GeneratorContext, utc_date};
use crate::randomizer::{
    format_timestamp, pick, random_bool, random_date, random_id, random_instant, random_int,
};

const NAMES: &[&str] = &[
    "Tech Conference",
    "Product Launch",
    "Team Meeting",
    "Workshop",
    "Webinar",
    "Networking Event",
    "Training Session",
    "Annual Summit",
];
const LOCATIONS: &[&str] = &[
    "Conference Hall A",
    "Virtual",
    "Main Auditorium",
    "Meeting Room 1",
    "Online Platform",
    "Convention Center",
];
const CATEGORIES: &[&str] = &[
    "Technology",
    "Business",
    "Education",
    "Entertainment",
    "Sports",
    "Health",
];
const ORGANIZER_FIRST: &[&str] = &["John", "Jane", "Mike", "Sarah"];
const ORGANIZER_LAST: &[&str] = &["Smith", "Johnson", "Williams"];

pub fn event(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    // Upcoming window: from now until the last day of next year.
    let horizon = utc_date(ctx.now.year() + 1, 12, 31);
    let start = random_instant(rng, ctx.now, horizon);
    let end = start + Duration::hours(random_int(rng, 1, 8));
    let price = if random_int(rng, 0, 1) == 0 {
        0
    } else {
        random_int(rng, 10, 500)
    };
    let organizer = format!(
        "{} {}",
        pick(rng, ORGANIZER_FIRST),
        pick(rng, ORGANIZER_LAST)
    );

    record([
        ("id", json!(random_id(rng, EntityType::Events.id_prefix()))),
        ("name", json!(pick(rng, NAMES))),
        (
            "description",
            json!(format!(
                "Join us for an amazing {}",
                pick(rng, NAMES).to_lowercase()
            )),
        ),
        ("category", json!(pick(rng, CATEGORIES))),
        ("location", json!(pick(rng, LOCATIONS))),
        ("startDate", json!(format_timestamp(start))),
        ("endDate", json!(format_timestamp(end))),
        ("capacity", json!(random_int(rng, 10, 500))),
        ("attendees", json!(random_int(rng, 0, 500))),
        ("price", json!(price)),
        ("isVirtual", json!(random_bool(rng))),
        ("organizer", json!(organizer)),
        (
            "createdAt",
            json!(random_date(rng, utc_date(ctx.now.year(), 1, 1), ctx.now)),
        ),
    ])
}
