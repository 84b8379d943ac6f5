use rand::RngCore;
use serde_json::json;

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::GeneratorContext;
use crate::randomizer::{pick, random_id, random_int};

const SUBJECTS: &[&str] = &[
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "History",
    "Geography",
    "English",
    "Computer Science",
    "Art",
    "Music",
];
const TEACHERS: &[&str] = &[
    "Mr. Smith",
    "Mrs. Johnson",
    "Dr. Brown",
    "Ms. Davis",
    "Mr. Wilson",
    "Mrs. Taylor",
];
const ROOMS: &[&str] = &["101", "102", "201", "Lab A", "Lab B", "Auditorium", "Gym"];
const DAYS: &[&str] = &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub fn schedule(_ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    let start_hour = random_int(rng, 8, 15);

    record([
        ("id", json!(random_id(rng, EntityType::Schedules.id_prefix()))),
        ("subject", json!(pick(rng, SUBJECTS))),
        ("teacher", json!(pick(rng, TEACHERS))),
        ("room", json!(pick(rng, ROOMS))),
        ("day", json!(pick(rng, DAYS))),
        ("startTime", json!(format!("{start_hour}:00"))),
        ("endTime", json!(format!("{}:00", start_hour + 1))),
        ("studentsEnrolled", json!(random_int(rng, 10, 30))),
    ])
}
