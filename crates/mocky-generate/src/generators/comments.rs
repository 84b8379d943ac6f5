use rand::RngCore;
use serde_json::json;

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::{GeneratorContext, utc_date};
use crate::randomizer::{pick, random_date, random_id};

const TEXTS: &[&str] = &[
    "Great post!",
    "Thanks for sharing.",
    "I totally agree.",
    "Interesting perspective.",
    "Could you elaborate on that?",
    "This was very helpful.",
    "Awesome content!",
    "Keep it up!",
    "I learned something new today.",
    "Wow, amazing!",
];

pub fn comment(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    record([
        ("id", json!(random_id(rng, EntityType::Comments.id_prefix()))),
        ("text", json!(pick(rng, TEXTS))),
        ("createdAt", json!(random_date(rng, utc_date(2023, 1, 1), ctx.now))),
        ("postId", json!(ctx.foreign.pick_fk(EntityType::Posts, rng))),
        ("userId", json!(ctx.foreign.pick_fk(EntityType::Users, rng))),
    ])
}
