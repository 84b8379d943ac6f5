use rand::RngCore;
use serde_json::json;

use mocky_core::record::record;
use mocky_core::{EntityType, Record};

use super::{GeneratorContext, number};
use crate::randomizer::{pick, random_bool, random_float, random_id, random_int};

const ADJECTIVES: &[&str] = &[
    "Ergonomic",
    "Rustic",
    "Intelligent",
    "Gorgeous",
    "Incredible",
    "Fantastic",
    "Practical",
    "Sleek",
    "Awesome",
    "Generic",
    "Handcrafted",
    "Licensed",
    "Refined",
    "Unbranded",
    "Tasty",
];
const MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal", "Soft",
    "Fresh", "Frozen",
];
const PRODUCTS: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants", "Shirt",
    "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese", "Bacon",
];
pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Home",
    "Clothing",
    "Sports",
    "Food",
    "Beauty",
    "Automotive",
    "Books",
];

pub fn product(ctx: &GeneratorContext<'_>, rng: &mut dyn RngCore) -> Record {
    let name = format!(
        "{} {} {}",
        pick(rng, ADJECTIVES),
        pick(rng, MATERIALS),
        pick(rng, PRODUCTS)
    );
    let description = format!(
        "The {name} is perfect for your daily needs. It features high quality materials and a modern design."
    );

    record([
        ("id", json!(random_id(rng, EntityType::Products.id_prefix()))),
        ("name", json!(name)),
        ("price", number(random_float(rng, 10.0, 1000.0, 2))),
        ("category", json!(pick(rng, CATEGORIES))),
        ("inStock", json!(random_bool(rng))),
        ("stockCount", json!(random_int(rng, 0, 500))),
        ("rating", number(random_float(rng, 1.0, 5.0, 1))),
        ("reviewsCount", json!(random_int(rng, 0, 1000))),
        ("description", json!(description)),
        ("sellerId", json!(ctx.foreign.pick_fk(EntityType::Users, rng))),
    ])
}
