use chrono::{DateTime, Utc};

/// Template id such as `tpl_20240601_1f3a9c2b`.
pub fn new_template_id(now: DateTime<Utc>) -> String {
    let date = now.format("%Y%m%d");
    format!("tpl_{date}_{}", short_id())
}

fn short_id() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    match id.split('-').next() {
        Some(part) if !part.is_empty() => part.to_string(),
        _ => id,
    }
}
