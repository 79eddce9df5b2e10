use floradb::prelude::*;
use serde_json::{Value as Json, json};
use std::str::FromStr;

pub fn open_db() -> Db {
    floradb::open().expect("catalog must be valid")
}

pub fn caller(owner: &str) -> Caller {
    Caller::new(OwnerId::new(owner))
}

pub fn analysis(plant_name: &str, healthy: bool) -> Json {
    json!({
        "plant_name": plant_name,
        "healthy": healthy,
        "disease_detected": if healthy { Json::Null } else { json!("early blight") },
        "confidence": 0.87,
        "summary": format!("automated scan of {plant_name}"),
    })
}

pub fn id_of(view: &RecordView) -> Id {
    Id::from_str(
        view.get("id")
            .and_then(|v| v.as_str())
            .expect("every view carries a string id"),
    )
    .expect("view ids are valid ulids")
}
