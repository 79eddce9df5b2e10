//! Fan-out persistence: a plant analysis commits first, then each dependent
//! observation commits independently, with failures reported rather than
//! rolled back.

mod common;

use common::{analysis, caller, id_of, open_db};
use floradb::prelude::*;
use serde_json::json;

#[test]
fn full_fanout_commits_parent_and_all_dependents() {
    let db = open_db();
    let session = db.session(caller("alice"));

    let outcome = session
        .create_with_dependents(
            "plant_analyses",
            &analysis("Cherry Tomato", false),
            &[
                (
                    "environmental_data",
                    json!({ "temperature": 24.5, "humidity": 61.0, "soil_ph": 6.4 }),
                ),
                (
                    "pest_findings",
                    json!({ "pest_name": "aphids", "severity": "moderate" }),
                ),
                (
                    "treatment_recommendations",
                    json!({ "treatment": "neem oil spray", "priority": 1 }),
                ),
            ],
        )
        .unwrap();

    assert_eq!(outcome.dependents.len(), 3);
    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.parent.get("pest_finding_count"), Some(&json!(1)));
    assert_eq!(outcome.parent.get("deficiency_count"), Some(&json!(0)));

    // Every dependent links back to the parent.
    let parent_id = outcome.parent.get("id").cloned().unwrap();
    for dependent in &outcome.dependents {
        assert_eq!(dependent.get("analysis_id"), Some(&parent_id));
    }
}

#[test]
fn invalid_dependent_fails_alone_and_parent_persists() {
    let db = open_db();
    let session = db.session(caller("alice"));

    let outcome = session
        .create_with_dependents(
            "plant_analyses",
            &analysis("Roma tomato", false),
            &[
                // temperature is required.
                ("environmental_data", json!({ "humidity": 70.0 })),
                (
                    "pest_findings",
                    json!({ "pest_name": "whiteflies", "severity": "high" }),
                ),
            ],
        )
        .unwrap();

    assert_eq!(outcome.dependents.len(), 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].entity, "environmental_data");
    assert!(outcome.failures[0].error.is_validation());

    // The parent is queryable and its counts reflect only committed rows.
    let parent_id = id_of(&outcome.parent);
    let view = session.get_one("plant_analyses", parent_id).unwrap();
    assert_eq!(view.get("pest_finding_count"), Some(&json!(1)));

    // The failed dependent left nothing behind.
    let env = session
        .get_many(
            "environmental_data",
            &QueryRequest::new().with_filter("analysis_id", &parent_id.to_string()),
        )
        .unwrap();
    assert_eq!(env.total, 0);
}

#[test]
fn dependents_are_queryable_through_their_link_field() {
    let db = open_db();
    let session = db.session(caller("alice"));

    let first = session
        .create_with_dependents(
            "plant_analyses",
            &analysis("basil", true),
            &[("pest_findings", json!({ "pest_name": "spider mites" }))],
        )
        .unwrap();
    session
        .create_with_dependents(
            "plant_analyses",
            &analysis("mint", true),
            &[("pest_findings", json!({ "pest_name": "thrips" }))],
        )
        .unwrap();

    let page = session
        .get_many(
            "pest_findings",
            &QueryRequest::new().with_filter("analysis_id", &id_of(&first.parent).to_string()),
        )
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].get("pest_name"), Some(&json!("spider mites")));
}

#[test]
fn dependent_cannot_be_created_standalone() {
    let db = open_db();
    let session = db.session(caller("alice"));

    let err = session
        .create("pest_findings", &json!({ "pest_name": "slugs" }))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn dependent_rows_can_still_be_corrected_by_their_owner() {
    let db = open_db();
    let session = db.session(caller("alice"));

    let outcome = session
        .create_with_dependents(
            "plant_analyses",
            &analysis("fig", true),
            &[("pest_findings", json!({ "pest_name": "scale insects" }))],
        )
        .unwrap();
    let finding_id = id_of(&outcome.dependents[0]);

    let view = session
        .update("pest_findings", finding_id, &json!({ "severity": "low" }))
        .unwrap();
    assert_eq!(view.get("severity"), Some(&json!("low")));

    // The parent link itself stays read-only.
    let err = session
        .update(
            "pest_findings",
            finding_id,
            &json!({ "analysis_id": Id::generate().to_string() }),
        )
        .unwrap_err();
    assert!(err.is_validation());
}
