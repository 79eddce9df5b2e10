//!
//! Module: catalog
//! Responsibility: static entity models for the plant advisory domain.
//!
//! Reserved columns (`id`, `owner_id`, `created_at`) are engine-owned and
//! never declared here. A plant analysis fans out to four dependent
//! observation entities, each linked back through `analysis_id`.
//!

use floradb_core::model::{DependentRef, DerivedColumn, EntityModel, FieldModel};
use floradb_core::schema::{SchemaError, SchemaRegistry};

static AGENT_FIELDS: [FieldModel; 5] = [
    FieldModel::text("name").required().searchable().sortable(),
    FieldModel::text("email").searchable(),
    FieldModel::text("region").filterable().sortable(),
    FieldModel::text("specialty").searchable().filterable(),
    FieldModel::boolean("active").filterable(),
];

/// Field advisors available to growers.
pub static AGENTS: EntityModel = EntityModel::new("agents", "agent", &AGENT_FIELDS);

static MEETING_FIELDS: [FieldModel; 5] = [
    FieldModel::text("title").required().searchable().sortable(),
    FieldModel::text("location").searchable(),
    FieldModel::text("notes").searchable(),
    FieldModel::timestamp("scheduled_at").filterable().sortable(),
    FieldModel::boolean("completed").filterable(),
];

/// Grower/advisor consultations.
pub static MEETINGS: EntityModel = EntityModel::new("meetings", "meeting", &MEETING_FIELDS);

static ANALYSIS_FIELDS: [FieldModel; 6] = [
    FieldModel::text("plant_name").required().searchable().sortable(),
    FieldModel::text("disease_detected").searchable().filterable(),
    FieldModel::boolean("healthy").filterable(),
    FieldModel::float("confidence").sortable(),
    FieldModel::text("summary").searchable(),
    FieldModel::text("image_url"),
];
static ANALYSIS_DEPENDENTS: [DependentRef; 4] = [
    DependentRef::new("environmental_data"),
    DependentRef::new("pest_findings"),
    DependentRef::new("nutrient_deficiencies"),
    DependentRef::new("treatment_recommendations"),
];
static ANALYSIS_DERIVED: [DerivedColumn; 2] = [
    DerivedColumn::dependent_count("pest_finding_count", "pest_findings"),
    DerivedColumn::dependent_count("deficiency_count", "nutrient_deficiencies"),
];

/// One diagnosed plant photo with its observation fan-out.
pub static PLANT_ANALYSES: EntityModel =
    EntityModel::new("plant_analyses", "plant_analysis", &ANALYSIS_FIELDS)
        .with_dependents(&ANALYSIS_DEPENDENTS)
        .with_derived(&ANALYSIS_DERIVED);

static ENVIRONMENTAL_FIELDS: [FieldModel; 5] = [
    FieldModel::id_ref("analysis_id").filterable(),
    FieldModel::float("temperature").required(),
    FieldModel::float("humidity"),
    FieldModel::float("soil_ph"),
    FieldModel::text("light_level"),
];

pub static ENVIRONMENTAL_DATA: EntityModel =
    EntityModel::new("environmental_data", "environmental_datum", &ENVIRONMENTAL_FIELDS)
        .with_parent("plant_analyses", "analysis_id");

static PEST_FIELDS: [FieldModel; 3] = [
    FieldModel::id_ref("analysis_id").filterable(),
    FieldModel::text("pest_name").required().searchable(),
    FieldModel::text("severity").filterable(),
];

pub static PEST_FINDINGS: EntityModel =
    EntityModel::new("pest_findings", "pest_finding", &PEST_FIELDS)
        .with_parent("plant_analyses", "analysis_id");

static DEFICIENCY_FIELDS: [FieldModel; 3] = [
    FieldModel::id_ref("analysis_id").filterable(),
    FieldModel::text("nutrient").required(),
    FieldModel::text("severity").filterable(),
];

pub static NUTRIENT_DEFICIENCIES: EntityModel =
    EntityModel::new("nutrient_deficiencies", "nutrient_deficiency", &DEFICIENCY_FIELDS)
        .with_parent("plant_analyses", "analysis_id");

static TREATMENT_FIELDS: [FieldModel; 3] = [
    FieldModel::id_ref("analysis_id").filterable(),
    FieldModel::text("treatment").required().searchable(),
    FieldModel::uint("priority").filterable().sortable(),
];

pub static TREATMENT_RECOMMENDATIONS: EntityModel = EntityModel::new(
    "treatment_recommendations",
    "treatment_recommendation",
    &TREATMENT_FIELDS,
)
.with_parent("plant_analyses", "analysis_id");

/// Register the whole catalog. Fails only on a wiring mistake in the statics
/// above, so callers treat an error as fatal at startup.
pub fn registry() -> Result<SchemaRegistry, SchemaError> {
    SchemaRegistry::builder()
        .register(&AGENTS)?
        .register(&MEETINGS)?
        .register(&PLANT_ANALYSES)?
        .register(&ENVIRONMENTAL_DATA)?
        .register(&PEST_FINDINGS)?
        .register(&NUTRIENT_DEFICIENCIES)?
        .register(&TREATMENT_RECOMMENDATIONS)?
        .finish()
}

///
/// TESTS
///
