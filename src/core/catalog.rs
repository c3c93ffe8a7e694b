//! The demo dataset: blueprints, seed entities and the open PRs scorecard.

use crate::domain::model::{
    Blueprint, Combinator, Entity, FrameworkState, PropertySchema, PropertyType, RelationSchema,
    RuleCondition, RuleQuery, Scorecard, ScorecardLevel, ScorecardRule,
};
use serde_json::json;
use std::collections::BTreeMap;

pub const FRAMEWORK_BLUEPRINT: &str = "framework";
pub const SERVICE_BLUEPRINT: &str = "service";
pub const STATE_PROPERTY: &str = "state";
pub const EOL_COUNT_PROPERTY: &str = "number_of_eol_packages";
pub const FRAMEWORKS_RELATION: &str = "frameworks";
pub const OPEN_PRS_PROPERTY: &str = "openPRsCount";

pub fn framework_blueprint() -> Blueprint {
    let mut properties = BTreeMap::new();
    properties.insert(
        STATE_PROPERTY.to_string(),
        PropertySchema {
            kind: PropertyType::String,
            title: "State".to_string(),
            allowed: Some(
                FrameworkState::ALL
                    .iter()
                    .map(|state| state.as_str().to_string())
                    .collect(),
            ),
            description: Some("Current state of the framework".to_string()),
        },
    );

    Blueprint {
        identifier: FRAMEWORK_BLUEPRINT.to_string(),
        title: "Framework".to_string(),
        properties,
        relations: BTreeMap::new(),
    }
}

pub fn service_blueprint() -> Blueprint {
    let mut properties = BTreeMap::new();
    properties.insert(
        EOL_COUNT_PROPERTY.to_string(),
        PropertySchema {
            kind: PropertyType::Number,
            title: "Number of EOL Packages".to_string(),
            allowed: None,
            description: Some("Count of EOL frameworks used by this service".to_string()),
        },
    );

    let mut relations = BTreeMap::new();
    relations.insert(
        FRAMEWORKS_RELATION.to_string(),
        RelationSchema {
            title: "Used Frameworks".to_string(),
            target: FRAMEWORK_BLUEPRINT.to_string(),
            many: true,
            required: false,
        },
    );

    Blueprint {
        identifier: SERVICE_BLUEPRINT.to_string(),
        title: "Service".to_string(),
        properties,
        relations,
    }
}

/// Blueprints in creation order; relation targets come first.
pub fn blueprints() -> Vec<Blueprint> {
    vec![framework_blueprint(), service_blueprint()]
}

pub fn mock_frameworks() -> Vec<Entity> {
    [
        ("react", "React", FrameworkState::Active),
        ("angular-js", "AngularJS", FrameworkState::Eol),
        ("jquery", "jQuery", FrameworkState::Eol),
        ("vue", "Vue.js", FrameworkState::Active),
    ]
    .into_iter()
    .map(|(id, title, state)| Entity::new(id, title).with_property(STATE_PROPERTY, state))
    .collect()
}

pub fn mock_services() -> Vec<Entity> {
    [
        ("frontend-app", "Frontend Application", ["react", "jquery"]),
        ("legacy-app", "Legacy Application", ["angular-js", "jquery"]),
        ("modern-app", "Modern Application", ["react", "vue"]),
    ]
    .into_iter()
    .map(|(id, title, frameworks)| {
        Entity::new(id, title).with_relation(FRAMEWORKS_RELATION, frameworks)
    })
    .collect()
}

pub fn open_prs_scorecard() -> Scorecard {
    let tiers = [
        ("gold-level-prs", "Gold", "yellow", 5),
        ("silver-level-prs", "Silver", "gray", 10),
        ("bronze-level-prs", "Bronze", "orange", 15),
    ];

    let rules = tiers
        .iter()
        .map(|(identifier, level, _, threshold)| ScorecardRule {
            identifier: identifier.to_string(),
            title: format!("Less than {} open PRs", threshold),
            description: Some(format!(
                "Repository has less than {} open pull requests",
                threshold
            )),
            level: level.to_string(),
            query: RuleQuery {
                combinator: Combinator::And,
                conditions: vec![RuleCondition {
                    property: OPEN_PRS_PROPERTY.to_string(),
                    operator: "<".to_string(),
                    value: json!(threshold),
                }],
            },
        })
        .collect();

    let levels = tiers
        .iter()
        .map(|(_, level, color, _)| ScorecardLevel {
            title: level.to_string(),
            color: color.to_string(),
        })
        .collect();

    Scorecard {
        identifier: "open-prs-scorecard".to_string(),
        title: "Open PRs Status".to_string(),
        rules,
        levels,
    }
}
