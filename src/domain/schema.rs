//! Local checks run on every document before it is sent.
//!
//! The remote service stays the authority on schema correctness; these
//! checks only catch the mistakes that can be seen without a round trip.

use crate::domain::model::{Blueprint, Entity, PropertyType, Scorecard};
use crate::utils::error::{PortError, Result};
use crate::utils::validation::Validate;
use serde_json::Value;
use std::collections::HashSet;

impl Validate for Blueprint {
    fn validate(&self) -> Result<()> {
        require("blueprint identifier", &self.identifier)?;
        require(&format!("blueprint '{}' title", self.identifier), &self.title)?;

        for (name, property) in &self.properties {
            let context = format!("blueprint '{}' property '{}'", self.identifier, name);
            require(&format!("{} title", context), &property.title)?;

            if let Some(allowed) = &property.allowed {
                if property.kind != PropertyType::String {
                    return Err(PortError::validation(format!(
                        "{}: enum is only supported on string properties, found {}",
                        context,
                        property.kind.as_str()
                    )));
                }
                if allowed.is_empty() {
                    return Err(PortError::validation(format!(
                        "{}: enum cannot be empty",
                        context
                    )));
                }
            }
        }

        for (name, relation) in &self.relations {
            let context = format!("blueprint '{}' relation '{}'", self.identifier, name);
            require(&format!("{} title", context), &relation.title)?;
            require(&format!("{} target", context), &relation.target)?;
        }

        Ok(())
    }
}

/// Checks an entity against the blueprint it is about to be created under.
pub fn validate_entity(blueprint: &Blueprint, entity: &Entity) -> Result<()> {
    require(
        &format!("{} entity identifier", blueprint.identifier),
        &entity.identifier,
    )?;
    let context = format!("{} entity '{}'", blueprint.identifier, entity.identifier);

    for (name, value) in &entity.properties {
        let property = blueprint.properties.get(name).ok_or_else(|| {
            PortError::validation(format!("{}: unknown property '{}'", context, name))
        })?;

        // null clears a property
        if value.is_null() {
            continue;
        }

        if !property.kind.accepts(value) {
            return Err(PortError::validation(format!(
                "{}: property '{}' expects {}, got {}",
                context,
                name,
                property.kind.as_str(),
                value
            )));
        }

        if let (Some(allowed), Some(text)) = (&property.allowed, value.as_str()) {
            if !allowed.iter().any(|a| a == text) {
                return Err(PortError::validation(format!(
                    "{}: property '{}' must be one of [{}], got '{}'",
                    context,
                    name,
                    allowed.join(", "),
                    text
                )));
            }
        }
    }

    for (name, value) in &entity.relations {
        let relation = blueprint.relations.get(name).ok_or_else(|| {
            PortError::validation(format!("{}: unknown relation '{}'", context, name))
        })?;

        let well_formed = match value {
            Value::Array(items) if relation.many => items
                .iter()
                .all(|item| item.as_str().is_some_and(|id| !id.trim().is_empty())),
            Value::String(id) if !relation.many => !id.trim().is_empty(),
            Value::Null => !relation.required,
            _ => false,
        };

        if !well_formed {
            let expected = if relation.many {
                "a list of identifiers"
            } else {
                "a single identifier"
            };
            return Err(PortError::validation(format!(
                "{}: relation '{}' expects {}, got {}",
                context, name, expected, value
            )));
        }
    }

    Ok(())
}

impl Validate for Scorecard {
    fn validate(&self) -> Result<()> {
        require("scorecard identifier", &self.identifier)?;
        let context = format!("scorecard '{}'", self.identifier);
        require(&format!("{} title", context), &self.title)?;

        if self.levels.is_empty() {
            return Err(PortError::validation(format!(
                "{}: at least one level is required",
                context
            )));
        }

        let mut levels = HashSet::new();
        for level in &self.levels {
            require(&format!("{} level title", context), &level.title)?;
            if !levels.insert(level.title.as_str()) {
                return Err(PortError::validation(format!(
                    "{}: duplicate level '{}'",
                    context, level.title
                )));
            }
        }

        let mut rules = HashSet::new();
        for rule in &self.rules {
            require(&format!("{} rule identifier", context), &rule.identifier)?;
            if !rules.insert(rule.identifier.as_str()) {
                return Err(PortError::validation(format!(
                    "{}: duplicate rule '{}'",
                    context, rule.identifier
                )));
            }
            if !levels.contains(rule.level.as_str()) {
                return Err(PortError::validation(format!(
                    "{}: rule '{}' points at unknown level '{}'",
                    context, rule.identifier, rule.level
                )));
            }
            if rule.query.conditions.is_empty() {
                return Err(PortError::validation(format!(
                    "{}: rule '{}' has no conditions",
                    context, rule.identifier
                )));
            }
            for condition in &rule.query.conditions {
                require(
                    &format!("{} rule '{}' condition property", context, rule.identifier),
                    &condition.property,
                )?;
                require(
                    &format!("{} rule '{}' condition operator", context, rule.identifier),
                    &condition.operator,
                )?;
            }
        }

        Ok(())
    }
}

fn require(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PortError::validation(format!("{} cannot be empty", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog;
    use crate::domain::model::FrameworkState;
    use serde_json::json;

    #[test]
    fn test_seed_documents_pass() {
        let framework = catalog::framework_blueprint();
        let service = catalog::service_blueprint();
        assert!(framework.validate().is_ok());
        assert!(service.validate().is_ok());

        for entity in catalog::mock_frameworks() {
            assert!(validate_entity(&framework, &entity).is_ok());
        }
        for entity in catalog::mock_services() {
            assert!(validate_entity(&service, &entity).is_ok());
        }
        assert!(catalog::open_prs_scorecard().validate().is_ok());
    }

    #[test]
    fn test_enum_membership() {
        let framework = catalog::framework_blueprint();
        let entity = Entity::new("svelte", "Svelte").with_property("state", "Deprecated");

        let err = validate_entity(&framework, &entity).unwrap_err();
        assert!(err.to_string().contains("must be one of [Active, EOL]"));

        let ok = Entity::new("svelte", "Svelte").with_property("state", FrameworkState::Eol);
        assert!(validate_entity(&framework, &ok).is_ok());
    }

    #[test]
    fn test_unknown_property_and_relation() {
        let service = catalog::service_blueprint();

        let unknown_property = Entity::new("api", "API").with_property("owner", "team-a");
        assert!(validate_entity(&service, &unknown_property).is_err());

        let unknown_relation = Entity::new("api", "API").with_relation("libraries", ["serde"]);
        assert!(validate_entity(&service, &unknown_relation).is_err());
    }

    #[test]
    fn test_property_type_mismatch() {
        let service = catalog::service_blueprint();
        let entity = Entity::new("api", "API").with_property(catalog::EOL_COUNT_PROPERTY, "two");

        let err = validate_entity(&service, &entity).unwrap_err();
        assert!(err.to_string().contains("expects number"));
    }

    #[test]
    fn test_many_relation_shape() {
        let service = catalog::service_blueprint();

        let mut single = Entity::new("api", "API");
        single
            .relations
            .insert(catalog::FRAMEWORKS_RELATION.to_string(), json!("react"));
        assert!(validate_entity(&service, &single).is_err());

        let blank =
            Entity::new("api", "API").with_relation(catalog::FRAMEWORKS_RELATION, ["react", " "]);
        assert!(validate_entity(&service, &blank).is_err());

        let empty: [&str; 0] = [];
        let none = Entity::new("api", "API").with_relation(catalog::FRAMEWORKS_RELATION, empty);
        assert!(validate_entity(&service, &none).is_ok());
    }

    #[test]
    fn test_enum_on_number_rejected() {
        let mut service = catalog::service_blueprint();
        if let Some(property) = service.properties.get_mut(catalog::EOL_COUNT_PROPERTY) {
            property.allowed = Some(vec!["1".to_string()]);
        }
        assert!(service.validate().is_err());
    }

    #[test]
    fn test_relation_without_target_rejected() {
        let mut service = catalog::service_blueprint();
        if let Some(relation) = service.relations.get_mut(catalog::FRAMEWORKS_RELATION) {
            relation.target.clear();
        }
        let err = service.validate().unwrap_err();
        assert!(err.to_string().contains("target cannot be empty"));
    }

    #[test]
    fn test_scorecard_rule_level_must_exist() {
        let mut scorecard = catalog::open_prs_scorecard();
        scorecard.levels.retain(|level| level.title != "Bronze");

        let err = scorecard.validate().unwrap_err();
        assert!(err.to_string().contains("unknown level 'Bronze'"));
    }

    #[test]
    fn test_scorecard_duplicate_rule() {
        let mut scorecard = catalog::open_prs_scorecard();
        let first = scorecard.rules[0].clone();
        scorecard.rules.push(first);

        let err = scorecard.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate rule 'gold-level-prs'"));
    }

    #[test]
    fn test_scorecard_requires_conditions() {
        let mut scorecard = catalog::open_prs_scorecard();
        scorecard.rules[1].query.conditions.clear();
        assert!(scorecard.validate().is_err());
    }
}
