//! Variant templates for tooltip content.

use serde_json::Value;
use tftstats_types::TooltipVariant;

/// Renderable tooltip body.
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipBody {
    /// Nothing to show
    Empty,
    /// Content mapped into the variant's template
    Card { title: String, subtitle: Option<String>, lines: Vec<String> },
    /// Content that does not fit any template, shown as-is
    Raw(Value),
}

/// Map `content` into the template selected by `variant`.
///
/// Content missing the fields a template needs falls back to
/// [`TooltipBody::Raw`]; `null` content renders nothing.
pub fn render(variant: TooltipVariant, content: &Value) -> TooltipBody {
    if content.is_null() {
        return TooltipBody::Empty;
    }
    let card = match variant {
        TooltipVariant::Champion => champion(content),
        TooltipVariant::Item => item(content),
        TooltipVariant::Trait => trait_card(content),
        TooltipVariant::OtherTraits => other_traits(content),
        TooltipVariant::Augment => augment(content),
        TooltipVariant::Force => described(content, None),
        TooltipVariant::SkillTree => {
            let level = content.get("level").and_then(Value::as_u64).map(|l| format!("Level {l}"));
            described(content, level)
        },
        TooltipVariant::Default => content
            .as_str()
            .map(|s| TooltipBody::Card { title: s.to_string(), subtitle: None, lines: Vec::new() }),
    };
    card.unwrap_or_else(|| TooltipBody::Raw(content.clone()))
}

fn text<'a>(content: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields.iter().find_map(|field| content.get(field).and_then(Value::as_str))
}

fn name(content: &Value) -> Option<String> {
    text(content, &["name", "title"]).map(str::to_string)
}

fn description(content: &Value) -> Option<String> {
    text(content, &["desc", "description"]).map(str::to_string)
}

fn strings(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string).or_else(|| name(item)))
                .collect()
        })
        .unwrap_or_default()
}

fn described(content: &Value, subtitle: Option<String>) -> Option<TooltipBody> {
    Some(TooltipBody::Card {
        title: name(content)?,
        subtitle,
        lines: description(content).into_iter().collect(),
    })
}

fn champion(content: &Value) -> Option<TooltipBody> {
    let title = name(content)?;
    let subtitle = content.get("cost").and_then(Value::as_u64).map(|c| format!("{c} cost"));
    let mut lines = Vec::new();
    let traits = strings(content.get("traits"));
    if !traits.is_empty() {
        lines.push(traits.join(", "));
    }
    if let Some(ability) = content.get("ability") {
        lines.extend(name(ability));
        lines.extend(description(ability));
    }
    Some(TooltipBody::Card { title, subtitle, lines })
}

fn item(content: &Value) -> Option<TooltipBody> {
    let title = name(content)?;
    let mut lines: Vec<String> = description(content).into_iter().collect();
    let components = strings(content.get("composition"));
    if !components.is_empty() {
        lines.push(format!("Built from: {}", components.join(" + ")));
    }
    Some(TooltipBody::Card { title, subtitle: None, lines })
}

fn trait_card(content: &Value) -> Option<TooltipBody> {
    let title = name(content)?;
    let mut lines: Vec<String> = description(content).into_iter().collect();
    if let Some(effects) = content.get("effects").and_then(Value::as_array) {
        for effect in effects {
            let Some(min_units) = effect.get("minUnits").and_then(Value::as_u64) else {
                continue;
            };
            match description(effect) {
                Some(desc) => lines.push(format!("({min_units}) {desc}")),
                None => lines.push(format!("({min_units})")),
            }
        }
    }
    Some(TooltipBody::Card { title, subtitle: None, lines })
}

fn other_traits(content: &Value) -> Option<TooltipBody> {
    let lines = strings(Some(content)).into_iter().chain(strings(content.get("traits"))).collect::<Vec<_>>();
    if lines.is_empty() {
        return None;
    }
    Some(TooltipBody::Card { title: "Other traits".to_string(), subtitle: None, lines })
}

fn augment(content: &Value) -> Option<TooltipBody> {
    let subtitle = match content.get("tier").and_then(Value::as_u64) {
        Some(1) => Some("Silver".to_string()),
        Some(2) => Some("Gold".to_string()),
        Some(3) => Some("Prismatic".to_string()),
        _ => None,
    };
    described(content, subtitle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_champion_template() {
        let body = render(
            TooltipVariant::Champion,
            &json!({
                "name": "Ahri",
                "cost": 4,
                "traits": ["Arcana", {"name": "Scholar"}],
                "ability": {"name": "Spirit Rush", "desc": "Dashes and fires orbs."}
            }),
        );
        assert_eq!(
            body,
            TooltipBody::Card {
                title: "Ahri".to_string(),
                subtitle: Some("4 cost".to_string()),
                lines: vec![
                    "Arcana, Scholar".to_string(),
                    "Spirit Rush".to_string(),
                    "Dashes and fires orbs.".to_string()
                ],
            }
        );
    }

    #[test]
    fn test_item_and_trait_templates() {
        let item = render(
            TooltipVariant::Item,
            &json!({"name": "Deathblade", "desc": "+AD", "composition": ["B.F. Sword", "B.F. Sword"]}),
        );
        assert!(matches!(item, TooltipBody::Card { ref lines, .. } if lines[1] == "Built from: B.F. Sword + B.F. Sword"));

        let tr = render(
            TooltipVariant::Trait,
            &json!({"name": "Sniper", "effects": [{"minUnits": 2, "desc": "+10% damage"}, {"minUnits": 4}]}),
        );
        assert!(matches!(tr, TooltipBody::Card { ref lines, .. } if lines == &["(2) +10% damage", "(4)"]));
    }

    #[test]
    fn test_other_traits_accepts_list() {
        let body = render(TooltipVariant::OtherTraits, &json!(["Bastion", {"name": "Rebel"}]));
        assert!(matches!(body, TooltipBody::Card { ref lines, .. } if lines.len() == 2));
    }

    #[test]
    fn test_augment_tier_subtitle() {
        let body = render(TooltipVariant::Augment, &json!({"name": "Cybernetic Implants", "tier": 2}));
        assert!(matches!(body, TooltipBody::Card { ref subtitle, .. } if subtitle.as_deref() == Some("Gold")));
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(render(TooltipVariant::Champion, &Value::Null), TooltipBody::Empty);
        assert_eq!(render(TooltipVariant::Item, &json!({"cost": 3})), TooltipBody::Raw(json!({"cost": 3})));
        assert_eq!(render(TooltipVariant::Default, &json!({"x": 1})), TooltipBody::Raw(json!({"x": 1})));
        assert!(matches!(render(TooltipVariant::Default, &json!("Hello")), TooltipBody::Card { .. }));
        assert!(matches!(
            render(TooltipVariant::from_name("unknown"), &json!([1, 2])),
            TooltipBody::Raw(_)
        ));
    }
}
