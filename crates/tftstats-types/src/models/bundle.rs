//! Game data bundle models.

use serde::{Deserialize, Serialize};

/// A single game entity (champion, item, trait, ...).
///
/// Entities are passed through untouched; only the fields needed for keyed
/// lookups are ever inspected.
pub type Entity = serde_json::Value;

/// Bundle payload exactly as delivered by the remote source.
///
/// Every collection may be missing or `null` on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RawBundle {
    pub meta_decks: Option<Vec<Entity>>,
    pub champions: Option<Vec<Entity>>,
    pub items: Option<Vec<Entity>>,
    pub traits: Option<Vec<Entity>>,
    pub augments: Option<Vec<Entity>>,
    pub forces: Option<Vec<Entity>>,
    pub skill_tree: Option<Vec<Entity>>,
}

/// Normalised game data. Every collection is always present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GameDataBundle {
    pub meta_decks: Vec<Entity>,
    pub champions: Vec<Entity>,
    pub items: Vec<Entity>,
    pub traits: Vec<Entity>,
    pub augments: Vec<Entity>,
    pub forces: Vec<Entity>,
    pub skill_tree: Vec<Entity>,
}

impl GameDataBundle {
    /// Borrow one collection by name.
    pub fn collection(&self, collection: Collection) -> &[Entity] {
        match collection {
            Collection::MetaDecks => &self.meta_decks,
            Collection::Champions => &self.champions,
            Collection::Items => &self.items,
            Collection::Traits => &self.traits,
            Collection::Augments => &self.augments,
            Collection::Forces => &self.forces,
            Collection::SkillTree => &self.skill_tree,
        }
    }
}

/// The collections carried by a [`GameDataBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    MetaDecks,
    Champions,
    Items,
    Traits,
    Augments,
    Forces,
    SkillTree,
}

impl Collection {
    /// All collections in bundle order.
    pub const ALL: [Collection; 7] = [
        Collection::MetaDecks,
        Collection::Champions,
        Collection::Items,
        Collection::Traits,
        Collection::Augments,
        Collection::Forces,
        Collection::SkillTree,
    ];

    /// Wire name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::MetaDecks => "metaDecks",
            Collection::Champions => "champions",
            Collection::Items => "items",
            Collection::Traits => "traits",
            Collection::Augments => "augments",
            Collection::Forces => "forces",
            Collection::SkillTree => "skillTree",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
