//! Derived game data view.
//!
//! Turns the cached [`RawBundle`] into a [`GameDataBundle`] whose
//! collections are always present, and derives the flags pages use to
//! choose between loading, empty, error, and content states.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tftstats_client::RemoteDataClient;
use tftstats_types::{Collection, Entity, FetchError, GameDataBundle, RawBundle};

use crate::query::{fetcher, Fetcher, QueryCache, QueryKey, QueryResult, QuerySubscription};

/// Entity fields tried, in order, when looking an entity up by key.
const KEY_FIELDS: [&str; 4] = ["key", "apiName", "id", "name"];

/// Key under which the comps bundle is cached.
pub fn game_data_key() -> QueryKey {
    QueryKey::new(["comps", "metaDecks"])
}

/// Fetcher that loads the comps bundle through `client`.
pub fn bundle_fetcher(client: RemoteDataClient) -> Fetcher<RawBundle> {
    fetcher(move || {
        let client = client.clone();
        async move { client.fetch_bundle().await }
    })
}

/// Subscribe to the comps bundle.
pub fn subscribe_game_data(
    cache: &Arc<QueryCache<RawBundle>>,
    client: &RemoteDataClient,
) -> QuerySubscription<RawBundle> {
    cache.subscribe(game_data_key(), bundle_fetcher(client.clone()))
}

/// Normalise a possibly-missing raw bundle. Never fails.
pub fn normalize(raw: Option<&RawBundle>) -> GameDataBundle {
    let Some(raw) = raw else {
        return GameDataBundle::default();
    };
    let take = |collection: &Option<Vec<Entity>>| collection.clone().unwrap_or_default();
    GameDataBundle {
        meta_decks: take(&raw.meta_decks),
        champions: take(&raw.champions),
        items: take(&raw.items),
        traits: take(&raw.traits),
        augments: take(&raw.augments),
        forces: take(&raw.forces),
        skill_tree: take(&raw.skill_tree),
    }
}

pub fn has_data(bundle: &GameDataBundle) -> bool {
    !bundle.meta_decks.is_empty()
}

/// Settled without error and still nothing to show.
pub fn is_empty(bundle: &GameDataBundle, is_loading: bool, has_error: bool) -> bool {
    !is_loading && !has_error && bundle.meta_decks.is_empty()
}

/// Find an entity of `collection` whose key field equals `key`.
pub fn find_by_key<'a>(
    bundle: &'a GameDataBundle,
    collection: Collection,
    key: &str,
) -> Option<&'a Entity> {
    bundle.collection(collection).iter().find(|entity| {
        KEY_FIELDS
            .iter()
            .find_map(|field| entity.get(field).and_then(|v| v.as_str()))
            .is_some_and(|value| value == key)
    })
}

/// What a page renders from: the normalised bundle plus query flags.
#[derive(Debug, Clone)]
pub struct GameDataView {
    pub bundle: GameDataBundle,
    pub is_loading: bool,
    pub is_fetching: bool,
    pub is_error: bool,
    pub error: Option<FetchError>,
    pub data_updated_at: Option<DateTime<Utc>>,
}

impl GameDataView {
    pub fn from_result(result: &QueryResult<RawBundle>) -> Self {
        Self {
            bundle: normalize(result.data.as_deref()),
            is_loading: result.is_loading(),
            is_fetching: result.is_fetching,
            is_error: result.is_error(),
            error: result.error.clone(),
            data_updated_at: result.data_updated_at,
        }
    }

    pub fn has_data(&self) -> bool {
        has_data(&self.bundle)
    }

    pub fn is_empty(&self) -> bool {
        is_empty(&self.bundle, self.is_loading, self.is_error)
    }

    pub fn find(&self, collection: Collection, key: &str) -> Option<&Entity> {
        find_by_key(&self.bundle, collection, key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::query::QueryStatus;
    use serde_json::json;

    #[test]
    fn test_normalize_none_has_every_collection() {
        let bundle = normalize(None);
        for collection in Collection::ALL {
            assert!(bundle.collection(collection).is_empty(), "{collection}");
        }
        assert!(!has_data(&bundle));
        assert!(is_empty(&bundle, false, false));

        let serialized = serde_json::to_value(&bundle).unwrap();
        for collection in Collection::ALL {
            assert_eq!(serialized[collection.as_str()], json!([]), "{collection}");
        }
    }

    #[test]
    fn test_is_empty_defers_to_loading_and_error() {
        let bundle = normalize(None);
        assert!(!is_empty(&bundle, true, false));
        assert!(!is_empty(&bundle, false, true));
    }

    #[test]
    fn test_normalize_fills_missing_collections() {
        let raw = RawBundle {
            meta_decks: Some(vec![json!({"name": "Mages"})]),
            traits: None,
            items: Some(vec![]),
            ..Default::default()
        };

        let bundle = normalize(Some(&raw));
        assert_eq!(bundle.meta_decks.len(), 1);
        assert!(bundle.traits.is_empty());
        assert!(has_data(&bundle));
        assert!(!is_empty(&bundle, false, false));
    }

    #[test]
    fn test_find_by_key_checks_known_fields() {
        let bundle = GameDataBundle {
            champions: vec![json!({"key": "ahri", "name": "Ahri"}), json!({"apiName": "TFT_Jinx"})],
            items: vec![json!({"id": 7}), json!({"name": "Deathblade"})],
            ..Default::default()
        };

        assert_eq!(find_by_key(&bundle, Collection::Champions, "ahri").unwrap()["name"], "Ahri");
        assert!(find_by_key(&bundle, Collection::Champions, "TFT_Jinx").is_some());
        assert!(find_by_key(&bundle, Collection::Items, "Deathblade").is_some());
        assert!(find_by_key(&bundle, Collection::Items, "7").is_none());
        assert!(find_by_key(&bundle, Collection::Traits, "ahri").is_none());
    }

    #[test]
    fn test_view_from_loading_result() {
        let result = QueryResult::<RawBundle> {
            status: QueryStatus::Loading,
            data: None,
            error: None,
            is_fetching: true,
            failure_count: 0,
            data_updated_at: None,
        };

        let view = GameDataView::from_result(&result);
        assert!(view.is_loading);
        assert!(!view.has_data());
        assert!(!view.is_empty());
        assert!(view.bundle.skill_tree.is_empty());
    }

    #[test]
    fn test_view_from_error_result_keeps_previous_data() {
        let raw = RawBundle { meta_decks: Some(vec![json!({"name": "Duelists"})]), ..Default::default() };
        let result = QueryResult {
            status: QueryStatus::Error,
            data: Some(Arc::new(raw)),
            error: Some(FetchError::Timeout { timeout_ms: 10_000 }),
            is_fetching: false,
            failure_count: 4,
            data_updated_at: Some(Utc::now()),
        };

        let view = GameDataView::from_result(&result);
        assert!(view.is_error);
        assert!(view.has_data());
        assert!(!view.is_empty());
        assert_eq!(view.error, Some(FetchError::Timeout { timeout_ms: 10_000 }));
    }
}
