//! Ranking Export / Import
//!
//! Canonical JSON snapshot of the ranking, the browser download that writes
//! it, and re-import of a previously exported file.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

use crate::models::{normalize_brand, Category, ChipFlavor, FlavorId};
use crate::ranking::{Ranking, MAX_FLAVOR_ID};

const EXPORT_MIME: &str = "application/json";

/// One exported row; `rank` is the 1-based position at export time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub id: FlavorId,
    pub name: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// Export file contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingExport {
    pub ranking: Vec<RankedEntry>,
    #[serde(serialize_with = "iso_millis")]
    pub export_date: DateTime<Utc>,
}

fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Not a ranking export: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Ranks must run 1..{len} without gaps (found {found} at position {position})")]
    RankGap { len: usize, position: usize, found: usize },
    #[error("Flavor {0} appears more than once")]
    DuplicateId(FlavorId),
    #[error("Flavor at rank {0} has no name")]
    BlankName(usize),
    #[error("Flavor id {0} is out of range")]
    IdOutOfRange(FlavorId),
}

impl RankingExport {
    /// Snapshot `ranking` as of `at`
    pub fn capture(ranking: &Ranking, at: DateTime<Utc>) -> Self {
        let ranking = ranking
            .iter_ranked()
            .map(|(rank, flavor)| RankedEntry {
                rank,
                id: flavor.id,
                name: flavor.name.clone(),
                category: flavor.category,
                brand: flavor.brand.clone(),
            })
            .collect();
        Self { ranking, export_date: at }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn parse(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild a ranking, ordered by the exported ranks
    pub fn into_ranking(self) -> Result<Ranking, ImportError> {
        let mut entries = self.ranking;
        entries.sort_by_key(|e| e.rank);

        let len = entries.len();
        let mut flavors = Vec::with_capacity(len);
        for (position, entry) in entries.into_iter().enumerate() {
            if entry.rank != position + 1 {
                return Err(ImportError::RankGap { len, position: position + 1, found: entry.rank });
            }
            if entry.id.0 > MAX_FLAVOR_ID {
                return Err(ImportError::IdOutOfRange(entry.id));
            }
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(ImportError::BlankName(entry.rank));
            }
            flavors.push(ChipFlavor {
                id: entry.id,
                name: name.to_string(),
                category: entry.category,
                brand: normalize_brand(entry.brand.as_deref()),
            });
        }

        Ranking::try_from_flavors(flavors).map_err(ImportError::DuplicateId)
    }
}

/// Snapshot the ranking now
pub fn export_snapshot(ranking: &Ranking) -> RankingExport {
    RankingExport::capture(ranking, Utc::now())
}

/// Parse an exported file back into a ranking
pub fn import_ranking(json: &str) -> Result<Ranking, ImportError> {
    RankingExport::parse(json)?.into_ranking()
}

/// Offer `contents` to the user as a downloaded file
pub fn trigger_download(filename: &str, contents: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|win| win.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;

    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let props = web_sys::BlobPropertyBag::new();
    props.set_type(EXPORT_MIME);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &props)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}

/// Read a user-picked file as UTF-8 text
pub async fn read_file_text(file: web_sys::File) -> Result<String, JsValue> {
    let text = wasm_bindgen_futures::JsFuture::from(file.text()).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("file is not text"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlavorDraft;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_export_matches_list_order() {
        let mut ranking = Ranking::seeded();
        let last = ranking.flavors()[3].id;
        ranking.move_to(last, 0);

        let export = RankingExport::capture(&ranking, fixed_time());
        assert_eq!(export.ranking.len(), ranking.len());
        for (entry, flavor) in export.ranking.iter().zip(ranking.flavors()) {
            assert_eq!(entry.id, flavor.id);
            assert_eq!(entry.rank, ranking.rank_of(flavor.id).unwrap());
        }
        assert_eq!(export.ranking[0].name, "BBQ Pringles");
    }

    #[test]
    fn test_export_json_shape() {
        let mut ranking = Ranking::new();
        ranking.add(&FlavorDraft::new("Plain", Category::Classic));
        let export = RankingExport::capture(&ranking, fixed_time());
        let value: serde_json::Value = serde_json::from_str(&export.to_json_pretty().unwrap()).unwrap();

        assert_eq!(value["exportDate"], "2024-05-01T12:30:00.000Z");
        let row = &value["ranking"][0];
        assert_eq!(row["rank"], 1);
        assert_eq!(row["name"], "Plain");
        assert_eq!(row["category"], "classic");
        assert!(row["id"].is_string());
        assert!(row.get("brand").is_none());
    }

    #[test]
    fn test_reimport_reexport_is_identical() {
        let mut ranking = Ranking::seeded();
        ranking.add(&FlavorDraft::new("Kettle Sea Salt", Category::Salt));
        let first = RankingExport::capture(&ranking, fixed_time());

        let json = first.to_json_pretty().unwrap();
        let imported = import_ranking(&json).unwrap();
        let second = export_snapshot(&imported);

        assert_eq!(first.ranking, second.ranking);
    }

    #[test]
    fn test_import_orders_by_rank() {
        let json = r#"{
            "ranking": [
                { "rank": 2, "id": "20", "name": "Second", "category": "spicy" },
                { "rank": 1, "id": "10", "name": "First", "category": "other", "brand": "  " }
            ],
            "exportDate": "2024-05-01T12:30:00.000Z"
        }"#;
        let ranking = import_ranking(json).unwrap();
        assert_eq!(ranking.flavors()[0].name, "First");
        assert_eq!(ranking.flavors()[0].brand, None);
        assert_eq!(ranking.flavors()[1].id, FlavorId(20));
    }

    #[test]
    fn test_import_rejects_rank_gap() {
        let json = r#"{
            "ranking": [ { "rank": 2, "id": "1", "name": "Lonely", "category": "bbq" } ],
            "exportDate": "2024-05-01T12:30:00Z"
        }"#;
        assert!(matches!(import_ranking(json), Err(ImportError::RankGap { found: 2, .. })));
    }

    #[test]
    fn test_import_rejects_duplicates_and_blank_names() {
        let dup = r#"{
            "ranking": [
                { "rank": 1, "id": "1", "name": "A", "category": "bbq" },
                { "rank": 2, "id": "1", "name": "B", "category": "bbq" }
            ],
            "exportDate": "2024-05-01T12:30:00Z"
        }"#;
        assert!(matches!(import_ranking(dup), Err(ImportError::DuplicateId(FlavorId(1)))));

        let blank = r#"{
            "ranking": [ { "rank": 1, "id": "1", "name": "  ", "category": "bbq" } ],
            "exportDate": "2024-05-01T12:30:00Z"
        }"#;
        assert!(matches!(import_ranking(blank), Err(ImportError::BlankName(1))));
    }

    #[test]
    fn test_import_rejects_unknown_category() {
        let json = r#"{
            "ranking": [ { "rank": 1, "id": "1", "name": "Honey", "category": "sweet" } ],
            "exportDate": "2024-05-01T12:30:00Z"
        }"#;
        assert!(matches!(import_ranking(json), Err(ImportError::Malformed(_))));
        assert!(matches!(import_ranking("not json"), Err(ImportError::Malformed(_))));
    }

    #[test]
    fn test_import_rejects_id_without_headroom() {
        let json = r#"{
            "ranking": [ { "rank": 1, "id": "18446744073709551615", "name": "Max", "category": "bbq" } ],
            "exportDate": "2024-05-01T12:30:00Z"
        }"#;
        assert!(matches!(
            import_ranking(json),
            Err(ImportError::IdOutOfRange(FlavorId(u64::MAX)))
        ));
    }

    #[test]
    fn test_add_after_importing_largest_id() {
        let json = format!(
            r#"{{
                "ranking": [ {{ "rank": 1, "id": "{}", "name": "Max", "category": "bbq" }} ],
                "exportDate": "2024-05-01T12:30:00Z"
            }}"#,
            MAX_FLAVOR_ID
        );
        let mut ranking = import_ranking(&json).unwrap();
        let added = ranking.add(&FlavorDraft::new("Next", Category::Salt)).unwrap();
        assert!(added.id.0 > MAX_FLAVOR_ID);
        assert_eq!(ranking.rank_of(added.id), Some(2));
    }
}
