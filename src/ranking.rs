//! Ranked Flavor List
//!
//! The ordered flavor list behind the main page. Position is the only source
//! of rank (index 0 = rank 1); ids are unique and never reused.

use crate::models::{Category, ChipFlavor, FlavorDraft, FlavorId};

/// Largest id accepted from outside (imports); leaves room for new ids
pub const MAX_FLAVOR_ID: u64 = i64::MAX as u64;

/// Issues strictly increasing, time-based flavor ids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdSource {
    last: u64,
}

impl IdSource {
    /// Continue after an already used id
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Id for "now", bumped past the previous one when the clock stalls
    pub fn issue(&mut self, now_ms: u64) -> FlavorId {
        let id = now_ms.max(self.last.saturating_add(1));
        self.last = id;
        FlavorId(id)
    }
}

fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Ordered list of ranked flavors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    flavors: Vec<ChipFlavor>,
    ids: IdSource,
}

impl Ranking {
    /// Empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Demonstration list shown on first load
    pub fn seeded() -> Self {
        let seed = [
            (1, "Cool Ranch Doritos", Category::Cheesy, "Doritos"),
            (2, "Flamin' Hot Cheetos", Category::Spicy, "Cheetos"),
            (3, "Original Lays", Category::Classic, "Lays"),
            (4, "BBQ Pringles", Category::Bbq, "Pringles"),
        ];
        let flavors = seed
            .into_iter()
            .map(|(id, name, category, brand)| ChipFlavor {
                id: FlavorId(id),
                name: name.to_string(),
                category,
                brand: Some(brand.to_string()),
            })
            .collect();
        Self {
            flavors,
            ids: IdSource::starting_after(4),
        }
    }

    /// Build from existing flavors in rank order.
    ///
    /// Fails with the first repeated id.
    pub fn try_from_flavors(flavors: Vec<ChipFlavor>) -> Result<Self, FlavorId> {
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = flavors.iter().find(|f| !seen.insert(f.id)) {
            return Err(dup.id);
        }
        let last = flavors.iter().map(|f| f.id.0).max().unwrap_or(0);
        Ok(Self {
            flavors,
            ids: IdSource::starting_after(last),
        })
    }

    pub fn flavors(&self) -> &[ChipFlavor] {
        &self.flavors
    }

    pub fn len(&self) -> usize {
        self.flavors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flavors.is_empty()
    }

    /// Flavors paired with their 1-based rank
    pub fn iter_ranked(&self) -> impl Iterator<Item = (usize, &ChipFlavor)> + '_ {
        self.flavors.iter().enumerate().map(|(index, flavor)| (index + 1, flavor))
    }

    pub fn get(&self, id: FlavorId) -> Option<&ChipFlavor> {
        self.flavors.iter().find(|f| f.id == id)
    }

    /// Current index of `id`
    pub fn position_of(&self, id: FlavorId) -> Option<usize> {
        self.flavors.iter().position(|f| f.id == id)
    }

    pub fn rank_of(&self, id: FlavorId) -> Option<usize> {
        self.position_of(id).map(|index| index + 1)
    }

    /// Append a new flavor at the lowest rank.
    ///
    /// Returns `None` (and changes nothing) when the draft name is blank.
    pub fn add(&mut self, draft: &FlavorDraft) -> Option<ChipFlavor> {
        self.add_at(draft, now_millis())
    }

    fn add_at(&mut self, draft: &FlavorDraft, now_ms: u64) -> Option<ChipFlavor> {
        let valid = draft.validate()?;
        let flavor = ChipFlavor::from_draft(self.ids.issue(now_ms), valid);
        self.flavors.push(flavor.clone());
        Some(flavor)
    }

    /// Remove by id; unknown ids are a no-op
    pub fn remove(&mut self, id: FlavorId) -> Option<ChipFlavor> {
        let index = self.position_of(id)?;
        Some(self.flavors.remove(index))
    }

    /// Move `id` so that it ends up at `target` (clamped to the last index).
    ///
    /// Returns `false` when the id is unknown or the position is unchanged.
    pub fn move_to(&mut self, id: FlavorId, target: usize) -> bool {
        let Some(from) = self.position_of(id) else {
            return false;
        };
        let target = target.min(self.flavors.len() - 1);
        if from == target {
            return false;
        }
        let flavor = self.flavors.remove(from);
        self.flavors.insert(target, flavor);
        true
    }

    /// Move `id` into the slot currently held by `over`
    pub fn move_onto(&mut self, id: FlavorId, over: FlavorId) -> bool {
        match self.position_of(over) {
            Some(target) => self.move_to(id, target),
            None => false,
        }
    }

    /// Move `id` into the gap before index `gap` of the current order
    pub fn move_into_gap(&mut self, id: FlavorId, gap: usize) -> bool {
        match self.position_of(id) {
            Some(from) => self.move_to(id, target_for_gap(from, gap)),
            None => false,
        }
    }

    /// Drop every flavor; issued ids stay retired
    pub fn clear(&mut self) {
        self.flavors.clear();
    }
}

/// Post-removal index for a drop into the gap before `gap`.
///
/// Gaps below the source shift up by one once the source is taken out.
pub fn target_for_gap(from: usize, gap: usize) -> usize {
    if gap > from { gap - 1 } else { gap }
}
