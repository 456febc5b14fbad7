//! Pre-selection of the collection indices reserved for 1-of-1 artworks.

use std::collections::BTreeMap;

use lamina_core::errors::ErrorInfo;
use lamina_core::{LaminaError, Sequencer};

/// Mapping from reserved output index to its standalone artwork.
#[derive(Debug, Clone, Default)]
pub struct UniquePlan<H> {
    slots: BTreeMap<u64, (String, H)>,
}

impl<H> UniquePlan<H> {
    /// Plan with no reserved slots.
    pub fn empty() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// The artwork reserved for `index`, if any.
    pub fn get(&self, index: u64) -> Option<&(String, H)> {
        self.slots.get(&index)
    }

    /// Whether `index` is reserved.
    pub fn contains(&self, index: u64) -> bool {
        self.slots.contains_key(&index)
    }

    /// Number of reserved slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the plan reserves no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Reserved indices in ascending order.
    pub fn reserved_indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.slots.keys().copied()
    }
}

/// Reserves one distinct index per artwork, in supply order.
///
/// Each artwork draws `floor(next() * size)` repeatedly until a free slot
/// turns up; the search space shrinks monotonically so no retry cap is
/// needed. `unique_count >= size` is rejected before the first draw.
pub fn plan_unique_slots<H>(
    artworks: Vec<(String, H)>,
    size: u64,
    sequencer: &mut Sequencer,
) -> Result<UniquePlan<H>, LaminaError> {
    if !artworks.is_empty() && artworks.len() as u64 >= size {
        return Err(LaminaError::Planner(
            ErrorInfo::new(
                "too-many-uniques",
                "unique artwork count must be smaller than the collection size",
            )
            .with_context("uniques", artworks.len().to_string())
            .with_context("size", size.to_string()),
        ));
    }
    let mut slots = BTreeMap::new();
    for (name, image) in artworks {
        let mut index = sequencer.draw_index(size as usize) as u64;
        while slots.contains_key(&index) {
            index = sequencer.draw_index(size as usize) as u64;
        }
        slots.insert(index, (name, image));
    }
    Ok(UniquePlan { slots })
}
