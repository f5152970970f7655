//! Item images and rewards
//!
//! The simulation stores a `VisualHandle` per item but never interprets it;
//! the catalog doubles as the renderer's resource table (built once from
//! settings, never re-created).

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::ItemAssetConfig;

/// Opaque reference to an item image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u32);

impl VisualHandle {
    /// Handle for items with no catalog entry
    pub const NONE: VisualHandle = VisualHandle(u32::MAX);
}

/// One kind of item: its image and the reward for catching it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemAsset {
    pub handle: VisualHandle,
    pub image: String,
    pub reward: i32,
}

/// All item kinds available to a level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub entries: Vec<ItemAsset>,
}

impl ItemCatalog {
    /// Build the catalog, handing out handles in configuration order
    pub fn from_config(config: &[ItemAssetConfig]) -> Self {
        let entries = config
            .iter()
            .enumerate()
            .map(|(i, c)| ItemAsset {
                handle: VisualHandle(i as u32),
                image: c.image.clone(),
                reward: c.reward,
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick an image and reward for one item (uniform over entries)
    pub fn assign(&self, rng: &mut Pcg32) -> (VisualHandle, i32) {
        if self.entries.is_empty() {
            return (VisualHandle::NONE, 0);
        }
        let entry = &self.entries[rng.random_range(0..self.entries.len())];
        (entry.handle, entry.reward)
    }

    /// Image name for a handle
    pub fn image(&self, handle: VisualHandle) -> Option<&str> {
        self.entries
            .get(handle.0 as usize)
            .filter(|e| e.handle == handle)
            .map(|e| e.image.as_str())
    }
}
