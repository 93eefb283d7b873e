//! News headline records.

use serde::{Deserialize, Serialize};

use crate::cache::{Record, RecordKind};

/// One item of a headline feed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    /// Headline title.
    pub title: String,
    /// Article link.
    pub link: String,
    /// Unique item identifier.
    pub guid: String,
    /// Publication date as reported by the feed.
    pub pub_date: String,
    /// Short description.
    pub description: String,
}

/// The headline feed for one symbol, in feed order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headlines {
    /// Symbol the feed was requested for.
    pub symbol: String,
    /// Feed items.
    pub items: Vec<Headline>,
}

impl Headlines {
    /// Returns the item at `index`, if any.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Headline> {
        self.items.get(index)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the feed has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Record for Headlines {
    const KIND: RecordKind = RecordKind::Headlines;

    fn symbol(&self) -> &str {
        &self.symbol
    }
}
