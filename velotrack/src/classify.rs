use serde::Serialize;

use crate::tags::Tags;

/// A display bucket for a way tag value
#[derive(Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Category {
    pub name: &'static str,
    pub color: &'static str,
}

/// Static mapping from the values of one way tag to categories.
#[derive(Clone, Copy, Debug)]
pub struct ClassificationTable {
    pub tag_key: &'static str,
    /// In display order
    pub categories: &'static [Category],
    pub entries: &'static [(&'static str, Category)],
}

impl ClassificationTable {
    pub fn lookup(&self, value: &str) -> Option<Category> {
        self.entries
            .iter()
            .find(|(x, _)| *x == value)
            .map(|(_, category)| *category)
    }

    pub fn classify(&self, tags: &Tags) -> Option<Category> {
        self.lookup(tags.get(self.tag_key)?)
    }
}

/// Color used for samples no table knows about
pub const UNKNOWN_COLOR: &str = "#9e9e9e";

pub const PAVED: Category = Category {
    name: "paved",
    color: "#2e7d32",
};
pub const COBBLESTONE: Category = Category {
    name: "cobblestone",
    color: "#f9a825",
};
pub const UNPAVED: Category = Category {
    name: "unpaved",
    color: "#8d6e63",
};

pub const SURFACE: ClassificationTable = ClassificationTable {
    tag_key: "surface",
    categories: &[PAVED, COBBLESTONE, UNPAVED],
    entries: &[
        ("asphalt", PAVED),
        ("chipseal", PAVED),
        ("concrete", PAVED),
        ("concrete:lanes", PAVED),
        ("concrete:plates", PAVED),
        ("metal", PAVED),
        ("paved", PAVED),
        ("paving_stones", PAVED),
        ("wood", PAVED),
        ("cobblestone", COBBLESTONE),
        ("sett", COBBLESTONE),
        ("unhewn_cobblestone", COBBLESTONE),
        ("compacted", UNPAVED),
        ("dirt", UNPAVED),
        ("earth", UNPAVED),
        ("fine_gravel", UNPAVED),
        ("grass", UNPAVED),
        ("grass_paver", UNPAVED),
        ("gravel", UNPAVED),
        ("ground", UNPAVED),
        ("mud", UNPAVED),
        ("pebblestone", UNPAVED),
        ("rock", UNPAVED),
        ("sand", UNPAVED),
        ("unpaved", UNPAVED),
        ("woodchips", UNPAVED),
    ],
};

pub const CAR_FREE: Category = Category {
    name: "car-free",
    color: "#1565c0",
};
pub const LOW_TRAFFIC: Category = Category {
    name: "low",
    color: "#43a047",
};
pub const MEDIUM_TRAFFIC: Category = Category {
    name: "medium",
    color: "#fb8c00",
};
pub const HIGH_TRAFFIC: Category = Category {
    name: "high",
    color: "#c62828",
};

pub const TRAFFIC: ClassificationTable = ClassificationTable {
    tag_key: "highway",
    categories: &[CAR_FREE, LOW_TRAFFIC, MEDIUM_TRAFFIC, HIGH_TRAFFIC],
    entries: &[
        ("bridleway", CAR_FREE),
        ("cycleway", CAR_FREE),
        ("footway", CAR_FREE),
        ("path", CAR_FREE),
        ("pedestrian", CAR_FREE),
        ("steps", CAR_FREE),
        ("track", CAR_FREE),
        ("living_street", LOW_TRAFFIC),
        ("residential", LOW_TRAFFIC),
        ("road", LOW_TRAFFIC),
        ("service", LOW_TRAFFIC),
        ("unclassified", LOW_TRAFFIC),
        ("secondary", MEDIUM_TRAFFIC),
        ("secondary_link", MEDIUM_TRAFFIC),
        ("tertiary", MEDIUM_TRAFFIC),
        ("tertiary_link", MEDIUM_TRAFFIC),
        ("motorway", HIGH_TRAFFIC),
        ("motorway_link", HIGH_TRAFFIC),
        ("primary", HIGH_TRAFFIC),
        ("primary_link", HIGH_TRAFFIC),
        ("trunk", HIGH_TRAFFIC),
        ("trunk_link", HIGH_TRAFFIC),
    ],
};
