pub mod store;

pub use store::GarmentStore;

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// The fixed garment categories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shirts,
    Pants,
    Shoes,
    Jackets,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Shirts,
        Category::Pants,
        Category::Shoes,
        Category::Jackets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shirts => "shirts",
            Category::Pants => "pants",
            Category::Shoes => "shoes",
            Category::Jackets => "jackets",
        }
    }

    /// Parses the lowercase wire name, returning `None` for anything outside
    /// the four known categories.
    pub fn parse(s: &str) -> Option<Category> {
        match s {
            "shirts" => Some(Category::Shirts),
            "pants" => Some(Category::Pants),
            "shoes" => Some(Category::Shoes),
            "jackets" => Some(Category::Jackets),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One catalog entry.  Never mutated after creation; deletion is by id.
///
/// Wire shape matches the stored records: lowercase category, camelCase
/// field names, `isCustom` absent on the seed entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Garment {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Path or URL of the garment's image asset.
    pub image: String,
    #[serde(default)]
    pub is_custom: bool,
}

/// Generates an id for a user-added garment.
///
/// The millisecond timestamp alone can collide when two uploads land in the
/// same tick, so a short random suffix is appended.
pub fn custom_id() -> String {
    let suffix: u16 = rand::random();
    format!("custom-{}-{:04x}", unix_millis(), suffix)
}

pub(crate) fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// The built-in catalog, two garments per category, seeded into an empty
/// store at startup.
pub fn seed_garments() -> Vec<Garment> {
    let entry = |id: &str, name: &str, category, image: &str| Garment {
        id: id.to_owned(),
        name: name.to_owned(),
        category,
        image: image.to_owned(),
        is_custom: false,
    };
    vec![
        entry("s1", "Classic White Polo", Category::Shirts, "/garments/white-polo-shirt.png"),
        entry("s2", "Premium Black Polo", Category::Shirts, "/garments/black-polo-shirt.png"),
        entry("p1", "Black Formal Pants", Category::Pants, "/garments/black-formal-pants.jpg"),
        entry("p2", "Classic Blue Jeans", Category::Pants, "/garments/classic-blue-jeans.png"),
        entry("sh1", "Black Formal Shoes", Category::Shoes, "/garments/black-formal-shoes.jpg"),
        entry("sh2", "White Sneakers", Category::Shoes, "/garments/white-sneakers.png"),
        entry("j1", "Black Leather Jacket", Category::Jackets, "/garments/black-leather-jacket.png"),
        entry("j2", "Navy Blazer", Category::Jackets, "/garments/navy-blazer.png"),
    ]
}
