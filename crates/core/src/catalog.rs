use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::menu::{MenuItem, MenuItemId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read menu file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse menu file `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Read-only menu supplied at startup. Item order inside the source file
/// is display order.
#[derive(Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
}

struct MenuSeed {
    id: u32,
    name: &'static str,
    category: &'static str,
    price_cents: i64,
    description: &'static str,
}

const MENU_SEEDS: &[MenuSeed] = &[
    MenuSeed {
        id: 1,
        name: "Garden Salad",
        category: "Salads",
        price_cents: 850,
        description: "Seasonal greens, cherry tomatoes, house vinaigrette",
    },
    MenuSeed {
        id: 2,
        name: "Tabbouleh",
        category: "Salads",
        price_cents: 900,
        description: "Parsley, bulgur, mint, lemon",
    },
    MenuSeed {
        id: 3,
        name: "Roasted Beet Salad",
        category: "Salads",
        price_cents: 950,
        description: "Beets, goat cheese, walnuts",
    },
    MenuSeed {
        id: 10,
        name: "Hummus Platter",
        category: "Starters",
        price_cents: 1200,
        description: "Hummus, olive oil, warm pita",
    },
    MenuSeed {
        id: 11,
        name: "Falafel",
        category: "Starters",
        price_cents: 1000,
        description: "Crisp chickpea fritters with tahini",
    },
    MenuSeed {
        id: 12,
        name: "Stuffed Vine Leaves",
        category: "Starters",
        price_cents: 1100,
        description: "Rice and herb stuffed grape leaves",
    },
    MenuSeed {
        id: 20,
        name: "Lamb Skewers",
        category: "Mains",
        price_cents: 2800,
        description: "Char-grilled lamb with sumac onions",
    },
    MenuSeed {
        id: 21,
        name: "Chicken Shawarma",
        category: "Mains",
        price_cents: 2200,
        description: "Marinated chicken, garlic sauce, pickles",
    },
    MenuSeed {
        id: 22,
        name: "Grilled Sea Bream",
        category: "Mains",
        price_cents: 3200,
        description: "Whole fish, lemon and herbs",
    },
    MenuSeed {
        id: 23,
        name: "Vegetable Maqluba",
        category: "Mains",
        price_cents: 1900,
        description: "Upside-down rice with roasted vegetables",
    },
    MenuSeed {
        id: 30,
        name: "Baklava",
        category: "Desserts",
        price_cents: 800,
        description: "Pistachio baklava, orange blossom syrup",
    },
    MenuSeed {
        id: 31,
        name: "Knafeh",
        category: "Desserts",
        price_cents: 950,
        description: "Warm cheese pastry with kataifi",
    },
    MenuSeed {
        id: 40,
        name: "Fresh Lemonade",
        category: "Drinks",
        price_cents: 400,
        description: "Mint lemonade, by the pitcher",
    },
    MenuSeed {
        id: 41,
        name: "Turkish Coffee",
        category: "Drinks",
        price_cents: 0,
        description: "Served tableside, priced on request",
    },
];

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Seeded menu so the binary works before an operator supplies their
    /// own `[catalog] path` file.
    pub fn builtin() -> Self {
        let items = MENU_SEEDS
            .iter()
            .map(|seed| MenuItem {
                id: MenuItemId(seed.id),
                name: seed.name.to_string(),
                category: seed.category.to_string(),
                price: Decimal::new(seed.price_cents, 2),
                image: String::new(),
                description: seed.description.to_string(),
            })
            .collect();
        Self::new(items)
    }

    /// Loads an operator-supplied menu: a JSON array of `MenuItem` values.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;
        let items = serde_json::from_str(&raw)
            .map_err(|source| CatalogError::Parse { path: path.to_path_buf(), source })?;
        Ok(Self::new(items))
    }

    pub fn find(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Category names in order of first occurrence.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(item.category.as_str());
            }
        }
        categories
    }

    pub fn items_in(&self, category: &str) -> Vec<&MenuItem> {
        self.items.iter().filter(|item| item.category == category).collect()
    }
}
