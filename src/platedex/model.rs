use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The three sub-collections an item can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Owned,
    Wanted,
    Archived,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Owned, ItemKind::Wanted, ItemKind::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Owned => "owned",
            ItemKind::Wanted => "wanted",
            ItemKind::Archived => "archived",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owned" | "collection" => Ok(ItemKind::Owned),
            "wanted" | "wishlist" => Ok(ItemKind::Wanted),
            "archived" | "archive" => Ok(ItemKind::Archived),
            other => Err(format!("Unknown item kind: {}", other)),
        }
    }
}

/// Where a plate comes from and what kind of plate it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classification {
    pub country: Option<String>,
    pub region_1st: Option<String>,
    pub region_2nd: Option<String>,
    pub region_3rd: Option<String>,
    #[serde(rename = "type")]
    pub plate_type: Option<String>,
    pub period_start: Option<i32>,
    pub period_end: Option<i32>,
    pub year: Option<i32>,
}

/// Measurements are millimetres (width, height) and grams (weight).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physical {
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub weight: Option<i64>,
    pub color_main: Option<String>,
    pub color_secondary: Option<String>,
}

/// How and when a plate entered the collection. Money is in minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acquisition {
    pub date: Option<String>,
    pub cost: Option<i64>,
    pub value: Option<i64>,
    pub location_status: Option<String>,
    pub source_name: Option<String>,
    pub source_alias: Option<String>,
    pub source_type: Option<String>,
    pub source_details: Option<String>,
    pub source_country: Option<String>,
}

/// How and when a plate left the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disposition {
    pub date: Option<String>,
    pub reason: Option<String>,
    pub details: Option<String>,
    pub price: Option<i64>,
    pub recipient_name: Option<String>,
    pub recipient_alias: Option<String>,
    pub recipient_country: Option<String>,
}

/// Fields shared by every item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub id: Uuid,
    pub registration_number: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub physical: Physical,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plate {
    pub fn new(registration_number: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            registration_number: registration_number.into(),
            image_path: None,
            notes: None,
            vehicle: None,
            classification: Classification::default(),
            physical: Physical::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnedPlate {
    pub plate: Plate,
    #[serde(default)]
    pub acquisition: Acquisition,
    #[serde(default)]
    pub is_keeper: bool,
    #[serde(default)]
    pub is_for_trade: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantedPlate {
    pub plate: Plate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedPlate {
    pub plate: Plate,
    #[serde(default)]
    pub acquisition: Acquisition,
    #[serde(default)]
    pub is_keeper: bool,
    #[serde(default)]
    pub is_for_trade: bool,
    #[serde(default)]
    pub disposition: Disposition,
}

/// A catalog entry. Each kind wraps its own record; the flattened view used by
/// filtering and sorting lives in [`crate::fields`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Owned(OwnedPlate),
    Wanted(WantedPlate),
    Archived(ArchivedPlate),
}

impl Item {
    /// Creates an empty item of the given kind.
    pub fn new(kind: ItemKind, registration_number: impl Into<String>) -> Self {
        let plate = Plate::new(registration_number);
        match kind {
            ItemKind::Owned => Item::Owned(OwnedPlate {
                plate,
                acquisition: Acquisition::default(),
                is_keeper: false,
                is_for_trade: false,
            }),
            ItemKind::Wanted => Item::Wanted(WantedPlate { plate }),
            ItemKind::Archived => Item::Archived(ArchivedPlate {
                plate,
                acquisition: Acquisition::default(),
                is_keeper: false,
                is_for_trade: false,
                disposition: Disposition::default(),
            }),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Owned(_) => ItemKind::Owned,
            Item::Wanted(_) => ItemKind::Wanted,
            Item::Archived(_) => ItemKind::Archived,
        }
    }

    pub fn plate(&self) -> &Plate {
        match self {
            Item::Owned(o) => &o.plate,
            Item::Wanted(w) => &w.plate,
            Item::Archived(a) => &a.plate,
        }
    }

    pub fn plate_mut(&mut self) -> &mut Plate {
        match self {
            Item::Owned(o) => &mut o.plate,
            Item::Wanted(w) => &mut w.plate,
            Item::Archived(a) => &mut a.plate,
        }
    }

    pub fn id(&self) -> Uuid {
        self.plate().id
    }

    pub fn registration_number(&self) -> &str {
        &self.plate().registration_number
    }

    pub fn acquisition(&self) -> Option<&Acquisition> {
        match self {
            Item::Owned(o) => Some(&o.acquisition),
            Item::Wanted(_) => None,
            Item::Archived(a) => Some(&a.acquisition),
        }
    }

    pub fn acquisition_mut(&mut self) -> Option<&mut Acquisition> {
        match self {
            Item::Owned(o) => Some(&mut o.acquisition),
            Item::Wanted(_) => None,
            Item::Archived(a) => Some(&mut a.acquisition),
        }
    }

    pub fn disposition(&self) -> Option<&Disposition> {
        match self {
            Item::Archived(a) => Some(&a.disposition),
            _ => None,
        }
    }

    pub fn disposition_mut(&mut self) -> Option<&mut Disposition> {
        match self {
            Item::Archived(a) => Some(&mut a.disposition),
            _ => None,
        }
    }

    pub fn touch(&mut self) {
        self.plate_mut().updated_at = Utc::now();
    }
}

impl OwnedPlate {
    /// Turns a wishlist entry into an owned plate, keeping its identity.
    pub fn from_wanted(wanted: WantedPlate, acquisition: Acquisition) -> Self {
        Self {
            plate: wanted.plate,
            acquisition,
            is_keeper: false,
            is_for_trade: false,
        }
    }
}

impl ArchivedPlate {
    /// Moves an owned plate into the archive, keeping its identity and history.
    pub fn from_owned(owned: OwnedPlate, disposition: Disposition) -> Self {
        Self {
            plate: owned.plate,
            acquisition: owned.acquisition,
            is_keeper: owned.is_keeper,
            is_for_trade: owned.is_for_trade,
            disposition,
        }
    }
}

/// A user-defined grouping of owned items. Membership is stored separately so
/// an item can belong to any number of collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }
}
