use serde::{Deserialize, Serialize};

/// Integer tag carried by every edge.
pub type RelationId = u32;

/// The five relations assembled from the raw interaction tables.
///
/// Ids follow construction order and downstream consumers depend on them, so
/// the discriminants must never be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Ini = 0,
    Ptc = 1,
    Trust = 2,
    IniInverse = 3,
    PtcInverse = 4,
}

impl Relation {
    pub const CONSTRUCTION_ORDER: [Relation; 5] = [
        Relation::Ini,
        Relation::Ptc,
        Relation::Trust,
        Relation::IniInverse,
        Relation::PtcInverse,
    ];

    pub fn id(self) -> RelationId {
        self as RelationId
    }

    pub fn from_id(id: RelationId) -> Option<Self> {
        Self::CONSTRUCTION_ORDER.get(id as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Relation::Ini => "ini",
            Relation::Ptc => "ptc",
            Relation::Trust => "trust",
            Relation::IniInverse => "ini_inverse",
            Relation::PtcInverse => "ptc_inverse",
        }
    }

    /// Trust is registered once and has no inverse counterpart.
    pub fn inverse(self) -> Option<Self> {
        match self {
            Relation::Ini => Some(Relation::IniInverse),
            Relation::Ptc => Some(Relation::PtcInverse),
            Relation::IniInverse => Some(Relation::Ini),
            Relation::PtcInverse => Some(Relation::Ptc),
            Relation::Trust => None,
        }
    }

    pub fn is_inverse(self) -> bool {
        matches!(self, Relation::IniInverse | Relation::PtcInverse)
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Degree normalization applied to each relation matrix.
///
/// Parsed leniently: `"bi"` and `"ngcf"` select the two-sided scheme, anything
/// else falls back to single-side normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdjType {
    Bi,
    Ngcf,
    #[default]
    Si,
}

impl AdjType {
    pub fn is_bi_normalized(self) -> bool {
        matches!(self, AdjType::Bi | AdjType::Ngcf)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AdjType::Bi => "bi",
            AdjType::Ngcf => "ngcf",
            AdjType::Si => "si",
        }
    }
}

impl From<&str> for AdjType {
    fn from(value: &str) -> Self {
        match value {
            "bi" => AdjType::Bi,
            "ngcf" => AdjType::Ngcf,
            _ => AdjType::Si,
        }
    }
}

impl From<String> for AdjType {
    fn from(value: String) -> Self {
        AdjType::from(value.as_str())
    }
}

impl From<AdjType> for String {
    fn from(value: AdjType) -> Self {
        value.as_str().to_string()
    }
}
