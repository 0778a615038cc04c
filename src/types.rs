//! Type-safe domain enums for phonequote
//!
//! Check identifiers, condition statuses and product generations are proper
//! Rust enums instead of strings and booleans, so the polarity of every
//! condition flag is explicit at compile time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Product generation of a device model.
///
/// `X` groups the X, XS, XS Max and XR. The 16e belongs to `Sixteen`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum Generation {
    #[serde(rename = "X")]
    #[strum(serialize = "X")]
    X,
    #[serde(rename = "11")]
    #[strum(serialize = "11")]
    Eleven,
    #[serde(rename = "12")]
    #[strum(serialize = "12")]
    Twelve,
    #[serde(rename = "13")]
    #[strum(serialize = "13")]
    Thirteen,
    #[serde(rename = "14")]
    #[strum(serialize = "14")]
    Fourteen,
    #[serde(rename = "15")]
    #[strum(serialize = "15")]
    Fifteen,
    #[serde(rename = "16")]
    #[strum(serialize = "16")]
    Sixteen,
    #[serde(rename = "17")]
    #[strum(serialize = "17")]
    Seventeen,
}

/// Which half of the checklist a check belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CheckCategory {
    Functional,
    Cosmetic,
}

/// Functional checklist items. Failure means broken hardware or feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FunctionalCheck {
    /// Face ID / Touch ID. Handled by the biometric override, never as a
    /// percentage penalty.
    FaceId,
    Speaker,
    FrontCamera,
    BackCamera,
    Cellular,
    DisplayFunctional,
    SimReader,
    ChargingPort,
    Wifi,
    Bluetooth,
}

/// Cosmetic checklist items. Presence means a visible defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CosmeticCheck {
    ScreenCracked,
    FrontWear,
    BackWear,
    /// Rear shell cracked. Kept as the last variant: its flat deduction on
    /// recent generations is applied after every percentage penalty.
    BackCracked,
}

/// Common surface of the two check-id enums.
pub trait CheckKind: Copy + Ord + std::fmt::Display + IntoEnumIterator {
    const CATEGORY: CheckCategory;
}

impl CheckKind for FunctionalCheck {
    const CATEGORY: CheckCategory = CheckCategory::Functional;
}

impl CheckKind for CosmeticCheck {
    const CATEGORY: CheckCategory = CheckCategory::Cosmetic;
}

/// State of a functional check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FunctionalStatus {
    #[default]
    Working,
    Broken,
}

impl FunctionalStatus {
    pub fn is_broken(self) -> bool {
        self == Self::Broken
    }
}

/// `true` means working.
impl From<bool> for FunctionalStatus {
    fn from(working: bool) -> Self {
        if working { Self::Working } else { Self::Broken }
    }
}

/// State of a cosmetic check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CosmeticStatus {
    #[default]
    Clean,
    Defective,
}

impl CosmeticStatus {
    pub fn is_defective(self) -> bool {
        self == Self::Defective
    }
}

/// `true` means the defect is present.
impl From<bool> for CosmeticStatus {
    fn from(defect_present: bool) -> Self {
        if defect_present { Self::Defective } else { Self::Clean }
    }
}
