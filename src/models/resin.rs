use std::sync::{Arc, LazyLock};

use serde::Serialize;

use super::enums::{BinType, Recyclability, ResinCode};

/// Static facts about one plastic resin code.
#[derive(Debug, Clone, Serialize)]
pub struct ResinCodeInfo {
    pub code: ResinCode,
    pub name: &'static str,
    pub full_name: &'static str,
    pub material: &'static str,
    pub bin_type: BinType,
    pub recyclable: bool,
    pub common_uses: &'static [&'static str],
    pub recycled_into: &'static [&'static str],
    pub tips: &'static [&'static str],
    pub description: &'static str,
    /// Display color (hex) used by the UI for this code.
    pub color: &'static str,
}

impl ResinCodeInfo {
    /// "PET (Polyethylene Terephthalate)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.full_name)
    }
}

/// Read-only handle to the resin records. Clones share the same table.
#[derive(Debug, Clone)]
pub struct ResinCatalog {
    records: Arc<[ResinCodeInfo]>,
}

static STANDARD_CATALOG: LazyLock<ResinCatalog> = LazyLock::new(|| ResinCatalog {
    records: Arc::from(standard_records()),
});

impl ResinCatalog {
    /// The seven standard resin records.
    pub fn standard() -> Self {
        STANDARD_CATALOG.clone()
    }

    pub fn get(&self, code: ResinCode) -> Option<&ResinCodeInfo> {
        self.records.iter().find(|r| r.code == code)
    }

    /// Lookup by the string form used in logs and the UI ("1".."7").
    pub fn get_by_str(&self, code: &str) -> Option<&ResinCodeInfo> {
        code.trim().parse::<ResinCode>().ok().and_then(|c| self.get(c))
    }

    pub fn all(&self) -> &[ResinCodeInfo] {
        &self.records
    }

    pub fn recyclability(&self, code: ResinCode) -> Recyclability {
        match self.get(code) {
            Some(info) => recyclability_of(info),
            None => Recyclability::Unknown,
        }
    }
}

impl Default for ResinCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn get_resin_code_info(code: ResinCode) -> Option<&'static ResinCodeInfo> {
    STANDARD_CATALOG.get(code)
}

pub fn get_all_resin_code_info() -> &'static [ResinCodeInfo] {
    STANDARD_CATALOG.all()
}

/// Recyclability status shown next to a detected code.
pub fn recyclability_status(code: &str) -> Recyclability {
    match STANDARD_CATALOG.get_by_str(code) {
        Some(info) => recyclability_of(info),
        None => Recyclability::Unknown,
    }
}

fn recyclability_of(info: &ResinCodeInfo) -> Recyclability {
    match (info.recyclable, info.bin_type) {
        (true, BinType::RecyclingBin) => Recyclability::EasilyRecyclable,
        (true, BinType::SpecialCollection) => Recyclability::SpecialCollectionRequired,
        _ => Recyclability::NotRecyclable,
    }
}

/// Fallback grey for bins the palette does not know.
pub const DEFAULT_BIN_COLOR: &str = "#757575";

pub fn bin_type_color(bin_type: BinType) -> &'static str {
    match bin_type {
        BinType::RecyclingBin => "#4CAF50",
        BinType::GeneralWaste => DEFAULT_BIN_COLOR,
        BinType::SpecialCollection => "#FF9800",
        BinType::HazardousWaste => "#F44336",
    }
}

/// Color for a bin label coming back from storage, which may be free text.
pub fn bin_label_color(label: &str) -> &'static str {
    label
        .parse::<BinType>()
        .map(bin_type_color)
        .unwrap_or(DEFAULT_BIN_COLOR)
}

fn standard_records() -> Vec<ResinCodeInfo> {
    vec![
        ResinCodeInfo {
            code: ResinCode::Pet,
            name: "PET",
            full_name: "Polyethylene Terephthalate",
            material: "Plastic",
            bin_type: BinType::RecyclingBin,
            recyclable: true,
            common_uses: &[
                "Water bottles",
                "Soft drink bottles",
                "Food containers",
                "Microwaveable food trays",
            ],
            recycled_into: &[
                "New bottles",
                "Clothing fibers",
                "Carpeting",
                "Furniture stuffing",
            ],
            tips: &[
                "Remove caps and lids",
                "Rinse clean",
                "Crush to save space",
                "Do not reuse for food storage",
            ],
            description: "Most commonly recycled plastic. Clear, lightweight, and safe for single use.",
            color: "#4CAF50",
        },
        ResinCodeInfo {
            code: ResinCode::Hdpe,
            name: "HDPE",
            full_name: "High-Density Polyethylene",
            material: "Plastic",
            bin_type: BinType::RecyclingBin,
            recyclable: true,
            common_uses: &[
                "Milk jugs",
                "Detergent bottles",
                "Yogurt containers",
                "Butter tubs",
            ],
            recycled_into: &[
                "New containers",
                "Plastic lumber",
                "Playground equipment",
                "Trash cans",
            ],
            tips: &[
                "Remove labels if possible",
                "Rinse thoroughly",
                "Keep caps on",
                "Safe to reuse",
            ],
            description: "Very safe and commonly recycled. Often translucent white or colored.",
            color: "#2196F3",
        },
        ResinCodeInfo {
            code: ResinCode::Pvc,
            name: "PVC",
            full_name: "Polyvinyl Chloride",
            material: "Plastic",
            bin_type: BinType::GeneralWaste,
            recyclable: false,
            common_uses: &[
                "Plumbing pipes",
                "Credit cards",
                "Vinyl siding",
                "Medical tubing",
            ],
            recycled_into: &["Limited recycling options", "Industrial applications only"],
            tips: &[
                "Usually not accepted in curbside recycling",
                "Check local hazardous waste programs",
                "Avoid heating",
                "Contains chlorine compounds",
            ],
            description: "Rarely recycled due to toxic additives. Avoid when possible.",
            color: "#FF9800",
        },
        ResinCodeInfo {
            code: ResinCode::Ldpe,
            name: "LDPE",
            full_name: "Low-Density Polyethylene",
            material: "Plastic",
            bin_type: BinType::SpecialCollection,
            recyclable: true,
            common_uses: &[
                "Plastic bags",
                "Food wraps",
                "Squeezable bottles",
                "Bread bags",
            ],
            recycled_into: &[
                "New plastic bags",
                "Trash can liners",
                "Floor tiles",
                "Furniture",
            ],
            tips: &[
                "Take bags to store collection bins",
                "Not accepted in curbside recycling",
                "Bundle together",
                "Keep dry and clean",
            ],
            description: "Flexible plastic - take to special collection points at stores.",
            color: "#9C27B0",
        },
        ResinCodeInfo {
            code: ResinCode::Pp,
            name: "PP",
            full_name: "Polypropylene",
            material: "Plastic",
            bin_type: BinType::RecyclingBin,
            recyclable: true,
            common_uses: &[
                "Yogurt containers",
                "Medicine bottles",
                "Bottle caps",
                "Straws",
            ],
            recycled_into: &[
                "Auto parts",
                "Industrial fibers",
                "Food containers",
                "Rakes and scrapers",
            ],
            tips: &[
                "Increasingly accepted in recycling",
                "Heat resistant",
                "Safe for food contact",
                "Remove any non-PP components",
            ],
            description: "Growing acceptance in recycling programs. Heat resistant and safe.",
            color: "#FF5722",
        },
        ResinCodeInfo {
            code: ResinCode::Ps,
            name: "PS",
            full_name: "Polystyrene",
            material: "Plastic",
            bin_type: BinType::GeneralWaste,
            recyclable: false,
            common_uses: &[
                "Styrofoam cups",
                "Take-out containers",
                "Disposable plates",
                "Packing peanuts",
            ],
            recycled_into: &["Very limited recycling", "Some specialty programs exist"],
            tips: &[
                "Avoid when possible",
                "Not accepted in most programs",
                "Breaks into small pieces easily",
                "Can leach chemicals",
            ],
            description: "Difficult to recycle and potentially harmful. Avoid disposable forms.",
            color: "#F44336",
        },
        ResinCodeInfo {
            code: ResinCode::Other,
            name: "OTHER",
            full_name: "Other Plastics",
            material: "Mixed Plastic",
            bin_type: BinType::GeneralWaste,
            recyclable: false,
            common_uses: &[
                "Large containers",
                "Multi-layer packaging",
                "Mixed materials",
                "Some bottles",
            ],
            recycled_into: &["Very limited options", "Specialty processing required"],
            tips: &[
                "Usually not recyclable",
                "May contain BPA",
                "Check manufacturer for options",
                "Avoid heating",
            ],
            description: "Catch-all category - usually not recyclable through standard programs.",
            color: "#607D8B",
        },
    ]
}
