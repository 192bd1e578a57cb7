use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde goes through the same strings so the UI bridge sees what the log table stores.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(ResinCode {
    Pet => "1",
    Hdpe => "2",
    Pvc => "3",
    Ldpe => "4",
    Pp => "5",
    Ps => "6",
    Other => "7",
});

impl ResinCode {
    /// All seven codes in numeric order.
    pub const ALL: [ResinCode; 7] = [
        Self::Pet,
        Self::Hdpe,
        Self::Pvc,
        Self::Ldpe,
        Self::Pp,
        Self::Ps,
        Self::Other,
    ];

    /// The digit printed inside the recycling triangle.
    pub fn digit(&self) -> u8 {
        match self {
            Self::Pet => 1,
            Self::Hdpe => 2,
            Self::Pvc => 3,
            Self::Ldpe => 4,
            Self::Pp => 5,
            Self::Ps => 6,
            Self::Other => 7,
        }
    }

    pub fn from_digit(digit: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.digit() == digit)
    }

    /// Map a single ASCII digit character ('1'..='7').
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Self::from_digit)
    }
}

str_enum!(BinType {
    RecyclingBin => "Recycling Bin",
    GeneralWaste => "General Waste",
    SpecialCollection => "Special Collection",
    HazardousWaste => "Hazardous Waste",
});

str_enum!(Recyclability {
    EasilyRecyclable => "Easily Recyclable",
    SpecialCollectionRequired => "Special Collection Required",
    NotRecyclable => "Not Recyclable",
    Unknown => "Unknown",
});

str_enum!(DetectionMethod {
    TextRecognition => "text-recognition",
    FallbackSimulation => "fallback-simulation",
});

str_enum!(LogFilter {
    All => "All",
    Today => "Today",
    ThisWeek => "This Week",
    Recyclable => "Recyclable",
    NonRecyclable => "Non-Recyclable",
});

impl Default for LogFilter {
    fn default() -> Self {
        Self::All
    }
}
