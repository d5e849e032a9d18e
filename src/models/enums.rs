use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
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
    };
}

str_enum!(Severity {
    Mild => "mild",
    Moderate => "moderate",
    Serious => "serious",
});

str_enum!(AuthStatus {
    Success => "success",
    Error => "error",
});

impl Severity {
    /// Lenient classification of a free-text severity label.
    /// Unrecognised labels are treated as mild.
    pub fn classify(label: &str) -> Self {
        label
            .trim()
            .to_lowercase()
            .parse()
            .unwrap_or(Severity::Mild)
    }

    pub fn is_serious(&self) -> bool {
        matches!(self, Severity::Serious)
    }
}
