use serde::{Deserialize, Serialize};

/// Primitive type sizing for a target platform. Everything not covered
/// by a field here uses its natural size on every supported target
/// (char 1, short 2, int 4, float 4, double 8, fixed-width per bit
/// width).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AbiProfile {
    /// Width of pointer-sized integers in bits (32 or 64)
    pub pointer_width: u32,
    /// Size of long and unsigned long in bytes (4 or 8)
    pub long_width: u32,
    /// Whether plain 'char' is a signed type
    pub char_signed: bool,
}

impl Default for AbiProfile {
    fn default() -> Self {
        Self::lp64()
    }
}

impl AbiProfile {
    /// 64-bit Unix target: 8-byte long, 8-byte pointers.
    pub fn lp64() -> Self {
        Self {
            pointer_width: 64,
            long_width: 8,
            char_signed: true,
        }
    }

    /// 32-bit target: 4-byte long, 4-byte pointers.
    pub fn ilp32() -> Self {
        Self {
            pointer_width: 32,
            long_width: 4,
            char_signed: true,
        }
    }

    /// Load a profile from TOML text, eg. a `profile.toml` next to the
    /// headers being parsed. Missing keys fall back to the lp64 default.
    pub fn from_toml(text: &str) -> Result<Self, String> {
        let profile: AbiProfile = toml::from_str(text).map_err(|e| e.to_string())?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.pointer_width, 32 | 64) {
            return Err(format!(
                "invalid pointer width: {} (expected 32 or 64)",
                self.pointer_width
            ));
        }

        if !matches!(self.long_width, 4 | 8) {
            return Err(format!(
                "invalid long width: {} (expected 4 or 8)",
                self.long_width
            ));
        }

        Ok(())
    }
}
