use std::fmt;

use serde::{Serialize, Serializer};
use strum_macros::EnumIter;

use crate::config::AbiProfile;

/// The closed set of supported primitive C types. Sizing is resolved
/// against an AbiProfile, never hardcoded at use sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PrimitiveKind {
    Char,
    SChar,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Float,
    Double,
    LongDouble,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    IntPtr,
    UIntPtr,
}

impl PrimitiveKind {
    pub fn size(&self, profile: &AbiProfile) -> u64 {
        use PrimitiveKind::*;
        match self {
            Char | SChar | UChar | I8 | U8 => 1,
            Short | UShort | I16 | U16 => 2,
            Int | UInt | I32 | U32 | Float => 4,
            Long | ULong => profile.long_width as u64,
            LongLong | ULongLong | I64 | U64 | Double | LongDouble => 8,
            IntPtr | UIntPtr => (profile.pointer_width / 8) as u64,
        }
    }

    /// Natural alignment: every primitive aligns to its own size.
    pub fn align(&self, profile: &AbiProfile) -> u64 {
        self.size(profile)
    }

    pub fn is_float(&self) -> bool {
        use PrimitiveKind::*;
        matches!(self, Float | Double | LongDouble)
    }

    pub fn is_signed(&self, profile: &AbiProfile) -> bool {
        use PrimitiveKind::*;
        match self {
            Char => profile.char_signed,
            SChar | Short | Int | Long | LongLong | I8 | I16 | I32 | I64 | IntPtr => true,
            _ => false,
        }
    }

    /// Canonical C spelling.
    pub fn name(&self) -> &'static str {
        use PrimitiveKind::*;
        match self {
            Char => "char",
            SChar => "signed char",
            UChar => "unsigned char",
            Short => "short",
            UShort => "unsigned short",
            Int => "int",
            UInt => "unsigned int",
            Long => "long",
            ULong => "unsigned long",
            LongLong => "long long",
            ULongLong => "unsigned long long",
            Float => "float",
            Double => "double",
            LongDouble => "long double",
            I8 => "int8_t",
            U8 => "uint8_t",
            I16 => "int16_t",
            U16 => "uint16_t",
            I32 => "int32_t",
            U32 => "uint32_t",
            I64 => "int64_t",
            U64 => "uint64_t",
            IntPtr => "intptr_t",
            UIntPtr => "uintptr_t",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for PrimitiveKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Accepted spellings, including stdint.h aliases. The least/fast/max
/// families map onto the fixed-width kinds they are guaranteed to hold.
static SPELLINGS: &[(&str, PrimitiveKind)] = &[
    ("char", PrimitiveKind::Char),
    ("signed char", PrimitiveKind::SChar),
    ("unsigned char", PrimitiveKind::UChar),
    ("short", PrimitiveKind::Short),
    ("short int", PrimitiveKind::Short),
    ("signed short", PrimitiveKind::Short),
    ("unsigned short", PrimitiveKind::UShort),
    ("unsigned short int", PrimitiveKind::UShort),
    ("int", PrimitiveKind::Int),
    ("signed", PrimitiveKind::Int),
    ("signed int", PrimitiveKind::Int),
    ("unsigned", PrimitiveKind::UInt),
    ("unsigned int", PrimitiveKind::UInt),
    ("long", PrimitiveKind::Long),
    ("long int", PrimitiveKind::Long),
    ("unsigned long", PrimitiveKind::ULong),
    ("unsigned long int", PrimitiveKind::ULong),
    ("long long", PrimitiveKind::LongLong),
    ("long long int", PrimitiveKind::LongLong),
    ("unsigned long long", PrimitiveKind::ULongLong),
    ("unsigned long long int", PrimitiveKind::ULongLong),
    ("float", PrimitiveKind::Float),
    ("double", PrimitiveKind::Double),
    ("long double", PrimitiveKind::LongDouble),
    // stdint.h fixed-width types
    ("int8_t", PrimitiveKind::I8),
    ("uint8_t", PrimitiveKind::U8),
    ("int16_t", PrimitiveKind::I16),
    ("uint16_t", PrimitiveKind::U16),
    ("int32_t", PrimitiveKind::I32),
    ("uint32_t", PrimitiveKind::U32),
    ("int64_t", PrimitiveKind::I64),
    ("uint64_t", PrimitiveKind::U64),
    // stdint.h minimum-width types
    ("int_least8_t", PrimitiveKind::I8),
    ("uint_least8_t", PrimitiveKind::U8),
    ("int_least16_t", PrimitiveKind::I16),
    ("uint_least16_t", PrimitiveKind::U16),
    ("int_least32_t", PrimitiveKind::I32),
    ("uint_least32_t", PrimitiveKind::U32),
    ("int_least64_t", PrimitiveKind::I64),
    ("uint_least64_t", PrimitiveKind::U64),
    // stdint.h fast types
    ("int_fast8_t", PrimitiveKind::I8),
    ("uint_fast8_t", PrimitiveKind::U8),
    ("int_fast16_t", PrimitiveKind::I16),
    ("uint_fast16_t", PrimitiveKind::U16),
    ("int_fast32_t", PrimitiveKind::I32),
    ("uint_fast32_t", PrimitiveKind::U32),
    ("int_fast64_t", PrimitiveKind::I64),
    ("uint_fast64_t", PrimitiveKind::U64),
    // stdint.h pointer and maximum-width types
    ("intptr_t", PrimitiveKind::IntPtr),
    ("uintptr_t", PrimitiveKind::UIntPtr),
    ("intmax_t", PrimitiveKind::I64),
    ("uintmax_t", PrimitiveKind::U64),
];

pub fn primitive_from_name(name: &str) -> Option<PrimitiveKind> {
    SPELLINGS.iter().find(|(s, _)| *s == name).map(|(_, k)| *k)
}
