use std::fmt;

use serde::Serialize;

use crate::types::PrimitiveKind;

/// A fully resolved field type. Closed variant set: every consumer
/// (layout, printer, unpacker) matches exhaustively so a new kind is a
/// compile-time-checked change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeDesc {
    Primitive {
        name: PrimitiveKind,
        size: u64,
        align: u64,
    },
    Array {
        elem: Box<TypeDesc>,
        /// Outermost dimension first, rightmost varies fastest (row-major).
        dims: Vec<u64>,
        size: u64,
        align: u64,
    },
    /// Reference to an already-finalized struct in the registry. Size and
    /// alignment are copied at resolve time, which is sound because the
    /// registry only hands out finalized entries.
    Struct { name: String, size: u64, align: u64 },
}

impl TypeDesc {
    pub fn size(&self) -> u64 {
        match self {
            TypeDesc::Primitive { size, .. } => *size,
            TypeDesc::Array { size, .. } => *size,
            TypeDesc::Struct { size, .. } => *size,
        }
    }

    pub fn align(&self) -> u64 {
        match self {
            TypeDesc::Primitive { align, .. } => *align,
            TypeDesc::Array { align, .. } => *align,
            TypeDesc::Struct { align, .. } => *align,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Primitive { name, .. } => write!(f, "{}", name),
            TypeDesc::Array { elem, dims, .. } => {
                write!(f, "{}", elem)?;
                for d in dims {
                    write!(f, "[{}]", d)?;
                }
                Ok(())
            }
            TypeDesc::Struct { name, .. } => write!(f, "{}", name),
        }
    }
}

/// Wrap an element type in an array. Size is multiplicative over all
/// dimensions, alignment is the element's. None if the byte size does
/// not fit in u64.
pub fn array_of(elem: TypeDesc, dims: Vec<u64>) -> Option<TypeDesc> {
    assert!(!dims.is_empty(), "array must have at least one dimension");

    let count = dims.iter().try_fold(1u64, |acc, d| acc.checked_mul(*d))?;
    let size = elem.size().checked_mul(count)?;

    Some(TypeDesc::Array {
        size,
        align: elem.align(),
        elem: Box::new(elem),
        dims,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldLayout {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDesc,
    /// Byte offset from the start of the enclosing struct.
    pub offset: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructLayout {
    pub name: String,
    pub fields: Vec<FieldLayout>,
    pub size: u64,
    pub align: u64,
}

impl StructLayout {
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Round n up to the nearest multiple of align. None if the result
/// does not fit in u64.
pub fn align_up(n: u64, align: u64) -> Option<u64> {
    assert!(align > 0, "alignment must be positive");
    n.checked_next_multiple_of(align)
}

/// Lay out a struct from its resolved fields, in declaration order.
/// Every field offset lands on a multiple of the field alignment, the
/// struct alignment is the max field alignment, and the struct size is
/// padded to a multiple of its alignment. None if the total size
/// overflows.
pub fn lay_out(name: &str, fields: Vec<(String, TypeDesc)>) -> Option<StructLayout> {
    let mut cursor = 0u64;
    let mut align = 1u64;
    let mut laid = Vec::with_capacity(fields.len());

    for (fname, ty) in fields {
        let offset = align_up(cursor, ty.align())?;
        cursor = offset.checked_add(ty.size())?;
        align = align.max(ty.align());

        laid.push(FieldLayout {
            name: fname,
            ty,
            offset,
        });
    }

    Some(StructLayout {
        name: name.to_owned(),
        fields: laid,
        size: align_up(cursor, align)?,
        align,
    })
}
