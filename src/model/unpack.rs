use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};

use crate::{
    model::TypeModel,
    types::{PrimitiveKind, StructLayout, TypeDesc},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// A decoded value tree. Struct fields keep declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    UInt(u64),
    Float(f64),
    Array(Vec<Value>),
    Struct(Vec<(String, Value)>),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::UInt(n) => serializer.serialize_u64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Struct(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Decode a byte buffer as the named struct, honoring the offsets and
/// padding the model was laid out with.
pub fn unpack(model: &TypeModel, root: &str, data: &[u8], endian: Endian) -> Result<Value, String> {
    let layout = model
        .get(root)
        .ok_or_else(|| format!("unknown struct type: '{}'", root))?;

    if (data.len() as u64) < layout.size {
        return Err(format!(
            "buffer too small for '{}': need {} bytes, got {}",
            root,
            layout.size,
            data.len()
        ));
    }

    unpack_struct(model, layout, data, 0, endian)
}

fn unpack_struct(
    model: &TypeModel,
    layout: &StructLayout,
    data: &[u8],
    base: u64,
    endian: Endian,
) -> Result<Value, String> {
    let mut fields = Vec::with_capacity(layout.fields.len());

    for field in &layout.fields {
        let value = unpack_type(model, &field.ty, data, base + field.offset, endian)?;
        fields.push((field.name.clone(), value));
    }

    Ok(Value::Struct(fields))
}

fn unpack_type(
    model: &TypeModel,
    ty: &TypeDesc,
    data: &[u8],
    offset: u64,
    endian: Endian,
) -> Result<Value, String> {
    match ty {
        TypeDesc::Primitive { name, size, .. } => {
            unpack_scalar(model, *name, *size, data, offset, endian)
        }

        // Row-major: peel the outermost dimension, elements of the
        // remaining shape are contiguous.
        TypeDesc::Array { elem, dims, size, .. } => {
            let (outer, rest) = dims.split_first().expect("array with no dimensions");
            let stride = size / outer;

            let mut items = Vec::with_capacity(*outer as usize);
            for i in 0..*outer {
                let at = offset + i * stride;
                let value = if rest.is_empty() {
                    unpack_type(model, elem, data, at, endian)?
                } else {
                    let inner = TypeDesc::Array {
                        elem: elem.clone(),
                        dims: rest.to_vec(),
                        size: stride,
                        align: elem.align(),
                    };
                    unpack_type(model, &inner, data, at, endian)?
                };
                items.push(value);
            }

            Ok(Value::Array(items))
        }

        TypeDesc::Struct { name, .. } => {
            // Model invariant: struct references point at registered types
            let layout = model
                .get(name)
                .ok_or_else(|| format!("model references unknown struct '{}'", name))?;
            unpack_struct(model, layout, data, offset, endian)
        }
    }
}

fn unpack_scalar(
    model: &TypeModel,
    kind: PrimitiveKind,
    size: u64,
    data: &[u8],
    offset: u64,
    endian: Endian,
) -> Result<Value, String> {
    let start = offset as usize;
    let end = start + size as usize;
    if end > data.len() {
        return Err(format!(
            "buffer too small: read of {} bytes at offset {} past end ({})",
            size,
            offset,
            data.len()
        ));
    }

    let bytes = &data[start..end];

    // Assemble the raw bits in the requested byte order
    let mut raw: u64 = 0;
    match endian {
        Endian::Little => {
            for (i, b) in bytes.iter().enumerate() {
                raw |= (*b as u64) << (8 * i);
            }
        }
        Endian::Big => {
            for b in bytes {
                raw = (raw << 8) | *b as u64;
            }
        }
    }

    if kind.is_float() {
        let value = if size == 4 {
            f32::from_bits(raw as u32) as f64
        } else {
            f64::from_bits(raw)
        };
        return Ok(Value::Float(value));
    }

    if kind.is_signed(&model.profile) {
        // Sign-extend from the value's width
        let shift = 64 - 8 * size as u32;
        let value = ((raw << shift) as i64) >> shift;
        Ok(Value::Int(value))
    } else {
        Ok(Value::UInt(raw))
    }
}
