//! Type descriptors for the IR.
//!
//! [`TypeRef`] is the closed set of shapes a schema node can resolve to.
//! Consumers match on it exhaustively; there is no open extension point.

use std::fmt;

use serde::Serialize;

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrimitiveType {
    /// Text, whatever the `format`.
    String,
    /// 32-bit integer.
    Int,
    /// 64-bit integer (`format: int64`).
    Long,
    /// 64-bit float.
    Double,
    /// 32-bit float (`format: float`).
    Float,
    /// True or false.
    Boolean,
}

impl PrimitiveType {
    /// Type name as rendered in `Display`.
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::String => "String",
            PrimitiveType::Int => "Int",
            PrimitiveType::Long => "Long",
            PrimitiveType::Double => "Double",
            PrimitiveType::Float => "Float",
            PrimitiveType::Boolean => "Boolean",
        }
    }
}

/// Reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    /// Scalar: `String`, `Int`, ...
    Primitive { name: PrimitiveType },
    /// Homogeneous ordered sequence.
    List { item: Box<TypeRef> },
    /// Named model, resolved by name only. May dangle.
    Reference { name: String },
    /// Shape that cannot be determined statically.
    JsonElement,
    /// No body.
    Unit,
}

impl TypeRef {
    pub fn primitive(name: PrimitiveType) -> Self {
        TypeRef::Primitive { name }
    }

    pub fn list(item: TypeRef) -> Self {
        TypeRef::List {
            item: Box::new(item),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeRef::Reference { name: name.into() }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive { name } => f.write_str(name.as_str()),
            TypeRef::List { item } => write!(f, "List<{item}>"),
            TypeRef::Reference { name } => f.write_str(name),
            TypeRef::JsonElement => f.write_str("JsonElement"),
            TypeRef::Unit => f.write_str("Unit"),
        }
    }
}
