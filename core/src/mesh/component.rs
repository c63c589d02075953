//! Per-vertex attribute storage.
//!
//! This module provides:
//! - [`ComponentKind`] - The semantic (and value type) of one attribute column
//! - [`ComponentValue`] - A single attribute value of any supported width
//! - [`AttributeComponent`] - A growable, homogeneous column of attribute values

use crate::error::MeshError;

/// Semantic attribute stored by an [`AttributeComponent`].
///
/// The kind fixes the value type of the column: 2D positions and texture
/// coordinates are two floats, 3D positions and normals three floats,
/// colors four floats (RGBA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentKind {
    /// 2D vertex position (float2).
    Position2,
    /// 3D vertex position (float3).
    Position3,
    /// Vertex normal (float3).
    Normal,
    /// Texture coordinates (float2).
    Uv,
    /// Vertex color, RGBA (float4).
    Color,
}

impl ComponentKind {
    /// All kinds, in declaration order.
    pub const ALL: [ComponentKind; 5] = [
        Self::Position2,
        Self::Position3,
        Self::Normal,
        Self::Uv,
        Self::Color,
    ];

    /// Number of floats per value.
    pub fn component_count(&self) -> u32 {
        match self {
            Self::Position2 | Self::Uv => 2,
            Self::Position3 | Self::Normal => 3,
            Self::Color => 4,
        }
    }

    /// Size in bytes of one value.
    pub fn size(&self) -> usize {
        self.component_count() as usize * std::mem::size_of::<f32>()
    }

    /// Shader input name used when binding a layout built from this kind.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            Self::Position2 | Self::Position3 => "position",
            Self::Normal => "normal",
            Self::Uv => "uv",
            Self::Color => "color",
        }
    }

    /// Whether two kinds describe the same semantic and cannot coexist in one mesh.
    pub fn conflicts_with(&self, other: ComponentKind) -> bool {
        *self != other
            && matches!(
                (self, other),
                (Self::Position2, Self::Position3) | (Self::Position3, Self::Position2)
            )
    }
}

/// A single attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentValue {
    /// Two floats.
    Float2([f32; 2]),
    /// Three floats.
    Float3([f32; 3]),
    /// Four floats.
    Float4([f32; 4]),
}

impl From<[f32; 2]> for ComponentValue {
    fn from(value: [f32; 2]) -> Self {
        Self::Float2(value)
    }
}

impl From<[f32; 3]> for ComponentValue {
    fn from(value: [f32; 3]) -> Self {
        Self::Float3(value)
    }
}

impl From<[f32; 4]> for ComponentValue {
    fn from(value: [f32; 4]) -> Self {
        Self::Float4(value)
    }
}

/// A homogeneous, growable column holding one attribute for every vertex of a mesh.
///
/// The variant is the component kind, so a column can never hold values of
/// the wrong width. Columns only grow: [`set_len`](Self::set_len) pads with
/// zeroes and never truncates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeComponent {
    /// 2D positions.
    Position2(Vec<[f32; 2]>),
    /// 3D positions.
    Position3(Vec<[f32; 3]>),
    /// Normals.
    Normal(Vec<[f32; 3]>),
    /// Texture coordinates.
    Uv(Vec<[f32; 2]>),
    /// RGBA colors.
    Color(Vec<[f32; 4]>),
}

impl AttributeComponent {
    /// Create an empty column for the given kind.
    pub fn new(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Position2 => Self::Position2(Vec::new()),
            ComponentKind::Position3 => Self::Position3(Vec::new()),
            ComponentKind::Normal => Self::Normal(Vec::new()),
            ComponentKind::Uv => Self::Uv(Vec::new()),
            ComponentKind::Color => Self::Color(Vec::new()),
        }
    }

    /// The semantic kind of this column.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Position2(_) => ComponentKind::Position2,
            Self::Position3(_) => ComponentKind::Position3,
            Self::Normal(_) => ComponentKind::Normal,
            Self::Uv(_) => ComponentKind::Uv,
            Self::Color(_) => ComponentKind::Color,
        }
    }

    /// Number of values stored.
    pub fn len(&self) -> usize {
        match self {
            Self::Position2(v) | Self::Uv(v) => v.len(),
            Self::Position3(v) | Self::Normal(v) => v.len(),
            Self::Color(v) => v.len(),
        }
    }

    /// Check if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a value and return its index.
    ///
    /// The value width must match the column kind.
    pub fn push(&mut self, value: impl Into<ComponentValue>) -> Result<usize, MeshError> {
        let index = self.len();
        match (self, value.into()) {
            (Self::Position2(v) | Self::Uv(v), ComponentValue::Float2(x)) => v.push(x),
            (Self::Position3(v) | Self::Normal(v), ComponentValue::Float3(x)) => v.push(x),
            (Self::Color(v), ComponentValue::Float4(x)) => v.push(x),
            (this, value) => {
                return Err(MeshError::ComponentMismatch {
                    expected: this.kind(),
                    found: value_description(&value),
                });
            }
        }
        Ok(index)
    }

    /// Read the value at `index`.
    pub fn get(&self, index: usize) -> Option<ComponentValue> {
        match self {
            Self::Position2(v) | Self::Uv(v) => v.get(index).copied().map(ComponentValue::Float2),
            Self::Position3(v) | Self::Normal(v) => {
                v.get(index).copied().map(ComponentValue::Float3)
            }
            Self::Color(v) => v.get(index).copied().map(ComponentValue::Float4),
        }
    }

    /// Overwrite the value at `index`, growing the column if needed.
    pub fn set(&mut self, index: usize, value: impl Into<ComponentValue>) -> Result<(), MeshError> {
        match (self, value.into()) {
            (Self::Position2(v) | Self::Uv(v), ComponentValue::Float2(x)) => store(v, index, x),
            (Self::Position3(v) | Self::Normal(v), ComponentValue::Float3(x)) => store(v, index, x),
            (Self::Color(v), ComponentValue::Float4(x)) => store(v, index, x),
            (this, value) => {
                return Err(MeshError::ComponentMismatch {
                    expected: this.kind(),
                    found: value_description(&value),
                });
            }
        }
        Ok(())
    }

    /// Copy `count` values starting at `start` from a column of the same kind.
    pub fn extend_from(
        &mut self,
        source: &AttributeComponent,
        start: usize,
        count: usize,
    ) -> Result<(), MeshError> {
        let end = start + count;
        if end > source.len() {
            return Err(MeshError::VertexOutOfRange {
                index: end.saturating_sub(1),
                vertex_count: source.len(),
            });
        }
        match (self, source) {
            (Self::Position2(dst), Self::Position2(src))
            | (Self::Uv(dst), Self::Uv(src)) => dst.extend_from_slice(&src[start..end]),
            (Self::Position3(dst), Self::Position3(src))
            | (Self::Normal(dst), Self::Normal(src)) => dst.extend_from_slice(&src[start..end]),
            (Self::Color(dst), Self::Color(src)) => dst.extend_from_slice(&src[start..end]),
            (this, source) => {
                return Err(MeshError::ComponentMismatch {
                    expected: this.kind(),
                    found: format!("{:?}", source.kind()),
                });
            }
        }
        Ok(())
    }

    /// Grow the column to `len` values, filling new slots with zero. Never truncates.
    pub fn set_len(&mut self, len: usize) {
        if len <= self.len() {
            return;
        }
        match self {
            Self::Position2(v) | Self::Uv(v) => v.resize(len, [0.0; 2]),
            Self::Position3(v) | Self::Normal(v) => v.resize(len, [0.0; 3]),
            Self::Color(v) => v.resize(len, [0.0; 4]),
        }
    }

    /// Create an empty column of the same kind.
    pub fn clone_empty(&self) -> Self {
        Self::new(self.kind())
    }

    /// View the values of a two-float column.
    pub fn as_float2(&self) -> Option<&[[f32; 2]]> {
        match self {
            Self::Position2(v) | Self::Uv(v) => Some(v),
            _ => None,
        }
    }

    /// View the values of a three-float column.
    pub fn as_float3(&self) -> Option<&[[f32; 3]]> {
        match self {
            Self::Position3(v) | Self::Normal(v) => Some(v),
            _ => None,
        }
    }

    /// View the values of a four-float column.
    pub fn as_float4(&self) -> Option<&[[f32; 4]]> {
        match self {
            Self::Color(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to a two-float column.
    pub fn as_float2_mut(&mut self) -> Option<&mut Vec<[f32; 2]>> {
        match self {
            Self::Position2(v) | Self::Uv(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to a three-float column.
    pub fn as_float3_mut(&mut self) -> Option<&mut Vec<[f32; 3]>> {
        match self {
            Self::Position3(v) | Self::Normal(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to a four-float column.
    pub fn as_float4_mut(&mut self) -> Option<&mut Vec<[f32; 4]>> {
        match self {
            Self::Color(v) => Some(v),
            _ => None,
        }
    }

    /// Raw bytes of the column, tightly packed.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Position2(v) | Self::Uv(v) => bytemuck::cast_slice(v),
            Self::Position3(v) | Self::Normal(v) => bytemuck::cast_slice(v),
            Self::Color(v) => bytemuck::cast_slice(v),
        }
    }
}

fn store<T: Copy + Default>(values: &mut Vec<T>, index: usize, value: T) {
    if index >= values.len() {
        values.resize(index + 1, T::default());
    }
    values[index] = value;
}

fn value_description(value: &ComponentValue) -> String {
    match value {
        ComponentValue::Float2(_) => "float2 value".to_string(),
        ComponentValue::Float3(_) => "float3 value".to_string(),
        ComponentValue::Float4(_) => "float4 value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_index() {
        let mut component = AttributeComponent::new(ComponentKind::Position3);
        assert_eq!(component.push([1.0, 2.0, 3.0]).unwrap(), 0);
        assert_eq!(component.push([4.0, 5.0, 6.0]).unwrap(), 1);
        assert_eq!(component.len(), 2);
        assert_eq!(component.get(1), Some(ComponentValue::Float3([4.0, 5.0, 6.0])));
    }

    #[test]
    fn test_push_wrong_width_fails() {
        let mut component = AttributeComponent::new(ComponentKind::Color);
        let err = component.push([1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(
            err,
            MeshError::ComponentMismatch {
                expected: ComponentKind::Color,
                ..
            }
        ));
        assert!(component.is_empty());
    }

    #[test]
    fn test_set_len_grows_with_zero_and_never_truncates() {
        let mut component = AttributeComponent::new(ComponentKind::Uv);
        component.push([0.5, 0.5]).unwrap();
        component.set_len(3);
        assert_eq!(component.as_float2().unwrap(), &[[0.5, 0.5], [0.0, 0.0], [0.0, 0.0]]);

        component.set_len(1);
        assert_eq!(component.len(), 3);
    }

    #[test]
    fn test_set_past_end_grows() {
        let mut component = AttributeComponent::new(ComponentKind::Normal);
        component.set(2, [0.0, 0.0, 1.0]).unwrap();
        assert_eq!(component.len(), 3);
        assert_eq!(component.as_float3().unwrap()[0], [0.0; 3]);
        assert_eq!(component.as_float3().unwrap()[2], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_extend_from_same_kind() {
        let mut source = AttributeComponent::new(ComponentKind::Normal);
        for i in 0..4 {
            source.push([i as f32, 0.0, 0.0]).unwrap();
        }
        let mut dest = source.clone_empty();
        dest.extend_from(&source, 1, 2).unwrap();
        assert_eq!(dest.as_float3().unwrap(), &[[1.0, 0.0, 0.0], [2.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_extend_from_other_kind_fails() {
        // Same width, different semantic.
        let mut source = AttributeComponent::new(ComponentKind::Position3);
        source.push([1.0, 1.0, 1.0]).unwrap();
        let mut dest = AttributeComponent::new(ComponentKind::Normal);
        assert!(dest.extend_from(&source, 0, 1).is_err());
    }

    #[test]
    fn test_extend_from_out_of_range() {
        let source = AttributeComponent::new(ComponentKind::Uv);
        let mut dest = source.clone_empty();
        assert!(matches!(
            dest.extend_from(&source, 0, 1),
            Err(MeshError::VertexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_clone_empty_keeps_kind() {
        let mut component = AttributeComponent::new(ComponentKind::Color);
        component.push([1.0, 1.0, 1.0, 1.0]).unwrap();
        let empty = component.clone_empty();
        assert_eq!(empty.kind(), ComponentKind::Color);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_kind_sizes() {
        assert_eq!(ComponentKind::Position2.size(), 8);
        assert_eq!(ComponentKind::Position3.size(), 12);
        assert_eq!(ComponentKind::Normal.size(), 12);
        assert_eq!(ComponentKind::Uv.size(), 8);
        assert_eq!(ComponentKind::Color.size(), 16);
    }

    #[test]
    fn test_position_kinds_conflict() {
        assert!(ComponentKind::Position2.conflicts_with(ComponentKind::Position3));
        assert!(!ComponentKind::Position3.conflicts_with(ComponentKind::Position3));
        assert!(!ComponentKind::Normal.conflicts_with(ComponentKind::Uv));
    }
}
