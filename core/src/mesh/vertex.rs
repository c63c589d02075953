//! Interleaved output vertex structs.
//!
//! Lowering writes one of four fixed `#[repr(C)]` structs. The set is closed:
//! [`DestinationVertexKind`] names every member, and every dispatch over it is
//! an exhaustive `match`.

use std::fmt::Write as _;

use crate::buffer::Buffer1D;
use crate::error::MeshError;

use super::capability::{
    Capabilities, HasColor, HasNormal, HasPosition2, HasPosition3, HasUv, VertexFormat,
};
use super::component::{ComponentKind, ComponentValue};
use super::layout::VertexLayoutDefinition;
use super::view::AttributeSlices;

/// A concrete interleaved vertex that can be read out of (and written into)
/// a mesh's attribute columns.
pub trait VertexStruct: VertexFormat + bytemuck::Pod {
    /// Closed-set tag of this struct.
    const KIND: DestinationVertexKind;

    /// Gather the fields of vertex `index` from attribute columns.
    fn read(slices: &AttributeSlices<'_>, index: usize) -> Self;

    /// Field values paired with the component they belong to.
    fn attribute_values(&self) -> impl Iterator<Item = (ComponentKind, ComponentValue)>;
}

/// Position, normal and texture coordinates (32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PositionNormalUv {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

/// Position, normal and color (40 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PositionNormalColor {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Linear RGBA color.
    pub color: [f32; 4],
}

/// Position and color (28 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PositionColor {
    /// Object-space position.
    pub position: [f32; 3],
    /// Linear RGBA color.
    pub color: [f32; 4],
}

/// 2D position and texture coordinates (16 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Position2Uv {
    /// 2D position.
    pub position: [f32; 2],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

static_assertions::const_assert_eq!(std::mem::size_of::<PositionNormalUv>(), 32);
static_assertions::const_assert_eq!(std::mem::size_of::<PositionNormalColor>(), 40);
static_assertions::const_assert_eq!(std::mem::size_of::<PositionColor>(), 28);
static_assertions::const_assert_eq!(std::mem::size_of::<Position2Uv>(), 16);

impl VertexFormat for PositionNormalUv {
    const COMPONENTS: &'static [ComponentKind] =
        &[ComponentKind::Position3, ComponentKind::Normal, ComponentKind::Uv];
}
impl HasPosition3 for PositionNormalUv {}
impl HasNormal for PositionNormalUv {}
impl HasUv for PositionNormalUv {}

impl VertexStruct for PositionNormalUv {
    const KIND: DestinationVertexKind = DestinationVertexKind::PositionNormalUv;

    fn read(slices: &AttributeSlices<'_>, index: usize) -> Self {
        Self {
            position: slices.position3_at(index),
            normal: slices.normal_at(index),
            uv: slices.uv_at(index),
        }
    }

    fn attribute_values(&self) -> impl Iterator<Item = (ComponentKind, ComponentValue)> {
        [
            (ComponentKind::Position3, self.position.into()),
            (ComponentKind::Normal, self.normal.into()),
            (ComponentKind::Uv, self.uv.into()),
        ]
        .into_iter()
    }
}

impl VertexFormat for PositionNormalColor {
    const COMPONENTS: &'static [ComponentKind] = &[
        ComponentKind::Position3,
        ComponentKind::Normal,
        ComponentKind::Color,
    ];
}
impl HasPosition3 for PositionNormalColor {}
impl HasNormal for PositionNormalColor {}
impl HasColor for PositionNormalColor {}

impl VertexStruct for PositionNormalColor {
    const KIND: DestinationVertexKind = DestinationVertexKind::PositionNormalColor;

    fn read(slices: &AttributeSlices<'_>, index: usize) -> Self {
        Self {
            position: slices.position3_at(index),
            normal: slices.normal_at(index),
            color: slices.color_at(index),
        }
    }

    fn attribute_values(&self) -> impl Iterator<Item = (ComponentKind, ComponentValue)> {
        [
            (ComponentKind::Position3, self.position.into()),
            (ComponentKind::Normal, self.normal.into()),
            (ComponentKind::Color, self.color.into()),
        ]
        .into_iter()
    }
}

impl VertexFormat for PositionColor {
    const COMPONENTS: &'static [ComponentKind] = &[ComponentKind::Position3, ComponentKind::Color];
}
impl HasPosition3 for PositionColor {}
impl HasColor for PositionColor {}

impl VertexStruct for PositionColor {
    const KIND: DestinationVertexKind = DestinationVertexKind::PositionColor;

    fn read(slices: &AttributeSlices<'_>, index: usize) -> Self {
        Self {
            position: slices.position3_at(index),
            color: slices.color_at(index),
        }
    }

    fn attribute_values(&self) -> impl Iterator<Item = (ComponentKind, ComponentValue)> {
        [
            (ComponentKind::Position3, self.position.into()),
            (ComponentKind::Color, self.color.into()),
        ]
        .into_iter()
    }
}

impl VertexFormat for Position2Uv {
    const COMPONENTS: &'static [ComponentKind] = &[ComponentKind::Position2, ComponentKind::Uv];
}
impl HasPosition2 for Position2Uv {}
impl HasUv for Position2Uv {}

impl VertexStruct for Position2Uv {
    const KIND: DestinationVertexKind = DestinationVertexKind::Position2Uv;

    fn read(slices: &AttributeSlices<'_>, index: usize) -> Self {
        Self {
            position: slices.position2_at(index),
            uv: slices.uv_at(index),
        }
    }

    fn attribute_values(&self) -> impl Iterator<Item = (ComponentKind, ComponentValue)> {
        [
            (ComponentKind::Position2, self.position.into()),
            (ComponentKind::Uv, self.uv.into()),
        ]
        .into_iter()
    }
}

/// Tag naming one of the output vertex structs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DestinationVertexKind {
    /// [`PositionNormalUv`]
    PositionNormalUv,
    /// [`PositionNormalColor`]
    PositionNormalColor,
    /// [`PositionColor`]
    PositionColor,
    /// [`Position2Uv`]
    Position2Uv,
}

impl DestinationVertexKind {
    /// All kinds in selection priority order.
    pub const PRIORITY: [Self; 4] = [
        Self::PositionNormalUv,
        Self::PositionNormalColor,
        Self::PositionColor,
        Self::Position2Uv,
    ];

    /// Components of the struct, in field order.
    pub fn components(&self) -> &'static [ComponentKind] {
        match self {
            Self::PositionNormalUv => PositionNormalUv::COMPONENTS,
            Self::PositionNormalColor => PositionNormalColor::COMPONENTS,
            Self::PositionColor => PositionColor::COMPONENTS,
            Self::Position2Uv => Position2Uv::COMPONENTS,
        }
    }

    /// Components of the struct as a bitset.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::from_kinds(self.components())
    }

    /// Whether a mesh declaring exactly `capabilities` lowers to this struct.
    pub fn is_compatible(&self, capabilities: Capabilities) -> bool {
        self.capabilities() == capabilities
    }

    /// First struct, in priority order, whose components equal `capabilities`.
    pub fn select(capabilities: Capabilities) -> Result<Self, MeshError> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.is_compatible(capabilities))
            .ok_or(MeshError::IncompatibleVertexLayout(capabilities))
    }

    /// The struct a layout describes.
    pub fn from_layout(layout: &VertexLayoutDefinition) -> Result<Self, MeshError> {
        Self::PRIORITY
            .into_iter()
            .find(|kind| kind.layout() == *layout)
            .ok_or_else(|| MeshError::UnsupportedVertexStruct(describe_layout(layout)))
    }

    /// Interleaved layout of the struct.
    pub fn layout(&self) -> VertexLayoutDefinition {
        VertexLayoutDefinition::from_components(self.components())
    }

    /// Size in bytes of the struct.
    pub fn stride(&self) -> usize {
        match self {
            Self::PositionNormalUv => std::mem::size_of::<PositionNormalUv>(),
            Self::PositionNormalColor => std::mem::size_of::<PositionNormalColor>(),
            Self::PositionColor => std::mem::size_of::<PositionColor>(),
            Self::Position2Uv => std::mem::size_of::<Position2Uv>(),
        }
    }
}

fn describe_layout(layout: &VertexLayoutDefinition) -> String {
    let mut out = String::from("[");
    for (i, attribute) in layout.attributes().iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(
            out,
            "{}: {:?}x{}",
            attribute.name, attribute.scalar, attribute.components
        );
    }
    out.push(']');
    out
}

/// A typed array of one of the output vertex structs.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexBuffer {
    PositionNormalUv(Buffer1D<PositionNormalUv>),
    PositionNormalColor(Buffer1D<PositionNormalColor>),
    PositionColor(Buffer1D<PositionColor>),
    Position2Uv(Buffer1D<Position2Uv>),
}

impl VertexBuffer {
    /// Which struct the buffer holds.
    pub fn kind(&self) -> DestinationVertexKind {
        match self {
            Self::PositionNormalUv(_) => DestinationVertexKind::PositionNormalUv,
            Self::PositionNormalColor(_) => DestinationVertexKind::PositionNormalColor,
            Self::PositionColor(_) => DestinationVertexKind::PositionColor,
            Self::Position2Uv(_) => DestinationVertexKind::Position2Uv,
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        match self {
            Self::PositionNormalUv(v) => v.len(),
            Self::PositionNormalColor(v) => v.len(),
            Self::PositionColor(v) => v.len(),
            Self::Position2Uv(v) => v.len(),
        }
    }

    /// Check if the buffer holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw interleaved bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::PositionNormalUv(v) => v.as_bytes(),
            Self::PositionNormalColor(v) => v.as_bytes(),
            Self::PositionColor(v) => v.as_bytes(),
            Self::Position2Uv(v) => v.as_bytes(),
        }
    }

    /// Vertices as `PositionNormalUv`, if that is the held struct.
    pub fn as_position_normal_uv(&self) -> Option<&[PositionNormalUv]> {
        match self {
            Self::PositionNormalUv(v) => Some(&v[..]),
            _ => None,
        }
    }

    /// Vertices as `PositionNormalColor`, if that is the held struct.
    pub fn as_position_normal_color(&self) -> Option<&[PositionNormalColor]> {
        match self {
            Self::PositionNormalColor(v) => Some(&v[..]),
            _ => None,
        }
    }

    /// Vertices as `PositionColor`, if that is the held struct.
    pub fn as_position_color(&self) -> Option<&[PositionColor]> {
        match self {
            Self::PositionColor(v) => Some(&v[..]),
            _ => None,
        }
    }

    /// Vertices as `Position2Uv`, if that is the held struct.
    pub fn as_position2_uv(&self) -> Option<&[Position2Uv]> {
        match self {
            Self::Position2Uv(v) => Some(&v[..]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::ScalarType;

    #[test]
    fn test_select_exact_match() {
        let caps = Capabilities::POSITION3 | Capabilities::COLOR;
        assert_eq!(
            DestinationVertexKind::select(caps).unwrap(),
            DestinationVertexKind::PositionColor
        );
    }

    #[test]
    fn test_select_rejects_extra_components() {
        let caps = Capabilities::POSITION3
            | Capabilities::NORMAL
            | Capabilities::UV
            | Capabilities::COLOR;
        assert_eq!(
            DestinationVertexKind::select(caps),
            Err(MeshError::IncompatibleVertexLayout(caps))
        );
    }

    #[test]
    fn test_layout_stride_matches_struct_size() {
        for kind in DestinationVertexKind::PRIORITY {
            assert_eq!(kind.layout().stride() as usize, kind.stride());
        }
    }

    #[test]
    fn test_from_layout() {
        let layout = PositionNormalColor::KIND.layout();
        assert_eq!(
            DestinationVertexKind::from_layout(&layout).unwrap(),
            DestinationVertexKind::PositionNormalColor
        );

        let unknown =
            VertexLayoutDefinition::new().with_attribute("tangent", ScalarType::Float32, 4);
        let err = DestinationVertexKind::from_layout(&unknown).unwrap_err();
        assert_eq!(
            err,
            MeshError::UnsupportedVertexStruct("[tangent: Float32x4]".to_string())
        );
    }

    #[test]
    fn test_attribute_values_follow_components() {
        let vertex = PositionColor {
            position: [1.0, 2.0, 3.0],
            color: [0.5; 4],
        };
        let kinds: Vec<_> = vertex.attribute_values().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, PositionColor::COMPONENTS);
    }

    #[test]
    fn test_buffer_bytes() {
        let buffer = VertexBuffer::Position2Uv(vec![Position2Uv::default(); 3].into());
        assert_eq!(buffer.as_bytes().len(), 48);
        assert_eq!(buffer.kind(), DestinationVertexKind::Position2Uv);
        assert!(buffer.as_position_color().is_none());
    }
}
