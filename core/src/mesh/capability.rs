//! Capability descriptors for vertex formats.
//!
//! A mesh advertises which attributes it stores as a [`Capabilities`] bitset.
//! Vertex formats declare the attributes they need through [`VertexFormat`],
//! and the marker traits ([`HasPosition3`], [`HasNormal`], ...) let typed views
//! expose only the accessors a format actually provides.

use bitflags::bitflags;

use super::component::ComponentKind;

bitflags! {
    /// Set of attribute kinds present in a mesh or required by a vertex format.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        /// 2D position.
        const POSITION2 = 1 << 0;
        /// 3D position.
        const POSITION3 = 1 << 1;
        /// Normal.
        const NORMAL = 1 << 2;
        /// Texture coordinates.
        const UV = 1 << 3;
        /// RGBA color.
        const COLOR = 1 << 4;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::empty()
    }
}

impl Capabilities {
    /// Capability bit for a single component kind.
    pub const fn of(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Position2 => Self::POSITION2,
            ComponentKind::Position3 => Self::POSITION3,
            ComponentKind::Normal => Self::NORMAL,
            ComponentKind::Uv => Self::UV,
            ComponentKind::Color => Self::COLOR,
        }
    }

    /// Union of the capability bits of several kinds.
    pub const fn from_kinds(kinds: &[ComponentKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= Self::of(kinds[i]).bits();
            i += 1;
        }
        Self::from_bits_truncate(bits)
    }

    /// Component kinds contained in this set, in [`ComponentKind::ALL`] order.
    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        ComponentKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(Self::of(*kind)))
    }
}

/// A vertex format described by the attribute components it reads.
///
/// Implemented by the concrete vertex structs and by zero-sized descriptors
/// such as [`Positions3`]. The component order is the interleaving order used
/// when a mesh is declared from the format.
pub trait VertexFormat {
    /// Components required by this format, in declaration order.
    const COMPONENTS: &'static [ComponentKind];

    /// Required components as a bitset.
    fn capabilities() -> Capabilities {
        Capabilities::from_kinds(Self::COMPONENTS)
    }
}

/// Format exposes a 2D position.
pub trait HasPosition2: VertexFormat {}

/// Format exposes a 3D position.
pub trait HasPosition3: VertexFormat {}

/// Format exposes a normal.
pub trait HasNormal: VertexFormat {}

/// Format exposes texture coordinates.
pub trait HasUv: VertexFormat {}

/// Format exposes a color.
pub trait HasColor: VertexFormat {}

/// Descriptor requiring only 3D positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positions3;

impl VertexFormat for Positions3 {
    const COMPONENTS: &'static [ComponentKind] = &[ComponentKind::Position3];
}

impl HasPosition3 for Positions3 {}

/// Descriptor requiring 3D positions and normals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Positions3Normals;

impl VertexFormat for Positions3Normals {
    const COMPONENTS: &'static [ComponentKind] =
        &[ComponentKind::Position3, ComponentKind::Normal];
}

impl HasPosition3 for Positions3Normals {}
impl HasNormal for Positions3Normals {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_kinds() {
        let caps = Capabilities::from_kinds(&[ComponentKind::Position3, ComponentKind::Uv]);
        assert_eq!(caps, Capabilities::POSITION3 | Capabilities::UV);
    }

    #[test]
    fn test_kinds_iterates_in_order() {
        let caps = Capabilities::COLOR | Capabilities::POSITION3;
        let kinds: Vec<_> = caps.kinds().collect();
        assert_eq!(kinds, vec![ComponentKind::Position3, ComponentKind::Color]);
    }

    #[test]
    fn test_descriptor_capabilities() {
        assert_eq!(Positions3::capabilities(), Capabilities::POSITION3);
        assert_eq!(
            Positions3Normals::capabilities(),
            Capabilities::POSITION3 | Capabilities::NORMAL
        );
    }
}
