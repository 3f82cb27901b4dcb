//! Route node types.

use hx_core::Oddr;

/// How a route node came to exist.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// An anchor explicitly placed by the operator.
    User,
    /// A derived node filling the line between two anchors.
    Auto,
}

/// One waypoint of the active route.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteNode {
    pub coord: Oddr,
    pub kind:  NodeKind,
}

impl RouteNode {
    #[inline]
    pub const fn user(coord: Oddr) -> Self {
        Self { coord, kind: NodeKind::User }
    }

    #[inline]
    pub const fn auto(coord: Oddr) -> Self {
        Self { coord, kind: NodeKind::Auto }
    }

    #[inline]
    pub fn is_user(&self) -> bool {
        self.kind == NodeKind::User
    }
}
