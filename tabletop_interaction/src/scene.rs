//! Fixed scene entities owned by the interaction world: the table, the seats
//! around it, the one manipulable object, and the player rig passed in each
//! frame.

use std::f32::consts::TAU;
use std::fmt;

use glam::{Affine3A, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::math::{yaw_towards, yaw_transform, Aabb, LocalSpace};

/// 24-bit RGB color, `0xRRGGBB`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Material {
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Seat {
    index: usize,
    position: Vec3,
    yaw: f32,
    half_extents: Vec3,
    pub material: Material,
}

impl Seat {
    pub fn index(&self) -> usize {
        self.index
    }

    /// World-space center of the seat.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Axis-aligned box enclosing the seat footprint turned by its yaw.
    pub fn bounds(&self) -> Aabb {
        let (sin, cos) = self.yaw.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let half = self.half_extents;
        let turned = Vec3::new(
            cos * half.x + sin * half.z,
            half.y,
            sin * half.x + cos * half.z,
        );
        Aabb::new(self.position, turned)
    }
}

/// Frame the object's local position is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParentFrame {
    /// Child of a fixed scene node with the given world transform.
    Node(Affine3A),
    /// Child of the player rig; follows the rig's current transform.
    Rig,
    /// No parent at all: the local position is the world position.
    Detached,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManipulableObject {
    pub position: Vec3,
    pub half_extent: f32,
    pub parent: ParentFrame,
    pub material: Material,
}

impl ManipulableObject {
    pub fn world_position(&self, rig: &Rig) -> Vec3 {
        match self.parent {
            ParentFrame::Node(transform) => transform.local_to_world(self.position),
            ParentFrame::Rig => rig.transform().local_to_world(self.position),
            ParentFrame::Detached => self.position,
        }
    }

    pub fn world_bounds(&self, rig: &Rig) -> Aabb {
        Aabb::cube(self.world_position(rig), self.half_extent)
    }

    /// Moves the object so its world position lands on `world`.
    pub(crate) fn place_at_world(&mut self, world: Vec3, rig: &Rig) {
        self.position = match self.parent {
            ParentFrame::Node(transform) => transform.world_to_local(world),
            ParentFrame::Rig => rig.transform().world_to_local(world),
            ParentFrame::Detached => world,
        };
    }
}

/// The player's root node. Hands and camera hang off it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rig {
    pub position: Vec3,
    /// Radians around +Y; zero faces +Z.
    pub yaw: f32,
}

impl Rig {
    pub fn transform(&self) -> Affine3A {
        yaw_transform(self.position, self.yaw)
    }
}

/// Builds the table, the seat ring and the object under `root`.
pub(crate) fn build_entities(
    layout: &LayoutConfig,
    root: Affine3A,
    seat_color: Color,
    object_color: Color,
) -> (Table, Vec<Seat>, ManipulableObject) {
    let local_center = layout.table_center();
    let table = Table {
        center: root.local_to_world(local_center),
        radius: layout.table_radius,
    };

    let look_at = Vec3::new(local_center.x, layout.seat_height, local_center.z);
    let seats = (0..layout.seat_count)
        .map(|index| {
            let angle = index as f32 / layout.seat_count as f32 * TAU;
            let local = Vec3::new(
                local_center.x + angle.cos() * layout.seat_radius,
                layout.seat_height,
                local_center.z + angle.sin() * layout.seat_radius,
            );
            let position = root.local_to_world(local);
            Seat {
                index,
                position,
                yaw: yaw_towards(position, root.local_to_world(look_at)),
                half_extents: layout.seat_half_extents(),
                material: Material { color: seat_color },
            }
        })
        .collect();

    let object = ManipulableObject {
        position: layout.object_position(),
        half_extent: layout.object_half_extent,
        parent: ParentFrame::Node(root),
        material: Material {
            color: object_color,
        },
    };

    (table, seats, object)
}
