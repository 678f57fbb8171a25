//! Gaze detection: one nearest-hit ray per frame from the player's viewpoint.
use bevy::prelude::*;

use super::types::{InteractableId, InteractableTag, Viewpoint};

/// Nearest object intersected by a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeHit {
    pub id: InteractableId,
    pub tag: InteractableTag,
    pub distance: f32,
}

/// Host collision query.
pub trait RayCaster {
    fn cast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<GazeHit>;
}

/// Which hits a detector cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFilter {
    /// Any object carrying this tag.
    Tag(InteractableTag),
    /// Exactly this object.
    Fixed(InteractableId),
}

impl TargetFilter {
    fn matches(&self, hit: &GazeHit) -> bool {
        match self {
            Self::Tag(tag) => hit.tag == *tag,
            Self::Fixed(id) => hit.id == *id,
        }
    }
}

/// Per-frame detector output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GazeTarget {
    #[default]
    None,
    Hit { id: InteractableId, matches: bool },
}

impl GazeTarget {
    /// The hit id, if it passed the detector's filter.
    pub fn matching(self) -> Option<InteractableId> {
        match self {
            Self::Hit { id, matches: true } => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GazeDetector {
    max_distance: f32,
    filter: TargetFilter,
}

impl GazeDetector {
    pub fn new(max_distance: f32, filter: TargetFilter) -> Self {
        let max_distance = if max_distance.is_finite() {
            max_distance.max(0.0)
        } else {
            0.0
        };
        Self {
            max_distance,
            filter,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    pub fn detect(&self, viewpoint: &Viewpoint, caster: &dyn RayCaster) -> GazeTarget {
        let Ok(direction) = Dir3::new(viewpoint.forward) else {
            debug!("Gaze direction {:?} is degenerate; skipping cast", viewpoint.forward);
            return GazeTarget::None;
        };

        match caster.cast(viewpoint.origin, direction, self.max_distance) {
            Some(hit) => GazeTarget::Hit {
                id: hit.id,
                matches: self.filter.matches(&hit),
            },
            None => GazeTarget::None,
        }
    }
}

/// Axis-aligned box used for gaze hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastVolume {
    pub id: InteractableId,
    pub tag: InteractableTag,
    pub center: Vec3,
    pub half_extents: Vec3,
}

/// Ray caster over a flat list of boxes; returns the nearest intersection.
#[derive(Debug, Default, Clone)]
pub struct VolumeRayCaster {
    volumes: Vec<CastVolume>,
}

impl VolumeRayCaster {
    pub fn push(&mut self, volume: CastVolume) {
        self.volumes.push(volume);
    }
}

impl RayCaster for VolumeRayCaster {
    fn cast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<GazeHit> {
        self.volumes
            .iter()
            .filter_map(|volume| {
                ray_box_distance(origin, direction.as_vec3(), volume, max_distance).map(
                    |distance| GazeHit {
                        id: volume.id,
                        tag: volume.tag,
                        distance,
                    },
                )
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Slab test. Returns the entry distance along the ray, `0` when starting inside.
fn ray_box_distance(
    origin: Vec3,
    direction: Vec3,
    volume: &CastVolume,
    max_distance: f32,
) -> Option<f32> {
    let min = volume.center - volume.half_extents;
    let max = volume.center + volume.half_extents;

    let mut t_enter = 0.0_f32;
    let mut t_exit = max_distance;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < f32::EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));
        if t_enter > t_exit {
            return None;
        }
    }

    Some(t_enter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::types::ItemKind;

    const MODULE: InteractableTag = InteractableTag::Pickup(ItemKind::RepairModule);

    fn unit_box(id: u64, tag: InteractableTag, center: Vec3) -> CastVolume {
        CastVolume {
            id: InteractableId::new(id),
            tag,
            center,
            half_extents: Vec3::splat(0.25),
        }
    }

    fn looking_forward() -> Viewpoint {
        Viewpoint::new(Vec3::ZERO, Vec3::NEG_Z)
    }

    #[test]
    fn nearest_volume_wins() {
        let mut caster = VolumeRayCaster::default();
        caster.push(unit_box(1, MODULE, Vec3::new(0.0, 0.0, -1.8)));
        caster.push(unit_box(2, InteractableTag::Terminal, Vec3::new(0.0, 0.0, -1.0)));

        let hit = caster
            .cast(Vec3::ZERO, Dir3::NEG_Z, 2.0)
            .expect("ray should hit the closer box");
        assert_eq!(hit.id, InteractableId::new(2));
        assert!((hit.distance - 0.75).abs() < 1e-5);
    }

    #[test]
    fn respects_max_distance() {
        let mut caster = VolumeRayCaster::default();
        caster.push(unit_box(1, MODULE, Vec3::new(0.0, 0.0, -3.0)));

        assert!(caster.cast(Vec3::ZERO, Dir3::NEG_Z, 2.0).is_none());
        assert!(caster.cast(Vec3::ZERO, Dir3::NEG_Z, 3.0).is_some());
    }

    #[test]
    fn misses_volumes_off_axis_or_behind() {
        let mut caster = VolumeRayCaster::default();
        caster.push(unit_box(1, MODULE, Vec3::new(1.0, 0.0, -1.0)));
        caster.push(unit_box(2, MODULE, Vec3::new(0.0, 0.0, 1.0)));

        assert!(caster.cast(Vec3::ZERO, Dir3::NEG_Z, 5.0).is_none());
    }

    #[test]
    fn detector_flags_matching_tags() {
        let mut caster = VolumeRayCaster::default();
        caster.push(unit_box(4, InteractableTag::Terminal, Vec3::new(0.0, 0.0, -1.0)));

        let by_tag = GazeDetector::new(2.0, TargetFilter::Tag(MODULE));
        assert_eq!(
            by_tag.detect(&looking_forward(), &caster),
            GazeTarget::Hit {
                id: InteractableId::new(4),
                matches: false
            }
        );

        let fixed = GazeDetector::new(2.0, TargetFilter::Fixed(InteractableId::new(4)));
        assert_eq!(
            fixed.detect(&looking_forward(), &caster).matching(),
            Some(InteractableId::new(4))
        );
    }

    #[test]
    fn degenerate_direction_yields_no_target() {
        let mut caster = VolumeRayCaster::default();
        caster.push(unit_box(1, MODULE, Vec3::ZERO));

        let detector = GazeDetector::new(2.0, TargetFilter::Tag(MODULE));
        let viewpoint = Viewpoint::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(detector.detect(&viewpoint, &caster), GazeTarget::None);
    }

    #[test]
    fn invalid_distances_are_clamped() {
        let filter = TargetFilter::Tag(MODULE);
        assert_eq!(GazeDetector::new(-1.0, filter).max_distance(), 0.0);
        assert_eq!(GazeDetector::new(f32::NAN, filter).max_distance(), 0.0);
    }
}
