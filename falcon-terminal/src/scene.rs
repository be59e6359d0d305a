/// Interactive flight state: the craft, its running tweens and live blasts.
///
/// Everything here is independent of the terminal so it can be driven from
/// tests with synthetic pointer positions and time steps.
use std::f32::consts::{PI, TAU};

use falcon_core::{GeometryResult, Model, NodePath, NodeTransform, Part, SharedPosition};
use nalgebra::Vector3;
use tracing::debug;

use crate::animation::{Ease, Tween, Tweens};
use crate::config::{
    BLAST_DISTANCE, BLAST_SECONDS, FOLLOW_DEPTH_DIVISOR, FOLLOW_RANGE_X, FOLLOW_SECONDS,
    HALO_STRETCH, LOOP_SECONDS, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};

/// Node whose transform a tween drives
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Root,
    Node(NodePath),
    Blast(u64),
}

/// Transform component a tween drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    ScaleX,
}

impl Channel {
    pub fn get(self, transform: &NodeTransform) -> f32 {
        match self {
            Channel::PositionX => transform.position.x,
            Channel::PositionY => transform.position.y,
            Channel::PositionZ => transform.position.z,
            Channel::RotationX => transform.rotation.x,
            Channel::ScaleX => transform.scale.x,
        }
    }

    pub fn set(self, transform: &mut NodeTransform, value: f32) {
        match self {
            Channel::PositionX => transform.position.x = value,
            Channel::PositionY => transform.position.y = value,
            Channel::PositionZ => transform.position.z = value,
            Channel::RotationX => transform.rotation.x = value,
            Channel::ScaleX => transform.scale.x = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub target: Target,
    pub channel: Channel,
}

impl Property {
    pub fn new(target: Target, channel: Channel) -> Self {
        Self { target, channel }
    }
}

/// Work left over when a tween finishes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Completion {
    /// Snap the roll back to where the loop started and re-arm clicks
    EndLoop { restore: f32 },
    DropBlast(u64),
}

/// Values the craft eases toward for a pointer position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowTargets {
    pub position: Vector3<f32>,
    pub rotation_x: f32,
    pub halo_scale: f32,
}

/// Follow targets for a pointer at `(x, y)` on the virtual viewport.
///
/// The craft climbs along a circle of radius half the viewport height as the
/// pointer moves away from the horizontal centre line, and pitches with it.
pub fn follow_targets(x: f32, y: f32) -> FollowTargets {
    let half_width = VIEWPORT_WIDTH / 2.0;
    let half_height = VIEWPORT_HEIGHT / 2.0;

    let z = (y - half_height) / FOLLOW_DEPTH_DIVISOR;
    let ratio = (z.abs() / half_height).min(1.0);
    let climb = half_height * (1.0 - ratio.acos().sin());

    FollowTargets {
        position: Vector3::new((x - half_width) / half_width * FOLLOW_RANGE_X, climb, z),
        rotation_x: -z / half_height * 2.0 * PI / 3.0,
        halo_scale: x / VIEWPORT_WIDTH * HALO_STRETCH,
    }
}

/// Centre of terminal cell `(column, row)` on the virtual viewport
pub fn viewport_point(column: u16, row: u16, columns: u16, rows: u16) -> (f32, f32) {
    let x = (column as f32 + 0.5) / columns.max(1) as f32 * VIEWPORT_WIDTH;
    let y = (row as f32 + 0.5) / rows.max(1) as f32 * VIEWPORT_HEIGHT;
    (x, y)
}

struct Blast {
    id: u64,
    part: Part,
}

pub struct FlightScene {
    model: Model,
    camera: SharedPosition,
    tweens: Tweens<Property, Completion>,
    blasts: Vec<Blast>,
    next_blast: u64,
    is_looping: bool,
}

impl FlightScene {
    pub fn new(model: Model, camera: SharedPosition) -> Self {
        Self {
            model,
            camera,
            tweens: Tweens::new(),
            blasts: Vec::new(),
            next_blast: 0,
            is_looping: false,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    /// Bolts currently in flight
    pub fn blasts(&self) -> impl Iterator<Item = &Part> {
        self.blasts.iter().map(|blast| &blast.part)
    }

    pub fn is_animating(&self, property: &Property) -> bool {
        self.tweens.is_animating(property)
    }

    /// Ease the craft toward the pointer at `(x, y)` on the virtual viewport
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let targets = follow_targets(x, y);
        let follow = |channel| Property::new(Target::Root, channel);

        let mut moves = vec![
            (follow(Channel::PositionX), targets.position.x),
            (follow(Channel::PositionY), targets.position.y),
            (follow(Channel::PositionZ), targets.position.z),
        ];
        if !self.is_looping {
            moves.push((follow(Channel::RotationX), targets.rotation_x));
        }
        for halo in self.model.booster_halos() {
            moves.push((
                Property::new(Target::Node(halo.clone()), Channel::ScaleX),
                targets.halo_scale,
            ));
        }

        for (property, value) in moves {
            self.tween_to(property, value, FOLLOW_SECONDS, Ease::QuadOut, None);
        }
    }

    /// Start a full roll: upward for clicks in the top half, downward below.
    ///
    /// Ignored while a roll is already running.
    pub fn clicked(&mut self, y: f32) {
        if self.is_looping {
            return;
        }
        self.is_looping = true;

        let start = self.model.root().transform.rotation.x;
        let end = if y <= VIEWPORT_HEIGHT / 2.0 {
            start + TAU
        } else {
            start - TAU
        };
        debug!(start, end, "starting loop");
        self.tween_to(
            Property::new(Target::Root, Channel::RotationX),
            end,
            LOOP_SECONDS,
            Ease::BackOut,
            Some(Completion::EndLoop { restore: start }),
        );
    }

    /// Launch a pair of bolts from the turrets' current positions
    pub fn fire(&mut self) -> GeometryResult<()> {
        let part = self.model.fire(&self.camera)?;
        let id = self.next_blast;
        self.next_blast += 1;
        self.blasts.push(Blast { id, part });

        self.tween_to(
            Property::new(Target::Blast(id), Channel::PositionX),
            BLAST_DISTANCE,
            BLAST_SECONDS,
            Ease::Linear,
            Some(Completion::DropBlast(id)),
        );
        Ok(())
    }

    /// Advance all animation by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let model = &mut self.model;
        let blasts = &mut self.blasts;
        let completions = self.tweens.advance(dt, |property, value| {
            if let Some(transform) = transform_mut(model, blasts, &property.target) {
                property.channel.set(transform, value);
            }
        });

        for completion in completions {
            match completion {
                Completion::EndLoop { restore } => {
                    self.model.root_transform_mut().rotation.x = restore;
                    self.is_looping = false;
                }
                Completion::DropBlast(id) => {
                    self.blasts.retain(|blast| blast.id != id);
                    debug!(id, "blast left the scene");
                }
            }
        }
    }

    fn tween_to(
        &mut self,
        property: Property,
        to: f32,
        seconds: f32,
        ease: Ease,
        on_complete: Option<Completion>,
    ) {
        let Some(from) = self.current(&property) else {
            return;
        };
        self.tweens
            .start(Tween::new(property, from, to, seconds, ease), on_complete);
    }

    fn current(&self, property: &Property) -> Option<f32> {
        let transform = match &property.target {
            Target::Root => Some(&self.model.root().transform),
            Target::Node(path) => self.model.root().node(path).map(|part| &part.transform),
            Target::Blast(id) => self
                .blasts
                .iter()
                .find(|blast| blast.id == *id)
                .map(|blast| &blast.part.transform),
        };
        transform.map(|transform| property.channel.get(transform))
    }
}

fn transform_mut<'a>(
    model: &'a mut Model,
    blasts: &'a mut [Blast],
    target: &Target,
) -> Option<&'a mut NodeTransform> {
    match target {
        Target::Root => Some(model.root_transform_mut()),
        Target::Node(path) => model.transform_mut(path),
        Target::Blast(id) => blasts
            .iter_mut()
            .find(|blast| blast.id == *id)
            .map(|blast| &mut blast.part.transform),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene() -> FlightScene {
        let camera = SharedPosition::default();
        let model = Model::build(&camera).unwrap();
        FlightScene::new(model, camera)
    }

    #[test]
    fn test_follow_targets_at_centre() {
        let targets = follow_targets(640.0, 360.0);
        assert_relative_eq!(targets.position, Vector3::zeros(), epsilon = 1e-4);
        assert_relative_eq!(targets.rotation_x, 0.0);
        assert_relative_eq!(targets.halo_scale, 0.75);
    }

    #[test]
    fn test_follow_targets_at_corner() {
        let targets = follow_targets(1280.0, 720.0);
        assert_relative_eq!(targets.position.x, 100.0);
        assert_relative_eq!(targets.position.z, 144.0);
        // Climb on a circle of radius 360 at depth 144.
        let expected = 360.0 * (1.0 - (1.0 - (144.0f32 / 360.0).powi(2)).sqrt());
        assert_relative_eq!(targets.position.y, expected, epsilon = 1e-3);
        assert_relative_eq!(targets.rotation_x, -0.4 * 2.0 * PI / 3.0, epsilon = 1e-5);
        assert_relative_eq!(targets.halo_scale, 1.5);
    }

    #[test]
    fn test_viewport_point() {
        let (x, y) = viewport_point(0, 0, 80, 24);
        assert_relative_eq!(x, 8.0);
        assert_relative_eq!(y, 15.0);
    }

    #[test]
    fn test_pointer_follow_reaches_targets() {
        let mut scene = scene();
        scene.pointer_moved(1280.0, 360.0);
        scene.advance(0.5);
        let halfway = scene.model().root().transform.position.x;
        assert!(halfway > 50.0 && halfway < 100.0);

        scene.advance(0.5);
        let root = &scene.model().root().transform;
        assert_relative_eq!(root.position.x, 100.0, epsilon = 1e-4);
        let halo = &scene.model().booster_halos()[0];
        let scale = scene.model().root().node(halo).unwrap().transform.scale.x;
        assert_relative_eq!(scale, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn test_loop_is_gated_and_restores_roll() {
        let mut scene = scene();
        scene.clicked(100.0);
        assert!(scene.is_looping());

        // A second click and pointer pitch are ignored mid-loop.
        scene.clicked(600.0);
        scene.pointer_moved(640.0, 700.0);
        scene.advance(1.0);
        assert!(scene.is_looping());
        assert!(scene.model().root().transform.rotation.x > 0.0);

        scene.advance(1.0);
        assert!(!scene.is_looping());
        assert_eq!(scene.model().root().transform.rotation.x, 0.0);
    }

    #[test]
    fn test_loop_direction_follows_click_half() {
        let mut scene = scene();
        scene.clicked(700.0);
        scene.advance(1.0);
        assert!(scene.model().root().transform.rotation.x < 0.0);
    }

    #[test]
    fn test_blasts_fly_and_are_dropped() {
        let mut scene = scene();
        scene.fire().unwrap();
        scene.fire().unwrap();
        assert_eq!(scene.blasts().count(), 2);

        scene.advance(0.25);
        let x = scene.blasts().next().unwrap().transform.position.x;
        assert_relative_eq!(x, 500.0, epsilon = 1e-3);

        scene.advance(0.25);
        assert_eq!(scene.blasts().count(), 0);
    }
}
