//! Systems for the world module.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::Plane3d,
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    interaction::{
        components::{CollisionBox, TerminalStation},
        inventory::Inventory,
        registry::Interactable,
        types::ItemKind,
    },
    world::components::PlayerCamera,
};

const FLOOR_SCALE: f32 = 12.0;
const EYE_HEIGHT: f32 = 1.6;
const PLAYER_START: Vec3 = Vec3::new(0.0, EYE_HEIGHT, 3.0);
const ROOM_HALF_EXTENT: f32 = 5.5;
const PITCH_LIMIT: f32 = 1.54;

const PICKUP_SIZE: Vec3 = Vec3::new(0.35, 0.25, 0.35);
const TERMINAL_SIZE: Vec3 = Vec3::new(1.2, 1.6, 0.5);

/// Spawns the station room: floor, light, player, pickups, and the terminal.
pub fn spawn_station_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(70, 74, 82),
            perceptual_roughness: 0.8,
            metallic: 0.2,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(FLOOR_SCALE)),
    ));

    commands.spawn((
        PointLight {
            intensity: 600_000.0,
            range: 30.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 4.5, 0.0),
    ));

    let mut camera_transform = Transform::from_translation(PLAYER_START);
    camera_transform.look_at(Vec3::new(0.0, EYE_HEIGHT, -5.0), Vec3::Y);
    let (yaw, pitch) = yaw_pitch_from_transform(&camera_transform);
    commands.spawn((
        Camera3d::default(),
        camera_transform,
        PlayerCamera::new(yaw, pitch),
        Inventory::default(),
        Name::new("Player Camera"),
    ));

    let pickup_mesh = meshes.add(Cuboid::from_size(PICKUP_SIZE));
    let pickups = [
        (
            ItemKind::RepairModule,
            Vec3::new(2.5, 1.0, -1.5),
            Color::srgb(0.9, 0.55, 0.15),
        ),
        (
            ItemKind::GasMask,
            Vec3::new(-2.5, 1.0, -1.5),
            Color::srgb(0.3, 0.75, 0.4),
        ),
    ];
    for (kind, position, color) in pickups {
        commands.spawn((
            Mesh3d(pickup_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: LinearRgba::from(color) * 0.2,
                ..default()
            })),
            Transform::from_translation(position),
            Interactable::pickup(kind),
            CollisionBox::from_size(PICKUP_SIZE),
            Name::new(format!("Pickup: {}", kind)),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(TERMINAL_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.2, 0.35, 0.6),
            metallic: 0.6,
            ..default()
        })),
        Transform::from_xyz(0.0, TERMINAL_SIZE.y * 0.5, -4.5),
        Interactable::terminal(),
        CollisionBox::from_size(TERMINAL_SIZE),
        TerminalStation,
        Name::new("Terminal"),
    ));
}

/// Left click captures the cursor for mouse look; Escape releases it.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Left) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if keyboard.just_pressed(KeyCode::Escape) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Applies mouse look to the player camera while the cursor is captured.
pub fn player_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    cursor_options: Single<&CursorOptions>,
    time: Res<Time>,
    mut query: Query<(&mut PlayerCamera, &mut Transform)>,
) {
    let mut cumulative_delta = Vec2::ZERO;
    for ev in motion_events.read() {
        cumulative_delta += ev.delta;
    }

    if cursor_options.grab_mode == CursorGrabMode::None || cumulative_delta == Vec2::ZERO {
        return;
    }

    if let Ok((mut camera, mut transform)) = query.single_mut() {
        camera.yaw -= cumulative_delta.x * camera.look_sensitivity * time.delta_secs();
        camera.pitch -= cumulative_delta.y * camera.look_sensitivity * time.delta_secs();
        camera.pitch = camera.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        transform.rotation = camera.rotation();
    }
}

/// Walks the player on the floor plane with WASD, keeping eye height fixed.
pub fn player_walk(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&PlayerCamera, &mut Transform)>,
) {
    let Ok((camera, mut transform)) = query.single_mut() else {
        return;
    };

    let forward = {
        let f = transform.forward().as_vec3();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    };
    let right = {
        let r = transform.right().as_vec3();
        Vec3::new(r.x, 0.0, r.z).normalize_or_zero()
    };

    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= right;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += right;
    }

    if direction.length_squared() > 0.0 {
        let step = direction.normalize() * camera.walk_speed * time.delta_secs();
        transform.translation = clamp_to_room(transform.translation + step);
    }
}

fn clamp_to_room(position: Vec3) -> Vec3 {
    Vec3::new(
        position.x.clamp(-ROOM_HALF_EXTENT, ROOM_HALF_EXTENT),
        EYE_HEIGHT,
        position.z.clamp(-ROOM_HALF_EXTENT, ROOM_HALF_EXTENT),
    )
}

fn yaw_pitch_from_transform(transform: &Transform) -> (f32, f32) {
    let (yaw, pitch, _roll) = transform.rotation.to_euler(EulerRot::YXZ);
    (yaw, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_pitch_round_trip_through_rotation() {
        let mut transform = Transform::from_xyz(0.0, 1.0, 0.0);
        transform.look_at(Vec3::new(3.0, 0.5, -4.0), Vec3::Y);

        let (yaw, pitch) = yaw_pitch_from_transform(&transform);
        let camera = PlayerCamera::new(yaw, pitch);

        let expected = transform.forward().as_vec3();
        let actual = camera.rotation() * Vec3::NEG_Z;
        assert!(expected.distance(actual) < 1e-4);
    }

    #[test]
    fn walking_stays_inside_room_at_eye_height() {
        let clamped = clamp_to_room(Vec3::new(20.0, 0.0, -20.0));
        assert_eq!(
            clamped,
            Vec3::new(ROOM_HALF_EXTENT, EYE_HEIGHT, -ROOM_HALF_EXTENT)
        );
    }
}
