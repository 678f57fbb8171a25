//! Systems binding the interaction controllers to the ECS world.
use bevy::{
    app::AppExit,
    log::{debug, info, warn},
    prelude::*,
};

use crate::{
    core::{plugin::SessionClock, schedule::DeferredQueue},
    ui::hud::components::HudVisibility,
    world::components::PlayerCamera,
};

use super::{
    components::{CollisionBox, InteractionDrivers, TerminalStation},
    config::InteractionSettings,
    context::{FrameContext, KeyBinding},
    controller::{PickupController, PickupPanels, PickupTick},
    errors::{ConfigurationError, MissingReference},
    gaze::{CastVolume, VolumeRayCaster},
    inventory::Inventory,
    registry::{Interactable, InteractableRegistry},
    terminal::{TerminalAction, TerminalGate, TerminalPanels},
    types::{InteractableId, ItemKind, Viewpoint},
};

/// Key that fires the activate signal.
pub const ACTIVATE_KEY: KeyCode = KeyCode::KeyE;

/// Builds the controllers once the scene exists, resolving the terminal entity.
pub fn bind_interaction_drivers(
    mut commands: Commands,
    settings: Res<InteractionSettings>,
    terminals: Query<Entity, With<TerminalStation>>,
    players: Query<(), (With<PlayerCamera>, With<Inventory>)>,
) {
    let pickups = ItemKind::ALL
        .into_iter()
        .map(|kind| {
            PickupController::new(
                kind,
                settings.pickup_distance,
                PickupPanels::for_item(kind),
                settings.diagnostics,
            )
        })
        .collect::<Vec<_>>();

    let terminal = match terminals.single() {
        Ok(entity) => Some(TerminalGate::new(
            InteractableId::from(entity),
            settings.terminal_distance,
            settings.required_item,
            TerminalPanels::standard(),
            settings.terminal_timings,
            settings.diagnostics,
        )),
        Err(err) => {
            let error =
                ConfigurationError::new("TerminalGate", vec![MissingReference::TerminalTarget]);
            warn!("{} ({})", error, err);
            None
        }
    };

    if players.is_empty() {
        warn!("[InteractionPlugin] Player inventory not found on the player camera.");
    }

    info!(
        "Interaction drivers bound: {} pickup controller(s), terminal {}",
        pickups.len(),
        if terminal.is_some() { "bound" } else { "unbound" }
    );

    commands.insert_resource(InteractionDrivers {
        pickups,
        terminal,
        initialized: false,
    });
}

/// Runs one frame of the look-and-interact loop.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn drive_interactions(
    keyboard: Res<ButtonInput<KeyCode>>,
    clock: Res<SessionClock>,
    drivers: Option<ResMut<InteractionDrivers>>,
    mut queue: ResMut<DeferredQueue<TerminalAction>>,
    mut hud: ResMut<HudVisibility>,
    mut exit: MessageWriter<AppExit>,
    cameras: Query<&Transform, With<PlayerCamera>>,
    mut inventories: Query<&mut Inventory, With<PlayerCamera>>,
    mut interactables: Query<(
        Entity,
        &Transform,
        &CollisionBox,
        &mut Interactable,
        Option<&mut Visibility>,
    )>,
) {
    let Some(drivers) = drivers else {
        return;
    };
    let drivers = drivers.into_inner();

    for fired in queue.advance(clock.last_delta()) {
        debug!("{} fired at {:.2?}: {:?}", fired.handle, clock.elapsed(), fired.action);
        match drivers.terminal.as_mut() {
            Some(terminal) => terminal.on_deferred(fired, &mut *hud, &mut exit),
            None => debug!("Dropping {:?} with no terminal bound", fired.action),
        }
    }

    let mut registry = InteractableRegistry::default();
    let mut caster = VolumeRayCaster::default();
    for (entity, transform, collision, interactable, _) in interactables.iter() {
        let id = InteractableId::from(entity);
        registry.insert(id, *interactable);
        if interactable.is_active() {
            caster.push(CastVolume {
                id,
                tag: interactable.tag(),
                center: transform.translation,
                half_extents: collision.half_extents * transform.scale.abs(),
            });
        }
    }

    let viewpoint = cameras.single().ok().map(Viewpoint::from_transform);
    let mut inventory = inventories.single_mut().ok();
    let input = KeyBinding {
        keyboard: &keyboard,
        key: ACTIVATE_KEY,
    };

    let mut ctx = FrameContext {
        viewpoint,
        ray_caster: &caster,
        input: &input,
        ui: &mut *hud,
        interactables: &mut registry,
        inventory: inventory.as_deref_mut(),
        scheduler: &mut *queue,
    };

    if !drivers.initialized {
        for pickup in &mut drivers.pickups {
            pickup.init(&mut ctx);
        }
        if let Some(terminal) = drivers.terminal.as_mut() {
            terminal.init(&mut ctx);
        }
        drivers.initialized = true;
    }

    for pickup in &mut drivers.pickups {
        if let PickupTick::Collected { kind, .. } = pickup.tick(&mut ctx) {
            if let Some(inventory) = ctx.inventory.as_deref() {
                let held = inventory
                    .items()
                    .map(ItemKind::label)
                    .collect::<Vec<_>>()
                    .join(", ");
                debug!("Frame {}: {} collected; holding [{}]", clock.frame(), kind, held);
            }
        }
    }
    if let Some(terminal) = drivers.terminal.as_mut() {
        terminal.tick(&mut ctx);
    }

    let spent = registry.deactivated();
    if spent.is_empty() {
        return;
    }
    for (entity, _, _, mut interactable, visibility) in interactables.iter_mut() {
        if !spent.contains(&InteractableId::from(entity)) {
            continue;
        }
        interactable.deactivate();
        if let Some(mut visibility) = visibility {
            *visibility = Visibility::Hidden;
        }
        debug!("Pickup {} removed from the scene", entity);
    }
}

/// Draws the gaze ray for the pickup distance.
#[cfg(feature = "gaze_debug")]
pub fn draw_gaze_ray(
    mut gizmos: Gizmos,
    settings: Res<InteractionSettings>,
    cameras: Query<&Transform, With<PlayerCamera>>,
) {
    if let Ok(transform) = cameras.single() {
        gizmos.ray(
            transform.translation,
            transform.forward().as_vec3() * settings.pickup_distance,
            Color::srgb(1.0, 1.0, 0.0),
        );
    }
}
