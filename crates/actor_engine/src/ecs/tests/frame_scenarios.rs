//! Whole-frame behavior: update gating, deferred spawning, dead sweeps and
//! removal while a pass is running

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{on_input, on_update, textured};
use crate::ecs::{Actor, ActorBehavior, ActorContext, ActorState, World, WorldError};
use crate::foundation::collections::{ActorId, SpriteKey};
use crate::foundation::math::{Color, Vec2};
use crate::input::{KeyCode, KeyboardState};
use crate::render::{DrawCommand, RecordingSurface};

fn frame(world: &mut World, surface: &mut RecordingSurface) {
    world
        .run_frame(&KeyboardState::new(), 0.016, surface)
        .unwrap();
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut(&mut ActorContext<'_>, f32) + 'static) {
    let hits = Rc::new(Cell::new(0));
    let handle = Rc::clone(&hits);
    (hits, move |_: &mut ActorContext<'_>, _: f32| handle.set(handle.get() + 1))
}

#[test]
fn test_empty_world_renders_cleared_frame() {
    let mut world = World::new();
    let mut surface = RecordingSurface::new();

    frame(&mut world, &mut surface);

    assert_eq!(
        surface.last_frame().unwrap(),
        &[DrawCommand::Clear(Color::BLACK), DrawCommand::Present]
    );
}

#[test]
fn test_non_active_actor_is_not_updated() {
    let mut world = World::new();
    let (hits, count) = counter();
    let actor = Actor::new()
        .with_position(Vec2::new(5.0, 5.0))
        .with_component(on_update(count))
        .with_component(on_update(|ctx, dt| {
            let next = ctx.position() + Vec2::new(100.0 * dt, 0.0);
            ctx.set_position(next);
        }))
        .with_component(textured("paused.png", 100));
    let id = world.add_actor(actor);
    world.actor_mut(id).unwrap().set_state(ActorState::Paused);

    let mut surface = RecordingSurface::new();
    for _ in 0..3 {
        frame(&mut world, &mut surface);
    }

    assert_eq!(hits.get(), 0);
    assert_eq!(world.actor(id).unwrap().position(), Vec2::new(5.0, 5.0));
    // Paused actors are still drawn
    assert_eq!(surface.last_frame_textures(), vec!["paused.png"]);
}

#[test]
fn test_dead_actor_drawn_that_frame_then_destroyed() {
    let mut world = World::new();
    let (updates, count) = counter();
    let doomed = Actor::new()
        .with_name("doomed")
        .with_component(on_update(count))
        .with_component(on_update(|ctx, _| {
            ctx.set_state(ActorState::Dead);
        }))
        .with_component(textured("doomed.png", 100));
    let doomed_id = world.add_actor(doomed);

    let seen_active = Rc::new(Cell::new(false));
    let seen = Rc::clone(&seen_active);
    world.add_actor(Actor::new().with_component(on_update(move |ctx, _| {
        seen.set(ctx.world().active_actors().contains(&doomed_id));
    })));

    world.update(0.016);
    assert_eq!(updates.get(), 1);
    assert!(seen_active.get(), "still active during the pass");
    assert!(!world.active_actors().contains(&doomed_id));
    assert!(world.contains_actor(doomed_id));

    let mut surface = RecordingSurface::new();
    world.render(&mut surface).unwrap();
    assert_eq!(surface.last_frame_textures(), vec!["doomed.png"]);

    world.end_frame();
    assert!(!world.contains_actor(doomed_id));
    assert!(world.draw_list().is_empty());

    frame(&mut world, &mut surface);
    assert_eq!(updates.get(), 1);
    assert!(surface.last_frame_textures().is_empty());
}

#[test]
fn test_actor_spawned_during_update_runs_next_frame() {
    let mut world = World::new();
    let (child_hits, child_count) = counter();
    let child_count = Rc::new(RefCell::new(Some(child_count)));
    let spawned: Rc<Cell<Option<ActorId>>> = Rc::new(Cell::new(None));

    let spawned_handle = Rc::clone(&spawned);
    world.add_actor(Actor::new().with_component(on_update(move |ctx, _| {
        if let Some(count) = child_count.borrow_mut().take() {
            let child = Actor::new()
                .with_name("child")
                .with_component(on_update(count))
                .with_component(textured("child.png", 100));
            let id = ctx.spawn(child);
            assert!(ctx.world().is_updating());
            assert!(ctx.world().pending_actors().contains(&id));
            assert!(!ctx.world().active_actors().contains(&id));
            spawned_handle.set(Some(id));
        }
    })));

    let mut surface = RecordingSurface::new();
    frame(&mut world, &mut surface);

    let child = spawned.get().unwrap();
    assert_eq!(child_hits.get(), 0);
    assert!(world.pending_actors().is_empty());
    assert_eq!(world.active_actors().last(), Some(&child));
    // Drawn as soon as it exists
    assert_eq!(surface.last_frame_textures(), vec!["child.png"]);

    frame(&mut world, &mut surface);
    assert_eq!(child_hits.get(), 1);
}

#[test]
fn test_add_actor_outside_pass_goes_active() {
    let mut world = World::new();
    let id = world.add_actor(Actor::new());

    assert!(!world.is_updating());
    assert_eq!(world.active_actors(), &[id]);
    assert!(world.pending_actors().is_empty());
}

#[test]
fn test_removed_mid_pass_is_skipped() {
    let mut world = World::new();
    let victim_slot: Rc<Cell<Option<ActorId>>> = Rc::new(Cell::new(None));
    let slot = Rc::clone(&victim_slot);

    let first = world.add_actor(Actor::new().with_component(on_update(move |ctx, _| {
        if let Some(victim) = slot.get() {
            let removed = ctx.world_mut().remove_actor(victim);
            assert!(removed.is_some());
        }
    })));
    let (victim_hits, count) = counter();
    let victim = world.add_actor(
        Actor::new()
            .with_component(on_update(count))
            .with_component(textured("victim.png", 1)),
    );
    let third = world.add_actor(Actor::new());
    victim_slot.set(Some(victim));

    world.update(0.016);

    assert_eq!(victim_hits.get(), 0);
    assert_eq!(world.active_actors(), &[first, third]);
    assert!(world.draw_list().is_empty());
    assert!(world.remove_actor(victim).is_none());
}

#[test]
fn test_actor_removing_itself() {
    let mut world = World::new();
    let id = world.add_actor(
        Actor::new()
            .with_component(on_update(|ctx, _| {
                let id = ctx.id();
                assert!(ctx.world_mut().remove_actor(id).is_none());
            }))
            .with_component(textured("self.png", 5)),
    );

    world.update(0.016);

    assert!(!world.contains_actor(id));
    assert!(world.active_actors().is_empty());
    assert!(world.draw_list().is_empty());
}

#[test]
fn test_own_actor_is_busy_during_update() {
    let mut world = World::new();
    let result: Rc<Cell<Option<Result<(), WorldError>>>> = Rc::new(Cell::new(None));
    let handle = Rc::clone(&result);

    let id = world.add_actor(Actor::new().with_component(on_update(move |ctx, _| {
        let id = ctx.id();
        assert!(ctx.world().contains_actor(id));
        assert!(ctx.world().actor(id).is_none());
        let added = ctx.world_mut().add_component(id, Box::new(textured("late.png", 1)));
        handle.set(Some(added.map(|_| ())));
    })));

    world.update(0.016);

    assert_eq!(result.get(), Some(Err(WorldError::ActorBusy(id))));
    assert_eq!(world.actor(id).unwrap().component_count(), 1);
}

#[test]
fn test_components_and_behavior_order_within_pass() {
    struct Recorder(Rc<RefCell<Vec<&'static str>>>);

    impl ActorBehavior for Recorder {
        fn update_actor(&mut self, _ctx: &mut ActorContext<'_>, _delta_time: f32) {
            self.0.borrow_mut().push("update_actor");
        }

        fn actor_input(&mut self, _ctx: &mut ActorContext<'_>, keys: &KeyboardState) {
            if keys.is_pressed(KeyCode::Space) {
                self.0.borrow_mut().push("actor_input");
            }
        }
    }

    let log = Rc::new(RefCell::new(Vec::new()));
    let (input_log, update_log) = (Rc::clone(&log), Rc::clone(&log));
    let mut world = World::new();
    world.add_actor(
        Actor::new()
            .with_behavior(Recorder(Rc::clone(&log)))
            .with_component(on_input(move |_, _| input_log.borrow_mut().push("component_input")))
            .with_component(on_update(move |_, _| update_log.borrow_mut().push("component_update"))),
    );

    let mut surface = RecordingSurface::new();
    world
        .run_frame(&KeyboardState::with_keys([KeyCode::Space]), 0.016, &mut surface)
        .unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["component_input", "actor_input", "update_actor", "component_update"]
    );
}

#[test]
fn test_spawn_during_input_is_deferred() {
    let mut world = World::new();
    let (child_hits, child_count) = counter();
    let child_count = Rc::new(RefCell::new(Some(child_count)));

    world.add_actor(Actor::new().with_component(on_input(move |ctx, _| {
        if let Some(count) = child_count.borrow_mut().take() {
            let id = ctx.spawn(Actor::new().with_component(on_update(count)));
            assert!(ctx.world().pending_actors().contains(&id));
        }
    })));

    world.process_input(&KeyboardState::new());
    assert_eq!(world.pending_actors().len(), 1);

    world.update(0.016);
    assert_eq!(child_hits.get(), 0);
    assert_eq!(world.active_actors().len(), 2);
}

#[test]
fn test_components_added_later_are_drawn() {
    let mut world = World::new();
    let id = world.add_actor(Actor::new().with_position(Vec2::new(50.0, 50.0)));

    let direct = world.add_component(id, Box::new(textured("direct.png", 20))).unwrap();
    assert!(world.draw_list().contains(SpriteKey::new(id, direct)));

    let late = world
        .actor_mut(id)
        .unwrap()
        .add_component(Box::new(textured("late.png", 10)));
    assert!(!world.draw_list().contains(SpriteKey::new(id, late)));

    let mut surface = RecordingSurface::new();
    frame(&mut world, &mut surface);
    assert_eq!(surface.last_frame_textures(), vec!["late.png", "direct.png"]);

    let removed = world.remove_component(id, direct);
    assert!(removed.is_some());
    assert!(world.remove_component(id, direct).is_none());
    frame(&mut world, &mut surface);
    assert_eq!(surface.last_frame_textures(), vec!["late.png"]);
}

#[test]
fn test_structural_misuse_is_rejected() {
    let mut world = World::new();
    let id = world.add_actor(Actor::new());
    assert!(world.destroy_actor(id));
    assert!(!world.destroy_actor(id));

    assert!(world.remove_actor(id).is_none());
    assert!(world.actor(id).is_none());
    assert_eq!(
        world.add_component(id, Box::new(textured("x.png", 1))).unwrap_err(),
        WorldError::ActorNotFound(id)
    );
    assert!(world.remove_component(id, crate::foundation::collections::ComponentId::new(0)).is_none());
}

#[test]
fn test_clear_destroys_everything() {
    let mut world = World::new();
    for i in 0..5 {
        world.add_actor(Actor::new().with_component(textured("a.png", i)));
    }

    world.clear();

    assert_eq!(world.actor_count(), 0);
    assert!(world.active_actors().is_empty());
    assert!(world.draw_list().is_empty());
}
