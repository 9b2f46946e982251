use std::path::Path;

use pagestack::core::{NavError, NavigationController};
use pagestack::display::{PageContext, SlotId};
use pagestack::media::{AppId, Location, Marker, MediaItem};
use pagestack::replay::{
    ContentCall, RecordingFactory, Replay, Scenario, ScriptedMedia, ScriptedSlot, Step,
};

// ============================================================================
// Helper Functions
// ============================================================================

type Controller = NavigationController<ScriptedMedia, RecordingFactory>;

struct Harness {
    controller: Controller,
    slots: Vec<ScriptedSlot>,
    media: ScriptedMedia,
    factory: RecordingFactory,
}

/// Controller bound to a pool of `pool_size` scripted slots, app "radio".
fn harness(pool_size: u32) -> Harness {
    let media = ScriptedMedia::new("radio");
    let factory = RecordingFactory::default();
    let mut controller = NavigationController::new(media.clone(), factory.clone());
    let mut slots = ScriptedSlot::pool(pool_size);
    controller
        .bind(
            &mut slots,
            PageContext {
                playback: SlotId(50),
                input: SlotId(51),
            },
        )
        .unwrap();
    Harness {
        controller,
        slots,
        media,
        factory,
    }
}

impl Harness {
    fn focus(&mut self, slot: u32) {
        assert!(self.slots[slot as usize].emit(true));
        self.controller.pump();
    }

    fn push(&mut self, id: &str) -> SlotId {
        self.controller
            .push_page(Location::Directory(item(id)), None)
            .unwrap()
            .slot()
    }

    fn history_ids(&self) -> Vec<String> {
        self.controller
            .history()
            .entries()
            .iter()
            .map(|marker| match marker {
                Marker::Root => "<root>".to_string(),
                Marker::Item(item) => item.id.clone(),
            })
            .collect()
    }
}

fn item(id: &str) -> MediaItem {
    MediaItem::new(id, id.to_uppercase())
}

// ============================================================================
// Stack / Slot Properties
// ============================================================================

#[test]
fn test_depth_matches_cyclic_slot() {
    for pool_size in 1..=4u32 {
        let mut h = harness(pool_size);
        h.controller.push_page(Location::Root, None).unwrap();
        for n in 0..9 {
            h.push(&format!("dir{n}"));
        }
        for (depth, page) in h.controller.pages().iter().enumerate() {
            assert_eq!(page.slot(), SlotId(depth as u32 % pool_size));
        }
    }
}

#[test]
fn test_one_pop_per_focus_event() {
    let mut h = harness(3);
    h.focus(0);
    for n in 0..5 {
        h.push(&format!("dir{n}"));
    }
    assert_eq!(h.controller.depth(), 6);

    // Top sits on slot 2; focusing slot 0 skips several logical levels
    // but still pops exactly one page.
    assert_eq!(h.controller.top().unwrap().slot(), SlotId(2));
    h.focus(0);
    assert_eq!(h.controller.depth(), 5);
}

#[test]
fn test_empty_stack_recovers_with_single_root() {
    let mut h = harness(2);
    h.focus(0);
    h.push("a");
    h.focus(1);

    h.focus(0); // back to root
    assert_eq!(h.controller.depth(), 1);
    h.focus(1); // backed out past the root
    assert_eq!(h.controller.depth(), 1);
    let root = h.controller.top().unwrap();
    assert!(root.location().is_root());
    assert_eq!(root.slot(), SlotId(1));
    assert!(root.is_shown());
}

#[test]
fn test_backed_out_past_root_on_same_slot() {
    let mut h = harness(2);
    h.focus(0);
    h.push("a");
    h.focus(1);
    h.controller.reset_for_entry();

    h.focus(0);
    assert_eq!(h.controller.depth(), 1);
    assert_eq!(h.controller.top().unwrap().slot(), SlotId(0));
}

// ============================================================================
// History Properties
// ============================================================================

#[test]
fn test_repeated_push_does_not_grow_history() {
    let mut h = harness(3);
    h.controller.push_page(Location::Root, None).unwrap();
    h.push("x");
    h.controller.select_item(&item("song")).unwrap();
    h.controller.reset_for_entry();

    for _ in 0..4 {
        h.controller.reset_for_entry();
        h.controller.push_page(Location::Root, None).unwrap();
        h.push("x");
    }
    assert_eq!(h.history_ids(), vec!["<root>", "x", "song"]);
}

#[test]
fn test_divergent_selection_invalidates_suffix() {
    let mut h = harness(3);
    h.controller.push_page(Location::Root, None).unwrap();
    h.push("y");
    h.push("z");
    h.controller.reset_for_entry();
    h.controller.push_page(Location::Root, None).unwrap();
    assert_eq!(h.history_ids(), vec!["<root>", "y", "z"]);

    h.push("w");
    assert_eq!(h.history_ids(), vec!["<root>", "w"]);
}

#[test]
fn test_reset_for_entry_preserves_history_and_hints() {
    let mut h = harness(3);
    h.push("x");
    h.push("y");
    h.controller.reset_for_entry();

    assert_eq!(h.controller.depth(), 0);
    assert_eq!(h.history_ids(), vec!["x", "y"]);

    let page = h
        .controller
        .push_page(Location::Directory(item("x")), None)
        .unwrap();
    assert_eq!(page.previously_selected(), Some(&Marker::Item(item("y"))));
}

#[test]
fn test_select_item_is_a_leaf_action() {
    let mut h = harness(3);
    h.focus(0);
    h.push("album");
    h.controller.select_item(&item("one")).unwrap();
    h.controller.select_item(&item("two")).unwrap();

    assert_eq!(h.controller.depth(), 2);
    assert_eq!(h.history_ids(), vec!["<root>", "album", "two"]);
    assert_eq!(h.media.played(), vec![item("one"), item("two")]);
}

// ============================================================================
// App Switching
// ============================================================================

#[test]
fn test_app_switch_resets_stack_and_history() {
    let mut h = harness(3);
    h.focus(0);
    h.push("b");
    h.focus(1);
    h.push("c");
    h.focus(2);
    assert_eq!(h.controller.depth(), 3);
    assert_eq!(h.controller.history().len(), 3);

    h.media.switch_app(Some("podcasts"));
    h.focus(2);

    assert_eq!(h.controller.depth(), 1);
    assert!(h.controller.top().unwrap().location().is_root());
    assert!(h.controller.history().is_empty());
    assert_eq!(h.controller.last_app(), Some(&AppId::new("podcasts")));
}

#[test]
fn test_app_switch_only_noticed_on_focus() {
    let mut h = harness(3);
    h.focus(0);
    h.push("b");
    h.media.switch_app(Some("podcasts"));

    h.push("c");
    assert_eq!(h.controller.depth(), 3);
    assert_eq!(h.controller.last_app(), Some(&AppId::new("radio")));
}

#[test]
fn test_controllers_track_apps_independently() {
    let mut first = harness(2);
    let mut second = harness(2);
    first.focus(0);
    second.media.switch_app(Some("podcasts"));
    second.focus(0);

    assert_eq!(first.controller.last_app(), Some(&AppId::new("radio")));
    assert_eq!(second.controller.last_app(), Some(&AppId::new("podcasts")));
}

// ============================================================================
// Page Lifecycle
// ============================================================================

#[test]
fn test_back_navigation_scenario_with_slot_reuse() {
    let mut h = harness(3);
    let root_slot = h.controller.push_page(Location::Root, None).unwrap().slot();
    let a = h.push("dirA");
    let b = h.push("dirB");
    let c = h.push("dirC");
    assert_eq!([root_slot, a, b, c], [SlotId(0), SlotId(1), SlotId(2), SlotId(0)]);

    h.focus(0);
    h.focus(2);

    assert_eq!(h.controller.depth(), 3);
    let top = h.controller.top().unwrap();
    assert_eq!(top.slot(), SlotId(2));
    assert_eq!(top.location(), &Location::Directory(item("dirB")));
    assert!(top.is_shown());

    // dirB: bound on push, detached when dirC covered it, rebound and shown
    // exactly once on the way back.
    assert_eq!(
        h.factory.calls_for(2),
        vec![
            ContentCall::Init,
            ContentCall::Hide,
            ContentCall::Init,
            ContentCall::Show,
        ]
    );
    // dirC was shown, then detached when popped.
    assert_eq!(
        h.factory.calls_for(3),
        vec![ContentCall::Init, ContentCall::Show, ContentCall::Hide]
    );
}

#[test]
fn test_push_before_bind_fails_fast() {
    let mut controller = NavigationController::new(ScriptedMedia::new("radio"), RecordingFactory::default());
    assert_eq!(
        controller.push_page(Location::Root, None).unwrap_err(),
        NavError::NotBound
    );
}

#[tokio::test]
async fn test_run_processes_queue_until_pool_dropped() {
    let Harness {
        mut controller,
        slots,
        ..
    } = harness(2);
    slots[0].emit(true);
    slots[1].emit(true);
    slots[0].emit(true);
    drop(slots);

    assert_eq!(controller.run().await, Ok(3));
    // root@0, back past root → root@1, back past root → root@0
    assert_eq!(controller.depth(), 1);
    assert_eq!(controller.top().unwrap().slot(), SlotId(0));
}

// ============================================================================
// Scenario Files
// ============================================================================

#[test]
fn test_bundled_scenario_replays() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/back_navigation.toml");
    let scenario = Scenario::load(&path).unwrap();
    let mut replay = Replay::new(scenario.pool_size.unwrap(), scenario.app.as_deref()).unwrap();

    let mut depths = Vec::new();
    let last = replay
        .run(&scenario.steps, |_, _, snapshot| depths.push(snapshot.depth))
        .unwrap();

    assert_eq!(depths, vec![1, 2, 2, 3, 3, 4, 4, 4, 3, 2, 2, 0, 1]);
    assert_eq!(last.history.len(), 5);
    assert_eq!(
        last.pages[0].previously_selected,
        Some(Marker::Item(MediaItem::new("albums", "Albums")))
    );
    assert_eq!(
        replay.media().played(),
        vec![MediaItem::new("the-end", "The End")]
    );
}

#[test]
fn test_scenario_step_order_matters() {
    let steps = vec![
        Step::Push {
            directory: Some(item("a")),
            slot: None,
        },
        Step::Focus { slot: 1 },
    ];
    let mut replay = Replay::new(2, None).unwrap();
    let last = replay.run(&steps, |_, _, _| {}).unwrap();
    // a@0 is not on slot 1: popped, then a root replaces it.
    assert_eq!(last.depth, 1);
    assert_eq!(last.pages[0].location, Location::Root);
}
