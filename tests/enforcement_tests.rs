//! End-to-end properties of the enforcement engine driven through the
//! in-memory host.

use capguard::adapter::outbound::Position;
use capguard::application::EnforcerSettings;
use capguard::domain::{ContainerSide, DragLanding, Interception, SlotCategory};
use capguard::port::{ContainerHost, LimitEnforcement, LimitQuery, NoticeKind};
use capguard::testkit::domain::{good, stack};
use capguard::testkit::Harness;

fn quick_login() -> EnforcerSettings {
    EnforcerSettings {
        login_delay: 1,
        ..EnforcerSettings::default()
    }
}

/// Partial-fill arithmetic: cap 10, holding 7, picking up 5.
#[test]
fn partial_pickup_accepts_exactly_what_fits() {
    let mut h = Harness::new(&[("ENDER_PEARL", 10)]);
    let actor = h.join_quietly();
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("ENDER_PEARL", 7));
    let ground = h
        .host
        .spawn_ground(Position::default(), stack("ENDER_PEARL", 5));

    let outcome = h.host.pick_up(&h.enforcer, &actor, ground);

    assert_eq!(
        outcome,
        Interception::Trim {
            accepted: 3,
            remainder: 2
        }
    );
    assert_eq!(h.held(&actor, "ENDER_PEARL"), 10);
    assert_eq!(h.on_ground("ENDER_PEARL"), 2);

    let notices = h.notifier.for_actor(&actor);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::PartialAccepted);
    assert!(notices[0].text.contains("Ender Pearl"));
    assert!(notices[0].text.contains("10"));
    assert!(notices[0].text.contains('3'));
}

#[test]
fn saturation_then_discard_then_readd() {
    let mut h = Harness::new(&[("STONE", 2)]);
    let actor = h.join_quietly();
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("STONE", 2));

    let first = h.host.spawn_ground(Position::default(), stack("STONE", 1));
    assert_eq!(h.host.pick_up(&h.enforcer, &actor, first), Interception::Cancel);
    assert_eq!(h.held(&actor, "STONE"), 2);

    assert_eq!(
        h.host.discard(&h.enforcer, &actor, 0, 1),
        Interception::Proceed
    );
    assert_eq!(h.held(&actor, "STONE"), 1);

    // The stone just discarded is on the ground next to the first one
    let again = h.host.ground()[0].id;
    assert_eq!(h.host.pick_up(&h.enforcer, &actor, again), Interception::Proceed);
    assert_eq!(h.held(&actor, "STONE"), 2);
}

#[test]
fn login_reconciliation_removes_excess_with_one_notice() {
    let mut h = Harness::with_settings(&[("TOTEM_OF_UNDYING", 2)], quick_login());
    let actor = h.join_quietly();
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("TOTEM_OF_UNDYING", 1));
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 1, stack("TOTEM_OF_UNDYING", 1));
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 2, stack("TOTEM_OF_UNDYING", 1));
    h.host
        .insert_into_slot(&actor, SlotCategory::Armor, 0, stack("TOTEM_OF_UNDYING", 1));
    h.host
        .insert_into_slot(&actor, SlotCategory::OffHand, 0, stack("TOTEM_OF_UNDYING", 1));

    h.enforcer.on_session_start(&actor);
    h.tick(1);

    assert_eq!(h.held(&actor, "TOTEM_OF_UNDYING"), 2);
    let notices = h.notifier.for_actor(&actor);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::ItemsRemoved);
    assert!(notices[0].text.contains('3'));
}

#[test]
fn rejoining_runs_a_fresh_sweep() {
    let mut h = Harness::with_settings(&[("ENDER_PEARL", 4)], quick_login());
    let actor = h.join();
    h.tick(1);
    h.leave(&actor);

    // Holdings edited while offline
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("ENDER_PEARL", 9));
    h.rejoin(&actor);
    h.tick(1);

    assert_eq!(h.held(&actor, "ENDER_PEARL"), 4);
}

#[test]
fn enforce_now_twice_removes_only_once() {
    let mut h = Harness::new(&[("ENDER_PEARL", 3)]);
    let actor = h.join_quietly();
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("ENDER_PEARL", 8));
    let pearl = good("ENDER_PEARL");

    assert_eq!(h.enforcer.enforce_now(&mut h.host, &actor, &pearl), 5);
    assert_eq!(h.enforcer.enforce_now(&mut h.host, &actor, &pearl), 0);
    assert_eq!(h.held(&actor, "ENDER_PEARL"), 3);
}

#[test]
fn unlimited_goods_are_never_gated() {
    let mut h = Harness::new(&[("ENDER_PEARL", 1)]);
    let actor = h.join_quietly();
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("STONE", 64));

    let ground = h.host.spawn_ground(Position::default(), stack("STONE", 64));
    assert_eq!(h.host.pick_up(&h.enforcer, &actor, ground), Interception::Proceed);

    h.host.put_on_cursor(&actor, stack("STONE", 64));
    assert_eq!(
        h.host.place_cursor(&h.enforcer, &actor, ContainerSide::Own, 9),
        Interception::Proceed
    );

    assert!(!h.enforcer.is_limited(&good("STONE")));
    assert_eq!(h.held(&actor, "STONE"), 192);
    assert!(h.notifier.is_empty());
}

/// A banned good never ends up in holdings whichever pathway is tried.
#[test]
fn banned_goods_never_enter_holdings() {
    let mut h = Harness::new(&[("TNT", 0)]);
    let actor = h.join_quietly();
    h.host.open_container(&actor, vec![Some(stack("TNT", 5))]);

    let ground = h.host.spawn_ground(Position::default(), stack("TNT", 1));
    assert_eq!(h.host.pick_up(&h.enforcer, &actor, ground), Interception::Cancel);

    assert_eq!(
        h.host
            .shift_transfer(&h.enforcer, &actor, ContainerSide::Foreign, 0),
        Interception::Cancel
    );

    // Withdrawing onto the cursor is allowed; placing it into holdings is not
    h.host.pick_from_container(&h.enforcer, &actor, 0);
    assert_eq!(
        h.host.place_cursor(&h.enforcer, &actor, ContainerSide::Own, 0),
        Interception::Cancel
    );
    let landings = vec![DragLanding {
        side: ContainerSide::Own,
        slot: 2,
        quantity: 1,
    }];
    assert_eq!(h.host.drag(&h.enforcer, &actor, landings), Interception::Cancel);

    h.host.close_view(&h.enforcer, &actor);
    h.tick(1);

    assert_eq!(h.held(&actor, "TNT"), 0);
    assert_eq!(h.held_with_cursor(&actor, "TNT"), 0);
    assert_eq!(h.on_ground("TNT"), 6);
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn hand_swap_conserves_holdings() {
    let mut h = Harness::new(&[("TOTEM_OF_UNDYING", 1), ("SHIELD", 1)]);
    let actor = h.join_quietly();
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("TOTEM_OF_UNDYING", 1));
    h.host
        .insert_into_slot(&actor, SlotCategory::OffHand, 0, stack("SHIELD", 1));

    for _ in 0..4 {
        assert_eq!(h.host.swap_hands(&h.enforcer, &actor), Interception::Proceed);
        assert_eq!(h.held(&actor, "TOTEM_OF_UNDYING"), 1);
        assert_eq!(h.held(&actor, "SHIELD"), 1);
    }
    assert!(h.notifier.is_empty());
}

/// After any mix of pathways quiesces, no limited good exceeds its cap.
#[test]
fn caps_hold_after_mixed_traffic() {
    let mut h = Harness::with_settings(&[("ENDER_PEARL", 16), ("GOLDEN_APPLE", 5)], quick_login());
    let actor = h.join();
    h.host.open_container(
        &actor,
        vec![
            Some(stack("ENDER_PEARL", 16)),
            Some(stack("GOLDEN_APPLE", 10)),
            Some(stack("ENDER_PEARL", 16)),
        ],
    );

    for (x, quantity) in [(0, 7), (1, 9), (2, 3)] {
        let ground = h
            .host
            .spawn_ground(Position::new(x, 64, 0), stack("ENDER_PEARL", quantity));
        h.host.pick_up(&h.enforcer, &actor, ground);
    }
    h.host
        .shift_transfer(&h.enforcer, &actor, ContainerSide::Foreign, 0);
    h.host
        .shift_transfer(&h.enforcer, &actor, ContainerSide::Foreign, 1);
    h.tick(1);
    h.host
        .shift_transfer(&h.enforcer, &actor, ContainerSide::Foreign, 2);
    h.host.pick_from_container(&h.enforcer, &actor, 2);
    h.host
        .place_cursor(&h.enforcer, &actor, ContainerSide::Own, 20);
    h.host.close_view(&h.enforcer, &actor);
    h.tick(25);

    for (name, cap) in [("ENDER_PEARL", 16), ("GOLDEN_APPLE", 5)] {
        assert!(h.held_with_cursor(&actor, name) <= cap, "{name} over cap");
    }
    assert_eq!(h.held(&actor, "ENDER_PEARL"), 16);
    assert_eq!(h.held(&actor, "GOLDEN_APPLE"), 5);
}

#[test]
fn raising_a_limit_takes_effect_on_the_next_event() {
    let mut h = Harness::new(&[("ENDER_PEARL", 1)]);
    let actor = h.join_quietly();
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("ENDER_PEARL", 1));
    let ground = h
        .host
        .spawn_ground(Position::default(), stack("ENDER_PEARL", 3));
    assert_eq!(h.host.pick_up(&h.enforcer, &actor, ground), Interception::Cancel);

    h.enforcer.registry().set_limit(good("ENDER_PEARL"), 16);

    assert_eq!(h.host.pick_up(&h.enforcer, &actor, ground), Interception::Proceed);
    assert_eq!(h.held(&actor, "ENDER_PEARL"), 4);
}

#[test]
fn query_surface_reports_configured_caps() {
    let h = Harness::new(&[("TNT", 0), ("ELYTRA", 1)]);
    assert!(h.enforcer.is_limited(&good("tnt")));
    assert_eq!(h.enforcer.limit_of(&good("ELYTRA")), Some(1));
    assert_eq!(h.enforcer.limit_of(&good("STONE")), None);
    assert_eq!(
        h.enforcer.all_limited_goods(),
        vec![good("ELYTRA"), good("TNT")]
    );
}

#[test]
fn cursor_is_excluded_from_count_unless_in_transit() {
    let mut h = Harness::new(&[("ENDER_PEARL", 16)]);
    let actor = h.join_quietly();
    h.host
        .insert_into_slot(&actor, SlotCategory::Primary, 0, stack("ENDER_PEARL", 6));
    h.host.put_on_cursor(&actor, stack("ENDER_PEARL", 10));

    assert_eq!(h.held(&actor, "ENDER_PEARL"), 6);
    assert_eq!(h.held_with_cursor(&actor, "ENDER_PEARL"), 16);

    // Placing the whole cursor fits exactly
    assert_eq!(
        h.host.place_cursor(&h.enforcer, &actor, ContainerSide::Own, 1),
        Interception::Proceed
    );
    assert!(h.host.cursor(&actor).is_none());
    assert_eq!(h.held(&actor, "ENDER_PEARL"), 16);
}
