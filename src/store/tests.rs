//! Store Integration Tests
//!
//! Exercise the stores end to end against the in-memory collection
//! client, observing mirrors through their watch channels so every
//! assertion runs after the subscription echo it depends on.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

use crate::domain::{
    today_local_string, ChecklistItem, ChoreDraft, ChoreUpdate, EventDraft, Profile, Recurrence,
    RewardDraft, NOTE_COLORS,
};
use crate::remote::{CollectionClient, MemoryCollectionClient};
use crate::FamilyHub;

const WAIT: Duration = Duration::from_secs(2);

async fn wait_mirror<T: Clone>(
    mut rx: watch::Receiver<Vec<T>>,
    pred: impl Fn(&[T]) -> bool,
) -> Vec<T> {
    timeout(WAIT, rx.wait_for(|v| pred(v.as_slice())))
        .await
        .expect("timed out waiting for mirror")
        .expect("mirror closed")
        .clone()
}

async fn wait_profile(hub: &FamilyHub, id: &str, pred: impl Fn(&Profile) -> bool) -> Profile {
    let profiles = wait_mirror(hub.profiles.watch(), |ps| {
        ps.iter().any(|p| p.id == id && pred(p))
    })
    .await;
    profiles.into_iter().find(|p| p.id == id).unwrap()
}

/// Connect, bootstrap, and wait for every seed set to echo back
async fn setup() -> (Arc<MemoryCollectionClient>, FamilyHub) {
    let client = Arc::new(MemoryCollectionClient::new());
    let hub = FamilyHub::connect(client.clone() as Arc<dyn CollectionClient>)
        .await
        .expect("failed to connect stores");
    hub.bootstrap().await;

    wait_mirror(hub.profiles.watch(), |p| p.len() == 2).await;
    wait_mirror(hub.chores.watch(), |c| c.len() == 2).await;
    wait_mirror(hub.events.watch(), |e| e.len() == 2).await;
    wait_mirror(hub.shop.watch_rewards(), |r| r.len() == 3).await;

    (client, hub)
}

#[tokio::test]
async fn test_bootstrap_seeds_default_data() {
    let (_client, hub) = setup().await;

    let ola = hub.profiles.get("ola").unwrap();
    assert_eq!(ola.points, 0);
    assert_eq!(ola.level, 1);
    assert_eq!(ola.title, "Beginner");
    assert!(ola.badges.is_empty());

    assert!(hub.chores.get("chore-vacuum").is_some());
    assert_eq!(hub.shop.rewards().len(), 3);
    assert!(hub.shop.purchases().is_empty());
}

#[tokio::test]
async fn test_bootstrap_runs_at_most_once() {
    let client = Arc::new(MemoryCollectionClient::new());
    let hub = FamilyHub::connect(client.clone() as Arc<dyn CollectionClient>)
        .await
        .unwrap();

    // Two bootstraps before any snapshot echoes back: the second is
    // blocked by the seeding flag, not by the still-empty mirror
    hub.bootstrap().await;
    hub.bootstrap().await;

    let profiles = wait_mirror(hub.profiles.watch(), |p| p.len() == 2).await;
    assert_eq!(profiles.len(), 2);

    // And once the mirror is populated, a later call is a plain no-op
    hub.bootstrap().await;
    assert_eq!(hub.profiles.profiles().len(), 2);
    wait_mirror(hub.chores.watch(), |c| c.len() == 2).await;
}

#[tokio::test]
async fn test_award_points_grows_points_xp_and_projection() {
    // Scenario A: 120 xp-affecting points from zero
    let (_client, hub) = setup().await;

    hub.profiles.award_points("ola", 120, true).await;
    let ola = wait_profile(&hub, "ola", |p| p.points == 120).await;
    assert_eq!(ola.xp, 120);
    assert_eq!(ola.level, 2);
    assert_eq!(ola.title, "Beginner");

    // Other profiles are untouched
    let maciek = hub.profiles.get("maciek").unwrap();
    assert_eq!(maciek.points, 0);
}

#[tokio::test]
async fn test_points_never_go_negative() {
    let (_client, hub) = setup().await;

    hub.profiles.award_points("ola", 30, true).await;
    wait_profile(&hub, "ola", |p| p.points == 30).await;

    hub.profiles.award_points("ola", -50, false).await;
    let ola = wait_profile(&hub, "ola", |p| p.points == 0).await;
    assert_eq!(ola.xp, 30);
}

#[tokio::test]
async fn test_spending_leaves_progression_untouched() {
    let (_client, hub) = setup().await;

    hub.profiles.award_points("ola", 450, true).await;
    let before = wait_profile(&hub, "ola", |p| p.points == 450).await;
    assert_eq!(before.level, 5);
    assert_eq!(before.title, "Helper");

    hub.profiles.award_points("ola", -200, false).await;
    let after = wait_profile(&hub, "ola", |p| p.points == 250).await;
    assert_eq!(after.xp, before.xp);
    assert_eq!(after.level, before.level);
    assert_eq!(after.title, before.title);
}

#[tokio::test]
async fn test_badge_award_is_idempotent() {
    let (_client, hub) = setup().await;

    hub.profiles.award_badge("ola", "early-bird").await;
    wait_profile(&hub, "ola", |p| p.badges.len() == 1).await;

    hub.profiles.award_badge("ola", "early-bird").await;
    let ola = hub.profiles.get("ola").unwrap();
    assert_eq!(ola.badges, vec!["early-bird".to_string()]);
}

#[tokio::test]
async fn test_award_to_unknown_profile_is_noop() {
    let (_client, hub) = setup().await;
    hub.profiles.award_points("stranger", 100, true).await;
    hub.profiles.award_badge("stranger", "ghost").await;
    assert_eq!(hub.profiles.profiles().len(), 2);
}

#[tokio::test]
async fn test_write_failure_is_swallowed() {
    let (client, hub) = setup().await;

    client.set_fail_writes(true);
    hub.profiles.award_points("ola", 50, true).await;
    client.set_fail_writes(false);

    // Nothing was written, nothing echoes, the mirror stays at zero
    let ola = hub.profiles.get("ola").unwrap();
    assert_eq!(ola.points, 0);
}

#[tokio::test]
async fn test_complete_awards_points_and_records_history() {
    // Scenario B: daily chore, checklist resets, one record, one award
    let (_client, hub) = setup().await;

    hub.chores
        .toggle_checklist_item("chore-vacuum", "vacuum-bedroom")
        .await;
    wait_mirror(hub.chores.watch(), |cs| {
        cs.iter()
            .any(|c| c.id == "chore-vacuum" && c.checklist.iter().any(|i| i.is_done))
    })
    .await;

    assert!(hub.chores.complete("chore-vacuum", "ola").await);

    let chores = wait_mirror(hub.chores.watch(), |cs| {
        cs.iter().any(|c| c.id == "chore-vacuum" && c.history.len() == 1)
    })
    .await;
    let vacuum = chores.into_iter().find(|c| c.id == "chore-vacuum").unwrap();
    assert_eq!(vacuum.history[0].date, today_local_string());
    assert_eq!(vacuum.history[0].completed_by, "ola");
    assert!(vacuum.history[0].time.is_some());
    // Weekly recurrence resets the checklist on completion
    assert!(vacuum.checklist.iter().all(|i| !i.is_done));

    let ola = wait_profile(&hub, "ola", |p| p.points == 30).await;
    assert_eq!(ola.xp, 30);
}

#[tokio::test]
async fn test_complete_is_idempotent_per_day() {
    let (_client, hub) = setup().await;

    assert!(hub.chores.complete("chore-trash", "ola").await);
    wait_mirror(hub.chores.watch(), |cs| {
        cs.iter().any(|c| c.id == "chore-trash" && c.history.len() == 1)
    })
    .await;
    wait_profile(&hub, "ola", |p| p.points == 10).await;
    assert!(hub.chores.is_completed_today("chore-trash"));

    // Second completion the same day changes nothing
    assert!(!hub.chores.complete("chore-trash", "ola").await);
    let trash = hub.chores.get("chore-trash").unwrap();
    assert_eq!(trash.history.len(), 1);
    assert_eq!(hub.profiles.get("ola").unwrap().points, 10);
}

#[tokio::test]
async fn test_complete_unknown_chore_returns_false() {
    let (_client, hub) = setup().await;
    assert!(!hub.chores.complete("nope", "ola").await);
    assert_eq!(hub.profiles.get("ola").unwrap().points, 0);
}

#[tokio::test]
async fn test_non_recurring_chore_keeps_checklist_state() {
    let (_client, hub) = setup().await;

    let chore = hub
        .chores
        .add_chore(ChoreDraft {
            title: "Assemble the shelf".to_string(),
            points: 20,
            recurrence: Recurrence::None,
            checklist: vec![ChecklistItem::new("shelf-unpack", "Unpack the box")],
            ..ChoreDraft::default()
        })
        .await;
    wait_mirror(hub.chores.watch(), |cs| cs.len() == 3).await;

    hub.chores
        .toggle_checklist_item(&chore.id, "shelf-unpack")
        .await;
    wait_mirror(hub.chores.watch(), |cs| {
        cs.iter()
            .any(|c| c.id == chore.id && c.checklist[0].is_done)
    })
    .await;

    assert!(hub.chores.complete(&chore.id, "maciek").await);
    let chores = wait_mirror(hub.chores.watch(), |cs| {
        cs.iter().any(|c| c.id == chore.id && c.history.len() == 1)
    })
    .await;
    let done = chores.into_iter().find(|c| c.id == chore.id).unwrap();
    // recurrence == none: the checklist is left as checked
    assert!(done.checklist[0].is_done);
}

#[tokio::test]
async fn test_toggle_checklist_item_flips_only_target() {
    let (_client, hub) = setup().await;

    hub.chores
        .toggle_checklist_item("chore-vacuum", "vacuum-hallway")
        .await;
    let chores = wait_mirror(hub.chores.watch(), |cs| {
        cs.iter()
            .any(|c| c.id == "chore-vacuum" && c.checklist.iter().any(|i| i.is_done))
    })
    .await;
    let vacuum = chores.into_iter().find(|c| c.id == "chore-vacuum").unwrap();
    for item in &vacuum.checklist {
        assert_eq!(item.is_done, item.id == "vacuum-hallway");
    }
}

#[tokio::test]
async fn test_update_chore_preserves_history() {
    let (_client, hub) = setup().await;

    assert!(hub.chores.complete("chore-trash", "maciek").await);
    wait_mirror(hub.chores.watch(), |cs| {
        cs.iter().any(|c| c.id == "chore-trash" && c.history.len() == 1)
    })
    .await;

    hub.chores
        .update_chore(
            "chore-trash",
            ChoreUpdate {
                title: Some("Take out the trash and recycling".to_string()),
                points: Some(15),
                ..ChoreUpdate::default()
            },
        )
        .await;
    let chores = wait_mirror(hub.chores.watch(), |cs| {
        cs.iter().any(|c| c.id == "chore-trash" && c.points == 15)
    })
    .await;
    let trash = chores.into_iter().find(|c| c.id == "chore-trash").unwrap();
    assert_eq!(trash.title, "Take out the trash and recycling");
    assert_eq!(trash.history.len(), 1);
}

#[tokio::test]
async fn test_add_and_delete_chore() {
    let (_client, hub) = setup().await;

    let chore = hub
        .chores
        .add_chore(ChoreDraft {
            title: "Water the plants".to_string(),
            points: 5,
            recurrence: Recurrence::Daily,
            assigned_to: Some("maciek".to_string()),
            ..ChoreDraft::default()
        })
        .await;
    let chores = wait_mirror(hub.chores.watch(), |cs| cs.len() == 3).await;
    let added = chores.into_iter().find(|c| c.id == chore.id).unwrap();
    assert!(added.history.is_empty());
    assert_eq!(added.assigned_to.as_deref(), Some("maciek"));

    hub.chores.delete_chore(&chore.id).await;
    wait_mirror(hub.chores.watch(), |cs| cs.len() == 2).await;
}

#[tokio::test]
async fn test_upcoming_events_are_sorted_by_date() {
    let (_client, hub) = setup().await;

    hub.events
        .add_event(EventDraft {
            title: "School play".to_string(),
            date: crate::domain::iso_date_in_days(5),
            created_by: "ola".to_string(),
            ..EventDraft::default()
        })
        .await;
    hub.events
        .add_event(EventDraft {
            title: "Grandma visit".to_string(),
            date: crate::domain::iso_date_in_days(1),
            created_by: "maciek".to_string(),
            ..EventDraft::default()
        })
        .await;
    wait_mirror(hub.events.watch(), |es| es.len() == 4).await;

    let upcoming = hub.events.upcoming();
    for pair in upcoming.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
}

#[tokio::test]
async fn test_update_and_delete_event() {
    let (_client, hub) = setup().await;

    hub.events
        .update_event(
            "event-dentist",
            crate::domain::EventUpdate {
                time: Some(Some("15:00".to_string())),
                location: Some(Some("Smile Clinic".to_string())),
                ..crate::domain::EventUpdate::default()
            },
        )
        .await;
    let events = wait_mirror(hub.events.watch(), |es| {
        es.iter()
            .any(|e| e.id == "event-dentist" && e.time.as_deref() == Some("15:00"))
    })
    .await;
    let dentist = events.into_iter().find(|e| e.id == "event-dentist").unwrap();
    assert_eq!(dentist.location.as_deref(), Some("Smile Clinic"));
    // Untouched fields survive the patch
    assert_eq!(dentist.title, "Dentist appointment");

    hub.events.delete_event("event-cinema").await;
    wait_mirror(hub.events.watch(), |es| es.len() == 1).await;
}

#[tokio::test]
async fn test_purchase_rejected_on_insufficient_balance() {
    // Scenario C: 30 points cannot buy a 50-point reward
    let (_client, hub) = setup().await;

    hub.profiles.award_points("ola", 30, true).await;
    wait_profile(&hub, "ola", |p| p.points == 30).await;

    assert!(!hub.shop.purchase("reward-gaming", "ola").await);
    assert_eq!(hub.profiles.get("ola").unwrap().points, 30);
    assert!(hub.shop.purchases().is_empty());
}

#[tokio::test]
async fn test_purchase_debits_points_and_appends_ledger() {
    // Scenario D: 80 points buy a 50-point reward, 30 remain
    let (_client, hub) = setup().await;

    hub.profiles.award_points("ola", 80, true).await;
    wait_profile(&hub, "ola", |p| p.points == 80).await;

    assert!(hub.shop.purchase("reward-gaming", "ola").await);

    let ola = wait_profile(&hub, "ola", |p| p.points == 30).await;
    // Spending is not experience
    assert_eq!(ola.xp, 80);

    let purchases = wait_mirror(hub.shop.watch_purchases(), |ps| ps.len() == 1).await;
    assert_eq!(purchases[0].reward_title, "1 hour of gaming");
    assert_eq!(purchases[0].purchased_by, "ola");
    assert_eq!(purchases[0].cost, 50);
    assert_eq!(purchases[0].date, today_local_string());
}

#[tokio::test]
async fn test_purchase_with_unknown_ids_is_rejected() {
    let (_client, hub) = setup().await;
    assert!(!hub.shop.purchase("reward-unicorn", "ola").await);
    assert!(!hub.shop.purchase("reward-gaming", "stranger").await);
    assert!(hub.shop.purchases().is_empty());
}

#[tokio::test]
async fn test_add_and_delete_reward() {
    let (_client, hub) = setup().await;

    let reward = hub
        .shop
        .add_reward(RewardDraft {
            title: "Movie night pick".to_string(),
            cost: 40,
            icon: "🎬".to_string(),
            category: "fun".to_string(),
        })
        .await;
    wait_mirror(hub.shop.watch_rewards(), |rs| rs.len() == 4).await;
    assert_eq!(hub.shop.get_reward(&reward.id).unwrap().cost, 40);

    hub.shop.delete_reward(&reward.id).await;
    wait_mirror(hub.shop.watch_rewards(), |rs| rs.len() == 3).await;
}

#[tokio::test]
async fn test_malformed_documents_are_skipped_and_defaults_applied() {
    let (client, hub) = setup().await;

    // Not decodable as a reward at all: skipped with a warning
    client
        .put("rewards", "broken", serde_json::json!({ "title": 12, "cost": "x" }))
        .await
        .unwrap();
    // Valid but missing optional fields: defaults fill in
    client
        .put(
            "rewards",
            "legacy",
            serde_json::json!({ "id": "legacy", "title": "Board game night", "cost": 25 }),
        )
        .await
        .unwrap();

    let rewards = wait_mirror(hub.shop.watch_rewards(), |rs| {
        rs.iter().any(|r| r.id == "legacy")
    })
    .await;
    assert_eq!(rewards.len(), 4);
    let legacy = rewards.into_iter().find(|r| r.id == "legacy").unwrap();
    assert_eq!(legacy.category, "general");
    assert_eq!(legacy.icon, "");
}

#[tokio::test]
async fn test_shopping_list_roundtrip() {
    let (_client, hub) = setup().await;

    let milk = hub.shopping.add_item("Milk").await;
    hub.shopping.add_item("Bread").await;
    wait_mirror(hub.shopping.watch(), |items| items.len() == 2).await;

    hub.shopping.toggle_item(&milk.id).await;
    let items = wait_mirror(hub.shopping.watch(), |items| {
        items.iter().any(|i| i.id == milk.id && i.is_bought)
    })
    .await;
    assert!(items.iter().any(|i| i.name == "Bread" && !i.is_bought));

    hub.shopping.remove_item(&milk.id).await;
    wait_mirror(hub.shopping.watch(), |items| items.len() == 1).await;
}

#[tokio::test]
async fn test_notes_use_palette_colors() {
    let (_client, hub) = setup().await;

    let note = hub.notes.add_note("Buy a birthday gift!", "ola").await;
    assert!(NOTE_COLORS.contains(&note.color.as_str()));

    let notes = wait_mirror(hub.notes.watch(), |ns| ns.len() == 1).await;
    assert_eq!(notes[0].text, "Buy a birthday gift!");
    assert_eq!(notes[0].author, "ola");

    hub.notes.remove_note(&note.id).await;
    wait_mirror(hub.notes.watch(), |ns| ns.is_empty()).await;
}
