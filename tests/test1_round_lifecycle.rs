mod common;

use common::{
    FlakyStorage, card, close, date, init_logging, memory_storage, new_round, seeded_storage,
};
use rusty_handicap::HoleCount;
use rusty_handicap::error::CoreError;
use rusty_handicap::model::{MAX_HOLE_STROKES, NewRound};
use rusty_handicap::service::{
    HandicapRefresh, create_round, create_rounds_batch, current_handicap, delete_round,
    delete_rounds_batch,
};
use rusty_handicap::storage::Storage;

#[tokio::test]
async fn new_player_starts_at_max() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;
    let player = current_handicap(&storage, "amy").await?;
    assert_eq!(player.handicap_index, 54.0);
    Ok(())
}

#[tokio::test]
async fn three_rounds_publish_best_two() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;

    // differentials 5, 10, 15
    for (day, total) in [(1, 77), (2, 82), (3, 87)] {
        create_round(&storage, new_round("amy", date(5, day), total)).await?;
    }

    let player = current_handicap(&storage, "amy").await?;
    assert!(close(player.handicap_index, 7.5));
    Ok(())
}

#[tokio::test]
async fn refresh_status_and_differential() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;
    let mutation = create_round(&storage, new_round("amy", date(5, 1), 84)).await?;

    assert_eq!(mutation.round.total_score, 84);
    assert_eq!(mutation.round.number_of_holes, HoleCount::Eighteen);
    assert!(close(mutation.round.score_differential, 12.0));
    assert_eq!(
        mutation.handicap,
        HandicapRefresh::Updated {
            user_id: "amy".to_string(),
            handicap_index: 12.0,
            rounds_considered: 1,
        }
    );
    Ok(())
}

#[tokio::test]
async fn nine_hole_round_uses_half_rating_full_slope() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;
    let nine = NewRound {
        hole_scores: card(40, 9),
        ..new_round("amy", date(5, 1), 0)
    };
    let mutation = create_round(&storage, nine).await?;

    assert_eq!(mutation.round.number_of_holes, HoleCount::Nine);
    assert!(close(mutation.round.course_rating, 36.0));
    assert_eq!(mutation.round.slope_rating, 113);
    assert!(close(mutation.round.score_differential, 8.0));
    Ok(())
}

#[tokio::test]
async fn tee_lookup_uses_tee_ratings() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;
    let blue = NewRound {
        tee: "Blue".to_string(),
        ..new_round("amy", date(5, 1), 90)
    };
    let mutation = create_round(&storage, blue).await?;

    assert_eq!(mutation.round.tee, "blue");
    assert_eq!(mutation.round.slope_rating, 131);
    let expected = (90.0 - 74.1) * 113.0 / 131.0;
    assert!(close(mutation.round.score_differential, expected));
    Ok(())
}

#[tokio::test]
async fn rejects_bad_cards() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;

    let twelve_holes = NewRound {
        hole_scores: card(50, 12),
        ..new_round("amy", date(5, 1), 0)
    };
    assert!(matches!(
        create_round(&storage, twelve_holes).await,
        Err(CoreError::Validation(_))
    ));

    let mut zero_hole = new_round("amy", date(5, 1), 80);
    zero_hole.hole_scores[4] = 0;
    assert!(matches!(
        create_round(&storage, zero_hole).await,
        Err(CoreError::Validation(_))
    ));

    assert!(matches!(
        create_round(&storage, new_round("nobody", date(5, 1), 80)).await,
        Err(CoreError::NotFound(_))
    ));

    let unknown_tee = NewRound {
        tee: "gold".to_string(),
        ..new_round("amy", date(5, 1), 80)
    };
    assert!(matches!(
        create_round(&storage, unknown_tee).await,
        Err(CoreError::NotFound(_))
    ));

    let unknown_course = NewRound {
        course_id: "nowhere".to_string(),
        ..new_round("amy", date(5, 1), 80)
    };
    assert!(matches!(
        create_round(&storage, unknown_course).await,
        Err(CoreError::NotFound(_))
    ));

    let huge_strokes = NewRound {
        hole_scores: vec![u32::MAX / 2; 18],
        ..new_round("amy", date(5, 1), 80)
    };
    assert!(matches!(
        create_round(&storage, huge_strokes).await,
        Err(CoreError::Validation(_))
    ));

    let mut one_bad_hole = new_round("amy", date(5, 1), 80);
    one_bad_hole.hole_scores[17] = MAX_HOLE_STROKES + 1;
    assert!(matches!(
        create_round(&storage, one_bad_hole).await,
        Err(CoreError::Validation(_))
    ));

    assert!(storage.recent_rounds("amy", 20).await?.is_empty());

    // card(80, 18) opens with a 5; raising it to the cap adds 25 strokes.
    let mut worst_allowed = new_round("amy", date(5, 1), 80);
    worst_allowed.hole_scores[0] = MAX_HOLE_STROKES;
    let stored = create_round(&storage, worst_allowed).await?;
    assert_eq!(stored.round.total_score, 105);
    Ok(())
}

#[tokio::test]
async fn only_latest_twenty_rounds_count() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;

    // Oldest round is excellent, the 20 after it are all differential 20.
    create_round(&storage, new_round("amy", date(1, 1), 70)).await?;
    for day in 1..=20 {
        create_round(&storage, new_round("amy", date(2, day), 92)).await?;
    }

    let player = current_handicap(&storage, "amy").await?;
    assert!(close(player.handicap_index, 20.0));
    Ok(())
}

#[tokio::test]
async fn recency_is_by_date_not_insertion() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;

    for day in 1..=20 {
        create_round(&storage, new_round("amy", date(3, day), 92)).await?;
    }
    // Entered late but played earliest, so it falls outside the window.
    let mutation = create_round(&storage, new_round("amy", date(1, 5), 70)).await?;

    assert!(close(mutation.handicap.handicap_index().unwrap_or_default(), 20.0));
    Ok(())
}

#[tokio::test]
async fn delete_recomputes() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;
    let keep = create_round(&storage, new_round("amy", date(5, 1), 82)).await?;
    let best = create_round(&storage, new_round("amy", date(5, 2), 74)).await?;
    assert!(close(current_handicap(&storage, "amy").await?.handicap_index, 2.0));

    let deleted = delete_round(&storage, best.round.id).await?;
    assert_eq!(deleted.round.id, best.round.id);
    assert!(close(current_handicap(&storage, "amy").await?.handicap_index, 10.0));

    delete_round(&storage, keep.round.id).await?;
    assert_eq!(current_handicap(&storage, "amy").await?.handicap_index, 54.0);

    assert!(matches!(
        delete_round(&storage, keep.round.id).await,
        Err(CoreError::NotFound(_))
    ));
    Ok(())
}

#[tokio::test]
async fn batch_create_refreshes_each_player_once() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy", "bo"]).await;
    let batch = create_rounds_batch(
        &storage,
        vec![
            new_round("amy", date(4, 1), 77),
            new_round("bo", date(4, 1), 100),
            new_round("amy", date(4, 2), 82),
            new_round("bo", date(4, 2), 90),
        ],
    )
    .await?;

    assert_eq!(batch.rounds.len(), 4);
    assert_eq!(batch.handicaps.len(), 2);
    let users: Vec<&str> = batch.handicaps.iter().map(HandicapRefresh::user_id).collect();
    assert_eq!(users, vec!["amy", "bo"]);
    assert!(batch.handicaps.iter().all(HandicapRefresh::is_updated));

    assert!(close(current_handicap(&storage, "amy").await?.handicap_index, 5.0));
    assert!(close(current_handicap(&storage, "bo").await?.handicap_index, 18.0));
    Ok(())
}

#[tokio::test]
async fn batch_create_validates_before_inserting() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy"]).await;
    let result = create_rounds_batch(
        &storage,
        vec![
            new_round("amy", date(4, 1), 77),
            new_round("ghost", date(4, 1), 80),
        ],
    )
    .await;

    assert!(matches!(result, Err(CoreError::NotFound(_))));
    assert!(storage.recent_rounds("amy", 20).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn batch_delete_reports_missing_ids() -> Result<(), Box<dyn std::error::Error>> {
    let storage = memory_storage(&["amy", "bo"]).await;
    let a = create_round(&storage, new_round("amy", date(4, 1), 77)).await?;
    let b = create_round(&storage, new_round("bo", date(4, 1), 90)).await?;
    let b2 = create_round(&storage, new_round("bo", date(4, 2), 80)).await?;

    let batch = delete_rounds_batch(&storage, &[a.round.id, b2.round.id, 999]).await?;
    assert_eq!(batch.rounds.len(), 2);
    assert_eq!(batch.missing_round_ids, vec![999]);
    assert_eq!(batch.handicaps.len(), 2);

    assert_eq!(current_handicap(&storage, "amy").await?.handicap_index, 54.0);
    assert!(close(current_handicap(&storage, "bo").await?.handicap_index, 18.0));
    assert!(storage.get_round(b.round.id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn failed_refresh_does_not_fail_round_save() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let storage = seeded_storage(FlakyStorage::default(), &["amy"]).await;
    create_round(&storage, new_round("amy", date(5, 1), 82)).await?;
    assert!(close(current_handicap(&storage, "amy").await?.handicap_index, 10.0));

    storage.set_failing(true);
    let mutation = create_round(&storage, new_round("amy", date(5, 2), 74)).await?;
    assert!(matches!(mutation.handicap, HandicapRefresh::Failed { .. }));
    assert_eq!(mutation.handicap.user_id(), "amy");

    // Round is stored, handicap is stale.
    assert_eq!(storage.recent_rounds("amy", 20).await?.len(), 2);
    assert!(close(current_handicap(&storage, "amy").await?.handicap_index, 10.0));

    let deleted = delete_round(&storage, mutation.round.id).await?;
    assert!(!deleted.handicap.is_updated());
    assert!(storage.get_round(mutation.round.id).await?.is_none());

    storage.set_failing(false);
    create_round(&storage, new_round("amy", date(5, 3), 76)).await?;
    assert!(close(current_handicap(&storage, "amy").await?.handicap_index, 4.0));
    Ok(())
}

#[tokio::test]
async fn failed_batch_insert_refreshes_stored_rounds() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let storage = seeded_storage(FlakyStorage::default(), &["amy"]).await;
    storage.fail_insert_number(2);

    let result = create_rounds_batch(
        &storage,
        vec![
            new_round("amy", date(6, 1), 82),
            new_round("amy", date(6, 2), 77),
        ],
    )
    .await;
    assert!(matches!(result, Err(CoreError::Storage(_))));

    assert_eq!(storage.recent_rounds("amy", 20).await?.len(), 1);
    assert!(close(current_handicap(&storage, "amy").await?.handicap_index, 10.0));
    Ok(())
}
