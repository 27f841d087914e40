//! Integration Tests: Reactions
//!
//! Exercises the reaction service over in-memory stores.
//!
//! Coverage:
//! - One reaction per (user, post): re-reacting overwrites instead of adding
//! - Overwrite keeps id and created_at, refreshes updated_at
//! - Counts always equal the number of reacting users
//! - Invalid reaction types are a validation error
//! - Reacting to a missing post is NotFound
//! - Removing an absent reaction is NotFound
//! - my-reaction lookup and type filter on listings

mod common;

use common::MemoryDb;
use murmur_service::db::{Page, ReactionFilter};
use murmur_service::error::AppError;
use murmur_service::models::ReactionType;
use murmur_service::services::{PostService, ReactionService};
use uuid::Uuid;

struct Fixture {
    reactions: ReactionService,
    post_id: Uuid,
}

async fn fixture() -> Fixture {
    let db = MemoryDb::new();
    let posts = PostService::new(db.post_store());
    let post = posts
        .create_post(Uuid::new_v4(), "react to me")
        .await
        .unwrap();
    let reactions = ReactionService::new(db.reaction_store(), db.post_store());
    Fixture {
        reactions,
        post_id: post.id,
    }
}

#[tokio::test]
async fn re_reacting_overwrites_instead_of_adding() {
    let fx = fixture().await;
    let user = Uuid::new_v4();

    let liked = fx
        .reactions
        .set_reaction(user, fx.post_id, "like")
        .await
        .unwrap();
    let disliked = fx
        .reactions
        .set_reaction(user, fx.post_id, "dislike")
        .await
        .unwrap();

    // Same row, new type.
    assert_eq!(disliked.id, liked.id);
    assert_eq!(disliked.created_at, liked.created_at);
    assert!(disliked.updated_at > liked.updated_at);
    assert_eq!(disliked.reaction_type, ReactionType::Dislike);

    let all = fx
        .reactions
        .list_reactions(
            &ReactionFilter {
                post: Some(fx.post_id),
                ..Default::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 1);

    let counts = fx.reactions.get_reaction_counts(fx.post_id).await.unwrap();
    assert_eq!((counts.likes, counts.dislikes), (0, 1));
}

#[tokio::test]
async fn counts_track_reacting_users() {
    let fx = fixture().await;

    for _ in 0..3 {
        fx.reactions
            .set_reaction(Uuid::new_v4(), fx.post_id, "like")
            .await
            .unwrap();
    }
    for _ in 0..2 {
        fx.reactions
            .set_reaction(Uuid::new_v4(), fx.post_id, "dislike")
            .await
            .unwrap();
    }

    let counts = fx.reactions.get_reaction_counts(fx.post_id).await.unwrap();
    assert_eq!(counts.likes, 3);
    assert_eq!(counts.dislikes, 2);
}

#[tokio::test]
async fn invalid_reaction_type_is_rejected() {
    let fx = fixture().await;

    for bad in ["love", "LIKE", ""] {
        let err = fx
            .reactions
            .set_reaction(Uuid::new_v4(), fx.post_id, bad)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{:?}", bad);
    }
}

#[tokio::test]
async fn reacting_to_a_missing_post_is_not_found() {
    let fx = fixture().await;

    let err = fx
        .reactions
        .set_reaction(Uuid::new_v4(), Uuid::new_v4(), "like")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn removing_a_reaction() {
    let fx = fixture().await;
    let user = Uuid::new_v4();

    fx.reactions
        .set_reaction(user, fx.post_id, "like")
        .await
        .unwrap();
    fx.reactions
        .remove_reaction(user, fx.post_id)
        .await
        .unwrap();

    let counts = fx.reactions.get_reaction_counts(fx.post_id).await.unwrap();
    assert_eq!((counts.likes, counts.dislikes), (0, 0));

    // Second removal has nothing to remove.
    let err = fx
        .reactions
        .remove_reaction(user, fx.post_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn my_reaction_reports_only_the_callers_row() {
    let fx = fixture().await;
    let me = Uuid::new_v4();
    let someone_else = Uuid::new_v4();

    fx.reactions
        .set_reaction(someone_else, fx.post_id, "dislike")
        .await
        .unwrap();

    let err = fx.reactions.my_reaction(me, fx.post_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    fx.reactions
        .set_reaction(me, fx.post_id, "like")
        .await
        .unwrap();
    let mine = fx.reactions.my_reaction(me, fx.post_id).await.unwrap();
    assert_eq!(mine.user_id, me);
    assert_eq!(mine.reaction_type, ReactionType::Like);
}

#[tokio::test]
async fn listings_can_filter_by_type() {
    let fx = fixture().await;

    fx.reactions
        .set_reaction(Uuid::new_v4(), fx.post_id, "like")
        .await
        .unwrap();
    fx.reactions
        .set_reaction(Uuid::new_v4(), fx.post_id, "dislike")
        .await
        .unwrap();

    let likes = fx
        .reactions
        .list_reactions(
            &ReactionFilter {
                post: Some(fx.post_id),
                reaction_type: Some(ReactionType::Like),
                ..Default::default()
            },
            Page::default(),
        )
        .await
        .unwrap();

    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].reaction_type, ReactionType::Like);

    // Fixture db holds exactly the two reactions created above.
    let all = fx
        .reactions
        .list_reactions(&ReactionFilter::default(), Page::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}
