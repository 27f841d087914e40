//! In-Memory Stores for Integration Tests
//!
//! Provides an in-memory implementation of every store trait so service
//! behavior (authorization rules, cascades, the reaction upsert) can be
//! tested without a real database.

// Each test binary compiles this module separately and uses a subset of it.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use murmur_service::db::{
    AccountPatch, CommentFilter, CommentStore, NewUser, Page, PostFilter, PostStore,
    ReactionCounts, ReactionFilter, ReactionStore, UserStore,
};
use murmur_service::error::{AppError, Result};
use murmur_service::models::{Account, Comment, Post, Profile, Reaction, ReactionType, User};
use murmur_service::security::jwt;
use murmur_service::storage::PhotoStore;

/// Initialize signing keys once for the whole test binary.
pub fn init_jwt() {
    let _ = jwt::initialize("test-secret", 900, 3600);
}

/// Photo store rooted in a fresh temp directory. The tempdir handle must
/// outlive the store, so both are returned.
pub async fn temp_photo_store() -> (PhotoStore, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = PhotoStore::new(dir.path());
    store.ensure_root().await.expect("ensure_root");
    (store, dir)
}

#[derive(Default)]
struct State {
    users: Vec<User>,
    profiles: Vec<Profile>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    reactions: Vec<Reaction>,
    seq: i64,
}

impl State {
    /// Strictly increasing timestamps, so insertion order and
    /// (created_at, id) order agree even within one test run.
    fn next_ts(&mut self) -> DateTime<Utc> {
        self.seq += 1;
        Utc::now() + Duration::microseconds(self.seq)
    }

    fn account(&self, user: &User) -> Account {
        let profile = self
            .profiles
            .iter()
            .find(|p| p.user_id == user.id)
            .expect("profile exists for every user")
            .clone();
        Account {
            user: user.clone(),
            profile,
        }
    }
}

/// One shared in-memory database implementing all four store traits.
#[derive(Clone, Default)]
pub struct MemoryDb {
    state: Arc<Mutex<State>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_store(&self) -> Arc<dyn UserStore> {
        Arc::new(self.clone())
    }

    pub fn post_store(&self) -> Arc<dyn PostStore> {
        Arc::new(self.clone())
    }

    pub fn comment_store(&self) -> Arc<dyn CommentStore> {
        Arc::new(self.clone())
    }

    pub fn reaction_store(&self) -> Arc<dyn ReactionStore> {
        Arc::new(self.clone())
    }
}

fn paginate<T: Clone>(rows: Vec<T>, page: Page) -> Vec<T> {
    rows.into_iter()
        .skip(page.offset.max(0) as usize)
        .take(page.limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl UserStore for MemoryDb {
    async fn create(&self, new_user: NewUser) -> Result<Account> {
        let mut state = self.state.lock().unwrap();

        if state
            .users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(AppError::Conflict(
                "duplicate username or email".to_string(),
            ));
        }

        let now = state.next_ts();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        let profile = Profile {
            user_id: user.id,
            bio: None,
            photo_key: None,
            created_at: now,
            updated_at: now,
        };

        state.users.push(user.clone());
        state.profiles.push(profile);

        Ok(state.account(&user))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| state.account(u)))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| state.account(u)))
    }

    async fn update(&self, id: Uuid, patch: AccountPatch) -> Result<Option<Account>> {
        let mut state = self.state.lock().unwrap();

        if !state.users.iter().any(|u| u.id == id) {
            return Ok(None);
        }
        if let Some(username) = &patch.username {
            if state.users.iter().any(|u| u.id != id && &u.username == username) {
                return Err(AppError::Conflict("duplicate username".to_string()));
            }
        }
        if let Some(email) = &patch.email {
            if state.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(AppError::Conflict("duplicate email".to_string()));
            }
        }

        let now = state.next_ts();
        let user = {
            let user = state.users.iter_mut().find(|u| u.id == id).unwrap();
            if let Some(username) = patch.username {
                user.username = username;
            }
            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(first_name) = patch.first_name {
                user.first_name = first_name;
            }
            if let Some(last_name) = patch.last_name {
                user.last_name = last_name;
            }
            user.updated_at = now;
            user.clone()
        };

        if let Some(bio) = patch.bio {
            let profile = state
                .profiles
                .iter_mut()
                .find(|p| p.user_id == id)
                .unwrap();
            profile.bio = Some(bio);
            profile.updated_at = now;
        }

        Ok(Some(state.account(&user)))
    }

    async fn set_photo_key(&self, id: Uuid, photo_key: Option<&str>) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let now = state.next_ts();
        match state.profiles.iter_mut().find(|p| p.user_id == id) {
            Some(profile) => {
                profile.photo_key = photo_key.map(|k| k.to_string());
                profile.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();

        if !state.users.iter().any(|u| u.id == id) {
            return Ok(false);
        }

        let owned_posts: Vec<Uuid> = state
            .posts
            .iter()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();

        state
            .reactions
            .retain(|r| r.user_id != id && !owned_posts.contains(&r.post_id));
        state
            .comments
            .retain(|c| c.author_id != id && !owned_posts.contains(&c.post_id));
        state.posts.retain(|p| p.author_id != id);
        state.profiles.retain(|p| p.user_id != id);
        state.users.retain(|u| u.id != id);

        Ok(true)
    }
}

#[async_trait]
impl PostStore for MemoryDb {
    async fn create(&self, author_id: Uuid, content: &str) -> Result<Post> {
        let mut state = self.state.lock().unwrap();
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            content: content.to_string(),
            created_at: state.next_ts(),
        };
        state.posts.push(post.clone());
        Ok(post)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Post>> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, filter: &PostFilter, page: Page) -> Result<Vec<Post>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Post> = state
            .posts
            .iter()
            .filter(|p| filter.author.map_or(true, |a| p.author_id == a))
            .filter(|p| filter.created_after.map_or(true, |t| p.created_at >= t))
            .cloned()
            .collect();
        rows.sort_by_key(|p| (p.created_at, p.id));
        Ok(paginate(rows, page))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.reactions.retain(|r| r.post_id != id);
        state.comments.retain(|c| c.post_id != id);
        state.posts.retain(|p| p.id != id);
        Ok(())
    }
}

#[async_trait]
impl CommentStore for MemoryDb {
    async fn create(&self, post_id: Uuid, author_id: Uuid, content: &str) -> Result<Comment> {
        let mut state = self.state.lock().unwrap();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content: content.to_string(),
            created_at: state.next_ts(),
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find(&self, id: Uuid) -> Result<Option<Comment>> {
        let state = self.state.lock().unwrap();
        Ok(state.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, filter: &CommentFilter, page: Page) -> Result<Vec<Comment>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| filter.post.map_or(true, |p| c.post_id == p))
            .filter(|c| filter.author.map_or(true, |a| c.author_id == a))
            .filter(|c| filter.created_after.map_or(true, |t| c.created_at >= t))
            .cloned()
            .collect();
        rows.sort_by_key(|c| (c.created_at, c.id));
        Ok(paginate(rows, page))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.comments.retain(|c| c.id != id);
        Ok(())
    }
}

#[async_trait]
impl ReactionStore for MemoryDb {
    async fn upsert(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        reaction_type: ReactionType,
    ) -> Result<Reaction> {
        let mut state = self.state.lock().unwrap();
        let now = state.next_ts();

        if let Some(existing) = state
            .reactions
            .iter_mut()
            .find(|r| r.user_id == user_id && r.post_id == post_id)
        {
            existing.reaction_type = reaction_type;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let reaction = Reaction {
            id: Uuid::new_v4(),
            user_id,
            post_id,
            reaction_type,
            created_at: now,
            updated_at: now,
        };
        state.reactions.push(reaction.clone());
        Ok(reaction)
    }

    async fn find(&self, user_id: Uuid, post_id: Uuid) -> Result<Option<Reaction>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reactions
            .iter()
            .find(|r| r.user_id == user_id && r.post_id == post_id)
            .cloned())
    }

    async fn list(&self, filter: &ReactionFilter, page: Page) -> Result<Vec<Reaction>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<Reaction> = state
            .reactions
            .iter()
            .filter(|r| filter.post.map_or(true, |p| r.post_id == p))
            .filter(|r| filter.user.map_or(true, |u| r.user_id == u))
            .filter(|r| filter.reaction_type.map_or(true, |t| r.reaction_type == t))
            .filter(|r| filter.created_after.map_or(true, |t| r.created_at >= t))
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.created_at, r.id));
        Ok(paginate(rows, page))
    }

    async fn delete(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.reactions.len();
        state
            .reactions
            .retain(|r| !(r.user_id == user_id && r.post_id == post_id));
        Ok(state.reactions.len() < before)
    }

    async fn counts(&self, post_id: Uuid) -> Result<ReactionCounts> {
        let state = self.state.lock().unwrap();
        let mut counts = ReactionCounts {
            likes: 0,
            dislikes: 0,
        };
        for reaction in state.reactions.iter().filter(|r| r.post_id == post_id) {
            match reaction.reaction_type {
                ReactionType::Like => counts.likes += 1,
                ReactionType::Dislike => counts.dislikes += 1,
            }
        }
        Ok(counts)
    }
}
