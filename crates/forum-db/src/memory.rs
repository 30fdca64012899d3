//! In-memory implementation of every repository trait
//!
//! Backs service and HTTP tests without PostgreSQL. All state lives behind
//! one async mutex. A reaction unit of work holds the owned guard until it
//! commits or is dropped and edits a working copy, so concurrent toggles
//! serialize and a failed unit leaves no trace.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use forum_core::entities::{
    Comment, NewComment, NewPost, NewUser, Post, Reaction, ReactionCounters, Session, User,
};
use forum_core::error::DomainError;
use forum_core::traits::{
    CommentRepository, PostFilter, PostRepository, ReactionRepository, ReactionUnitOfWork,
    RepoResult, SessionRepository, UserRepository,
};
use forum_core::value_objects::{
    CommentId, CounterDelta, Polarity, PostId, ReactionTarget, TargetKind, UserId,
};

#[derive(Debug, Clone, Default)]
struct State {
    next_id: i64,
    users: BTreeMap<UserId, User>,
    sessions: HashMap<UserId, Session>,
    posts: BTreeMap<PostId, Post>,
    comments: BTreeMap<CommentId, Comment>,
    reactions: HashMap<(UserId, ReactionTarget), Polarity>,
    fail_counter_updates: bool,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn target_exists(&self, target: ReactionTarget) -> bool {
        match target.kind {
            TargetKind::Post => self.posts.contains_key(&PostId::new(target.id)),
            TargetKind::Comment => self.comments.contains_key(&CommentId::new(target.id)),
        }
    }

    fn counters_mut(&mut self, target: ReactionTarget) -> Option<&mut ReactionCounters> {
        match target.kind {
            TargetKind::Post => self
                .posts
                .get_mut(&PostId::new(target.id))
                .map(|p| &mut p.counters),
            TargetKind::Comment => self
                .comments
                .get_mut(&CommentId::new(target.id))
                .map(|c| &mut c.counters),
        }
    }
}

/// Shared in-memory store; clones share the same state
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every counter update inside a reaction unit fail with a storage error
    pub async fn fail_counter_updates(&self, fail: bool) {
        self.state.lock().await.fail_counter_updates = fail;
    }

    /// Raw session row of a user, live or not
    pub async fn session_of(&self, user_id: UserId) -> Option<Session> {
        self.state.lock().await.sessions.get(&user_id).cloned()
    }

    pub async fn session_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    /// Every reaction row on a target
    pub async fn rows_for_target(&self, target: ReactionTarget) -> Vec<Reaction> {
        let state = self.state.lock().await;
        let mut rows: Vec<Reaction> = state
            .reactions
            .iter()
            .filter(|((_, t), _)| *t == target)
            .map(|((user_id, t), polarity)| Reaction::new(*user_id, *t, *polarity))
            .collect();
        rows.sort_by_key(|r| r.user_id);
        rows
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.login == login).cloned())
    }

    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.login == user.login) {
            return Err(DomainError::LoginAlreadyExists);
        }
        if state.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let id = UserId::new(state.next_id());
        let created = user.clone().into_user(id);
        state.users.insert(id, created.clone());
        Ok(created)
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[async_trait]
impl SessionRepository for MemoryStore {
    async fn upsert_for_user(&self, session: &Session) -> RepoResult<()> {
        let mut state = self.state.lock().await;
        state.sessions.insert(session.user_id, session.clone());
        Ok(())
    }

    async fn find_user_by_token(&self, token: &str) -> RepoResult<Option<UserId>> {
        let now = Utc::now();
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .values()
            .find(|s| s.token == token && s.is_live_at(now))
            .map(|s| s.user_id))
    }

    async fn delete_by_token(&self, token: &str) -> RepoResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.token != token);
        Ok(state.sessions.len() < before)
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> RepoResult<u64> {
        let mut state = self.state.lock().await;
        let count = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at >= before);
        Ok((count - state.sessions.len()) as u64)
    }
}

// ============================================================================
// Posts
// ============================================================================

#[async_trait]
impl PostRepository for MemoryStore {
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        Ok(self.state.lock().await.posts.get(&id).cloned())
    }

    async fn list(&self, filter: &PostFilter) -> RepoResult<Vec<Post>> {
        let state = self.state.lock().await;
        let matches = |post: &Post| match filter {
            PostFilter::All => true,
            PostFilter::ByCategory(tag) => post.has_category(tag),
            PostFilter::MyPosts(user_id) => post.author_id == *user_id,
            PostFilter::MyLikedPosts(user_id) => {
                state.reactions.get(&(*user_id, ReactionTarget::post(post.id)))
                    == Some(&Polarity::Like)
            }
        };
        Ok(state
            .posts
            .values()
            .rev()
            .filter(|p| matches(p))
            .cloned()
            .collect())
    }

    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&post.author_id) {
            return Err(DomainError::UnknownUser(post.author_id));
        }
        let id = PostId::new(state.next_id());
        let mut created = post.clone().into_post(id, Utc::now());
        created.categories.sort();
        state.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn categories(&self) -> RepoResult<Vec<String>> {
        let state = self.state.lock().await;
        let tags: BTreeSet<&String> = state.posts.values().flat_map(|p| &p.categories).collect();
        Ok(tags.into_iter().cloned().collect())
    }
}

// ============================================================================
// Comments
// ============================================================================

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>> {
        Ok(self.state.lock().await.comments.get(&id).cloned())
    }

    async fn find_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>> {
        let state = self.state.lock().await;
        Ok(state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment> {
        let mut state = self.state.lock().await;
        if !state.posts.contains_key(&comment.post_id) {
            return Err(DomainError::PostNotFound(comment.post_id));
        }
        let id = CommentId::new(state.next_id());
        let created = comment.clone().into_comment(id, Utc::now());
        state.comments.insert(id, created.clone());
        Ok(created)
    }

    async fn post_id_by_comment_id(&self, id: CommentId) -> RepoResult<Option<PostId>> {
        Ok(self.state.lock().await.comments.get(&id).map(|c| c.post_id))
    }
}

// ============================================================================
// Reactions
// ============================================================================

/// Unit of work over a private copy of the store
pub struct MemoryReactionUnitOfWork {
    guard: OwnedMutexGuard<State>,
    working: State,
}

#[async_trait]
impl ReactionUnitOfWork for MemoryReactionUnitOfWork {
    async fn lock_target(&mut self, target: ReactionTarget) -> RepoResult<bool> {
        Ok(self.working.target_exists(target))
    }

    async fn find_polarity(
        &mut self,
        user_id: UserId,
        target: ReactionTarget,
    ) -> RepoResult<Option<Polarity>> {
        Ok(self.working.reactions.get(&(user_id, target)).copied())
    }

    async fn insert(&mut self, reaction: &Reaction) -> RepoResult<()> {
        let key = (reaction.user_id, reaction.target);
        if self.working.reactions.contains_key(&key) {
            return Err(DomainError::DatabaseError(
                "duplicate key value violates unique constraint \"reactions_pkey\"".to_string(),
            ));
        }
        self.working.reactions.insert(key, reaction.polarity);
        Ok(())
    }

    async fn delete(&mut self, reaction: &Reaction) -> RepoResult<u64> {
        let key = (reaction.user_id, reaction.target);
        if self.working.reactions.get(&key) == Some(&reaction.polarity) {
            self.working.reactions.remove(&key);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn adjust_counters(
        &mut self,
        target: ReactionTarget,
        delta: CounterDelta,
    ) -> RepoResult<()> {
        if self.working.fail_counter_updates {
            return Err(DomainError::DatabaseError(
                "counter update failed".to_string(),
            ));
        }
        if let Some(counters) = self.working.counters_mut(target) {
            *counters = counters.applied(delta);
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> RepoResult<()> {
        let MemoryReactionUnitOfWork { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[async_trait]
impl ReactionRepository for MemoryStore {
    async fn begin(&self) -> RepoResult<Box<dyn ReactionUnitOfWork>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryReactionUnitOfWork { guard, working }))
    }

    async fn find_polarity(
        &self,
        user_id: UserId,
        target: ReactionTarget,
    ) -> RepoResult<Option<Polarity>> {
        let state = self.state.lock().await;
        Ok(state.reactions.get(&(user_id, target)).copied())
    }

    async fn counters(&self, target: ReactionTarget) -> RepoResult<Option<ReactionCounters>> {
        let state = self.state.lock().await;
        Ok(match target.kind {
            TargetKind::Post => state.posts.get(&PostId::new(target.id)).map(|p| p.counters),
            TargetKind::Comment => state
                .comments
                .get(&CommentId::new(target.id))
                .map(|c| c.counters),
        })
    }

    async fn comment_counters_by_post(
        &self,
        post_id: PostId,
    ) -> RepoResult<Vec<(CommentId, ReactionCounters)>> {
        let state = self.state.lock().await;
        Ok(state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .map(|c| (c.id, c.counters))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn seed_user(store: &MemoryStore, login: &str) -> User {
        UserRepository::create(
            store,
            &NewUser {
                login: login.to_string(),
                email: format!("{login}@example.com"),
                password_hash: "hash".to_string(),
            },
        )
        .await
        .unwrap()
    }

    async fn seed_post(store: &MemoryStore, author: &User, tags: &[&str]) -> Post {
        PostRepository::create(
            store,
            &NewPost::new(
                author.id,
                author.login.clone(),
                "title".to_string(),
                "body".to_string(),
                tags.iter().map(ToString::to_string).collect(),
            ),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_login_and_email() {
        let store = MemoryStore::new();
        seed_user(&store, "alice").await;

        let dup_login = NewUser {
            login: "alice".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "hash".to_string(),
        };
        assert!(matches!(
            UserRepository::create(&store, &dup_login).await,
            Err(DomainError::LoginAlreadyExists)
        ));

        let dup_email = NewUser {
            login: "alice2".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
        };
        assert!(matches!(
            UserRepository::create(&store, &dup_email).await,
            Err(DomainError::EmailAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn test_session_upsert_replaces_row() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "alice").await;
        let now = Utc::now();

        let first = Session::issue(user.id, "first".to_string(), now, Duration::hours(12));
        let second = Session::issue(user.id, "second".to_string(), now, Duration::hours(12));
        store.upsert_for_user(&first).await.unwrap();
        store.upsert_for_user(&second).await.unwrap();

        assert_eq!(store.session_count().await, 1);
        assert_eq!(store.find_user_by_token("first").await.unwrap(), None);
        assert_eq!(store.find_user_by_token("second").await.unwrap(), Some(user.id));
    }

    #[tokio::test]
    async fn test_delete_expired_keeps_live_sessions() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bobby").await;
        let now = Utc::now();

        let stale = Session::issue(alice.id, "stale".to_string(), now - Duration::hours(13), Duration::hours(12));
        let live = Session::issue(bob.id, "live".to_string(), now, Duration::hours(12));
        store.upsert_for_user(&stale).await.unwrap();
        store.upsert_for_user(&live).await.unwrap();

        assert_eq!(store.delete_expired(now).await.unwrap(), 1);
        assert!(store.session_of(alice.id).await.is_none());
        assert!(store.session_of(bob.id).await.is_some());
    }

    #[tokio::test]
    async fn test_uncommitted_unit_is_discarded() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "alice").await;
        let post = seed_post(&store, &user, &[]).await;
        let target = ReactionTarget::post(post.id);

        {
            let mut unit = store.begin().await.unwrap();
            assert!(unit.lock_target(target).await.unwrap());
            unit.insert(&Reaction::new(user.id, target, Polarity::Like)).await.unwrap();
            unit.adjust_counters(target, CounterDelta::ZERO.with(Polarity::Like, 1))
                .await
                .unwrap();
        }

        assert!(store.rows_for_target(target).await.is_empty());
        assert_eq!(
            store.counters(target).await.unwrap(),
            Some(ReactionCounters::default())
        );
    }

    #[tokio::test]
    async fn test_list_filters() {
        let store = MemoryStore::new();
        let alice = seed_user(&store, "alice").await;
        let bob = seed_user(&store, "bobby").await;
        let first = seed_post(&store, &alice, &["rust"]).await;
        let second = seed_post(&store, &bob, &["go", "rust"]).await;

        let mut unit = store.begin().await.unwrap();
        unit.insert(&Reaction::new(alice.id, ReactionTarget::post(second.id), Polarity::Like))
            .await
            .unwrap();
        unit.commit().await.unwrap();

        let all = store.list(&PostFilter::All).await.unwrap();
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![second.id, first.id]);

        let go = store.list(&PostFilter::ByCategory("go".to_string())).await.unwrap();
        assert_eq!(go.len(), 1);

        let mine = store.list(&PostFilter::MyPosts(alice.id)).await.unwrap();
        assert_eq!(mine[0].id, first.id);

        let liked = store.list(&PostFilter::MyLikedPosts(alice.id)).await.unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].id, second.id);

        assert_eq!(store.categories().await.unwrap(), vec!["go", "rust"]);
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "alice").await;
        let result = CommentRepository::create(
            &store,
            &NewComment {
                post_id: PostId::new(99),
                author_id: user.id,
                author: user.login.clone(),
                message: "hi".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(DomainError::PostNotFound(_))));
    }
}
