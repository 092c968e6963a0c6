//! Discussion and message operations on the signed-in account.
//!
//! Every mutation builds a new `Account`, writes the whole collection through
//! the store, and only then hands the account to the session. A failed write
//! leaves both in-memory views where they were.

use chrono::Utc;
use thiserror::Error;

use crate::{
    domain::{account::Account, discussion::Discussion, message::Message},
    generation::{self, TextGenerator},
    infra::account_store::{AccountStore, StoreError},
    usecases::session::Session,
};

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("no account is signed in")]
    NotSignedIn,
    #[error("discussion title is empty")]
    EmptyTitle,
    #[error("failed to persist account changes: {0}")]
    Storage(#[from] StoreError),
}

/// Result of a recorded message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub discussion_id: String,
    pub message: Message,
    /// Generated reply, or a fallback. It is not stored in the discussion.
    pub reply: String,
}

#[derive(Debug, Default)]
pub struct Conversation {
    current: Option<Discussion>,
}

impl Conversation {
    pub fn current_discussion(&self) -> Option<&Discussion> {
        self.current.as_ref()
    }

    /// Makes a discussion of the signed-in account the active one.
    pub fn open_discussion(&mut self, session: &Session, id: &str) -> bool {
        match session.current_account().and_then(|account| account.discussion(id)) {
            Some(discussion) => {
                self.current = Some(discussion.clone());
                true
            }
            None => false,
        }
    }

    pub fn close_discussion(&mut self) {
        self.current = None;
    }

    pub fn create_discussion(
        &mut self,
        session: &mut Session,
        store: &mut AccountStore,
        title: &str,
    ) -> Result<Discussion, ConversationError> {
        let Some(account) = session.current_account() else {
            tracing::warn!("cannot create a discussion: no account is signed in");
            return Err(ConversationError::NotSignedIn);
        };

        let title = title.trim();
        if title.is_empty() {
            return Err(ConversationError::EmptyTitle);
        }

        let discussion = Discussion::new(title);
        let mut discussions = account.discussions.clone();
        discussions.push(discussion.clone());
        let updated = account.with_discussions(discussions);

        persist_account(session, store, updated)?;
        self.current = Some(discussion.clone());

        tracing::info!(discussion_id = %discussion.id, title, "discussion created");
        Ok(discussion)
    }

    /// Removes a discussion. Returns whether one was removed; not being
    /// signed in is a logged no-op.
    pub fn delete_discussion(
        &mut self,
        session: &mut Session,
        store: &mut AccountStore,
        id: &str,
    ) -> Result<bool, ConversationError> {
        let Some(account) = session.current_account() else {
            tracing::warn!("cannot delete a discussion: no account is signed in");
            return Ok(false);
        };

        let remaining: Vec<Discussion> = account
            .discussions
            .iter()
            .filter(|discussion| discussion.id != id)
            .cloned()
            .collect();
        if remaining.len() == account.discussions.len() {
            tracing::warn!(discussion_id = id, "cannot delete: unknown discussion");
            return Ok(false);
        }
        let updated = account.with_discussions(remaining);

        persist_account(session, store, updated)?;
        if self.current.as_ref().is_some_and(|current| current.id == id) {
            self.current = None;
        }

        tracing::info!(discussion_id = id, "discussion deleted");
        Ok(true)
    }

    /// Records a user message in `discussion_id`.
    ///
    /// The generator is asked for a reply first; its outcome never affects
    /// what gets recorded. Returns `None` when nothing was recorded because
    /// nobody is signed in, the content is blank, or the discussion is unknown.
    pub async fn send_message(
        &mut self,
        session: &mut Session,
        store: &mut AccountStore,
        generator: &dyn TextGenerator,
        discussion_id: &str,
        content: &str,
    ) -> Result<Option<SentMessage>, ConversationError> {
        let Some(account) = session.current_account() else {
            tracing::warn!("cannot send a message: no account is signed in");
            return Ok(None);
        };

        let content = content.trim();
        if content.is_empty() {
            tracing::warn!("cannot send an empty message");
            return Ok(None);
        }

        if account.discussion(discussion_id).is_none() {
            tracing::warn!(discussion_id, "cannot send: unknown discussion");
            return Ok(None);
        }

        let reply = generation::reply_or_fallback(generator, content).await;
        tracing::debug!(discussion_id, reply = %reply, "reply received");

        let message = Message::from_user(content, Utc::now());
        let discussions = account
            .discussions
            .iter()
            .map(|discussion| {
                if discussion.id == discussion_id {
                    discussion.with_message(message.clone())
                } else {
                    discussion.clone()
                }
            })
            .collect();
        let updated = account.with_discussions(discussions);

        persist_account(session, store, updated)?;
        if self
            .current
            .as_ref()
            .is_some_and(|current| current.id == discussion_id)
        {
            self.current = session
                .current_account()
                .and_then(|account| account.discussion(discussion_id))
                .cloned();
        }

        tracing::info!(discussion_id, "message recorded");
        Ok(Some(SentMessage {
            discussion_id: discussion_id.to_owned(),
            message,
            reply,
        }))
    }
}

/// Writes `updated` into a copy of the full collection, saves it, then
/// replaces the session account.
fn persist_account(
    session: &mut Session,
    store: &mut AccountStore,
    updated: Account,
) -> Result<(), StoreError> {
    let mut accounts = store.accounts().to_vec();
    match accounts
        .iter_mut()
        .find(|account| account.identifier == updated.identifier)
    {
        Some(slot) => *slot = updated.clone(),
        None => accounts.push(updated.clone()),
    }

    store.save(accounts)?;
    session.set_current_account(updated);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::SubsecRound;

    use super::*;
    use crate::{
        generation::GenerationError,
        infra::{account_store::USERS_STORAGE_KEY, stubs::MemoryKeyValueStorage},
        test_support::StubGenerator,
    };

    struct Fixture {
        storage: MemoryKeyValueStorage,
        store: AccountStore,
        session: Session,
        conversation: Conversation,
    }

    impl Fixture {
        fn signed_in() -> Self {
            let storage = MemoryKeyValueStorage::default();
            let mut store = AccountStore::new(Box::new(storage.clone()));
            store.load();
            let mut session = Session::default();
            assert!(session.register(&mut store, "alice", "pw1", "Alice"));

            Self {
                storage,
                store,
                session,
                conversation: Conversation::default(),
            }
        }

        fn create(&mut self, title: &str) -> Discussion {
            self.conversation
                .create_discussion(&mut self.session, &mut self.store, title)
                .expect("discussion should be created")
        }

        async fn send(
            &mut self,
            generator: &StubGenerator,
            discussion_id: &str,
            content: &str,
        ) -> Option<SentMessage> {
            self.conversation
                .send_message(
                    &mut self.session,
                    &mut self.store,
                    generator,
                    discussion_id,
                    content,
                )
                .await
                .expect("send should not fail")
        }

        fn persisted_alice(&self) -> Account {
            let raw = self
                .storage
                .raw(USERS_STORAGE_KEY)
                .expect("accounts should be persisted");
            let accounts: Vec<Account> = serde_json::from_str(&raw).expect("valid json");
            accounts
                .into_iter()
                .find(|account| account.identifier == "alice")
                .expect("alice should be persisted")
        }

        fn session_alice(&self) -> &Account {
            self.session.current_account().expect("alice is signed in")
        }
    }

    #[test]
    fn create_requires_a_signed_in_account() {
        let mut fixture = Fixture::signed_in();
        fixture.session.sign_out();

        let result = fixture.conversation.create_discussion(
            &mut fixture.session,
            &mut fixture.store,
            "Trip",
        );

        assert!(matches!(result, Err(ConversationError::NotSignedIn)));
    }

    #[test]
    fn create_rejects_blank_title() {
        let mut fixture = Fixture::signed_in();

        let result = fixture.conversation.create_discussion(
            &mut fixture.session,
            &mut fixture.store,
            "   ",
        );

        assert!(matches!(result, Err(ConversationError::EmptyTitle)));
        assert!(fixture.session_alice().discussions.is_empty());
    }

    #[test]
    fn create_appends_one_empty_discussion_everywhere_and_activates_it() {
        let mut fixture = Fixture::signed_in();

        let discussion = fixture.create("Trip");

        assert!(discussion.messages.is_empty());
        assert_eq!(fixture.session_alice().discussions, vec![discussion.clone()]);
        assert_eq!(fixture.persisted_alice().discussions, vec![discussion.clone()]);
        assert_eq!(fixture.conversation.current_discussion(), Some(&discussion));
    }

    #[test]
    fn created_discussions_get_distinct_ids() {
        let mut fixture = Fixture::signed_in();

        let first = fixture.create("One");
        let second = fixture.create("Two");

        assert_ne!(first.id, second.id);
        assert_eq!(fixture.persisted_alice().discussions.len(), 2);
    }

    #[test]
    fn delete_removes_only_the_matching_discussion() {
        let mut fixture = Fixture::signed_in();
        let keep = fixture.create("Keep");
        let drop = fixture.create("Drop");
        let other = fixture.create("Other");
        assert!(fixture.conversation.open_discussion(&fixture.session, &keep.id));

        let removed = fixture
            .conversation
            .delete_discussion(&mut fixture.session, &mut fixture.store, &drop.id)
            .expect("delete should succeed");

        assert!(removed);
        assert_eq!(
            fixture.persisted_alice().discussions,
            vec![keep.clone(), other.clone()]
        );
        assert_eq!(fixture.session_alice().discussions, vec![keep.clone(), other]);
        assert_eq!(fixture.conversation.current_discussion(), Some(&keep));
    }

    #[test]
    fn deleting_the_active_discussion_clears_it() {
        let mut fixture = Fixture::signed_in();
        let active = fixture.create("Active");

        fixture
            .conversation
            .delete_discussion(&mut fixture.session, &mut fixture.store, &active.id)
            .expect("delete should succeed");

        assert!(fixture.conversation.current_discussion().is_none());
    }

    #[test]
    fn delete_without_account_is_a_no_op() {
        let mut fixture = Fixture::signed_in();
        let discussion = fixture.create("Trip");
        let before = fixture.storage.raw(USERS_STORAGE_KEY);
        fixture.session.sign_out();

        let removed = fixture
            .conversation
            .delete_discussion(&mut fixture.session, &mut fixture.store, &discussion.id)
            .expect("delete should not fail");

        assert!(!removed);
        assert_eq!(fixture.storage.raw(USERS_STORAGE_KEY), before);
    }

    #[tokio::test]
    async fn send_records_trimmed_user_message() {
        let mut fixture = Fixture::signed_in();
        let discussion = fixture.create("Trip");
        let generator = StubGenerator::replying("Hi there");
        let before = Utc::now().trunc_subsecs(3);

        let sent = fixture
            .send(&generator, &discussion.id, "  hello  ")
            .await
            .expect("message should be recorded");

        assert_eq!(sent.message.content, "hello");
        assert_eq!(sent.message.sender, crate::domain::message::Sender::User);
        let sent_at = sent.message.sent_at().expect("timestamp should parse");
        assert!(sent_at >= before);
        assert_eq!(sent.reply, "Hi there");
        assert_eq!(generator.prompts(), vec!["hello".to_owned()]);
    }

    #[tokio::test]
    async fn generator_outcome_does_not_change_recorded_message() {
        for generator in [
            StubGenerator::replying("ok"),
            StubGenerator::failing(GenerationError::Status { status: 500 }),
        ] {
            let mut fixture = Fixture::signed_in();
            let discussion = fixture.create("Trip");

            fixture.send(&generator, &discussion.id, "hello").await;

            let persisted = fixture.persisted_alice();
            let messages = &persisted.discussions[0].messages;
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].content, "hello");
            assert_eq!(messages[0].sender, crate::domain::message::Sender::User);
        }
    }

    #[tokio::test]
    async fn send_refreshes_the_active_discussion() {
        let mut fixture = Fixture::signed_in();
        let discussion = fixture.create("Trip");
        let generator = StubGenerator::replying("ok");

        fixture.send(&generator, &discussion.id, "hello").await;

        let current = fixture
            .conversation
            .current_discussion()
            .expect("discussion stays active");
        assert_eq!(current.messages.len(), 1);
        assert_eq!(
            Some(current),
            fixture.session_alice().discussion(&discussion.id)
        );
    }

    #[tokio::test]
    async fn send_to_inactive_discussion_leaves_active_one_alone() {
        let mut fixture = Fixture::signed_in();
        let background = fixture.create("Background");
        let active = fixture.create("Active");
        let generator = StubGenerator::replying("ok");

        fixture.send(&generator, &background.id, "hello").await;

        assert_eq!(fixture.conversation.current_discussion(), Some(&active));
        assert_eq!(
            fixture
                .session_alice()
                .discussion(&background.id)
                .map(|d| d.messages.len()),
            Some(1)
        );
    }

    #[tokio::test]
    async fn blank_content_or_no_account_records_nothing() {
        let mut fixture = Fixture::signed_in();
        let discussion = fixture.create("Trip");
        let generator = StubGenerator::replying("ok");

        assert!(fixture.send(&generator, &discussion.id, " \n\t").await.is_none());
        fixture.session.sign_out();
        assert!(fixture.send(&generator, &discussion.id, "hello").await.is_none());

        assert!(generator.prompts().is_empty());
        assert!(fixture.persisted_alice().discussions[0].messages.is_empty());
    }

    #[tokio::test]
    async fn failed_write_keeps_session_and_active_discussion() {
        let mut fixture = Fixture::signed_in();
        let discussion = fixture.create("Trip");
        let generator = StubGenerator::replying("ok");
        fixture.storage.fail_writes(true);

        let result = fixture
            .conversation
            .send_message(
                &mut fixture.session,
                &mut fixture.store,
                &generator,
                &discussion.id,
                "hello",
            )
            .await;

        assert!(matches!(result, Err(ConversationError::Storage(_))));
        assert!(fixture.session_alice().discussions[0].messages.is_empty());
        assert_eq!(fixture.conversation.current_discussion(), Some(&discussion));
    }

    #[tokio::test]
    async fn register_create_send_delete_scenario() {
        let mut fixture = Fixture::signed_in();
        let generator = StubGenerator::failing(GenerationError::MissingApiKey);

        let trip = fixture.create("Trip");
        fixture.send(&generator, &trip.id, "Hello").await;

        let persisted = fixture.persisted_alice();
        assert_eq!(persisted.display_name, "Alice");
        assert_eq!(persisted.discussions.len(), 1);
        assert_eq!(persisted.discussions[0].title, "Trip");
        assert_eq!(persisted.discussions[0].messages.len(), 1);
        assert_eq!(persisted.discussions[0].messages[0].content, "Hello");

        fixture
            .conversation
            .delete_discussion(&mut fixture.session, &mut fixture.store, &trip.id)
            .expect("delete should succeed");

        assert!(fixture.persisted_alice().discussions.is_empty());
    }

    #[test]
    fn persist_keeps_other_accounts_untouched() {
        let mut fixture = Fixture::signed_in();
        let mut bob_session = Session::default();
        assert!(bob_session.register(&mut fixture.store, "bob", "pw2", "Bob"));
        let bob_before = fixture.store.accounts()[1].clone();

        fixture.create("Trip");

        assert_eq!(fixture.store.accounts()[1], bob_before);
        assert_eq!(fixture.store.accounts()[0].discussions.len(), 1);
    }
}
