//! Coordinator logic: every platform operation applied against the graph.
//!
//! [`Engine`] owns the [`SocialGraph`] and exposes one method per
//! operation. The worker in [`crate::service`] calls these methods one
//! request at a time; unit tests call them directly. Failures are the
//! [`EngineError`] enum rather than preformatted text, so the menu layer
//! owns all presentation.

use thiserror::Error;
use tracing::{debug, info};

use crate::store::{Post, PostId, SocialGraph, UserId};

/// Ways an operation can fail. `Display` renders the line the menu prints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Community '{0}' does not exist.")]
    CommunityNotFound(String),
    #[error("User with ID {0} does not exist.")]
    UserNotFound(UserId),
    #[error("Post ID '{0}' not found.")]
    PostNotFound(PostId),
    #[error("Post {post} has no comment {index}.")]
    InvalidCommentIndex { post: PostId, index: usize },
    #[error("The engine is no longer running.")]
    EngineGone,
}

/// A completed registration: the allocated id plus the echoed username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub username: String,
}

/// Creating a community that already exists is not an error, just a
/// different confirmation; nothing is mutated in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityCreated {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub id: PostId,
    pub author: String,
}

/// A freshly appended comment: who wrote it and its 1-based position,
/// which is also the id used to reply to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPosted {
    pub author: String,
    pub position: usize,
}

#[derive(Debug, Default)]
pub struct Engine {
    graph: SocialGraph,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_user(&mut self, username: &str) -> NewUser {
        let id = self.graph.add_user(username);
        info!(id, username, "registered user");
        NewUser {
            id,
            username: username.to_string(),
        }
    }

    pub fn create_community(&mut self, name: &str) -> CommunityCreated {
        if self.graph.add_community(name) {
            info!(name, "created community");
            CommunityCreated::Created
        } else {
            CommunityCreated::AlreadyExists
        }
    }

    /// Membership is a set insert, so joining twice is a no-op.
    pub fn join_community(&mut self, user: UserId, name: &str) -> Result<String, EngineError> {
        let Some(community) = self.graph.community_mut(name) else {
            return Err(EngineError::CommunityNotFound(name.to_string()));
        };
        community.members.insert(user);
        debug!(user, name, "user joined community");
        Ok(self.graph.display_name(user))
    }

    /// Leaving a community the user never joined succeeds quietly.
    pub fn leave_community(&mut self, user: UserId, name: &str) -> Result<String, EngineError> {
        let Some(community) = self.graph.community_mut(name) else {
            return Err(EngineError::CommunityNotFound(name.to_string()));
        };
        community.members.remove(&user);
        debug!(user, name, "user left community");
        Ok(self.graph.display_name(user))
    }

    pub fn create_post(
        &mut self,
        user: UserId,
        community: &str,
        content: &str,
    ) -> Result<NewPost, EngineError> {
        // The id counter advances before the community lookup, so a failed
        // create still consumes an id and leaves a gap in the sequence.
        let id = self.graph.allocate_post_id();
        let author = self.graph.display_name(user);
        let Some(target) = self.graph.community_mut(community) else {
            return Err(EngineError::CommunityNotFound(community.to_string()));
        };
        target.posts.push(Post {
            id,
            author: user,
            community: community.to_string(),
            content: content.to_string(),
            comments: Vec::new(),
        });
        info!(id, user, community, "created post");
        Ok(NewPost { id, author })
    }

    pub fn comment_on_post(
        &mut self,
        post: PostId,
        user: UserId,
        content: &str,
    ) -> Result<CommentPosted, EngineError> {
        let author = self.graph.display_name(user);
        let Some(target) = self.graph.post_mut(post) else {
            return Err(EngineError::PostNotFound(post));
        };
        target.comments.push(format!("User '{author}': {content}"));
        let position = target.comments.len();
        debug!(post, user, position, "comment added");
        Ok(CommentPosted { author, position })
    }

    /// A reply mutates the addressed comment string in place rather than
    /// adding a new entry, so later positions never shift.
    pub fn reply_to_comment(
        &mut self,
        post: PostId,
        comment: usize,
        user: UserId,
        content: &str,
    ) -> Result<String, EngineError> {
        let author = self.graph.display_name(user);
        let Some(target) = self.graph.post_mut(post) else {
            return Err(EngineError::PostNotFound(post));
        };
        if comment == 0 || comment > target.comments.len() {
            return Err(EngineError::InvalidCommentIndex {
                post,
                index: comment,
            });
        }
        target.comments[comment - 1].push_str(&format!("\nReply by '{author}': {content}"));
        debug!(post, comment, user, "reply appended to comment");
        Ok(author)
    }

    /// Likes validate nothing and store nothing; the confirmation is the
    /// whole effect.
    pub fn like_post(&mut self, post: PostId, user: UserId) -> String {
        debug!(post, user, "post liked");
        self.graph.display_name(user)
    }

    pub fn dislike_post(&mut self, post: PostId, user: UserId) -> String {
        debug!(post, user, "post disliked");
        self.graph.display_name(user)
    }

    pub fn send_message(
        &mut self,
        sender: UserId,
        receiver: UserId,
        content: &str,
    ) -> Result<String, EngineError> {
        let from = self.graph.display_name(sender);
        self.deliver(receiver, format!("Message from '{from}': {content}"))
    }

    /// Semantically identical to [`Engine::send_message`]; only the line
    /// prefix differs.
    pub fn reply_to_message(
        &mut self,
        sender: UserId,
        receiver: UserId,
        content: &str,
    ) -> Result<String, EngineError> {
        let from = self.graph.display_name(sender);
        self.deliver(receiver, format!("Reply from '{from}': {content}"))
    }

    pub fn view_inbox(&self, user: UserId) -> Result<Vec<String>, EngineError> {
        match self.graph.user(user) {
            Some(user) => Ok(user.inbox.clone()),
            None => Err(EngineError::UserNotFound(user)),
        }
    }

    fn deliver(&mut self, receiver: UserId, line: String) -> Result<String, EngineError> {
        let Some(user) = self.graph.user_mut(receiver) else {
            return Err(EngineError::UserNotFound(receiver));
        };
        user.inbox.push(line);
        debug!(receiver, "inbox line delivered");
        Ok(user.username.clone())
    }
}
