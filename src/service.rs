//! Request/reply plumbing around the engine.
//!
//! Twelve request shapes, one per operation, each carrying its parameters
//! and a oneshot sender for the single reply. A spawned worker drains the
//! queue and applies one request at a time to the [`Engine`], so no two
//! operations ever interleave and every caller sees a fully applied store.
//! The oneshot sender is consumed by replying, which makes exactly-one-
//! reply-per-request hold by construction.
//!
//! [`EngineHandle`] is the caller-facing facade: one async method per
//! operation that enqueues a request and waits for its reply. A handle
//! whose worker has stopped reports [`EngineError::EngineGone`] instead of
//! hanging.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::engine::{CommentPosted, CommunityCreated, Engine, EngineError, NewPost, NewUser};
use crate::store::{PostId, UserId};

// The only caller is one sequential menu loop; a shallow queue is plenty.
const REQUEST_BUFFER: usize = 32;

enum EngineRequest {
    RegisterUser {
        username: String,
        respond_to: oneshot::Sender<NewUser>,
    },
    CreateCommunity {
        name: String,
        respond_to: oneshot::Sender<CommunityCreated>,
    },
    JoinCommunity {
        user: UserId,
        name: String,
        respond_to: oneshot::Sender<Result<String, EngineError>>,
    },
    LeaveCommunity {
        user: UserId,
        name: String,
        respond_to: oneshot::Sender<Result<String, EngineError>>,
    },
    CreatePost {
        user: UserId,
        community: String,
        content: String,
        respond_to: oneshot::Sender<Result<NewPost, EngineError>>,
    },
    CommentOnPost {
        post: PostId,
        user: UserId,
        content: String,
        respond_to: oneshot::Sender<Result<CommentPosted, EngineError>>,
    },
    ReplyToComment {
        post: PostId,
        comment: usize,
        user: UserId,
        content: String,
        respond_to: oneshot::Sender<Result<String, EngineError>>,
    },
    LikePost {
        post: PostId,
        user: UserId,
        respond_to: oneshot::Sender<String>,
    },
    DislikePost {
        post: PostId,
        user: UserId,
        respond_to: oneshot::Sender<String>,
    },
    SendMessage {
        sender: UserId,
        receiver: UserId,
        content: String,
        respond_to: oneshot::Sender<Result<String, EngineError>>,
    },
    ReplyToMessage {
        sender: UserId,
        receiver: UserId,
        content: String,
        respond_to: oneshot::Sender<Result<String, EngineError>>,
    },
    ViewInbox {
        user: UserId,
        respond_to: oneshot::Sender<Result<Vec<String>, EngineError>>,
    },
}

/// Spawns the engine worker and returns a handle to it. The worker owns
/// all state and exits once every handle clone has been dropped.
pub fn spawn() -> EngineHandle {
    let (request_tx, request_rx) = mpsc::channel(REQUEST_BUFFER);
    tokio::spawn(run_engine(request_rx));
    EngineHandle { request_tx }
}

async fn run_engine(mut requests: mpsc::Receiver<EngineRequest>) {
    let mut engine = Engine::new();
    while let Some(request) = requests.recv().await {
        handle_request(&mut engine, request);
    }
    debug!("engine worker stopped");
}

// Replies to callers that gave up waiting are dropped silently.
fn handle_request(engine: &mut Engine, request: EngineRequest) {
    match request {
        EngineRequest::RegisterUser {
            username,
            respond_to,
        } => {
            let _ = respond_to.send(engine.register_user(&username));
        }
        EngineRequest::CreateCommunity { name, respond_to } => {
            let _ = respond_to.send(engine.create_community(&name));
        }
        EngineRequest::JoinCommunity {
            user,
            name,
            respond_to,
        } => {
            let _ = respond_to.send(engine.join_community(user, &name));
        }
        EngineRequest::LeaveCommunity {
            user,
            name,
            respond_to,
        } => {
            let _ = respond_to.send(engine.leave_community(user, &name));
        }
        EngineRequest::CreatePost {
            user,
            community,
            content,
            respond_to,
        } => {
            let _ = respond_to.send(engine.create_post(user, &community, &content));
        }
        EngineRequest::CommentOnPost {
            post,
            user,
            content,
            respond_to,
        } => {
            let _ = respond_to.send(engine.comment_on_post(post, user, &content));
        }
        EngineRequest::ReplyToComment {
            post,
            comment,
            user,
            content,
            respond_to,
        } => {
            let _ = respond_to.send(engine.reply_to_comment(post, comment, user, &content));
        }
        EngineRequest::LikePost {
            post,
            user,
            respond_to,
        } => {
            let _ = respond_to.send(engine.like_post(post, user));
        }
        EngineRequest::DislikePost {
            post,
            user,
            respond_to,
        } => {
            let _ = respond_to.send(engine.dislike_post(post, user));
        }
        EngineRequest::SendMessage {
            sender,
            receiver,
            content,
            respond_to,
        } => {
            let _ = respond_to.send(engine.send_message(sender, receiver, &content));
        }
        EngineRequest::ReplyToMessage {
            sender,
            receiver,
            content,
            respond_to,
        } => {
            let _ = respond_to.send(engine.reply_to_message(sender, receiver, &content));
        }
        EngineRequest::ViewInbox { user, respond_to } => {
            let _ = respond_to.send(engine.view_inbox(user));
        }
    }
}

/// Cloneable handle for talking to the engine worker.
#[derive(Clone)]
pub struct EngineHandle {
    request_tx: mpsc::Sender<EngineRequest>,
}

impl EngineHandle {
    pub async fn register_user(&self, username: &str) -> Result<NewUser, EngineError> {
        self.request(|respond_to| EngineRequest::RegisterUser {
            username: username.to_string(),
            respond_to,
        })
        .await
    }

    pub async fn create_community(&self, name: &str) -> Result<CommunityCreated, EngineError> {
        self.request(|respond_to| EngineRequest::CreateCommunity {
            name: name.to_string(),
            respond_to,
        })
        .await
    }

    pub async fn join_community(&self, user: UserId, name: &str) -> Result<String, EngineError> {
        self.request(|respond_to| EngineRequest::JoinCommunity {
            user,
            name: name.to_string(),
            respond_to,
        })
        .await?
    }

    pub async fn leave_community(&self, user: UserId, name: &str) -> Result<String, EngineError> {
        self.request(|respond_to| EngineRequest::LeaveCommunity {
            user,
            name: name.to_string(),
            respond_to,
        })
        .await?
    }

    pub async fn create_post(
        &self,
        user: UserId,
        community: &str,
        content: &str,
    ) -> Result<NewPost, EngineError> {
        self.request(|respond_to| EngineRequest::CreatePost {
            user,
            community: community.to_string(),
            content: content.to_string(),
            respond_to,
        })
        .await?
    }

    pub async fn comment_on_post(
        &self,
        post: PostId,
        user: UserId,
        content: &str,
    ) -> Result<CommentPosted, EngineError> {
        self.request(|respond_to| EngineRequest::CommentOnPost {
            post,
            user,
            content: content.to_string(),
            respond_to,
        })
        .await?
    }

    pub async fn reply_to_comment(
        &self,
        post: PostId,
        comment: usize,
        user: UserId,
        content: &str,
    ) -> Result<String, EngineError> {
        self.request(|respond_to| EngineRequest::ReplyToComment {
            post,
            comment,
            user,
            content: content.to_string(),
            respond_to,
        })
        .await?
    }

    pub async fn like_post(&self, post: PostId, user: UserId) -> Result<String, EngineError> {
        self.request(|respond_to| EngineRequest::LikePost {
            post,
            user,
            respond_to,
        })
        .await
    }

    pub async fn dislike_post(&self, post: PostId, user: UserId) -> Result<String, EngineError> {
        self.request(|respond_to| EngineRequest::DislikePost {
            post,
            user,
            respond_to,
        })
        .await
    }

    pub async fn send_message(
        &self,
        sender: UserId,
        receiver: UserId,
        content: &str,
    ) -> Result<String, EngineError> {
        self.request(|respond_to| EngineRequest::SendMessage {
            sender,
            receiver,
            content: content.to_string(),
            respond_to,
        })
        .await?
    }

    pub async fn reply_to_message(
        &self,
        sender: UserId,
        receiver: UserId,
        content: &str,
    ) -> Result<String, EngineError> {
        self.request(|respond_to| EngineRequest::ReplyToMessage {
            sender,
            receiver,
            content: content.to_string(),
            respond_to,
        })
        .await?
    }

    pub async fn view_inbox(&self, user: UserId) -> Result<Vec<String>, EngineError> {
        self.request(|respond_to| EngineRequest::ViewInbox { user, respond_to })
            .await?
    }

    /// Enqueues one request and waits for its single reply. Both channel
    /// directions going quiet mean the worker is gone.
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> EngineRequest,
    ) -> Result<T, EngineError> {
        let (respond_to, reply) = oneshot::channel();
        self.request_tx
            .send(build(respond_to))
            .await
            .map_err(|_| EngineError::EngineGone)?;
        reply.await.map_err(|_| EngineError::EngineGone)
    }
}
