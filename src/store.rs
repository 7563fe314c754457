//! In-memory social graph owned by the engine worker.
//!
//! Plain data plus the primitive mutations the engine needs. There is no
//! locking here: the worker task in [`crate::service`] owns the graph
//! exclusively and applies one operation at a time.

use std::collections::{HashMap, HashSet};

pub type UserId = u64;
pub type PostId = u64;

#[derive(Debug)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Delivered message lines, append-only, in delivery order.
    pub inbox: Vec<String>,
}

#[derive(Debug)]
pub struct Community {
    pub name: String,
    pub members: HashSet<UserId>,
    pub posts: Vec<Post>,
}

#[derive(Debug)]
pub struct Post {
    pub id: PostId,
    pub author: UserId,
    pub community: String,
    pub content: String,
    /// Comments are bare strings; a comment's only address is its 1-based
    /// position here, and nothing is ever removed, so positions are stable.
    pub comments: Vec<String>,
}

/// All mutable state of the simulation: users, communities, posts, and the
/// two id counters. The counters only move forward.
#[derive(Debug, Default)]
pub struct SocialGraph {
    users: HashMap<UserId, User>,
    communities: HashMap<String, Community>,
    next_user_id: UserId,
    next_post_id: PostId,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates the next user id and registers a user under it. Ids start
    /// at 1. Usernames are free text and need not be unique.
    pub fn add_user(&mut self, username: &str) -> UserId {
        self.next_user_id += 1;
        let id = self.next_user_id;
        self.users.insert(
            id,
            User {
                id,
                username: username.to_string(),
                inbox: Vec::new(),
            },
        );
        id
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.get_mut(&id)
    }

    /// Display name for an id, falling back to `User{id}` for ids that were
    /// never registered.
    pub fn display_name(&self, id: UserId) -> String {
        match self.users.get(&id) {
            Some(user) => user.username.clone(),
            None => format!("User{id}"),
        }
    }

    /// Inserts an empty community under `name`. Returns false when the name
    /// is already taken, leaving the existing community untouched.
    pub fn add_community(&mut self, name: &str) -> bool {
        if self.communities.contains_key(name) {
            return false;
        }
        self.communities.insert(
            name.to_string(),
            Community {
                name: name.to_string(),
                members: HashSet::new(),
                posts: Vec::new(),
            },
        );
        true
    }

    pub fn community(&self, name: &str) -> Option<&Community> {
        self.communities.get(name)
    }

    pub fn community_mut(&mut self, name: &str) -> Option<&mut Community> {
        self.communities.get_mut(name)
    }

    /// The post counter advances on every call, whether or not the post
    /// ends up being created.
    pub fn allocate_post_id(&mut self) -> PostId {
        self.next_post_id += 1;
        self.next_post_id
    }

    /// Finds a post by id, scanning every community. Post ids are unique
    /// across the whole graph, so at most one community can hold a match.
    pub fn post_mut(&mut self, id: PostId) -> Option<&mut Post> {
        self.communities
            .values_mut()
            .flat_map(|community| community.posts.iter_mut())
            .find(|post| post.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_start_at_one_and_increase() {
        let mut graph = SocialGraph::new();
        assert_eq!(graph.add_user("alice"), 1);
        assert_eq!(graph.add_user("alice"), 2);
        assert_eq!(graph.add_user("bob"), 3);
    }

    #[test]
    fn duplicate_community_names_are_rejected() {
        let mut graph = SocialGraph::new();
        assert!(graph.add_community("golang"));
        assert!(!graph.add_community("golang"));
        assert!(graph.add_community("rust"));
    }

    #[test]
    fn post_lookup_scans_every_community() {
        let mut graph = SocialGraph::new();
        graph.add_community("golang");
        graph.add_community("rust");

        for community in ["golang", "rust"] {
            let id = graph.allocate_post_id();
            graph.community_mut(community).unwrap().posts.push(Post {
                id,
                author: 1,
                community: community.to_string(),
                content: format!("hello {community}"),
                comments: Vec::new(),
            });
        }

        assert_eq!(graph.post_mut(1).map(|post| post.id), Some(1));
        assert_eq!(graph.post_mut(2).map(|post| post.id), Some(2));
        assert!(graph.post_mut(3).is_none());
    }

    #[test]
    fn display_name_falls_back_for_unknown_ids() {
        let mut graph = SocialGraph::new();
        let id = graph.add_user("alice");
        assert_eq!(graph.display_name(id), "alice");
        assert_eq!(graph.display_name(99), "User99");
    }
}
