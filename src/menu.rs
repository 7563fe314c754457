//! The interactive text menu driving the engine.
//!
//! This is presentation glue only: it prompts, validates numeric input,
//! calls [`EngineHandle`] methods, and renders the typed outcomes into
//! colored lines. Confirmations print in green, failures in red.

use anyhow::Result;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};

use crate::engine::{CommunityCreated, EngineError};
use crate::service::EngineHandle;

const BANNER: &str = "Welcome to the forum simulator!";

const MENU: &str = "\nChoose an option:
1. Register User
2. Create Community
3. Join Community
4. Create Post
5. Comment on Post
6. Reply to Comment
7. Like Post
8. Dislike Post
9. Leave Community
10. Send Message
11. Reply to Message
12. View Inbox
13. Exit";

/// One menu entry. Parsing is separate from dispatch so it can be tested
/// without touching stdio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    RegisterUser,
    CreateCommunity,
    JoinCommunity,
    CreatePost,
    CommentOnPost,
    ReplyToComment,
    LikePost,
    DislikePost,
    LeaveCommunity,
    SendMessage,
    ReplyToMessage,
    ViewInbox,
    Exit,
}

impl MenuAction {
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Self::RegisterUser),
            "2" => Some(Self::CreateCommunity),
            "3" => Some(Self::JoinCommunity),
            "4" => Some(Self::CreatePost),
            "5" => Some(Self::CommentOnPost),
            "6" => Some(Self::ReplyToComment),
            "7" => Some(Self::LikePost),
            "8" => Some(Self::DislikePost),
            "9" => Some(Self::LeaveCommunity),
            "10" => Some(Self::SendMessage),
            "11" => Some(Self::ReplyToMessage),
            "12" => Some(Self::ViewInbox),
            "13" => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Menu {
    handle: EngineHandle,
    input: BufReader<Stdin>,
    output: Stdout,
}

impl Menu {
    pub fn new(handle: EngineHandle) -> Self {
        Self {
            handle,
            input: BufReader::new(tokio::io::stdin()),
            output: tokio::io::stdout(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        self.print_line(&BANNER.cyan().bold().to_string()).await?;

        loop {
            let Some(choice) = self.next_choice().await? else {
                break;
            };
            match MenuAction::parse(&choice) {
                Some(MenuAction::Exit) => {
                    self.print_line(&"Exiting... Goodbye!".red().bold().to_string())
                        .await?;
                    break;
                }
                Some(action) => self.run_action(action).await?,
                None => {
                    self.reject("Invalid choice. Please try again.").await?;
                }
            }
        }

        Ok(())
    }

    async fn run_action(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::RegisterUser => {
                let username = self.prompt("Enter username: ").await?;
                let registered = self.handle.register_user(&username).await;
                self.report(registered, |user| {
                    format!("User '{}' registered with ID {}.", user.username, user.id)
                })
                .await
            }
            MenuAction::CreateCommunity => {
                let name = self.prompt("Enter community name: ").await?;
                let created = self.handle.create_community(&name).await;
                self.report(created, |outcome| match outcome {
                    CommunityCreated::Created => {
                        format!("Community '{name}' created successfully.")
                    }
                    CommunityCreated::AlreadyExists => {
                        format!("Community '{name}' already exists.")
                    }
                })
                .await
            }
            MenuAction::JoinCommunity => {
                let user = self.read_number("Enter your user ID: ").await?;
                let name = self.prompt("Enter community name: ").await?;
                let joined = self.handle.join_community(user, &name).await;
                self.report(joined, |username| {
                    format!("User '{username}' joined community '{name}'.")
                })
                .await
            }
            MenuAction::LeaveCommunity => {
                let user = self.read_number("Enter your user ID: ").await?;
                let name = self.prompt("Enter community name: ").await?;
                let left = self.handle.leave_community(user, &name).await;
                self.report(left, |username| {
                    format!("User '{username}' left community '{name}'.")
                })
                .await
            }
            MenuAction::CreatePost => {
                let user = self.read_number("Enter your user ID: ").await?;
                let name = self.prompt("Enter community name: ").await?;
                let content = self.prompt("Enter post content: ").await?;
                let posted = self.handle.create_post(user, &name, &content).await;
                self.report(posted, |post| {
                    format!(
                        "User '{}' posted in '{name}' (post {}): {content}",
                        post.author, post.id
                    )
                })
                .await
            }
            MenuAction::CommentOnPost => {
                let post = self.read_number("Enter post ID: ").await?;
                let user = self.read_number("Enter your user ID: ").await?;
                let content = self.prompt("Enter comment content: ").await?;
                let commented = self.handle.comment_on_post(post, user, &content).await;
                self.report(commented, |comment| {
                    format!(
                        "User '{}' commented on post {post} (comment {}): {content}",
                        comment.author, comment.position
                    )
                })
                .await
            }
            MenuAction::ReplyToComment => {
                let post = self.read_number("Enter post ID: ").await?;
                let comment = self.read_number("Enter comment ID to reply to: ").await?;
                let user = self.read_number("Enter your user ID: ").await?;
                let content = self.prompt("Enter reply content: ").await?;
                let replied = self
                    .handle
                    .reply_to_comment(post, comment, user, &content)
                    .await;
                self.report(replied, |author| {
                    format!("User '{author}' replied to comment {comment} on post {post}: {content}")
                })
                .await
            }
            MenuAction::LikePost => {
                let post = self.read_number("Enter post ID to like: ").await?;
                let user = self.read_number("Enter your user ID: ").await?;
                let liked = self.handle.like_post(post, user).await;
                self.report(liked, |actor| format!("User '{actor}' liked post {post}."))
                    .await
            }
            MenuAction::DislikePost => {
                let post = self.read_number("Enter post ID to dislike: ").await?;
                let user = self.read_number("Enter your user ID: ").await?;
                let disliked = self.handle.dislike_post(post, user).await;
                self.report(disliked, |actor| {
                    format!("User '{actor}' disliked post {post}.")
                })
                .await
            }
            MenuAction::SendMessage => {
                let sender = self.read_number("Enter your user ID: ").await?;
                let receiver = self.read_number("Enter receiver ID: ").await?;
                let content = self.prompt("Enter message content: ").await?;
                let sent = self.handle.send_message(sender, receiver, &content).await;
                self.report(sent, |username| format!("Message sent to user '{username}'."))
                    .await
            }
            MenuAction::ReplyToMessage => {
                let sender = self.read_number("Enter your user ID: ").await?;
                let receiver = self.read_number("Enter receiver ID: ").await?;
                let content = self.prompt("Enter reply content: ").await?;
                let sent = self
                    .handle
                    .reply_to_message(sender, receiver, &content)
                    .await;
                self.report(sent, |username| format!("Reply sent to user '{username}'."))
                    .await
            }
            MenuAction::ViewInbox => {
                let user = self.read_number("Enter your user ID: ").await?;
                let inbox = self.handle.view_inbox(user).await;
                self.report(inbox, |lines| {
                    if lines.is_empty() {
                        "Inbox is empty.".to_string()
                    } else {
                        format!("Inbox:\n{}", lines.join("\n"))
                    }
                })
                .await
            }
            MenuAction::Exit => Ok(()),
        }
    }

    /// Prints the menu and reads the next choice. `None` means stdin is
    /// closed and the loop should end.
    async fn next_choice(&mut self) -> Result<Option<String>> {
        self.print_line(MENU).await?;
        self.output.write_all(b"Enter your choice: ").await?;
        self.output.flush().await?;

        let mut line = String::new();
        let bytes = self.input.read_line(&mut line).await?;
        if bytes == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn prompt(&mut self, text: &str) -> Result<String> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        let bytes = self.input.read_line(&mut line).await?;
        if bytes == 0 {
            anyhow::bail!("input ended in the middle of an action");
        }
        Ok(line.trim().to_string())
    }

    /// Re-prompts until the input parses; garbage is never coerced to zero.
    async fn read_number<T: std::str::FromStr>(&mut self, text: &str) -> Result<T> {
        loop {
            let raw = self.prompt(text).await?;
            match raw.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.reject("Please enter a number.").await?,
            }
        }
    }

    async fn report<T>(
        &mut self,
        outcome: Result<T, EngineError>,
        describe: impl FnOnce(T) -> String,
    ) -> Result<()> {
        match outcome {
            Ok(value) => self.confirm(&describe(value)).await,
            Err(err) => self.reject(&err.to_string()).await,
        }
    }

    async fn confirm(&mut self, text: &str) -> Result<()> {
        self.print_line(&text.green().bold().to_string()).await
    }

    async fn reject(&mut self, text: &str) -> Result<()> {
        self.print_line(&text.red().bold().to_string()).await
    }

    async fn print_line(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_map_to_actions() {
        assert_eq!(MenuAction::parse("1"), Some(MenuAction::RegisterUser));
        assert_eq!(MenuAction::parse("9"), Some(MenuAction::LeaveCommunity));
        assert_eq!(MenuAction::parse("12"), Some(MenuAction::ViewInbox));
        assert_eq!(MenuAction::parse("13"), Some(MenuAction::Exit));
        assert_eq!(MenuAction::parse(" 7 "), Some(MenuAction::LikePost));
    }

    #[test]
    fn junk_choices_are_rejected() {
        for junk in ["", "0", "14", "99", "abc", "1.5", "-1"] {
            assert_eq!(MenuAction::parse(junk), None, "choice {junk:?}");
        }
    }
}
