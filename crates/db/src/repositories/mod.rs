//! Repository layer for database access.

pub mod cascade;
pub mod comment;
pub mod comment_like;
pub mod notification;
pub mod post;
pub mod post_like;
pub mod reply;
pub mod reply_like;
pub mod user;

pub use cascade::{CascadeCounts, CascadeRepository};
pub use comment::CommentRepository;
pub use comment_like::CommentLikeRepository;
pub use notification::NotificationRepository;
pub use post::PostRepository;
pub use post_like::PostLikeRepository;
pub use reply::ReplyRepository;
pub use reply_like::ReplyLikeRepository;
pub use user::UserRepository;
