//! Database entities.

pub mod comment;
pub mod comment_like;
pub mod notification;
pub mod post;
pub mod post_like;
pub mod reply;
pub mod reply_like;
pub mod user;

pub use comment::Entity as Comment;
pub use comment_like::Entity as CommentLike;
pub use notification::Entity as Notification;
pub use post::Entity as Post;
pub use post_like::Entity as PostLike;
pub use reply::Entity as Reply;
pub use reply_like::Entity as ReplyLike;
pub use user::Entity as User;
