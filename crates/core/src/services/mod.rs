//! Service layer.

pub mod comment;
pub mod like;
pub mod notification;
pub mod post;
pub mod reply;
pub mod user;

pub use comment::CommentService;
pub use like::{LikeResult, LikeService};
pub use notification::{IdentityDirectory, NotificationService};
pub use post::PostService;
pub use reply::ReplyService;
pub use user::UserService;
