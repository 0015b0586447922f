//! Business logic for the DevShare backend.

pub mod services;

pub use services::{
    CommentService, IdentityDirectory, LikeResult, LikeService, NotificationService, PostService,
    ReplyService, UserService,
};
