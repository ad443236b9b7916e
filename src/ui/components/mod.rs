pub mod comments;
pub mod player;
pub mod post;
