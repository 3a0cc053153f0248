pub mod ball;
pub mod body;
pub mod player;
pub mod post;
