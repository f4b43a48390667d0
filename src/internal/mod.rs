pub mod auth;
pub mod comments;
pub mod feed;
pub mod gesture;
pub mod models;
pub mod pagination;
pub mod patch;
pub mod post_form;
pub mod ui;
