pub mod entity;
pub mod orientation;
