pub mod chrome;
pub mod contact;
pub mod lightbox;
pub mod video;
pub mod work;
