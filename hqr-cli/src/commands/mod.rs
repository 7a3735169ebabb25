pub mod factor;
pub mod show;
