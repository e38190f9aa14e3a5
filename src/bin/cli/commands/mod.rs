pub mod build;
pub mod list;
pub mod serve;
pub mod show;
