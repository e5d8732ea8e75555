pub mod artist;
pub mod id;
pub mod options;
