pub mod channel;
pub mod common;
pub mod group;
pub mod identity;
pub mod message;
pub mod storage;
pub mod user;

#[cfg(test)]
mod test;
