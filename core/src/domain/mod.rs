pub mod common;
pub mod events;
pub mod outbox;
pub mod user;

#[cfg(test)]
mod test;
