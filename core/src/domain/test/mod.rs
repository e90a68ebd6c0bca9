mod events;
mod outbox;
mod user;
