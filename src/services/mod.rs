pub mod bot_init;
pub mod gateway;
pub mod geolocation;
pub mod interaction_handler;
pub mod notifier;
pub mod presence;
pub mod record_store;
