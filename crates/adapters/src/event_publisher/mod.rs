mod broadcast;

pub use broadcast::BroadcastEventPublisher;
