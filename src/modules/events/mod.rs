pub mod controller;
pub mod router;
pub mod service;

pub use router::init_events_router;
pub use service::EventService;
