pub mod controller;
pub mod router;
pub mod service;

pub use router::init_exams_router;
pub use service::ExamService;
