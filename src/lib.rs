pub mod bindings;
pub mod capture;
pub mod config;
pub mod error;
pub mod http;
pub mod report;
pub mod service;
pub mod session;
pub mod status;

pub use bindings::{Affordance, BindingTable};
pub use capture::{
    CaptureConstraints, CaptureDevice, CaptureDeviceFactory, CaptureManager, CaptureSource,
    CaptureStream, FileCaptureDevice, Frame,
};
pub use config::Config;
pub use error::{CaptureError, Endpoint, TransportError};
pub use http::{create_router, AppState};
pub use report::{FileHandoffStore, HandoffStore, MemoryHandoffStore, REPORT_KEY};
pub use service::{HttpInterviewService, InterviewService, Report};
pub use session::{Outcome, Phase, SessionConfig, SessionController, SessionView};
pub use status::{Progress, Severity, StatusEntry, StatusFeed};
