pub mod backend;
pub mod file;
pub mod manager;

pub use backend::{
    CaptureConstraints, CaptureDevice, CaptureDeviceFactory, CaptureSource, CaptureStream, Frame,
    NoCaptureDevice,
};
pub use file::FileCaptureDevice;
pub use manager::CaptureManager;
