pub mod exporter;
pub mod frame_clock;
pub mod renderer;
pub mod studio;

pub use exporter::{write_frames, ExportedFrame, Exporter};
pub use frame_clock::FrameClock;
pub use renderer::{RenderService, RenderedFrame};
pub use studio::{Slot, Studio};
