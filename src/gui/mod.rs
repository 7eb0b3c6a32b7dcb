//! GUI module - User interface components

mod app;
mod control_panel;
mod page_view;

pub use app::MbtiAtlasApp;
pub use control_panel::{ControlPanel, ControlPanelAction, UserSettings};
pub use page_view::{Page, PageView};
