mod canvas_panel;
mod dashboard_panel;
mod gallery_panel;
mod nav_bar;
mod profile_panel;
mod save_dialog;

pub use canvas_panel::{canvas_panel, draw_canvas};
pub use dashboard_panel::dashboard_panel;
pub use gallery_panel::{artwork_card, gallery_panel};
pub use nav_bar::nav_bar;
pub use profile_panel::profile_panel;
pub use save_dialog::save_dialog;
