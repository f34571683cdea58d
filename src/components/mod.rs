pub mod app;
pub mod camera_controls;
pub mod floor_plan_view;
pub mod legend;
pub mod legend_panel;
pub mod toast;
pub mod tracker_view;
