pub mod layouts;
pub mod widget_preferences;
