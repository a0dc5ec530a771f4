pub mod create_layout;
pub mod create_widget_preference;
pub mod delete_layout;
pub mod delete_widget_preference;
pub mod get_layout;
pub mod list_layouts;
pub mod list_widget_preferences;
pub mod update_layout;
pub mod update_widget_preference;
