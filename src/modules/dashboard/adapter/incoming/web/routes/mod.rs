pub mod create_layout;
pub mod create_widget_preference;
pub mod delete_layout;
pub mod delete_widget_preference;
pub mod get_layout;
pub mod list_layouts;
pub mod list_widget_preferences;
pub mod update_layout;
pub mod update_widget_preference;

pub use create_layout::create_layout_handler;
pub use create_widget_preference::create_widget_preference_handler;
pub use delete_layout::delete_layout_handler;
pub use delete_widget_preference::delete_widget_preference_handler;
pub use get_layout::get_layout_handler;
pub use list_layouts::list_layouts_handler;
pub use list_widget_preferences::list_widget_preferences_handler;
pub use update_layout::update_layout_handler;
pub use update_widget_preference::update_widget_preference_handler;

/// Registers every dashboard endpoint on the app.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(list_layouts_handler)
        .service(create_layout_handler)
        .service(get_layout_handler)
        .service(update_layout_handler)
        .service(delete_layout_handler)
        .service(list_widget_preferences_handler)
        .service(create_widget_preference_handler)
        .service(update_widget_preference_handler)
        .service(delete_widget_preference_handler);
}
