pub mod layout_repository;
pub mod widget_preference_repository;
