pub mod layout_repository_postgres;
pub mod sea_orm_entity;
pub mod widget_preference_repository_postgres;
