use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// A saved dashboard arrangement. `widgets` is an opaque JSON array; the
/// backend never looks inside individual entries.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Layout {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub widgets: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-widget-instance settings. `widget_id` is client-generated and unique
/// across all users.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WidgetPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub widget_id: Uuid,
    pub widget_type: String,
    pub settings: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
