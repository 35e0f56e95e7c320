use diesel::prelude::*;
use thiserror::Error;

/// The blog a location publishes into. One row per location.
#[derive(Debug, Clone, PartialEq, Queryable, Insertable)]
#[diesel(table_name = crate::schema::location_settings)]
pub struct LocationSetting {
    pub location_id: String,
    pub blog_id: String,
    pub updated_at: i32,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

impl LocationSetting {
    pub fn get(
        conn: &mut SqliteConnection,
        query_location_id: &str,
    ) -> Result<Option<LocationSetting>, SettingsError> {
        use crate::schema::location_settings::dsl::location_settings;

        let setting = location_settings
            .find(query_location_id)
            .first::<LocationSetting>(conn)
            .optional()?;
        Ok(setting)
    }

    /// Selects `blog_id` for the location, replacing any earlier choice.
    pub fn upsert(
        conn: &mut SqliteConnection,
        new_location_id: &str,
        new_blog_id: &str,
    ) -> Result<LocationSetting, SettingsError> {
        use crate::schema::location_settings::dsl::*;

        let setting = LocationSetting {
            location_id: new_location_id.to_string(),
            blog_id: new_blog_id.to_string(),
            updated_at: chrono::Utc::now().timestamp() as i32,
        };

        diesel::insert_into(location_settings)
            .values(&setting)
            .on_conflict(location_id)
            .do_update()
            .set((blog_id.eq(&setting.blog_id), updated_at.eq(setting.updated_at)))
            .execute(conn)?;

        Ok(setting)
    }
}
