pub mod location_setting;
