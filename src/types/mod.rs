pub mod dataset;
pub mod site;
pub mod weather_field;
pub mod weather_record;
