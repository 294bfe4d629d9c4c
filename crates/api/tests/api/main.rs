mod climate_queries;
mod home;
