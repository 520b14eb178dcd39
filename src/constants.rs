pub const API_NAME: &str = "[cars-api]";

pub const CARS_PATH: &str = "/api/v1/cars";
pub const LIFETIMES_PATH: &str = "/api/v1/lifetimes";
