pub mod prelude;

pub mod app_user;
pub mod brand;
pub mod customer;
pub mod message;
pub mod organization;
pub mod permission;
pub mod role;
pub mod vehicle;
pub mod vehicle_model;
pub mod vendor;
