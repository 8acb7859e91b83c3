pub use super::app_user::Entity as AppUser;
pub use super::brand::Entity as Brand;
pub use super::customer::Entity as Customer;
pub use super::message::Entity as Message;
pub use super::organization::Entity as Organization;
pub use super::permission::Entity as Permission;
pub use super::role::Entity as Role;
pub use super::vehicle::Entity as Vehicle;
pub use super::vehicle_model::Entity as VehicleModel;
pub use super::vendor::Entity as Vendor;
