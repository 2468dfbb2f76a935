pub mod store;

pub mod restaurant_repo;
pub use restaurant_repo::RestaurantRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod menu_repo;
pub use menu_repo::MenuRepository;
