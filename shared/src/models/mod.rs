//! Domain Models
//!
//! One file per collection, following the `Entity` + `EntityCreate` +
//! `EntityUpdate` payload convention.

pub mod category;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod staff;
pub mod store_settings;

pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use dining_table::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderItem, OrderStatus};
pub use staff::{StaffMember, StaffMemberCreate, StaffRole, StaffStatus};
pub use store_settings::{StoreSettings, StoreSettingsUpdate};
