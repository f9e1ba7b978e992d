//! Shared domain models for the Bistro Live ordering platform.
//!
//! This crate holds the wire types exchanged between the server and its
//! clients (customer menu, kitchen display, admin dashboard), plus the
//! client-side cart logic for the customer ordering flow.
//!
//! All models serialize with camelCase field names so documents stay
//! compatible with the data the original deployment accumulated.

pub mod cart;
pub mod models;

pub use cart::Cart;
pub use models::{
    Category, CategoryCreate, CategoryUpdate, DiningTable, DiningTableCreate, DiningTableUpdate,
    MenuItem, MenuItemCreate, MenuItemUpdate, Order, OrderItem, OrderStatus, StaffMember,
    StaffMemberCreate, StaffRole, StaffStatus, StoreSettings, StoreSettingsUpdate, TableStatus,
};
