pub mod customer;

pub use customer::{Entity as Customer, Model as CustomerModel};
