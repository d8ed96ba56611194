pub mod list_ops;
pub mod view;
