pub mod build;
pub mod patch;
pub mod work_item;
