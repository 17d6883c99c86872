pub mod color;
pub mod editor;
pub mod filter_bar;
pub mod form;
pub mod header;
pub mod help;
pub mod page;
pub mod status_bar;
pub mod task_list;
pub mod task_row;
