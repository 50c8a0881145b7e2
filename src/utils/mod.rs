pub mod date;
pub mod generic;
