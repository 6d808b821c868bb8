pub mod constraint;
pub mod foreignkey;
