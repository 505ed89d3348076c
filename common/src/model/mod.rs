pub mod brand;
pub mod package;
pub mod site;
pub mod template;
