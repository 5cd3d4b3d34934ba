pub mod descriptor;
pub mod plugins;
