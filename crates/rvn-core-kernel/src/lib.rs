pub mod cpu_add;
pub mod cpu_cast;
pub mod cpu_scale;
