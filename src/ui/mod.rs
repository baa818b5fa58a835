pub mod check_loop;
pub mod renderer;
