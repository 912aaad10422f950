pub mod obj_loader;
pub mod obj_writer;

pub use obj_loader::load_obj;
pub use obj_writer::write_obj;
