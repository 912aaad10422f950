pub mod mesh;

pub use mesh::TriangleSoup;
