pub mod text;

pub use text::GraphFile;
