pub mod segmentation;
pub mod vocabulary;
