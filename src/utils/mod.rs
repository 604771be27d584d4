pub mod data_path;
pub mod uri;
