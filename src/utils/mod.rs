pub mod image_data;
