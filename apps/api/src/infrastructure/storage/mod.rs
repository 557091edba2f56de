pub mod cloudinary_image_host;
pub mod traits;
