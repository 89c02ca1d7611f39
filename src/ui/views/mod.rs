pub mod alert;
pub mod question;
pub mod result;
pub mod status;
pub mod submit;
pub mod upload;
