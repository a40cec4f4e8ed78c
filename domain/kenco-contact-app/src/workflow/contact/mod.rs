pub mod dispatch;
pub mod submit;
