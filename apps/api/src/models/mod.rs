pub mod freelancer;
pub mod hire;
pub mod user;
