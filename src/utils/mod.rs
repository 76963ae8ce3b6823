pub mod jwt;
pub mod parsing;
pub mod password;
pub mod upload;
