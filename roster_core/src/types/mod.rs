pub mod assignment;
pub mod facts;
pub mod member;
