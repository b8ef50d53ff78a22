pub mod agreement;
pub mod authority;
pub mod company;
pub mod letter;
pub mod lorry;
pub mod material;
pub mod route;
