pub mod game;
pub mod games;
pub mod invite;
pub mod login;
pub mod register;
