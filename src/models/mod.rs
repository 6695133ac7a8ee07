// src/models/mod.rs

pub mod attempt;
pub mod comment;
pub mod discussion;
pub mod leaderboard;
pub mod question;
pub mod stats;
pub mod user;
